//! Error handling types
//!
//! One variant per pipeline stage plus ambient variants for configuration,
//! networking, and I/O. Collaborator implementations construct the variant
//! matching the stage they serve; the workflow propagates them unchanged, so
//! a caller can always tell which stage failed.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for SQL Query Bridge
#[derive(Error, Debug)]
pub enum Error {
    /// Schema retrieval failed (database unreachable, introspection query failed)
    #[error("schema retrieval error: {message}")]
    SchemaRetrieval {
        /// Description of the retrieval failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding provider operation error
    #[error("embedding error: {message}")]
    Embedding {
        /// Description of the embedding failure
        message: String,
    },

    /// Similarity index write (upsert/delete) error
    #[error("index write error: {message}")]
    IndexWrite {
        /// Description of the write failure
        message: String,
    },

    /// Similarity index search error
    #[error("index query error: {message}")]
    IndexQuery {
        /// Description of the query failure
        message: String,
    },

    /// SQL generation (LLM call) error
    #[error("SQL generation error: {message}")]
    Generation {
        /// Description of the generation failure
        message: String,
    },

    /// SQL execution error. `message` carries the database engine's own
    /// message verbatim - the generated statement may be invalid and that
    /// message is the only diagnostic the user gets.
    #[error("SQL execution error: {message}")]
    SqlExecution {
        /// The engine's error message, unmodified
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error
    #[error("network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Generic string-based error
    #[error("{0}")]
    String(String),
}

impl Error {
    /// Short machine-readable label of the stage (or ambient concern) this
    /// error belongs to. Surfaced to API clients alongside the message.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::SchemaRetrieval { .. } => "schema_retrieval",
            Self::Embedding { .. } => "embedding",
            Self::IndexWrite { .. } => "index_write",
            Self::IndexQuery { .. } => "index_query",
            Self::Generation { .. } => "generation",
            Self::SqlExecution { .. } => "sql_execution",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Configuration { .. } => "configuration",
            Self::Network { .. } => "network",
            Self::Io { .. } => "io",
            Self::Json { .. } => "json",
            Self::Internal { .. } | Self::String(_) => "internal",
        }
    }
}

// Pipeline stage error creation methods
impl Error {
    /// Create a schema retrieval error
    pub fn schema_retrieval<S: Into<String>>(message: S) -> Self {
        Self::SchemaRetrieval {
            message: message.into(),
            source: None,
        }
    }

    /// Create a schema retrieval error with source
    pub fn schema_retrieval_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::SchemaRetrieval {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an embedding provider error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create an index write error
    pub fn index_write<S: Into<String>>(message: S) -> Self {
        Self::IndexWrite {
            message: message.into(),
        }
    }

    /// Create an index query error
    pub fn index_query<S: Into<String>>(message: S) -> Self {
        Self::IndexQuery {
            message: message.into(),
        }
    }

    /// Create a SQL generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create a SQL execution error carrying the engine message verbatim
    pub fn sql_execution<S: Into<String>>(message: S) -> Self {
        Self::SqlExecution {
            message: message.into(),
        }
    }
}

// Ambient error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
