//! Provider-wide constants

/// Dimensions of the null test provider's vectors
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

/// Dimensions of the default fastembed model (AllMiniLML6V2)
pub const EMBEDDING_DIMENSION_FASTEMBED_DEFAULT: usize = 384;

/// Dimensions of Gemini's text-embedding-004 model
pub const EMBEDDING_DIMENSION_GEMINI: usize = 768;

/// JSON content type header value
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Error message prefix for request timeouts
pub const ERROR_MSG_REQUEST_TIMEOUT: &str = "request timed out after";

/// Default Chroma server URL
pub const DEFAULT_CHROMA_URL: &str = "http://localhost:8000";

/// Default collection the schema documents are stored under
pub const DEFAULT_SCHEMA_COLLECTION: &str = "db_schema";
