// Constants for the server

/// Service name reported by the root and health endpoints
pub const SERVICE_NAME: &str = "Inventory API";

/// Largest request body accepted, in bytes
pub const MAX_BODY_BYTES: usize = 64 * 1024;
