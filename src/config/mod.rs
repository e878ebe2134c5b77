/// API endpoint and timeout configuration from environment variables
pub mod api;

/// Credential store connection and table creation
pub mod database;
