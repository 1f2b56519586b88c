// Modules for server components
pub mod http;

// Re-export public APIs
pub use http::{HttpConfig, HttpServer};
