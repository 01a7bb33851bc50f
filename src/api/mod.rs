// API module entry
// JSON endpoints for the item collection plus health and env probes

pub mod handlers;
mod response;
mod types;

pub use response::invalid_request;
