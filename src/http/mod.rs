//! HTTP module entry
//!
//! Response builders decoupled from business logic.

pub mod response;

pub use response::*;
