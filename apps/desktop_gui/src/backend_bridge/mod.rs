//! Bridge between the UI thread and the async matching-service client.

pub mod commands;
pub mod runtime;
