// Data models shared between the optimizer engine and its callers.
pub mod models;
pub mod utils;
