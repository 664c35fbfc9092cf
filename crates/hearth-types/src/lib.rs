pub mod api;
pub mod invocation;
pub mod models;
