pub mod action;
pub mod config;
pub mod error;
pub mod router;
pub mod views;

pub use config::Config;
pub use error::ApiError;
pub use router::handle;
