//! # Utility Modules
//!
//! Supporting utilities that sit beside the codecs.
//!
//! ## Components
//! - **Logging**: structured logging setup driven by [`crate::config::LoggingConfig`]

pub mod logging;

pub use logging::init_logging;
