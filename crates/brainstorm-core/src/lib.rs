pub mod config;
pub mod error;
pub mod generator;
pub mod idea;
pub mod repository;
pub mod session;

// Re-export common error type
pub use error::BrainstormError;
