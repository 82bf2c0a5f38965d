pub mod config;
pub mod error;
pub mod repo;
pub mod runner;
pub mod style;
pub mod workspace;
