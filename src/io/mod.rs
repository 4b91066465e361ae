//! Input/output, configuration and collaborators outside the core pipeline

pub mod cli;
pub mod configuration;
pub mod error;
pub mod export;
pub mod fonts;
pub mod image;
pub mod progress;
pub mod repository;
