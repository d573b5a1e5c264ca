#![forbid(unsafe_code)]

//! Core library for the `drop-farmer` binary.

pub mod auth;
pub mod config;
pub mod errors;
pub mod game;
pub mod http;
pub mod models;
pub mod orchestrator;

pub use config::Config;
pub use errors::{AppError, Result};
