// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod permalink;
pub mod persistence;
pub mod presentation;
pub mod presets;
pub mod render;

pub use crate::core::engine::Explorer;
pub use crate::error::{Result, TrendsError};
