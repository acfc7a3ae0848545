// src/core/mod.rs

pub mod aggregator;
pub mod dataset;
pub mod engine;
pub mod matcher;
pub mod name_index;
pub mod selection;
pub mod state;
pub mod types;
