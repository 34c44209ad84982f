// file: src/logging/mod.rs
// version: 1.0.0
// guid: 4d92f7b3-0a58-4c16-8e74-b63d05a9f128

//! Logging setup.

pub mod logger;
