// file: src/utils/mod.rs
// version: 1.0.0
// guid: 8c1d5a27-94f3-4b6e-a2d8-07e5c93b614f

//! Shared filesystem and decoding helpers.

pub mod fs;
pub mod utf16;
