// file: src/cli/mod.rs
// version: 1.0.0
// guid: 35b8e1f0-7a26-4c94-b05d-18f3d6a92c47

//! Command line interface.

pub mod args;

pub use args::Cli;
