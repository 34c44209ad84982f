// file: src/lib.rs
// version: 1.0.0
// guid: 90a5d4c2-6e18-4f73-b2a9-d07c385f1e64

//! # netconfig-agent
//!
//! Network-configuration generator for the disk-image installer.
//! Consumes network directives from the kernel command line or a
//! configuration file and emits declarative systemd-networkd
//! fragments. A second subsystem resolves the EFI boot source of the
//! running binary from firmware variables.

pub mod cli;
pub mod directive;
pub mod efi;
pub mod emit;
pub mod error;
pub mod generator;
pub mod logging;
pub mod record;
pub mod utils;

pub use error::{NetConfigError, Result};
