// file: src/efi/mod.rs
// version: 1.0.0
// guid: 68d2a0f4-9c35-4e71-b8d6-13f5c28a7e90

//! EFI firmware-variable access and boot-source resolution.
//!
//! Determines the boot source of a UKI/EFI binary by parsing EFI
//! variables in `/sys/firmware/efi/efivars/`. Supports:
//! - HTTP boot (URL)
//! - local disk boot (partition UUID or device path)
//! - PXE boot (flag only)

pub mod boot_source;
pub mod device_path;
pub mod vars;

pub use boot_source::{BootSource, BootSourceResolver};
pub use vars::EfiVars;

/// GUID of the global EFI variables (`BootCurrent`, `BootOrder`, ...).
pub const EFI_GLOBAL_VARIABLE_GUID: &str = "8be4df61-93ca-11d2-aa0d-00e098032b8c";
/// Vendor GUID of the loader-stub variables (`LoaderDeviceURL`, ...).
pub const LOADER_VENDOR_GUID: &str = "4a67b082-0a4c-41cf-b6c7-440b29bb8c4f";
