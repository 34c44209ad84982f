// file: src/emit/mod.rs
// version: 1.0.0
// guid: 21c84f6a-d590-4e37-8b12-fa6d03c9e754

//! Emitters for systemd-networkd configuration fragments.
//!
//! Merged interface records become `.network` files, VLAN declarations
//! become `.netdev` files, and the legacy `ifcfg=` path has its own
//! fragment family. All fragments are rendered to a string first and
//! written in one shot.

pub mod ifcfg;
pub mod netdev;
pub mod network;

/// Prefix of `.network` fragments produced from merged records.
pub const IP_PREFIX: &str = "66-ip";
/// Prefix of `.netdev` fragments produced from `vlan=` declarations.
pub const NETDEV_PREFIX: &str = "62-rdii";
/// Prefix of `.network` fragments produced from `ifcfg=` entries.
pub const IFCFG_PREFIX: &str = "66-ifcfg-dev";
/// Prefix of the parent-ether fragments linking a device to its VLANs.
pub const IFCFG_VLAN_PREFIX: &str = "64-ifcfg-vlan";
/// Prefix of per-id `.netdev` fragments on the `ifcfg=` path.
pub const IFCFG_NETDEV_PREFIX: &str = "62-ifcfg-vlan";
