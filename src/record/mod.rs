// file: src/record/mod.rs
// version: 1.0.0
// guid: 5d03b8f4-2e71-49ac-8b56-d94a10c7e382

//! Interface records and the tables that collect them.
//!
//! A partial record is produced by each directive sub-parser; the
//! [`merge::RecordTable`] combines records that refer to the same
//! interface, and the [`vlan::VlanTable`] keeps VLAN declarations so
//! the emitter can reference them by name.

pub mod merge;
pub mod vlan;

pub use merge::{RecordTable, MAX_INTERFACES};
pub use vlan::{VlanEntry, VlanTable, VLAN_CAPACITY};

use tracing::warn;

/// Auto-configuration method requested for a link.
///
/// The command line carries these as free-form strings; internally they
/// are a closed set with an explicit transition to networkd's `DHCP=`
/// primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autoconf {
    None,
    Off,
    On,
    Any,
    Dhcp,
    Dhcp6,
    Auto6,
    Either6,
    Ibft,
    Link6,
    LinkLocal,
}

impl Autoconf {
    /// Parse a symbolic autoconf value. Unknown values yield `None`
    /// after a warning; the record is still emitted, just without a
    /// `DHCP=` line.
    pub fn parse(input: &str) -> Option<Autoconf> {
        let method = match input {
            "none" => Autoconf::None,
            "off" => Autoconf::Off,
            "on" => Autoconf::On,
            "any" => Autoconf::Any,
            "dhcp" => Autoconf::Dhcp,
            "dhcp6" => Autoconf::Dhcp6,
            "auto6" => Autoconf::Auto6,
            "either6" => Autoconf::Either6,
            "ibft" => Autoconf::Ibft,
            "link6" => Autoconf::Link6,
            "link-local" => Autoconf::LinkLocal,
            _ => {
                warn!(
                    "Unknown autoconf option '{}', valid are {{dhcp|on|any|dhcp6|auto6|either6|link6|link-local}}",
                    input
                );
                return None;
            }
        };
        Some(method)
    }

    /// Value of the `DHCP=` key in the `[Network]` section.
    pub fn networkd_dhcp(&self) -> &'static str {
        match self {
            Autoconf::None
            | Autoconf::Off
            | Autoconf::Auto6
            | Autoconf::Ibft
            | Autoconf::Link6
            | Autoconf::LinkLocal => "no",
            Autoconf::On | Autoconf::Any => "yes",
            Autoconf::Dhcp => "ipv4",
            Autoconf::Dhcp6 | Autoconf::Either6 => "ipv6",
        }
    }
}

/// One network interface's desired configuration.
///
/// All fields are optional; a record with no `interface` is a *free*
/// record that applies to interfaces named by other directives.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InterfaceConfig {
    /// Interface selector: exact name, glob, or MAC literal.
    pub interface: Option<String>,
    /// Static client address (without prefix; see `netmask`).
    pub client_ip: Option<String>,
    /// Peer address for point-to-point links.
    pub peer_ip: Option<String>,
    /// Default gateway.
    pub gateway: Option<String>,
    /// Second gateway slot, filled by legacy route directives.
    pub gateway1: Option<String>,
    /// Routed prefix, only set by route directives.
    pub destination: Option<String>,
    /// CIDR prefix length, 0 = unset.
    pub netmask: u8,
    /// DHCP client hostname.
    pub hostname: Option<String>,
    /// Auto-configuration method.
    pub autoconf: Option<Autoconf>,
    /// Whether DHCP-provided DNS servers are honored.
    pub use_dns: Option<bool>,
    pub dns1: Option<String>,
    pub dns2: Option<String>,
    pub ntp: Option<String>,
    /// MTU in bytes, kept verbatim as supplied.
    pub mtu: Option<String>,
    /// MAC literal used to pin the link in `[Link]`.
    pub macaddr: Option<String>,
    /// Space-separated search-domain list.
    pub domains: Option<String>,
    /// VLAN ids for which this interface is the parent (up to 3).
    pub vlan_refs: Vec<u16>,
}

impl InterfaceConfig {
    pub fn is_free(&self) -> bool {
        self.interface.is_none()
    }
}
