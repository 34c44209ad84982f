// file: src/record/vlan.rs
// version: 1.0.0
// guid: 19c7e3a5-842f-4d60-b1a9-3e57f0d2c848

//! VLAN declarations collected from `vlan=` directives.

use tracing::debug;

use crate::error::{NetConfigError, Result};

/// VLAN-table capacity.
pub const VLAN_CAPACITY: usize = 10;

/// One declared VLAN: a 12-bit id plus the textual name it was declared
/// under, preserved verbatim for the `.netdev` fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanEntry {
    pub id: u16,
    pub name: String,
}

/// Set of declared VLANs, unique by id.
#[derive(Debug, Default)]
pub struct VlanTable {
    entries: Vec<VlanEntry>,
}

impl VlanTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a VLAN under its textual name, extracting the id from
    /// the digit suffix. Returns the id; a duplicate id is not stored
    /// again.
    pub fn register(&mut self, name: &str) -> Result<u16> {
        let id = vlan_id_from_name(name)?;

        if !self.entries.iter().any(|e| e.id == id) {
            // overflow test kept exactly as shipped: the last slot is
            // never filled
            if self.entries.len() + 1 == VLAN_CAPACITY {
                return Err(NetConfigError::TooManyVlans);
            }
            self.entries.push(VlanEntry {
                id,
                name: name.to_string(),
            });
            debug!("Stored VLAN ID: {} ({})", id, name);
        }

        Ok(id)
    }

    /// Textual name for a registered id.
    pub fn name_for(&self, id: u16) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[VlanEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract the VLAN id from an interface name.
///
/// The four naming styles from dracut.cmdline(7) are supported:
/// `vlan0005`, `vlan5`, `eth0.0005` and `eth0.5` -- in each case the id
/// is the trailing run of digits, valid in `1..=4095`.
pub fn vlan_id_from_name(name: &str) -> Result<u16> {
    let bytes = name.as_bytes();
    let mut start = bytes.len();
    while start > 0 && bytes[start - 1].is_ascii_digit() {
        start -= 1;
    }

    // all digits, or no digits at all
    if start == 0 || start == bytes.len() {
        return Err(NetConfigError::InvalidVlanId(name.to_string()));
    }

    let id: u32 = name[start..]
        .parse()
        .map_err(|_| NetConfigError::InvalidVlanId(name.to_string()))?;
    if !(1..=4095).contains(&id) {
        return Err(NetConfigError::InvalidVlanId(name.to_string()));
    }

    Ok(id as u16)
}
