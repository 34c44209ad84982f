// file: src/record/merge.rs
// version: 1.0.0
// guid: a6f29c84-7d15-4b03-9e72-c58d3a1f6b90

//! Merging of partial interface records.

use crate::error::{NetConfigError, Result};
use crate::record::InterfaceConfig;

/// Interface-table capacity.
pub const MAX_INTERFACES: usize = 10;

/// Collects partial records and merges those that refer to the same
/// interface. Records are kept in the order they were first observed,
/// which is also the order the emitter numbers them in.
#[derive(Debug)]
pub struct RecordTable {
    records: Vec<InterfaceConfig>,
    capacity: usize,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    pub fn new() -> Self {
        Self::with_capacity(MAX_INTERFACES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    /// Merge a partial record into the table.
    ///
    /// A record naming an interface that is already present is layered
    /// on top of that entry. A record without an interface is layered
    /// on top of every entry that has one. Anything else is appended,
    /// subject to the capacity limit.
    pub fn merge(&mut self, cfg: &InterfaceConfig) -> Result<()> {
        let mut found = false;

        for existing in &mut self.records {
            match (&existing.interface, &cfg.interface) {
                (Some(have), Some(new)) if have == new => {
                    return overlay(existing, cfg);
                }
                (Some(_), None) => {
                    // global directive applied to an already-seen
                    // interface (e.g. ip=... followed by rd.route=...)
                    overlay(existing, cfg)?;
                    found = true;
                }
                _ => {}
            }
        }

        if !found {
            if self.records.len() == self.capacity {
                return Err(NetConfigError::TooManyInterfaces);
            }
            let mut fresh = InterfaceConfig::default();
            overlay(&mut fresh, cfg)?;
            self.records.push(fresh);
        }

        Ok(())
    }

    pub fn records(&self) -> &[InterfaceConfig] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Copy every populated field of `src` onto `dst`.
///
/// Scalar fields overwrite; gateways fill the two slots in arrival
/// order, VLAN references fill up to three. Overflowing either is a
/// hard error.
fn overlay(dst: &mut InterfaceConfig, src: &InterfaceConfig) -> Result<()> {
    if let Some(v) = &src.interface {
        dst.interface = Some(v.clone());
    }
    if let Some(v) = &src.client_ip {
        dst.client_ip = Some(v.clone());
    }
    if let Some(v) = &src.peer_ip {
        dst.peer_ip = Some(v.clone());
    }
    if let Some(v) = &src.gateway {
        if dst.gateway.is_none() {
            dst.gateway = Some(v.clone());
        } else if dst.gateway1.is_none() {
            dst.gateway1 = Some(v.clone());
        } else {
            return Err(NetConfigError::TooManyGateways);
        }
    }
    if let Some(v) = &src.destination {
        dst.destination = Some(v.clone());
    }
    if src.netmask != 0 {
        dst.netmask = src.netmask;
    }
    if let Some(v) = &src.hostname {
        dst.hostname = Some(v.clone());
    }
    if let Some(v) = src.autoconf {
        dst.autoconf = Some(v);
    }
    if let Some(v) = src.use_dns {
        dst.use_dns = Some(v);
    }
    if let Some(v) = &src.dns1 {
        dst.dns1 = Some(v.clone());
    }
    if let Some(v) = &src.dns2 {
        dst.dns2 = Some(v.clone());
    }
    if let Some(v) = &src.ntp {
        dst.ntp = Some(v.clone());
    }
    if let Some(v) = &src.mtu {
        dst.mtu = Some(v.clone());
    }
    if let Some(v) = &src.macaddr {
        dst.macaddr = Some(v.clone());
    }
    if let Some(v) = &src.domains {
        dst.domains = Some(v.clone());
    }
    for id in &src.vlan_refs {
        if dst.vlan_refs.len() == 3 {
            return Err(NetConfigError::TooManyVlanRefs);
        }
        dst.vlan_refs.push(*id);
    }

    Ok(())
}
