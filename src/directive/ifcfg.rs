// file: src/directive/ifcfg.rs
// version: 1.0.0
// guid: 0d84c7a2-31e9-4b58-a6f0-7c2d95e8b413

//! Parser for the legacy `ifcfg=` directive.
//!
//! Syntax: `<interface-spec>=<ip-spec>` where the interface spec is a
//! name, `name.vlanid`, a MAC literal or a glob, and the ip spec is
//! either a DHCP selector (`dhcp`, `dhcp4`, `dhcp6`, optionally with
//! `,rfc2132`) or the four comma-separated lists
//! `IP_LIST,GATEWAY_LIST,NAMESERVER_LIST,DOMAINSEARCH_LIST`.

use tracing::debug;

use crate::error::{syntax_error, NetConfigError, Result};
use crate::record::{vlan::vlan_id_from_name, InterfaceConfig, VLAN_CAPACITY};

/// DHCP families enabled by an `ifcfg=` DHCP selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DhcpMode {
    pub v4: bool,
    pub v6: bool,
    /// RFC 2132 MAC-as-client-identifier, DHCPv4 only.
    pub rfc2132: bool,
}

/// A fully parsed `ifcfg=` entry, ready for the legacy emitter.
#[derive(Debug)]
pub struct IfcfgEntry {
    pub config: InterfaceConfig,
    pub dhcp: Option<DhcpMode>,
    pub vlan_id: Option<u16>,
}

/// VLAN ids seen on `ifcfg=` interface specs, unique, emitted as
/// `.netdev` fragments at the end of the run.
#[derive(Debug, Default)]
pub struct IfcfgVlanTable {
    ids: Vec<u16>,
}

impl IfcfgVlanTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, id: u16) -> Result<()> {
        if self.ids.contains(&id) {
            return Ok(());
        }
        // same last-slot-never-filled overflow test as the VLAN table
        if self.ids.len() + 1 == VLAN_CAPACITY {
            return Err(NetConfigError::TooManyVlans);
        }
        self.ids.push(id);
        debug!("Stored VLAN ID: {}", id);
        Ok(())
    }

    pub fn ids(&self) -> &[u16] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Parse one `ifcfg=` value. VLAN ids found in the interface spec are
/// registered in `vlans` as a side effect.
pub fn parse(nr: usize, arg: &str, vlans: &mut IfcfgVlanTable) -> Result<IfcfgEntry> {
    debug!("parse ifcfg entry {} - '{}'", nr, arg);

    let (iface_spec, spec) = arg.split_once('=').ok_or_else(|| syntax_error(nr, arg))?;
    if iface_spec.is_empty() || spec.is_empty() {
        return Err(syntax_error(nr, arg));
    }

    let mut cfg = InterfaceConfig::default();
    let mut vlan_id = None;

    // a trailing ".N" on the interface designates a VLAN on the parent
    if let Some((parent, id_str)) = iface_spec.rsplit_once('.') {
        let id = vlan_id_from_name(id_str_with_guard(iface_spec, id_str)?)?;
        vlans.register(id)?;
        vlan_id = Some(id);
        cfg.interface = Some(parent.to_string());
    } else {
        cfg.interface = Some(iface_spec.to_string());
    }

    // IP_LIST,GATEWAY_LIST,NAMESERVER_LIST,DOMAINSEARCH_LIST
    let mut lists = spec.split(',');
    let ip_list = trimmed(lists.next());
    let gw_list = trimmed(lists.next());
    let dns_list = trimmed(lists.next());
    let domains = trimmed(lists.next());

    let mut dhcp = None;
    if let Some(ip_list) = &ip_list {
        if ip_list.starts_with("dhcp") {
            dhcp = Some(DhcpMode {
                v4: ip_list != "dhcp6",
                v6: ip_list != "dhcp4",
                rfc2132: gw_list.as_deref() == Some("rfc2132"),
            });
        }
    }

    if dhcp.is_none() {
        cfg.client_ip = ip_list;
        cfg.gateway = gw_list;
        cfg.dns1 = dns_list;
        cfg.domains = domains;
    }

    Ok(IfcfgEntry {
        config: cfg,
        dhcp,
        vlan_id,
    })
}

/// The id part of `name.vlanid` must be pure digits; reuse the shared
/// suffix extraction by validating against the full spec string so the
/// diagnostic names what the user wrote.
fn id_str_with_guard<'a>(full: &'a str, id_str: &'a str) -> Result<&'a str> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NetConfigError::InvalidVlanId(full.to_string()));
    }
    Ok(full)
}

fn trimmed(list: Option<&str>) -> Option<String> {
    list.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
