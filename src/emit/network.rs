// file: src/emit/network.rs
// version: 1.0.0
// guid: 47e0b3d8-16fa-4c29-9d85-2b7f41a6c093

//! `.network` fragment emitter for merged interface records.

use std::path::Path;

use tracing::{debug, warn};

use crate::emit::IP_PREFIX;
use crate::error::Result;
use crate::record::{Autoconf, InterfaceConfig, VlanTable};
use crate::utils::fs::write_file;

/// Render one merged record as a `.network` fragment.
///
/// Section order is `[Match]`, `[Link]`, `[Network]`, `[DHCP]`,
/// `[Address]`, `[Route]`, plus a second `[Route]` when two gateways
/// are present. A section is only emitted when at least one of its
/// fields is set.
pub fn render(cfg: &InterfaceConfig, vlans: &VlanTable) -> String {
    let mut out = String::new();

    out.push_str("[Match]\n");
    match cfg.interface.as_deref() {
        None | Some("") | Some("*") => out.push_str("Kind=!*\nType=!loopback\n"),
        Some(iface) if iface.contains(':') => {
            // a ':' means a MAC literal, anything else is a name or glob
            out.push_str(&format!("Name=*\nMACAddress={iface}\n"));
        }
        Some(iface) => out.push_str(&format!("Name={iface}\n")),
    }

    if cfg.mtu.is_some() || cfg.macaddr.is_some() {
        out.push_str("\n[Link]\n");
        if let Some(mac) = &cfg.macaddr {
            out.push_str(&format!("MACAddress={mac}\n"));
        }
        if let Some(mtu) = &cfg.mtu {
            out.push_str(&format!("MTUBytes={mtu}\n"));
        }
    }

    let has_network = cfg.autoconf.is_some()
        || cfg.dns1.is_some()
        || cfg.dns2.is_some()
        || cfg.domains.is_some()
        || cfg.ntp.is_some()
        || !cfg.vlan_refs.is_empty();
    if has_network {
        out.push_str("\n[Network]\n");
        if let Some(method) = cfg.autoconf {
            out.push_str(&format!("DHCP={}\n", method.networkd_dhcp()));
            if method == Autoconf::Off {
                out.push_str("LinkLocalAddressing=no\nIPv6AcceptRA=no\n");
            }
        }
        if let Some(dns) = &cfg.dns1 {
            out.push_str(&format!("DNS={dns}\n"));
        }
        if let Some(dns) = &cfg.dns2 {
            out.push_str(&format!("DNS={dns}\n"));
        }
        if let Some(domains) = &cfg.domains {
            out.push_str(&format!("Domains={domains}\n"));
        }
        if let Some(ntp) = &cfg.ntp {
            out.push_str(&format!("NTP={ntp}\n"));
        }
        for id in &cfg.vlan_refs {
            match vlans.name_for(*id) {
                Some(name) => out.push_str(&format!("VLAN={name}\n")),
                None => warn!("No VLAN declaration for id {}", id),
            }
        }
    }

    if cfg.hostname.is_some() || cfg.use_dns.is_some() {
        out.push_str("\n[DHCP]\n");
        if let Some(hostname) = &cfg.hostname {
            out.push_str(&format!("Hostname={hostname}\n"));
        }
        match cfg.use_dns {
            Some(false) => out.push_str("UseDNS=no\n"),
            Some(true) => out.push_str("UseDNS=yes\n"),
            None => {}
        }
    }

    if let Some(client) = &cfg.client_ip {
        out.push_str("\n[Address]\n");
        out.push_str(&format!("Address={}/{}\n", client, cfg.netmask));
        if let Some(peer) = &cfg.peer_ip {
            out.push_str(&format!("Peer={peer}\n"));
        }
    }

    render_routes(&mut out, cfg);

    out
}

/// Route sections. The destination of a route directive pairs with the
/// gateway that arrived with it: when another gateway was already
/// present it keeps the first `[Route]` to itself and the destination
/// moves to the second one.
fn render_routes(out: &mut String, cfg: &InterfaceConfig) {
    match (&cfg.destination, &cfg.gateway, &cfg.gateway1) {
        (Some(dest), gateway, Some(gw1)) => {
            if let Some(gw) = gateway {
                out.push_str(&format!("\n[Route]\nGateway={gw}\n"));
            }
            out.push_str(&format!("\n[Route]\nDestination={dest}\nGateway={gw1}\n"));
        }
        (Some(dest), gateway, None) => {
            out.push_str(&format!("\n[Route]\nDestination={dest}\n"));
            if let Some(gw) = gateway {
                out.push_str(&format!("Gateway={gw}\n"));
            }
        }
        (None, gateway, gateway1) => {
            if let Some(gw) = gateway {
                out.push_str(&format!("\n[Route]\nGateway={gw}\n"));
            }
            if let Some(gw) = gateway1 {
                out.push_str(&format!("\n[Route]\nGateway={gw}\n"));
            }
        }
    }
}

/// Write the fragment for entry `nr` (1-based, zero-padded to two
/// digits in the filename).
pub fn write_network_config(
    output_dir: &Path,
    nr: usize,
    cfg: &InterfaceConfig,
    vlans: &VlanTable,
) -> Result<()> {
    let path = output_dir.join(format!("{IP_PREFIX}-{nr:02}.network"));
    debug!("Entry {:2}: {} config", nr, path.display());
    write_file(&path, &render(cfg, vlans))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(iface: Option<&str>) -> InterfaceConfig {
        InterfaceConfig {
            interface: iface.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_interface_matches_all_links() {
        let out = render(&record(None), &VlanTable::new());
        assert_eq!(out, "[Match]\nKind=!*\nType=!loopback\n");

        let out = render(&record(Some("*")), &VlanTable::new());
        assert!(out.contains("Kind=!*\nType=!loopback\n"));
    }

    #[test]
    fn test_mac_interface_matches_by_address() {
        let out = render(&record(Some("00:11:22:33:44:55")), &VlanTable::new());
        assert!(out.contains("Name=*\nMACAddress=00:11:22:33:44:55\n"));
    }

    #[test]
    fn test_address_section() {
        let mut cfg = record(Some("eth0"));
        cfg.client_ip = Some("192.168.0.10".into());
        cfg.netmask = 24;
        cfg.peer_ip = Some("192.168.0.2".into());

        let out = render(&cfg, &VlanTable::new());
        assert!(out.contains("\n[Address]\nAddress=192.168.0.10/24\nPeer=192.168.0.2\n"));
    }

    #[test]
    fn test_autoconf_off_disables_link_local() {
        let mut cfg = record(Some("eth0"));
        cfg.autoconf = Some(Autoconf::Off);

        let out = render(&cfg, &VlanTable::new());
        assert!(out.contains("DHCP=no\nLinkLocalAddressing=no\nIPv6AcceptRA=no\n"));
    }

    #[test]
    fn test_dhcp_section() {
        let mut cfg = record(Some("eth0"));
        cfg.hostname = Some("hogehoge".into());
        cfg.use_dns = Some(false);

        let out = render(&cfg, &VlanTable::new());
        assert!(out.contains("\n[DHCP]\nHostname=hogehoge\nUseDNS=no\n"));
    }

    #[test]
    fn test_link_section() {
        let mut cfg = record(Some("eth0"));
        cfg.mtu = Some("9000".into());
        cfg.macaddr = Some("aa:bb:cc:dd:ee:ff".into());

        let out = render(&cfg, &VlanTable::new());
        assert!(out.contains("\n[Link]\nMACAddress=aa:bb:cc:dd:ee:ff\nMTUBytes=9000\n"));
    }

    #[test]
    fn test_single_route_with_destination() {
        let mut cfg = record(Some("ens10"));
        cfg.destination = Some("2001:DB8:3::/8".into());
        cfg.gateway = Some("2001:DB8:2::1".into());

        let out = render(&cfg, &VlanTable::new());
        assert!(out.contains("\n[Route]\nDestination=2001:DB8:3::/8\nGateway=2001:DB8:2::1\n"));
        assert_eq!(out.matches("[Route]").count(), 1);
    }

    #[test]
    fn test_two_routes_keep_primary_gateway_first() {
        let mut cfg = record(Some("eth0"));
        cfg.gateway = Some("192.168.0.1".into());
        cfg.gateway1 = Some("10.0.2.3".into());
        cfg.destination = Some("10.1.2.3/16".into());

        let out = render(&cfg, &VlanTable::new());
        let primary = out.find("[Route]\nGateway=192.168.0.1\n").unwrap();
        let secondary = out
            .find("[Route]\nDestination=10.1.2.3/16\nGateway=10.0.2.3\n")
            .unwrap();
        assert!(primary < secondary);
    }

    #[test]
    fn test_vlan_references_in_declaration_order() {
        let mut vlans = VlanTable::new();
        vlans.register("vlan99").unwrap();
        vlans.register("vlan98").unwrap();

        let mut cfg = record(Some("eth0"));
        cfg.vlan_refs = vec![99, 98];

        let out = render(&cfg, &vlans);
        assert!(out.contains("\n[Network]\nVLAN=vlan99\nVLAN=vlan98\n"));
    }

    #[test]
    fn test_every_key_is_under_a_header() {
        let mut vlans = VlanTable::new();
        vlans.register("vlan5").unwrap();

        let mut cfg = record(Some("eth0"));
        cfg.client_ip = Some("10.0.0.2".into());
        cfg.netmask = 24;
        cfg.gateway = Some("10.0.0.1".into());
        cfg.autoconf = Some(Autoconf::Any);
        cfg.hostname = Some("host".into());
        cfg.vlan_refs = vec![5];

        let out = render(&cfg, &vlans);
        let mut seen_header = false;
        for line in out.lines() {
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                seen_header = true;
                continue;
            }
            assert!(seen_header, "key line before any header: {line}");
            assert!(line.contains('='), "not a key line: {line}");
        }
    }
}
