// file: src/emit/ifcfg.rs
// version: 1.0.0
// guid: d8b05c3f-6a92-4e41-b7d0-358fc1e92a67

//! Fragment emitters for the legacy `ifcfg=` path.
//!
//! Each entry becomes its own `.network` file immediately; VLAN-tagged
//! entries additionally maintain a parent-ether fragment that lists the
//! device's VLAN children, and every seen VLAN id gets a `.netdev`
//! fragment at the end of the run.

use std::path::Path;

use tracing::debug;

use crate::directive::ifcfg::IfcfgEntry;
use crate::emit::{IFCFG_NETDEV_PREFIX, IFCFG_PREFIX, IFCFG_VLAN_PREFIX};
use crate::error::Result;
use crate::utils::fs::{append_file, write_file};

/// Render the `.network` fragment for one `ifcfg=` entry.
pub fn render_network(entry: &IfcfgEntry) -> String {
    let cfg = &entry.config;
    let mut out = String::new();

    out.push_str("[Match]\n");
    if let Some(id) = entry.vlan_id {
        out.push_str(&format!("Name=Vlan{id:04}\nType=vlan\n"));
    } else {
        match cfg.interface.as_deref() {
            Some(iface) if iface.contains(':') => {
                // a ':' means a MAC literal, anything else is a name or glob
                out.push_str(&format!("Name=*\nMACAddress={iface}\n"));
            }
            Some(iface) => out.push_str(&format!("Name={iface}\n")),
            None => {}
        }
    }

    out.push_str("\n[Network]\n");

    if let Some(dhcp) = &entry.dhcp {
        if dhcp.v4 && dhcp.v6 {
            out.push_str("DHCP=yes\n");
        } else if dhcp.v4 {
            out.push_str("DHCP=ipv4\n");
        } else if dhcp.v6 {
            out.push_str("DHCP=ipv6\n");
        }
    }

    push_list(&mut out, "Address", cfg.client_ip.as_deref());
    push_list(&mut out, "Gateway", cfg.gateway.as_deref());
    push_list(&mut out, "DNS", cfg.dns1.as_deref());

    if let Some(domains) = &cfg.domains {
        out.push_str(&format!("Domains={domains}\n"));
    }

    if let Some(dhcp) = &entry.dhcp {
        if dhcp.v4 {
            out.push_str("\n[DHCPv4]\nUseHostname=false\nUseDNS=true\nUseNTP=true\n");
            if dhcp.rfc2132 {
                out.push_str("ClientIdentifier=mac\n");
            }
        }
        if dhcp.v6 {
            out.push_str("\n[DHCPv6]\nUseHostname=false\nUseDNS=true\nUseNTP=true\n");
        }
    }

    out
}

/// One `Key=value` line per space-separated list element, in input order.
fn push_list(out: &mut String, key: &str, list: Option<&str>) {
    if let Some(list) = list {
        for item in list.split_whitespace() {
            out.push_str(&format!("{key}={item}\n"));
        }
    }
}

/// Write the `.network` fragment for entry `nr`, plus the parent-ether
/// fragment when the entry is VLAN-tagged.
pub fn write_network_file(output_dir: &Path, nr: usize, entry: &IfcfgEntry) -> Result<()> {
    let path = output_dir.join(format!("{IFCFG_PREFIX}-{nr:02}.network"));
    debug!(
        "Creating config: {} for interface '{}'",
        path.display(),
        entry.config.interface.as_deref().unwrap_or("")
    );

    write_file(&path, &render_network(entry))?;

    if let Some(id) = entry.vlan_id {
        if let Some(iface) = entry.config.interface.as_deref() {
            write_vlan_file(output_dir, iface, id)?;
        }
    }

    Ok(())
}

/// Maintain the fragment that attaches VLAN children to their parent
/// device. The first VLAN creates the file with the full tagged-only
/// setup; later VLANs on the same parent append their `VLAN=` line.
fn write_vlan_file(output_dir: &Path, interface: &str, vlan_id: u16) -> Result<()> {
    use std::io::Write;

    let path = output_dir.join(format!("{IFCFG_VLAN_PREFIX}-{interface}.network"));
    debug!(
        "Creating vlan config: {} for interface '{}.{}'",
        path.display(),
        interface,
        vlan_id
    );

    if !path.exists() {
        let content = format!(
            "[Match]\n\
             Name={interface}\n\
             Type=ether\n\
             \n\
             [Network]\n\
             Description=The unconfigured physical ethernet device\n\
             VLAN=Vlan{vlan_id:04}\n\
             # 'tagged only' setup\n\
             LinkLocalAddressing=no\n\
             LLDP=no\n\
             EmitLLDP=no\n\
             IPv6AcceptRA=no\n\
             IPv6SendRA=no\n"
        );
        return write_file(&path, &content);
    }

    let mut file = append_file(&path)?;
    writeln!(file, "VLAN=Vlan{vlan_id:04}").map_err(|source| crate::error::NetConfigError::Io {
        path,
        source,
    })
}

/// Write one `.netdev` fragment per VLAN id seen on the `ifcfg=` path.
pub fn write_netdev_files(output_dir: &Path, ids: &[u16]) -> Result<()> {
    for id in ids {
        let path = output_dir.join(format!("{IFCFG_NETDEV_PREFIX}{id:04}.netdev"));
        debug!(
            "Creating vlan netdev: {} for vlan id '{}'",
            path.display(),
            id
        );
        let content = format!("[NetDev]\nName=Vlan{id:04}\nKind=vlan\n\n[VLAN]\nId={id}\n");
        write_file(&path, &content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::ifcfg::{parse, IfcfgVlanTable};
    use tempfile::TempDir;

    fn entry(arg: &str) -> IfcfgEntry {
        let mut vlans = IfcfgVlanTable::new();
        parse(1, arg, &mut vlans).unwrap()
    }

    #[test]
    fn test_glob_dhcp_fragment() {
        let out = render_network(&entry("*=dhcp"));
        assert!(out.starts_with("[Match]\nName=*\n"));
        assert!(out.contains("\n[Network]\nDHCP=yes\n"));
        assert!(out.contains("[DHCPv4]"));
        assert!(out.contains("[DHCPv6]"));
        assert!(!out.contains("ClientIdentifier"));
    }

    #[test]
    fn test_mac_match_with_rfc2132() {
        let out = render_network(&entry("00:11:22:33:44:55=dhcp,rfc2132"));
        assert!(out.contains("Name=*\nMACAddress=00:11:22:33:44:55\n"));
        assert!(out.contains("[DHCPv4]\nUseHostname=false\nUseDNS=true\nUseNTP=true\nClientIdentifier=mac\n"));
    }

    #[test]
    fn test_static_lists_one_line_per_element() {
        let out = render_network(&entry(
            "eth1=192.168.0.2/24 192.158.10.12/24,192.168.0.1,8.8.8.8,mydomain.com",
        ));
        assert!(out.contains("Address=192.168.0.2/24\nAddress=192.158.10.12/24\n"));
        assert!(out.contains("Gateway=192.168.0.1\n"));
        assert!(out.contains("DNS=8.8.8.8\n"));
        assert!(out.contains("Domains=mydomain.com\n"));
        assert!(!out.contains("DHCP="));
    }

    #[test]
    fn test_vlan_match() {
        let out = render_network(&entry("eth0.66=dhcp"));
        assert!(out.starts_with("[Match]\nName=Vlan0066\nType=vlan\n"));
    }

    #[test]
    fn test_dhcp4_only() {
        let out = render_network(&entry("eth0=dhcp4"));
        assert!(out.contains("DHCP=ipv4\n"));
        assert!(out.contains("[DHCPv4]"));
        assert!(!out.contains("[DHCPv6]"));
    }

    #[test]
    fn test_parent_fragment_created_then_appended() {
        let tmp = TempDir::new().unwrap();

        write_vlan_file(tmp.path(), "eth0", 66).unwrap();
        write_vlan_file(tmp.path(), "eth0", 67).unwrap();

        let content =
            std::fs::read_to_string(tmp.path().join("64-ifcfg-vlan-eth0.network")).unwrap();
        assert!(content.contains("Name=eth0\nType=ether\n"));
        assert!(content.contains("VLAN=Vlan0066\n"));
        assert!(content.ends_with("VLAN=Vlan0067\n"));
        // header written only once
        assert_eq!(content.matches("[Match]").count(), 1);
    }

    #[test]
    fn test_netdev_files_per_id() {
        let tmp = TempDir::new().unwrap();

        write_netdev_files(tmp.path(), &[66, 33]).unwrap();

        let content =
            std::fs::read_to_string(tmp.path().join("62-ifcfg-vlan0066.netdev")).unwrap();
        assert_eq!(
            content,
            "[NetDev]\nName=Vlan0066\nKind=vlan\n\n[VLAN]\nId=66\n"
        );
        assert!(tmp.path().join("62-ifcfg-vlan0033.netdev").is_file());
    }
}
