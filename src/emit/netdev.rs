// file: src/emit/netdev.rs
// version: 1.0.0
// guid: 9a64d2e7-85b0-4f13-ac69-7d20e4f8b531

//! `.netdev` fragment emitter for declared VLANs.

use std::path::Path;

use tracing::debug;

use crate::emit::NETDEV_PREFIX;
use crate::error::Result;
use crate::record::{VlanEntry, VlanTable};
use crate::utils::fs::write_file;

/// Render the `.netdev` fragment for one VLAN declaration.
pub fn render(vlan: &VlanEntry) -> String {
    format!(
        "[NetDev]\nName={}\nKind=vlan\n\n[VLAN]\nId={}\n",
        vlan.name, vlan.id
    )
}

/// Write one `.netdev` file per declared VLAN, named after the VLAN's
/// textual name. Emitted after all interface files so a `.network`
/// fragment never references a VLAN that does not exist yet.
pub fn write_netdev_config(output_dir: &Path, vlans: &VlanTable) -> Result<()> {
    for vlan in vlans.entries() {
        let path = output_dir.join(format!("{NETDEV_PREFIX}-{}.netdev", vlan.name));
        debug!(
            "Creating vlan netdev: {} for vlan id '{}'",
            path.display(),
            vlan.id
        );
        write_file(&path, &render(vlan))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netdev_fragment() {
        let vlan = VlanEntry {
            id: 99,
            name: "vlan99".into(),
        };
        assert_eq!(
            render(&vlan),
            "[NetDev]\nName=vlan99\nKind=vlan\n\n[VLAN]\nId=99\n"
        );
    }

    #[test]
    fn test_files_named_after_vlan() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut vlans = VlanTable::new();
        vlans.register("vlan99").unwrap();
        vlans.register("eth0.7").unwrap();

        write_netdev_config(tmp.path(), &vlans).unwrap();

        assert!(tmp.path().join("62-rdii-vlan99.netdev").is_file());
        assert!(tmp.path().join("62-rdii-eth0.7.netdev").is_file());
    }
}
