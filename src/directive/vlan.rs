// file: src/directive/vlan.rs
// version: 1.0.0
// guid: f3a81d59-27c4-4e06-b9d2-40c6e87a513f

//! Parser for the `vlan=` directive.

use crate::error::{syntax_error, Result};
use crate::record::{InterfaceConfig, VlanTable};

/// `vlan=<vlan-name>:<parent-interface>` -- declare a VLAN and
/// reference it from the parent interface's record.
pub fn parse(nr: usize, arg: &str, vlans: &mut VlanTable) -> Result<InterfaceConfig> {
    let (name, parent) = arg.split_once(':').ok_or_else(|| syntax_error(nr, arg))?;
    if name.is_empty() || parent.is_empty() {
        return Err(syntax_error(nr, arg));
    }

    let id = vlans.register(name)?;

    let mut cfg = InterfaceConfig::default();
    cfg.interface = Some(parent.to_string());
    cfg.vlan_refs.push(id);
    Ok(cfg)
}
