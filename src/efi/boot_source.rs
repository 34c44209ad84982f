// file: src/efi/boot_source.rs
// version: 1.0.0
// guid: 7b30f6d2-48ae-4c19-95b7-e2d681c40a35

//! Resolution of the boot source of the running binary.
//!
//! Strategy chain: the loader-stub variables are consulted first; when
//! they are absent, the `BootCurrent` entry's device path is parsed.
//! Either way the default boot partition is looked up from the first
//! `BootOrder` entry afterwards.

use tracing::debug;

use crate::efi::device_path::parse_device_path;
use crate::efi::{EfiVars, EFI_GLOBAL_VARIABLE_GUID, LOADER_VENDOR_GUID};
use crate::error::{NetConfigError, Result};
use crate::utils::utf16::utf16le_to_string;

/// Where the running binary was booted from.
///
/// At most one of `url`, `device` and `image` identifies the source;
/// `entry` carries the boot-entry label when one was found and
/// `default_partition` the partition of the firmware's first boot
/// choice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootSource {
    pub url: Option<String>,
    pub device: Option<String>,
    pub image: Option<String>,
    pub entry: Option<String>,
    pub is_pxe_boot: bool,
    pub default_partition: Option<String>,
}

/// Resolver over an [`EfiVars`] accessor.
pub struct BootSourceResolver {
    vars: EfiVars,
}

impl Default for BootSourceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BootSourceResolver {
    pub fn new() -> Self {
        Self {
            vars: EfiVars::new(),
        }
    }

    pub fn with_vars(vars: EfiVars) -> Self {
        Self { vars }
    }

    /// Resolve the boot source, or fail with `EfiUnsupported` when the
    /// variable filesystem is absent.
    pub fn resolve(&self) -> Result<BootSource> {
        if !self.vars.is_supported() {
            return Err(NetConfigError::EfiUnsupported);
        }

        let mut source = match self.loader_stub() {
            Ok(source) => source,
            Err(e) if e.is_not_found() => {
                debug!("loader-stub variables absent, trying BootCurrent");
                self.boot_current()?
            }
            Err(e) => return Err(e),
        };

        source.default_partition = Some(self.default_boot_partition()?);

        Ok(source)
    }

    /// Strategy 1: the loader stub records its provenance in vendor
    /// variables.
    fn loader_stub(&self) -> Result<BootSource> {
        let entry = self.read_loader_var("LoaderEntrySelected")?;
        let url = self.read_loader_var("LoaderDeviceURL")?;
        let part_uuid = self.read_loader_var("LoaderDevicePartUUID")?;

        let mut device = None;
        let mut image = None;
        if let Some(part_uuid) = part_uuid {
            // /dev/disk/by-partuuid entries are lowercase
            device = Some(format!(
                "/dev/disk/by-partuuid/{}",
                part_uuid.to_lowercase()
            ));
            image = self.read_loader_var("LoaderImageIdentifier")?;
        }

        if url.is_none() && device.is_none() && image.is_none() {
            return Err(NetConfigError::SourceNotFound);
        }

        Ok(BootSource {
            url,
            device,
            image,
            entry,
            ..Default::default()
        })
    }

    /// Strategy 2: follow `BootCurrent` to the `Boot<XXXX>` entry and
    /// parse its device path.
    fn boot_current(&self) -> Result<BootSource> {
        let entry_name = self.boot_entry_name("BootCurrent")?;
        debug!("Reading {}", entry_name);

        let data = self.vars.read(&entry_name, EFI_GLOBAL_VARIABLE_GUID)?;
        let (description, path_data) = split_load_option(&data)?;

        if let Some(description) = &description {
            debug!("Description='{}'", description);
        }

        let info = parse_device_path(path_data)?;
        Ok(BootSource {
            url: info.url,
            device: info.device,
            image: info.image,
            entry: description,
            is_pxe_boot: info.is_pxe_boot,
            default_partition: None,
        })
    }

    /// Partition of the firmware's first `BootOrder` choice.
    fn default_boot_partition(&self) -> Result<String> {
        let entry_name = self.boot_entry_name("BootOrder")?;
        debug!("Reading {}", entry_name);

        let data = self.vars.read(&entry_name, EFI_GLOBAL_VARIABLE_GUID)?;
        let (_, path_data) = split_load_option(&data)?;

        let info = parse_device_path(path_data)?;
        let device = info.device.ok_or(NetConfigError::NoBootDevice)?;
        debug!("EFI default boot device: {}", device);
        Ok(device)
    }

    /// Read a 16-bit boot index from `var` and turn it into the
    /// `Boot<XXXX>` variable name (4 hex digits, uppercase). For
    /// `BootOrder` only the first entry is considered.
    fn boot_entry_name(&self, var: &str) -> Result<String> {
        let data = self.vars.read(var, EFI_GLOBAL_VARIABLE_GUID)?;
        if data.len() < 2 {
            return Err(NetConfigError::SourceNotFound);
        }
        let index = u16::from_le_bytes([data[0], data[1]]);
        Ok(format!("Boot{index:04X}"))
    }

    fn read_loader_var(&self, name: &str) -> Result<Option<String>> {
        match self.vars.read_string(name, LOADER_VENDOR_GUID) {
            Ok(value) => {
                if value.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(value))
                }
            }
            Err(NetConfigError::VarNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Split an `EFI_LOAD_OPTION` payload into its description and the
/// device-path blob.
///
/// Layout: attributes (4 bytes), file-path-list length (2 bytes), a
/// NUL-terminated UTF-16 description, then the device path.
fn split_load_option(data: &[u8]) -> Result<(Option<String>, &[u8])> {
    if data.len() < 6 {
        return Err(NetConfigError::MalformedBootEntry);
    }

    let start = 6;
    let mut offset = start;
    while offset + 1 < data.len() {
        offset += 2;
        if data[offset - 2] == 0 && data[offset - 1] == 0 {
            break;
        }
    }

    let description = if offset > start {
        let text = utf16le_to_string(&data[start..offset])?;
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    } else {
        None
    };

    if offset >= data.len() {
        return Err(NetConfigError::SourceNotFound);
    }

    Ok((description, &data[offset..]))
}
