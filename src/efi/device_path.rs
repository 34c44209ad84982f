// file: src/efi/device_path.rs
// version: 1.0.0
// guid: 5e17c4a9-b382-4d60-9f25-a04d78e1c6b2

//! EFI device-path parsing.
//!
//! A device path is a sequence of nodes, each carrying a type byte, a
//! sub-type byte, a little-endian 16-bit length and a payload. The
//! length field is untrusted input: a node shorter than its own header
//! or longer than the remaining blob terminates the walk, and no byte
//! past the declared blob end is ever read.

use tracing::debug;
use uuid::Uuid;

use crate::error::{NetConfigError, Result};
use crate::utils::utf16::utf16le_to_string;

/* Device path types */
const DT_HARDWARE: u8 = 0x01;
const DT_ACPI: u8 = 0x02;
const DT_MESSAGING: u8 = 0x03;
const DT_MEDIA: u8 = 0x04;
const DT_END: u8 = 0x7f;

/* Device path sub-types */
const DST_HARD_DRIVE: u8 = 0x01;
const DST_MEDIA_FILE: u8 = 0x04;
const DST_MSG_MAC_ADDR: u8 = 0x0b;
const DST_MSG_IPV4: u8 = 0x0c;
const DST_MSG_URI: u8 = 0x18;

/// What a device-path walk recovered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DevicePathInfo {
    /// Partition rendered as `/dev/disk/by-partuuid/<lowercase-uuid>`.
    pub device: Option<String>,
    /// URL of an HTTP-booted image.
    pub url: Option<String>,
    /// File path of the booted image on its medium.
    pub image: Option<String>,
    /// Set when the path indicates a PXE boot.
    pub is_pxe_boot: bool,
}

/// Walk a device-path blob and collect the boot-relevant nodes.
///
/// Yields `SourceNotFound` when the walk produced neither a device,
/// URL nor image and the PXE flag stayed clear.
pub fn parse_device_path(data: &[u8]) -> Result<DevicePathInfo> {
    let mut info = DevicePathInfo::default();
    let mut offset = 0;

    while offset + 4 <= data.len() {
        let node_type = data[offset];
        let sub_type = data[offset + 1];
        let length = u16::from_le_bytes([data[offset + 2], data[offset + 3]]) as usize;

        if node_type == DT_END {
            if sub_type != 0 {
                break;
            }
            debug!("Unexpected: type=0x7F, subtype=0x{:02X}", sub_type);
        }

        if length < 4 {
            debug!(
                "length too short: type={:02X}, subtype={:02X}, length={}",
                node_type, sub_type, length
            );
            break;
        }
        if offset + length > data.len() {
            debug!(
                "length bigger than limit: type={:02X}, subtype={:02X}, length={}, limit={}",
                node_type,
                sub_type,
                length,
                data.len()
            );
            break;
        }

        let node = &data[offset..offset + length];
        match node_type {
            DT_MEDIA => parse_media_node(sub_type, node, &mut info)?,
            DT_MESSAGING => parse_messaging_node(sub_type, node, &mut info)?,
            DT_HARDWARE => debug!("Ignoring DT_HARDWARE node, subtype: {:02X}", sub_type),
            DT_ACPI => debug!("Ignoring DT_ACPI node, subtype: {:02X}", sub_type),
            DT_END => {}
            _ => debug!(
                "Unknown device path type: {:02X}, subtype: {:02X}",
                node_type, sub_type
            ),
        }

        offset += length;
    }

    if info.device.is_none() && info.url.is_none() && info.image.is_none() && !info.is_pxe_boot {
        return Err(NetConfigError::SourceNotFound);
    }

    Ok(info)
}

fn parse_media_node(sub_type: u8, node: &[u8], info: &mut DevicePathInfo) -> Result<()> {
    match sub_type {
        DST_HARD_DRIVE => {
            /* The partition signature sits at offset 24 within the
               node: Header(4) + PartitionNumber(4) + StartLBA(8) +
               SizeLBA(8) + Signature(16). */
            if node.len() >= 42 {
                let guid = partition_uuid(&node[24..40]);
                let device = format!("/dev/disk/by-partuuid/{guid}");
                debug!("Partition UUID: {}", device);
                info.device = Some(device);
            } else {
                debug!("hard-drive node length ({}) too small (< 42)", node.len());
            }
        }
        DST_MEDIA_FILE => {
            info.image = Some(utf16le_to_string(&node[4..])?);
        }
        _ => debug!("Unknown sub-type of DT_MEDIA: {:02X}", sub_type),
    }
    Ok(())
}

fn parse_messaging_node(sub_type: u8, node: &[u8], info: &mut DevicePathInfo) -> Result<()> {
    match sub_type {
        DST_MSG_URI => {
            info.url = Some(utf16le_to_string(&node[4..])?);
        }
        DST_MSG_MAC_ADDR => {
            if node.len() >= 10 {
                debug!(
                    "MAC: {:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
                    node[4], node[5], node[6], node[7], node[8], node[9]
                );
            }
            info.is_pxe_boot = true;
        }
        DST_MSG_IPV4 => {
            // payload: LocalIp(4) RemoteIp(4) ports, protocol, ...
            if node.len() >= 12 {
                let remote = &node[8..12];
                debug!(
                    "Remote IP: {}.{}.{}.{}",
                    remote[0], remote[1], remote[2], remote[3]
                );
                // an all-zero remote address normally means PXE boot
                if remote.iter().all(|b| *b == 0) {
                    info.is_pxe_boot = true;
                }
            }
        }
        _ => debug!("Unknown sub-type of DT_MESSAGING: {:02X}", sub_type),
    }
    Ok(())
}

/// Render the mixed-endian EFI GUID of a hard-drive node as a
/// lowercase, hyphenated UUID.
fn partition_uuid(bytes: &[u8]) -> Uuid {
    let d1 = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let d2 = u16::from_le_bytes([bytes[4], bytes[5]]);
    let d3 = u16::from_le_bytes([bytes[6], bytes[7]]);
    let d4: [u8; 8] = bytes[8..16].try_into().expect("slice length checked");
    Uuid::from_fields(d1, d2, d3, &d4)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::utils::utf16::string_to_utf16le;

    /// Build one device-path node from its parts.
    pub fn node(node_type: u8, sub_type: u8, payload: &[u8]) -> Vec<u8> {
        let length = (payload.len() + 4) as u16;
        let mut out = vec![node_type, sub_type, length as u8, (length >> 8) as u8];
        out.extend_from_slice(payload);
        out
    }

    /// Hard-drive node with the given raw 16-byte signature.
    pub fn hard_drive_node(signature: &[u8; 16]) -> Vec<u8> {
        let mut payload = vec![0u8; 38];
        payload[20..36].copy_from_slice(signature);
        // partition format + signature type trailer
        payload[36] = 0x02;
        payload[37] = 0x02;
        node(0x04, 0x01, &payload)
    }

    pub fn file_path_node(path: &str) -> Vec<u8> {
        node(0x04, 0x04, &string_to_utf16le(path))
    }

    pub fn uri_node(url: &str) -> Vec<u8> {
        node(0x03, 0x18, &string_to_utf16le(url))
    }

    pub fn mac_node() -> Vec<u8> {
        node(0x03, 0x0b, &[0u8; 33])
    }

    pub fn ipv4_node(remote: [u8; 4]) -> Vec<u8> {
        let mut payload = vec![0u8; 23];
        payload[4..8].copy_from_slice(&remote);
        node(0x03, 0x0c, &payload)
    }

    pub fn end_node() -> Vec<u8> {
        node(0x7f, 0xff, &[])
    }
}
