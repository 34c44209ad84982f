// file: src/utils/utf16.rs
// version: 1.0.0
// guid: b72e4f18-3a9c-45d1-8e60-f2c7a1d95b34

//! UTF-16LE decoding for EFI variable payloads.

use crate::error::{NetConfigError, Result};

/// Decode a UTF-16LE payload into a Rust string.
///
/// Firmware strings are ASCII in practice, so code units of 128 or more
/// are rejected. Decoding stops at the first NUL code unit. DOS
/// backslashes are rewritten to `/` so device paths come out as Unix
/// paths.
pub fn utf16le_to_string(data: &[u8]) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(NetConfigError::OddUtf16Length);
    }

    let mut out = String::with_capacity(data.len() / 2);
    for pair in data.chunks_exact(2) {
        let c = u16::from_le_bytes([pair[0], pair[1]]);
        if c == 0 {
            break;
        }
        if c >= 128 {
            return Err(NetConfigError::Utf16OutOfRange);
        }
        if c == u16::from(b'\\') {
            out.push('/');
        } else {
            out.push(c as u8 as char);
        }
    }

    Ok(out)
}

/// Encode an ASCII string as UTF-16LE with a terminating NUL, the inverse
/// of [`utf16le_to_string`]. Only used by tests to build variable payloads.
pub fn string_to_utf16le(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() * 2 + 2);
    for b in s.bytes() {
        out.push(b);
        out.push(0);
    }
    out.push(0);
    out.push(0);
    out
}
