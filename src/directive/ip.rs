// file: src/directive/ip.rs
// version: 1.0.0
// guid: c25e80d9-4f17-4a63-b8e2-96d04a3c7f18

//! Parser for the historical `ip=` directive.
//!
//! The directive comes in three shapes, chosen by heuristic:
//!
//! - `ip={dhcp|on|any|dhcp6|auto6|either6|link6|link-local}`
//! - `ip=<interface>:<autoconf>[:[<mtu>][:<macaddr>]]`
//! - `ip=<client-IP>:[<peer>]:<gateway>:<netmask>:[<hostname>]:<interface>:[<autoconf>]`
//!   followed by either `[:<dns1>[:<dns2>[:<ntp>]]]` or `[:[<mtu>][:<macaddr>]]`
//!
//! IPv6 literals may be wrapped in `[...]`; the brackets are stripped
//! for storage.

use std::net::Ipv4Addr;

use crate::directive::{is_ip_addr, non_empty, FieldCursor};
use crate::error::{syntax_error, NetConfigError, Result};
use crate::record::{Autoconf, InterfaceConfig};

enum First<'a> {
    Ip(&'a str),
    Word(&'a str),
}

/// Parse one `ip=` value into a partial interface record.
pub fn parse(nr: usize, arg: &str) -> Result<InterfaceConfig> {
    let mut cfg = InterfaceConfig::default();

    // No colons at all: the whole string is the autoconf method.
    if !arg.contains(':') {
        cfg.autoconf = Autoconf::parse(arg);
        return Ok(cfg);
    }

    let mut cur = FieldCursor::new(arg);
    match first_field(&mut cur, nr, arg)? {
        First::Word(iface) => parse_short_form(&mut cur, &mut cfg, iface, nr, arg)?,
        First::Ip(client) => parse_long_form(&mut cur, &mut cfg, client, nr, arg)?,
    }

    Ok(cfg)
}

/// `<interface>:<autoconf>[:[<mtu>][:<macaddr>]]`
fn parse_short_form(
    cur: &mut FieldCursor<'_>,
    cfg: &mut InterfaceConfig,
    iface: &str,
    nr: usize,
    arg: &str,
) -> Result<()> {
    cfg.interface = non_empty(iface).map(str::to_string);

    if let Some(tok) = cur.word() {
        if !tok.is_empty() {
            cfg.autoconf = Autoconf::parse(tok);
        }
    }

    if cur.has_more() {
        if let Some(tok) = cur.word() {
            cfg.mtu = non_empty(tok).map(str::to_string);
        }
        if let Some(rest) = cur.remainder() {
            if !rest.is_empty() {
                if rest.ends_with(':') {
                    return Err(syntax_error(nr, arg));
                }
                cfg.macaddr = Some(rest.to_string());
            }
        }
    }

    Ok(())
}

/// `<client-IP>:[<peer>]:<gateway>:<netmask>:[<hostname>]:<interface>:[<autoconf>]` + tail
fn parse_long_form(
    cur: &mut FieldCursor<'_>,
    cfg: &mut InterfaceConfig,
    client: &str,
    nr: usize,
    arg: &str,
) -> Result<()> {
    cfg.client_ip = Some(client.to_string());

    cfg.peer_ip = extract_ip(cur, false, nr, arg)?.map(str::to_string);
    cfg.gateway = extract_ip(cur, true, nr, arg)?.map(str::to_string);

    let mask = cur
        .word()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| syntax_error(nr, arg))?;
    cfg.netmask = if mask.contains('.') {
        netmask_to_cidr(mask)?
    } else {
        parse_prefix_len(mask)?
    };

    if let Some(tok) = cur.word() {
        // a hostname of '*' requests catch-all matching, which is the default
        cfg.hostname = non_empty(tok).filter(|h| *h != "*").map(str::to_string);
    }

    let iface = cur
        .word()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| syntax_error(nr, arg))?;
    cfg.interface = Some(iface.to_string());

    if let Some(tok) = cur.word() {
        if !tok.is_empty() {
            cfg.autoconf = Autoconf::parse(tok);
        }
    }

    if cur.has_more() {
        parse_tail(cur, cfg, nr, arg)?;
    }

    Ok(())
}

/// Disambiguate the long-form tail: `<dns1>[:<dns2>[:<ntp>]]` when the
/// first token is an address, a bare MAC when the first token is empty
/// and the remainder carries exactly five colons, `<mtu>:<macaddr>`
/// otherwise.
fn parse_tail(
    cur: &mut FieldCursor<'_>,
    cfg: &mut InterfaceConfig,
    nr: usize,
    arg: &str,
) -> Result<()> {
    let tok = cur.word().unwrap_or("");

    if is_ip_addr(tok) {
        cfg.dns1 = Some(tok.to_string());
        if cur.has_more() {
            cfg.dns2 = extract_ip(cur, false, nr, arg)?.map(str::to_string);
            if cur.has_more() {
                cfg.ntp = extract_ip(cur, false, nr, arg)?.map(str::to_string);
            }
            if cur.has_more() {
                return Err(syntax_error(nr, arg));
            }
        }
    } else if !tok.is_empty() {
        cfg.mtu = Some(tok.to_string());
        if let Some(rest) = cur.remainder() {
            if !rest.is_empty() {
                cfg.macaddr = Some(rest.to_string());
            }
        }
    } else if let Some(rest) = cur.remainder() {
        if !rest.is_empty() {
            if rest.matches(':').count() == 5 {
                cfg.macaddr = Some(rest.to_string());
            } else {
                if let Some(t) = cur.word() {
                    cfg.dns2 = non_empty(t).map(str::to_string);
                }
                if cur.has_more() {
                    let tail = cur.remainder().unwrap_or("");
                    if !is_ip_addr(tail) {
                        return Err(syntax_error(nr, arg));
                    }
                    cfg.ntp = Some(tail.to_string());
                }
            }
        }
    }

    Ok(())
}

/// Classify the first field: an address (bracketed or plain) selects
/// the long form, anything else is an interface name.
fn first_field<'a>(cur: &mut FieldCursor<'a>, nr: usize, arg: &str) -> Result<First<'a>> {
    if cur.at_bracket() {
        let inner = cur.bracketed_word().ok_or_else(|| syntax_error(nr, arg))?;
        if inner.is_empty() {
            return Err(syntax_error(nr, arg));
        }
        return Ok(First::Ip(inner));
    }

    let tok = cur.word().unwrap_or("");
    if !tok.is_empty() && is_ip_addr(tok) {
        Ok(First::Ip(tok))
    } else {
        Ok(First::Word(tok))
    }
}

/// Take the next field as an IP literal, bracketed or plain. A
/// non-empty field that is not an address is a syntax error.
fn extract_ip<'a>(
    cur: &mut FieldCursor<'a>,
    required: bool,
    nr: usize,
    arg: &str,
) -> Result<Option<&'a str>> {
    if cur.at_bracket() {
        let inner = cur.bracketed_word().ok_or_else(|| syntax_error(nr, arg))?;
        if required && inner.is_empty() {
            return Err(syntax_error(nr, arg));
        }
        return Ok(non_empty(inner));
    }

    match cur.word() {
        Some(tok) if !tok.is_empty() => {
            if is_ip_addr(tok) {
                Ok(Some(tok))
            } else {
                Err(syntax_error(nr, arg))
            }
        }
        _ => {
            if required {
                Err(syntax_error(nr, arg))
            } else {
                Ok(None)
            }
        }
    }
}

/// Convert a dotted-quad netmask (e.g. `255.255.0.0`) to its CIDR
/// prefix length. Non-contiguous masks are rejected.
fn netmask_to_cidr(mask: &str) -> Result<u8> {
    let addr: Ipv4Addr = mask
        .parse()
        .map_err(|_| NetConfigError::InvalidNetmask(mask.to_string()))?;
    let bits = u32::from(addr);
    let ones = bits.leading_ones();

    // once the first zero bit appears, the rest must be zero too
    let contiguous = bits.checked_shl(ones).map_or(true, |rest| rest == 0);
    if !contiguous {
        return Err(NetConfigError::InvalidNetmask(mask.to_string()));
    }

    Ok(ones as u8)
}

/// Parse a decimal prefix length in `0..=128`.
fn parse_prefix_len(token: &str) -> Result<u8> {
    let len: u32 = token
        .parse()
        .map_err(|_| NetConfigError::InvalidNetmask(token.to_string()))?;
    if len > 128 {
        return Err(NetConfigError::InvalidNetmask(token.to_string()));
    }
    Ok(len as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_token_is_autoconf() {
        let cfg = parse(1, "dhcp").unwrap();
        assert_eq!(cfg.autoconf, Some(Autoconf::Dhcp));
        assert!(cfg.interface.is_none());
    }

    #[test]
    fn test_single_token_ip_literal_kept_without_method() {
        // a client IP without colons lands in the autoconf slot and is
        // rejected by the mapping table
        let cfg = parse(1, "192.168.0.10").unwrap();
        assert_eq!(cfg.autoconf, None);
        assert!(cfg.client_ip.is_none());
    }

    #[test]
    fn test_short_form() {
        let cfg = parse(1, "eth0:dhcp6").unwrap();
        assert_eq!(cfg.interface.as_deref(), Some("eth0"));
        assert_eq!(cfg.autoconf, Some(Autoconf::Dhcp6));
    }

    #[test]
    fn test_short_form_with_mtu_and_mac() {
        let cfg = parse(1, "eth0:dhcp:1492:00:11:22:33:44:55").unwrap();
        assert_eq!(cfg.mtu.as_deref(), Some("1492"));
        assert_eq!(cfg.macaddr.as_deref(), Some("00:11:22:33:44:55"));
    }

    #[test]
    fn test_short_form_trailing_colon_after_mac_rejected() {
        assert!(parse(1, "eth0:dhcp:1492:aa:bb:cc:dd:ee:ff:").is_err());
        // a dangling separator after the mtu is tolerated
        let cfg = parse(1, "eth0:dhcp:1492:").unwrap();
        assert_eq!(cfg.mtu.as_deref(), Some("1492"));
        assert!(cfg.macaddr.is_none());
    }

    #[test]
    fn test_long_form_with_dns_tail() {
        let cfg = parse(
            1,
            "192.168.0.10::192.168.0.1:255.255.255.0::eth0:on:10.10.10.10:10.10.10.11:10.10.10.161",
        )
        .unwrap();
        assert_eq!(cfg.client_ip.as_deref(), Some("192.168.0.10"));
        assert!(cfg.peer_ip.is_none());
        assert_eq!(cfg.gateway.as_deref(), Some("192.168.0.1"));
        assert_eq!(cfg.netmask, 24);
        assert!(cfg.hostname.is_none());
        assert_eq!(cfg.interface.as_deref(), Some("eth0"));
        assert_eq!(cfg.autoconf, Some(Autoconf::On));
        assert_eq!(cfg.dns1.as_deref(), Some("10.10.10.10"));
        assert_eq!(cfg.dns2.as_deref(), Some("10.10.10.11"));
        assert_eq!(cfg.ntp.as_deref(), Some("10.10.10.161"));
    }

    #[test]
    fn test_long_form_bracketed_ipv6() {
        let cfg = parse(
            1,
            "[2001:1234:56:8f63::10]:[2001:1234:56:8f63::2]:[2001:1234:56:8f63::1]:64:hogehoge:eth0:on",
        )
        .unwrap();
        assert_eq!(cfg.client_ip.as_deref(), Some("2001:1234:56:8f63::10"));
        assert_eq!(cfg.peer_ip.as_deref(), Some("2001:1234:56:8f63::2"));
        assert_eq!(cfg.gateway.as_deref(), Some("2001:1234:56:8f63::1"));
        assert_eq!(cfg.netmask, 64);
        assert_eq!(cfg.hostname.as_deref(), Some("hogehoge"));
        assert_eq!(cfg.interface.as_deref(), Some("eth0"));
        assert_eq!(cfg.autoconf, Some(Autoconf::On));
    }

    #[test]
    fn test_long_form_mtu_mac_tail() {
        let cfg = parse(
            1,
            "10.0.0.2::10.0.0.1:24:host:eth1:on:9000:aa:bb:cc:dd:ee:ff",
        )
        .unwrap();
        assert_eq!(cfg.mtu.as_deref(), Some("9000"));
        assert_eq!(cfg.macaddr.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
        assert!(cfg.dns1.is_none());
    }

    #[test]
    fn test_long_form_bare_mac_tail() {
        // empty first tail token, remainder with exactly five colons
        let cfg = parse(1, "10.0.0.2::10.0.0.1:24:host:eth1:on::aa:bb:cc:dd:ee:ff").unwrap();
        assert_eq!(cfg.macaddr.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
        assert!(cfg.mtu.is_none());
    }

    #[test]
    fn test_long_form_hostname_star_is_unset() {
        let cfg = parse(1, "10.0.0.2::10.0.0.1:24:*:eth1:on").unwrap();
        assert!(cfg.hostname.is_none());
    }

    #[test]
    fn test_missing_gateway_rejected() {
        assert!(parse(1, "10.0.0.2:::24:host:eth1:on").is_err());
    }

    #[test]
    fn test_missing_interface_rejected() {
        assert!(parse(1, "10.0.0.2::10.0.0.1:24:host").is_err());
    }

    #[test]
    fn test_dotted_netmask_conversion() {
        assert_eq!(netmask_to_cidr("255.255.255.0").unwrap(), 24);
        assert_eq!(netmask_to_cidr("255.255.0.0").unwrap(), 16);
        assert_eq!(netmask_to_cidr("255.255.255.255").unwrap(), 32);
        assert_eq!(netmask_to_cidr("0.0.0.0").unwrap(), 0);
        assert_eq!(netmask_to_cidr("255.255.255.252").unwrap(), 30);
    }

    #[test]
    fn test_non_contiguous_netmask_rejected() {
        assert!(netmask_to_cidr("255.0.255.0").is_err());
        assert!(netmask_to_cidr("255.255.0.255").is_err());
        assert!(netmask_to_cidr("0.255.0.0").is_err());
    }

    #[test]
    fn test_prefix_len_bounds() {
        assert_eq!(parse_prefix_len("0").unwrap(), 0);
        assert_eq!(parse_prefix_len("128").unwrap(), 128);
        assert!(parse_prefix_len("129").is_err());
        assert!(parse_prefix_len("24x").is_err());
        assert!(parse_prefix_len("-1").is_err());
    }

    #[test]
    fn test_unknown_autoconf_still_yields_record() {
        let cfg = parse(1, "eth0:bogus").unwrap();
        assert_eq!(cfg.interface.as_deref(), Some("eth0"));
        assert_eq!(cfg.autoconf, None);
    }
}
