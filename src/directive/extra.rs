// file: src/directive/extra.rs
// version: 1.0.0
// guid: 6b9f2e47-0c83-4d1a-95e6-82a4d7c0f396

//! Parsers for the small global directives: `nameserver=`,
//! `rd.peerdns=` and `rd.route=`.

use crate::directive::{is_ip_addr, non_empty, FieldCursor};
use crate::error::{syntax_error, Result};
use crate::record::InterfaceConfig;

/// `nameserver=<ip>` -- a global DNS server, carried by a free record.
pub fn parse_nameserver(nr: usize, arg: &str) -> Result<InterfaceConfig> {
    let server = strip_brackets(arg);
    if !is_ip_addr(server) {
        return Err(syntax_error(nr, arg));
    }

    let mut cfg = InterfaceConfig::default();
    cfg.dns1 = Some(server.to_string());
    Ok(cfg)
}

/// `rd.peerdns=0|1` -- whether DHCP-provided DNS servers are honored.
pub fn parse_peerdns(nr: usize, arg: &str) -> Result<InterfaceConfig> {
    let use_dns = match arg {
        "0" => false,
        "1" => true,
        _ => return Err(syntax_error(nr, arg)),
    };

    let mut cfg = InterfaceConfig::default();
    cfg.use_dns = Some(use_dns);
    Ok(cfg)
}

/// `rd.route=<destination>[:<gateway>][:<interface>]` -- a static
/// route. Destination and gateway may be bracketed IPv6; the
/// destination usually carries a `/prefix`.
pub fn parse_route(nr: usize, arg: &str) -> Result<InterfaceConfig> {
    let mut cur = FieldCursor::new(arg);
    let mut cfg = InterfaceConfig::default();

    let destination = if cur.at_bracket() {
        cur.bracketed_word().ok_or_else(|| syntax_error(nr, arg))?
    } else {
        cur.word().unwrap_or("")
    };
    if destination.is_empty() {
        return Err(syntax_error(nr, arg));
    }
    cfg.destination = Some(destination.to_string());

    if cur.has_more() || cur.at_bracket() {
        let gateway = if cur.at_bracket() {
            cur.bracketed_word().ok_or_else(|| syntax_error(nr, arg))?
        } else {
            cur.word().unwrap_or("")
        };
        if !gateway.is_empty() {
            if !is_ip_addr(gateway) {
                return Err(syntax_error(nr, arg));
            }
            cfg.gateway = Some(gateway.to_string());
        }
    }

    if let Some(tok) = cur.word() {
        cfg.interface = non_empty(tok).map(str::to_string);
    }

    if cur.has_more() {
        return Err(syntax_error(nr, arg));
    }

    Ok(cfg)
}

fn strip_brackets(s: &str) -> &str {
    s.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s)
}
