// file: src/directive/mod.rs
// version: 1.0.0
// guid: 74d1f60b-9a38-4c25-8e07-5b2c96e4a1d3

//! Directive sub-parsers.
//!
//! Each recognized `key=value` directive has its own syntactic parser
//! that turns the value into a partial [`InterfaceConfig`]. The parsers
//! receive the entry index (line number in file mode, token index on
//! the command line) purely for diagnostics.

pub mod extra;
pub mod ifcfg;
pub mod ip;
pub mod vlan;

use std::net::IpAddr;

/// Colon-separated field scanner with `strsep`-like semantics: taking a
/// word from an exhausted cursor yields nothing, and the final word may
/// be empty.
#[derive(Debug, Clone)]
pub(crate) struct FieldCursor<'a> {
    rest: Option<&'a str>,
}

impl<'a> FieldCursor<'a> {
    pub(crate) fn new(s: &'a str) -> Self {
        Self { rest: Some(s) }
    }

    /// Take the next `:`-delimited field.
    pub(crate) fn word(&mut self) -> Option<&'a str> {
        let s = self.rest?;
        match s.find(':') {
            Some(i) => {
                self.rest = Some(&s[i + 1..]);
                Some(&s[..i])
            }
            None => {
                self.rest = None;
                Some(s)
            }
        }
    }

    /// Take a `[...]`-wrapped field (bracketed IPv6 literal). The
    /// cursor must be positioned at a `[`; the closing bracket must be
    /// followed by `:` (consumed) or the end of the input. Returns the
    /// text between the brackets, or `None` when malformed.
    pub(crate) fn bracketed_word(&mut self) -> Option<&'a str> {
        let s = self.rest?;
        let inner_end = s.find(']')?;
        let inner = &s[1..inner_end];
        let after = &s[inner_end + 1..];
        if after.is_empty() {
            self.rest = None;
        } else {
            self.rest = Some(after.strip_prefix(':')?);
        }
        Some(inner)
    }

    /// True when the next field is a bracketed IPv6 literal.
    pub(crate) fn at_bracket(&self) -> bool {
        self.rest.is_some_and(|r| r.starts_with('['))
    }

    /// Everything not yet consumed, without consuming it.
    pub(crate) fn remainder(&self) -> Option<&'a str> {
        self.rest
    }

    /// True when unconsumed, non-empty input remains.
    pub(crate) fn has_more(&self) -> bool {
        self.rest.is_some_and(|r| !r.is_empty())
    }
}

/// Whether `token` is a plain IPv4 or IPv6 literal.
pub(crate) fn is_ip_addr(token: &str) -> bool {
    token.parse::<IpAddr>().is_ok()
}

pub(crate) fn non_empty(token: &str) -> Option<&str> {
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
