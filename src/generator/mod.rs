// file: src/generator/mod.rs
// version: 1.0.0
// guid: e1c63a08-b4f7-4952-a38d-60d29c5b7e14

//! The network-configuration generator.
//!
//! Ties the directive parsers, the record merger and the emitters
//! together: directives come in from a configuration file or the kernel
//! command line, partial records are merged, and the merged result is
//! written out as networkd fragments.

pub mod tokenize;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::directive::ifcfg::IfcfgVlanTable;
use crate::directive::{extra, ifcfg, ip, vlan};
use crate::emit;
use crate::error::{syntax_error, NetConfigError, Result};
use crate::record::{RecordTable, VlanTable};
use self::tokenize::{split_cmdline, strip_value_quotes};

/// Path of the kernel command line pseudo-file.
pub const CMDLINE_PATH: &str = "/proc/cmdline";

/// Generator state for one invocation: the output directory, the
/// merged records and the two VLAN tables.
pub struct Generator {
    output_dir: PathBuf,
    parse_all: bool,
    records: RecordTable,
    vlans: VlanTable,
    ifcfg_vlans: IfcfgVlanTable,
}

impl Generator {
    pub fn new(output_dir: impl Into<PathBuf>, parse_all: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            parse_all,
            records: RecordTable::new(),
            vlans: VlanTable::new(),
            ifcfg_vlans: IfcfgVlanTable::new(),
        }
    }

    /// Process a configuration file: one directive per line, empty and
    /// `#`-comment lines skipped. Every error is fatal here, and an
    /// unrecognized directive is a syntax error.
    pub fn parse_config_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|source| NetConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        for (idx, line) in content.lines().enumerate() {
            let nr = idx + 1;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            self.dispatch_file_line(nr, line)?;
        }

        Ok(())
    }

    fn dispatch_file_line(&mut self, nr: usize, line: &str) -> Result<()> {
        let cfg = if let Some(value) = line.strip_prefix("ip=") {
            ip::parse(nr, value)?
        } else if let Some(value) = line.strip_prefix("nameserver=") {
            extra::parse_nameserver(nr, value)?
        } else if let Some(value) = line.strip_prefix("rd.peerdns=") {
            extra::parse_peerdns(nr, value)?
        } else if let Some(value) = line.strip_prefix("rd.route=") {
            extra::parse_route(nr, value)?
        } else if let Some(value) = line.strip_prefix("vlan=") {
            vlan::parse(nr, value, &mut self.vlans)?
        } else if let Some(value) = line.strip_prefix("ifcfg=") {
            let entry = ifcfg::parse(nr, value, &mut self.ifcfg_vlans)?;
            return emit::ifcfg::write_network_file(&self.output_dir, nr, &entry);
        } else {
            return Err(syntax_error(nr, line));
        };

        self.records.merge(&cfg)
    }

    /// Process kernel-command-line text. Only `ifcfg=` is always
    /// active; the remaining directives are handled when `parse_all`
    /// is set, since an upstream network generator normally covers
    /// them. A bad token is logged and skipped so it cannot affect the
    /// others; capacity and I/O errors still abort.
    pub fn parse_cmdline(&mut self, cmdline: &str) -> Result<()> {
        let line = cmdline.trim_end_matches('\n');
        debug!("cmdline={}", line);

        let mut nr = 1;
        for token in split_cmdline(line) {
            if let Some(value) = token.strip_prefix("ifcfg=") {
                let value = strip_value_quotes(value);
                let entry_nr = nr;
                nr += 1;

                let result = ifcfg::parse(entry_nr, value, &mut self.ifcfg_vlans)
                    .and_then(|entry| {
                        emit::ifcfg::write_network_file(&self.output_dir, entry_nr, &entry)
                    });
                self.note_or_abort(result, value)?;
            } else if self.parse_all {
                let parsed = if let Some(value) = token.strip_prefix("ip=") {
                    Some(ip::parse(nr, value))
                } else if let Some(value) = token.strip_prefix("nameserver=") {
                    Some(extra::parse_nameserver(nr, value))
                } else if let Some(value) = token.strip_prefix("rd.peerdns=") {
                    Some(extra::parse_peerdns(nr, value))
                } else if let Some(value) = token.strip_prefix("rd.route=") {
                    Some(extra::parse_route(nr, value))
                } else if let Some(value) = token.strip_prefix("vlan=") {
                    Some(vlan::parse(nr, value, &mut self.vlans))
                } else {
                    None
                };

                if let Some(result) = parsed {
                    nr += 1;
                    let result = result.and_then(|cfg| self.records.merge(&cfg));
                    self.note_or_abort(result, token)?;
                }
            }
        }

        Ok(())
    }

    fn note_or_abort(&self, result: Result<()>, token: &str) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("{}", e);
                warn!("Skip '{}' due to errors", token);
                Ok(())
            }
        }
    }

    /// Emit the merged records and the VLAN `.netdev` fragments, in
    /// that order.
    pub fn write_output(&self) -> Result<()> {
        for (i, cfg) in self.records.records().iter().enumerate() {
            emit::network::write_network_config(&self.output_dir, i + 1, cfg, &self.vlans)?;
        }

        if !self.vlans.is_empty() {
            emit::netdev::write_netdev_config(&self.output_dir, &self.vlans)?;
        }

        if !self.ifcfg_vlans.is_empty() {
            emit::ifcfg::write_netdev_files(&self.output_dir, self.ifcfg_vlans.ids())?;
        }

        Ok(())
    }

    pub fn records(&self) -> &RecordTable {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn generator(tmp: &TempDir, parse_all: bool) -> Generator {
        Generator::new(tmp.path(), parse_all)
    }

    #[test]
    fn test_cmdline_ignores_unrelated_tokens() {
        let tmp = TempDir::new().unwrap();
        let mut gen = generator(&tmp, true);

        gen.parse_cmdline("root=/dev/sda1 quiet ip=eth0:dhcp splash")
            .unwrap();

        assert_eq!(gen.records().len(), 1);
    }

    #[test]
    fn test_cmdline_without_parse_all_only_ifcfg() {
        let tmp = TempDir::new().unwrap();
        let mut gen = generator(&tmp, false);

        gen.parse_cmdline("ip=eth0:dhcp ifcfg=eth1=dhcp").unwrap();

        // ip= is left to the upstream generator
        assert_eq!(gen.records().len(), 0);
        assert!(tmp.path().join("66-ifcfg-dev-01.network").is_file());
    }

    #[test]
    fn test_cmdline_syntax_error_skips_token_only() {
        let tmp = TempDir::new().unwrap();
        let mut gen = generator(&tmp, true);

        gen.parse_cmdline("rd.peerdns=2 ip=eth0:dhcp rd.peerdns=1")
            .unwrap();

        assert_eq!(gen.records().len(), 1);
        let rec = &gen.records().records()[0];
        assert_eq!(rec.use_dns, Some(true));
    }

    #[test]
    fn test_config_file_unknown_directive_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let cfg_path = tmp.path().join("network.conf");
        std::fs::write(&cfg_path, "bogus=1\n").unwrap();

        let mut gen = generator(&tmp, false);
        let err = gen.parse_config_file(&cfg_path).unwrap_err();
        assert!(matches!(err, NetConfigError::Syntax { entry: 1, .. }));
    }

    #[test]
    fn test_config_file_skips_comments_and_blanks() {
        let tmp = TempDir::new().unwrap();
        let cfg_path = tmp.path().join("network.conf");
        std::fs::write(
            &cfg_path,
            "# header\n\n   \nip=eth0:dhcp\nnameserver=9.9.9.9\n",
        )
        .unwrap();

        let mut gen = generator(&tmp, false);
        gen.parse_config_file(&cfg_path).unwrap();

        assert_eq!(gen.records().len(), 1);
        let rec = &gen.records().records()[0];
        assert_eq!(rec.dns1.as_deref(), Some("9.9.9.9"));
    }

    #[test]
    fn test_config_file_syntax_error_reports_line_number() {
        let tmp = TempDir::new().unwrap();
        let cfg_path = tmp.path().join("network.conf");
        std::fs::write(&cfg_path, "# comment\nip=eth0:dhcp\nrd.peerdns=2\n").unwrap();

        let mut gen = generator(&tmp, false);
        let err = gen.parse_config_file(&cfg_path).unwrap_err();
        assert!(matches!(err, NetConfigError::Syntax { entry: 3, .. }));
    }

    #[test]
    fn test_quoted_ifcfg_value() {
        let tmp = TempDir::new().unwrap();
        let mut gen = generator(&tmp, false);

        gen.parse_cmdline(r#"ifcfg="eth1=192.168.0.2/24 192.158.10.12/24,192.168.0.1,8.8.8.8,mydomain.com""#)
            .unwrap();

        let content =
            std::fs::read_to_string(tmp.path().join("66-ifcfg-dev-01.network")).unwrap();
        assert!(content.contains("Address=192.168.0.2/24\nAddress=192.158.10.12/24\n"));
    }

    #[test]
    fn test_entry_numbers_shared_between_directives() {
        let tmp = TempDir::new().unwrap();
        let mut gen = generator(&tmp, true);

        gen.parse_cmdline("ip=eth0:dhcp ifcfg=eth1=dhcp").unwrap();

        // ip= consumed entry 1, so the ifcfg fragment is entry 2
        assert!(tmp.path().join("66-ifcfg-dev-02.network").is_file());
    }
}
