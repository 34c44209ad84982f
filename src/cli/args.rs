// file: src/cli/args.rs
// version: 1.0.0
// guid: 7e40c925-1d68-4b3a-9f07-c52a84e6d1b9

//! Command line argument definitions

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "netconfig-agent")]
#[command(about = "Create systemd-networkd config from the kernel command line")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// File with configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory in which to write config
    #[arg(short, long, default_value = "/run/systemd/network")]
    pub output: PathBuf,

    /// Parse all network options on the command line
    #[arg(short = 'a', long)]
    pub parse_all: bool,

    /// Write config to stdout
    #[arg(short, long)]
    pub debug: bool,

    /// Print program version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Directives joined as if they were the kernel command line
    pub directives: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["netconfig-agent"]);
        assert!(cli.config.is_none());
        assert_eq!(cli.output, PathBuf::from("/run/systemd/network"));
        assert!(!cli.parse_all);
        assert!(!cli.debug);
        assert!(cli.directives.is_empty());
    }

    #[test]
    fn test_short_options() {
        let cli = Cli::parse_from([
            "netconfig-agent",
            "-a",
            "-d",
            "-o",
            "/tmp/out",
            "-c",
            "/etc/netconfig.conf",
        ]);
        assert!(cli.parse_all);
        assert!(cli.debug);
        assert_eq!(cli.output, PathBuf::from("/tmp/out"));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/netconfig.conf")));
    }

    #[test]
    fn test_positional_directives() {
        let cli = Cli::parse_from(["netconfig-agent", "-a", "ip=eth0:dhcp", "rd.peerdns=1"]);
        assert_eq!(cli.directives, ["ip=eth0:dhcp", "rd.peerdns=1"]);
    }
}
