// file: src/main.rs
// version: 1.0.0
// guid: 1f7b3c60-e8d4-4a95-8b27-490c6e5a2fd1

//! netconfig-agent - Main entry point

use std::path::Path;
use std::process;

use clap::Parser;
use netconfig_agent::{
    cli::Cli,
    error::NetConfigError,
    generator::{Generator, CMDLINE_PATH},
    logging::logger,
    utils, Result,
};
use tracing::error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.debug) {
        eprintln!("{e}");
        process::exit(e.exit_code());
    }

    if let Err(e) = run(cli) {
        error!("{e}");
        if matches!(e, NetConfigError::Usage) {
            eprintln!("Try 'netconfig-agent --help' for more information.");
        }
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.config.is_some() && !cli.directives.is_empty() {
        return Err(NetConfigError::Usage);
    }

    utils::fs::mkdir_p(&cli.output)?;

    let mut generator = Generator::new(&cli.output, cli.parse_all);

    if let Some(config) = &cli.config {
        generator.parse_config_file(config)?;
    } else if !cli.directives.is_empty() {
        // inline arguments stand in for the kernel command line
        let line = cli.directives.join(" ");
        generator.parse_cmdline(&line)?;
    } else {
        let line = read_cmdline(Path::new(CMDLINE_PATH))?;
        generator.parse_cmdline(&line)?;
    }

    generator.write_output()
}

fn read_cmdline(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|source| NetConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.trim_end_matches('\n').to_string())
}
