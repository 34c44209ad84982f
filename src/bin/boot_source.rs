// file: src/bin/boot_source.rs
// version: 1.0.0
// guid: c6e83b17-29df-4a04-b9e1-58a7f2d4c690

//! boot-source - print where the running binary was booted from

use std::process;

use clap::Parser;
use netconfig_agent::{efi::BootSourceResolver, logging::logger};

#[derive(Parser, Debug)]
#[command(name = "boot-source")]
#[command(about = "Print the EFI boot source of the running binary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print boot path
    #[arg(short, long)]
    boot: bool,

    /// Print debug informations
    #[arg(short, long)]
    debug: bool,

    /// Print program version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.debug) {
        eprintln!("{e}");
        process::exit(e.exit_code());
    }

    if !cli.boot {
        eprintln!("Try 'boot-source --help' for more information.");
        process::exit(1);
    }

    match BootSourceResolver::new().resolve() {
        Ok(source) => {
            println!("Boot Entry:    {}", na(source.entry.as_deref()));
            println!("Loader Device: {}", na(source.device.as_deref()));
            println!("Loader URL:    {}", na(source.url.as_deref()));
            println!("Loader Image:  {}", na(source.image.as_deref()));
        }
        Err(e) => {
            eprintln!("Couldn't get boot source: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn na(value: Option<&str>) -> &str {
    value.unwrap_or("n/a")
}
