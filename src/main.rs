use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{command, Arg, ArgAction, Command};

use elfconf::{patch, PatchRequest};

fn cli() -> Command {
    command!()
        .max_term_width(100)
        .disable_version_flag(true)
        .args(&[
            Arg::new("file")
                .short('f')
                .value_name("path")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The ELF file to patch in place"),
            Arg::new("symbol")
                .short('s')
                .value_name("name")
                .required(true)
                .value_parser(clap::value_parser!(String))
                .help("The exact name of the symbol to patch"),
            Arg::new("value")
                .short('v')
                .value_name("value")
                .required(true)
                .value_parser(PatchRequest::parse_value)
                .help("The new value, in decimal, hexadecimal (0x) or octal (leading 0)"),
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
            Arg::new("args")
                .num_args(1..)
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(String))
                .hide(true),
        ])
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    if matches.get_flag("verbose") {
        env_logger::builder()
            .format_level(false)
            .format_target(false)
            .filter_module("elfconf", log::LevelFilter::Debug)
            .init();
    }

    for arg in matches.get_many::<String>("args").unwrap_or_default() {
        eprintln!("Non-option argument {}, ignore...", arg);
    }

    // Required arguments are enforced by clap.
    let path = matches.get_one::<PathBuf>("file").unwrap();
    let symbol = matches.get_one::<String>("symbol").unwrap();
    let value = *matches.get_one::<u64>("value").unwrap();

    let request = PatchRequest::new(path, symbol, value);
    let location = patch(&request).with_context(|| {
        format!(
            "Failed to patch symbol '{}' in '{}'",
            symbol,
            path.display()
        )
    })?;
    println!(
        "Symbol located at {:x} in ELF (Size: {} Bytes)",
        location.offset, location.size
    );
    Ok(())
}
