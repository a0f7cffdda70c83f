//! Command dispatch for the `bitbased` binary.

use crate::models::{BitString, ByteOrder, CidrV4, IpV4};
use crate::output::{print_aligned_bit_table, print_hex_table};
use crate::processing::covering_set;
use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use std::error::Error;
use std::io::Write;

pub const USAGE: &str = "usage: bitbased <command> [args]
  cover <ip1> <ip2> [--json]   minimal CIDR blocks spanning ip1..ip2
  cidr <ip>/<free bits>        details of a CIDR block
  hex <bits>                   hex table of a bit string literal
  align <bits>...              aligned bit table of bit string literals";

/// Table settings read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bytes_per_row: usize,
    pub sep: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bytes_per_row: 8,
            sep: "_".to_string(),
        }
    }
}

impl Settings {
    /// Read `BITBASED_BYTES_PER_ROW` and `BITBASED_SEP`, keeping defaults for
    /// anything unset.
    pub fn from_env() -> Result<Settings, Box<dyn Error>> {
        let mut settings = Settings::default();
        if let Ok(rows) = std::env::var("BITBASED_BYTES_PER_ROW") {
            settings.bytes_per_row = rows
                .parse()
                .map_err(|e| format!("Invalid BITBASED_BYTES_PER_ROW {rows:?}: {e}"))?;
        }
        if let Ok(sep) = std::env::var("BITBASED_SEP") {
            settings.sep = sep;
        }
        log::debug!("settings: {settings:?}");
        Ok(settings)
    }
}

/// Logging config used when `log4rs.yml` cannot be loaded: `level` and above
/// to stderr.
pub fn stderr_log_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}

/// Run one command, writing its output to `out`.
pub fn run<W: Write>(
    args: &[String],
    settings: &Settings,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let Some((cmd, rest)) = args.split_first() else {
        return Err(USAGE.into());
    };
    log::info!("run({cmd}, {rest:?})", cmd = cmd.on_blue());

    match (cmd.as_str(), rest) {
        ("cover", [ip1, ip2, flags @ ..]) => {
            let json = flags.iter().any(|f| f == "--json");
            cover(&IpV4::parse(ip1)?, &IpV4::parse(ip2)?, json, out)
        }
        ("cidr", [cidr]) => describe_cidr(&CidrV4::parse(cidr)?, out),
        ("hex", [bits]) => {
            let bs = BitString::parse(bits)?;
            print_hex_table(&bs, settings.bytes_per_row, ByteOrder::Big, out)?;
            Ok(())
        }
        ("align", literals) if !literals.is_empty() => {
            let bitstrings = literals
                .iter()
                .map(|s| BitString::parse(s))
                .collect::<Result<Vec<_>, _>>()?;
            print_aligned_bit_table(&bitstrings, &settings.sep, out)?;
            Ok(())
        }
        _ => {
            log::warn!("{failed} unknown command {cmd}", failed = "failed".on_red());
            Err(USAGE.into())
        }
    }
}

fn cover<W: Write>(
    ip1: &IpV4,
    ip2: &IpV4,
    json: bool,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let blocks = covering_set(ip1, ip2);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&blocks)?)?;
        return Ok(());
    }
    writeln!(
        out,
        "{}",
        format!("{:<20} {:<32} {}", "cidr", "range", "broadcast").bold()
    )?;
    for cidr in &blocks {
        writeln!(
            out,
            "{:<20} {:<32} {}",
            cidr.to_string(),
            cidr.human_readable_range(),
            cidr.broadcast_address()
        )?;
    }
    Ok(())
}

fn describe_cidr<W: Write>(cidr: &CidrV4, out: &mut W) -> Result<(), Box<dyn Error>> {
    writeln!(out, "{}", cidr.to_string().bold())?;
    writeln!(out, "net       {}", cidr.net_address())?;
    writeln!(out, "broadcast {}", cidr.broadcast_address())?;
    writeln!(out, "usable    {}", cidr.usable_addresses())?;
    writeln!(out, "range     {}", cidr.human_readable_range())?;
    Ok(())
}
