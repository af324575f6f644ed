//! # ksym - Main Entry Point
//!
//! Loads the running kernel's symbol list and either dumps the module table,
//! resolves addresses given on the command line, or reports what was loaded.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};

use ksym::cli::{Args, Command};
use ksym::dump;
use ksym::preflight::run_preflight_checks;
use ksym::store::{BuildReport, SymbolStore};
use ksym::symbols::KallsymsFile;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_NOPERM: i32 = 77;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let msg = format!("{err:#}").to_lowercase();
    if msg.contains("permission denied") {
        EXIT_NOPERM
    } else if msg.contains("not a file") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    run_preflight_checks(&args.source, args.quiet)?;

    let store = SymbolStore::new(args.build_options());
    let source = KallsymsFile::new(&args.source);
    let report = store.build(&source).context("Failed to load kernel symbols")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.command {
        Command::Dump { json } => {
            let table = store.snapshot();
            if json {
                dump::write_json(&table, &mut out)?;
            } else {
                dump::write_text(&table, &mut out)?;
            }
        }
        Command::Lookup { addresses } => {
            if !report.is_success() && !args.quiet {
                eprintln!("warning: {} not present, nothing can resolve", source.path().display());
            }
            for addr in addresses {
                match store.lookup(addr.0) {
                    Some(resolved) => writeln!(out, "{addr} {resolved}")?,
                    None => writeln!(out, "{addr} <no symbol>")?,
                }
            }
        }
        Command::Check => {
            let table = store.snapshot();
            match report {
                BuildReport::Loaded { symbols, modules } => {
                    writeln!(out, "source: {}", source.path().display())?;
                    writeln!(out, "modules: {modules}")?;
                    writeln!(out, "symbols: {symbols}")?;
                    if table.addresses_hidden() {
                        writeln!(out, "warning: all addresses are zero (kptr_restrict)")?;
                    }
                }
                BuildReport::Empty => writeln!(out, "no module symbols loaded")?,
                BuildReport::SourceAbsent => {
                    out.flush()?;
                    bail!("{} not present - kernel modules not enabled", source.path().display());
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}
