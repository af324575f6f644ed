//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Address;
use crate::symbols::{BuildOptions, KALLSYMS_PATH};

#[derive(Parser, Debug)]
#[command(
    name = "ksym",
    about = "Resolve kernel fault addresses to module symbols",
    after_help = "\
EXAMPLES:
    sudo ksym lookup ffffffffc0a1b042         Resolve one address
    sudo ksym dump --json > symbols.json      Export the module symbol table
    ksym --source ./kallsyms.txt lookup 0x220 Resolve against a saved symbol list"
)]
pub struct Args {
    /// Symbol list to load (kallsyms format)
    #[arg(long, value_name = "PATH", default_value = KALLSYMS_PATH, global = true)]
    pub source: PathBuf,

    /// Ignore base kernel symbols, keep only module symbols
    #[arg(long, global = true)]
    pub skip_base_kernel: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every module and symbol of the loaded table
    Dump {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve addresses to `module:symbol+offset/size`
    Lookup {
        /// Hexadecimal addresses, with or without 0x
        #[arg(value_name = "ADDR", required = true)]
        addresses: Vec<Address>,
    },

    /// Load the table and report what was found
    Check,
}

impl Args {
    #[must_use]
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions { skip_base_kernel: self.skip_base_kernel }
    }
}
