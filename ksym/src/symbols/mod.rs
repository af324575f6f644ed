//! # Kernel Symbol Tables
//!
//! Turns the running kernel's exported symbol list into a per-module index
//! and resolves raw fault addresses against it.
//!
//! ## Data Flow
//!
//! ```text
//! /proc/kallsyms ──▶ SymbolSource ──▶ TableBuilder ──▶ SymbolTable ──▶ lookup()
//!                    (line reader)    (cursor, sort)   (immutable)     (nearest below)
//! ```
//!
//! ## Source Format
//!
//! ```text
//! c0100000 T startup_32
//! f881a000 t cleanup_module [usb_storage]
//! f881a040 t probe_device [usb_storage]
//! ```
//!
//! Symbols without a module bracket belong to the base kernel image and are
//! collected into a module without a name. Once the first bracketed line has
//! been seen, unbracketed lines are skipped.
//!
//! ## Lookup Semantics
//!
//! For an address `A`, each module yields the interval `[last, next)` where
//! `next` is the first symbol above `A`. The result reports
//! `offset = A - last` and `size = next - last`. The smallest offset wins
//! across modules, ties go to the smallest size. An address at or beyond a
//! module's last symbol has no interval in that module.
//!
//! ## Module Structure
//!
//! - **`source`**: line-oriented providers (`/proc/kallsyms`, in-memory text)
//! - **`builder`**: line parsing and module attribution
//! - **`table`**: owned module and symbol storage
//! - **`resolver`**: nearest-symbol lookup and result formatting

pub mod builder;
pub mod resolver;
pub mod source;
pub mod table;

pub use builder::{build_table, parse_line, BuildOptions, BuildOutcome, ParsedLine, TableBuilder};
pub use resolver::{lookup, ResolvedSymbol, MAX_RESOLVED_NAME_LEN};
pub use source::{KallsymsFile, SymbolSource, TextSource, KALLSYMS_PATH};
pub use table::{Module, Symbol, SymbolTable, KERNEL_SPACE};
