//! # ksym - Kernel Module Symbol Resolution
//!
//! ksym resolves raw addresses reported in kernel faults and diagnostic
//! messages to the nearest symbol exported by the running kernel and its
//! loaded modules. A log daemon uses it to annotate opaque hexadecimal
//! addresses with `module:symbol+offset/size`.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 /proc/kallsyms (running kernel)                 │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ lines: <addr> <type> <name> [module]
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       ksym (This Crate)                         │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │  │ SymbolSource │──▶│ TableBuilder │──▶│ SymbolStore  │         │
//! │  │ (line reader)│   │ (per module) │   │ (publish/Arc)│         │
//! │  └──────────────┘   └──────────────┘   └──────┬───────┘         │
//! │                                               │                 │
//! │                                               ▼                 │
//! │                                        ┌──────────────┐         │
//! │                                        │   Resolver   │         │
//! │                                        │ (nearest sym)│         │
//! │                                        └──────────────┘         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`symbols`]: symbol sources, table building, storage and lookups
//! - [`store`]: the published table shared by a rebuilding writer and readers
//! - [`domain`]: addresses and structured errors
//! - [`dump`]: text and JSON dumps of a table
//! - [`preflight`]: checks that warn when kallsyms will hide addresses
//! - [`cli`]: command-line argument parsing
//!
//! ## Typical Usage
//!
//! ```rust,no_run
//! use ksym::store::SymbolStore;
//! use ksym::symbols::{BuildOptions, KallsymsFile};
//!
//! let store = SymbolStore::new(BuildOptions::default());
//! store.build(&KallsymsFile::default())?;
//!
//! if let Some(resolved) = store.lookup(0xffff_ffff_c0a1_b042) {
//!     println!("{resolved}"); // usb_storage:probe_device+0x2/0x40
//! }
//! # Ok::<(), ksym::domain::KsymError>(())
//! ```

pub mod cli;
pub mod domain;
pub mod dump;
pub mod preflight;
pub mod store;
pub mod symbols;
