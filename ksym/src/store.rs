//! Published symbol table shared between the rebuilding writer and readers
//!
//! A build parses into a fresh table off to the side and swaps it in only
//! when it completes. Readers work on an `Arc` snapshot, so a table being
//! replaced stays alive until its last reader drops it.

use log::{error, info, warn};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::KsymError;
use crate::symbols::{build_table, lookup, BuildOptions, ResolvedSymbol, SymbolSource, SymbolTable};

/// Summary of a completed build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildReport {
    /// Symbols were loaded
    Loaded { symbols: usize, modules: usize },
    /// The source was read but contained no symbols
    Empty,
    /// The source does not exist; the published table is now empty
    SourceAbsent,
}

impl BuildReport {
    /// Boolean outcome for callers that only care whether symbols are usable.
    ///
    /// An empty source still counts as a successful load.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, BuildReport::SourceAbsent)
    }
}

/// Holder of the currently published [`SymbolTable`]
#[derive(Debug, Default)]
pub struct SymbolStore {
    current: RwLock<Arc<SymbolTable>>,
    options: BuildOptions,
}

impl SymbolStore {
    /// Create an empty store
    #[must_use]
    pub fn new(options: BuildOptions) -> Self {
        Self { current: RwLock::new(Arc::new(SymbolTable::empty())), options }
    }

    /// Rebuild the table from `source` and publish it
    ///
    /// An absent source publishes an empty table and is not an error. Any
    /// other failure leaves the previously published table in place.
    ///
    /// # Errors
    /// Returns `SourceOpenFailed`, `Read` or `AllocationFailed`.
    pub fn build(&self, source: &dyn SymbolSource) -> Result<BuildReport, KsymError> {
        let outcome = match build_table(source, self.options) {
            Ok(outcome) => outcome,
            Err(KsymError::SourceAbsent(_)) => {
                info!("No module symbols loaded - kernel modules not enabled.");
                self.publish(SymbolTable::empty());
                return Ok(BuildReport::SourceAbsent);
            }
            Err(e) => {
                error!("Error loading kernel symbols - {e}");
                return Err(e);
            }
        };

        if outcome.table.addresses_hidden() {
            warn!(
                "All {} symbol addresses read as zero; check kernel.kptr_restrict or run as root",
                outcome.symbols
            );
        }

        let report = if outcome.symbols == 0 {
            info!("No module symbols loaded.");
            BuildReport::Empty
        } else {
            info!(
                "Loaded {} {} from {} {}",
                outcome.symbols,
                if outcome.symbols == 1 { "symbol" } else { "symbols" },
                outcome.modules,
                if outcome.modules == 1 { "module." } else { "modules." }
            );
            BuildReport::Loaded { symbols: outcome.symbols, modules: outcome.modules }
        };

        self.publish(outcome.table);
        Ok(report)
    }

    /// Resolve `address` against the published table
    #[must_use]
    pub fn lookup(&self, address: u64) -> Option<ResolvedSymbol> {
        lookup(&self.snapshot(), address)
    }

    /// Discard the published table
    pub fn reset(&self) {
        self.publish(SymbolTable::empty());
    }

    /// The currently published table
    #[must_use]
    pub fn snapshot(&self) -> Arc<SymbolTable> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn publish(&self, table: SymbolTable) {
        let table = Arc::new(table);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = table;
    }
}
