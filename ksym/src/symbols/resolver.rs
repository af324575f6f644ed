//! Nearest-symbol-below lookups against a built [`SymbolTable`]
//!
//! Every module is scanned forward for the first symbol above the target
//! address. The symbol before it opens the enclosing interval. Across modules
//! the candidate with the smallest offset wins, and equal offsets go to the
//! smallest interval, so all modules are always visited.

use std::fmt;

use super::table::{Module, SymbolTable};

/// Longest formatted name a lookup returns; longer names are cut silently
pub const MAX_RESOLVED_NAME_LEN: usize = 99;

/// Result of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSymbol {
    /// `module:symbol`, or just `symbol` for the base kernel
    pub name: String,
    /// Distance from the symbol's address to the looked-up address
    pub offset: u64,
    /// Distance from the symbol to the next symbol in the same module
    pub size: u64,
}

impl fmt::Display for ResolvedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+0x{:x}/0x{:x}", self.name, self.offset, self.size)
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    module: &'a Module,
    symbol_index: usize,
    offset: u64,
    size: u64,
}

impl Candidate<'_> {
    fn is_tighter_than(&self, other: &Candidate<'_>) -> bool {
        self.offset < other.offset || (self.offset == other.offset && self.size < other.size)
    }
}

/// Find the interval of `module` enclosing `address`
///
/// Returns `None` when no symbol lies above the address, or when the address
/// is below the module's first symbol.
fn module_candidate(module: &Module, address: u64) -> Option<Candidate<'_>> {
    let symbols = module.symbols();
    let (index, next) = symbols.iter().enumerate().skip(1).find(|(_, sym)| sym.address > address)?;

    let last = &symbols[index - 1];
    if last.address > address {
        return None;
    }

    Some(Candidate {
        module,
        symbol_index: index - 1,
        offset: address - last.address,
        size: next.address - last.address,
    })
}

/// Resolve `address` to the nearest symbol at or below it
///
/// Returns `None` when no module has an interval enclosing the address; that
/// is the common outcome for addresses outside every module.
#[must_use]
pub fn lookup(table: &SymbolTable, address: u64) -> Option<ResolvedSymbol> {
    let mut best: Option<Candidate<'_>> = None;

    for module in table.modules() {
        let Some(candidate) = module_candidate(module, address) else {
            continue;
        };
        if best.as_ref().is_none_or(|current| candidate.is_tighter_than(current)) {
            best = Some(candidate);
        }
    }

    let best = best?;
    let symbol = &best.module.symbols()[best.symbol_index];
    let name = match best.module.name() {
        Some(module) => format!("{module}:{}", symbol.name),
        None => symbol.name.clone(),
    };

    Some(ResolvedSymbol { name: truncate_name(name), offset: best.offset, size: best.size })
}

fn truncate_name(mut name: String) -> String {
    if name.len() > MAX_RESOLVED_NAME_LEN {
        let mut end = MAX_RESOLVED_NAME_LEN;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    name
}
