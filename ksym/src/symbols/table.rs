//! In-memory kernel symbol index, partitioned per module
//!
//! A [`SymbolTable`] owns its modules and each [`Module`] owns its symbols.
//! Tables are only ever produced whole by the builder; once built they are
//! never mutated, which lets a published table be shared between readers.

use serde::Serialize;

/// Name shown for the module without a name (the base kernel image)
pub const KERNEL_SPACE: &str = "kernel space";

/// A named address exported by the kernel or a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub address: u64,
}

/// Symbols owned by one loadable module, or by the base kernel when unnamed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Module {
    name: Option<String>,
    symbols: Vec<Symbol>,
}

impl Module {
    pub(crate) fn new(name: Option<&str>) -> Self {
        Self { name: name.map(str::to_string), symbols: Vec::new() }
    }

    /// Module name, `None` for the base kernel
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(KERNEL_SPACE)
    }

    /// Symbols sorted ascending by address once the table is built
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut Vec<Symbol> {
        &mut self.symbols
    }

    /// Stable sort by address; equal addresses keep their source order.
    pub(crate) fn sort_by_address(&mut self) {
        if self.symbols.len() < 2 {
            return;
        }
        self.symbols.sort_by_key(|sym| sym.address);
    }
}

/// Per-module sorted symbol index of the running kernel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolTable {
    modules: Vec<Module>,
}

impl SymbolTable {
    /// An empty table, the state before the first build and after a reset
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_modules(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Total number of symbols across all modules
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.modules.iter().map(Module::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// True when symbols were loaded but every address reads as zero.
    ///
    /// `/proc/kallsyms` reports zeroed addresses to readers that
    /// `kptr_restrict` hides them from; such a table resolves nothing.
    #[must_use]
    pub fn addresses_hidden(&self) -> bool {
        self.symbol_count() > 0
            && self.modules.iter().flat_map(Module::symbols).all(|sym| sym.address == 0)
    }

    /// Find a module by name; `None` looks up the base kernel module.
    ///
    /// Returns the first match when non-contiguous source runs produced
    /// several modules with the same name.
    #[must_use]
    pub fn module(&self, name: Option<&str>) -> Option<&Module> {
        self.modules.iter().find(|m| m.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str, address: u64) -> Symbol {
        Symbol { name: name.to_string(), address }
    }

    #[test]
    fn test_sort_is_stable_for_equal_addresses() {
        let mut module = Module::new(Some("usb_storage"));
        module.symbols_mut().extend([sym("c", 0x30), sym("a", 0x10), sym("b1", 0x20), sym("b2", 0x20)]);
        module.sort_by_address();

        let names: Vec<&str> = module.symbols().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b1", "b2", "c"]);
    }

    #[test]
    fn test_counts_and_display_name() {
        let mut kernel = Module::new(None);
        kernel.symbols_mut().push(sym("startup_32", 0xc010_0000));
        let mut usb = Module::new(Some("usb_storage"));
        usb.symbols_mut().extend([sym("cleanup_module", 0xf881_a000), sym("probe_device", 0xf881_a040)]);

        let table = SymbolTable::from_modules(vec![kernel, usb]);
        assert_eq!(table.module_count(), 2);
        assert_eq!(table.symbol_count(), 3);
        assert_eq!(table.modules()[0].display_name(), KERNEL_SPACE);
        assert_eq!(table.module(Some("usb_storage")).map(Module::len), Some(2));
        assert!(table.module(Some("missing")).is_none());
    }

    #[test]
    fn test_addresses_hidden() {
        let mut kernel = Module::new(None);
        kernel.symbols_mut().extend([sym("a", 0), sym("b", 0)]);
        assert!(SymbolTable::from_modules(vec![kernel]).addresses_hidden());

        assert!(!SymbolTable::empty().addresses_hidden());
    }
}
