//! Building a [`SymbolTable`] from a kallsyms-style symbol list
//!
//! Each line has the shape `<hex-address> <type> <name>[ [<module>]]`.
//! Lines are attributed to a module through a "current module" cursor: a new
//! [`Module`] starts whenever the module name differs from the previous line's.
//! The kernel lists each module's symbols contiguously, so runs for the same
//! name are never merged by name; an interleaved source produces duplicate
//! modules.
//!
//! Parsing is permissive. A line without a space is skipped, and an address
//! field that is not valid hexadecimal reads as its leading hex digits (zero
//! when there are none) instead of failing the build.

use log::{debug, warn};

use super::source::{read_line, SymbolSource};
use super::table::{Module, Symbol, SymbolTable};
use crate::domain::KsymError;

/// Knobs for a table build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Skip every line without a module bracket, for callers that already
    /// hold the base kernel's symbols from a static map
    pub skip_base_kernel: bool,
}

/// A freshly built table plus its summary counts
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub table: SymbolTable,
    pub symbols: usize,
    pub modules: usize,
    pub skipped_lines: usize,
}

/// Fields of one source line, borrowed from the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    pub address: u64,
    pub name: &'a str,
    pub module: Option<&'a str>,
}

/// Split a source line into address, symbol name and optional module
///
/// Returns `None` when the line has no space, or is too short to carry the
/// one-character type field after the address.
#[must_use]
pub fn parse_line(line: &str) -> Option<ParsedLine<'_>> {
    let (symbol_part, module) = match line.find('[') {
        Some(open) => {
            let rest = &line[open + 1..];
            let module = rest.find(']').map_or(rest, |close| &rest[..close]);
            (line[..open].trim_end(), Some(module))
        }
        None => (line, None),
    };

    let space = symbol_part.find(' ')?;
    let address = parse_hex_prefix(&symbol_part[..space]);
    // Skip the separator, the type character and the space after it.
    let name = symbol_part.get(space + 3..)?;

    Some(ParsedLine { address, name, module })
}

/// Parse the leading hexadecimal digits of `field`
///
/// Accepts an optional `0x` prefix. No digits yields zero and an overflowing
/// value saturates at `u64::MAX`.
#[must_use]
pub fn parse_hex_prefix(field: &str) -> u64 {
    let field = field.trim_start();
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_hexdigit()))
        .unwrap_or(field);

    let end = digits.find(|c: char| !c.is_ascii_hexdigit()).unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }
    u64::from_str_radix(&digits[..end], 16).unwrap_or(u64::MAX)
}

/// Incremental table builder
///
/// Feed lines with [`TableBuilder::push_line`] and call
/// [`TableBuilder::finish`] to sort each module. The builder never touches a
/// published table; a failed build simply drops the partial one.
#[derive(Debug, Default)]
pub struct TableBuilder {
    options: BuildOptions,
    modules: Vec<Module>,
    seen_module_symbol: bool,
    skipped_lines: usize,
}

impl TableBuilder {
    #[must_use]
    pub fn new(options: BuildOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Add the symbol described by `line`
    ///
    /// Returns `Ok(false)` when the line was skipped.
    ///
    /// # Errors
    /// Returns `AllocationFailed` if the module list or a symbol array
    /// cannot grow.
    pub fn push_line(&mut self, line: &str) -> Result<bool, KsymError> {
        // Once module data shows up, lines without a module are base kernel
        // symbols listed after the modules and are not wanted.
        if (self.seen_module_symbol || self.options.skip_base_kernel) && !line.contains('[') {
            self.skipped_lines += 1;
            return Ok(false);
        }

        let Some(parsed) = parse_line(line) else {
            debug!("Skipping malformed symbol line: {line:?}");
            self.skipped_lines += 1;
            return Ok(false);
        };

        self.push_symbol(parsed)?;
        Ok(true)
    }

    fn push_symbol(&mut self, parsed: ParsedLine<'_>) -> Result<(), KsymError> {
        if parsed.module.is_some() {
            self.seen_module_symbol = true;
        }

        let module = self.current_module(parsed.module)?;
        let symbols = module.symbols_mut();
        symbols.try_reserve(1).map_err(|_| {
            warn!("Cannot allocate symbol array for {}", module_label(parsed.module));
            KsymError::AllocationFailed("symbol array")
        })?;
        symbols.push(Symbol { name: parsed.name.to_string(), address: parsed.address });

        Ok(())
    }

    /// The module the next symbol goes to, starting a new one when the
    /// module name differs from the previous line's
    fn current_module(&mut self, name: Option<&str>) -> Result<&mut Module, KsymError> {
        let continues = self.modules.last().is_some_and(|last| last.name() == name);
        if !continues {
            self.modules.try_reserve(1).map_err(|_| {
                warn!("Cannot allocate Module array.");
                KsymError::AllocationFailed("module array")
            })?;
            self.modules.push(Module::new(name));
        }

        self.modules.last_mut().ok_or(KsymError::AllocationFailed("module array"))
    }

    /// Sort every module by address and hand back the finished table
    #[must_use]
    pub fn finish(self) -> BuildOutcome {
        let mut modules = self.modules;
        for module in &mut modules {
            module.sort_by_address();
        }

        let table = SymbolTable::from_modules(modules);
        BuildOutcome {
            symbols: table.symbol_count(),
            modules: table.module_count(),
            skipped_lines: self.skipped_lines,
            table,
        }
    }
}

fn module_label(name: Option<&str>) -> &str {
    name.unwrap_or(super::table::KERNEL_SPACE)
}

/// Build a table from every line of `source`
///
/// # Errors
/// Returns `SourceAbsent`/`SourceOpenFailed` from opening the source,
/// `Read` if streaming it fails, or `AllocationFailed`.
pub fn build_table(source: &dyn SymbolSource, options: BuildOptions) -> Result<BuildOutcome, KsymError> {
    let mut reader = source.open()?;
    debug!("Loading kernel module symbols - Source: {}", source.name());

    let mut builder = TableBuilder::new(options);
    let mut buf = Vec::with_capacity(128);
    while let Some(line) = read_line(&mut *reader, &mut buf)? {
        builder.push_line(&line)?;
    }

    Ok(builder.finish())
}
