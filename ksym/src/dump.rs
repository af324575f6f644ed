//! Human readable and JSON dumps of a built symbol table

use anyhow::{Context, Result};
use std::io::Write;

use crate::symbols::SymbolTable;

/// Write every module and symbol of `table` as indented text
///
/// # Errors
/// Returns an error if writing to `out` fails
pub fn write_text<W: Write>(table: &SymbolTable, mut out: W) -> Result<()> {
    writeln!(out, "Number of modules: {}\n", table.module_count())?;

    for (idx, module) in table.modules().iter().enumerate() {
        writeln!(
            out,
            "Module #{} = {}, Number of symbols = {}",
            idx + 1,
            module.display_name(),
            module.len()
        )?;

        for (sym_idx, sym) in module.symbols().iter().enumerate() {
            writeln!(out, "\tSymbol #{}", sym_idx + 1)?;
            writeln!(out, "\tName: {}", sym.name)?;
            writeln!(out, "\tAddress: {:x}\n", sym.address)?;
        }
    }

    Ok(())
}

/// Serialize `table` as pretty-printed JSON
///
/// # Errors
/// Returns an error if serialization or writing fails
pub fn write_json<W: Write>(table: &SymbolTable, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, table).context("Failed to serialize symbol table")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{build_table, BuildOptions, TextSource};

    fn sample() -> SymbolTable {
        let source = TextSource::from_lines([
            "c0100000 T startup_32",
            "f881a040 t probe_device [usb_storage]",
            "f881a000 t cleanup_module [usb_storage]",
        ]);
        build_table(&source, BuildOptions::default()).unwrap().table
    }

    #[test]
    fn test_text_dump() {
        let mut out = Vec::new();
        write_text(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Number of modules: 2\n"));
        assert!(text.contains("Module #1 = kernel space, Number of symbols = 1"));
        assert!(text.contains("Module #2 = usb_storage, Number of symbols = 2"));
        assert!(text.contains("\tAddress: f881a000\n"));

        // Sorted: cleanup_module comes before probe_device
        let cleanup = text.find("cleanup_module").unwrap();
        let probe = text.find("probe_device").unwrap();
        assert!(cleanup < probe);
    }

    #[test]
    fn test_json_dump() {
        let mut out = Vec::new();
        write_json(&sample(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let modules = value["modules"].as_array().unwrap();
        assert_eq!(modules.len(), 2);
        assert!(modules[0]["name"].is_null());
        assert_eq!(modules[1]["name"], "usb_storage");
        assert_eq!(modules[1]["symbols"][0]["address"], 0xf881_a000_u64);
    }
}
