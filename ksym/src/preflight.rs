//! Pre-flight checks for ksym
//!
//! Validates that the symbol source is usable before building a table.
//! Provides clear, actionable messages when addresses will be hidden.

#![allow(unsafe_code)] // geteuid() requires unsafe

use anyhow::{bail, Result};
use log::warn;
use std::path::Path;

/// Sysctl controlling whether kernel addresses are shown to readers
const KPTR_RESTRICT_PATH: &str = "/proc/sys/kernel/kptr_restrict";

/// Run all pre-flight checks before building the table
///
/// A missing source is only a warning: kernels without loadable module
/// support have no symbol list and the build treats that as empty.
///
/// # Errors
/// Returns an error if the source path exists but is not a regular file
pub fn run_preflight_checks(source_path: &Path, quiet: bool) -> Result<()> {
    if !check_source_exists(source_path)? {
        if !quiet {
            warn!("{} not found, module symbols will be unavailable", source_path.display());
        }
        return Ok(());
    }

    if quiet {
        return Ok(());
    }

    if let Some(reason) = hidden_address_reason(is_root(), read_kptr_restrict()) {
        warn!("{reason}");
    }
    Ok(())
}

/// Check whether the source exists and is a readable kind of file
fn check_source_exists(source_path: &Path) -> Result<bool> {
    if !source_path.exists() {
        return Ok(false);
    }
    if source_path.is_dir() {
        bail!(
            "Not a file: {}\n\n\
             --source must point to a kallsyms-format file, not a directory.",
            source_path.display()
        );
    }
    Ok(true)
}

fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Current `kernel.kptr_restrict` value, `None` when unavailable
#[must_use]
pub fn read_kptr_restrict() -> Option<u32> {
    std::fs::read_to_string(KPTR_RESTRICT_PATH).ok().and_then(|s| s.trim().parse().ok())
}

/// Explain why kallsyms will report zero addresses, if it will
///
/// `kptr_restrict=1` hides addresses from readers without `CAP_SYSLOG`,
/// `2` hides them from everyone.
#[must_use]
pub fn hidden_address_reason(is_root: bool, kptr_restrict: Option<u32>) -> Option<String> {
    match kptr_restrict {
        Some(2) => Some(
            "kernel.kptr_restrict=2: all symbol addresses read as zero, lookups will not resolve"
                .to_string(),
        ),
        Some(1) if !is_root => Some(
            "kernel.kptr_restrict=1 and not running as root: symbol addresses read as zero.\n\n\
             Run with: sudo ksym ..."
                .to_string(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_is_not_an_error() {
        let result = run_preflight_checks(Path::new("/nonexistent/path/to/kallsyms"), true);
        assert!(result.is_ok());
    }

    #[test]
    fn test_directory_source_rejected() {
        let result = check_source_exists(Path::new("/"));
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Not a file"));
    }

    #[test]
    fn test_hidden_address_reason() {
        assert!(hidden_address_reason(true, Some(2)).is_some());
        assert!(hidden_address_reason(false, Some(1)).is_some());
        assert!(hidden_address_reason(true, Some(1)).is_none());
        assert!(hidden_address_reason(false, Some(0)).is_none());
        assert!(hidden_address_reason(false, None).is_none());
    }

    #[test]
    fn test_kptr_restrict_read() {
        // Depends on the host; only ensure it doesn't panic
        let _ = read_kptr_restrict();
    }
}
