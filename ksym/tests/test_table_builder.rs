use ksym::domain::KsymError;
use ksym::symbols::{build_table, BuildOptions, KallsymsFile, TextSource};
use std::io::Write;

const KALLSYMS_SAMPLE: &str = "\
ffffffff81000000 T _stext
ffffffff81000000 T _text
ffffffff81001000 T do_one_initcall
ffffffffc0a1b040 t probe_device\t[usb_storage]
ffffffffc0a1b000 t cleanup_module\t[usb_storage]
ffffffffc0a1b100 t usb_stor_control_thread\t[usb_storage]
ffffffff81002000 T late_kernel_sym
ffffffffc0b00000 t e1000_probe\t[e1000]
ffffffffc0b00400 t e1000_remove\t[e1000]
";

fn write_source(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(text.as_bytes()).expect("Failed to write temp file");
    file
}

#[test]
fn test_build_from_file() {
    let file = write_source(KALLSYMS_SAMPLE);
    let outcome = build_table(&KallsymsFile::new(file.path()), BuildOptions::default()).unwrap();

    assert_eq!(outcome.modules, 3);
    assert_eq!(outcome.symbols, 8);
    assert_eq!(outcome.skipped_lines, 1);

    let names: Vec<Option<&str>> = outcome.table.modules().iter().map(|m| m.name()).collect();
    assert_eq!(names, [None, Some("usb_storage"), Some("e1000")]);
}

#[test]
fn test_modules_sorted_by_address() {
    let file = write_source(KALLSYMS_SAMPLE);
    let outcome = build_table(&KallsymsFile::new(file.path()), BuildOptions::default()).unwrap();

    for module in outcome.table.modules() {
        for pair in module.symbols().windows(2) {
            assert!(pair[0].address <= pair[1].address, "{} is not sorted", module.display_name());
        }
    }

    let usb = outcome.table.module(Some("usb_storage")).unwrap();
    assert_eq!(usb.symbols()[0].name, "cleanup_module");
}

#[test]
fn test_equal_addresses_keep_source_order() {
    let file = write_source(KALLSYMS_SAMPLE);
    let outcome = build_table(&KallsymsFile::new(file.path()), BuildOptions::default()).unwrap();

    let kernel = outcome.table.module(None).unwrap();
    let names: Vec<&str> = kernel.symbols().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["_stext", "_text", "do_one_initcall"]);
}

#[test]
fn test_rebuild_is_idempotent() {
    let file = write_source(KALLSYMS_SAMPLE);
    let source = KallsymsFile::new(file.path());

    let first = build_table(&source, BuildOptions::default()).unwrap();
    let second = build_table(&source, BuildOptions::default()).unwrap();
    assert_eq!(first.table, second.table);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let source = TextSource::from_lines([
        "no-space-here",
        "",
        "00000100 T base_sym",
        "00000200 t mod_a_sym [modA]",
        "00000300",
    ]);
    let outcome = build_table(&source, BuildOptions::default()).unwrap();

    assert_eq!(outcome.symbols, 2);
    assert_eq!(outcome.skipped_lines, 3);
}

#[test]
fn test_missing_file_is_source_absent() {
    let dir = tempfile::tempdir().unwrap();
    let source = KallsymsFile::new(dir.path().join("kallsyms"));

    let err = build_table(&source, BuildOptions::default()).unwrap_err();
    assert!(matches!(err, KsymError::SourceAbsent(_)));
}

#[test]
fn test_unreadable_source_is_an_error() {
    // A directory opens on Linux but fails to read.
    let dir = tempfile::tempdir().unwrap();
    let source = KallsymsFile::new(dir.path());

    let err = build_table(&source, BuildOptions::default()).unwrap_err();
    assert!(!err.is_source_absent());
}
