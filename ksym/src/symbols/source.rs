//! Line-oriented providers of the kernel's exported symbol list

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use crate::domain::KsymError;

/// Default location of the running kernel's symbol list
pub const KALLSYMS_PATH: &str = "/proc/kallsyms";

/// A readable, line-oriented symbol source
///
/// Implementations must report a missing source as
/// [`KsymError::SourceAbsent`] and any other open failure as
/// [`KsymError::SourceOpenFailed`].
pub trait SymbolSource {
    /// Human readable name used in diagnostics
    fn name(&self) -> String;

    /// Open the source for reading
    ///
    /// # Errors
    /// Returns `SourceAbsent` or `SourceOpenFailed`
    fn open(&self) -> Result<Box<dyn BufRead + '_>, KsymError>;
}

/// Symbol list backed by a file, normally `/proc/kallsyms`
#[derive(Debug, Clone)]
pub struct KallsymsFile {
    path: PathBuf,
}

impl KallsymsFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for KallsymsFile {
    fn default() -> Self {
        Self::new(KALLSYMS_PATH)
    }
}

impl SymbolSource for KallsymsFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>, KsymError> {
        match File::open(&self.path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(KsymError::SourceAbsent(self.name())),
            Err(e) => Err(KsymError::SourceOpenFailed { source_name: self.name(), source: e }),
        }
    }
}

/// Symbol list held in memory, for callers that already have the text
#[derive(Debug, Clone, Default)]
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    /// Join individual lines into one source
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push('\n');
        }
        Self { text }
    }
}

impl SymbolSource for TextSource {
    fn name(&self) -> String {
        "<memory>".to_string()
    }

    fn open(&self) -> Result<Box<dyn BufRead + '_>, KsymError> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }
}

/// Read one line, dropping a single trailing newline
///
/// Returns `Ok(None)` at end of input. Invalid UTF-8 is replaced rather than
/// failing the whole build, since the content comes from the kernel.
pub(crate) fn read_line(reader: &mut dyn BufRead, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}
