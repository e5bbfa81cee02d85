//! Scan logic: find unreplaced aggregate allocas in LLVM IR output.
//!
//! This crate is designed to be I/O-free and highly testable; the only
//! filesystem touchpoint is [`scan_file`], which reads the input and hands
//! it to the pure [`scan_text`].

use std::fmt;
use std::path::Path;

/// The substring that marks a leftover aggregate alloca. A scalar
/// replacement pass that ran to completion leaves none of these behind.
pub const FORBIDDEN: &str = "alloca %struct.";

/// One offending line in the scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    /// 1-based line number.
    pub line: u32,
    /// Full text of the line, untrimmed.
    pub content: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transformation failed for {}:{}: {}",
            self.path, self.line, self.content
        )
    }
}

/// Result of scanning one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Diagnostics in ascending line order, one per offending line.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of line segments inspected, trailing empty segment included.
    pub lines_scanned: u32,
}

impl ScanOutcome {
    pub fn passed(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Scan `text` for lines containing [`FORBIDDEN`].
///
/// Splits on `'\n'` (a trailing newline yields one extra empty segment,
/// which can never match). Lines are indexed from 0 internally and reported
/// 1-based. A line with multiple occurrences yields a single diagnostic.
pub fn scan_text(path: &str, text: &str) -> ScanOutcome {
    let mut diagnostics = Vec::new();
    let mut lines_scanned: u32 = 0;

    for (idx, line) in text.split('\n').enumerate() {
        lines_scanned = lines_scanned.saturating_add(1);

        if line.contains(FORBIDDEN) {
            diagnostics.push(Diagnostic {
                path: path.to_string(),
                line: (idx as u32).saturating_add(1),
                content: line.to_string(),
            });
        }
    }

    ScanOutcome {
        diagnostics,
        lines_scanned,
    }
}

/// Read the file at `path` and scan it.
///
/// The file handle is released before this returns, on success or error.
pub fn scan_file(path: &Path) -> Result<ScanOutcome, ScanError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: display.clone(),
        source,
    })?;

    Ok(scan_text(&display, &text))
}
