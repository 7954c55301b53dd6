//! A [`Host`] over a document on disk.
//!
//! The command line has no editor behind it: the "active document" is the file named on
//! the command line, the cursor is a line/column pair, and opening a path means printing
//! it for the calling script to act on.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gf_core::{Host, HostError};

pub struct FileHost {
    document: PathBuf,
    line: String,
    column: usize,
    selection: Option<String>,
    opened: RefCell<Vec<PathBuf>>,
}

impl FileHost {
    /// Read `line` (0-based) of `document`. Lines past the end read as empty.
    pub fn load(document: &Path, line: usize, column: usize) -> Result<Self> {
        let text = fs::read_to_string(document)
            .with_context(|| format!("failed to read {}", document.display()))?;
        let line = text
            .lines()
            .nth(line)
            .unwrap_or_default()
            .to_string();
        Ok(Self {
            document: document.to_path_buf(),
            line,
            column,
            selection: None,
            opened: RefCell::new(Vec::new()),
        })
    }

    pub fn with_selection(mut self, selection: Option<String>) -> Self {
        self.selection = selection;
        self
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

impl Host for FileHost {
    fn current_line_text(&self) -> String {
        self.line.clone()
    }

    fn cursor_offset(&self) -> usize {
        self.column
    }

    fn selected_text(&self) -> Option<String> {
        self.selection.clone()
    }

    fn active_document_location(&self) -> Option<String> {
        Some(self.document.display().to_string())
    }

    fn open_path(&self, path: &Path) -> Result<(), HostError> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
