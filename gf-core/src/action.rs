//! The "open file under cursor" action.
//!
//! The action itself knows nothing about any particular editor. Everything it needs from
//! one (the line under the cursor, the selection, where the current document lives and a
//! way to open a path) comes through the [`Host`] trait, so the same flow drives the
//! language server, the command line tool and the tests.
//!
//! Flow:
//!
//!     1. A non-empty selection is the candidate, verbatim.
//!     2. Otherwise the filename around the cursor is, see [`crate::filename`].
//!     3. The candidate is resolved against the active document's directory.
//!     4. If the path exists the host is asked to open it.
//!
//! A missing file is not an error: it is logged and nothing is opened.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::filename::{candidate_from_selection, filename_around, CandidateOptions};
use crate::resolve::resolve_relative_to;
use crate::word::{WordError, WordSpan};

/// Failure reported by a host while doing what the action asked of it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The host reported a cursor offset outside the current line.
    #[error("invalid cursor position: {0}")]
    Word(#[from] WordError),

    #[error("host failed to open {}: {source}", path.display())]
    Host {
        path: PathBuf,
        #[source]
        source: HostError,
    },
}

/// Editor-side capabilities the action consumes.
pub trait Host {
    /// Full text of the line holding the cursor, without the line break.
    fn current_line_text(&self) -> String;

    /// Char offset of the cursor within [`Host::current_line_text`].
    fn cursor_offset(&self) -> usize;

    /// The current selection, if any.
    fn selected_text(&self) -> Option<String>;

    /// Path (or `file://` URI) of the active document, if it has one.
    fn active_document_location(&self) -> Option<String>;

    /// Open `path` in a new view.
    fn open_path(&self, path: &Path) -> Result<(), HostError>;
}

/// Where a candidate came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Selection,
    Cursor(WordSpan),
}

/// Result of looking for a file without opening it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Nothing under the cursor looked like a filename.
    NoCandidate,
    /// The candidate resolved to a path that does not exist.
    Missing(PathBuf),
    /// The candidate resolved to an existing path.
    Found { path: PathBuf, source: Source },
}

/// Result of running the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoCandidate,
    Missing(PathBuf),
    Opened(PathBuf),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenUnderCursor {
    pub options: CandidateOptions,
}

impl OpenUnderCursor {
    pub fn new(options: CandidateOptions) -> Self {
        Self { options }
    }

    /// Pick a candidate and resolve it, without asking the host to open anything.
    pub fn locate<H: Host + ?Sized>(&self, host: &H) -> Result<Lookup, ActionError> {
        let selection = host.selected_text();
        let (name, source) = match candidate_from_selection(selection.as_deref()) {
            Some(selected) => (selected.to_string(), Source::Selection),
            None => {
                let line = host.current_line_text();
                let cursor = host.cursor_offset();
                match filename_around(&line, cursor, self.options)? {
                    Some(candidate) => (candidate.name, Source::Cursor(candidate.span)),
                    None => {
                        debug!(cursor, "no filename under cursor");
                        return Ok(Lookup::NoCandidate);
                    }
                }
            }
        };
        debug!(candidate = %name, ?source, "picked filename candidate");

        let document = host.active_document_location();
        let path = resolve_relative_to(document.as_deref(), &name);
        if path.exists() {
            Ok(Lookup::Found { path, source })
        } else {
            Ok(Lookup::Missing(path))
        }
    }

    /// Locate the file and, when it exists, open it through the host.
    pub fn run<H: Host + ?Sized>(&self, host: &H) -> Result<Outcome, ActionError> {
        match self.locate(host)? {
            Lookup::NoCandidate => Ok(Outcome::NoCandidate),
            Lookup::Missing(path) => {
                warn!("Couldn't find file '{}', not opening it", path.display());
                Ok(Outcome::Missing(path))
            }
            Lookup::Found { path, .. } => {
                debug!(path = %path.display(), "opening file");
                host.open_path(&path).map_err(|source| ActionError::Host {
                    path: path.clone(),
                    source,
                })?;
                Ok(Outcome::Opened(path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    struct FakeHost {
        line: String,
        cursor: usize,
        selection: Option<String>,
        document: Option<String>,
        opened: RefCell<Vec<PathBuf>>,
        fail_open: bool,
    }

    impl FakeHost {
        fn new(line: &str, cursor: usize, document: Option<String>) -> Self {
            Self {
                line: line.to_string(),
                cursor,
                selection: None,
                document,
                opened: RefCell::new(Vec::new()),
                fail_open: false,
            }
        }

        fn with_selection(mut self, selection: &str) -> Self {
            self.selection = Some(selection.to_string());
            self
        }
    }

    impl Host for FakeHost {
        fn current_line_text(&self) -> String {
            self.line.clone()
        }

        fn cursor_offset(&self) -> usize {
            self.cursor
        }

        fn selected_text(&self) -> Option<String> {
            self.selection.clone()
        }

        fn active_document_location(&self) -> Option<String> {
            self.document.clone()
        }

        fn open_path(&self, path: &Path) -> Result<(), HostError> {
            if self.fail_open {
                return Err(HostError::new("no window"));
            }
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    fn workspace() -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "notes").unwrap();
        fs::write(dir.path().join("my file.txt"), "spaced").unwrap();
        let document = dir.path().join("index.txt").display().to_string();
        (dir, document)
    }

    #[test]
    fn opens_sibling_file_under_cursor() {
        let (dir, document) = workspace();
        let host = FakeHost::new("see notes.txt.", 7, Some(document));

        let outcome = OpenUnderCursor::default().run(&host).unwrap();

        let expected = dir.path().join("notes.txt");
        assert_eq!(outcome, Outcome::Opened(expected.clone()));
        assert_eq!(*host.opened.borrow(), vec![expected]);
    }

    #[test]
    fn selection_takes_priority_and_is_not_split() {
        let (dir, document) = workspace();
        let host = FakeHost::new("see notes.txt", 7, Some(document)).with_selection("my file.txt");

        let lookup = OpenUnderCursor::default().locate(&host).unwrap();

        assert_eq!(
            lookup,
            Lookup::Found {
                path: dir.path().join("my file.txt"),
                source: Source::Selection,
            }
        );
    }

    #[test]
    fn empty_selection_falls_back_to_cursor() {
        let (dir, document) = workspace();
        let host = FakeHost::new("notes.txt", 0, Some(document)).with_selection("");

        let outcome = OpenUnderCursor::default().run(&host).unwrap();
        assert_eq!(outcome, Outcome::Opened(dir.path().join("notes.txt")));
    }

    #[test]
    fn missing_file_is_not_opened() {
        let (dir, document) = workspace();
        let host = FakeHost::new("see absent.txt", 6, Some(document));

        let outcome = OpenUnderCursor::default().run(&host).unwrap();

        assert_eq!(outcome, Outcome::Missing(dir.path().join("absent.txt")));
        assert!(host.opened.borrow().is_empty());
    }

    #[test]
    fn nothing_under_cursor() {
        let host = FakeHost::new("a    b", 3, None);
        let outcome = OpenUnderCursor::default().run(&host).unwrap();
        assert_eq!(outcome, Outcome::NoCandidate);
    }

    #[test]
    fn absolute_candidates_ignore_the_document() {
        let (dir, _) = workspace();
        let absolute = dir.path().join("notes.txt").display().to_string();
        let line = format!("open {absolute}");
        let host = FakeHost::new(&line, 6, Some("/elsewhere/doc.txt".into()));

        let outcome = OpenUnderCursor::default().run(&host).unwrap();
        assert_eq!(outcome, Outcome::Opened(PathBuf::from(absolute)));
    }

    #[test]
    fn bad_cursor_is_reported() {
        let host = FakeHost::new("short", 99, None);
        let err = OpenUnderCursor::default().run(&host).unwrap_err();
        assert_eq!(
            err,
            ActionError::Word(WordError::OutOfRange { index: 99, len: 5 })
        );
    }

    #[test]
    fn host_open_failures_carry_the_path() {
        let (dir, document) = workspace();
        let mut host = FakeHost::new("notes.txt", 2, Some(document));
        host.fail_open = true;

        let err = OpenUnderCursor::default().run(&host).unwrap_err();
        match err {
            ActionError::Host { path, source } => {
                assert_eq!(path, dir.path().join("notes.txt"));
                assert_eq!(source.message, "no window");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
