//! File under the cursor, for go-to-definition and the open command.
//!
//! A [`DocumentHost`] adapts an open document (its text, the requested position, the
//! optional selection and its URI) to the [`Host`] capability `gf-core` expects. Opening a
//! file cannot happen synchronously over LSP, so `open_path` only queues the path; the
//! server drains the queue and sends `window/showDocument` afterwards.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use gf_core::{ActionError, CandidateOptions, Host, HostError, Lookup, OpenUnderCursor, Source};
use tower_lsp::lsp_types::{Position, Range, Url};

use crate::features::document::{char_index_to_utf16, line_text, utf16_to_char_index};

/// Everything a lookup needs from one request.
#[derive(Debug, Clone, Copy)]
pub struct CursorRequest<'a> {
    pub text: &'a str,
    pub uri: &'a Url,
    pub position: Position,
    pub selection: Option<&'a str>,
}

/// An existing file found under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub path: PathBuf,
    /// Range of the word the name was read from, absent for selections.
    pub origin: Option<Range>,
}

pub struct DocumentHost {
    line_number: u32,
    line: String,
    cursor: usize,
    selection: Option<String>,
    document: Option<String>,
    pending: Mutex<Vec<PathBuf>>,
}

impl DocumentHost {
    pub fn new(request: &CursorRequest<'_>) -> Self {
        let line = line_text(request.text, request.position.line as usize)
            .unwrap_or_default()
            .to_string();
        let cursor = utf16_to_char_index(&line, request.position.character);
        let document = request
            .uri
            .to_file_path()
            .ok()
            .map(|path| path.display().to_string());
        Self {
            line_number: request.position.line,
            line,
            cursor,
            selection: request.selection.map(str::to_string),
            document,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Paths the action asked to open, oldest first.
    pub fn take_pending(&self) -> Vec<PathBuf> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    fn origin(&self, source: &Source) -> Option<Range> {
        match source {
            Source::Selection => None,
            Source::Cursor(span) => Some(Range {
                start: Position::new(self.line_number, char_index_to_utf16(&self.line, span.start)),
                end: Position::new(self.line_number, char_index_to_utf16(&self.line, span.end)),
            }),
        }
    }
}

impl Host for DocumentHost {
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
        self.pending
            .lock()
            .map_err(|_| HostError::new("pending open queue is poisoned"))?
            .push(path.to_path_buf());
        Ok(())
    }
}

/// Resolve the file under the cursor without opening it.
pub fn file_under_cursor(
    request: &CursorRequest<'_>,
    options: CandidateOptions,
) -> Result<Option<FileTarget>, ActionError> {
    let host = DocumentHost::new(request);
    match OpenUnderCursor::new(options).locate(&host)? {
        Lookup::Found { path, source } => Ok(Some(FileTarget {
            origin: host.origin(&source),
            path,
        })),
        Lookup::Missing(_) | Lookup::NoCandidate => Ok(None),
    }
}

/// Run the open action and return the path the client should show, if any.
pub fn open_under_cursor(
    request: &CursorRequest<'_>,
    options: CandidateOptions,
) -> Result<Option<PathBuf>, ActionError> {
    let host = DocumentHost::new(request);
    OpenUnderCursor::new(options).run(&host)?;
    Ok(host.take_pending().pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::Workspace;

    #[test]
    fn finds_sibling_file_with_origin_range() {
        let workspace = Workspace::new();
        let uri = workspace.document_uri();
        let request = CursorRequest {
            text: "intro\nsee notes.txt.\n",
            uri: &uri,
            position: Position::new(1, 6),
            selection: None,
        };

        let target = file_under_cursor(&request, CandidateOptions::default())
            .unwrap()
            .unwrap();

        assert_eq!(target.path, workspace.path("notes.txt"));
        assert_eq!(
            target.origin,
            Some(Range::new(Position::new(1, 4), Position::new(1, 14)))
        );
    }

    #[test]
    fn commas_end_the_name_under_the_cursor() {
        let workspace = Workspace::new();
        let uri = workspace.document_uri();
        let request = CursorRequest {
            text: "notes.txt, build.log",
            uri: &uri,
            position: Position::new(0, 3),
            selection: None,
        };

        let target = file_under_cursor(&request, CandidateOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(target.path, workspace.path("notes.txt"));
        assert_eq!(
            target.origin,
            Some(Range::new(Position::new(0, 0), Position::new(0, 9)))
        );
    }

    #[test]
    fn origin_columns_are_utf16() {
        let workspace = Workspace::new();
        let uri = workspace.document_uri();
        let request = CursorRequest {
            text: "😀 notes.txt",
            uri: &uri,
            position: Position::new(0, 5),
            selection: None,
        };

        let target = file_under_cursor(&request, CandidateOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            target.origin,
            Some(Range::new(Position::new(0, 3), Position::new(0, 12)))
        );
    }

    #[test]
    fn selection_has_no_origin() {
        let workspace = Workspace::new();
        let uri = workspace.document_uri();
        let request = CursorRequest {
            text: "whatever",
            uri: &uri,
            position: Position::new(0, 0),
            selection: Some("my notes.md"),
        };

        let target = file_under_cursor(&request, CandidateOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(target.path, workspace.path("my notes.md"));
        assert_eq!(target.origin, None);
    }

    #[test]
    fn missing_files_resolve_to_nothing() {
        let workspace = Workspace::new();
        let uri = workspace.document_uri();
        let request = CursorRequest {
            text: "see absent.txt",
            uri: &uri,
            position: Position::new(0, 6),
            selection: None,
        };
        assert_eq!(
            file_under_cursor(&request, CandidateOptions::default()).unwrap(),
            None
        );
        assert_eq!(
            open_under_cursor(&request, CandidateOptions::default()).unwrap(),
            None
        );
    }

    #[test]
    fn positions_past_the_line_clamp_to_its_end() {
        let workspace = Workspace::new();
        let uri = workspace.document_uri();
        let request = CursorRequest {
            text: "notes.txt",
            uri: &uri,
            position: Position::new(0, 80),
            selection: None,
        };
        let opened = open_under_cursor(&request, CandidateOptions::default()).unwrap();
        assert_eq!(opened, Some(workspace.path("notes.txt")));
    }

    #[test]
    fn non_file_uris_leave_names_relative() {
        let uri = Url::parse("untitled:Untitled-1").unwrap();
        let host = DocumentHost::new(&CursorRequest {
            text: "notes.txt",
            uri: &uri,
            position: Position::new(0, 0),
            selection: None,
        });
        assert_eq!(host.active_document_location(), None);
    }
}
