use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tower_lsp::lsp_types::Url;

pub(crate) const SAMPLE: &str = "Project notes

See notes.txt. for the backlog, and (my notes.md) for drafts.
Build errors land in build.log:12:4
Nothing here  at all.
";

/// A temporary directory holding a document and a few files it mentions.
pub(crate) struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().expect("failed to create workspace");
        for name in ["notes.txt", "my notes.md", "build.log"] {
            fs::write(dir.path().join(name), name).expect("failed to write fixture");
        }
        fs::write(dir.path().join("index.txt"), SAMPLE).expect("failed to write document");
        Self { dir }
    }

    pub(crate) fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub(crate) fn document_uri(&self) -> Url {
        Url::from_file_path(self.path("index.txt")).expect("absolute temp path")
    }
}
