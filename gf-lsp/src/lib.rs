//! Language Server Protocol (LSP) host for gf
//!
//!     Exposes "open the file named under the cursor" to any LSP-compatible editor (VSCode,
//!     Neovim, Emacs, Helix, ...) without a per-editor plugin.
//!
//! Features
//!
//!     1. Go to Definition (textDocument/definition):
//!         - The word under the cursor is read with the filename separators, a trailing "."
//!           dropped, and resolved against the document's directory.
//!         - An existing file yields a location at its first line. When the client supports
//!           location links, the link's origin range covers the word.
//!         - Anything else yields null, so the editor falls back to its own behaviour.
//!
//!     2. Open Under Cursor (workspace/executeCommand "gf.openUnderCursor"):
//!         - Arguments: `[{ "uri": ..., "position": ..., "selection": "optional" }]`.
//!         - A non-empty selection is used verbatim instead of the cursor word.
//!         - An existing file is opened through window/showDocument. The command returns
//!           whether the client showed it.
//!
//! Architecture
//!
//!     LSP Layer (tower-lsp):
//!         - JSON-RPC, capability negotiation, request routing.
//!
//!     Server Layer ([`server`]):
//!         - Keeps the full text of open documents.
//!         - Very thin, mostly calls the feature layer. Talks to the client through
//!           [`server::LspClient`] so tests can record what would be sent.
//!
//!     Feature Layer ([`features`]):
//!         - Adapts a document and position to `gf_core::Host` and runs the action.
//!         - UTF-16 to char column conversion lives here.
//!
//! Usage
//!
//!     $ gf-lsp
//!     Starts the language server on stdin/stdout. `GF_CONFIG` names an optional TOML file
//!     layered over the built-in defaults, `RUST_LOG` overrides the log filter.

pub mod features;
pub mod server;

pub use server::GfLanguageServer;
