//! Core of the `gf` action: open the file named under the cursor.
//!
//!     The layers, bottom up:
//!
//!         - [`word`]: split a line into words and find the one around a char index.
//!         - [`filename`]: the same with filename separators, plus trailing dot trimming.
//!         - [`resolve`]: anchor a relative name at the active document's directory.
//!         - [`action`]: tie it together over an editor supplied [`Host`].
//!
//!     The first three are pure functions over their arguments. Only [`action`] touches the
//!     filesystem (an existence check) and logs.

pub mod action;
pub mod filename;
pub mod resolve;
pub mod word;

pub use action::{ActionError, Host, HostError, Lookup, OpenUnderCursor, Outcome, Source};
pub use filename::{candidate_from_selection, filename_around, Candidate, CandidateOptions};
pub use resolve::resolve_relative_to;
pub use word::{
    find_span_around, find_word_around, trim_trailing_dot, word_spans, SeparatorSet, WordError,
    WordSpan,
};
