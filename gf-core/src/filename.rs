//! Filename candidates from a cursor position or a selection.

use crate::word::{find_span_around, trim_trailing_dot, SeparatorSet, WordError, WordSpan};

/// Knobs for turning a word into a filename candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateOptions {
    pub trim_trailing_dot: bool,
}

impl Default for CandidateOptions {
    fn default() -> Self {
        Self {
            trim_trailing_dot: true,
        }
    }
}

/// A filename picked out of a line, with the span it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub span: WordSpan,
}

/// The filename around `index`, using [`SeparatorSet::filename`].
pub fn filename_around(
    line: &str,
    index: usize,
    options: CandidateOptions,
) -> Result<Option<Candidate>, WordError> {
    let Some(span) = find_span_around(line, index, &SeparatorSet::filename())? else {
        return Ok(None);
    };

    let word = span.text(line);
    let name = if options.trim_trailing_dot {
        trim_trailing_dot(word)
    } else {
        word
    };
    if name.is_empty() {
        return Ok(None);
    }

    Ok(Some(Candidate {
        name: name.to_string(),
        span,
    }))
}

/// A selection is taken verbatim. Empty selections mean "use the cursor instead".
pub fn candidate_from_selection(selection: Option<&str>) -> Option<&str> {
    selection.filter(|text| !text.is_empty())
}
