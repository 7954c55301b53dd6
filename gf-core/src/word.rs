//! Word extraction around a character index
//!
//!     A line is partitioned into spans: maximal runs of characters that are not in the
//!     separator set. The word "around" an index is the first span, scanning left to right,
//!     whose inclusive range `start..=end` holds the index. That makes both the first
//!     character of a word and the caret position just past its last character count as
//!     being on the word:
//!
//!         " The"  indices 1, 2, 3 and 4 all give "The", index 0 gives nothing.
//!
//!     When a single separator sits between two words, the word on its left wins. An index
//!     inside a run of two or more separators touches no word and yields `None`.
//!
//!     Indices count chars, not bytes, so they line up with what an editor reports as a
//!     column. Out of range indices are a caller bug and are reported as
//!     [`WordError::OutOfRange`] rather than clamped.

use std::ops::Range as ByteRange;

use thiserror::Error;

/// Errors raised by the word scanner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    /// The index lies past the end-of-line caret position.
    #[error("index {index} is out of range for a line of {len} characters")]
    OutOfRange { index: usize, len: usize },
}

/// Characters that may not appear inside a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    whitespace: bool,
    chars: Vec<char>,
}

/// Characters likely to surround a filename in prose or tool output.
///
/// These are not the characters an OS forbids in a filename, only those more often found
/// before or after one than inside it.
const FILENAME_PUNCTUATION: [char; 9] = ['"', ',', ':', '(', ')', '[', ']', '{', '}'];

/// ASCII information separators (FS, GS, RS, US). `char::is_whitespace` leaves them out, but
/// regex `\s` classes count them, and so do we.
const INFORMATION_SEPARATORS: std::ops::RangeInclusive<char> = '\u{1c}'..='\u{1f}';

impl SeparatorSet {
    /// Any Unicode whitespace, plus the ASCII information separators U+001C to U+001F.
    pub fn whitespace() -> Self {
        Self {
            whitespace: true,
            chars: Vec::new(),
        }
    }

    /// Whitespace plus `" , : ( ) [ ] { }`.
    pub fn filename() -> Self {
        Self {
            whitespace: true,
            chars: FILENAME_PUNCTUATION.to_vec(),
        }
    }

    /// Exactly the given characters, whitespace not included.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            whitespace: false,
            chars: chars.into_iter().collect(),
        }
    }

    /// Also treat every whitespace character as a separator.
    pub fn with_whitespace(mut self) -> Self {
        self.whitespace = true;
        self
    }

    pub fn contains(&self, ch: char) -> bool {
        (self.whitespace && is_whitespace(ch)) || self.chars.contains(&ch)
    }
}

fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace() || INFORMATION_SEPARATORS.contains(&ch)
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self::whitespace()
    }
}

/// A maximal run of non-separator characters within a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordSpan {
    /// Char offset of the first character.
    pub start: usize,
    /// Char offset one past the last character.
    pub end: usize,
    /// The same span in bytes, for slicing the line.
    pub bytes: ByteRange<usize>,
}

impl WordSpan {
    /// Whether `index` is on the word or on the caret position right after it.
    pub fn touches(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.bytes.clone()]
    }
}

/// Iterator over the spans of a line, in order.
#[derive(Debug, Clone)]
pub struct WordSpans<'a> {
    line: &'a str,
    separators: &'a SeparatorSet,
    chars: std::str::CharIndices<'a>,
    position: usize,
}

impl Iterator for WordSpans<'_> {
    type Item = WordSpan;

    fn next(&mut self) -> Option<WordSpan> {
        let (start_byte, start) = loop {
            let (byte, ch) = self.chars.next()?;
            let index = self.position;
            self.position += 1;
            if !self.separators.contains(ch) {
                break (byte, index);
            }
        };

        let mut end_byte = self.line.len();
        let mut end = start + 1;
        for (byte, ch) in self.chars.by_ref() {
            self.position += 1;
            if self.separators.contains(ch) {
                end_byte = byte;
                break;
            }
            end += 1;
        }

        Some(WordSpan {
            start,
            end,
            bytes: start_byte..end_byte,
        })
    }
}

/// Split `line` into its words.
pub fn word_spans<'a>(line: &'a str, separators: &'a SeparatorSet) -> WordSpans<'a> {
    WordSpans {
        line,
        separators,
        chars: line.char_indices(),
        position: 0,
    }
}

/// Locate the span around `index`. See the module docs for the matching rule.
pub fn find_span_around(
    line: &str,
    index: usize,
    separators: &SeparatorSet,
) -> Result<Option<WordSpan>, WordError> {
    let len = line.chars().count();
    if index > len {
        return Err(WordError::OutOfRange { index, len });
    }

    for span in word_spans(line, separators) {
        if span.touches(index) {
            return Ok(Some(span));
        }
        if span.start > index {
            break;
        }
    }
    Ok(None)
}

/// Return the word around `index`, borrowed from `line`.
pub fn find_word_around<'a>(
    line: &'a str,
    index: usize,
    separators: &SeparatorSet,
) -> Result<Option<&'a str>, WordError> {
    Ok(find_span_around(line, index, separators)?.map(|span| span.text(line)))
}

/// Drop one trailing `.` from words longer than a single character.
///
/// Filenames may contain dots, but a name at the end of a sentence picks up the period.
pub fn trim_trailing_dot(word: &str) -> &str {
    match word.strip_suffix('.') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => word,
    }
}
