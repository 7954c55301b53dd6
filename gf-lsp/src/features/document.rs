//! Line and column helpers over full document text.
//!
//! LSP positions count UTF-16 code units by default, while `gf-core` counts chars. These
//! helpers translate between the two for a single line.

/// Text of line `line` without its line break (`\n` or `\r\n`).
pub fn line_text(text: &str, line: usize) -> Option<&str> {
    let raw = text.split('\n').nth(line)?;
    Some(raw.strip_suffix('\r').unwrap_or(raw))
}

/// Convert a UTF-16 column into a char index, clamping to the end of the line.
///
/// A column landing in the middle of a surrogate pair maps to the char it belongs to.
pub fn utf16_to_char_index(line: &str, column: u32) -> usize {
    let column = column as usize;
    let mut units = 0;
    for (index, ch) in line.chars().enumerate() {
        let next = units + ch.len_utf16();
        if column < next {
            return index;
        }
        units = next;
    }
    line.chars().count()
}

/// Convert a char index into a UTF-16 column.
pub fn char_index_to_utf16(line: &str, index: usize) -> u32 {
    line.chars().take(index).map(char::len_utf16).sum::<usize>() as u32
}
