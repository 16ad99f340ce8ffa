//! Text helpers shared by every surface
//!
//! Panel fonts cover printable ASCII only. Names and messages arrive as
//! UTF-8 from the mesh, so anything outside the font is replaced by a block
//! glyph before drawing.

use heapless::String;

/// Replacement glyph for characters the font cannot draw
pub const BLOCK: char = '\u{2588}';

/// Longest single line the helpers build in memory
pub const MAX_LINE: usize = 96;

/// Map UTF-8 text onto the panel charset
///
/// Printable ASCII passes through, each non-ASCII character becomes one
/// [`BLOCK`], control characters are dropped. Output stops when `N` is full.
pub fn translate_utf8_to_blocks<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    for c in src.chars() {
        let mapped = match c {
            ' '..='~' => c,
            c if c.is_ascii() => continue,
            _ => BLOCK,
        };
        if out.push(mapped).is_err() {
            break;
        }
    }
    out
}

/// Append as much of `text` as fits, never splitting a character
pub fn push_truncated<const N: usize>(out: &mut String<N>, text: &str) {
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
}

/// Byte length of the longest prefix of `text` no wider than `max_width`
pub fn fit_prefix(text: &str, max_width: i32, measure: impl Fn(&str) -> i32) -> usize {
    let mut end = 0;
    for (i, c) in text.char_indices() {
        let next = i + c.len_utf8();
        if measure(&text[..next]) > max_width {
            break;
        }
        end = next;
    }
    end
}

/// Find where the first wrapped line of `text` ends
///
/// Returns `(line_end, next_start)` as byte offsets. Breaks at an explicit
/// newline, otherwise at the last space that keeps the line within
/// `max_width`. A single word wider than the line is split, always taking at
/// least one character so callers make progress.
pub fn line_break(text: &str, max_width: i32, measure: impl Fn(&str) -> i32) -> (usize, usize) {
    let limit = text.find('\n').unwrap_or(text.len());
    let candidate = &text[..limit];

    if measure(candidate) <= max_width {
        let next = if limit < text.len() { limit + 1 } else { limit };
        return (limit, next);
    }

    let mut fit = 0;
    for (i, c) in candidate.char_indices() {
        if c != ' ' {
            continue;
        }
        if measure(&candidate[..i]) > max_width {
            break;
        }
        fit = i;
    }
    if fit > 0 {
        return (fit, fit + 1);
    }

    let first = candidate.chars().next().map_or(0, char::len_utf8);
    let end = fit_prefix(candidate, max_width, measure).max(first);
    (end, end)
}
