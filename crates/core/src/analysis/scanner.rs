//! Byte-level scanning helpers shared by the Java frontend and the resolver.
//!
//! All structural work happens on a *masked* copy of the source in which
//! comments and the contents of string, char, and text-block literals are
//! replaced with spaces. Newlines survive masking and the masked text has the
//! same byte length as the original, so offsets and line numbers computed on
//! one are valid on the other.

use std::ops::Range;

use crate::analysis::ParseError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str,
    Char,
    TextBlock,
}

/// Blank out comments and literal contents, keeping quotes and newlines.
pub fn mask_source(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            State::Code => match b {
                b'/' if next == Some(b'/') => {
                    out.extend_from_slice(b"  ");
                    state = State::LineComment;
                    i += 2;
                    continue;
                }
                b'/' if next == Some(b'*') => {
                    out.extend_from_slice(b"  ");
                    state = State::BlockComment;
                    i += 2;
                    continue;
                }
                b'"' if bytes[i..].starts_with(b"\"\"\"") => {
                    out.extend_from_slice(b"\"\"\"");
                    state = State::TextBlock;
                    i += 3;
                    continue;
                }
                b'"' => {
                    out.push(b);
                    state = State::Str;
                }
                b'\'' => {
                    out.push(b);
                    state = State::Char;
                }
                _ => out.push(b),
            },
            State::LineComment => {
                if b == b'\n' {
                    out.push(b'\n');
                    state = State::Code;
                } else {
                    out.push(b' ');
                }
            }
            State::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    out.extend_from_slice(b"  ");
                    state = State::Code;
                    i += 2;
                    continue;
                }
                out.push(blank(b));
            }
            State::Str | State::Char => {
                let quote = if state == State::Str { b'"' } else { b'\'' };
                if b == b'\\' && next.is_some_and(|n| n != b'\n') {
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                if b == quote {
                    out.push(b);
                    state = State::Code;
                } else if b == b'\n' {
                    // Unterminated literal; recover at end of line.
                    out.push(b'\n');
                    state = State::Code;
                } else {
                    out.push(b' ');
                }
            }
            State::TextBlock => {
                if b == b'\\' && next.is_some() {
                    out.push(b' ');
                    out.push(blank(bytes[i + 1]));
                    i += 2;
                    continue;
                }
                if bytes[i..].starts_with(b"\"\"\"") {
                    out.extend_from_slice(b"\"\"\"");
                    state = State::Code;
                    i += 3;
                    continue;
                }
                out.push(blank(b));
            }
        }
        i += 1;
    }

    // Only ASCII bytes are ever rewritten and multi-byte sequences are either
    // copied or blanked whole, so the buffer is still valid UTF-8.
    String::from_utf8_lossy(&out).into_owned()
}

fn blank(b: u8) -> u8 {
    if b == b'\n' {
        b'\n'
    } else {
        b' '
    }
}

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let newlines = text.bytes().enumerate().filter(|(_, b)| *b == b'\n').map(|(i, _)| i).collect();
        Self { newlines }
    }

    pub fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }
}

/// Index of the `}` closing the `{` at `open`, counting braces only.
pub fn matching_brace(masked: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, b) in masked.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Index of the `)` closing the `(` at `open`.
pub fn matching_paren(masked: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, b) in masked.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// One declaration inside a class body or at file level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Declaration text from its first non-blank byte up to the terminator.
    pub header: Range<usize>,
    /// Range strictly between the braces when the member ends in a block.
    pub block: Option<Range<usize>>,
    /// Whether the header contains a top-level assignment.
    pub has_initializer: bool,
}

/// Split `region` of masked text into member declarations.
///
/// A member ends at a `;` or `{` outside parentheses. Blocks that belong to a
/// field initializer (array initializers, lambdas, anonymous classes) are
/// skipped over and the member continues until its `;`.
pub fn split_members(
    masked: &str,
    region: Range<usize>,
    lines: &LineIndex,
) -> Result<Vec<Member>, ParseError> {
    let bytes = masked.as_bytes();
    let mut members = Vec::new();
    let mut start: Option<usize> = None;
    let mut paren = 0usize;
    let mut has_initializer = false;
    let mut pos = region.start;

    while pos < region.end {
        let b = bytes[pos];
        if b.is_ascii_whitespace() {
            pos += 1;
            continue;
        }
        let header_start = *start.get_or_insert(pos);

        match b {
            b'(' => paren += 1,
            b')' => paren = paren.saturating_sub(1),
            b'=' if paren == 0 && is_assignment(bytes, pos) => has_initializer = true,
            b';' if paren == 0 => {
                members.push(Member {
                    header: header_start..pos,
                    block: None,
                    has_initializer,
                });
                start = None;
                has_initializer = false;
            }
            b'{' => {
                let close = matching_brace(bytes, pos)
                    .filter(|&c| c < region.end)
                    .ok_or(ParseError::Unbalanced { line: lines.line_of(pos) })?;
                if paren == 0 && !has_initializer {
                    members.push(Member {
                        header: header_start..pos,
                        block: Some(pos + 1..close),
                        has_initializer: false,
                    });
                    start = None;
                }
                pos = close + 1;
                continue;
            }
            b'}' => return Err(ParseError::Unbalanced { line: lines.line_of(pos) }),
            _ => {}
        }
        pos += 1;
    }

    Ok(members)
}

fn is_assignment(bytes: &[u8], pos: usize) -> bool {
    let prev = pos.checked_sub(1).map(|p| bytes[p]);
    let next = bytes.get(pos + 1).copied();
    !matches!(prev, Some(b'=' | b'!' | b'<' | b'>')) && next != Some(b'=')
}

pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Position of the last non-whitespace byte before `pos`.
pub fn prev_non_ws(bytes: &[u8], pos: usize) -> Option<usize> {
    bytes[..pos].iter().rposition(|b| !b.is_ascii_whitespace())
}

/// Identifier ending at `end` (inclusive), scanning backwards.
pub fn ident_ending_at(text: &str, end: usize) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    if !is_ident_byte(bytes[end]) {
        return None;
    }
    let mut start = end;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    is_ident_start(bytes[start]).then_some(start..end + 1)
}
