use super::context::HitContext;
use super::result::SearchResult;
use super::Document;
use crate::error::{Error, Result};

/// One occurrence of a pattern. Borrows the [`SearchResult`](super::SearchResult)
/// it came from.
pub struct Hit<'r, 'a> {
    result: &'r SearchResult<'a>,
    index: usize,
}

impl<'r, 'a> Hit<'r, 'a> {
    pub(crate) fn new(result: &'r SearchResult<'a>, index: usize) -> Hit<'r, 'a> {
        Hit { result, index }
    }

    /// Offset into the (possibly spliced) buffer. Never inside a separator.
    pub fn global_position(&self) -> i32 {
        self.result.global_position(self.index)
    }

    /// Offset within the owning document.
    pub fn position(&self) -> i32 {
        self.result.position(self.index).expect("hit index is valid by construction")
    }

    pub fn document(&self) -> Document<'a> {
        let doc_idx = self.result.document_index(self.index);
        self.result.index.document(doc_idx)
    }

    /// A byte window of up to `before`/`after` characters around the match,
    /// truncated so it never crosses a separator occurrence.
    pub fn char_context(&self, before: i32, after: i32) -> Result<HitContext<'a>> {
        if before < 0 || after < 0 {
            return Err(Error::InvalidInput("char context length must not be negative".into()));
        }
        let index = self.result.index;
        let pos = self.global_position();
        let plen = self.result.pattern_length() as i32;

        let before_start = check_before(index, pos, before);
        let after_end = check_after(index, pos + plen, after);

        Ok(HitContext::new(index.esa().data(), before_start, pos - before_start, plen, after_end - pos - plen))
    }

    /// Like [`char_context`](Hit::char_context) but counting whole lines,
    /// CRLF/LF/CR-aware.
    pub fn line_context(&self, lines_before: i32, lines_after: i32) -> Result<HitContext<'a>> {
        if lines_before < 0 || lines_after < 0 {
            return Err(Error::InvalidInput("line context length must not be negative".into()));
        }
        let index = self.result.index;
        let pattern_start = self.global_position();
        let plen = self.result.pattern_length() as i32;

        let before_start = lines_before_start(index, pattern_start, lines_before);
        let after_end = lines_after_start(index, pattern_start + plen, lines_after);

        Ok(HitContext::new(
            index.esa().data(),
            before_start,
            pattern_start - before_start,
            plen,
            after_end - pattern_start - plen,
        ))
    }
}

fn check_before_single(pos: i32, max_size: i32) -> i32 {
    let r = pos - max_size;
    if r < 0 {
        0
    } else {
        r
    }
}

fn check_after_single(data_len: i32, pos: i32, max_size: i32) -> i32 {
    let r = pos + max_size;
    if r > data_len {
        data_len
    } else {
        r
    }
}

fn check_before(index: &super::Index, pos: i32, max_size: i32) -> i32 {
    let left_limit = check_before_single(pos, max_size);
    let sep_len = index.separator().len() as i32;
    if sep_len == 0 {
        return left_limit;
    }
    let mut i = pos - sep_len;
    while i >= left_limit {
        if index.separator_at(i) {
            return i + sep_len;
        }
        i -= 1;
    }
    left_limit
}

fn check_after(index: &super::Index, pos: i32, max_size: i32) -> i32 {
    let right_limit = check_after_single(index.esa().len() as i32, pos, max_size);
    let sep_len = index.separator().len() as i32;
    if sep_len == 0 {
        return right_limit;
    }
    let sep_right_limit = right_limit - sep_len;
    let mut i = pos;
    while i <= sep_right_limit {
        if index.separator_at(i) {
            return i;
        }
        i += 1;
    }
    right_limit
}

/// `0` if `data[i]` is not a newline byte, `1` for a lone CR or LF, `2` for
/// a CRLF pair (counted once, not twice).
pub(crate) fn is_new_line(data: &[u8], i: i32) -> i32 {
    let len = data.len() as i32;
    if i < 0 || i >= len {
        return 0;
    }
    let c0 = data[i as usize];
    if c0 == 13 {
        if i == len - 1 || data[(i + 1) as usize] != 10 {
            1
        } else {
            2
        }
    } else if c0 == 10 {
        if i == 0 || data[(i - 1) as usize] != 13 {
            1
        } else {
            0
        }
    } else {
        0
    }
}

/// The offset within `separator` of its first newline byte, or `-1` if it
/// contains none. Used to disambiguate a real line break from a separator
/// byte when the two can collide.
pub(crate) fn new_line_in_separator(separator: &[u8]) -> i32 {
    for i in 0..separator.len() as i32 {
        if is_new_line(separator, i) > 0 {
            return i;
        }
    }
    -1
}

fn lines_before_start(index: &super::Index, pos: i32, max_lines: i32) -> i32 {
    let data = index.esa().data();
    let mut j = pos;
    let mut new_line = 0;
    let mut line_count = 0;
    let sep_len = index.separator().len() as i32;
    let mut sep = index.separator_at(j);

    while j >= 0 && !sep && line_count <= max_lines {
        new_line = is_new_line(data, j);
        if new_line > 0 {
            line_count += 1;
        }
        j -= 1;
        sep = index.separator_at(j);
    }

    let new_line_end = j + 1 + new_line;
    let nlis = index.new_line_in_separator();
    if nlis == -1 {
        new_line_end + if sep { sep_len - 1 } else { 0 }
    } else {
        let limit = if j - nlis < 0 { 0 } else { j - nlis };
        let mut j2 = j;
        let mut sep2 = sep;
        while j2 >= limit && !sep2 {
            j2 -= 1;
            sep2 = index.separator_at(j2);
        }
        if sep2 {
            j2 + sep_len
        } else {
            new_line_end
        }
    }
}

fn lines_after_start(index: &super::Index, pos: i32, max_lines: i32) -> i32 {
    let data = index.esa().data();
    let mut j = pos;
    let mut line_count = 0;
    let data_len = data.len() as i32;
    let mut sep = index.separator_at(j);

    while j < data_len && !sep && line_count <= max_lines {
        if is_new_line(data, j) > 0 {
            line_count += 1;
        }
        j += 1;
        sep = index.separator_at(j);
    }

    if j == data_len || sep {
        j
    } else {
        j - 1
    }
}
