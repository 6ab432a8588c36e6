use super::{Esa, Interval};
use crate::error::{Error, Result};

/// Abstract byte-equality test used while descending the interval tree:
/// `predicate(pattern, data_offset, pattern_offset, length)` must report
/// whether `pattern[pattern_offset..pattern_offset+length]` equals
/// `data[data_offset..data_offset+length]`.
///
/// Single-document search uses plain `memcmp`-equivalent comparison;
/// multi-document search additionally rejects any window that overlaps a
/// separator occurrence, so patterns never match across a document
/// boundary without duplicating the descent logic.
pub trait MatchPredicate {
    fn matches(&self, pattern: &[u8], data_offset: i32, pattern_offset: i32, length: i32) -> bool;
}

/// Plain byte-for-byte comparison against the buffer, with no
/// separator-awareness. Used by single-document search.
pub struct PlainMatch<'d> {
    pub data: &'d [u8],
}

impl<'d> MatchPredicate for PlainMatch<'d> {
    fn matches(&self, pattern: &[u8], data_offset: i32, pattern_offset: i32, length: i32) -> bool {
        let (d0, d1) = (data_offset as usize, (data_offset + length) as usize);
        let (p0, p1) = (pattern_offset as usize, (pattern_offset + length) as usize);
        d1 <= self.data.len() && self.data[d0..d1] == pattern[p0..p1]
    }
}

impl Esa {
    /// Descends the interval tree by `pattern`, validating bytes through
    /// `predicate`. Returns `None` if the pattern does not occur.
    pub fn find<P: MatchPredicate>(&self, pattern: &[u8], predicate: &P) -> Result<Option<Interval>> {
        if pattern.is_empty() {
            return Err(Error::InvalidInput("pattern must not be empty".into()));
        }
        let plen = pattern.len() as i32;
        let mut node = self.root();
        let mut c: i32 = 0;

        loop {
            let child = match self.child_by_char(&node, pattern[c as usize]) {
                Some(child) => child,
                None => return Ok(None),
            };

            if child.is_leaf() {
                let remaining = plen - c;
                if remaining > 0 {
                    let data_off = self.sa[child.start as usize] + c;
                    if !predicate.matches(pattern, data_off, c, remaining) {
                        return Ok(None);
                    }
                }
                return Ok(Some(Interval { length: plen, start: child.start, end: child.end }));
            }

            let edge_len = std::cmp::min(child.length, plen);
            let match_len = edge_len - c;
            if match_len > 0 {
                let data_off = self.sa[child.start as usize] + c;
                if !predicate.matches(pattern, data_off, c, match_len) {
                    return Ok(None);
                }
            }
            c = edge_len;
            if c < plen {
                node = child;
                continue;
            }
            return Ok(Some(Interval { length: plen, start: child.start, end: child.end }));
        }
    }
}
