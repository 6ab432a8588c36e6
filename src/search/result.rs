use std::cell::RefCell;

use super::hit::Hit;
use super::Index;
use crate::error::{Error, Result};
use crate::esa::{Interval, MatchPredicate};

const UNDEF: i32 = -1;

/// Plain equality augmented with a rejection whenever the candidate window
/// overlaps a full separator occurrence. With an empty `separator` (single
/// document mode) this degenerates to plain byte comparison.
pub(crate) struct SeparatorAwareMatch<'d> {
    pub data: &'d [u8],
    pub separator: &'d [u8],
}

impl<'d> SeparatorAwareMatch<'d> {
    fn separator_at(&self, pos: i32) -> bool {
        if self.separator.is_empty() {
            return false;
        }
        let sep_len = self.separator.len() as i32;
        if pos >= 0 && pos + sep_len <= self.data.len() as i32 {
            (0..sep_len).all(|i| self.separator[i as usize] == self.data[(pos + i) as usize])
        } else {
            false
        }
    }
}

impl<'d> MatchPredicate for SeparatorAwareMatch<'d> {
    fn matches(&self, pattern: &[u8], data_offset: i32, pattern_offset: i32, length: i32) -> bool {
        for i in 0..length {
            let p_idx = pattern_offset + i;
            let d_idx = data_offset + i;
            if p_idx >= pattern.len() as i32
                || d_idx >= self.data.len() as i32
                || pattern[p_idx as usize] != self.data[d_idx as usize]
                || self.separator_at(d_idx)
            {
                return false;
            }
        }
        true
    }
}

/// The occurrences of a pattern found by [`Index::find`]. Borrows the index
/// it was produced from; the document-index cache and the lazily-sorted
/// position index inside are simple (non-atomic) interior mutability, so a
/// `SearchResult` must stay within one thread/caller (see the crate's
/// concurrency notes).
pub struct SearchResult<'a> {
    pub(crate) index: &'a Index,
    pattern: Vec<u8>,
    interval: Option<Interval>,
    doc_cache: RefCell<Vec<i32>>,
    sorted_positions: RefCell<Option<Vec<(i32, usize)>>>,
}

impl<'a> SearchResult<'a> {
    pub(crate) fn new(index: &'a Index, pattern: Vec<u8>, interval: Option<Interval>) -> SearchResult<'a> {
        let size = interval.map(|iv| (iv.end - iv.start + 1) as usize).unwrap_or(0);
        SearchResult {
            index,
            pattern,
            interval,
            doc_cache: RefCell::new(vec![UNDEF; size]),
            sorted_positions: RefCell::new(None),
        }
    }

    pub fn size(&self) -> usize {
        self.interval.map(|iv| (iv.end - iv.start + 1) as usize).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn pattern_length(&self) -> usize {
        self.pattern.len()
    }

    /// Occurrences in SA order (deterministic, not text order).
    pub fn positions(&self) -> Vec<i32> {
        (0..self.size()).map(|i| self.position(i).expect("index within size() is always valid")).collect()
    }

    pub fn try_global_position(&self, i: usize) -> Result<i32> {
        let size = self.size();
        if i >= size {
            return Err(Error::IndexOutOfRange { index: i, size });
        }
        let iv = self.interval.expect("size() > 0 implies interval is Some");
        Ok(self.index.esa().sa()[iv.start as usize + i])
    }

    /// Panics if `i` is out of range, mirroring the original engine's
    /// behavior for in-bounds-by-construction call sites.
    pub fn global_position(&self, i: usize) -> i32 {
        self.try_global_position(i).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_document_index(&self, i: usize) -> Result<usize> {
        let pos = self.try_global_position(i)?;
        let mut cache = self.doc_cache.borrow_mut();
        if cache[i] == UNDEF {
            cache[i] = predecessor(self.index.offsets(), pos) as i32;
        }
        Ok(cache[i] as usize)
    }

    pub fn document_index(&self, i: usize) -> usize {
        self.try_document_index(i).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_position(&self, i: usize) -> Result<i32> {
        let pos = self.try_global_position(i)?;
        let doc = self.try_document_index(i)?;
        Ok(pos - self.index.offsets()[doc])
    }

    pub fn position(&self, i: usize) -> Result<i32> {
        self.try_position(i)
    }

    pub fn try_hit(&self, i: usize) -> Result<Hit<'_, 'a>> {
        if i >= self.size() {
            return Err(Error::IndexOutOfRange { index: i, size: self.size() });
        }
        Ok(Hit::new(self, i))
    }

    pub fn hit(&self, i: usize) -> Hit<'_, 'a> {
        self.try_hit(i).unwrap_or_else(|e| panic!("{}", e))
    }

    fn sorted(&self) -> std::cell::Ref<'_, Vec<(i32, usize)>> {
        if self.sorted_positions.borrow().is_none() {
            let mut v: Vec<(i32, usize)> = (0..self.size())
                .map(|i| (self.global_position(i), i))
                .collect();
            v.sort_unstable_by_key(|&(pos, _)| pos);
            *self.sorted_positions.borrow_mut() = Some(v);
        }
        std::cell::Ref::map(self.sorted_positions.borrow(), |o| o.as_ref().unwrap())
    }

    fn hit_index_for_global_position(&self, position: i32) -> Option<usize> {
        let sorted = self.sorted();
        sorted.binary_search_by_key(&position, |&(pos, _)| pos).ok().map(|at| sorted[at].1)
    }

    pub fn has_global_position(&self, position: i32) -> bool {
        self.hit_index_for_global_position(position).is_some()
    }

    pub fn hit_with_global_position(&self, position: i32) -> Option<Hit<'_, 'a>> {
        self.hit_index_for_global_position(position).map(|i| Hit::new(self, i))
    }

    fn global_position_for(&self, document: usize, position: i32) -> Option<i32> {
        let offsets = self.index.offsets();
        if document >= offsets.len() || position < 0 {
            return None;
        }
        Some(offsets[document] + position)
    }

    pub fn has_position(&self, document: usize, position: i32) -> bool {
        match self.global_position_for(document, position) {
            Some(global) => self.hit_index_for_global_position(global).is_some(),
            None => false,
        }
    }

    pub fn hit_with_position(&self, document: usize, position: i32) -> Option<Hit<'_, 'a>> {
        let global = self.global_position_for(document, position)?;
        self.hit_index_for_global_position(global).map(|i| Hit::new(self, i))
    }
}

/// Greatest `k` with `offsets[k] <= pos`.
fn predecessor(offsets: &[i32], pos: i32) -> usize {
    offsets.partition_point(|&o| o <= pos) - 1
}
