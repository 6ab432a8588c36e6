//! The query surface: multi-document wrapping of an [`Esa`](crate::esa::Esa),
//! document attribution, and per-hit character/line context.

mod context;
mod hit;
mod result;


pub use context::HitContext;
pub use hit::Hit;
pub use result::SearchResult;

use crate::error::{Error, Result};
use crate::esa::Esa;

/// One document making up part of an [`Index`], with its content slice into
/// the (possibly spliced) buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    pub index: usize,
    pub id: &'a str,
    pub content: &'a [u8],
}

/// A built index: the ESA over one or more concatenated documents, the
/// document offsets (post-splice), ids, and — in multi-document mode — the
/// separator inserted between them.
pub struct Index {
    esa: Esa,
    offsets: Vec<i32>,
    ids: Vec<String>,
    separator: Vec<u8>,
    new_line_in_separator: i32,
}

impl Index {
    /// Builds an index over a single document.
    pub fn build_single(id: impl Into<String>, data: Vec<u8>) -> Result<Index> {
        let esa = Esa::build(data)?;
        Ok(Index {
            esa,
            offsets: vec![0],
            ids: vec![id.into()],
            separator: Vec::new(),
            new_line_in_separator: -1,
        })
    }

    /// Builds an index over several documents concatenated in `data`, with
    /// `offsets[k]` the start of document `k` (`offsets[0] == 0`, strictly
    /// increasing). A non-occurring separator is chosen and spliced between
    /// documents so patterns can never straddle a boundary.
    pub fn build_multi(data: Vec<u8>, offsets: Vec<i32>, ids: Vec<String>) -> Result<Index> {
        validate_offsets(data.len(), &offsets, ids.len())?;

        if offsets.len() == 1 {
            let esa = Esa::build(data)?;
            return Ok(Index {
                esa,
                offsets,
                ids,
                separator: Vec::new(),
                new_line_in_separator: -1,
            });
        }

        let raw = Esa::build(data)?;
        let separator = raw.choose_separator();
        let (spliced, new_offsets) = raw.splice(&offsets, &separator);
        let esa = Esa::build(spliced)?;
        let new_line_in_separator = hit::new_line_in_separator(&separator);

        Ok(Index { esa, offsets: new_offsets, ids, separator, new_line_in_separator })
    }

    pub fn document_count(&self) -> usize {
        self.ids.len()
    }

    pub fn try_document(&self, idx: usize) -> Result<Document<'_>> {
        if idx >= self.ids.len() {
            return Err(Error::IndexOutOfRange { index: idx, size: self.ids.len() });
        }
        let start = self.offsets[idx] as usize;
        let end = if idx + 1 < self.offsets.len() {
            self.offsets[idx + 1] as usize - self.separator.len()
        } else {
            self.esa.len()
        };
        Ok(Document { index: idx, id: &self.ids[idx], content: &self.esa.data()[start..end] })
    }

    pub fn document(&self, idx: usize) -> Document<'_> {
        self.try_document(idx).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Finds `pattern`, returning a [`SearchResult`] borrowing this index.
    pub fn find<'a>(&'a self, pattern: &[u8]) -> Result<SearchResult<'a>> {
        let predicate = result::SeparatorAwareMatch { data: self.esa.data(), separator: &self.separator };
        let interval = self.esa.find(pattern, &predicate)?;
        Ok(SearchResult::new(self, pattern.to_vec(), interval))
    }

    pub(crate) fn esa(&self) -> &Esa {
        &self.esa
    }

    pub(crate) fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    pub(crate) fn separator(&self) -> &[u8] {
        &self.separator
    }

    pub(crate) fn new_line_in_separator(&self) -> i32 {
        self.new_line_in_separator
    }

    /// Whether `pos..pos+separator.len()` is a full separator occurrence.
    /// Always false in single-document mode (empty separator), which makes
    /// every separator-aware computation in this module degenerate cleanly
    /// to its plain single-document form.
    pub(crate) fn separator_at(&self, pos: i32) -> bool {
        if self.separator.is_empty() {
            return false;
        }
        let sep_len = self.separator.len() as i32;
        let data = self.esa.data();
        if pos >= 0 && pos + sep_len <= data.len() as i32 {
            (0..sep_len).all(|i| self.separator[i as usize] == data[(pos + i) as usize])
        } else {
            false
        }
    }
}

fn validate_offsets(data_len: usize, offsets: &[i32], ids_len: usize) -> Result<()> {
    if data_len == 0 {
        return Err(Error::InvalidInput("cannot build an index over empty data".into()));
    }
    if offsets.is_empty() {
        return Err(Error::InvalidInput("document offsets must not be empty".into()));
    }
    if offsets[0] != 0 {
        return Err(Error::InvalidInput("the first document offset must be 0".into()));
    }
    if ids_len != offsets.len() {
        return Err(Error::InvalidInput("there must be exactly one id per document offset".into()));
    }
    for w in offsets.windows(2) {
        if w[1] <= w[0] {
            return Err(Error::InvalidInput("document offsets must be strictly increasing".into()));
        }
    }
    if *offsets.last().unwrap() as usize >= data_len {
        return Err(Error::InvalidInput("document offset out of range".into()));
    }
    Ok(())
}
