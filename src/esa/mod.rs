//! Enhanced suffix array: suffix array + LCP array + child table over an
//! owned byte buffer, plus the interval/matcher/separator/splice machinery
//! built on top of it.

mod childtable;
mod interval;
mod matcher;
mod separator;
mod splice;

#[cfg(test)]
mod tests;

pub use interval::Interval;
pub use matcher::MatchPredicate;

use crate::error::{Error, Result};
use crate::sais;

/// Undefined/sentinel marker used throughout the child table and rank
/// bookkeeping.
pub(crate) const UNDEF: i32 = -1;

/// An enhanced suffix array over an owned byte buffer: `SA`, `L` (LCP) and
/// the `Up`/`Down`/`Next` child table, plus the buffer itself.
///
/// Built once via [`Esa::build`] and immutable afterwards; every navigation
/// method takes `&self`.
pub struct Esa {
    pub(crate) data: Vec<u8>,
    pub(crate) sa: Vec<i32>,
    pub(crate) lcp: Vec<i32>,
    pub(crate) up: Vec<i32>,
    pub(crate) down: Vec<i32>,
    pub(crate) next: Vec<i32>,
}

impl Esa {
    /// Builds SA, LCP and the child table over `data`. Fails with
    /// [`Error::InvalidInput`] if `data` is empty.
    pub fn build(data: Vec<u8>) -> Result<Esa> {
        if data.is_empty() {
            return Err(Error::InvalidInput("cannot build an index over empty data".into()));
        }
        let sa = build_sa(&data)?;
        let lcp = build_lcp(&data, &sa);
        let (up, down, next) = childtable::build(&lcp);
        Ok(Esa { data, sa, lcp, up, down, next })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn sa(&self) -> &[i32] {
        &self.sa
    }

    pub fn lcp(&self) -> &[i32] {
        &self.lcp
    }

    /// The whole-buffer root interval `(0, 0, n-1)`.
    pub fn root(&self) -> Interval {
        Interval { length: 0, start: 0, end: self.sa.len() as i32 - 1 }
    }

    /// Splices `separator` between the documents described by `offsets`,
    /// returning the new buffer and the offsets remapped into it. Does not
    /// touch `self`; the caller rebuilds a fresh [`Esa`] over the result.
    pub(crate) fn splice(&self, offsets: &[i32], separator: &[u8]) -> (Vec<u8>, Vec<i32>) {
        splice::splice(&self.data, offsets, separator)
    }
}

/// `SA[0..n)`: wraps the teacher's SA-IS construction, which returns an
/// `n+1`-length array whose first slot is the sentinel "one past the end"
/// suffix (always lexicographically smallest). We drop that slot so the
/// rest of the engine deals in the plain `n`-length array the data model
/// describes.
fn build_sa(data: &[u8]) -> Result<Vec<i32>> {
    let n = data.len();
    let mut raw = vec![0u32; n + 1];
    sais::construct(data, &mut raw);
    if raw[0] != n as u32 {
        return Err(Error::Internal("suffix array builder did not produce a sentinel-first array".into()));
    }
    Ok(raw[1..].iter().map(|&x| x as i32).collect())
}

/// Kasai's algorithm. `L` has length `n+1`; `L[0] == L[n] == 0`.
fn build_lcp(data: &[u8], sa: &[i32]) -> Vec<i32> {
    let n = data.len();
    let mut rank = vec![0i32; n];
    for (i, &pos) in sa.iter().enumerate() {
        rank[pos as usize] = i as i32;
    }

    let mut lcp = vec![0i32; n + 1];
    let mut h: i32 = 0;
    for i in 0..n {
        let k = rank[i];
        if k > 0 {
            let j = sa[(k - 1) as usize] as usize;
            while (i + h as usize) < n && (j + h as usize) < n && data[i + h as usize] == data[j + h as usize] {
                h += 1;
            }
            lcp[k as usize] = h;
        } else {
            h = 0;
        }
        if h > 0 {
            h -= 1;
        }
    }
    lcp[0] = 0;
    lcp[n] = 0;
    lcp
}
