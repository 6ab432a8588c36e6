/// A byte window around a hit: `before`, the matched `pattern` slice, and
/// `after`, all views into the index's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitContext<'a> {
    data: &'a [u8],
    position: i32,
    len_before: i32,
    len_pattern: i32,
    len_after: i32,
}

impl<'a> HitContext<'a> {
    pub(crate) fn new(data: &'a [u8], position: i32, len_before: i32, len_pattern: i32, len_after: i32) -> HitContext<'a> {
        HitContext { data, position, len_before, len_pattern, len_after }
    }

    pub fn before(&self) -> &'a [u8] {
        let p = self.position as usize;
        &self.data[p..p + self.len_before as usize]
    }

    pub fn pattern(&self) -> &'a [u8] {
        let start = (self.position + self.len_before) as usize;
        &self.data[start..start + self.len_pattern as usize]
    }

    pub fn after(&self) -> &'a [u8] {
        let start = (self.position + self.len_before + self.len_pattern) as usize;
        &self.data[start..start + self.len_after as usize]
    }

    /// Byte offset of the pattern's first byte within the concatenation of
    /// `before() + pattern() + after()`.
    pub fn highlight_start(&self) -> usize {
        self.len_before as usize
    }

    /// Byte offset just past the pattern's last byte, within that same
    /// concatenation.
    pub fn highlight_end(&self) -> usize {
        (self.len_before + self.len_pattern) as usize
    }
}
