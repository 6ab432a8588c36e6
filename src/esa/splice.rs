/// Builds the post-splice buffer and offsets: document `k` moves forward by
/// `k * sep.len()`, and `sep` is written into each of the `offsets.len()-1`
/// gaps between documents.
///
/// The data model also describes rewriting the pre-splice `SA` in place via
/// `SA[R[j]] += k*|sep|`; this implementation skips that step because the
/// very next thing that happens to the spliced buffer is a full rebuild of
/// `SA`/`L`/child table from scratch (separator bytes change lexicographic
/// order globally, so the remapped entries would be thrown away unread).
pub(crate) fn splice(data: &[u8], offsets: &[i32], sep: &[u8]) -> (Vec<u8>, Vec<i32>) {
    let m = offsets.len();
    let n = data.len();
    let mut new_data = Vec::with_capacity(n + (m - 1) * sep.len());
    let mut new_offsets = Vec::with_capacity(m);

    for k in 0..m {
        let start = offsets[k] as usize;
        let end = if k + 1 < m { offsets[k + 1] as usize } else { n };
        new_offsets.push(new_data.len() as i32);
        new_data.extend_from_slice(&data[start..end]);
        if k + 1 < m {
            new_data.extend_from_slice(sep);
        }
    }

    (new_data, new_offsets)
}
