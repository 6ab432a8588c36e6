//! Reads a crawled file list into the single concatenated buffer the core
//! engine indexes, loading documents concurrently with `rayon`.

use std::fs::File;
use std::io::Read as _;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Loads every file in `paths` into one contiguous buffer, each document's
/// bytes landing in the slice named by the matching `offsets` entry.
///
/// One `rayon::scope` task per file fills its own disjoint sub-slice of
/// `data`, so no task ever contends with another; the scope does not return
/// until every read has either completed or failed. A short read (the file
/// changed size between crawl and load) or any I/O failure is
/// `Error::Load` naming the offending path.
pub fn load(paths: &[PathBuf]) -> Result<(Vec<u8>, Vec<i32>, Vec<String>)> {
    let sizes = paths.iter().map(|p| file_size(p)).collect::<Result<Vec<u64>>>()?;
    let total: u64 = sizes.iter().sum();

    let mut offsets = Vec::with_capacity(paths.len());
    let mut running = 0i32;
    for &size in &sizes {
        offsets.push(running);
        running += size as i32;
    }

    let mut data = vec![0u8; total as usize];
    let results: Vec<Result<()>> = {
        let mut slots: Vec<&mut [u8]> = Vec::with_capacity(paths.len());
        let mut rest = data.as_mut_slice();
        for &size in &sizes {
            let (head, tail) = rest.split_at_mut(size as usize);
            slots.push(head);
            rest = tail;
        }

        let mut results = Vec::with_capacity(paths.len());
        for _ in 0..paths.len() {
            results.push(Ok(()));
        }
        let results_slots: Vec<&mut Result<()>> = results.iter_mut().collect();

        rayon::scope(|scope| {
            for ((path, slot), result) in paths.iter().zip(slots).zip(results_slots) {
                scope.spawn(move |_| {
                    *result = read_into(path, slot);
                });
            }
        });
        results
    };
    for r in results {
        r?;
    }

    let ids = paths.iter().map(|p| p.to_string_lossy().into_owned()).collect();
    Ok((data, offsets, ids))
}

fn file_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| Error::Load { path: path.to_path_buf(), source: e })
}

fn read_into(path: &Path, buffer: &mut [u8]) -> Result<()> {
    let mut f = File::open(path).map_err(|e| Error::Load { path: path.to_path_buf(), source: e })?;
    f.read_exact(buffer).map_err(|e| Error::Load { path: path.to_path_buf(), source: e })
}
