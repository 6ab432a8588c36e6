use super::matcher::PlainMatch;
use super::Esa;
use rand::random;
use std::ops::Range;

fn gen_bytes(len: Range<usize>, scale: Range<u8>) -> Vec<u8> {
    let n = len.start + random::<usize>() % (len.end - len.start);
    let k = scale.start + random::<u8>() % (scale.end - scale.start);
    let mut v = Vec::with_capacity(n);
    for _ in 0..n {
        v.push(random::<u8>() % k);
    }
    v
}

fn naive_lcp(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[test]
fn sa_is_sorted_permutation() {
    const SAMPLES: usize = 200;
    const LEN: Range<usize> = 1..200;
    const SCALE: Range<u8> = 1..6;

    for _ in 0..SAMPLES {
        let data = gen_bytes(LEN, SCALE);
        let esa = Esa::build(data.clone()).unwrap();

        let mut seen = vec![false; data.len()];
        for &pos in esa.sa() {
            assert!(!seen[pos as usize], "SA is not a permutation");
            seen[pos as usize] = true;
        }
        assert!(seen.into_iter().all(|b| b));

        for i in 1..esa.sa().len() {
            let a = &data[esa.sa()[i - 1] as usize..];
            let b = &data[esa.sa()[i] as usize..];
            assert!(a <= b, "SA is not lexicographically sorted");
        }
    }
}

#[test]
fn lcp_matches_naive_common_prefix() {
    const SAMPLES: usize = 200;
    const LEN: Range<usize> = 2..150;
    const SCALE: Range<u8> = 1..4;

    for _ in 0..SAMPLES {
        let data = gen_bytes(LEN, SCALE);
        let esa = Esa::build(data.clone()).unwrap();
        let sa = esa.sa();
        let lcp = esa.lcp();

        assert_eq!(lcp[0], 0);
        assert_eq!(lcp[data.len()], 0);
        for i in 1..data.len() {
            let a = &data[sa[i - 1] as usize..];
            let b = &data[sa[i] as usize..];
            assert_eq!(lcp[i] as usize, naive_lcp(a, b));
        }
    }
}

#[test]
fn children_partition_parent_with_greater_depth() {
    const SAMPLES: usize = 100;
    const LEN: Range<usize> = 4..150;
    const SCALE: Range<u8> = 1..6;

    for _ in 0..SAMPLES {
        let data = gen_bytes(LEN, SCALE);
        let esa = Esa::build(data).unwrap();

        let mut stack = vec![esa.root()];
        while let Some(node) = stack.pop() {
            let children = esa.children(&node);
            if children.is_empty() {
                continue;
            }
            assert_eq!(children[0].start, node.start);
            assert_eq!(children.last().unwrap().end, node.end);
            for i in 1..children.len() {
                assert_eq!(children[i].start, children[i - 1].end + 1, "children must partition the parent range");
            }
            for child in &children {
                if !child.is_leaf() {
                    assert!(child.length > node.length, "internal child depth must strictly exceed parent depth");
                } else {
                    assert_eq!(child.length, node.length, "leaf depth is inherited from its parent");
                }
                stack.push(*child);
            }
        }
    }
}

#[test]
fn find_matches_naive_occurrences() {
    const SAMPLES: usize = 300;
    const LEN: Range<usize> = 1..120;
    const PAT_LEN: Range<usize> = 1..6;
    const SCALE: Range<u8> = 1..4;

    for _ in 0..SAMPLES {
        let data = gen_bytes(LEN, SCALE);
        let pattern = gen_bytes(PAT_LEN, SCALE);
        let esa = Esa::build(data.clone()).unwrap();

        let predicate = PlainMatch { data: &data };
        let found = esa.find(&pattern, &predicate).unwrap();

        let mut naive: Vec<i32> = (0..=data.len().saturating_sub(pattern.len()))
            .filter(|&i| &data[i..i + pattern.len()] == &pattern[..])
            .map(|i| i as i32)
            .collect();
        naive.sort();

        match found {
            None => assert!(naive.is_empty()),
            Some(interval) => {
                let mut positions: Vec<i32> = esa.sa()[interval.start as usize..=interval.end as usize].to_vec();
                positions.sort();
                assert_eq!(positions, naive);
            }
        }
    }
}

#[test]
fn find_rejects_empty_pattern() {
    let esa = Esa::build(b"abc".to_vec()).unwrap();
    let predicate = PlainMatch { data: esa.data() };
    assert!(esa.find(b"", &predicate).is_err());
}

#[test]
fn build_rejects_empty_data() {
    assert!(Esa::build(Vec::new()).is_err());
}

#[test]
fn separator_is_absent_from_data() {
    const SAMPLES: usize = 100;
    const LEN: Range<usize> = 1..100;
    const SCALE: Range<u8> = 1..4;

    for _ in 0..SAMPLES {
        let data = gen_bytes(LEN, SCALE);
        let esa = Esa::build(data.clone()).unwrap();
        let sep = esa.choose_separator();
        assert!(!sep.is_empty());

        let windows_contain_sep = data.windows(sep.len()).any(|w| w == &sep[..]);
        assert!(!windows_contain_sep, "chosen separator occurs in the data");
    }
}
