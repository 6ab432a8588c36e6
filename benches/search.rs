use criterion::{criterion_group, criterion_main, Criterion};
use exact_index::Index;
use rand::Rng;

fn random_bytes(len: usize, alphabet: u8) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(0, alphabet as u32 + 1) as u8).collect()
}

fn bench_search(crit: &mut Criterion) {
    for &(name, len, alphabet) in &[("4k-text", 4096usize, 127u8), ("64k-text", 65536, 127)] {
        let data = random_bytes(len, alphabet);
        let pattern: Vec<u8> = data[len / 2..len / 2 + 8].to_vec();
        let index = Index::build_single(name, data).unwrap();
        crit.bench_function(&format!("find {}", name), move |b| {
            b.iter(|| index.find(&pattern).unwrap());
        });
    }
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
