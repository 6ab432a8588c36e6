use criterion::{criterion_group, criterion_main, Criterion};
use exact_index::Esa;
use rand::Rng;

fn random_bytes(len: usize, alphabet: u8) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(0, alphabet as u32 + 1) as u8).collect()
}

fn bench_construct(crit: &mut Criterion) {
    for &(name, len, alphabet) in &[("4k-text", 4096usize, 127u8), ("64k-text", 65536, 127), ("4k-quaternary", 4096, 4)] {
        let data = random_bytes(len, alphabet);
        crit.bench_function(&format!("esa build {}", name), move |b| {
            b.iter(|| Esa::build(data.clone()).unwrap());
        });
    }
}

criterion_group!(sa_construct_benches, bench_construct);
criterion_main!(sa_construct_benches);
