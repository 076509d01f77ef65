#[macro_use]
extern crate criterion;

use criterion::Criterion;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use minsketch::cmd::ComputeParameters;
use minsketch::compare::{pairwise_distances, EmptyPolicy};
use minsketch::signature::Signature;

fn random_sequence(rng: &mut StdRng, len: usize) -> Vec<u8> {
    let bases = b"ACGT";
    (0..len).map(|_| bases[rng.gen_range(0..4)]).collect()
}

fn sketch(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let seq = random_sequence(&mut rng, 100_000);
    let params = ComputeParameters::default();

    let mut group = c.benchmark_group("sketch");
    group.sample_size(10);

    group.bench_function("from_sequence", |b| {
        b.iter(|| Signature::from_sequence("bench", &seq, &params).unwrap());
    });

    let lower = seq.to_ascii_lowercase();
    group.bench_function("lowercase", |b| {
        b.iter(|| Signature::from_sequence("bench", &lower, &params).unwrap());
    });
}

fn compare(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let params = ComputeParameters::default();
    let sigs: Vec<Signature> = (0..50)
        .map(|i| {
            let seq = random_sequence(&mut rng, 10_000);
            Signature::from_sequence(&format!("seq{}", i), &seq, &params).unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("compare");
    group.sample_size(10);

    group.bench_function("pairwise_distances", |b| {
        b.iter(|| pairwise_distances(&sigs, EmptyPolicy::Zero).unwrap());
    });
}

criterion_group!(minhash, sketch, compare);
criterion_main!(minhash);
