use ark_std::{test_rng, UniformRand};
use criterion::{black_box, criterion_group, criterion_main, Criterion, SamplingMode};
use honk::{
    circuits::avm_mini::{self, AvmMiniTraceBuilder, AVM_MINI_CIRCUIT_SIZE},
    env::init_console_subscriber,
    prover::prove,
    prover_index::ProverIndex,
    trace::Trace,
    verifier::verify,
    Fp, Kzg, PairingSRS,
};
use std::sync::Arc;

fn setup() -> (ProverIndex<Kzg>, Trace<Fp>) {
    init_console_subscriber();
    let mut rng = test_rng();
    let srs = Arc::new(unsafe { PairingSRS::create(Fp::rand(&mut rng), AVM_MINI_CIRCUIT_SIZE) });
    let relations = Arc::new(avm_mini::relations().unwrap());
    let index = ProverIndex::create(AVM_MINI_CIRCUIT_SIZE, relations, srs).unwrap();
    let mut builder = AvmMiniTraceBuilder::new();
    builder.build_circuit();
    (index, builder.trace().unwrap())
}

pub fn bench_proof_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Proof creation");
    group.sample_size(10).sampling_mode(SamplingMode::Flat);

    let (index, trace) = setup();
    group.bench_function("avm_mini proof creation (2^8)", |b| {
        b.iter(|| black_box(prove(&index, &trace).unwrap()))
    });
}

pub fn bench_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Proof verification");
    group.sample_size(10).sampling_mode(SamplingMode::Flat);

    let (index, trace) = setup();
    let verifier_index = index.verifier_index();
    let proof = prove(&index, &trace).unwrap();
    group.bench_function("avm_mini proof verification", |b| {
        b.iter(|| assert!(verify(&verifier_index, black_box(&proof))))
    });
}

criterion_group!(benches, bench_proof_creation, bench_proof_verification);
criterion_main!(benches);
