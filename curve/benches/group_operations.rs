use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{hash_to_scalar, GroupElement, RandomField, Scalar};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_scalar(rng: &mut StdRng) -> Scalar {
    Scalar::random(rng).expect("seeded rng")
}

fn bench_point_add(c: &mut Criterion) {
    let g = GroupElement::generator();
    let h = GroupElement::mul_generator(&Scalar::from_u64(7));
    c.bench_function("point_add", |bencher| {
        bencher.iter(|| black_box(black_box(g) + black_box(h)))
    });
}

fn bench_mul_generator(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let scalar = random_scalar(&mut rng);

    c.bench_function("mul_generator", |bencher| {
        bencher.iter(|| black_box(GroupElement::mul_generator(black_box(&scalar))))
    });
}

fn bench_variable_base_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let point = GroupElement::mul_generator(&random_scalar(&mut rng));
    let scalar = random_scalar(&mut rng);

    c.bench_function("variable_base_mul", |bencher| {
        bencher.iter(|| black_box(&black_box(point) * black_box(&scalar)))
    });
}

fn bench_point_codec(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let point = GroupElement::mul_generator(&random_scalar(&mut rng));
    let encoded = point.to_hex();

    c.bench_function("point_encode", |bencher| {
        bencher.iter(|| black_box(black_box(point).to_hex()))
    });
    c.bench_function("point_decode", |bencher| {
        bencher.iter(|| black_box(GroupElement::from_hex(black_box(&encoded))))
    });
}

fn bench_hash_to_scalar(c: &mut Criterion) {
    let transcript = [0x5au8; 160];
    c.bench_function("hash_to_scalar", |bencher| {
        bencher.iter(|| black_box(hash_to_scalar(&[black_box(&transcript)])))
    });
}

criterion_group!(
    benches,
    bench_point_add,
    bench_mul_generator,
    bench_variable_base_mul,
    bench_point_codec,
    bench_hash_to_scalar
);
criterion_main!(benches);
