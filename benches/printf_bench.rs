use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonwalk::{printf_to_vec, Arg};

fn bench_printf(c: &mut Criterion) {
    c.bench_function("printf_object", |b| {
        b.iter(|| {
            let out = printf_to_vec(
                black_box("{id:%d,name:%Q,active:%B}"),
                &mut [Arg::I64(42), Arg::Str("item-42"), Arg::Bool(true)],
            )
            .unwrap();
            black_box(out);
        })
    });
}

criterion_group!(benches, bench_printf);
criterion_main!(benches);
