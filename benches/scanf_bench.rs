use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonwalk::{scanf, Out};

fn bench_scanf(c: &mut Criterion) {
    let doc = br#"{id:42,name:"item-42",active:true}"#;
    c.bench_function("scanf_object", |b| {
        b.iter(|| {
            let mut id: i64 = 0;
            let mut name = String::new();
            let mut active = false;
            let matched = scanf(
                black_box(doc),
                "{id:%d,name:%s,active:%B}",
                &mut [Out::I64(&mut id), Out::Str(&mut name), Out::Bool(&mut active)],
            )
            .unwrap();
            black_box(matched);
        })
    });
}

criterion_group!(benches, bench_scanf);
criterion_main!(benches);
