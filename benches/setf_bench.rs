use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonwalk::{setf, SetOp};

fn bench_setf(c: &mut Criterion) {
    let doc = br#"{id:42,name:"item-42",active:true}"#;
    c.bench_function("setf_replace_scalar", |b| {
        b.iter(|| {
            let (out, _matched) = setf(black_box(doc), ".id", SetOp::Replace(b"43")).unwrap();
            black_box(out);
        })
    });
}

criterion_group!(benches, bench_setf);
criterion_main!(benches);
