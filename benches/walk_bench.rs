use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonwalk::{walk_default, Event};

fn sample_document(n: usize) -> String {
    let mut s = String::from("{items:[");
    for i in 0..n {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!("{{id:{i},name:\"item-{i}\",active:true}}"));
    }
    s.push_str("]}");
    s
}

fn bench_walk(c: &mut Criterion) {
    let doc = sample_document(1000);
    c.bench_function("walk_1000_objects", |b| {
        b.iter(|| {
            let mut count = 0usize;
            walk_default(black_box(doc.as_bytes()), &mut |_ev: Event<'_>| {
                count += 1;
            });
            black_box(count);
        })
    });
}

criterion_group!(benches, bench_walk);
criterion_main!(benches);
