use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SIZE: usize = 10_000;

// Deterministic pseudo-random key sequence.
#[derive(Clone, Copy)]
struct RandomKeys {
    state: usize,
}

impl RandomKeys {
    fn new() -> Self {
        RandomKeys { state: 0 }
    }
}

impl Iterator for RandomKeys {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        // Add 1 then multiply by some 32 bit prime.
        self.state = self.state.wrapping_add(1).wrapping_mul(3_787_392_781);
        Some(self.state)
    }
}

fn read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");

    group.bench_function("quince", |b| {
        let m = quince::HashMap::<usize, usize>::new();
        for i in RandomKeys::new().take(SIZE) {
            m.insert(i, i);
        }

        b.iter(|| {
            for i in RandomKeys::new().take(SIZE) {
                black_box(assert_eq!(m.get(&i), Some(i)));
            }
        });
    });

    group.bench_function("std", |b| {
        let mut m = std::collections::HashMap::<usize, usize>::default();
        for i in RandomKeys::new().take(SIZE) {
            m.insert(i, i);
        }

        b.iter(|| {
            for i in RandomKeys::new().take(SIZE) {
                black_box(assert_eq!(m.get(&i), Some(&i)));
            }
        });
    });

    group.bench_function("dashmap", |b| {
        let m = dashmap::DashMap::<usize, usize>::default();
        for i in RandomKeys::new().take(SIZE) {
            m.insert(i, i);
        }

        b.iter(|| {
            for i in RandomKeys::new().take(SIZE) {
                black_box(assert_eq!(m.get(&i).map(|v| *v), Some(i)));
            }
        });
    });

    group.finish();
}

fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    group.bench_function("quince", |b| {
        b.iter(|| {
            let m = quince::HashMap::<usize, usize>::new();
            for i in RandomKeys::new().take(SIZE) {
                m.insert(i, i);
            }
            black_box(m)
        });
    });

    group.bench_function("std", |b| {
        b.iter(|| {
            let mut m = std::collections::HashMap::<usize, usize>::default();
            for i in RandomKeys::new().take(SIZE) {
                m.insert(i, i);
            }
            black_box(m)
        });
    });

    group.bench_function("dashmap", |b| {
        b.iter(|| {
            let m = dashmap::DashMap::<usize, usize>::default();
            for i in RandomKeys::new().take(SIZE) {
                m.insert(i, i);
            }
            black_box(m)
        });
    });

    group.finish();
}

criterion_group!(benches, read, insert);
criterion_main!(benches);
