//! Criterion benchmarks for agent operations and command dispatch.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use toybot::{execute_line, Agent, Heading, Surface};

fn random_script(n: usize, seed: u64) -> Vec<&'static str> {
    const LINES: [&str; 5] = ["MOVE", "LEFT", "RIGHT", "MOVE 2", "SPIN 0.3"];
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| LINES[rng.gen_range(0..LINES.len())]).collect()
}

fn bench_agent(c: &mut Criterion) {
    let table = Surface::new(100.0, 100.0).unwrap();
    let mut group = c.benchmark_group("agent");
    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("quarter_turn_walk", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let mut a = Agent::new(Some(&table));
                    a.place(50.0, 50.0, Heading::North);
                    a
                },
                |mut a| {
                    for k in 0..n {
                        if k % 3 == 0 {
                            a.left();
                        } else {
                            a.advance();
                        }
                    }
                    a
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("execute_lines", n), &n, |b, &n| {
            let script = random_script(n, 7);
            b.iter_batched(
                || {
                    let mut a = Agent::new(Some(&table));
                    a.place(50.0, 50.0, Heading::East);
                    a
                },
                |mut a| {
                    for line in &script {
                        let _ = execute_line(&mut a, line);
                    }
                    a
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_agent);
criterion_main!(benches);
