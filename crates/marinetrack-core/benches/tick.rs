use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marinetrack_core::map::HeadlessMap;
use marinetrack_core::prelude::*;

fn context(ambient_count: u32) -> (SimulationContext<HeadlessMap>, ManualTimerHost) {
    let config = SimulationConfig {
        ambient_count,
        seed: Some(42),
        ..Default::default()
    };
    let mut ctx = SimulationContext::new(config, SystemClock).expect("valid default config");
    let mut host = ManualTimerHost::new();
    ctx.mount(&mut host).expect("fresh scheduler");
    ctx.attach_map(HeadlessMap::new());
    (ctx, host)
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for n in [42, 500, 5000] {
        group.bench_function(format!("{n}_vessels"), |b| {
            let (mut ctx, _host) = context(n);
            b.iter(|| black_box(ctx.fire_tick()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
