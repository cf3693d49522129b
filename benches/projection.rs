use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rainfall_terminal::export::to_csv_bytes;
use rainfall_terminal::projection::{Projection, ProjectionConfig};
use rainfall_terminal::render::{render_html, Dashboard};

fn config_for(years: i32) -> ProjectionConfig {
    let mut config = ProjectionConfig::default();
    config.series.end_year = config.series.start_year + years - 1;
    config.historical_len = (years as usize * 2) / 3;
    config
}

/// Benchmark a full analysis run for growing year ranges
fn bench_projection_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection_run");

    for years in [81, 1_000, 10_000] {
        group.throughput(Throughput::Elements(years as u64));
        let config = config_for(years);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}years", years)),
            &config,
            |b, config| b.iter(|| Projection::run(black_box(config.clone())).unwrap()),
        );
    }

    group.finish();
}

/// Benchmark CSV encoding and HTML rendering of the reference scenario
fn bench_outputs(c: &mut Criterion) {
    let projection = Projection::run(ProjectionConfig::default()).unwrap();

    c.bench_function("csv_export", |b| {
        b.iter(|| to_csv_bytes(black_box(&projection)).unwrap())
    });

    let csv = to_csv_bytes(&projection).unwrap();
    c.bench_function("html_render", |b| {
        b.iter(|| render_html(&Dashboard::new(black_box(&projection)), &csv))
    });
}

criterion_group!(benches, bench_projection_run, bench_outputs);
criterion_main!(benches);
