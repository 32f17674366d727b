use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgbind::{Dialect, QueryTemplate, TableBuilder, Where};

/// Build a select template over `n` columns with `n` bound conditions:
/// SELECT col0, ... FROM t WHERE (col0 = {col0} AND ...) ...
fn build_template(n: usize) -> QueryTemplate {
    let attrs: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let builder = TableBuilder::new("t", attrs);

    let mut filter = Where::new();
    for i in 0..n {
        filter = filter.bind(format!("col{i}"), i as i64);
    }
    builder.select(Some(filter), None, None)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_template(n)));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/render");

    for n in [1, 5, 10, 50, 100] {
        let template = build_template(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &template, |b, template| {
            b.iter(|| black_box(template.render(Dialect::Indexed).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_render);
criterion_main!(benches);
