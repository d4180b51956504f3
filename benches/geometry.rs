use criterion::{Criterion, black_box, criterion_group, criterion_main};

use minedirector::*;

fn expert_control() -> GameControl {
    let config = GameConfig::new((30, 16), 99);
    let field = RandomMinefieldGenerator::new(99, (15, 8), StartCell::AlwaysZero).generate(config);
    let control = GameControl::new(field);
    control.click((15, 8));
    control
}

fn bench_neighbor_queries(c: &mut Criterion) {
    let control = expert_control();

    c.bench_function("get_neighbors_unfiltered", |b| {
        b.iter(|| {
            for cell in control.get_cells() {
                black_box(cell.get_neighbors(&[]).len());
            }
        })
    });

    c.bench_function("get_neighbors_flagged", |b| {
        let filters = [CellFilter::is(CellPredicate::Flagged)];
        b.iter(|| {
            for cell in control.get_cells() {
                black_box(cell.get_neighbors(&filters).len());
            }
        })
    });
}

fn bench_trace(c: &mut Criterion) {
    let control = expert_control();

    c.bench_function("trace_corner_to_corner", |b| {
        let from = control.get_cell((0, 0)).unwrap();
        let to = control.get_cell((29, 15)).unwrap();
        b.iter(|| black_box(from.trace_to(&to, &[]).count()))
    });
}

criterion_group!(benches, bench_neighbor_queries, bench_trace);
criterion_main!(benches);
