use criterion::{
    BatchSize,
    Criterion,
    criterion_group,
    criterion_main
};
use maze_game::cells::Cartesian2DCoordinate;
use maze_game::generators;
use maze_game::grids::{large_rect_grid, LargeRectangularGrid};
use maze_game::pathing;
use maze_game::solvers::{PathSolver, SolveStrategy};
use maze_game::units::{ColumnLength, RowLength};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn maze(side: usize) -> LargeRectangularGrid {
    let mut rng = XorShiftRng::seed_from_u64(side as u64);
    let mut g = large_rect_grid(RowLength(side), ColumnLength(side)).unwrap();
    generators::randomized_kruskal(&mut g, &mut rng);
    g
}

fn bench_reachable_set(c: &mut Criterion) {
    c.bench_function("reachable_set", |b| {
        let g = maze(200);
        let start_coord = Cartesian2DCoordinate::new(100, 100);
        b.iter(|| pathing::reachable_set(&g, start_coord, &[]))
    });
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = maze(200);
        let start_coord = Cartesian2DCoordinate::new(150, 150);
        b.iter(|| pathing::Distances::new(&g, start_coord))
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    c.bench_function("shortest_path", |b| {
        let g = maze(200);
        let distances = pathing::Distances::new(&g, g.start()).unwrap();
        let end_coord = g.goal();
        b.iter(|| pathing::shortest_path(&g, &distances, end_coord))
    });
}

fn bench_solvers(c: &mut Criterion) {
    let strategies = [("solve_guided", SolveStrategy::Guided { show_checked: false }),
                      ("solve_depth_first", SolveStrategy::DepthFirst),
                      ("solve_breadth_first", SolveStrategy::BreadthFirst)];
    let g = maze(40);
    let links = g.iter_links().collect::<Vec<_>>();

    for &(name, strategy) in &strategies {
        c.bench_function(name, |b| {
            b.iter_batched(|| {
                               let mut copy = large_rect_grid(RowLength(40), ColumnLength(40))
                                   .unwrap();
                               for &(from, to) in &links {
                                   copy.link(from, to).unwrap();
                               }
                               copy
                           },
                           |mut copy| {
                               let mut solver = PathSolver::for_grid(&copy);
                               solver.solve_to_completion(&mut copy, strategy)
                           },
                           BatchSize::SmallInput)
        });
    }
}

criterion_group!(
    benches,
    bench_reachable_set,
    bench_distances,
    bench_shortest_path,
    bench_solvers
);
criterion_main!(benches);
