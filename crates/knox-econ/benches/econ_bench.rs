use criterion::{black_box, criterion_group, criterion_main, Criterion};
use knox_core::{City, Continent, NationSnapshot, RawResource};

fn build_nation(n_cities: usize) -> NationSnapshot {
    let city = City {
        coal_mines: 10,
        iron_mines: 10,
        steel_mills: 5,
        coal_power: 3,
        farms: 20,
        land: 3000.0,
        infrastructure: 2500.0,
        powered: true,
        ..Default::default()
    };
    let mut nation = NationSnapshot {
        population: Some(3_000_000.0),
        soldiers: Some(250_000),
        continent: Some(Continent::Europe),
        cities: Some(vec![city; n_cities]),
        ..Default::default()
    };
    nation.projects.iron_works = true;
    nation.projects.resource_production_center = true;
    nation
}

fn bench_costs(c: &mut Criterion) {
    c.bench_function("infra 0 -> 5000", |b| {
        b.iter(|| knox_econ::infrastructure_cost(black_box(0.0), black_box(5000.0), None))
    });
    c.bench_function("land 0 -> 20000", |b| {
        b.iter(|| knox_econ::land_cost(black_box(0.0), black_box(20_000.0), None))
    });
    c.bench_function("city 1 -> 60", |b| {
        b.iter(|| knox_econ::city_cost(black_box(1), black_box(60), None))
    });
}

fn bench_revenue(c: &mut Criterion) {
    let nation = build_nation(40);
    c.bench_function("coal revenue 40 cities", |b| {
        b.iter(|| knox_econ::raw_revenue(black_box(&nation), RawResource::Coal))
    });
}

criterion_group!(benches, bench_costs, bench_revenue);
criterion_main!(benches);
