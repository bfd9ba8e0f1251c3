//! Decode and encode throughput of domain record tables.
//!
//! Run with: cargo bench --package jagcfg-definitions

use archive::Archive;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use definitions::domain::{loc, obj};
use definitions::{load_definitions, store_definitions, ConfigDefinition, Domain};
use schema::PropertyValue;

fn objects(count: i32) -> Vec<obj::ObjectDefinition> {
    (0..count)
        .map(|id| {
            let mut item = obj::SUPPLIER.create_default(id);
            item.set(obj::MODEL, id % 0xFFFF).unwrap();
            item.set(obj::DISPLAY_NAME, format!("Item {id}")).unwrap();
            item.set(obj::VALUE, id * 3).unwrap();
            item.set(obj::inventory_action(1), "Wield").unwrap();
            item.set(obj::inventory_action(4), "Drop").unwrap();
            item.set(
                obj::COLOURS,
                PropertyValue::List(vec![PropertyValue::int_tuple([id % 0xFFFF, 7])]),
            )
            .unwrap();
            item
        })
        .collect()
}

fn locations(count: i32) -> Vec<loc::LocationDefinition> {
    (0..count)
        .map(|id| {
            let mut location = loc::SUPPLIER.create_default(id);
            location.set(loc::DISPLAY_NAME, "Door").unwrap();
            location.set(loc::action(0), "Open").unwrap();
            location
                .set(loc::MODELS, PropertyValue::int_list([id % 0xFFFF, 1, 2]))
                .unwrap();
            location
        })
        .collect()
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_definitions");

    for count in [100, 1_000, 10_000] {
        let archive = store_definitions(&Archive::empty(), &obj::SUPPLIER, &objects(count)).unwrap();
        group.bench_with_input(BenchmarkId::new("obj", count), &archive, |b, archive| {
            b.iter(|| load_definitions(black_box(archive), &obj::SUPPLIER).unwrap());
        });

        let archive = store_definitions(&Archive::empty(), &loc::SUPPLIER, &locations(count)).unwrap();
        group.bench_with_input(BenchmarkId::new("loc", count), &archive, |b, archive| {
            b.iter(|| Domain::Location.read(black_box(archive)).unwrap());
        });
    }

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_definitions");

    for count in [100, 1_000, 10_000] {
        let items = objects(count);
        group.bench_with_input(BenchmarkId::new("obj", count), &items, |b, items| {
            b.iter(|| store_definitions(&Archive::empty(), &obj::SUPPLIER, black_box(items)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load, bench_store);
criterion_main!(benches);
