// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cubitcmd::command::{SetMembers, SweepScheme};
use cubitcmd::{CommandLog, Entity, MeshPlan, Mesher, ToCommands};

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");

    for size in [10u32, 100, 1000] {
        let faces: Vec<Entity> = (1..=size).map(Entity::surface).collect();

        group.bench_with_input(BenchmarkId::new("sideset", size), &faces, |b, faces| {
            b.iter(|| SetMembers::sideset(black_box(faces), 1).to_commands());
        });

        group.bench_with_input(BenchmarkId::new("sweep", size), &faces, |b, faces| {
            b.iter(|| {
                SweepScheme::new(&Entity::volume(1), black_box(faces), &faces[0]).to_commands()
            });
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let mut plan = MeshPlan::new("blocks");
    for id in 1..=200 {
        plan.push(cubitcmd::command::IntervalCount::new(&Entity::curve(id), 8));
    }

    group.bench_function("apply_plan", |b| {
        b.iter(|| {
            let mut mesher = Mesher::new(CommandLog::new());
            mesher.apply_plan(black_box(&plan)).unwrap();
            mesher.into_inner().len()
        });
    });

    group.bench_function("journal", |b| {
        b.iter(|| black_box(&plan).journal().len());
    });

    group.finish();
}

criterion_group!(benches, bench_formatting, bench_dispatch);
criterion_main!(benches);
