//! # Navigation Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::eqpt::{GeoPoint, PositionSample};
use nav_lib::nav_ctrl::{calc_bearing, classify, InputData, NavCtrl, Params};
use util::module::State;

fn nav_ctrl_benchmark(c: &mut Criterion) {
    let target = GeoPoint::new(50.364351, -4.141873);
    let current = GeoPoint::new(50.363351, -4.143373);

    c.bench_function("calc_bearing", |b| {
        b.iter(|| calc_bearing(black_box(&current), black_box(&target)))
    });

    c.bench_function("classify", |b| b.iter(|| classify(black_box(271.5))));

    // Full per-cycle pipeline
    let mut nav_ctrl = NavCtrl::with_params(Params {
        target_lat_deg: target.lat_deg,
        target_lon_deg: target.lon_deg,
        arrival_radius_m: 2.0,
    })
    .unwrap();

    let input = InputData {
        sample: PositionSample {
            position: current,
            heading_deg: 35.0,
        },
    };

    c.bench_function("NavCtrl::proc", |b| {
        b.iter(|| nav_ctrl.proc(black_box(&input)).unwrap())
    });
}

criterion_group!(benches, nav_ctrl_benchmark);
criterion_main!(benches);
