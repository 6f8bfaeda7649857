// SPDX-License-Identifier: LGPL-3.0-or-later

//! Criterion benchmarks for the gate pipeline and its sub-units.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gate_dsp_units::dynamics::{EnvelopeFollower, Expander, NoiseGate};
use gate_dsp_units::meters::PeakDetector;

const BUF_SIZE: usize = 1024;

/// Generate a deterministic white noise buffer using a simple LCG.
fn white_noise(len: usize) -> Vec<f32> {
    let mut state: u64 = 0xDEAD_BEEF_CAFE_BABE;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((state >> 33) as i32) as f32 / (i32::MAX as f32)
        })
        .collect()
}

fn bench_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate");
    let input = white_noise(BUF_SIZE);
    let sidechain = white_noise(BUF_SIZE);
    let mut output = vec![0.0f32; BUF_SIZE];

    group.bench_function("process", |b| {
        let mut gate = NoiseGate::new();
        gate.set_sample_rate(48000.0)
            .set_threshold(-20.0)
            .set_reduction(-100.0)
            .set_slope(3.0)
            .set_attack(10.0)
            .set_release(100.0)
            .update_settings();

        b.iter(|| {
            gate.process(black_box(&mut output), black_box(&input), None);
        });
    });

    group.bench_function("process_sidechain", |b| {
        let mut gate = NoiseGate::new();
        gate.set_sample_rate(48000.0)
            .set_threshold(-20.0)
            .set_reduction(-100.0)
            .set_slope(3.0)
            .set_attack(10.0)
            .set_release(100.0)
            .update_settings();

        b.iter(|| {
            gate.process(
                black_box(&mut output),
                black_box(&input),
                Some(black_box(&sidechain)),
            );
        });
    });

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope_follower");
    let input = white_noise(BUF_SIZE);

    group.bench_function("process_sample", |b| {
        let mut env = EnvelopeFollower::new();
        env.set_sample_rate(48000.0).set_release(100.0);
        env.update_settings();

        b.iter(|| {
            for s in &input {
                black_box(env.process_sample(black_box(*s)));
            }
        });
    });

    group.finish();
}

fn bench_expander(c: &mut Criterion) {
    let mut group = c.benchmark_group("expander");
    let levels: Vec<f32> = white_noise(BUF_SIZE).iter().map(|s| s * 75.0 - 75.0).collect();

    group.bench_function("expand", |b| {
        let mut exp = Expander::new();
        exp.set_threshold(-20.0)
            .set_reduction(-100.0)
            .set_slope(3.0)
            .update_settings();

        b.iter(|| {
            for db in &levels {
                black_box(exp.expand(black_box(*db)));
            }
        });
    });

    group.finish();
}

fn bench_peak_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("peak_detector");
    let input: Vec<f32> = white_noise(BUF_SIZE).iter().map(|s| s.abs()).collect();

    group.bench_function("process_peaks", |b| {
        let mut det = PeakDetector::new();
        det.set_sample_rate(48000.0).update_settings();

        b.iter(|| {
            for s in &input {
                black_box(det.process_peaks(black_box(*s)));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_gate,
    bench_envelope,
    bench_expander,
    bench_peak_detector
);
criterion_main!(benches);
