//! Benchmarks for the enigma signal path.
//!
//! Measures machine configuration, single key-press latency and text
//! throughput across the three built-in models.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use enigma_engine::{Contact, MachineModel, MachineSettings, NullTracer, SignalPath};

/// Message typed in the throughput benchmarks.
const BENCH_TEXT: &str = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG";

fn rotors_for(model: MachineModel) -> &'static [&'static str] {
    match model {
        MachineModel::Enigma1 => &["I", "II", "III"],
        MachineModel::M3 => &["VI", "VII", "VIII"],
        MachineModel::M4 => &["Beta", "II", "IV", "I"],
    }
}

fn reflector_for(model: MachineModel) -> &'static str {
    match model {
        MachineModel::M4 => "B-thin",
        _ => "B",
    }
}

fn machine(model: MachineModel) -> SignalPath<NullTracer> {
    let mut path = SignalPath::with_tracer(NullTracer);
    path.configure(model.descriptor(), rotors_for(model), reflector_for(model))
        .unwrap();
    path.plugboard_mut()
        .unwrap()
        .set_plugs("AV BS CG DL FU HZ IN KM OW RX")
        .unwrap();
    path
}

/// Benchmarks `SignalPath::configure()` for each model.
///
/// Covers catalogue lookup, wiring validation and plugboard setup.
fn bench_configure(c: &mut Criterion) {
    let mut group = c.benchmark_group("configure");
    for model in MachineModel::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(model), &model, |b, &model| {
            b.iter(|| {
                let mut path = SignalPath::with_tracer(NullTracer);
                path.configure(
                    black_box(model.descriptor()),
                    rotors_for(model),
                    reflector_for(model),
                )
                .unwrap();
                path
            });
        });
    }
    group.finish();
}

/// Benchmarks a JSON key sheet parsed and built into a machine.
fn bench_settings_build(c: &mut Criterion) {
    let sheet = r#"{
        "model": "M4",
        "rotors": ["Beta", "II", "IV", "I"],
        "reflector": "B-thin",
        "rings": "AAAV",
        "positions": "VJNA",
        "plugs": ["AT", "BL", "DF", "GJ", "HM", "NW", "OP", "QY", "RZ", "VX"]
    }"#;
    c.bench_function("settings_from_json_build", |b| {
        b.iter(|| {
            MachineSettings::from_json(black_box(sheet))
                .unwrap()
                .build()
                .unwrap()
        });
    });
}

/// Benchmarks a single `press_key()` per model.
///
/// The machine is built once and keeps stepping between iterations, so
/// every turnover path gets exercised.
fn bench_press_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("press_key");
    group.throughput(Throughput::Elements(1));
    for model in MachineModel::ALL {
        let mut path = machine(model);
        group.bench_function(BenchmarkId::from_parameter(model), |b| {
            b.iter(|| path.press_key(black_box(Contact::E)).unwrap());
        });
    }
    group.finish();
}

/// Benchmarks `encrypt_text()` with growing message lengths.
fn bench_encrypt_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt_text");
    for repeats in [1usize, 10, 100] {
        let text = BENCH_TEXT.repeat(repeats);
        group.throughput(Throughput::Elements(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), &text, |b, text| {
            let mut path = machine(MachineModel::Enigma1);
            b.iter(|| {
                path.reset();
                path.encrypt_text(black_box(text)).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_configure,
    bench_settings_build,
    bench_press_key,
    bench_encrypt_text
);
criterion_main!(benches);
