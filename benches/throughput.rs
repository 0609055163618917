use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use qson::cabrillo::cabrillo_to_qson;

fn synthetic_log(contest: &str, qsos: usize) -> String {
    let mut text = format!("START-OF-LOG: 3.0\nCONTEST: {contest}\nCALLSIGN: K1ABC\n");
    for i in 0..qsos {
        let minute = (qsos - i) % 1440;
        text.push_str(&format!(
            "QSO: 14025 CW 2023-11-25 {:02}{:02} K1ABC {} A 99 CT W{}XYZ {} B 12 NE 0\n",
            minute / 60,
            minute % 60,
            i + 1,
            i % 10,
            i + 1,
        ));
    }
    text.push_str("END-OF-LOG:\n");
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_sweepstakes");
    for n in [100usize, 1_000, 10_000] {
        let text = synthetic_log("ARRL-SS-CW", n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| cabrillo_to_qson(text));
        });
    }
    group.finish();
}

fn bench_to_json(c: &mut Criterion) {
    let doc = cabrillo_to_qson(&synthetic_log("ARRL-SS-CW", 5_000));
    c.bench_function("to_json_5k", |b| {
        b.iter(|| doc.to_json().expect("json"));
    });
}

criterion_group!(benches, bench_parse, bench_to_json);
criterion_main!(benches);
