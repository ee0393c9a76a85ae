use apiviz::trace::Trace;
use apiviz::visualize::{ColorMap, Options, Rendering};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const CALLS: &[&str] = &[
    "GetModuleHandleW",
    "GetProcAddress",
    "RtlAllocateHeap",
    "RtlFreeHeap",
    "RtlEnterCriticalSection",
    "RtlLeaveCriticalSection",
    "NtQueryInformationProcess",
    "CloseHandle",
];

// A synthetic drltrace log with `n` calls, each followed by two argument lines.
fn synthetic_trace(n: usize) -> Vec<u8> {
    let mut out = String::new();
    for i in 0..n {
        let call = CALLS[(i * 7 + i / 3) % CALLS.len()];
        out.push_str(&format!(
            "~~4424~~ ntdll.dll!{}\n    arg 0: 0x{:016x}\n    arg 1: 0x{:016x}\n",
            call,
            i,
            i * 2
        ));
    }
    out.into_bytes()
}

fn visualize_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("visualize");
    for &n in &[1_000usize, 100_000] {
        let bytes = synthetic_trace(n);
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse", n), &bytes, |b, data| {
            b.iter(|| Trace::from_reader(data.as_slice()).unwrap())
        });

        let trace = Trace::from_reader(bytes.as_slice()).unwrap();
        let opt = Options::default();
        group.bench_with_input(BenchmarkId::new("render", n), &trace, |b, trace| {
            b.iter(|| {
                let colors =
                    ColorMap::assign(trace.unique_calls().iter().map(String::as_str), &opt)
                        .unwrap();
                let rendering = Rendering::new(&colors, trace, false, true).unwrap();
                rendering.to_image()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, visualize_benchmark);
criterion_main!(benches);
