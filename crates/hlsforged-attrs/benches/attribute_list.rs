//! Benchmarks for attribute-list parsing.
//!
//! Run with: cargo bench -p hlsforged-attrs

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hlsforged_attrs::AttributeList;

const SAMPLES: &[&str] = &[
    "BANDWIDTH=1280000,AVERAGE-BANDWIDTH=1000000",
    "BANDWIDTH=7680000,CODECS=\"avc1.640028,mp4a.40.2\",RESOLUTION=1920x1080,FRAME-RATE=29.97,AUDIO=\"aac\"",
    "TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"English\",DEFAULT=YES,AUTOSELECT=YES,LANGUAGE=\"en\",URI=\"main/english-audio.m3u8\"",
    "METHOD=AES-128,URI=\"https://priv.example.com/key.php?r=52\",IV=0x9C7DB8778570D05C3177C349FD9236AA",
    "ID=\"splice-6FFFFFF0\",START-DATE=\"2014-03-05T11:15:00Z\",PLANNED-DURATION=59.993,SCTE35-OUT=0xFC002F0000000000FF000014056FFFFFF000E011622DCAFF000052636200000000000A0008029896F50000008700000000",
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("attribute_list");

    group.bench_function("stream_inf", |b| {
        b.iter(|| AttributeList::parse(black_box(SAMPLES[1])))
    });

    let total: usize = SAMPLES.iter().map(|s| s.len()).sum();
    group.throughput(Throughput::Bytes(total as u64));
    group.bench_function("all_samples", |b| {
        b.iter(|| {
            for sample in SAMPLES {
                let _ = AttributeList::parse(black_box(sample));
            }
        })
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let parsed: Vec<_> = SAMPLES
        .iter()
        .filter_map(|s| AttributeList::parse(s).ok())
        .collect();

    c.bench_function("attribute_list_encode", |b| {
        b.iter(|| {
            for attrs in &parsed {
                let _ = black_box(attrs).encode();
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_encode);
criterion_main!(benches);
