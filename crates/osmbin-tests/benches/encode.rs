use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use osmbin_encoder::append_osm_geo;
use osmbin_stream::{BlockStreamTarget, BlockWriterConfig, OsmStreamTarget};
use osmbin_tests::{bench_node, synthetic_extract};
use osmbin_types::OsmGeo;
use osmbin_wire::CodecConfig;

fn encode_flat(entities: &[OsmGeo]) -> Vec<u8> {
    let mut out = Vec::new();
    for geo in entities {
        append_osm_geo(&mut out, geo, &CodecConfig::default()).unwrap();
    }
    out
}

fn encode_blocks(entities: &[OsmGeo], compress: bool) -> Vec<u8> {
    let config = BlockWriterConfig {
        compress,
        ..BlockWriterConfig::default()
    };
    let mut target = BlockStreamTarget::with_config(Vec::new(), config);
    for geo in entities {
        target.add(geo).unwrap();
    }
    target.finalize().unwrap();
    target.into_inner()
}

fn bench_encode_single(c: &mut Criterion) {
    let node = bench_node();
    c.bench_function("encode_single_node", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(64);
            append_osm_geo(&mut out, &node, &CodecConfig::default()).unwrap();
            out
        });
    });
}

fn bench_encode_layouts(c: &mut Criterion) {
    let entities = synthetic_extract(10_000, 2_000, 100);
    let mut group = c.benchmark_group("encode_layout");

    group.bench_function("flat", |b| b.iter(|| encode_flat(&entities)));
    group.bench_function("blocks", |b| b.iter(|| encode_blocks(&entities, false)));
    group.bench_function("blocks_compressed", |b| {
        b.iter(|| encode_blocks(&entities, true));
    });

    group.finish();
}

fn bench_encode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_throughput");

    for nodes in [1_000, 10_000, 100_000] {
        let entities = synthetic_extract(nodes, nodes / 5, nodes / 100);
        group.throughput(Throughput::Elements(entities.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("flat", nodes),
            &entities,
            |b, e| b.iter(|| encode_flat(e)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_single,
    bench_encode_layouts,
    bench_encode_throughput
);
criterion_main!(benches);
