//! Pipeline benchmark: feature extraction and full triage runs over synthetic batches.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use log_triage::config::{FeaturesConfig, TriageConfig};
use log_triage::features::FeatureExtractor;
use log_triage::source::{RecordSource, SyntheticSource};
use log_triage::TriagePipeline;

fn bench_feature_extraction(c: &mut Criterion) {
    let extractor = FeatureExtractor::new(FeaturesConfig::default());
    let batch = SyntheticSource::new(500, Some(1)).read_batch().unwrap();

    c.bench_function("feature_extract_500_records", |b| {
        b.iter(|| black_box(extractor.extract(black_box(&batch))))
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let pipeline = TriagePipeline::new(TriageConfig::default()).unwrap();

    let mut g = c.benchmark_group("triage_by_batch_size");
    for n in [50, 500, 2000] {
        let batch = SyntheticSource::new(n, Some(7)).read_batch().unwrap();
        g.bench_function(format!("records_{}", n).as_str(), |b| {
            b.iter(|| black_box(pipeline.run(black_box(&batch)).unwrap()))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_feature_extraction, bench_full_pipeline);
criterion_main!(benches);
