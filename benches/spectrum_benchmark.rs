use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use ndarray::{Array1, Array2};
use rand::distr::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use single_pca::dimred::pca::{summarize, Decomposition, PcaBuilder};
use std::time::Duration;

#[derive(Clone)]
pub struct SpectrumConfig {
    seed: u64,
    spectrum_sizes: Vec<usize>,
    thresholds: Vec<f64>,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            spectrum_sizes: vec![10, 100, 1000, 10000, 100000],
            thresholds: vec![0.5, 0.9, 0.99],
            measurement_time: 5,
            sample_size: 20,
        }
    }
}

fn create_test_spectrum(len: usize, seed: u64) -> Array1<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let value_dist = Uniform::try_from(0.0..1.0).unwrap();

    let mut values: Vec<f64> = (0..len).map(|_| value_dist.sample(&mut rng)).collect();
    values.sort_by(|a, b| b.partial_cmp(a).unwrap());
    Array1::from(values)
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &SpectrumConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_summarize(c: &mut Criterion) {
    let config = SpectrumConfig::default();
    let mut group = configure_group(c, "Spectrum_Summary", &config);

    for &len in config.spectrum_sizes.iter() {
        let spectrum = create_test_spectrum(len, config.seed + len as u64);

        group.bench_with_input(BenchmarkId::new("summarize", len), &len, |b, _| {
            b.iter(|| summarize(spectrum.view()));
        });
    }
    group.finish();
}

pub fn bench_component_selection(c: &mut Criterion) {
    let config = SpectrumConfig::default();
    let mut group = configure_group(c, "Component_Selection", &config);

    for &len in config.spectrum_sizes.iter() {
        let spectrum = create_test_spectrum(len, config.seed + len as u64);
        let mut pca = PcaBuilder::new().build::<f64>();
        pca.fit_decomposition(Decomposition::new(spectrum, Array2::zeros((1, len))))
            .unwrap();

        for &threshold in config.thresholds.iter() {
            group.bench_with_input(
                BenchmarkId::new("threshold", format!("{}_t{}", len, threshold)),
                &threshold,
                |b, &threshold| {
                    b.iter(|| pca.number_of_components(threshold).unwrap());
                },
            );
        }
    }
    group.finish();
}

criterion_group!(spectrum_benches, bench_summarize, bench_component_selection);
criterion_main!(spectrum_benches);
