use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const RNG_SEED: u64 = 0x5EED_2026;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Uniform over all of `i32`; nearly every value is distinct.
pub fn random_i32<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<i32> {
    (0..len).map(|_| rng.random::<i32>()).collect()
}

/// Uniform over `0..distinct`, so each value repeats about `len / distinct` times.
pub fn clustered_i32<R: Rng + ?Sized>(rng: &mut R, len: usize, distinct: i32) -> Vec<i32> {
    assert!(distinct > 0);
    (0..len).map(|_| rng.random_range(0..distinct)).collect()
}

/// Random values with the low `log2(len)` bits cleared.
///
/// With a bucket table of `len.next_power_of_two()` slots every value lands in
/// slot zero.
pub fn degenerate_i32<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<i32> {
    let low_bits = len.next_power_of_two().trailing_zeros().min(31);
    let mask = !((1_u32 << low_bits) - 1) as i32;
    (0..len).map(|_| rng.random::<i32>() & mask).collect()
}
