//! Robust-design study of parallel sorting.
//!
//! Control factors: rayon thread count, sorting algorithm and the slice
//! length below which work is no longer split. Noise factor: the shape of
//! the input data. Every trial sorts a fresh copy of the dataset and records
//! the elapsed microseconds (smaller is better).
//!
//! Run with `cargo run --release --example sort_workload`.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use taguchi_robust::binding::{FromTrial, TrialBinder};
use taguchi_robust::{Error, Experiment, OptimizationGoal, Result, Trial};

const DATA_SIZE: usize = 1_000_000;
const RAND_MAX: u32 = 1_000_000;
const SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    QuickSort,
    RadixSort,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuickSort => write!(f, "QuickSort"),
            Self::RadixSort => write!(f, "RadixSort"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DataPattern {
    Random,
    Sorted,
    ReverseSorted,
    ManyDuplicates,
    NearlySorted,
}

impl DataPattern {
    const ALL: [Self; 5] = [
        Self::Random,
        Self::Sorted,
        Self::ReverseSorted,
        Self::ManyDuplicates,
        Self::NearlySorted,
    ];

    fn generate(self, size: usize, rng: &mut StdRng) -> Vec<u32> {
        match self {
            Self::Random => (0..size).map(|_| rng.gen_range(0..RAND_MAX)).collect(),
            Self::Sorted => (0..size as u32).collect(),
            Self::ReverseSorted => (1..=size as u32).rev().collect(),
            Self::ManyDuplicates => (0..size).map(|_| rng.gen_range(0..100)).collect(),
            Self::NearlySorted => {
                let mut data: Vec<u32> = (0..size as u32).collect();
                for _ in 0..size / 10 {
                    let a = rng.gen_range(0..size);
                    let b = rng.gen_range(0..size);
                    data.swap(a, b);
                }
                data
            }
        }
    }
}

impl fmt::Display for DataPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Typed view of one trial.
struct SortParams {
    threads: usize,
    algorithm: Algorithm,
    min_chunk: usize,
    pattern: DataPattern,
}

impl FromTrial for SortParams {
    fn from_trial(trial: &Trial) -> Result<Self> {
        let algorithm = match trial.require_control("Algorithm")? as u32 {
            0 => Algorithm::QuickSort,
            1 => Algorithm::RadixSort,
            other => return Err(Error::invalid_params(format!("unknown algorithm {other}"))),
        };
        let pattern = DataPattern::ALL
            .get(trial.require_noise("DataPattern")? as usize)
            .copied()
            .ok_or_else(|| Error::invalid_params("unknown data pattern"))?;

        Ok(Self {
            threads: trial.require_control("Threads")? as usize,
            algorithm,
            min_chunk: trial.require_control("MinChunk")? as usize,
            pattern,
        })
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut exp = Experiment::builder()
        .goal(OptimizationGoal::SmallerTheBetter)
        .control_factor("Threads", [2.0, 8.0])
        .control_factor("Algorithm", [0.0, 1.0])
        .control_factor("MinChunk", [1024.0, 65536.0])
        .noise_factor("DataPattern", [0.0, 1.0, 2.0, 3.0, 4.0])
        .standard_array("L4")
        .build()?;

    let mut rng = StdRng::seed_from_u64(SEED);
    let datasets: BTreeMap<DataPattern, Vec<u32>> = DataPattern::ALL
        .iter()
        .map(|&p| (p, p.generate(DATA_SIZE, &mut rng)))
        .collect();

    let binder = TrialBinder::<SortParams>::default();
    for bound in binder.bind_all(&exp.generate_trials())? {
        let params = &bound.params;
        println!(
            "Trial {}: {} | Threads={} | MinChunk={} | Pattern={}",
            bound.trial.id(),
            params.algorithm,
            params.threads,
            params.min_chunk,
            params.pattern
        );

        let mut data = datasets[&params.pattern].clone();
        let elapsed = run_trial(params, &mut data)?;
        if !data.windows(2).all(|w| w[0] <= w[1]) {
            return Err(format!("trial {} produced unsorted output", bound.trial.id()).into());
        }

        println!("  Result: {elapsed:?}\n");
        exp.add_result(&bound.trial, [elapsed.as_micros() as f64]);
    }

    println!("{}", exp.analyze());
    Ok(())
}

fn run_trial(
    params: &SortParams,
    data: &mut [u32],
) -> std::result::Result<Duration, rayon::ThreadPoolBuildError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.threads)
        .build()?;

    let start = Instant::now();
    pool.install(|| match params.algorithm {
        Algorithm::QuickSort => parallel_quick_sort(data, params.min_chunk),
        Algorithm::RadixSort => parallel_radix_sort(data, params.min_chunk),
    });
    Ok(start.elapsed())
}

/// Three-way quicksort that forks both halves until they fit in `min_chunk`.
fn parallel_quick_sort(data: &mut [u32], min_chunk: usize) {
    if data.len() <= min_chunk.max(1) {
        data.sort_unstable();
        return;
    }

    let (lt, gt) = partition(data);
    let (left, rest) = data.split_at_mut(lt);
    let right = &mut rest[gt - lt..];
    rayon::join(
        || parallel_quick_sort(left, min_chunk),
        || parallel_quick_sort(right, min_chunk),
    );
}

/// Partition around a median-of-three pivot.
///
/// Returns `(lt, gt)` such that `data[..lt] < pivot`, `data[lt..gt] == pivot`
/// and `data[gt..] > pivot`.
fn partition(data: &mut [u32]) -> (usize, usize) {
    let last = data.len() - 1;
    let mut candidates = [data[0], data[last / 2], data[last]];
    candidates.sort_unstable();
    let pivot = candidates[1];

    let (mut lt, mut i, mut gt) = (0, 0, data.len());
    while i < gt {
        match data[i].cmp(&pivot) {
            std::cmp::Ordering::Less => {
                data.swap(lt, i);
                lt += 1;
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                gt -= 1;
                data.swap(i, gt);
            }
            std::cmp::Ordering::Equal => i += 1,
        }
    }
    (lt, gt)
}

/// Radix sort: one parallel-counted pass on the most significant byte, then
/// every bucket is finished with an LSD radix sort in parallel.
fn parallel_radix_sort(data: &mut [u32], min_chunk: usize) {
    let Some(&max) = data.par_iter().max() else {
        return;
    };
    let shift = (u32::BITS - max.leading_zeros()).saturating_sub(8);
    let digit = move |v: u32| ((v >> shift) & 0xFF) as usize;

    let counts = data
        .par_chunks(min_chunk.max(1))
        .map(|chunk| {
            let mut histogram = [0usize; 256];
            for &v in chunk {
                histogram[digit(v)] += 1;
            }
            histogram
        })
        .reduce(
            || [0usize; 256],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        );

    let mut next = [0usize; 256];
    let mut sum = 0;
    for (offset, &count) in next.iter_mut().zip(&counts) {
        *offset = sum;
        sum += count;
    }

    let mut scratch = vec![0u32; data.len()];
    for &v in data.iter() {
        let d = digit(v);
        scratch[next[d]] = v;
        next[d] += 1;
    }

    let mut buckets = Vec::with_capacity(256);
    let mut rest: &mut [u32] = &mut scratch;
    for &count in &counts {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(count);
        buckets.push(head);
        rest = tail;
    }
    buckets
        .into_par_iter()
        .for_each(|bucket| lsd_radix_sort(bucket, shift));

    data.copy_from_slice(&scratch);
}

/// Stable LSD radix sort on the low `bits` bits, one byte per pass.
fn lsd_radix_sort(data: &mut [u32], bits: u32) {
    if data.len() < 2 {
        return;
    }

    let mut buf = vec![0u32; data.len()];
    let mut shift = 0;
    while shift < bits {
        let mut counts = [0usize; 257];
        for &v in data.iter() {
            counts[((v >> shift) & 0xFF) as usize + 1] += 1;
        }
        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }
        for &v in data.iter() {
            let d = ((v >> shift) & 0xFF) as usize;
            buf[counts[d]] = v;
            counts[d] += 1;
        }
        data.copy_from_slice(&buf);
        shift += 8;
    }
}
