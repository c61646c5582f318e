use crate::rng::IndexSource;
use crate::types::squared_distance;
use rgb::RGB8;

/// Assignment of a sample that has not been through an assignment pass yet.
pub const UNASSIGNED: usize = usize::MAX;

/// Index of the nearest centroid and its squared distance. Only a strictly
/// smaller distance replaces the current best, so ties go to the lowest index.
#[inline]
pub fn nearest_centroid(point: RGB8, centroids: &[RGB8]) -> (usize, u32) {
    let mut min = squared_distance(point, centroids[0]);
    let mut min_idx = 0;
    for (j, &centroid) in centroids.iter().enumerate().skip(1) {
        let d = squared_distance(point, centroid);
        if d < min {
            min = d;
            min_idx = j;
        }
    }
    (min_idx, min)
}

/// Reassigns every sample and returns how many assignments changed.
#[inline]
pub fn assign_points(samples: &[RGB8], centroids: &[RGB8], assignments: &mut [usize]) -> usize {
    let mut changed = 0;
    for (&sample, assignment) in samples.iter().zip(assignments.iter_mut()) {
        let (nearest, _) = nearest_centroid(sample, centroids);
        if *assignment != nearest {
            *assignment = nearest;
            changed += 1;
        }
    }
    changed
}

pub fn count_members(k: usize, assignments: &[usize]) -> Vec<usize> {
    let mut counts = vec![0usize; k];
    for &assigned in assignments {
        if assigned != UNASSIGNED {
            counts[assigned] += 1;
        }
    }
    counts
}

#[inline]
fn rounded_mean(sum: u64, count: u64) -> u8 {
    ((sum + count / 2) / count) as u8
}

/// Moves every centroid that has members to the rounded mean of its members.
/// Centroids without members are left untouched; their count is 0 in the
/// returned vector.
#[inline]
pub fn update_centroids(
    samples: &[RGB8],
    assignments: &[usize],
    centroids: &mut [RGB8],
) -> Vec<usize> {
    let k = centroids.len();
    let mut counts = vec![0usize; k];
    let mut sums = vec![[0u64; 3]; k];

    for (sample, &assigned) in samples.iter().zip(assignments) {
        assert!(assigned < k);

        counts[assigned] += 1;
        let sum = &mut sums[assigned];
        sum[0] += sample.r as u64;
        sum[1] += sample.g as u64;
        sum[2] += sample.b as u64;
    }

    for ((centroid, &count), sum) in centroids.iter_mut().zip(&counts).zip(&sums) {
        if count == 0 {
            continue;
        }
        let count = count as u64;
        *centroid = RGB8 {
            r: rounded_mean(sum[0], count),
            g: rounded_mean(sum[1], count),
            b: rounded_mean(sum[2], count),
        };
    }

    counts
}

#[derive(Debug, PartialEq, Eq)]
pub struct LloydsLoopResult {
    pub iterations: usize,
    pub converged: bool,
}

/// Alternates assignment and update passes until an assignment pass changes
/// nothing or `max_iterations` passes have run.
///
/// A pass that changes nothing ends the loop before its update step. Starved
/// centroids are reseeded from a random sample during the update step.
pub fn lloyds_loop(
    rng: &mut impl IndexSource,
    samples: &[RGB8],
    assignments: &mut [usize],
    centroids: &mut [RGB8],
    max_iterations: usize,
) -> LloydsLoopResult {
    assert!(!samples.is_empty());
    assert!(!centroids.is_empty());
    assert_eq!(samples.len(), assignments.len());

    for i in 0..max_iterations {
        let changed = assign_points(samples, centroids, assignments);
        tracing::trace!(iteration = i + 1, changed, "assignment pass");

        if changed == 0 {
            return LloydsLoopResult {
                iterations: i + 1,
                converged: true,
            };
        }

        let counts = update_centroids(samples, assignments, centroids);

        for (centroid, &count) in centroids.iter_mut().zip(&counts) {
            if count == 0 {
                *centroid = samples[rng.next_index(samples.len())];
            }
        }
    }

    LloydsLoopResult {
        iterations: max_iterations,
        converged: false,
    }
}
