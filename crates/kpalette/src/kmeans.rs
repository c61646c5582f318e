use crate::rng::IndexSource;
use crate::types::Palette;
use rgb::RGB8;
use snafu::prelude::*;

pub mod init;
pub mod lloyds;

// Plain Lloyd's iteration on RGB triples with uniform random seeding. Colors
// are compared with squared Euclidean distance, so everything stays in integer
// arithmetic; centroid means are rounded half-up back to u8.

pub const MAX_K: usize = 20;
pub const DEFAULT_MAX_ITERATIONS: usize = 12;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClusterError {
    #[snafu(display("cannot cluster an empty set of samples"))]
    EmptyCandidateSet,
}

#[derive(Debug)]
pub struct Clustering {
    pub palette: Palette,
    pub iterations: usize,
    pub converged: bool,
}

/// Clusters `samples` into `k` groups and returns them as a count-sorted
/// palette.
///
/// `k = 0` is treated as 1. When there are fewer samples than `k`, centroids
/// are duplicated rather than dropped, so the palette always has `k` entries,
/// some of which may end up with a count of zero.
pub fn find_palette(
    rng: &mut impl IndexSource,
    samples: &[RGB8],
    k: usize,
    max_iterations: usize,
) -> Result<Clustering, ClusterError> {
    ensure!(!samples.is_empty(), EmptyCandidateSetSnafu);
    let k = k.max(1);

    let mut centroids = init::pick_initial(rng, samples, k);
    let mut assignments = vec![lloyds::UNASSIGNED; samples.len()];

    let result = lloyds::lloyds_loop(
        rng,
        samples,
        &mut assignments,
        &mut centroids,
        max_iterations,
    );

    tracing::debug!(
        samples = samples.len(),
        k,
        iterations = result.iterations,
        converged = result.converged,
        "k-means finished"
    );

    // Counts come from the last assignment pass, even if an update step ran
    // after it and moved or reseeded some centroids.
    let counts = lloyds::count_members(centroids.len(), &assignments);

    Ok(Clustering {
        palette: Palette::from_centroids(&centroids, &counts),
        iterations: result.iterations,
        converged: result.converged,
    })
}
