use crate::rng::IndexSource;
use rgb::RGB8;

/// Picks `k` starting centroids among `samples`.
///
/// The first `min(k, n)` come from distinct positions (colors may still repeat
/// when the samples do). Any remaining slots are filled with further random
/// picks that are allowed to reuse positions.
pub fn pick_initial(rng: &mut impl IndexSource, samples: &[RGB8], k: usize) -> Vec<RGB8> {
    let n = samples.len();
    assert!(n > 0);

    let distinct = k.min(n);
    let mut used = vec![false; n];
    let mut centroids = Vec::with_capacity(k);

    while centroids.len() < distinct {
        let idx = rng.next_index(n);
        if used[idx] {
            continue;
        }
        used[idx] = true;
        centroids.push(samples[idx]);
    }

    while centroids.len() < k {
        centroids.push(samples[rng.next_index(n)]);
    }

    centroids
}
