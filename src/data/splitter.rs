// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Randomly shuffles records and splits them into two sets:
//   - Training set: used to update model weights
//   - Test set:     evaluated at the end of every epoch
//
// The split index is round(n * train_fraction), clamped to n.
// Passing a seed makes the shuffle reproducible across runs.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Randomly shuffle `samples` and split into (train, test).
///
/// # Example
/// ```
/// use dga_detector::data::splitter::split_train_test;
/// let (train, test) = split_train_test((0..10).collect::<Vec<_>>(), 0.7, Some(7));
/// assert_eq!((train.len(), test.len()), (7, 3));
/// ```
pub fn split_train_test<T>(mut samples: Vec<T>, train_fraction: f64, seed: Option<u64>) -> (Vec<T>, Vec<T>) {
    match seed {
        Some(seed) => samples.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => samples.shuffle(&mut rand::thread_rng()),
    }

    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    let split_at = split_at.min(total);

    let test = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} test ({}% / {}%)",
        samples.len(),
        test.len(),
        (samples.len() * 100) / total.max(1),
        (test.len()    * 100) / total.max(1),
    );

    (samples, test)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.7, None);
        assert_eq!(train.len(), 70);
        assert_eq!(test.len(),  30);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize> = (0..50).collect();
        let (train, test)     = split_train_test(items, 0.7, None);
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 0.7, None);
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_full_training_split() {
        let items: Vec<usize> = (0..10).collect();
        let (train, test)     = split_train_test(items, 1.0, None);
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }

    #[test]
    fn test_seeded_split_is_reproducible() {
        let a = split_train_test((0..20).collect::<Vec<usize>>(), 0.5, Some(42));
        let b = split_train_test((0..20).collect::<Vec<usize>>(), 0.5, Some(42));
        assert_eq!(a, b);
    }
}
