//! Weighted random selection.
//!
//! Both enemy-type picks and loot rolls go through [`pick_weighted`], so the
//! walk order and edge-case policy are identical at every call site.

use rand::Rng;

/// Picks an entry proportionally to its weight.
///
/// Draws `r` uniformly in `[0, total_weight)` and walks the slice,
/// accumulating weights until the running sum reaches `r`. A zero total
/// weight (or an all-zero slice) falls back to the first entry; an empty
/// slice yields `None`.
pub fn pick_weighted<'a, T, R, F>(rng: &mut R, entries: &'a [T], weight: F) -> Option<&'a T>
where
    R: Rng,
    F: Fn(&T) -> f64,
{
    let first = entries.first()?;

    let total: f64 = entries.iter().map(|e| weight(e).max(0.0)).sum();
    if total <= 0.0 {
        return Some(first);
    }

    let roll = rng.gen::<f64>() * total;
    let mut acc = 0.0;
    for entry in entries {
        acc += weight(entry).max(0.0);
        if roll <= acc {
            return Some(entry);
        }
    }

    // Floating-point slack can leave `roll` just past the last accumulator.
    entries.last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_empty_slice_yields_none() {
        let mut rng = test_rng();
        let entries: [(&str, f64); 0] = [];
        assert!(pick_weighted(&mut rng, &entries, |e| e.1).is_none());
    }

    #[test]
    fn test_zero_total_weight_falls_back_to_first() {
        let mut rng = test_rng();
        let entries = [("a", 0.0), ("b", 0.0), ("c", 0.0)];

        for _ in 0..50 {
            let picked = pick_weighted(&mut rng, &entries, |e| e.1).unwrap();
            assert_eq!(picked.0, "a");
        }
    }

    #[test]
    fn test_single_entry_always_selected() {
        let mut rng = test_rng();
        let entries = [("only", 0.001)];

        for _ in 0..100 {
            let picked = pick_weighted(&mut rng, &entries, |e| e.1).unwrap();
            assert_eq!(picked.0, "only");
        }
    }

    #[test]
    fn test_zero_weight_entry_is_skipped() {
        let mut rng = test_rng();
        let entries = [("never", 0.0), ("always", 1.0)];

        let mut saw_never = false;
        for _ in 0..500 {
            if pick_weighted(&mut rng, &entries, |e| e.1).unwrap().0 == "never" {
                saw_never = true;
            }
        }
        assert!(!saw_never, "zero-weight entry should never be selected");
    }

    #[test]
    fn test_equal_weights_converge_to_uniform() {
        let mut rng = test_rng();
        let entries = [("a", 1.0), ("b", 1.0), ("c", 1.0), ("d", 1.0)];

        let mut counts: HashMap<&str, u32> = HashMap::new();
        let draws = 10_000;
        for _ in 0..draws {
            let picked = pick_weighted(&mut rng, &entries, |e| e.1).unwrap();
            *counts.entry(picked.0).or_insert(0) += 1;
        }

        // Expected 2500 each; allow 10% tolerance
        for name in ["a", "b", "c", "d"] {
            let count = counts.get(name).copied().unwrap_or(0);
            assert!(
                count > 2250 && count < 2750,
                "{} drawn {} times of {}, expected ~2500",
                name,
                count,
                draws
            );
        }
    }

    #[test]
    fn test_heavier_entries_drawn_more_often() {
        let mut rng = test_rng();
        let entries = [("light", 1.0), ("heavy", 9.0)];

        let mut heavy = 0;
        for _ in 0..5000 {
            if pick_weighted(&mut rng, &entries, |e| e.1).unwrap().0 == "heavy" {
                heavy += 1;
            }
        }
        // Expected ~4500
        assert!(heavy > 4200, "heavy drawn only {} of 5000", heavy);
    }

    #[test]
    fn test_negative_weights_treated_as_zero() {
        let mut rng = test_rng();
        let entries = [("bad", -5.0), ("good", 1.0)];

        for _ in 0..200 {
            let picked = pick_weighted(&mut rng, &entries, |e| e.1).unwrap();
            assert_eq!(picked.0, "good");
        }
    }
}
