//! Uniform selection helpers over the injected generator stream.

use rand_chacha::rand_core::Rng;

/// Uniform index in `0..len`. Callers check `len > 0` first.
pub(crate) fn random_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Uniform value in `min..max_exclusive`.
pub(crate) fn random_range<R: Rng + ?Sized>(rng: &mut R, min: usize, max_exclusive: usize) -> usize {
    debug_assert!(min < max_exclusive);
    min + random_index(rng, max_exclusive - min)
}

/// Even odds, rolled as a draw below 5 out of 10.
pub(crate) fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    random_index(rng, 10) < 5
}

pub(crate) fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[random_index(rng, items.len())]
}

#[cfg(test)]
mod tests {
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    use super::*;

    #[test]
    fn random_range_stays_inside_requested_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12_345);
        for _ in 0..200 {
            let value = random_range(&mut rng, 1, 4);
            assert!((1..4).contains(&value));
        }
    }

    #[test]
    fn coin_flip_lands_both_ways() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let heads = (0..200).filter(|_| coin_flip(&mut rng)).count();
        assert!(heads > 50 && heads < 150, "got {heads} heads out of 200");
    }

    #[test]
    fn same_seed_gives_same_picks() {
        let items = ["a", "b", "c", "d"];
        let mut left = ChaCha8Rng::seed_from_u64(99);
        let mut right = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(pick(&mut left, &items), pick(&mut right, &items));
        }
    }
}
