use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Gets a random number generator for a specific entity. The hash parameter
/// should uniquely identify the entity, so that each one gets its own
/// reproducible sequence derived from the base seed.
pub fn get_rnd<H: Hash>(base_seed: u64, hash: H) -> SmallRng {
    let mut hasher = DefaultHasher::new();
    hash.hash(&mut hasher);
    base_seed.hash(&mut hasher);
    let combined_seed = hasher.finish();

    SmallRng::seed_from_u64(combined_seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_and_hash_are_deterministic() {
        let mut rng1 = get_rnd(42, "line-a");
        let mut rng2 = get_rnd(42, "line-a");

        for _ in 0..10 {
            assert_eq!(rng1.random::<u32>(), rng2.random::<u32>());
        }
    }

    #[test]
    fn different_hashes_diverge() {
        let mut rng1 = get_rnd(42, "line-a");
        let mut rng2 = get_rnd(42, "line-b");

        let val1: f32 = rng1.random();
        let val2: f32 = rng2.random();

        assert_ne!(val1, val2);
    }
}
