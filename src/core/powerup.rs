//! Power-up creation rules
//!
//! A large enough match yields a power-up at the seed position instead of
//! a plain removal. Only *creation* lives in the core; rocket and bomb
//! activation effects are resolved outside it.

use crate::core::rng::SimpleRng;
use crate::types::PowerUpKind;

/// Region-size threshold for any power-up
pub const POWER_UP_MIN_SIZE: usize = 4;
/// Region-size threshold for a guaranteed bomb
pub const BOMB_MIN_SIZE: usize = 7;

/// Decide whether a match of `region_size` cells yields a power-up.
///
/// Below 4: none. 7 and up: always a bomb. In between: a uniformly random
/// row or column rocket, drawn from the injected RNG.
pub fn try_resolve(region_size: usize, rng: &mut SimpleRng) -> Option<PowerUpKind> {
    if region_size < POWER_UP_MIN_SIZE {
        return None;
    }
    if region_size >= BOMB_MIN_SIZE {
        return Some(PowerUpKind::Bomb);
    }
    if rng.next_range(2) == 0 {
        Some(PowerUpKind::RowRocket)
    } else {
        Some(PowerUpKind::ColumnRocket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_regions_yield_nothing() {
        let mut rng = SimpleRng::new(1);
        assert_eq!(try_resolve(0, &mut rng), None);
        assert_eq!(try_resolve(2, &mut rng), None);
        assert_eq!(try_resolve(3, &mut rng), None);
    }

    #[test]
    fn mid_regions_yield_rockets_only() {
        for seed in 1..50 {
            let mut rng = SimpleRng::new(seed);
            for size in POWER_UP_MIN_SIZE..BOMB_MIN_SIZE {
                let kind = try_resolve(size, &mut rng).expect("size >= 4 must yield a power-up");
                assert!(
                    matches!(kind, PowerUpKind::RowRocket | PowerUpKind::ColumnRocket),
                    "size {size} produced {kind:?}"
                );
            }
        }
    }

    #[test]
    fn both_rocket_kinds_occur() {
        let mut rng = SimpleRng::new(99);
        let mut saw_row = false;
        let mut saw_column = false;
        for _ in 0..100 {
            match try_resolve(5, &mut rng) {
                Some(PowerUpKind::RowRocket) => saw_row = true,
                Some(PowerUpKind::ColumnRocket) => saw_column = true,
                other => panic!("unexpected result {other:?}"),
            }
        }
        assert!(saw_row && saw_column);
    }

    #[test]
    fn large_regions_always_yield_bombs() {
        for seed in 1..20 {
            let mut rng = SimpleRng::new(seed);
            for size in [7, 8, 16, 100] {
                assert_eq!(try_resolve(size, &mut rng), Some(PowerUpKind::Bomb));
            }
        }
    }

    #[test]
    fn choice_is_deterministic_per_seed() {
        let mut a = SimpleRng::new(4242);
        let mut b = SimpleRng::new(4242);
        for _ in 0..50 {
            assert_eq!(try_resolve(5, &mut a), try_resolve(5, &mut b));
        }
    }
}
