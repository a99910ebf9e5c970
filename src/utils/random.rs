#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use rand::prelude::*;
use std::cell::RefCell;

/// Provides the way to use randomized values in generic way.
pub trait Random {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max].
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the closed interval [min, max).
    fn uniform_real(&self, min: f64, max: f64) -> f64;

    /// Flips a coin and returns true if it is "heads", false otherwise.
    fn is_head_not_tails(&self) -> bool;

    /// Tests probability value in (0., 1.) range.
    fn is_hit(&self, probability: f64) -> bool;

    /// Shuffles given indices in place.
    fn shuffle(&self, indices: &mut [usize]);
}

/// A default random implementation which holds its own generator seeded at construction.
/// The same seed produces the same sequence of values, which keeps the whole search
/// deterministic.
pub struct DefaultRandom {
    rng: RefCell<SmallRng>,
}

impl DefaultRandom {
    /// Creates a new instance of `DefaultRandom` with the given seed.
    pub fn new_with_seed(seed: u64) -> Self {
        Self { rng: RefCell::new(SmallRng::seed_from_u64(seed)) }
    }
}

impl Default for DefaultRandom {
    fn default() -> Self {
        Self::new_with_seed(0)
    }
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min == max {
            return min;
        }

        debug_assert!(min < max);
        self.rng.borrow_mut().gen_range(min..=max)
    }

    fn uniform_real(&self, min: f64, max: f64) -> f64 {
        if (min - max).abs() < f64::EPSILON {
            return min;
        }

        debug_assert!(min < max);
        self.rng.borrow_mut().gen_range(min..max)
    }

    fn is_head_not_tails(&self) -> bool {
        self.rng.borrow_mut().gen_bool(0.5)
    }

    fn is_hit(&self, probability: f64) -> bool {
        self.rng.borrow_mut().gen_bool(probability.clamp(0., 1.))
    }

    fn shuffle(&self, indices: &mut [usize]) {
        indices.shuffle(&mut *self.rng.borrow_mut());
    }
}
