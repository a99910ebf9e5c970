#[cfg(test)]
#[path = "../../../tests/unit/models/common/load_test.rs"]
mod load_test;

use crate::models::common::LoadValue;

/// An associative summary of the load carried along a contiguous visit sequence in a single
/// capacity dimension, under delivery/pickup semantics: deliveries are on board from the trip
/// start, pickups accumulate towards the trip end.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadSegment {
    delivery: LoadValue,
    pickup: LoadValue,
    load: LoadValue,
}

impl LoadSegment {
    /// Creates a new instance of `LoadSegment`.
    pub fn new(delivery: LoadValue, pickup: LoadValue) -> Self {
        Self { delivery, pickup, load: delivery.max(pickup) }
    }

    /// Concatenates two load summaries.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            delivery: self.delivery + other.delivery,
            pickup: self.pickup + other.pickup,
            load: (self.load + other.delivery).max(other.load + self.pickup),
        }
    }

    /// Returns total delivery amount of the sequence.
    pub fn delivery(&self) -> LoadValue {
        self.delivery
    }

    /// Returns total pickup amount of the sequence.
    pub fn pickup(&self) -> LoadValue {
        self.pickup
    }

    /// Returns the maximum load carried at any point of the sequence.
    pub fn load(&self) -> LoadValue {
        self.load
    }

    /// Returns the amount by which the maximum carried load exceeds given capacity.
    pub fn excess(&self, capacity: LoadValue) -> LoadValue {
        (self.load - capacity).max(0)
    }
}
