use crate::models::common::Location;

/// A square matrix over all locations stored in row major order. Asymmetric values are
/// allowed; a large sentinel value encodes a forbidden edge.
#[derive(Clone, Debug)]
pub struct Matrix {
    size: usize,
    data: Vec<i64>,
}

impl Matrix {
    /// Creates a new instance of `Matrix` from flat row major data.
    pub fn new(size: usize, data: Vec<i64>) -> Self {
        debug_assert_eq!(data.len(), size * size);
        Self { size, data }
    }

    /// Creates a new instance of `Matrix` from nested rows.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Self {
        let size = rows.len();
        Self { size, data: rows.into_iter().flatten().collect() }
    }

    /// Returns matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the value at the given edge.
    pub fn at(&self, from: Location, to: Location) -> i64 {
        self.data[from * self.size + to]
    }

    /// Checks that the flat data describes a square matrix of the given dimension.
    pub fn is_square(&self, size: usize) -> bool {
        self.size == size && self.data.len() == size * size
    }

    /// Returns an iterator over all values.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.data.iter().copied()
    }
}
