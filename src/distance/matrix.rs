//! Dense distance matrix.

/// A dense n×n distance matrix stored in row-major order.
///
/// Indices are dense positions `0..n`, not vertex labels; the mapping lives
/// in [`ShortestPaths`](super::ShortestPaths). Unreachable pairs hold
/// `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix where every pair is unreachable except the diagonal.
    pub(crate) fn disconnected(size: usize) -> Self {
        let mut dm = Self {
            data: vec![f64::INFINITY; size * size],
            size,
        };
        for i in 0..size {
            dm.set(i, i, 0.0);
        }
        dm
    }

    /// Returns the distance from index `from` to index `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub(crate) fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    pub(crate) fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected() {
        let dm = DistanceMatrix::disconnected(3);
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    assert_eq!(dm.get(i, j), 0.0);
                } else {
                    assert!(dm.get(i, j).is_infinite());
                }
            }
        }
    }

    #[test]
    fn test_set_is_directed() {
        let mut dm = DistanceMatrix::disconnected(2);
        dm.set(0, 1, 4.0);
        assert_eq!(dm.get(0, 1), 4.0);
        assert!(dm.get(1, 0).is_infinite());
    }
}
