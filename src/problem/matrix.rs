//! Dense asymmetric cost matrix and tour evaluation.

use super::tour::Tour;
use super::Cost;
use crate::error::{ConfigError, ValidationError};

/// Immutable N×N matrix of non-negative arc costs, N ≥ 2.
///
/// `cost(i, j)` may differ from `cost(j, i)`. Diagonal entries are never read
/// by evaluation and are not validated, so TSPLIB-style sentinels such as
/// `9999` or `100000000` on the diagonal are accepted as-is.
///
/// # Examples
///
/// ```
/// use atsp_metaheur::problem::CostMatrix;
///
/// let m = CostMatrix::new(vec![
///     vec![0, 1, 9],
///     vec![9, 0, 1],
///     vec![1, 9, 0],
/// ]).unwrap();
/// assert_eq!(m.evaluate(&[0, 1, 2]).unwrap(), 3);
/// assert_eq!(m.evaluate(&[0, 2, 1]).unwrap(), 27);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<Cost>>", into = "Vec<Vec<Cost>>")
)]
pub struct CostMatrix {
    n: usize,
    costs: Vec<Cost>,
}

impl CostMatrix {
    /// Builds a matrix from rows, checking shape and signs.
    pub fn new(rows: Vec<Vec<Cost>>) -> Result<Self, ConfigError> {
        let n = rows.len();
        if n == 0 {
            return Err(ConfigError::EmptyMatrix);
        }
        for (row, r) in rows.iter().enumerate() {
            if r.len() != n {
                return Err(ConfigError::NotSquare {
                    row,
                    len: r.len(),
                    expected: n,
                });
            }
        }
        Self::from_flat(n, rows.into_iter().flatten().collect())
    }

    /// Builds a matrix from `n * n` row-major values.
    pub fn from_flat(n: usize, costs: Vec<Cost>) -> Result<Self, ConfigError> {
        if n == 0 || costs.is_empty() {
            return Err(ConfigError::EmptyMatrix);
        }
        let expected = n
            .checked_mul(n)
            .ok_or(ConfigError::TooLarge { dimension: n })?;
        if costs.len() != expected {
            return Err(ConfigError::NotSquare {
                row: costs.len() / n,
                len: costs.len() % n,
                expected: n,
            });
        }
        if n < 2 {
            return Err(ConfigError::TooSmall { dimension: n });
        }
        for from in 0..n {
            for to in 0..n {
                let cost = costs[from * n + to];
                if from != to && cost < 0 {
                    return Err(ConfigError::NegativeCost { from, to, cost });
                }
            }
        }
        Ok(Self { n, costs })
    }

    /// Number of vertices.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Cost of the arc `from -> to`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> Cost {
        self.costs[from * self.n + to]
    }

    /// Row `from` as a slice of outgoing costs.
    #[inline]
    pub fn row(&self, from: usize) -> &[Cost] {
        &self.costs[from * self.n..(from + 1) * self.n]
    }

    /// True when `cost(i, j) == cost(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.cost(i, j) == self.cost(j, i)))
    }

    /// Cost of a closed tour given as a vertex sequence.
    ///
    /// Sums every consecutive arc plus the closing arc from the last vertex
    /// back to the first. Fails if `vertices` is not a permutation of
    /// `0..dimension()`.
    pub fn evaluate(&self, vertices: &[usize]) -> Result<Cost, ValidationError> {
        Tour::check(vertices, self.n)?;
        Ok(self.cycle_cost(vertices))
    }

    /// Cost of an already validated tour.
    ///
    /// # Panics
    ///
    /// Panics if the tour was built for a larger matrix.
    pub fn tour_cost(&self, tour: &Tour) -> Cost {
        self.cycle_cost(tour.as_slice())
    }

    /// Unchecked cycle cost. `vertices` must be non-empty and in range.
    #[inline]
    pub(crate) fn cycle_cost(&self, vertices: &[usize]) -> Cost {
        let open: Cost = vertices
            .windows(2)
            .map(|w| self.cost(w[0], w[1]))
            .sum();
        open + self.cost(vertices[vertices.len() - 1], vertices[0])
    }

    /// Change in cycle cost if positions `i` and `j` of `vertices` were swapped.
    ///
    /// Only the (at most four) arcs touching the two positions are examined.
    /// The result always equals `cycle_cost(swapped) - cycle_cost(vertices)`.
    pub fn swap_delta(&self, vertices: &[usize], i: usize, j: usize) -> Cost {
        let n = vertices.len();
        if i == j || n < 2 {
            return 0;
        }
        // Arc k runs from position k to position k + 1 (mod n).
        let mut arcs = [(i + n - 1) % n, i, (j + n - 1) % n, j];
        arcs.sort_unstable();
        let at = |p: usize| -> usize {
            if p == i {
                vertices[j]
            } else if p == j {
                vertices[i]
            } else {
                vertices[p]
            }
        };
        let mut delta = 0;
        let mut prev = usize::MAX;
        for &k in &arcs {
            if k == prev {
                continue;
            }
            prev = k;
            let next = (k + 1) % n;
            delta += self.cost(at(k), at(next)) - self.cost(vertices[k], vertices[next]);
        }
        delta
    }
}

impl TryFrom<Vec<Vec<Cost>>> for CostMatrix {
    type Error = ConfigError;

    fn try_from(rows: Vec<Vec<Cost>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<CostMatrix> for Vec<Vec<Cost>> {
    fn from(m: CostMatrix) -> Self {
        m.costs.chunks(m.n).map(<[Cost]>::to_vec).collect()
    }
}
