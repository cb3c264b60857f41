//! Nearest-neighbor construction.

use super::{Cost, CostMatrix, Tour};

/// Builds the deterministic nearest-neighbor tour used to seed both runners.
///
/// Starts at vertex 0 and repeatedly moves to the unvisited vertex with the
/// cheapest outgoing arc from the current one. Ties go to the lowest index.
/// No randomness is involved, so the same matrix always yields the same tour.
///
/// # Examples
///
/// ```
/// use atsp_metaheur::problem::{CostMatrix, GreedyConstructor};
///
/// let m = CostMatrix::new(vec![
///     vec![0, 5, 1],
///     vec![2, 0, 7],
///     vec![9, 3, 0],
/// ]).unwrap();
/// let (tour, cost) = GreedyConstructor::new(&m).build_with_cost();
/// assert_eq!(tour.as_slice(), &[0, 2, 1]);
/// assert_eq!(cost, 1 + 3 + 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GreedyConstructor<'a> {
    matrix: &'a CostMatrix,
}

impl<'a> GreedyConstructor<'a> {
    pub fn new(matrix: &'a CostMatrix) -> Self {
        Self { matrix }
    }

    pub fn build(&self) -> Tour {
        self.build_with_cost().0
    }

    /// Builds the tour and returns it together with its closed-cycle cost.
    pub fn build_with_cost(&self) -> (Tour, Cost) {
        let n = self.matrix.dimension();
        let mut visited = vec![false; n];
        let mut path = Vec::with_capacity(n);
        let mut current = 0;
        let mut total: Cost = 0;
        visited[current] = true;
        path.push(current);

        for _ in 1..n {
            let mut nearest: Option<(usize, Cost)> = None;
            for (next, &cost) in self.matrix.row(current).iter().enumerate() {
                if !visited[next] && nearest.is_none_or(|(_, best)| cost < best) {
                    nearest = Some((next, cost));
                }
            }
            // Every row has an unvisited entry until the path is complete.
            let Some((next, nearest_cost)) = nearest else {
                break;
            };
            visited[next] = true;
            path.push(next);
            total += nearest_cost;
            current = next;
        }
        total += self.matrix.cost(current, path[0]);

        (Tour::from_vec_unchecked(path), total)
    }
}
