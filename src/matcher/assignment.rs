//! Linear Assignment Solver
//!
//! Kuhn-Munkres (Hungarian) algorithm with row/column potentials, O(n^3).
//! Rectangular problems are padded to a square with a constant filler cost,
//! so every real row is assigned either to a real column or to a dummy one.

/// Dense row-major cost matrix
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Build from row vectors. All rows must have `cols` entries.
    pub fn from_rows(rows: Vec<Vec<f64>>, cols: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == cols));
        let n_rows = rows.len();
        Self {
            rows: n_rows,
            cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Cost on the padded square matrix: out-of-range cells cost `filler`
    fn padded(&self, row: usize, col: usize, filler: f64) -> f64 {
        if row < self.rows && col < self.cols {
            self.get(row, col)
        } else {
            filler
        }
    }
}

/// Minimum-cost assignment of rows to columns.
///
/// Returns one entry per real row: `Some(col)` for a real column, `None` when
/// the row was assigned to padding. Columns never appear twice.
pub fn solve(costs: &CostMatrix, filler: f64) -> Vec<Option<usize>> {
    let n = costs.rows().max(costs.cols());
    if n == 0 {
        return Vec::new();
    }

    // 1-based potentials; index 0 is the virtual start column
    let mut u = vec![0.0f64; n + 1];
    let mut v = vec![0.0f64; n + 1];
    // row_of[j]: row currently assigned to column j (0 = free)
    let mut row_of = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        row_of[0] = i;
        let mut j0 = 0usize;
        let mut min_v = vec![f64::INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = row_of[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let reduced = costs.padded(i0 - 1, j - 1, filler) - u[i0] - v[j];
                if reduced < min_v[j] {
                    min_v[j] = reduced;
                    way[j] = j0;
                }
                if min_v[j] < delta {
                    delta = min_v[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if used[j] {
                    u[row_of[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_v[j] -= delta;
                }
            }

            j0 = j1;
            if row_of[j0] == 0 {
                break;
            }
        }

        // Augment along the alternating path
        loop {
            let j1 = way[j0];
            row_of[j0] = row_of[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![None; costs.rows()];
    for (col, &row) in row_of.iter().enumerate().skip(1) {
        let (row, col) = (row - 1, col - 1);
        if row < costs.rows() && col < costs.cols() {
            assignment[row] = Some(col);
        }
    }
    assignment
}
