//! Dense linear algebra over GF(2).
//!
//! [`BinaryMatrix`] stores each row as bit-packed `u32`s. Every query here
//! builds or clones its own matrix, so no matrix is ever shared between calls.
//!
//! Every elimination in the crate, including the synthesizer's column sweep,
//! picks its pivot with [`pivot_row`]: the lowest-indexed eligible row wins.

use std::fmt;

const PW: [u32; 32] = [ // PW[i] = 2^i
    1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768,
    65536, 131072, 262144, 524288, 1048576, 2097152, 4194304, 8388608, 16777216,
    33554432, 67108864, 134217728, 268435456, 536870912, 1073741824, 2147483648
];

/// Return the index of the first set entry at or after `start` in a column.
pub fn pivot_row<I>(column: I, start: usize) -> Option<usize>
where I: IntoIterator<Item = bool>
{
    column.into_iter()
        .enumerate()
        .skip(start)
        .find_map(|(i, b)| b.then_some(i))
}

/// A rows × columns matrix over GF(2).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMatrix {
    ncols: usize,
    over32: usize, // = floor(ncols / 32) + 1
    rows: Vec<Vec<u32>>,
}

impl fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "[ ")?;
            for j in 0..self.ncols {
                if row[j >> 5] & PW[j & 31] != 0 {
                    write!(f, "1 ")?;
                } else {
                    write!(f, "0 ")?;
                }
            }
            write!(f, "]")?;
            if i + 1 < self.rows.len() { writeln!(f)?; }
        }
        Ok(())
    }
}

impl BinaryMatrix {
    /// Create a matrix with no rows and `ncols` columns.
    pub fn new(ncols: usize) -> Self {
        Self { ncols, over32: (ncols >> 5) + 1, rows: Vec::new() }
    }

    /// Create an all-zero `nrows × ncols` matrix.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        let over32 = (ncols >> 5) + 1;
        Self { ncols, over32, rows: vec![vec![0; over32]; nrows] }
    }

    /// Create a matrix from rows of bools.
    ///
    /// *Panics if any row does not have length `ncols`.*
    pub fn from_rows<I, R>(ncols: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[bool]>,
    {
        let mut new = Self::new(ncols);
        rows.into_iter().for_each(|row| { new.push_row(row.as_ref()); });
        new
    }

    pub fn num_rows(&self) -> usize { self.rows.len() }

    pub fn num_cols(&self) -> usize { self.ncols }

    /// Return `true` if there are no rows.
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Append a row.
    ///
    /// *Panics if `row.len() != self.num_cols()`.*
    pub fn push_row(&mut self, row: &[bool]) {
        assert_eq!(row.len(), self.ncols, "BinaryMatrix::push_row: wrong row length");
        let mut packed: Vec<u32> = vec![0; self.over32];
        row.iter().enumerate()
            .filter(|(_, b)| **b)
            .for_each(|(j, _)| { packed[j >> 5] |= PW[j & 31]; });
        self.rows.push(packed);
    }

    pub fn get(&self, i: usize, j: usize) -> bool {
        assert!(j < self.ncols);
        self.rows[i][j >> 5] & PW[j & 31] != 0
    }

    pub fn set(&mut self, i: usize, j: usize, b: bool) {
        assert!(j < self.ncols);
        if b {
            self.rows[i][j >> 5] |= PW[j & 31];
        } else {
            self.rows[i][j >> 5] &= !PW[j & 31];
        }
    }

    /// Unpack row `i`.
    pub fn row(&self, i: usize) -> Vec<bool> {
        (0..self.ncols).map(|j| self.get(i, j)).collect()
    }

    /// Iterate over the entries of column `j`, top to bottom.
    pub fn column(&self, j: usize) -> impl Iterator<Item = bool> + '_ {
        let j5 = j >> 5;
        let pw = PW[j & 31];
        self.rows.iter().map(move |row| row[j5] & pw != 0)
    }

    /// Return `true` if row `i` is all zeros.
    pub fn row_is_zero(&self, i: usize) -> bool {
        self.rows[i].iter().all(|w| *w == 0)
    }

    pub fn transpose(&self) -> Self {
        let mut new = Self::zeros(self.ncols, self.num_rows());
        for i in 0..self.num_rows() {
            for j in 0..self.ncols {
                if self.get(i, j) { new.set(j, i, true); }
            }
        }
        new
    }

    // XOR row `a` into row `b`
    fn row_xor(&mut self, a: usize, b: usize) {
        assert_ne!(a, b);
        let (src, dst)
            = if a < b {
                let (lo, hi) = self.rows.split_at_mut(b);
                (&lo[a], &mut hi[0])
            } else {
                let (lo, hi) = self.rows.split_at_mut(a);
                (&hi[0], &mut lo[b])
            };
        dst.iter_mut().zip(src).for_each(|(d, s)| { *d ^= *s; });
    }

    fn row_swap(&mut self, a: usize, b: usize) {
        if a != b { self.rows.swap(a, b); }
    }

    /// Gaussian elimination to reduced row-echelon form.
    ///
    /// Columns are swept left to right. For each, the lowest-indexed row at
    /// or below the current pivot position with a 1 in that column is swapped
    /// up, then XORed into every other row (above and below) that has a 1
    /// there. Zero rows end up at the bottom.
    pub fn row_reduce(mut self) -> RowReduction {
        let m = self.num_rows();
        let mut pivot_columns: Vec<usize> = Vec::new();
        let mut row_min: usize = 0;
        for col in 0..self.ncols {
            if row_min >= m { break; }
            let Some(k) = pivot_row(self.column(col), row_min) else { continue; };
            self.row_swap(k, row_min);
            let c5 = col >> 5;
            let pw = PW[col & 31];
            for i in 0..m {
                if i != row_min && self.rows[i][c5] & pw != 0 {
                    self.row_xor(row_min, i);
                }
            }
            pivot_columns.push(col);
            row_min += 1;
        }
        RowReduction { rank: pivot_columns.len(), pivot_columns, reduced: self }
    }

    /// Number of linearly independent rows.
    pub fn rank(&self) -> usize { self.clone().row_reduce().rank }

    /// Return `true` if appending `candidate` would increase the rank.
    ///
    /// *Panics if `candidate.len() != self.num_cols()`.*
    pub fn is_independent_of(&self, candidate: &[bool]) -> bool {
        let base = self.rank();
        let mut extended = self.clone();
        extended.push_row(candidate);
        extended.rank() > base
    }

    /// A basis of the right nullspace { *v* : *Mv* = 0 }, one vector per free
    /// column, in increasing order of free column.
    pub fn nullspace(self) -> Vec<Vec<bool>> {
        let ncols = self.ncols;
        let red = self.row_reduce();
        red.free_columns()
            .into_iter()
            .map(|f| {
                let mut v: Vec<bool> = vec![false; ncols];
                v[f] = true;
                for (i, &p) in red.pivot_columns.iter().enumerate() {
                    v[p] = red.reduced.get(i, f);
                }
                v
            })
            .collect()
    }
}

/// The output of [`BinaryMatrix::row_reduce`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowReduction {
    /// Number of nonzero rows in `reduced`.
    pub rank: usize,
    /// Column of the leading 1 in each of the first `rank` rows.
    pub pivot_columns: Vec<usize>,
    /// The matrix in reduced row-echelon form.
    pub reduced: BinaryMatrix,
}

impl RowReduction {
    /// Columns without a pivot.
    pub fn free_columns(&self) -> Vec<usize> {
        let mut pivots = self.pivot_columns.iter().copied().peekable();
        (0..self.reduced.num_cols())
            .filter(|j| {
                if pivots.peek() == Some(j) {
                    pivots.next();
                    false
                } else {
                    true
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mat(rows: &[&[u8]]) -> BinaryMatrix {
        let ncols = rows.first().map(|r| r.len()).unwrap_or(0);
        BinaryMatrix::from_rows(
            ncols,
            rows.iter().map(|r| r.iter().map(|b| *b != 0).collect::<Vec<bool>>()),
        )
    }

    #[test]
    fn rref_0() {
        let sys = mat(&[
            &[1, 1, 0],
            &[0, 1, 1],
            &[1, 0, 1],
        ]);
        let sol = mat(&[
            &[1, 0, 1],
            &[0, 1, 1],
            &[0, 0, 0],
        ]);
        let red = sys.row_reduce();
        println!("{}", red.reduced);
        assert_eq!(red.reduced, sol);
        assert_eq!(red.rank, 2);
        assert_eq!(red.pivot_columns, vec![0, 1]);
        assert_eq!(red.free_columns(), vec![2]);
    }

    #[test]
    fn rref_1() {
        // pivots skip a column that only has entries in rows already used
        let sys = mat(&[
            &[1, 1, 0, 1],
            &[1, 1, 1, 0],
            &[0, 0, 1, 1],
        ]);
        let sol = mat(&[
            &[1, 1, 0, 1],
            &[0, 0, 1, 1],
            &[0, 0, 0, 0],
        ]);
        let red = sys.row_reduce();
        assert_eq!(red.reduced, sol);
        assert_eq!(red.pivot_columns, vec![0, 2]);
        assert_eq!(red.free_columns(), vec![1, 3]);
    }

    #[test]
    fn wide_rows() {
        // spans more than one packed word
        let mut row_a = vec![false; 70];
        let mut row_b = vec![false; 70];
        row_a[3] = true;
        row_a[65] = true;
        row_b[65] = true;
        let m = BinaryMatrix::from_rows(70, [&row_a, &row_b]);
        let red = m.row_reduce();
        assert_eq!(red.pivot_columns, vec![3, 65]);
        assert_eq!(red.reduced.row(0), { let mut r = vec![false; 70]; r[3] = true; r });
    }

    #[test]
    fn lowest_row_wins() {
        assert_eq!(pivot_row([false, true, true], 0), Some(1));
        assert_eq!(pivot_row([true, false, true], 1), Some(2));
        assert_eq!(pivot_row([true, true, false], 2), None);

        // the first eligible row is the one swapped into pivot position: row 1
        // ends up on top and row 2 is reduced against it
        let m = mat(&[
            &[0, 1],
            &[1, 0],
            &[1, 1],
        ]);
        let red = m.row_reduce();
        assert_eq!(red.reduced, mat(&[&[1, 0], &[0, 1], &[0, 0]]));
    }

    #[test]
    fn empty_matrix_has_rank_zero() {
        assert_eq!(BinaryMatrix::new(4).rank(), 0);
        assert_eq!(BinaryMatrix::zeros(0, 0).rank(), 0);
        assert_eq!(BinaryMatrix::zeros(3, 5).rank(), 0);
        assert!(BinaryMatrix::new(3).is_independent_of(&[false, true, false]));
        assert!(!BinaryMatrix::new(3).is_independent_of(&[false, false, false]));
    }

    #[test]
    fn independence() {
        let m = mat(&[
            &[1, 1, 0, 0],
            &[0, 1, 1, 0],
        ]);
        assert!(!m.is_independent_of(&[1, 0, 1, 0].map(|b| b != 0)));
        assert!(m.is_independent_of(&[0, 0, 0, 1].map(|b| b != 0)));
        // the query does not change the matrix
        assert_eq!(m.num_rows(), 2);
    }

    #[test]
    fn nullspace_basis() {
        let m = mat(&[
            &[1, 1, 0],
            &[0, 1, 1],
            &[1, 0, 1],
        ]);
        let ns = m.clone().nullspace();
        assert_eq!(ns, vec![vec![true, true, true]]);
        for v in ns.iter() {
            for i in 0..m.num_rows() {
                let dot = m.row(i).iter().zip(v).filter(|(a, b)| **a && **b).count();
                assert_eq!(dot % 2, 0);
            }
        }
        assert_eq!(BinaryMatrix::zeros(2, 2).nullspace().len(), 2);
    }

    #[test]
    fn transpose() {
        let m = mat(&[
            &[1, 0, 1],
            &[0, 1, 1],
        ]);
        let t = m.transpose();
        assert_eq!(t, mat(&[&[1, 0], &[0, 1], &[1, 1]]));
        assert_eq!(t.transpose(), m);
    }
}
