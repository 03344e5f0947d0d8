use super::error::{RankingError, RankingResult};

/// Row-major `f32` matrix of equal-length vectors.
///
/// Rows are appended during construction and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatrix {
    dim: usize,
    data: Vec<f32>,
}

impl VectorMatrix {
    /// Creates an empty matrix for vectors of length `dim`.
    pub fn new(dim: usize) -> Self {
        Self { dim, data: vec![] }
    }

    pub fn with_capacity(dim: usize, rows: usize) -> Self {
        Self {
            dim,
            data: Vec::with_capacity(dim * rows),
        }
    }

    /// Builds a matrix from owned rows; every row must have length `dim`.
    pub fn from_rows<I>(dim: usize, rows: I) -> RankingResult<Self>
    where
        I: IntoIterator<Item = Vec<f32>>,
    {
        let rows = rows.into_iter();
        let mut matrix = Self::with_capacity(dim, rows.size_hint().0);
        for row in rows {
            matrix.push(&row)?;
        }
        Ok(matrix)
    }

    pub fn push(&mut self, row: &[f32]) -> RankingResult<()> {
        if row.len() != self.dim {
            return Err(RankingError::DimensionMismatch {
                expected: self.dim,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        Ok(())
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn rows(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.data.len() / self.dim
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.dim)?;
        self.data.get(start..start + self.dim)
    }

    /// Iterates rows in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        // chunks_exact(0) panics; a zero-dim matrix never holds data.
        self.data.chunks_exact(self.dim.max(1))
    }
}
