use crate::{Error, Result};

/// Dense row-major matrix of embedding vectors.
///
/// Row `i` is the feature vector of the catalog item whose
/// `embedding_index == i`. The matrix is immutable after construction and
/// shared read-only across concurrent queries.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    dim: usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Build a matrix from row-major data. The data length must be a
    /// multiple of `dim`.
    pub fn new(dim: usize, data: Vec<f32>) -> Result<Self> {
        if dim == 0 {
            return Err(Error::MalformedData(
                "embedding dimension must be non-zero".to_string(),
            ));
        }
        if data.len() % dim != 0 {
            return Err(Error::MalformedData(format!(
                "embedding data length {} is not a multiple of dimension {}",
                data.len(),
                dim
            )));
        }
        Ok(Self { dim, data })
    }

    /// Build a matrix from individual rows, checking each row's width.
    pub fn from_rows(dim: usize, rows: &[Vec<f32>]) -> Result<Self> {
        let mut data = Vec::with_capacity(dim * rows.len());
        for row in rows {
            if row.len() != dim {
                return Err(Error::MalformedData(format!(
                    "embedding row has width {}, expected {}",
                    row.len(),
                    dim
                )));
            }
            data.extend_from_slice(row);
        }
        Self::new(dim, data)
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.data.len() / self.dim
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow row `i`. Panics if `i` is out of range.
    #[inline]
    #[must_use]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Gather the given rows into a new matrix, in the order given.
    ///
    /// This is the alignment step of catalog loading: the caller supplies
    /// the embedding index of each surviving metadata row, in metadata
    /// order, and gets back a matrix whose row `i` matches item `i`.
    #[must_use]
    pub fn gather(&self, rows: &[usize]) -> EmbeddingMatrix {
        let mut data = Vec::with_capacity(rows.len() * self.dim);
        for &row in rows {
            data.extend_from_slice(self.row(row));
        }
        EmbeddingMatrix {
            dim: self.dim,
            data,
        }
    }
}
