use std::collections::HashSet;

use crate::filter::clauses_match;
use crate::rank::{rank, ScoredRow};
use crate::{CatalogItem, EmbeddingMatrix, Error, FilterSpec, Result};

/// The aligned catalog: metadata rows plus their embedding matrix.
///
/// Built once from the on-disk artifacts and shared read-only for the life
/// of the process; there is no mutation path. The alignment invariant holds
/// by construction: item `i` owns matrix row `i`.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    matrix: EmbeddingMatrix,
    columns: HashSet<String>,
}

impl Catalog {
    /// Assemble a catalog, verifying that items and matrix line up.
    pub fn new(
        items: Vec<CatalogItem>,
        matrix: EmbeddingMatrix,
        columns: HashSet<String>,
    ) -> Result<Self> {
        if items.len() != matrix.rows() {
            return Err(Error::MalformedData(format!(
                "{} catalog items but {} embedding rows",
                items.len(),
                matrix.rows()
            )));
        }
        for (i, item) in items.iter().enumerate() {
            if item.embedding_index != i {
                return Err(Error::MalformedData(format!(
                    "item id {} at row {} has embedding index {}",
                    item.id, i, item.embedding_index
                )));
            }
        }
        Ok(Self {
            items,
            matrix,
            columns,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Embedding dimensionality, fixed per deployment.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.matrix.dim()
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, row: usize) -> &CatalogItem {
        &self.items[row]
    }

    #[must_use]
    pub fn matrix(&self) -> &EmbeddingMatrix {
        &self.matrix
    }

    /// The metadata columns this catalog knows about.
    #[must_use]
    pub fn columns(&self) -> &HashSet<String> {
        &self.columns
    }

    /// A view over every row, unfiltered.
    #[must_use]
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView {
            catalog: self,
            rows: (0..self.items.len()).collect(),
        }
    }

    /// Apply equality filters, producing an alignment-preserving row subset.
    ///
    /// An empty or fully-inactive spec is the identity. A spec that matches
    /// nothing yields an empty view, which is a normal "zero matches"
    /// outcome rather than an error.
    #[must_use]
    pub fn filter(&self, spec: &FilterSpec) -> CatalogView<'_> {
        let active = spec.active_clauses(&self.columns);
        if active.is_empty() {
            return self.view();
        }
        let rows = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| clauses_match(item, &active))
            .map(|(row, _)| row)
            .collect();
        CatalogView {
            catalog: self,
            rows,
        }
    }
}

/// A filtered subset of catalog rows. Row indices refer back to the parent
/// catalog, so embeddings and metadata stay aligned for free.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    catalog: &'a Catalog,
    rows: Vec<usize>,
}

impl<'a> CatalogView<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Surviving row indices, in original catalog order.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    #[must_use]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Rank every row in the view against `query` and keep the `top_k`
    /// best. Returns absolute catalog row indices.
    pub fn rank(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredRow>> {
        if query.len() != self.catalog.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.catalog.dim(),
                actual: query.len(),
            });
        }
        Ok(rank(&self.catalog.matrix, &self.rows, query, top_k))
    }
}
