//! # lookbook
//!
//! Catalog similarity-retrieval engine for fashion recommendations.
//!
//! Given a precomputed catalog (metadata table + embedding matrix + filename
//! index, produced by an offline build), lookbook answers queries of the
//! form "given this embedding and these categorical filters, which catalog
//! items are most similar?" with an exact cosine top-K scan. Embedding
//! extraction itself happens upstream; lookbook consumes the resulting
//! vector as-is.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lookbook::prelude::*;
//!
//! # fn main() -> lookbook::Result<()> {
//! // Load the catalog once at startup.
//! let paths = CatalogPaths::from_dir("./data");
//! let handle = CatalogHandle::load(&paths)?;
//!
//! // Per request: filter, rank, project.
//! let catalog = handle.snapshot();
//! let query = vec![0.0f32; catalog.dim()]; // from the embedding service
//! let view = catalog.filter(&FilterSpec::new().equals("season", "Summer"));
//! let ranked = view.rank(&query, 10)?;
//! let records = project(&catalog, &ranked, DEFAULT_COLUMNS);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `lookbook-core` - Catalog table, filtering, cosine ranking, projection
//! - `lookbook-catalog` - Artifact formats, the aligning loader and the
//!   snapshot handle

// Re-export core types
pub use lookbook_core::{
    cosine_similarity, project, Catalog, CatalogItem, CatalogView, EmbeddingMatrix, Error,
    FilterSpec, RankedRecord, Result, ScoredRow, DEFAULT_COLUMNS,
};

// Re-export catalog loading
pub use lookbook_catalog::{load, CatalogHandle, CatalogPaths};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        project, Catalog, CatalogHandle, CatalogItem, CatalogPaths, CatalogView, EmbeddingMatrix,
        Error, FilterSpec, RankedRecord, Result, ScoredRow, DEFAULT_COLUMNS,
    };
}
