//! # lookbook Core
//!
//! Core types and algorithms for the lookbook catalog similarity-retrieval
//! engine:
//!
//! - [`CatalogItem`] - One aligned catalog row: typed core columns plus an
//!   open extension map
//! - [`EmbeddingMatrix`] - Dense row-major matrix of precomputed embeddings
//! - [`Catalog`] / [`CatalogView`] - The aligned table and its filtered,
//!   alignment-preserving row subsets
//! - [`FilterSpec`] - AND-combined case-insensitive equality filters
//! - [`rank::rank`] - Exact cosine top-K with stable tie-breaking
//! - [`project()`] - Ranked rows to output records
//!
//! Everything here is pure computation over immutable inputs: once a
//! [`Catalog`] is built it is never mutated, so concurrent queries need no
//! locking.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use lookbook_core::{Catalog, CatalogItem, EmbeddingMatrix, FilterSpec, project};
//!
//! let items = vec![
//!     CatalogItem::new(1).with_attribute("season", "Summer"),
//!     CatalogItem {
//!         embedding_index: 1,
//!         ..CatalogItem::new(2).with_attribute("season", "Winter")
//!     },
//! ];
//! let matrix = EmbeddingMatrix::new(2, vec![1.0, 0.0, 0.0, 1.0]).unwrap();
//! let columns: HashSet<String> = ["id", "season"].into_iter().map(String::from).collect();
//! let catalog = Catalog::new(items, matrix, columns).unwrap();
//!
//! let view = catalog.filter(&FilterSpec::new().equals("season", "summer"));
//! let ranked = view.rank(&[1.0, 0.0], 5).unwrap();
//! let records = project(&catalog, &ranked, &["season"]);
//! assert_eq!(records[0].id, 1);
//! ```

pub mod catalog;
pub mod error;
pub mod filter;
pub mod item;
pub mod matrix;
pub mod project;
pub mod rank;

pub use catalog::{Catalog, CatalogView};
pub use error::{Error, Result};
pub use filter::FilterSpec;
pub use item::CatalogItem;
pub use matrix::EmbeddingMatrix;
pub use project::{project, RankedRecord, DEFAULT_COLUMNS};
pub use rank::{cosine_similarity, ScoredRow};
