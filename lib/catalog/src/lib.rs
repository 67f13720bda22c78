//! # lookbook Catalog
//!
//! Artifact loading and snapshot lifecycle for the lookbook
//! similarity-retrieval engine.
//!
//! Three artifacts, produced together by the offline catalog build, back a
//! catalog: a JSONL metadata table, a filename index whose line order
//! defines embedding row order, and the embedding matrix itself. [`load`]
//! reads all three, joins metadata to embeddings on the id parsed from each
//! filename stem and produces an aligned [`lookbook_core::Catalog`].
//!
//! [`CatalogHandle`] holds the resulting immutable snapshot for sharing
//! across concurrent queries, with atomic whole-snapshot reload.

pub mod embeddings;
pub mod handle;
pub mod loader;

pub use handle::CatalogHandle;
pub use loader::{load, CatalogPaths};
