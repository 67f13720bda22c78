use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use lookbook_core::{Catalog, CatalogItem, Error, Result};

use crate::embeddings;

/// Locations of the three backing artifacts, all produced by the same
/// offline catalog build.
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    /// JSON Lines metadata table, one object per catalog item.
    pub metadata: PathBuf,
    /// Image paths, one per line; line order defines embedding row order.
    pub filenames: PathBuf,
    /// The embedding matrix (see [`crate::embeddings`]).
    pub embeddings: PathBuf,
}

impl CatalogPaths {
    /// The conventional artifact names under a catalog data directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            metadata: dir.join("catalog_metadata.jsonl"),
            filenames: dir.join("image_filenames.txt"),
            embeddings: dir.join("catalog_embeddings.lbe"),
        }
    }
}

/// Load and align the three artifacts into one consistent [`Catalog`].
///
/// Metadata rows are joined to filename-index rows on `id` (the filename
/// stem parsed as an integer). The join is inner and preserves metadata row
/// order; rows present in only one source are dropped, counted and logged.
/// The embedding matrix is gathered so that row `i` is the vector of item
/// `i` exactly.
///
/// Fails with [`Error::DataUnavailable`] when an artifact is missing,
/// [`Error::MalformedData`] on structural violations (duplicate ids, bad
/// filename stems, matrix/index row-count disagreement) and
/// [`Error::EmptyCatalog`] when the join leaves nothing.
pub fn load(paths: &CatalogPaths) -> Result<Catalog> {
    let (metadata, columns) = read_metadata(&paths.metadata)?;
    let index = read_filename_index(&paths.filenames)?;
    let matrix = embeddings::read_matrix(&paths.embeddings)?;

    if matrix.rows() != index.len() {
        return Err(Error::MalformedData(format!(
            "embedding matrix has {} rows but filename index has {} entries",
            matrix.rows(),
            index.len()
        )));
    }

    // Inner join on id, metadata order. Each surviving item takes the next
    // aligned row, so embedding_index == position by construction.
    let metadata_total = metadata.len();
    let mut items = Vec::new();
    let mut gathered = Vec::new();
    for mut item in metadata {
        let Some(&embedding_row) = index.get(&item.id) else {
            continue;
        };
        item.embedding_index = items.len();
        gathered.push(embedding_row);
        items.push(item);
    }

    let metadata_dropped = metadata_total - items.len();
    let index_dropped = index.len() - items.len();
    if metadata_dropped > 0 || index_dropped > 0 {
        warn!(
            metadata_dropped,
            index_dropped, "catalog join dropped unmatched rows"
        );
    }
    if items.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    info!(items = items.len(), dim = matrix.dim(), "catalog loaded");

    let aligned = matrix.gather(&gathered);
    Catalog::new(items, aligned, columns)
}

/// Parse the JSONL metadata table. Returns the rows in file order plus the
/// union of column names seen.
fn read_metadata(path: &Path) -> Result<(Vec<CatalogItem>, HashSet<String>)> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::unavailable(path, e))?;

    let mut rows = Vec::new();
    let mut columns = HashSet::new();
    let mut seen_ids = HashSet::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let object: serde_json::Map<String, Value> =
            serde_json::from_str(line).map_err(|e| {
                Error::MalformedData(format!(
                    "{} line {}: invalid JSON: {}",
                    path.display(),
                    lineno + 1,
                    e
                ))
            })?;

        let id = object
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                Error::MalformedData(format!(
                    "{} line {}: missing or non-integer id",
                    path.display(),
                    lineno + 1
                ))
            })?;
        if !seen_ids.insert(id) {
            return Err(Error::MalformedData(format!(
                "{} line {}: duplicate id {}",
                path.display(),
                lineno + 1,
                id
            )));
        }

        let mut item = CatalogItem::new(id);
        columns.insert("id".to_string());
        for (column, value) in &object {
            if column == "id" {
                continue;
            }
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => continue,
                other => {
                    return Err(Error::MalformedData(format!(
                        "{} line {}: column {} has non-scalar value {}",
                        path.display(),
                        lineno + 1,
                        column,
                        other
                    )))
                }
            };
            columns.insert(column.clone());
            item.set_attribute(column, text);
        }
        rows.push(item);
    }

    Ok((rows, columns))
}

/// Parse the filename index into an id -> embedding-row map. The id of each
/// row is its file stem parsed as an integer; the row number is its position
/// in the file.
fn read_filename_index(path: &Path) -> Result<HashMap<u64, usize>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::unavailable(path, e))?;

    let mut index = HashMap::new();
    let mut row = 0usize;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let stem = Path::new(line)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let id: u64 = stem.parse().map_err(|_| {
            Error::MalformedData(format!(
                "{} line {}: cannot derive an integer id from {:?}",
                path.display(),
                lineno + 1,
                line
            ))
        })?;
        if index.insert(id, row).is_some() {
            return Err(Error::MalformedData(format!(
                "{} line {}: duplicate id {} in filename index",
                path.display(),
                lineno + 1,
                id
            )));
        }
        row += 1;
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookbook_core::EmbeddingMatrix;
    use std::fs;

    fn write_fixture(
        dir: &Path,
        metadata: &str,
        filenames: &str,
        matrix: &EmbeddingMatrix,
    ) -> CatalogPaths {
        let paths = CatalogPaths::from_dir(dir);
        fs::write(&paths.metadata, metadata).unwrap();
        fs::write(&paths.filenames, filenames).unwrap();
        embeddings::write_matrix(&paths.embeddings, matrix).unwrap();
        paths
    }

    #[test]
    fn test_load_aligns_rows() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = EmbeddingMatrix::new(2, vec![1.0, 0.0, 0.0, 1.0, 0.9, 0.1]).unwrap();
        // Filename order differs from metadata order on purpose.
        let paths = write_fixture(
            dir.path(),
            concat!(
                "{\"id\": 2, \"season\": \"Winter\"}\n",
                "{\"id\": 1, \"season\": \"Summer\"}\n",
                "{\"id\": 3, \"season\": \"Fall\"}\n",
            ),
            "images/1.jpg\nimages/2.jpg\nimages/3.jpg\n",
            &matrix,
        );

        let catalog = load(&paths).unwrap();
        assert_eq!(catalog.len(), 3);
        // Metadata order preserved; matrix gathered to match.
        assert_eq!(catalog.item(0).id, 2);
        assert_eq!(catalog.matrix().row(0), &[0.0, 1.0]);
        assert_eq!(catalog.item(1).id, 1);
        assert_eq!(catalog.matrix().row(1), &[1.0, 0.0]);
        for (i, item) in catalog.items().iter().enumerate() {
            assert_eq!(item.embedding_index, i);
        }
    }

    #[test]
    fn test_unmatched_rows_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = EmbeddingMatrix::new(1, vec![1.0, 2.0]).unwrap();
        // id 7 has no embedding; embedding row for id 9 has no metadata.
        let paths = write_fixture(
            dir.path(),
            "{\"id\": 1}\n{\"id\": 7}\n",
            "1.jpg\n9.jpg\n",
            &matrix,
        );

        let catalog = load(&paths).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.item(0).id, 1);
        assert_eq!(catalog.matrix().row(0), &[1.0]);
    }

    #[test]
    fn test_disjoint_sources_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = EmbeddingMatrix::new(1, vec![1.0]).unwrap();
        let paths = write_fixture(dir.path(), "{\"id\": 5}\n", "6.jpg\n", &matrix);

        assert!(matches!(load(&paths), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_missing_artifact_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let paths = CatalogPaths::from_dir(dir.path());
        assert!(matches!(load(&paths), Err(Error::DataUnavailable { .. })));
    }

    #[test]
    fn test_duplicate_metadata_id_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = EmbeddingMatrix::new(1, vec![1.0]).unwrap();
        let paths = write_fixture(
            dir.path(),
            "{\"id\": 1}\n{\"id\": 1}\n",
            "1.jpg\n",
            &matrix,
        );

        assert!(matches!(load(&paths), Err(Error::MalformedData(_))));
    }

    #[test]
    fn test_unparsable_filename_stem_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = EmbeddingMatrix::new(1, vec![1.0]).unwrap();
        let paths = write_fixture(dir.path(), "{\"id\": 1}\n", "not-an-id.jpg\n", &matrix);

        assert!(matches!(load(&paths), Err(Error::MalformedData(_))));
    }

    #[test]
    fn test_matrix_index_row_count_disagreement_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = EmbeddingMatrix::new(1, vec![1.0, 2.0]).unwrap();
        let paths = write_fixture(dir.path(), "{\"id\": 1}\n", "1.jpg\n", &matrix);

        assert!(matches!(load(&paths), Err(Error::MalformedData(_))));
    }

    #[test]
    fn test_extra_columns_land_in_schema() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = EmbeddingMatrix::new(1, vec![1.0]).unwrap();
        let paths = write_fixture(
            dir.path(),
            "{\"id\": 1, \"aesthetic_category\": \"Boho\", \"year\": 2019}\n",
            "1.jpg\n",
            &matrix,
        );

        let catalog = load(&paths).unwrap();
        assert!(catalog.columns().contains("aesthetic_category"));
        assert_eq!(catalog.item(0).attribute("year"), Some("2019"));
    }
}
