use serde::Serialize;
use serde_json::{Map, Value};

use crate::rank::ScoredRow;
use crate::Catalog;

/// Default output columns, matching what the recommendation UI renders.
pub const DEFAULT_COLUMNS: &[&str] = &["productDisplayName", "baseColour", "season"];

/// One ranked result: the item id, the selected metadata columns and the
/// similarity score. Serializes flat, e.g.
/// `{"id":31973,"season":"Summer","similarity":0.97}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedRecord {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub similarity: f32,
}

/// Map ranked rows back to output records, in rank order.
///
/// Column selection is permissive: requested columns the item has no value
/// for are simply omitted from that record, mirroring the filter engine's
/// lenient policy. `id` and `similarity` are always present.
#[must_use]
pub fn project(catalog: &Catalog, ranked: &[ScoredRow], columns: &[&str]) -> Vec<RankedRecord> {
    ranked
        .iter()
        .map(|scored| {
            let item = catalog.item(scored.row);
            let mut fields = Map::new();
            for &column in columns {
                if let Some(value) = item.attribute(column) {
                    fields.insert(column.to_string(), Value::String(value.to_string()));
                }
            }
            RankedRecord {
                id: item.id,
                fields,
                similarity: scored.score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::columns;
    use crate::{CatalogItem, EmbeddingMatrix};
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        let items = vec![
            CatalogItem {
                embedding_index: 0,
                ..CatalogItem::new(10)
                    .with_attribute(columns::DISPLAY_NAME, "Red Shirt")
                    .with_attribute(columns::SEASON, "Summer")
            },
            CatalogItem {
                embedding_index: 1,
                ..CatalogItem::new(20).with_attribute(columns::DISPLAY_NAME, "Blue Jeans")
            },
        ];
        let matrix = EmbeddingMatrix::new(2, vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        Catalog::new(items, matrix, HashSet::new()).unwrap()
    }

    #[test]
    fn test_project_preserves_rank_order() {
        let catalog = catalog();
        let ranked = [
            ScoredRow { row: 1, score: 0.9 },
            ScoredRow { row: 0, score: 0.5 },
        ];
        let records = project(&catalog, &ranked, DEFAULT_COLUMNS);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 20);
        assert_eq!(records[1].id, 10);
        assert!((records[0].similarity - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_missing_columns_dropped_silently() {
        let catalog = catalog();
        let ranked = [ScoredRow { row: 1, score: 1.0 }];
        let records = project(&catalog, &ranked, &["season", "no_such_column"]);

        // Item 20 has no season; neither key appears, id and score remain.
        assert!(records[0].fields.is_empty());
        assert_eq!(records[0].id, 20);
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let catalog = catalog();
        let ranked = [ScoredRow { row: 0, score: 1.0 }];
        let records = project(&catalog, &ranked, &["season"]);
        let json = serde_json::to_value(&records[0]).unwrap();

        assert_eq!(json["id"], 10);
        assert_eq!(json["season"], "Summer");
        assert!((json["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-6);
    }
}
