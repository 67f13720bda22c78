use std::collections::HashMap;

/// Well-known metadata column names, matching the catalog build.
pub mod columns {
    pub const ID: &str = "id";
    pub const DISPLAY_NAME: &str = "productDisplayName";
    pub const BASE_COLOUR: &str = "baseColour";
    pub const SEASON: &str = "season";
    pub const ARTICLE_TYPE: &str = "articleType";
}

/// One row of the aligned catalog table.
///
/// The commonly-queried columns are typed fields; everything else the
/// catalog build emits (gender, usage, derived columns such as
/// `aesthetic_category`, ...) lands in the open `extra` map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogItem {
    /// Unique identifier, the join key between metadata and embeddings.
    pub id: u64,
    pub display_name: Option<String>,
    pub base_colour: Option<String>,
    pub season: Option<String>,
    pub article_type: Option<String>,
    /// Catalog-specific and pipeline-derived columns.
    pub extra: HashMap<String, String>,
    /// Position of this item's vector in the aligned embedding matrix.
    /// After loading, `embedding_index == i` for the item at row `i`.
    pub embedding_index: usize,
}

impl CatalogItem {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Set a column by name, routing well-known columns to their typed
    /// fields and everything else into `extra`.
    pub fn set_attribute(&mut self, column: &str, value: impl Into<String>) {
        let value = value.into();
        match column {
            columns::DISPLAY_NAME => self.display_name = Some(value),
            columns::BASE_COLOUR => self.base_colour = Some(value),
            columns::SEASON => self.season = Some(value),
            columns::ARTICLE_TYPE => self.article_type = Some(value),
            _ => {
                self.extra.insert(column.to_string(), value);
            }
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, column: &str, value: impl Into<String>) -> Self {
        self.set_attribute(column, value);
        self
    }

    /// Look up a column value by name. Returns `None` when the item has no
    /// value for that column.
    #[must_use]
    pub fn attribute(&self, column: &str) -> Option<&str> {
        match column {
            columns::DISPLAY_NAME => self.display_name.as_deref(),
            columns::BASE_COLOUR => self.base_colour.as_deref(),
            columns::SEASON => self.season.as_deref(),
            columns::ARTICLE_TYPE => self.article_type.as_deref(),
            _ => self.extra.get(column).map(String::as_str),
        }
    }
}
