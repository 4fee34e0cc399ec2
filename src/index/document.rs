//! Projection of an activity dataset into an index document

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tantivy::TantivyDocument;

use super::schema::ActivityFields;
use super::IndexError;
use crate::activity::ActivityKey;

/// The indexed view of one activity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDocument {
    pub name: String,
    pub comment: String,
    pub product: String,
    pub categories: String,
    pub location: String,
    pub database: String,
    pub code: String,
}

impl ActivityDocument {
    /// Format a dataset for indexing
    ///
    /// `database` and `code` are required. `reference product` becomes the
    /// product, categories are joined with `", "`, and a `[database, code]`
    /// location reference contributes its second element.
    pub fn from_dataset(dataset: &Value) -> Result<Self, IndexError> {
        let required = |field: &str| {
            dataset
                .get(field)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| IndexError::InvalidDataset(format!("missing string `{field}`")))
        };
        let optional = |field: &str| {
            dataset
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let categories = match dataset.get("categories") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        let location = match dataset.get("location") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(items)) => items
                .get(1)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        };

        Ok(Self {
            name: optional("name"),
            comment: optional("comment"),
            product: optional("reference product"),
            categories,
            location,
            database: required("database")?,
            code: required("code")?,
        })
    }

    pub fn key(&self) -> ActivityKey {
        ActivityKey::new(self.database.clone(), self.code.clone())
    }

    pub(crate) fn to_tantivy(&self, fields: &ActivityFields) -> TantivyDocument {
        let mut doc = TantivyDocument::new();
        doc.add_text(fields.name, &self.name);
        doc.add_text(fields.comment, &self.comment);
        doc.add_text(fields.product, &self.product);
        doc.add_text(fields.categories, &self.categories);
        doc.add_text(fields.location, &self.location);
        doc.add_text(fields.database, &self.database);
        doc.add_text(fields.key, self.key().join());
        doc
    }
}
