//! Activity index schema

use tantivy::schema::{Field, Schema, STORED, STRING, TEXT};

pub const NAME: &str = "name";
pub const COMMENT: &str = "comment";
pub const PRODUCT: &str = "product";
pub const CATEGORIES: &str = "categories";
pub const LOCATION: &str = "location";
pub const DATABASE: &str = "database";
pub const KEY: &str = "key";

/// Field handles of the activity schema
#[derive(Debug, Clone, Copy)]
pub struct ActivityFields {
    pub name: Field,
    pub comment: Field,
    pub product: Field,
    pub categories: Field,
    pub location: Field,
    /// Raw (untokenized) database name
    pub database: Field,
    /// Encoded composite key, unique per document
    pub key: Field,
}

impl ActivityFields {
    /// Fields parsed by free-text queries
    pub fn searchable(&self) -> [Field; 5] {
        [
            self.name,
            self.comment,
            self.product,
            self.categories,
            self.location,
        ]
    }
}

/// Build the schema every activity index is created with
///
/// All fields are stored so raw hits can be returned without the database.
pub fn activity_schema() -> (Schema, ActivityFields) {
    let mut builder = Schema::builder();

    let fields = ActivityFields {
        name: builder.add_text_field(NAME, TEXT | STORED),
        comment: builder.add_text_field(COMMENT, TEXT | STORED),
        product: builder.add_text_field(PRODUCT, TEXT | STORED),
        categories: builder.add_text_field(CATEGORIES, TEXT | STORED),
        location: builder.add_text_field(LOCATION, TEXT | STORED),
        database: builder.add_text_field(DATABASE, STRING | STORED),
        key: builder.add_text_field(KEY, STRING | STORED),
    };

    (builder.build(), fields)
}
