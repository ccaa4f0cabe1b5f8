//! Schema model shared by the Parquet and CSV sides of the codec.
//!
//! A [`Schema`] is the ordered list of flat columns found in a Parquet file
//! (or inferred from CSV). Each [`ColumnDescriptor`] pairs a physical
//! [`StorageType`] with an optional [`Semantic`] annotation that changes how
//! the stored integer is displayed and parsed.

use std::fmt;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema as ArrowSchema, SchemaRef, TimeUnit as ArrowTimeUnit};

/// Timezone string attached to UTC-adjusted Arrow timestamps.
pub const UTC_TIMEZONE: &str = "+00:00";

/// Physical storage of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Variable-length byte string, written back as UTF-8.
    ByteString,
}

impl StorageType {
    pub fn is_integer(self) -> bool {
        matches!(self, StorageType::Int32 | StorageType::Int64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, StorageType::Float32 | StorageType::Float64)
    }

    pub fn name(self) -> &'static str {
        match self {
            StorageType::Boolean => "Boolean",
            StorageType::Int32 => "Int32",
            StorageType::Int64 => "Int64",
            StorageType::Float32 => "Float32",
            StorageType::Float64 => "Float64",
            StorageType::ByteString => "ByteString",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolution of a timestamp column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millis,
    Micros,
    Nanos,
}

impl TimeUnit {
    /// Number of nanoseconds in one unit.
    pub fn nanos_per_unit(self) -> i128 {
        match self {
            TimeUnit::Millis => 1_000_000,
            TimeUnit::Micros => 1_000,
            TimeUnit::Nanos => 1,
        }
    }

    pub fn to_arrow(self) -> ArrowTimeUnit {
        match self {
            TimeUnit::Millis => ArrowTimeUnit::Millisecond,
            TimeUnit::Micros => ArrowTimeUnit::Microsecond,
            TimeUnit::Nanos => ArrowTimeUnit::Nanosecond,
        }
    }
}

/// Semantic annotation layered on top of an integer storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantic {
    /// Days since 1970-01-01, stored as Int32.
    Date,
    /// Units since the Unix epoch in UTC, stored as Int64.
    Timestamp { unit: TimeUnit, utc_adjusted: bool },
}

/// One flat column of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub storage: StorageType,
    pub semantic: Option<Semantic>,
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, storage: StorageType) -> Self {
        Self {
            name: name.into(),
            storage,
            semantic: None,
            nullable: true,
        }
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, StorageType::Int32).with_semantic(Semantic::Date)
    }

    pub fn timestamp(name: impl Into<String>, unit: TimeUnit) -> Self {
        Self::new(name, StorageType::Int64).with_semantic(Semantic::Timestamp {
            unit,
            utc_adjusted: false,
        })
    }

    pub fn with_semantic(mut self, semantic: Semantic) -> Self {
        self.semantic = Some(semantic);
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Arrow type used to decode and encode this column.
    pub fn arrow_type(&self) -> DataType {
        match (self.storage, self.semantic) {
            (StorageType::Int32, Some(Semantic::Date)) => DataType::Date32,
            (
                StorageType::Int64,
                Some(Semantic::Timestamp {
                    unit,
                    utc_adjusted,
                }),
            ) => DataType::Timestamp(unit.to_arrow(), utc_adjusted.then(|| UTC_TIMEZONE.into())),
            (StorageType::Boolean, _) => DataType::Boolean,
            (StorageType::Int32, _) => DataType::Int32,
            (StorageType::Int64, _) => DataType::Int64,
            (StorageType::Float32, _) => DataType::Float32,
            (StorageType::Float64, _) => DataType::Float64,
            (StorageType::ByteString, _) => DataType::Utf8,
        }
    }

    pub fn arrow_field(&self) -> Field {
        Field::new(&self.name, self.arrow_type(), self.nullable)
    }

    /// Human-readable target type used in conversion errors.
    pub fn type_label(&self) -> String {
        match self.semantic {
            Some(Semantic::Date) => "Date (YYYY-MM-DD)".to_string(),
            Some(Semantic::Timestamp { .. }) => {
                "Timestamp (YYYY-MM-DD HH:MM:SS.nnnnnnnnn)".to_string()
            }
            None => self.storage.to_string(),
        }
    }
}

/// Ordered column list of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<ColumnDescriptor>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Position of the first column named `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn to_arrow(&self) -> SchemaRef {
        Arc::new(ArrowSchema::new(
            self.columns
                .iter()
                .map(ColumnDescriptor::arrow_field)
                .collect::<Vec<_>>(),
        ))
    }
}

impl FromIterator<ColumnDescriptor> for Schema {
    fn from_iter<I: IntoIterator<Item = ColumnDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One footer key/value pair. The value is optional in Parquet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub key: String,
    pub value: Option<String>,
}

impl MetadataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// Opaque, ordered footer metadata carried through a conversion untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<MetadataEntry>,
}

impl Metadata {
    pub fn new(entries: Vec<MetadataEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MetadataEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Value of the first entry with `key`, if present and non-null.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .and_then(|e| e.value.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_columns_map_to_temporal_arrow_types() {
        assert_eq!(ColumnDescriptor::date("d").arrow_type(), DataType::Date32);
        assert_eq!(
            ColumnDescriptor::timestamp("ts", TimeUnit::Nanos).arrow_type(),
            DataType::Timestamp(ArrowTimeUnit::Nanosecond, None)
        );

        let utc = ColumnDescriptor::new("ts", StorageType::Int64).with_semantic(
            Semantic::Timestamp {
                unit: TimeUnit::Micros,
                utc_adjusted: true,
            },
        );
        assert_eq!(
            utc.arrow_type(),
            DataType::Timestamp(ArrowTimeUnit::Microsecond, Some(UTC_TIMEZONE.into()))
        );
    }

    #[test]
    fn schema_keeps_duplicate_names_in_order() {
        let schema: Schema = vec![
            ColumnDescriptor::new("a", StorageType::Int64),
            ColumnDescriptor::new("a", StorageType::ByteString),
        ]
        .into_iter()
        .collect();

        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["a", "a"]);
        assert_eq!(schema.index_of("a"), Some(0));
        assert_eq!(schema.to_arrow().fields().len(), 2);
    }

    #[test]
    fn metadata_lookup_returns_first_match() {
        let metadata = Metadata::new(vec![
            MetadataEntry::new("pandas", "{}"),
            MetadataEntry {
                key: "empty".into(),
                value: None,
            },
        ]);
        assert_eq!(metadata.get("pandas"), Some("{}"));
        assert_eq!(metadata.get("empty"), None);
        assert_eq!(metadata.get("missing"), None);
    }
}
