//! CSV display order for decoded Parquet columns.
//!
//! Files written by pandas keep their index as ordinary trailing columns and
//! name them in a JSON footer entry under the `pandas` key. When asked, those
//! columns are listed first so the CSV reads the way the DataFrame did.

use serde::Deserialize;
use serde_json::Value;

use tabedit_types::{Metadata, Schema};

pub const PANDAS_METADATA_KEY: &str = "pandas";

#[derive(Debug, Deserialize)]
struct PandasMetadata {
    #[serde(default)]
    index_columns: Vec<Value>,
}

/// Names of the stored index columns declared in the pandas footer entry.
///
/// Range indexes are described by objects rather than names and have no
/// stored column, so they are skipped. Missing or unparsable metadata yields
/// no index columns.
pub fn pandas_index_columns(metadata: &Metadata) -> Vec<String> {
    let Some(raw) = metadata.get(PANDAS_METADATA_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str::<PandasMetadata>(raw) {
        Ok(parsed) => parsed
            .index_columns
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(name),
                _ => None,
            })
            .collect(),
        Err(err) => {
            tracing::debug!("[DISPLAY] ignoring unreadable pandas metadata: {err}");
            Vec::new()
        }
    }
}

/// Schema indexes in the order the CSV shows them.
///
/// Physical order unless `index_first` is set, in which case pandas index
/// columns come first (in the order pandas lists them) followed by the rest
/// in physical order.
pub fn display_order(schema: &Schema, metadata: &Metadata, index_first: bool) -> Vec<usize> {
    let physical: Vec<usize> = (0..schema.len()).collect();
    if !index_first {
        return physical;
    }

    let mut leading: Vec<usize> = Vec::new();
    for name in pandas_index_columns(metadata) {
        if let Some(idx) = schema.index_of(&name)
            && !leading.contains(&idx)
        {
            leading.push(idx);
        }
    }

    let rest: Vec<usize> = physical
        .into_iter()
        .filter(|idx| !leading.contains(idx))
        .collect();
    leading.extend(rest);
    leading
}
