//! Mapping from Parquet leaf columns to the tabedit schema model.

use parquet::basic::{ConvertedType, LogicalType, TimeUnit as ParquetTimeUnit, Type as PhysicalType};
use parquet::schema::types::{ColumnDescriptor as ParquetColumn, SchemaDescriptor};

use tabedit_result::{Error, Result};
use tabedit_types::{ColumnDescriptor, Schema, Semantic, StorageType, TimeUnit};

/// Build a [`Schema`] from the leaf columns of a Parquet file, in physical
/// order. Group nodes never appear as columns.
pub fn schema_from_parquet(descr: &SchemaDescriptor) -> Result<Schema> {
    descr.columns().iter().map(|c| column_from_parquet(c)).collect()
}

fn column_from_parquet(column: &ParquetColumn) -> Result<ColumnDescriptor> {
    let name = column.name();
    if column.path().parts().len() > 1 || column.max_rep_level() > 0 {
        return Err(Error::unsupported_column(
            column.path().string(),
            "nested and repeated columns are not supported",
        ));
    }

    let logical = column.logical_type();
    let converted = column.converted_type();

    let descriptor = match column.physical_type() {
        PhysicalType::BOOLEAN => ColumnDescriptor::new(name, StorageType::Boolean),
        PhysicalType::INT32 => match (logical, converted) {
            (Some(LogicalType::Date), _) | (None, ConvertedType::DATE) => {
                ColumnDescriptor::date(name)
            }
            (Some(LogicalType::Integer {
                bit_width: 32,
                is_signed: false,
            }), _)
            | (None, ConvertedType::UINT_32) => {
                return Err(Error::unsupported_column(
                    name,
                    "unsigned 32-bit integers are not supported",
                ));
            }
            (Some(LogicalType::Decimal { .. }), _) | (None, ConvertedType::DECIMAL) => {
                return Err(Error::unsupported_column(name, "decimals are not supported"));
            }
            (Some(LogicalType::Time { .. }), _) | (None, ConvertedType::TIME_MILLIS) => {
                return Err(Error::unsupported_column(
                    name,
                    "time-of-day columns are not supported",
                ));
            }
            _ => ColumnDescriptor::new(name, StorageType::Int32),
        },
        PhysicalType::INT64 => match (logical, converted) {
            (
                Some(LogicalType::Timestamp {
                    is_adjusted_to_u_t_c,
                    unit,
                }),
                _,
            ) => ColumnDescriptor::new(name, StorageType::Int64).with_semantic(
                Semantic::Timestamp {
                    unit: time_unit(&unit),
                    utc_adjusted: is_adjusted_to_u_t_c,
                },
            ),
            (None, ConvertedType::TIMESTAMP_MILLIS) => legacy_timestamp(name, TimeUnit::Millis),
            (None, ConvertedType::TIMESTAMP_MICROS) => legacy_timestamp(name, TimeUnit::Micros),
            (Some(LogicalType::Integer {
                bit_width: 64,
                is_signed: false,
            }), _)
            | (None, ConvertedType::UINT_64) => {
                return Err(Error::unsupported_column(
                    name,
                    "unsigned 64-bit integers are not supported",
                ));
            }
            (Some(LogicalType::Decimal { .. }), _) | (None, ConvertedType::DECIMAL) => {
                return Err(Error::unsupported_column(name, "decimals are not supported"));
            }
            (Some(LogicalType::Time { .. }), _) | (None, ConvertedType::TIME_MICROS) => {
                return Err(Error::unsupported_column(
                    name,
                    "time-of-day columns are not supported",
                ));
            }
            _ => ColumnDescriptor::new(name, StorageType::Int64),
        },
        // Legacy INT96 timestamps are rewritten as INT64 nanoseconds.
        PhysicalType::INT96 => ColumnDescriptor::timestamp(name, TimeUnit::Nanos),
        PhysicalType::FLOAT => ColumnDescriptor::new(name, StorageType::Float32),
        PhysicalType::DOUBLE => ColumnDescriptor::new(name, StorageType::Float64),
        PhysicalType::BYTE_ARRAY => match (logical, converted) {
            (Some(LogicalType::Decimal { .. }), _) | (None, ConvertedType::DECIMAL) => {
                return Err(Error::unsupported_column(name, "decimals are not supported"));
            }
            _ => ColumnDescriptor::new(name, StorageType::ByteString),
        },
        PhysicalType::FIXED_LEN_BYTE_ARRAY => {
            return Err(Error::unsupported_column(
                name,
                "fixed-length byte arrays are not supported",
            ));
        }
    };

    Ok(descriptor.with_nullable(column.max_def_level() > 0))
}

fn legacy_timestamp(name: &str, unit: TimeUnit) -> ColumnDescriptor {
    ColumnDescriptor::new(name, StorageType::Int64).with_semantic(Semantic::Timestamp {
        unit,
        utc_adjusted: true,
    })
}

fn time_unit(unit: &ParquetTimeUnit) -> TimeUnit {
    match unit {
        ParquetTimeUnit::MILLIS(_) => TimeUnit::Millis,
        ParquetTimeUnit::MICROS(_) => TimeUnit::Micros,
        ParquetTimeUnit::NANOS(_) => TimeUnit::Nanos,
    }
}
