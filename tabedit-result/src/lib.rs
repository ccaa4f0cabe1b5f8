//! Error types and result definitions for tabedit.
//!
//! Every tabedit crate returns [`Result<T>`] with the single [`Error`] enum
//! defined here, so errors cross crate boundaries with `?` and callers match
//! on one set of variants.
//!
//! # Error Categories
//!
//! - **Wrapped library errors** ([`Error::Io`], [`Error::Arrow`],
//!   [`Error::Parquet`], [`Error::Csv`])
//! - **Input errors** ([`Error::MalformedInput`], [`Error::EmptyInput`])
//! - **Cell errors** ([`Error::TypeConversion`]), carrying column, row and
//!   the offending text
//! - **Diagnostics** ([`Error::ArityMismatch`]), logged but never returned
//! - **Shape errors** ([`Error::UnsupportedColumn`])
//! - **Session misuse** ([`Error::InvalidState`])
//! - **Internal errors** ([`Error::Internal`])

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
