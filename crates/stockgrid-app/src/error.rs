// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

/// Failures raised by [`crate::TableViewModel`]. Neither leaves the record set
/// partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("row {index} is out of range for a table of {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown field {0:?}; expected one of: name, sku, quantity")]
    UnknownField(String),
}

pub type TableResult<T> = std::result::Result<T, TableError>;
