// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Batch size for {0} must be greater than zero")]
    EmptyBatch(&'static str),

    #[error("Batch of {size} rows for {table} exceeds the limit of {max} rows per insert")]
    BatchTooLarge {
        table: &'static str,
        size: usize,
        max: usize,
    },
}
