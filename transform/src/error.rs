// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, Eq, PartialEq, DError)]
pub enum ErrorKind {
    #[error("Invalid {column} cell: {reason}")]
    InvalidCell {
        column: &'static str,
        reason: String,
    },

    #[error("Missing required {0}")]
    MissingValue(&'static str),

    #[error("Not a plain movie, adult is '{0}'")]
    NotAMovie(String),

    #[error("Timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}
