// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Failed to cast to some value ({0})")]
    ValueConvert(String),

    #[error("Couldn't cast value to {0}")]
    CastingValue(&'static str),

    #[error("Expected a JSON array of movie objects")]
    NotAnArray,

    #[error("Movie entry #{0} isn't a JSON object")]
    NotAnObject(usize),

    #[error("Missing column {0}")]
    MissingColumn(&'static str),
}
