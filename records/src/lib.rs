// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod chunks;
pub mod entity;
pub mod error;
pub mod movie;
pub mod raw;
pub mod sources;
pub mod values;

pub use entity::{Entity, ToTable};
pub use movie::{KaggleMovie, Movie, Rating, RatingCounts, WikiMovie, RATING_SCALE};
pub use raw::{RawKaggleMovie, RawRating, RawWikiMovie};
pub use values::{Type, Value};
