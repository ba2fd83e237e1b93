// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod error;
pub mod kaggle;
pub mod merge;
pub mod parse;
pub mod ratings;
pub mod wiki;

pub use kaggle::{clean_kaggle_metadata, KaggleCleaning, Rejected};
pub use merge::{attach_rating_counts, merge_movies, Merged};
pub use ratings::{clean_ratings, RatingTally};
pub use wiki::{clean_wiki_movies, WikiCleaning};
