// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use serde::Deserialize;
use serde_json::{Map, Value as Json};

/// A Wikipedia infobox as scraped, keys vary from movie to movie
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawWikiMovie {
    fields: Map<String, Json>,
}

impl RawWikiMovie {
    pub fn new(fields: Map<String, Json>) -> Self {
        Self { fields }
    }

    /// The key is present and not null
    pub fn has(&self, key: &str) -> bool {
        matches!(self.fields.get(key), Some(value) if !value.is_null())
    }

    /// The key is present, even when it holds null
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Json> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Json> {
        self.fields.remove(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Json) {
        self.fields.insert(key.into(), value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Flatten a field into text, list values are joined with `sep`
    pub fn text(&self, key: &str, sep: &str) -> Option<String> {
        self.fields.get(key).and_then(|value| flatten(value, sep))
    }
}

pub fn flatten(value: &Json, sep: &str) -> Option<String> {
    let text = match value {
        Json::Null => return None,
        Json::String(s) => s.trim().to_owned(),
        Json::Number(n) => n.to_string(),
        Json::Bool(b) => b.to_string(),
        Json::Array(values) => values
            .iter()
            .filter_map(|v| flatten(v, sep))
            .collect::<Vec<_>>()
            .join(sep),
        Json::Object(map) => map
            .values()
            .filter_map(|v| flatten(v, sep))
            .collect::<Vec<_>>()
            .join(sep),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// One row of `movies_metadata.csv`, every cell still text
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawKaggleMovie {
    pub adult: String,
    pub belongs_to_collection: String,
    pub budget: String,
    pub genres: String,
    pub id: String,
    pub imdb_id: String,
    pub original_language: String,
    pub original_title: String,
    pub overview: String,
    pub popularity: String,
    pub production_companies: String,
    pub production_countries: String,
    pub release_date: String,
    pub revenue: String,
    pub runtime: String,
    pub spoken_languages: String,
    pub tagline: String,
    pub title: String,
    pub video: String,
    pub vote_average: String,
    pub vote_count: String,
}

/// One row of the MovieLens `ratings.csv`
#[derive(Debug, Copy, Clone, Deserialize, PartialEq)]
pub struct RawRating {
    #[serde(rename = "userId")]
    pub user_id: i32,
    #[serde(rename = "movieId")]
    pub movie_id: i32,
    pub rating: f64,
    pub timestamp: i64,
}
