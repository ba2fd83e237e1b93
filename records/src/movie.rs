// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::entity::Entity;
use chrono::{NaiveDate, NaiveDateTime};
use common_macros::hash_map;
use std::collections::{BTreeMap, HashMap};

/// Half-star scale used by MovieLens, 0.5 up to 5.0
pub const RATING_SCALE: [f64; 10] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WikiMovie {
    pub imdb_id: String,
    pub imdb_link: String,
    pub url: Option<String>,
    pub year: Option<i32>,
    pub title: Option<String>,
    pub based_on: Option<String>,
    pub starring: Option<String>,
    pub cinematography: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub director: Option<String>,
    pub distributor: Option<String>,
    pub editors: Option<String>,
    pub composers: Option<String>,
    pub producers: Option<String>,
    pub production_companies: Option<String>,
    pub writers: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Minutes
    pub running_time: Option<f64>,
    pub budget: Option<f64>,
    pub box_office: Option<f64>,
    pub alt_titles: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KaggleMovie {
    pub id: i32,
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub tagline: Option<String>,
    pub belongs_to_collection: Option<String>,
    pub genres: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub production_companies: Option<String>,
    pub production_countries: Option<String>,
    pub spoken_languages: Option<String>,
    pub budget: i64,
    pub revenue: Option<f64>,
    pub runtime: Option<f64>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
    pub release_date: Option<NaiveDate>,
    pub video: bool,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rating {
    pub user_id: i32,
    pub movie_id: i32,
    pub rating: f64,
    pub rated_at: NaiveDateTime,
}

/// Number of ratings a movie got on every step of the scale
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RatingCounts([i64; 10]);

impl RatingCounts {
    /// Index of the bucket for a score, `None` when off the half-star grid
    pub fn bucket(score: f64) -> Option<usize> {
        let doubled = score * 2.0;
        if (doubled - doubled.round()).abs() > 1e-9 {
            return None;
        }

        let doubled = doubled.round() as i64;
        if (1..=10).contains(&doubled) {
            Some(doubled as usize - 1)
        } else {
            None
        }
    }

    /// Returns false when the score is off scale
    pub fn record(&mut self, score: f64) -> bool {
        match Self::bucket(score) {
            Some(idx) => {
                self.0[idx] += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, score: f64) -> i64 {
        Self::bucket(score).map(|idx| self.0[idx]).unwrap_or(0)
    }

    pub fn counts(&self) -> &[i64; 10] {
        &self.0
    }

    pub fn total(&self) -> i64 {
        self.0.iter().sum()
    }

    pub fn merge(&mut self, other: &RatingCounts) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }
}

/// A movie after both sources were merged, one row of the `movies` table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Movie {
    pub imdb_id: String,
    pub kaggle_id: i32,
    pub title: String,
    pub original_title: Option<String>,
    pub tagline: Option<String>,
    pub belongs_to_collection: Option<String>,
    pub wikipedia_url: Option<String>,
    pub imdb_link: Option<String>,
    pub runtime: Option<f64>,
    pub budget: Option<f64>,
    pub revenue: Option<f64>,
    pub release_date: Option<NaiveDate>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
    pub genres: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub spoken_languages: Option<String>,
    pub country: Option<String>,
    pub production_companies: Option<String>,
    pub production_countries: Option<String>,
    pub distributor: Option<String>,
    pub producers: Option<String>,
    pub director: Option<String>,
    pub starring: Option<String>,
    pub cinematography: Option<String>,
    pub editors: Option<String>,
    pub writers: Option<String>,
    pub composers: Option<String>,
    pub based_on: Option<String>,
    pub rating_counts: RatingCounts,
}

fn show<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl Entity for WikiMovie {
    type Id = String;
    const ID_COLUMN: &'static str = "imdb_id";

    fn get_id(&self) -> Self::Id {
        self.imdb_id.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        hash_map! {
            "title".into() => show(&self.title),
            "director".into() => show(&self.director),
            "release_date".into() => show(&self.release_date),
            "running_time".into() => show(&self.running_time),
            "budget".into() => show(&self.budget),
            "box_office".into() => show(&self.box_office),
        }
    }
}

impl Entity for KaggleMovie {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        hash_map! {
            "imdb_id".into() => show(&self.imdb_id),
            "title".into() => show(&self.title),
            "release_date".into() => show(&self.release_date),
            "budget".into() => self.budget.to_string(),
            "revenue".into() => show(&self.revenue),
            "runtime".into() => show(&self.runtime),
        }
    }
}

impl Entity for Movie {
    type Id = String;
    const ID_COLUMN: &'static str = "imdb_id";

    fn get_id(&self) -> Self::Id {
        self.imdb_id.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        hash_map! {
            "kaggle_id".into() => self.kaggle_id.to_string(),
            "title".into() => self.title.clone(),
            "release_date".into() => show(&self.release_date),
            "runtime".into() => show(&self.runtime),
            "budget".into() => show(&self.budget),
            "revenue".into() => show(&self.revenue),
            "ratings".into() => self.rating_counts.total().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_follow_half_stars() {
        assert_eq!(RatingCounts::bucket(0.5), Some(0));
        assert_eq!(RatingCounts::bucket(3.0), Some(5));
        assert_eq!(RatingCounts::bucket(5.0), Some(9));
        assert_eq!(RatingCounts::bucket(0.0), None);
        assert_eq!(RatingCounts::bucket(5.5), None);
        assert_eq!(RatingCounts::bucket(3.7), None);
    }

    #[test]
    fn record_and_merge_counts() {
        let mut a = RatingCounts::default();
        assert!(a.record(4.0));
        assert!(a.record(4.0));
        assert!(!a.record(4.2));

        let mut b = RatingCounts::default();
        b.record(0.5);
        b.record(4.0);

        a.merge(&b);
        assert_eq!(a.get(4.0), 3);
        assert_eq!(a.get(0.5), 1);
        assert_eq!(a.get(4.2), 0);
        assert_eq!(a.total(), 4);
    }
}
