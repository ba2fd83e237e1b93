// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use chrono::NaiveDateTime;
use records::{RatingCounts, RawRating, Rating};
use std::collections::HashMap;

pub fn clean_rating(raw: &RawRating) -> Result<Rating, ErrorKind> {
    let rated_at = NaiveDateTime::from_timestamp_opt(raw.timestamp, 0)
        .ok_or(ErrorKind::TimestampOutOfRange(raw.timestamp))?;

    Ok(Rating {
        user_id: raw.user_id,
        movie_id: raw.movie_id,
        rating: raw.rating,
        rated_at,
    })
}

/// Convert a chunk of raw ratings, returns them along with the rejected count
pub fn clean_ratings(raw: &[RawRating]) -> (Vec<Rating>, usize) {
    let mut rejected = 0;
    let mut ratings = Vec::with_capacity(raw.len());

    for row in raw {
        match clean_rating(row) {
            Ok(rating) => ratings.push(rating),
            Err(e) => {
                log::debug!("Rejecting rating of user({}): {}", row.user_id, e);
                rejected += 1;
            }
        }
    }

    (ratings, rejected)
}

/// Running count of ratings per movie, fed one chunk at a time
#[derive(Debug, Clone, Default)]
pub struct RatingTally {
    counts: HashMap<i32, RatingCounts>,
    total: usize,
    off_scale: usize,
}

impl RatingTally {
    pub fn add(&mut self, rating: &Rating) {
        self.total += 1;

        let counts = self.counts.entry(rating.movie_id).or_default();
        if !counts.record(rating.rating) {
            self.off_scale += 1;
        }
    }

    pub fn add_all<'a>(&mut self, ratings: impl IntoIterator<Item = &'a Rating>) {
        for rating in ratings {
            self.add(rating);
        }
    }

    pub fn counts_for(&self, movie_id: i32) -> RatingCounts {
        self.counts.get(&movie_id).copied().unwrap_or_default()
    }

    /// Counts over every movie
    pub fn histogram(&self) -> RatingCounts {
        let mut histogram = RatingCounts::default();
        for counts in self.counts.values() {
            histogram.merge(counts);
        }

        histogram
    }

    pub fn movies(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn off_scale(&self) -> usize {
        self.off_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;
    use chrono::NaiveDate;

    fn raw(user_id: i32, movie_id: i32, rating: f64) -> RawRating {
        RawRating {
            user_id,
            movie_id,
            rating,
            timestamp: 1_425_941_529,
        }
    }

    #[test]
    fn timestamp_becomes_datetime() -> Result<(), Error> {
        let rating = clean_rating(&raw(1, 110, 1.0))?;
        let expected = NaiveDate::from_ymd(2015, 3, 9).and_hms(22, 52, 9);

        assert_eq!(rating.rated_at, expected);
        Ok(())
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        let mut bad = raw(1, 110, 1.0);
        bad.timestamp = i64::MAX;

        let (ratings, rejected) = clean_ratings(&[raw(1, 147, 4.5), bad]);
        assert_eq!(ratings.len(), 1);
        assert_eq!(rejected, 1);
    }

    #[test]
    fn tally_across_chunks() -> Result<(), Error> {
        let mut tally = RatingTally::default();

        let (first, _) = clean_ratings(&[raw(1, 110, 4.0), raw(2, 110, 4.0), raw(3, 858, 5.0)]);
        tally.add_all(&first);

        let (second, _) = clean_ratings(&[raw(4, 110, 0.5), raw(5, 110, 4.2)]);
        tally.add_all(&second);

        let counts = tally.counts_for(110);
        assert_eq!(counts.get(4.0), 2);
        assert_eq!(counts.get(0.5), 1);
        assert_eq!(counts.total(), 3);

        assert_eq!(tally.counts_for(858).get(5.0), 1);
        assert_eq!(tally.counts_for(1).total(), 0);

        assert_eq!(tally.total(), 5);
        assert_eq!(tally.off_scale(), 1);
        assert_eq!(tally.movies(), 2);
        assert_eq!(tally.histogram().total(), 4);

        Ok(())
    }
}
