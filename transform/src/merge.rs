// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::ratings::RatingTally;
use chrono::NaiveDate;
use records::{KaggleMovie, Movie, WikiMovie};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct Merged {
    pub movies: Vec<Movie>,
    /// Pairs whose release dates are too far apart to be the same movie
    pub mismatched: usize,
    pub duplicates: usize,
    pub kaggle_only: usize,
}

/// Wikipedia says after 1996 while Kaggle says before 1965, wrong pairing
fn is_mismatch(wiki: &WikiMovie, kaggle: &KaggleMovie) -> bool {
    let wiki_after = NaiveDate::from_ymd_opt(1996, 1, 1);
    let kaggle_before = NaiveDate::from_ymd_opt(1965, 1, 1);

    match (wiki.release_date, kaggle.release_date) {
        (Some(w), Some(k)) => Some(w) > wiki_after && Some(k) < kaggle_before,
        _ => false,
    }
}

/// Kaggle's value unless it is missing or zero
fn fill(kaggle: Option<f64>, wiki: Option<f64>) -> Option<f64> {
    match kaggle {
        Some(value) if value != 0.0 => Some(value),
        _ => wiki.or(kaggle),
    }
}

fn merge_pair(wiki: &WikiMovie, kaggle: &KaggleMovie, imdb_id: String) -> Movie {
    let budget = if kaggle.budget == 0 {
        None
    } else {
        Some(kaggle.budget as f64)
    };

    Movie {
        imdb_id,
        kaggle_id: kaggle.id,
        title: kaggle
            .title
            .clone()
            .or_else(|| wiki.title.clone())
            .unwrap_or_default(),
        original_title: kaggle.original_title.clone(),
        tagline: kaggle.tagline.clone(),
        belongs_to_collection: kaggle.belongs_to_collection.clone(),
        wikipedia_url: wiki.url.clone(),
        imdb_link: Some(wiki.imdb_link.clone()).filter(|link| !link.is_empty()),
        runtime: fill(kaggle.runtime, wiki.running_time),
        budget: fill(budget, wiki.budget),
        revenue: fill(kaggle.revenue, wiki.box_office),
        release_date: kaggle.release_date.or(wiki.release_date),
        popularity: kaggle.popularity,
        vote_average: kaggle.vote_average,
        vote_count: kaggle.vote_count,
        genres: kaggle.genres.clone(),
        original_language: kaggle.original_language.clone(),
        overview: kaggle.overview.clone(),
        spoken_languages: kaggle.spoken_languages.clone(),
        country: wiki.country.clone(),
        production_companies: kaggle.production_companies.clone(),
        production_countries: kaggle.production_countries.clone(),
        distributor: wiki.distributor.clone(),
        producers: wiki.producers.clone(),
        director: wiki.director.clone(),
        starring: wiki.starring.clone(),
        cinematography: wiki.cinematography.clone(),
        editors: wiki.editors.clone(),
        writers: wiki.writers.clone(),
        composers: wiki.composers.clone(),
        based_on: wiki.based_on.clone(),
        rating_counts: Default::default(),
    }
}

/// Inner join both sources on the IMDb id, in Kaggle's row order
pub fn merge_movies(wiki: &[WikiMovie], kaggle: &[KaggleMovie]) -> Merged {
    let by_imdb: HashMap<&str, &WikiMovie> =
        wiki.iter().map(|m| (m.imdb_id.as_str(), m)).collect();

    let mut merged = Merged::default();
    let mut seen = HashSet::new();

    for kaggle_movie in kaggle {
        let imdb_id = match kaggle_movie.imdb_id.as_deref() {
            Some(id) => id,
            None => {
                merged.kaggle_only += 1;
                continue;
            }
        };

        let wiki_movie = match by_imdb.get(imdb_id) {
            Some(movie) => *movie,
            None => {
                merged.kaggle_only += 1;
                continue;
            }
        };

        if is_mismatch(wiki_movie, kaggle_movie) {
            log::debug!(
                "Dropping mismatched pair {} ({:?} vs {:?})",
                imdb_id,
                wiki_movie.title,
                kaggle_movie.title
            );
            merged.mismatched += 1;
            continue;
        }

        if !seen.insert(imdb_id) {
            merged.duplicates += 1;
            continue;
        }

        merged
            .movies
            .push(merge_pair(wiki_movie, kaggle_movie, imdb_id.to_owned()));
    }

    merged
}

/// Fill the per-score rating columns, unrated movies keep zeros
pub fn attach_rating_counts(movies: &mut [Movie], tally: &RatingTally) {
    for movie in movies {
        movie.rating_counts = tally.counts_for(movie.kaggle_id);
    }
}
