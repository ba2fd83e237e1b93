// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use config::Config;
use records::sources::{read_kaggle_metadata, rating_chunks, read_wiki_movies};
use records::{Movie, Rating};
use std::collections::HashSet;
use std::time::Instant;
use store::Store;
use transform::{
    attach_rating_counts, clean_kaggle_metadata, clean_ratings, clean_wiki_movies, merge_movies,
    RatingTally,
};

/// What a run produced, counts are after every filter
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub movies: usize,
    pub ratings: usize,
    pub rejected_ratings: usize,
    pub unknown_ratings: usize,
}

/// Extract and transform both movie sources, merged and ready for counts
pub fn movies(cfg: &Config) -> Result<Vec<Movie>, Error> {
    let raw_wiki = read_wiki_movies(&cfg.sources.wiki_movies)?;
    log::info!("Read {} Wikipedia entries", raw_wiki.len());

    let wiki = clean_wiki_movies(raw_wiki, cfg.transform.null_threshold);
    log::info!(
        "Kept {} Wikipedia movies ({} not films, {} without IMDb id, {} duplicates)",
        wiki.movies.len(),
        wiki.not_films,
        wiki.missing_imdb_id,
        wiki.duplicates
    );
    if !wiki.dropped_columns.is_empty() {
        log::info!("Dropped sparse columns: {}", wiki.dropped_columns.join(", "));
    }

    let raw_kaggle = read_kaggle_metadata(&cfg.sources.kaggle_metadata)?;
    log::info!(
        "Read {} Kaggle metadata rows ({} malformed)",
        raw_kaggle.rows.len(),
        raw_kaggle.skipped
    );

    let kaggle = clean_kaggle_metadata(&raw_kaggle.rows);
    log::info!(
        "Kept {} Kaggle movies ({} adult, {} rejected)",
        kaggle.movies.len(),
        kaggle.adult,
        kaggle.rejected.len()
    );

    let merged = merge_movies(&wiki.movies, &kaggle.movies);
    log::info!(
        "Merged {} movies ({} mismatched, {} duplicates, {} only on Kaggle)",
        merged.movies.len(),
        merged.mismatched,
        merged.duplicates,
        merged.kaggle_only
    );

    Ok(merged.movies)
}

fn keep_known(ratings: Vec<Rating>, known: &HashSet<i32>) -> (Vec<Rating>, usize) {
    let before = ratings.len();
    let kept: Vec<Rating> = ratings
        .into_iter()
        .filter(|rating| known.contains(&rating.movie_id))
        .collect();
    let dropped = before - kept.len();

    (kept, dropped)
}

/// Stream the ratings file chunk by chunk, tallying each and handing it to `sink`
pub fn stream_ratings<F>(
    cfg: &Config,
    known: Option<&HashSet<i32>>,
    mut sink: F,
) -> Result<(RatingTally, Outcome), Error>
where
    F: FnMut(&[Rating]) -> Result<usize, Error>,
{
    let mut tally = RatingTally::default();
    let mut outcome = Outcome::default();
    let mut chunks = rating_chunks(&cfg.sources.ratings, cfg.transform.ratings_chunk_size)?;
    let start = Instant::now();

    for chunk in &mut chunks {
        let chunk = chunk?;
        let (ratings, rejected) = clean_ratings(&chunk);
        outcome.rejected_ratings += rejected;

        let ratings = match known {
            Some(known) => {
                let (kept, dropped) = keep_known(ratings, known);
                outcome.unknown_ratings += dropped;
                kept
            }
            None => ratings,
        };

        tally.add_all(&ratings);
        outcome.ratings += sink(&ratings)?;

        log::info!(
            "Done. {} rows imported, {:.2} total seconds elapsed",
            outcome.ratings,
            start.elapsed().as_secs_f64()
        );
    }

    if chunks.skipped() > 0 {
        log::warn!("Skipped {} malformed rating rows", chunks.skipped());
    }
    if tally.off_scale() > 0 {
        log::warn!("{} ratings fall off the half-star scale", tally.off_scale());
    }

    Ok((tally, outcome))
}

pub fn run(cfg: &Config, skip_load: bool) -> Result<Outcome, Error> {
    let start = Instant::now();
    let mut movies = movies(cfg)?;

    let known: Option<HashSet<i32>> = if cfg.transform.only_known_movies {
        Some(movies.iter().map(|movie| movie.kaggle_id).collect())
    } else {
        None
    };

    let store = if skip_load {
        log::info!("Skipping the load, nothing will be written");
        None
    } else {
        let url = cfg.database.url()?;
        let store = Store::connect(
            &url,
            cfg.load.movies_batch_size,
            cfg.load.ratings_batch_size,
        )?;
        store.prepare(cfg.load.mode)?;
        Some(store)
    };

    let (tally, mut outcome) = stream_ratings(cfg, known.as_ref(), |ratings| match &store {
        Some(store) => store.insert_ratings(ratings),
        None => Ok(ratings.len()),
    })?;
    log::info!(
        "Tallied {} ratings across {} movies ({} rejected, {} for unknown movies)",
        tally.total(),
        tally.movies(),
        outcome.rejected_ratings,
        outcome.unknown_ratings
    );

    attach_rating_counts(&mut movies, &tally);

    outcome.movies = match &store {
        Some(store) => {
            let inserted = store.insert_movies(&movies)?;
            let (movie_rows, rating_rows) = store.row_counts()?;
            log::info!(
                "Database now holds {} movies and {} ratings",
                movie_rows,
                rating_rows
            );
            inserted
        }
        None => movies.len(),
    };

    log::info!(
        "Finished in {:.2} total seconds elapsed",
        start.elapsed().as_secs_f64()
    );

    Ok(outcome)
}
