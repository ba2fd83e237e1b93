// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

#[macro_use]
extern crate diesel;

pub mod error;
pub mod models;
pub mod schema;

use crate::error::ErrorKind;
use crate::models::{
    movies::{NewMovie, MOVIE_COLUMNS},
    ratings::NewRating,
};
use crate::schema::{movies, ratings};
use anyhow::Error;
use config::LoadMode;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::{insert_into, prelude::*};
use indicatif::ProgressIterator;
use records::{Movie, Rating};

/// Postgres refuses statements with more bind parameters than this
pub const MAX_BIND_PARAMS: usize = 65_535;

/// Columns bound per row on insert, `id` is serial
pub const RATING_COLUMNS: usize = 4;

const CREATE_TABLES: &str = include_str!("../migrations/2020-07-01-000000_create_movie_data/up.sql");
const DROP_TABLES: &str = include_str!("../migrations/2020-07-01-000000_create_movie_data/down.sql");

pub fn establish_connection(url: &str) -> Result<PgConnection, Error> {
    Ok(PgConnection::establish(&url)?)
}

/// Largest number of rows with `columns` each that fits in one insert
pub fn max_batch(columns: usize) -> usize {
    MAX_BIND_PARAMS / columns
}

pub fn check_batch(table: &'static str, size: usize, columns: usize) -> Result<(), ErrorKind> {
    let max = max_batch(columns);

    if size == 0 {
        Err(ErrorKind::EmptyBatch(table))
    } else if size > max {
        Err(ErrorKind::BatchTooLarge { table, size, max })
    } else {
        Ok(())
    }
}

pub struct Store {
    conn: PgConnection,
    movies_batch: usize,
    ratings_batch: usize,
}

impl Store {
    pub fn connect(url: &str, movies_batch: usize, ratings_batch: usize) -> Result<Self, Error> {
        check_batch("movies", movies_batch, MOVIE_COLUMNS)?;
        check_batch("ratings", ratings_batch, RATING_COLUMNS)?;

        let conn = establish_connection(url)?;
        log::info!("Connected to the database");

        Ok(Self {
            conn,
            movies_batch,
            ratings_batch,
        })
    }

    /// Make sure both tables exist, replacing drops whatever was there first
    pub fn prepare(&self, mode: LoadMode) -> Result<(), Error> {
        if mode == LoadMode::Replace {
            log::info!("Dropping existing movies and ratings tables");
            self.conn.batch_execute(DROP_TABLES)?;
        }

        self.conn.batch_execute(CREATE_TABLES)?;
        Ok(())
    }

    /// All movies go in or none do. Rows already stored under the same
    /// `imdb_id` are replaced.
    pub fn insert_movies(&self, movies: &[Movie]) -> Result<usize, Error> {
        let rows: Vec<NewMovie> = movies.iter().map(NewMovie::from).collect();
        log::info!("Pushing {} movies into the database", rows.len());

        self.conn.transaction::<_, Error, _>(|| {
            let mut inserted = 0;
            let mut replaced = 0;
            for chunk in rows.chunks(self.movies_batch).progress() {
                let ids: Vec<String> = chunk.iter().map(|row| row.imdb_id.to_owned()).collect();
                replaced += diesel::delete(movies::table.filter(movies::imdb_id.eq_any(ids)))
                    .execute(&self.conn)?;

                inserted += insert_into(movies::table)
                    .values(chunk)
                    .execute(&self.conn)?;
            }

            if replaced > 0 {
                log::info!("Replaced {} movies already in the database", replaced);
            }

            Ok(inserted)
        })
    }

    /// Ratings a user already gave the same movie are skipped, the count
    /// returned is only of new rows
    pub fn insert_ratings(&self, ratings: &[Rating]) -> Result<usize, Error> {
        let rows: Vec<NewRating> = ratings.iter().map(NewRating::from).collect();

        let mut inserted = 0;
        for chunk in rows.chunks(self.ratings_batch) {
            inserted += insert_into(ratings::table)
                .values(chunk)
                .on_conflict((ratings::user_id, ratings::movie_id))
                .do_nothing()
                .execute(&self.conn)?;
        }

        Ok(inserted)
    }

    /// Rows currently in `movies` and `ratings`
    pub fn row_counts(&self) -> Result<(i64, i64), Error> {
        let movies = movies::table.count().get_result::<i64>(&self.conn)?;
        let ratings = ratings::table.count().get_result::<i64>(&self.conn)?;

        Ok((movies, ratings))
    }
}


#[cfg(feature = "test-store")]
#[cfg(test)]
mod db_tests {
    use super::*;
    use chrono::NaiveDate;
    use records::RatingCounts;

    fn store() -> Result<Store, Error> {
        let url = dotenv::var("DATABASE_URL")?;
        Store::connect(&url, 100, 100)
    }

    fn ghost(counts: RatingCounts) -> Movie {
        Movie {
            imdb_id: "tt0099653".into(),
            kaggle_id: 251,
            title: "Ghost".into(),
            rating_counts: counts,
            ..Default::default()
        }
    }

    fn ratings(users: i32) -> Vec<Rating> {
        let rated_at = NaiveDate::from_ymd(2015, 3, 9).and_hms(22, 52, 9);
        (1..=users)
            .map(|user_id| Rating {
                user_id,
                movie_id: 251,
                rating: 4.0,
                rated_at,
            })
            .collect()
    }

    #[test]
    fn replace_then_append_again() -> Result<(), Error> {
        let store = store()?;
        store.prepare(LoadMode::Replace)?;

        let mut counts = RatingCounts::default();
        counts.record(4.0);

        assert_eq!(store.insert_ratings(&ratings(250))?, 250);
        assert_eq!(store.insert_movies(&[ghost(counts)])?, 1);
        assert_eq!(store.row_counts()?, (1, 250));

        // Same files loaded a second time
        store.prepare(LoadMode::Append)?;
        assert_eq!(store.row_counts()?, (1, 250));

        counts.record(3.5);
        assert_eq!(store.insert_ratings(&ratings(300))?, 50);
        assert_eq!(store.insert_movies(&[ghost(counts)])?, 1);
        assert_eq!(store.row_counts()?, (1, 300));

        let stored: i64 = movies::table
            .select(movies::rating_3_5)
            .filter(movies::imdb_id.eq("tt0099653"))
            .get_result(&store.conn)?;
        assert_eq!(stored, 1);

        Ok(())
    }
}
