// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::movies;
use chrono::NaiveDate;
use records::Movie;

/// Columns of the `movies` table, bounds how many rows fit in one insert
pub const MOVIE_COLUMNS: usize = 41;

#[derive(Debug, Clone, Insertable)]
#[table_name = "movies"]
pub struct NewMovie<'a> {
    pub imdb_id: &'a str,
    pub kaggle_id: i32,
    pub title: &'a str,
    pub original_title: Option<&'a str>,
    pub tagline: Option<&'a str>,
    pub belongs_to_collection: Option<&'a str>,
    pub wikipedia_url: Option<&'a str>,
    pub imdb_link: Option<&'a str>,
    pub runtime: Option<f64>,
    pub budget: Option<f64>,
    pub revenue: Option<f64>,
    pub release_date: Option<NaiveDate>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
    pub genres: Option<&'a str>,
    pub original_language: Option<&'a str>,
    pub overview: Option<&'a str>,
    pub spoken_languages: Option<&'a str>,
    pub country: Option<&'a str>,
    pub production_companies: Option<&'a str>,
    pub production_countries: Option<&'a str>,
    pub distributor: Option<&'a str>,
    pub producers: Option<&'a str>,
    pub director: Option<&'a str>,
    pub starring: Option<&'a str>,
    pub cinematography: Option<&'a str>,
    pub editors: Option<&'a str>,
    pub writers: Option<&'a str>,
    pub composers: Option<&'a str>,
    pub based_on: Option<&'a str>,
    pub rating_0_5: i64,
    pub rating_1_0: i64,
    pub rating_1_5: i64,
    pub rating_2_0: i64,
    pub rating_2_5: i64,
    pub rating_3_0: i64,
    pub rating_3_5: i64,
    pub rating_4_0: i64,
    pub rating_4_5: i64,
    pub rating_5_0: i64,
}

impl<'a> From<&'a Movie> for NewMovie<'a> {
    fn from(movie: &'a Movie) -> Self {
        let counts = movie.rating_counts.counts();

        Self {
            imdb_id: &movie.imdb_id,
            kaggle_id: movie.kaggle_id,
            title: &movie.title,
            original_title: movie.original_title.as_deref(),
            tagline: movie.tagline.as_deref(),
            belongs_to_collection: movie.belongs_to_collection.as_deref(),
            wikipedia_url: movie.wikipedia_url.as_deref(),
            imdb_link: movie.imdb_link.as_deref(),
            runtime: movie.runtime,
            budget: movie.budget,
            revenue: movie.revenue,
            release_date: movie.release_date,
            popularity: movie.popularity,
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            genres: movie.genres.as_deref(),
            original_language: movie.original_language.as_deref(),
            overview: movie.overview.as_deref(),
            spoken_languages: movie.spoken_languages.as_deref(),
            country: movie.country.as_deref(),
            production_companies: movie.production_companies.as_deref(),
            production_countries: movie.production_countries.as_deref(),
            distributor: movie.distributor.as_deref(),
            producers: movie.producers.as_deref(),
            director: movie.director.as_deref(),
            starring: movie.starring.as_deref(),
            cinematography: movie.cinematography.as_deref(),
            editors: movie.editors.as_deref(),
            writers: movie.writers.as_deref(),
            composers: movie.composers.as_deref(),
            based_on: movie.based_on.as_deref(),
            rating_0_5: counts[0],
            rating_1_0: counts[1],
            rating_1_5: counts[2],
            rating_2_0: counts[3],
            rating_2_5: counts[4],
            rating_3_0: counts[5],
            rating_3_5: counts[6],
            rating_4_0: counts[7],
            rating_4_5: counts[8],
            rating_5_0: counts[9],
        }
    }
}
