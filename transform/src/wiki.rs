// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::parse::{parse_budget, parse_dollars, parse_imdb_id, parse_release_date, parse_runtime};
use records::{raw::flatten, RawWikiMovie, WikiMovie};
use serde_json::{Map, Value as Json};
use std::collections::{BTreeMap, HashSet};

/// Infobox keys holding a title in another language or script
pub const ALT_TITLE_KEYS: [&str; 20] = [
    "Also known as",
    "Arabic",
    "Cantonese",
    "Chinese",
    "French",
    "Hangul",
    "Hebrew",
    "Hepburn",
    "Japanese",
    "Literally",
    "Mandarin",
    "McCune–Reischauer",
    "Original title",
    "Polish",
    "Revised Romanization",
    "Romanized",
    "Russian",
    "Simplified",
    "Traditional",
    "Yiddish",
];

/// Applied in order, a later rename overwrites what an earlier one moved
pub const COLUMN_RENAMES: [(&str, &str); 19] = [
    ("Adaptation by", "Writer(s)"),
    ("Country of origin", "Country"),
    ("Directed by", "Director"),
    ("Distributed by", "Distributor"),
    ("Edited by", "Editor(s)"),
    ("Length", "Running time"),
    ("Original release", "Release date"),
    ("Music by", "Composer(s)"),
    ("Produced by", "Producer(s)"),
    ("Producer", "Producer(s)"),
    ("Productioncompanies ", "Production company(s)"),
    ("Productioncompany ", "Production company(s)"),
    ("Released", "Release Date"),
    ("Release Date", "Release date"),
    ("Screen story by", "Writer(s)"),
    ("Screenplay by", "Writer(s)"),
    ("Story by", "Writer(s)"),
    ("Theme music composer", "Composer(s)"),
    ("Written by", "Writer(s)"),
];

const PEOPLE_SEP: &str = ", ";

/// Outcome of cleaning the Wikipedia export
#[derive(Debug, Clone, Default)]
pub struct WikiCleaning {
    pub movies: Vec<WikiMovie>,
    /// Share of missing values per column, computed before dropping
    pub null_fractions: BTreeMap<String, f64>,
    pub dropped_columns: Vec<String>,
    pub not_films: usize,
    pub missing_imdb_id: usize,
    pub duplicates: usize,
}

/// TV series and entries without a director or IMDb link are not films.
/// An episode count marks a series even when its value is null.
pub fn is_feature_film(movie: &RawWikiMovie) -> bool {
    (movie.has("Director") || movie.has("Directed by"))
        && movie.has("imdb_link")
        && !movie.contains("No. of episodes")
}

/// Consolidate alternative titles and merge columns that mean the same
pub fn clean_movie(mut movie: RawWikiMovie) -> RawWikiMovie {
    let mut alt_titles = Map::new();
    for key in ALT_TITLE_KEYS.iter() {
        if let Some(value) = movie.remove(key) {
            alt_titles.insert((*key).to_owned(), value);
        }
    }

    if !alt_titles.is_empty() {
        movie.insert("alt_titles", Json::Object(alt_titles));
    }

    for (old, new) in COLUMN_RENAMES.iter() {
        if let Some(value) = movie.remove(old) {
            movie.insert(*new, value);
        }
    }

    movie
}

/// Per column, the share of movies where it is missing or null
pub fn null_fractions(movies: &[RawWikiMovie]) -> BTreeMap<String, f64> {
    if movies.is_empty() {
        return BTreeMap::new();
    }

    let mut present: BTreeMap<String, usize> = BTreeMap::new();
    for movie in movies {
        for key in movie.keys() {
            let count = present.entry(key.to_owned()).or_insert(0);
            if movie.has(key) {
                *count += 1;
            }
        }
    }

    let total = movies.len() as f64;
    present
        .into_iter()
        .map(|(key, count)| (key, 1.0 - count as f64 / total))
        .collect()
}

struct Columns<'a> {
    movie: &'a RawWikiMovie,
    dropped: &'a HashSet<String>,
}

impl<'a> Columns<'a> {
    fn text(&self, key: &str, sep: &str) -> Option<String> {
        if self.dropped.contains(key) {
            return None;
        }

        self.movie.text(key, sep)
    }

    fn people(&self, key: &str) -> Option<String> {
        self.text(key, PEOPLE_SEP)
    }
}

fn to_wiki_movie(movie: &RawWikiMovie, imdb_id: String, dropped: &HashSet<String>) -> WikiMovie {
    let columns = Columns { movie, dropped };

    let alt_titles = match movie.get("alt_titles") {
        Some(Json::Object(titles)) => titles
            .iter()
            .filter_map(|(key, value)| flatten(value, PEOPLE_SEP).map(|v| (key.clone(), v)))
            .collect(),
        _ => BTreeMap::new(),
    };

    WikiMovie {
        imdb_id,
        imdb_link: movie.text("imdb_link", " ").unwrap_or_default(),
        url: columns.text("url", " "),
        year: columns.text("year", " ").and_then(|y| y.parse().ok()),
        title: columns.text("title", " "),
        based_on: columns.people("Based on"),
        starring: columns.people("Starring"),
        cinematography: columns.people("Cinematography"),
        country: columns.people("Country"),
        language: columns.people("Language"),
        director: columns.people("Director"),
        distributor: columns.people("Distributor"),
        editors: columns.people("Editor(s)"),
        composers: columns.people("Composer(s)"),
        producers: columns.people("Producer(s)"),
        production_companies: columns.people("Production company(s)"),
        writers: columns.people("Writer(s)"),
        release_date: columns
            .text("Release date", " ")
            .and_then(|d| parse_release_date(&d)),
        running_time: columns
            .text("Running time", " ")
            .and_then(|r| parse_runtime(&r)),
        budget: columns.text("Budget", " ").and_then(|b| parse_budget(&b)),
        box_office: columns
            .text("Box office", " ")
            .and_then(|b| parse_dollars(&b)),
        alt_titles,
    }
}

/// Filter, consolidate, deduplicate and type the Wikipedia movies.
///
/// Columns whose null share reaches `null_threshold` are dropped, the typed
/// fields they feed stay empty.
pub fn clean_wiki_movies(raw: Vec<RawWikiMovie>, null_threshold: f64) -> WikiCleaning {
    let total = raw.len();
    let films: Vec<_> = raw.into_iter().filter(is_feature_film).collect();

    let mut cleaning = WikiCleaning {
        not_films: total - films.len(),
        ..Default::default()
    };

    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(films.len());
    for movie in films.into_iter().map(clean_movie) {
        let imdb_id = match movie
            .text("imdb_link", " ")
            .and_then(|link| parse_imdb_id(&link))
        {
            Some(id) => id,
            None => {
                cleaning.missing_imdb_id += 1;
                continue;
            }
        };

        if !seen.insert(imdb_id.clone()) {
            cleaning.duplicates += 1;
            continue;
        }

        unique.push((imdb_id, movie));
    }

    let raws: Vec<_> = unique.iter().map(|(_, movie)| movie.clone()).collect();
    cleaning.null_fractions = null_fractions(&raws);

    let dropped: HashSet<String> = cleaning
        .null_fractions
        .iter()
        .filter(|(_, fraction)| **fraction >= null_threshold)
        .map(|(column, _)| column.clone())
        .collect();

    cleaning.dropped_columns = dropped.iter().cloned().collect();
    cleaning.dropped_columns.sort();

    log::debug!(
        "Dropping {} sparse Wikipedia columns",
        cleaning.dropped_columns.len()
    );

    cleaning.movies = unique
        .into_iter()
        .map(|(imdb_id, movie)| to_wiki_movie(&movie, imdb_id, &dropped))
        .collect();

    cleaning
}
