// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use records::{error::ErrorKind as CastError, KaggleMovie, RawKaggleMovie, Type, Value};

/// A metadata row that didn't make it, keyed by whatever id it had
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub key: String,
    pub reason: ErrorKind,
}

#[derive(Debug, Clone, Default)]
pub struct KaggleCleaning {
    pub movies: Vec<KaggleMovie>,
    pub adult: usize,
    pub rejected: Vec<Rejected>,
}

fn typed<T>(
    text: &str,
    column: &'static str,
    tp: Type,
    cast: fn(&Value) -> Result<T, CastError>,
) -> Result<Option<T>, ErrorKind> {
    let invalid = |reason: String| ErrorKind::InvalidCell { column, reason };

    match Value::parse_cell(text, tp).map_err(|e| invalid(e.to_string()))? {
        Some(value) => cast(&value).map(Some).map_err(|e| invalid(e.to_string())),
        None => Ok(None),
    }
}

fn text(cell: &str) -> Option<String> {
    let cell = cell.trim();
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_owned())
    }
}

pub fn clean_row(raw: &RawKaggleMovie) -> Result<KaggleMovie, ErrorKind> {
    match raw.adult.trim() {
        "False" => {}
        other => return Err(ErrorKind::NotAMovie(other.to_owned())),
    }

    let id = typed(&raw.id, "id", Type::Int32, Value::as_i32)?
        .ok_or(ErrorKind::MissingValue("id"))?;

    // Counts are exported as floats, e.g. `5415.0`
    let vote_count = typed(&raw.vote_count, "vote_count", Type::Double, Value::as_f64)?
        .map(|count| count.round() as i32);

    Ok(KaggleMovie {
        id,
        imdb_id: text(&raw.imdb_id),
        title: text(&raw.title),
        original_title: text(&raw.original_title),
        tagline: text(&raw.tagline),
        belongs_to_collection: text(&raw.belongs_to_collection),
        genres: text(&raw.genres),
        original_language: text(&raw.original_language),
        overview: text(&raw.overview),
        production_companies: text(&raw.production_companies),
        production_countries: text(&raw.production_countries),
        spoken_languages: text(&raw.spoken_languages),
        budget: typed(&raw.budget, "budget", Type::Int64, Value::as_i64)?.unwrap_or(0),
        revenue: typed(&raw.revenue, "revenue", Type::Double, Value::as_f64)?,
        runtime: typed(&raw.runtime, "runtime", Type::Double, Value::as_f64)?,
        popularity: typed(&raw.popularity, "popularity", Type::Double, Value::as_f64)?,
        vote_average: typed(&raw.vote_average, "vote_average", Type::Double, Value::as_f64)?,
        vote_count,
        release_date: typed(&raw.release_date, "release_date", Type::Date, Value::as_date)?,
        video: typed(&raw.video, "video", Type::Bool, Value::as_bool)?.unwrap_or(false),
    })
}

/// Keep non-adult rows whose cells all parse, everything else is counted
pub fn clean_kaggle_metadata(raw: &[RawKaggleMovie]) -> KaggleCleaning {
    let mut cleaning = KaggleCleaning::default();

    for row in raw {
        match clean_row(row) {
            Ok(movie) => cleaning.movies.push(movie),
            Err(ErrorKind::NotAMovie(ref adult)) if adult == "True" => cleaning.adult += 1,
            Err(reason) => {
                let key = text(&row.id)
                    .or_else(|| text(&row.imdb_id))
                    .unwrap_or_else(|| "?".into());
                log::debug!("Rejecting metadata row {}: {}", key, reason);
                cleaning.rejected.push(Rejected { key, reason });
            }
        }
    }

    cleaning
}
