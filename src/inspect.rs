// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::pipeline;
use anyhow::Error;
use config::Config;
use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, Table};
use records::sources::{read_kaggle_metadata, read_wiki_movies};
use records::{RatingCounts, ToTable, RATING_SCALE};
use std::collections::{BTreeMap, HashSet};
use transform::error::ErrorKind;
use transform::{clean_kaggle_metadata, clean_wiki_movies, Rejected, WikiCleaning};

/// The source an `inspect` report is about
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Source {
    Wiki,
    Kaggle,
    Ratings,
}

impl Source {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "wiki" => Some(Source::Wiki),
            "kaggle" => Some(Source::Kaggle),
            "ratings" => Some(Source::Ratings),
            _ => None,
        }
    }
}

pub fn null_table(cleaning: &WikiCleaning) -> Table {
    let dropped: HashSet<&str> = cleaning
        .dropped_columns
        .iter()
        .map(String::as_str)
        .collect();

    let mut table = Table::new();
    table.set_titles(row!["column", "null fraction", "dropped"]);

    for (column, fraction) in &cleaning.null_fractions {
        let mark = if dropped.contains(column.as_str()) {
            "x"
        } else {
            ""
        };
        table.add_row(row![column, format!("{:.3}", fraction), mark]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}

fn reason_label(reason: &ErrorKind) -> String {
    match reason {
        ErrorKind::InvalidCell { column, .. } => format!("invalid {}", column),
        ErrorKind::MissingValue(column) => format!("missing {}", column),
        ErrorKind::NotAMovie(_) => "bad adult flag".into(),
        ErrorKind::TimestampOutOfRange(_) => "timestamp out of range".into(),
    }
}

/// Rejected rows grouped by what was wrong with them
pub fn rejection_counts(rejected: &[Rejected]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for rejection in rejected {
        *counts.entry(reason_label(&rejection.reason)).or_insert(0) += 1;
    }

    counts
}

pub fn histogram_table(histogram: &RatingCounts) -> Table {
    let total = histogram.total();

    let mut table = Table::new();
    table.set_titles(row!["rating", "count", "share"]);

    for (score, count) in RATING_SCALE.iter().zip(histogram.counts().iter()) {
        let share = if total == 0 {
            0.0
        } else {
            *count as f64 / total as f64
        };
        table.add_row(row![format!("{:.1}", score), count, format!("{:.3}", share)]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}

fn inspect_wiki(cfg: &Config, preview: usize) -> Result<(), Error> {
    let raw = read_wiki_movies(&cfg.sources.wiki_movies)?;
    let total = raw.len();
    let cleaning = clean_wiki_movies(raw, cfg.transform.null_threshold);

    println!(
        "{} entries, {} movies kept ({} not films, {} without IMDb id, {} duplicates)",
        total,
        cleaning.movies.len(),
        cleaning.not_films,
        cleaning.missing_imdb_id,
        cleaning.duplicates
    );
    println!("{}", null_table(&cleaning));

    for movie in cleaning.movies.iter().take(preview) {
        println!("{}", movie.to_table());
    }

    Ok(())
}

fn inspect_kaggle(cfg: &Config, preview: usize) -> Result<(), Error> {
    let raw = read_kaggle_metadata(&cfg.sources.kaggle_metadata)?;
    let cleaning = clean_kaggle_metadata(&raw.rows);

    println!(
        "{} rows, {} movies kept ({} adult, {} malformed)",
        raw.rows.len(),
        cleaning.movies.len(),
        cleaning.adult,
        raw.skipped
    );

    let rejections = rejection_counts(&cleaning.rejected);
    if rejections.is_empty() {
        println!("No rejected rows");
    } else {
        println!("{}", rejections.to_table());
    }

    for movie in cleaning.movies.iter().take(preview) {
        println!("{}", movie.to_table());
    }

    Ok(())
}

fn inspect_ratings(cfg: &Config) -> Result<(), Error> {
    let (tally, outcome) = pipeline::stream_ratings(cfg, None, |ratings| Ok(ratings.len()))?;

    println!(
        "{} ratings over {} movies ({} rejected, {} off scale)",
        tally.total(),
        tally.movies(),
        outcome.rejected_ratings,
        tally.off_scale()
    );
    println!("{}", histogram_table(&tally.histogram()));

    Ok(())
}

pub fn inspect(cfg: &Config, source: Source, preview: usize) -> Result<(), Error> {
    match source {
        Source::Wiki => inspect_wiki(cfg, preview),
        Source::Kaggle => inspect_kaggle(cfg, preview),
        Source::Ratings => inspect_ratings(cfg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_names() {
        assert_eq!(Source::from_name("wiki"), Some(Source::Wiki));
        assert_eq!(Source::from_name("ratings"), Some(Source::Ratings));
        assert_eq!(Source::from_name("imdb"), None);
    }

    #[test]
    fn rejections_grouped_by_reason() {
        let rejected = vec![
            Rejected {
                key: "xx".into(),
                reason: ErrorKind::InvalidCell {
                    column: "id",
                    reason: "not a number".into(),
                },
            },
            Rejected {
                key: "1997-08-20".into(),
                reason: ErrorKind::InvalidCell {
                    column: "id",
                    reason: "not a number".into(),
                },
            },
            Rejected {
                key: "?".into(),
                reason: ErrorKind::MissingValue("id"),
            },
        ];

        let counts = rejection_counts(&rejected);
        assert_eq!(counts.get("invalid id"), Some(&2));
        assert_eq!(counts.get("missing id"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn null_table_marks_dropped_columns() {
        let mut cleaning = WikiCleaning::default();
        cleaning.null_fractions.insert("Budget".into(), 0.25);
        cleaning.null_fractions.insert("Animation by".into(), 0.95);
        cleaning.dropped_columns.push("Animation by".into());

        let table = null_table(&cleaning);
        assert_eq!(table.len(), 2);

        let first = table.get_row(0).unwrap();
        assert_eq!(first.get_cell(0).unwrap().get_content(), "Animation by");
        assert_eq!(first.get_cell(2).unwrap().get_content(), "x");

        let second = table.get_row(1).unwrap();
        assert_eq!(second.get_cell(2).unwrap().get_content(), "");
    }

    #[test]
    fn histogram_shares() {
        let mut histogram = RatingCounts::default();
        histogram.record(4.0);
        histogram.record(4.0);
        histogram.record(0.5);
        histogram.record(5.0);

        let table = histogram_table(&histogram);
        assert_eq!(table.len(), 10);

        let four = table.get_row(7).unwrap();
        assert_eq!(four.get_cell(0).unwrap().get_content(), "4.0");
        assert_eq!(four.get_cell(1).unwrap().get_content(), "2");
        assert_eq!(four.get_cell(2).unwrap().get_content(), "0.500");
    }
}
