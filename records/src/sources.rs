// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::chunks::LazyChunks;
use crate::error::ErrorKind;
use crate::raw::{RawKaggleMovie, RawRating, RawWikiMovie};
use anyhow::{Context, Error};
use serde_json::Value as Json;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read the Wikipedia export, a JSON array of infobox objects
pub fn read_wiki_movies(path: impl AsRef<Path>) -> Result<Vec<RawWikiMovie>, Error> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Couldn't open {}", path.display()))?;
    let reader = BufReader::new(file);

    let parsed: Json = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let entries = match parsed {
        Json::Array(entries) => entries,
        _ => return Err(ErrorKind::NotAnArray.into()),
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| match entry {
            Json::Object(fields) => Ok(RawWikiMovie::new(fields)),
            _ => Err(ErrorKind::NotAnObject(idx).into()),
        })
        .collect()
}

/// Rows read from the metadata file plus the number of malformed ones
#[derive(Debug, Clone, Default)]
pub struct KaggleRows {
    pub rows: Vec<RawKaggleMovie>,
    pub skipped: usize,
}

pub fn read_kaggle_metadata(path: impl AsRef<Path>) -> Result<KaggleRows, Error> {
    let path = path.as_ref();
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_path(path)
        .with_context(|| format!("Couldn't open {}", path.display()))?;

    let headers = csv.headers()?.clone();
    for column in &["adult", "id", "imdb_id", "budget"] {
        if !headers.iter().any(|h| h == *column) {
            return Err(ErrorKind::MissingColumn(*column).into());
        }
    }

    let mut kaggle = KaggleRows::default();
    for record in csv.deserialize::<RawKaggleMovie>() {
        match record {
            Ok(record) => kaggle.rows.push(record),
            Err(e) => {
                if let csv::ErrorKind::Io(_) = e.kind() {
                    return Err(e.into());
                }

                log::debug!("Skipping malformed metadata row: {}", e);
                kaggle.skipped += 1;
            }
        }
    }

    Ok(kaggle)
}

pub type RatingChunks = LazyChunks<File, RawRating>;

/// Stream `ratings.csv` by chunks, it's usually too big to hold at once
pub fn rating_chunks(path: impl AsRef<Path>, chunk_size: usize) -> Result<RatingChunks, Error> {
    let path = path.as_ref();
    let csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_path(path)
        .with_context(|| format!("Couldn't open {}", path.display()))?;

    Ok(LazyChunks::new(csv, chunk_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture(contents: &str) -> Result<NamedTempFile, Error> {
        let mut file = NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn reads_wiki_objects() -> Result<(), Error> {
        let file = fixture(
            r#"[
                {"title": "Ghost", "imdb_link": "https://www.imdb.com/title/tt0099653/"},
                {"title": "Tremors", "Directed by": "Ron Underwood"}
            ]"#,
        )?;

        let movies = read_wiki_movies(file.path())?;
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].text("Directed by", " ").as_deref(), Some("Ron Underwood"));

        Ok(())
    }

    #[test]
    fn wiki_entries_must_be_objects() -> Result<(), Error> {
        let file = fixture(r#"[{"title": "Ghost"}, "oops"]"#)?;
        assert!(read_wiki_movies(file.path()).is_err());

        let file = fixture(r#"{"title": "Ghost"}"#)?;
        assert!(read_wiki_movies(file.path()).is_err());

        Ok(())
    }

    #[test]
    fn malformed_metadata_rows_are_skipped() -> Result<(), Error> {
        let file = fixture(
            "adult,budget,id,imdb_id,title,video\n\
             False,30000000,862,tt0114709,Toy Story,False\n\
             False,oops\n\
             False,65000000,8844,tt0113497,Jumanji,False\n",
        )?;

        let kaggle = read_kaggle_metadata(file.path())?;
        assert_eq!(kaggle.rows.len(), 2);
        assert_eq!(kaggle.skipped, 1);
        assert_eq!(kaggle.rows[1].title, "Jumanji");
        // Columns absent from the file default to empty cells
        assert_eq!(kaggle.rows[0].revenue, "");

        Ok(())
    }

    #[test]
    fn metadata_requires_key_columns() -> Result<(), Error> {
        let file = fixture("title,video\nToy Story,False\n")?;
        assert!(read_kaggle_metadata(file.path()).is_err());

        Ok(())
    }

    #[test]
    fn ratings_come_in_chunks() -> Result<(), Error> {
        let file = fixture(
            "userId,movieId,rating,timestamp\n\
             1,110,1.0,1425941529\n\
             1,147,4.5,1425942435\n\
             1,858,five,1425941523\n\
             1,1221,5.0,1425941546\n\
             2,1246,5.0,1425941556\n",
        )?;

        let mut chunks = rating_chunks(file.path(), 2)?;
        let sizes: Vec<usize> = chunks
            .by_ref()
            .map(|chunk| chunk.map(|c| c.len()))
            .collect::<Result<_, _>>()?;

        assert_eq!(sizes, vec![2, 2]);
        assert_eq!(chunks.skipped(), 1);

        Ok(())
    }
}
