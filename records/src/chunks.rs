// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use serde::de::DeserializeOwned;
use std::io::Read;

/// Lazily read a CSV in chunks of `chunk_size` deserialized rows.
///
/// Rows that can't be deserialized are skipped and counted, an IO error is
/// yielded once and ends the iteration.
pub struct LazyChunks<R, T> {
    pub(crate) rows: csv::DeserializeRecordsIntoIter<R, T>,
    pub(crate) chunk_size: usize,
    pub(crate) skipped: usize,
    pub(crate) done: bool,
}

impl<R: Read, T: DeserializeOwned> LazyChunks<R, T> {
    pub fn new(reader: csv::Reader<R>, chunk_size: usize) -> Self {
        Self {
            rows: reader.into_deserialize(),
            chunk_size: chunk_size.max(1),
            skipped: 0,
            done: false,
        }
    }

    /// Rows skipped so far because they were malformed
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: Read, T: DeserializeOwned> Iterator for LazyChunks<R, T> {
    type Item = Result<Vec<T>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = Vec::with_capacity(self.chunk_size.min(65_536));
        while chunk.len() < self.chunk_size {
            match self.rows.next() {
                Some(Ok(row)) => chunk.push(row),
                Some(Err(e)) => {
                    if let csv::ErrorKind::Io(_) = e.kind() {
                        self.done = true;
                        return Some(Err(e.into()));
                    }

                    log::debug!("Skipping malformed row: {}", e);
                    self.skipped += 1;
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}
