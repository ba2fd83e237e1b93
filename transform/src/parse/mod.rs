// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! Parsers for the free-form text found in Wikipedia infoboxes.
//!
//! Infobox values are prose, so every parser here *searches*: it is tried at
//! every character boundary from the left and the first match wins.

pub mod dates;
pub mod money;
pub mod runtime;

use nom::{
    bytes::complete::{tag, take_while},
    character::complete::digit1,
    combinator::{recognize, verify},
    sequence::pair,
    IResult,
};

pub use dates::parse_release_date;
pub use money::{parse_budget, parse_dollars};
pub use runtime::parse_runtime;

/// Try `parser` at every char boundary, first success wins
pub(crate) fn find_first<'a, O, F>(input: &'a str, parser: F) -> Option<O>
where
    F: Fn(&'a str) -> IResult<&'a str, O>,
{
    input
        .char_indices()
        .find_map(|(idx, _)| parser(&input[idx..]).ok().map(|(_, out)| out))
}

pub(crate) fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn imdb_id(input: &str) -> IResult<&str, &str> {
    verify(recognize(pair(tag("tt"), digit1)), |id: &str| id.len() >= 9)(input)
}

/// Extract the `tt0000000` identifier out of an IMDb link
pub fn parse_imdb_id(link: &str) -> Option<String> {
    find_first(link, imdb_id).map(str::to_owned)
}
