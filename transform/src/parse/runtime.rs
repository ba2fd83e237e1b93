// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::{find_first, whitespace};
use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1},
    combinator::{map_res, opt},
    sequence::tuple,
    IResult,
};

fn count(input: &str) -> IResult<&str, f64> {
    map_res(digit1, |n: &str| n.parse::<f64>())(input)
}

/// `1 hr 42`, `2 hours`, `1h 30m`
fn hours_minutes(input: &str) -> IResult<&str, f64> {
    let (input, hours) = count(input)?;
    let (input, _) = whitespace(input)?;
    let (input, _) = tuple((
        char('h'),
        opt(char('o')),
        opt(char('u')),
        opt(char('r')),
        opt(char('s')),
    ))(input)?;
    let (input, _) = whitespace(input)?;
    let (input, minutes) = digit0(input)?;

    let minutes = minutes.parse::<f64>().unwrap_or(0.0);
    Ok((input, hours * 60.0 + minutes))
}

/// `102 minutes`, `102 min`, `102m`
fn minutes_only(input: &str) -> IResult<&str, f64> {
    let (input, minutes) = count(input)?;
    let (input, _) = whitespace(input)?;
    let (input, _) = char('m')(input)?;
    Ok((input, minutes))
}

/// Running time in minutes
pub fn parse_runtime(text: &str) -> Option<f64> {
    find_first(text, |input| alt((hours_minutes, minutes_only))(input))
}
