// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::find_first;
use chrono::NaiveDate;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{anychar, char, one_of},
    combinator::{map_res, recognize, verify},
    error::ErrorKind,
    sequence::{pair, tuple},
    IResult,
};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

type Ymd = (i32, u32, u32);

fn month(input: &str) -> IResult<&str, u32> {
    for (idx, name) in MONTHS.iter().enumerate() {
        let parsed: IResult<&str, &str> = tag(*name)(input);
        if let Ok((rest, _)) = parsed {
            return Ok((rest, idx as u32 + 1));
        }
    }

    Err(nom::Err::Error((input, ErrorKind::Tag)))
}

fn one_digit(input: &str) -> IResult<&str, &str> {
    take_while_m_n(1, 1, |c: char| c.is_ascii_digit())(input)
}

fn single_space(input: &str) -> IResult<&str, char> {
    verify(anychar, |c: &char| c.is_whitespace())(input)
}

fn year(input: &str) -> IResult<&str, i32> {
    map_res(take_while_m_n(4, 4, |c: char| c.is_ascii_digit()), |y: &str| {
        y.parse::<i32>()
    })(input)
}

fn day_of_month(input: &str) -> IResult<&str, u32> {
    map_res(
        alt((recognize(pair(one_of("123"), one_digit)), one_digit)),
        |d: &str| d.parse::<u32>(),
    )(input)
}

/// `July 18, 2008`
fn month_day_year(input: &str) -> IResult<&str, Ymd> {
    let (input, (month, _, day, _, _, year)) =
        tuple((month, single_space, day_of_month, char(','), single_space, year))(input)?;
    Ok((input, (year, month, day)))
}

/// Two digits, the first one taken from `first`
fn two_digits<'a>(first: &'static str) -> impl Fn(&'a str) -> IResult<&'a str, u32> {
    map_res(recognize(pair(one_of(first), one_digit)), |n: &str| {
        n.parse::<u32>()
    })
}

/// `2008-07-18`, any single character separates the parts
fn numeric(input: &str) -> IResult<&str, Ymd> {
    let (input, (year, _, month, _, day)) =
        tuple((year, anychar, two_digits("01"), anychar, two_digits("0123")))(input)?;
    Ok((input, (year, month, day)))
}

/// `July 2008`
fn month_year(input: &str) -> IResult<&str, Ymd> {
    let (input, (month, _, year)) = tuple((month, single_space, year))(input)?;
    Ok((input, (year, month, 1)))
}

fn year_only(input: &str) -> IResult<&str, Ymd> {
    let (input, year) = year(input)?;
    Ok((input, (year, 1, 1)))
}

fn release_date(input: &str) -> IResult<&str, Ymd> {
    alt((month_day_year, numeric, month_year, year_only))(input)
}

/// First date mentioned in a release text, calendar-invalid dates give None
pub fn parse_release_date(text: &str) -> Option<NaiveDate> {
    let (year, month, day) = find_first(text, release_date)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn full_dates() {
        assert_eq!(parse_release_date("July 18, 2008 (Australia)"), date(2008, 7, 18));
        assert_eq!(parse_release_date("March 1, 1990"), date(1990, 3, 1));
        assert_eq!(parse_release_date("December 25, 1990"), date(1990, 12, 25));
    }

    #[test]
    fn numeric_dates() {
        assert_eq!(parse_release_date("1990-07-13"), date(1990, 7, 13));
        assert_eq!(parse_release_date("released 1999/12/31"), date(1999, 12, 31));
    }

    #[test]
    fn month_and_year() {
        assert_eq!(parse_release_date("June 1991"), date(1991, 6, 1));
        // The day is in front of the month, only month and year are recognized
        assert_eq!(parse_release_date("5 January 1999 (UK)"), date(1999, 1, 1));
    }

    #[test]
    fn year_alone() {
        assert_eq!(parse_release_date("Released in 1987"), date(1987, 1, 1));
    }

    #[test]
    fn earliest_mention_wins() {
        assert_eq!(
            parse_release_date("July 11, 1990 (New York) July 13, 1990 (United States)"),
            date(1990, 7, 11)
        );
    }

    #[test]
    fn invalid_or_missing() {
        assert_eq!(parse_release_date("February 30, 2001"), None);
        assert_eq!(parse_release_date("TBA"), None);
    }
}
