// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::{find_first, whitespace};
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map_res, opt, recognize},
    error::ErrorKind,
    sequence::{preceded, tuple},
    IResult,
};

const DASHES: [char; 3] = ['-', '–', '—'];

/// `million` or `billion`, the `millon` typo is common enough to accept
fn scale(input: &str) -> IResult<&str, f64> {
    let (input, unit) = one_of("mMbB")(input)?;
    let (input, _) = tag_no_case("ill")(input)?;
    let (input, _) = opt(one_of("iI"))(input)?;
    let (input, _) = tag_no_case("on")(input)?;

    let factor = match unit {
        'm' | 'M' => 1e6,
        _ => 1e9,
    };

    Ok((input, factor))
}

/// `$ 12.5 million`
fn scaled_amount(input: &str) -> IResult<&str, f64> {
    let (input, _) = char('$')(input)?;
    let (input, _) = whitespace(input)?;
    let (input, amount) = map_res(
        recognize(tuple((digit1, opt(char('.')), digit0))),
        |n: &str| n.parse::<f64>(),
    )(input)?;
    let (input, _) = whitespace(input)?;
    let (input, factor) = scale(input)?;

    Ok((input, amount * factor))
}

fn thousands_group(input: &str) -> IResult<&str, &str> {
    preceded(one_of(",."), take_while_m_n(3, 3, |c: char| c.is_ascii_digit()))(input)
}

fn scale_follows(input: &str) -> bool {
    let mut chars = input.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => {}
        _ => return false,
    }

    let word: IResult<&str, &str> =
        alt((tag_no_case("million"), tag_no_case("billion")))(chars.as_str());
    word.is_ok()
}

/// `$123,456,789`, also with dots as separators
fn separated_amount(input: &str) -> IResult<&str, f64> {
    let (rest, _) = char('$')(input)?;
    let (rest, _) = whitespace(rest)?;
    let (mut rest, lead) = take_while_m_n(1, 3, |c: char| c.is_ascii_digit())(rest)?;

    let mut digits = lead.to_owned();
    let mut groupings = Vec::new();
    while let Ok((next, group)) = thousands_group(rest) {
        digits.push_str(group);
        rest = next;
        groupings.push((rest, digits.clone()));
    }

    // A scale word right after belongs to the other form, give back groups
    // until it doesn't follow anymore
    for (rest, digits) in groupings.into_iter().rev() {
        if scale_follows(rest) {
            continue;
        }

        if let Ok(amount) = digits.parse::<f64>() {
            return Ok((rest, amount));
        }
    }

    Err(nom::Err::Error((input, ErrorKind::Many1)))
}

fn amount(input: &str) -> IResult<&str, f64> {
    alt((scaled_amount, separated_amount))(input)
}

/// Ranges like `$1.5–2 million` keep only their upper bound
fn collapse_range(text: &str) -> String {
    let dollar = match text.find('$') {
        Some(idx) => idx,
        None => return text.to_owned(),
    };

    let tail = &text[dollar..];
    let dash_end = tail
        .char_indices()
        .filter(|&(idx, c)| {
            DASHES.contains(&c)
                && !tail[idx + c.len_utf8()..].starts_with(|n: char| n.is_ascii_lowercase())
        })
        .map(|(idx, c)| idx + c.len_utf8())
        .last();

    match dash_end {
        Some(end) => format!("{}${}", &text[..dollar], &tail[end..]),
        None => text.to_owned(),
    }
}

fn citation(input: &str) -> IResult<&str, &str> {
    recognize(tuple((char('['), digit1, char(']'), whitespace)))(input)
}

/// Drop `[12]` style reference marks
pub fn strip_citations(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match citation(rest) {
            Ok((next, _)) => rest = next,
            Err(_) => {
                stripped.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    stripped
}

/// First dollar amount mentioned in a box office text
pub fn parse_dollars(text: &str) -> Option<f64> {
    let text = collapse_range(text);
    find_first(&text, amount)
}

/// Same as [`parse_dollars`] but budgets also carry citation marks
pub fn parse_budget(text: &str) -> Option<f64> {
    parse_dollars(&strip_citations(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn dollars(text: &str) -> f64 {
        parse_dollars(text).unwrap()
    }

    #[test]
    fn scaled_amounts() {
        assert_approx_eq!(dollars("$4.5 million"), 4.5e6);
        assert_approx_eq!(dollars("$1.2 Billion"), 1.2e9);
        assert_approx_eq!(dollars("US$ 12\u{a0}million"), 12e6);
        assert_approx_eq!(dollars("$10 millon"), 10e6);
        assert_approx_eq!(dollars("$7.million"), 7e6);
    }

    #[test]
    fn separated_amounts() {
        assert_approx_eq!(dollars("$123,456,789"), 123_456_789.);
        assert_approx_eq!(dollars("$ 1.234.567 (worldwide)"), 1_234_567.);
    }

    #[test]
    fn scale_word_takes_back_groups() {
        // Same outcome as a backtracking regex with a negative lookahead
        assert_approx_eq!(dollars("$1,234,567 million"), 1234.);
        assert_eq!(parse_dollars("$1,234 million"), None);
    }

    #[test]
    fn ranges_keep_upper_bound() {
        assert_approx_eq!(dollars("$5–7 million"), 7e6);
        assert_approx_eq!(dollars("$1.5-2 million"), 2e6);
        assert_approx_eq!(dollars("$20—$25 million"), 25e6);
    }

    #[test]
    fn dash_before_words_is_not_a_range() {
        assert_approx_eq!(dollars("$10 million-plus"), 10e6);
    }

    #[test]
    fn first_amount_wins() {
        assert_approx_eq!(dollars("Over $300 million (US) $500 million (world)"), 300e6);
    }

    #[test]
    fn no_amount() {
        assert_eq!(parse_dollars("approx. 30 million"), None);
        assert_eq!(parse_dollars("£5 million"), None);
        assert_eq!(parse_dollars(""), None);
    }

    #[test]
    fn budgets_without_citations() {
        assert_approx_eq!(parse_budget("$30 million[1]").unwrap(), 30e6);
        assert_approx_eq!(parse_budget("[2] $5,000,000").unwrap(), 5e6);
        assert_eq!(strip_citations("$30[1] [22]  million"), "$30million");
    }
}
