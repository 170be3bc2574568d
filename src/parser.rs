use crate::error::TrackError;
use crate::segment::Segment;
use crate::timecode;

use anyhow::Context;
use log::debug;
use nom::bytes::complete::{tag, take_while1, take_while_m_n};
use nom::character::complete::{digit1, line_ending, multispace0, multispace1, space0, space1};
use nom::combinator::{map_res, opt, recognize};
use nom::error::{convert_error, ErrorKind, VerboseError};
use nom::multi::many_till;
use nom::sequence::{terminated, tuple};
use nom::{branch::alt, error_position, Err, IResult};
use regex::Regex;

pub struct Parser {
    blank_line: Regex,
    time_range: Regex,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            blank_line: Regex::new(r"\n\s*\n").unwrap(),
            time_range: Regex::new(r"(\d{2}:\d{2}:\d{2},\d{3}) --> (\d{2}:\d{2}:\d{2},\d{3})")
                .unwrap(),
        }
    }

    /// Parses a track leniently, dropping malformed blocks.
    ///
    /// Blocks are separated by blank lines. A block needs an index line, a
    /// time-range line and at least one text line; anything short of that,
    /// or a second line without a recognisable time range, is skipped
    /// without complaint. Subtitle tracks in the wild are rarely pristine,
    /// so this is the default mode. Output order is block order; empty or
    /// fully malformed input gives an empty Vec, which is a valid result.
    pub fn parse(&self, input: &str) -> Vec<Segment> {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        let mut segments = Vec::new();
        for block in self.blank_line.split(input.trim()) {
            let lines: Vec<&str> = block.trim().lines().collect();
            if lines.len() < 3 {
                debug!("dropping block with {} line(s)", lines.len());
                continue;
            }
            let captures = match self.time_range.captures(lines[1]) {
                Some(captures) => captures,
                None => {
                    debug!("dropping block without a time range: {:?}", lines[1]);
                    continue;
                }
            };
            let (start, end) = (&captures[1], &captures[2]);
            segments.push(Segment {
                index: lines[0].trim().parse().ok(),
                start: timecode::parse(start),
                end: timecode::parse(end),
                text: lines[2..].join(" "),
                time_range: format!("{} --> {}", start, end),
            });
        }
        segments
    }

    /// Parses a track strictly, failing on the first malformed block.
    ///
    /// Timestamps must be exactly `HH:MM:SS,mmm` with fixed-width fields.
    /// Unlike `parse`, no block is ever dropped; a track that survives this
    /// is well formed throughout.
    pub fn parse_strict(&self, input: &str) -> Result<Vec<Segment>, anyhow::Error> {
        match track(input) {
            Ok((_, segments)) => Ok(segments),
            Err(Err::Error(err)) | Err(Err::Failure(err)) => {
                let conv = convert_error(input, err);
                Err(TrackError::Parse(conv)).context("Track failed strict validation")
            }
            Err(Err::Incomplete(_)) => {
                unreachable!("Incomplete data received by non-streaming parser.")
            }
        }
    }
}

fn optional_bom(input: &str) -> IResult<&str, Option<&str>, VerboseError<&str>> {
    opt(tag("\u{FEFF}"))(input)
}

fn track(input: &str) -> IResult<&str, Vec<Segment>, VerboseError<&str>> {
    let (input, _) = optional_bom(input)?;
    let (input, segments) = all_segments(input)?;
    let (input, _) = end_of_file(input)?;
    // No sort here: locate queries resolve ties by declaration order, so
    // source order must survive parsing untouched.
    Ok((input, segments))
}

fn all_segments(input: &str) -> IResult<&str, Vec<Segment>, VerboseError<&str>> {
    let mut parsed = Vec::new();
    let mut input = input;
    loop {
        match segment_block(input) {
            Ok((rem_input, segment)) => {
                parsed.push(segment);
                input = rem_input;
                let (rem_input, _) = multispace0(input)?;
                input = rem_input;
            }
            Err(err) => {
                if input.is_empty() {
                    return Ok((input, parsed));
                } else {
                    return Err(err);
                }
            }
        }
    }
}

fn segment_block(input: &str) -> IResult<&str, Segment, VerboseError<&str>> {
    let (input, _) = multispace0(input)?;
    let (input, index) = terminated(declared_index, multispace1)(input)?;
    let (input, (start, end)) = terminated(time_range, line_ending)(input)?;
    let (input, lines) = text_lines(input)?;

    Ok((
        input,
        Segment {
            index: Some(index),
            start: timecode::parse(start),
            end: timecode::parse(end),
            text: lines.join(" "),
            time_range: format!("{} --> {}", start, end),
        },
    ))
}

fn end_of_file(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    if input.is_empty() {
        Ok((input, input))
    } else {
        std::result::Result::Err(Err::Error(error_position!(input, ErrorKind::Eof)))
    }
}

fn text_lines(input: &str) -> IResult<&str, Vec<String>, VerboseError<&str>> {
    let line = terminated(
        take_while1(|c: char| c != '\n' && c != '\r'),
        alt((line_ending, end_of_file)),
    );

    let (rest, (lines, _)) = many_till(line, alt((line_ending, end_of_file)))(input)?;
    if lines.is_empty() {
        return Err(Err::Error(error_position!(input, ErrorKind::Many1)));
    }

    Ok((rest, lines.into_iter().map(String::from).collect()))
}

fn time_range(input: &str) -> IResult<&str, (&str, &str), VerboseError<&str>> {
    let (input, start) = timestamp(input)?;
    let (input, _) = space1(input)?;
    let (input, _) = tag("-->")(input)?;
    let (input, _) = space1(input)?;
    let (input, end) = timestamp(input)?;
    let (input, _) = space0(input)?;

    Ok((input, (start, end)))
}

fn timestamp(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    let two_digits = || take_while_m_n(2, 2, |c: char| c.is_ascii_digit());
    recognize(tuple((
        two_digits(),
        tag(":"),
        two_digits(),
        tag(":"),
        two_digits(),
        tag(","),
        take_while_m_n(3, 3, |c: char| c.is_ascii_digit()),
    )))(input)
}

fn declared_index(input: &str) -> IResult<&str, u32, VerboseError<&str>> {
    map_res(digit1, |s: &str| s.parse())(input)
}
