use crate::segment::Segment;
use crate::timecode;

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};

/// Writes a track back out as normalised SRT.
///
/// Sequence numbers are regenerated from 1 regardless of what the source
/// declared. Finite bounds are reformatted; a segment carrying NaN bounds
/// keeps its original time-range line, since the parse retained it for
/// display and reformatting would invent `00:00:00,000` values.
pub fn serialise<W: Write>(segments: &[Segment], output: W) -> Result<()> {
    let mut writer = BufWriter::new(output);
    write_segments(&mut writer, segments).context("Failed to write track")?;
    writer.flush().context("Failed to write track")?;
    Ok(())
}

fn write_segments<W: Write>(buf: &mut W, segments: &[Segment]) -> Result<()> {
    for (position, segment) in segments.iter().enumerate() {
        write_segment(buf, position + 1, segment)?;
    }
    Ok(())
}

fn write_segment<W: Write>(buf: &mut W, number: usize, segment: &Segment) -> Result<()> {
    writeln!(buf, "{}", number)?;
    if segment.start.is_finite() && segment.end.is_finite() {
        writeln!(
            buf,
            "{} --> {}",
            timecode::format(segment.start),
            timecode::format(segment.end)
        )?;
    } else {
        writeln!(buf, "{}", segment.time_range)?;
    }
    writeln!(buf, "{}", segment.text)?;
    writeln!(buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use std::io::Cursor;

    fn render(segments: &[Segment]) -> String {
        let mut buf = Cursor::new(vec![]);
        serialise(segments, &mut buf).expect("Failed to write to buffer");
        String::from_utf8(buf.into_inner()).unwrap()
    }

    #[test]
    fn renders_a_segment_with_formatted_bounds() {
        let segments = vec![Segment {
            index: Some(7),
            start: 2.5,
            end: 5.0,
            text: "Hello world".to_string(),
            time_range: "00:00:02,500 --> 00:00:05,000".to_string(),
        }];

        assert_eq!(
            render(&segments),
            "1\n00:00:02,500 --> 00:00:05,000\nHello world\n\n"
        );
    }

    #[test]
    fn renumbers_from_one() {
        let input = "\
5
00:00:00,000 --> 00:00:01,000
First

9
00:00:01,000 --> 00:00:02,000
Second
";
        let segments = Parser::new().parse(input);
        let out = render(&segments);

        assert!(out.starts_with("1\n"));
        assert!(out.contains("\n2\n00:00:01,000"));
    }

    #[test]
    fn keeps_raw_range_for_nan_bounds() {
        let segments = vec![Segment {
            index: None,
            start: f64::NAN,
            end: f64::NAN,
            text: "still here".to_string(),
            time_range: "xx:00:00,000 --> 00:00:05,000".to_string(),
        }];

        assert_eq!(
            render(&segments),
            "1\nxx:00:00,000 --> 00:00:05,000\nstill here\n\n"
        );
    }

    #[test]
    fn parse_then_serialise_is_stable_for_a_clean_track() {
        let input = "\
1
00:00:00,000 --> 00:00:02,500
Hello world

2
00:00:02,500 --> 00:00:05,000
Second line

";
        let segments = Parser::new().parse(input);

        assert_eq!(render(&segments), input);
    }
}
