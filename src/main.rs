mod error;
mod locator;
mod mapping;
mod parser;
mod segment;
mod serialiser;
mod timecode;

use crate::parser::Parser;
use crate::segment::Segment;

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use log::warn;

fn main() {
    env_logger::init();
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Parse, inspect and rewrite SRT transcript tracks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a track and write it back out normalised.
    Clean {
        #[arg(
            short,
            long,
            value_name = "FILE",
            help = "The file to read from. If not supplied, the track will be read from standard input.",
            default_value = "-"
        )]
        input: String,
        #[arg(
            short,
            long,
            value_name = "FILE",
            help = "The file to write to. If not supplied, the track will be written to standard output.",
            default_value = "-"
        )]
        output: String,
        #[arg(long, help = "Fail on malformed blocks instead of dropping them.")]
        strict: bool,
    },
    /// Show the segment active at a playback position.
    Locate {
        #[arg(short, long, value_name = "FILE", default_value = "-")]
        input: String,
        #[arg(long, value_name = "SECONDS", help = "Playback position in seconds.")]
        at: f64,
        #[arg(long, help = "Fail on malformed blocks instead of dropping them.")]
        strict: bool,
    },
    /// Follow playback positions read from stdin, printing highlight changes.
    Follow {
        #[arg(value_name = "FILE")]
        file: String,
        #[arg(long, help = "Fail on malformed blocks instead of dropping them.")]
        strict: bool,
    },
    /// List the sermons in a collection mapping file.
    Collection {
        #[arg(value_name = "FILE")]
        file: String,
        #[arg(
            long,
            value_name = "SECONDS",
            help = "Audio duration; also prints progress-marker positions for timecoded items."
        )]
        duration: Option<f64>,
    },
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Clean {
            input,
            output,
            strict,
        } => clean(&input, &output, strict),
        Command::Locate { input, at, strict } => locate(&input, at, strict),
        Command::Follow { file, strict } => follow(&file, strict),
        Command::Collection { file, duration } => collection(&file, duration),
    }
}

fn read_track(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).context(format!("Failed to open input file: '{}'", input))
    }
}

fn parse_track(data: &str, strict: bool) -> Result<Vec<Segment>> {
    let parser = Parser::new();
    if strict {
        parser.parse_strict(data)
    } else {
        Ok(parser.parse(data))
    }
}

fn clean(input: &str, output: &str, strict: bool) -> Result<()> {
    let data = read_track(input)?;
    let segments = parse_track(&data, strict)?;
    if segments.is_empty() {
        warn!("no segments parsed; writing an empty track");
    }

    if output == "-" {
        serialiser::serialise(&segments, io::stdout())
    } else {
        let dst = std::fs::File::create(output)
            .context(format!("Failed to create output file: '{}'", output))?;
        serialiser::serialise(&segments, dst)
    }
}

fn locate(input: &str, at: f64, strict: bool) -> Result<()> {
    let data = read_track(input)?;
    let segments = parse_track(&data, strict)?;

    match locator::find_active(&segments, at) {
        Some(segment) => {
            let declared = segment
                .index
                .map(|i| i.to_string())
                .unwrap_or_else(|| "?".to_string());
            println!(
                "{} #{} [{}] {}",
                timecode::format_compact(at),
                declared,
                segment.time_range,
                segment.text
            );
        }
        None => println!("{} (no active segment)", timecode::format_compact(at)),
    }
    Ok(())
}

fn follow(file: &str, strict: bool) -> Result<()> {
    let data = std::fs::read_to_string(file)
        .context(format!("Failed to open input file: '{}'", file))?;
    let segments = parse_track(&data, strict)?;
    let mut highlighter = locator::Highlighter::new();

    for line in io::stdin().lines() {
        let line = line.context("Failed to read from stdin")?;
        let position: f64 = match line.trim().parse() {
            Ok(position) => position,
            Err(_) => {
                warn!("ignoring unparseable position: {:?}", line);
                continue;
            }
        };
        if let Some(segment) = highlighter.update(&segments, position) {
            println!(
                "{} [{}] {}",
                timecode::format_compact(position),
                segment.time_range,
                segment.text
            );
        }
    }
    Ok(())
}

fn collection(file: &str, duration: Option<f64>) -> Result<()> {
    let collection = mapping::Collection::load(file)?;

    for sermon in &collection.transcripts {
        println!("{} ({})", sermon.title, sermon.file);
        if !sermon.summary.is_empty() {
            println!("  {}", sermon.summary);
        }
        if !sermon.themes.is_empty() {
            println!("  themes: {}", sermon.themes.join(", "));
        }
        for item in sermon.bible_verses.iter().chain(sermon.hymns_songs.iter()) {
            println!(
                "  {}  {}",
                timecode::format_compact(item.start_seconds()),
                item.text()
            );
        }
        if let Some(duration) = duration {
            for marker in sermon.markers(duration) {
                println!("  {:5.1}%  {}", marker.percent, marker.text);
            }
        }
        println!();
    }
    Ok(())
}
