use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum TrackError {
    Parse(String),
}

impl Error for TrackError {}

impl fmt::Display for TrackError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackError::Parse(msg) => write!(fmt, "{}", msg),
        }
    }
}
