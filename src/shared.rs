use std::fmt;

use serde::Serialize;

// Frames per read. Chunk size is invisible to the algorithms; this one just
// benchmarked fastest on typical DAT transfer lengths.
pub const CHUNK: usize = 4096;

// Runs of more duplicates than this are treated as dropouts unless overridden.
pub const DEFAULT_THRESH: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Channel {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Left => write!(f, "L"),
            Channel::Right => write!(f, "R"),
        }
    }
}

/// A sample position rendered for reports; never used for comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Timestamp {
    pub sample: u64,
    pub rate: u32,
}

impl Timestamp {
    pub fn new(sample: u64, rate: u32) -> Self {
        Self { sample, rate }
    }
}

impl fmt::Display for Timestamp {
    // 000132300 000m03s+00000samp
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // a malformed header can declare a zero rate; never panic in a report
        let rate = u64::from(self.rate).max(1);
        let seconds = self.sample / rate;
        let offset = self.sample % rate;
        write!(
            f,
            "{:09} {:03}m{:02}s+{:05}samp",
            self.sample,
            seconds / 60,
            seconds % 60,
            offset
        )
    }
}
