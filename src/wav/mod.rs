use std::path::PathBuf;

use thiserror::Error;

mod chunk;
mod sink;
mod source;

pub use chunk::StereoChunk;
pub use sink::FrameSink;
pub use source::{FrameSource, StreamInfo};

/// Fatal WAV I/O errors. Truncated payloads are not in here: a short read is
/// treated as end-of-stream so every pass still runs its final flush.
#[derive(Debug, Error)]
pub enum WavError {
    #[error("{path}: cannot open input: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("{path}: unsupported sample format (16-bit integer PCM required)")]
    UnsupportedSampleFormat { path: PathBuf },

    #[error("{path}: unsupported channel layout ({channels} channels, stereo required)")]
    UnsupportedChannelLayout { path: PathBuf, channels: u16 },

    #[error("{path}: output write failed: {source}")]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
}
