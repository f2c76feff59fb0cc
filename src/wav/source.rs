use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{StereoChunk, WavError};
use crate::shared::CHUNK;

/// Header facts about one input stream.
#[derive(Clone, Copy, Debug)]
pub struct StreamInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub frames: u64,
}

/// Read side of one transfer: a hound reader plus the header facts, handing
/// out channel-separated chunks. Opened read-only for the lifetime of one
/// pass; the repair engines never see hound directly.
pub struct FrameSource {
    path: PathBuf,
    reader: hound::WavReader<BufReader<File>>,
    info: StreamInfo,
}

impl FrameSource {
    pub fn open(path: &Path) -> Result<Self, WavError> {
        let reader = hound::WavReader::open(path).map_err(|source| WavError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let spec = reader.spec();
        if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(WavError::UnsupportedSampleFormat {
                path: path.to_path_buf(),
            });
        }
        if spec.channels != 2 {
            return Err(WavError::UnsupportedChannelLayout {
                path: path.to_path_buf(),
                channels: spec.channels,
            });
        }

        let info = StreamInfo {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            frames: u64::from(reader.duration()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            info,
        })
    }

    pub fn info(&self) -> StreamInfo {
        self.info
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read up to `max_frames` frames. Returns fewer only at end of stream;
    /// a truncated payload is reported as a short read, never an error.
    pub fn read_chunk(&mut self, max_frames: usize) -> StereoChunk {
        let mut chunk = StereoChunk::with_capacity(max_frames);
        let mut samples = self.reader.samples::<i16>();

        for _ in 0..max_frames {
            let left = match samples.next() {
                Some(Ok(s)) => s,
                Some(Err(e)) => {
                    warn!(file = %self.path.display(), error = %e, "truncated stream, stopping early");
                    break;
                }
                None => break,
            };
            let right = match samples.next() {
                Some(Ok(s)) => s,
                Some(Err(e)) => {
                    warn!(file = %self.path.display(), error = %e, "truncated stream, stopping early");
                    break;
                }
                None => {
                    warn!(file = %self.path.display(), "stream ends mid-frame, dropping odd sample");
                    break;
                }
            };
            chunk.push(left, right);
        }

        chunk
    }

    /// Read and discard `frames` frames (used to jump past the leader).
    pub fn skip(&mut self, frames: u64) {
        let mut remaining = frames;
        while remaining > 0 {
            let take = CHUNK.min(remaining as usize);
            let chunk = self.read_chunk(take);
            if chunk.is_empty() {
                break;
            }
            remaining -= chunk.len() as u64;
        }
    }
}
