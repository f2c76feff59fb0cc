use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::WavError;

/// Write side of a repair pass: interleaved stereo 16-bit PCM out. Any write
/// failure is fatal and leaves the partial file non-authoritative.
pub struct FrameSink {
    path: PathBuf,
    writer: hound::WavWriter<BufWriter<File>>,
}

impl FrameSink {
    pub fn create(path: &Path, sample_rate: u32) -> Result<Self, WavError> {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let writer = hound::WavWriter::create(path, spec).map_err(|source| {
            WavError::OutputWriteFailure {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn write_frames(&mut self, frames: &[(i16, i16)]) -> Result<(), WavError> {
        for &(left, right) in frames {
            self.write_sample(left)?;
            self.write_sample(right)?;
        }
        Ok(())
    }

    fn write_sample(&mut self, sample: i16) -> Result<(), WavError> {
        self.writer
            .write_sample(sample)
            .map_err(|source| WavError::OutputWriteFailure {
                path: self.path.clone(),
                source,
            })
    }

    /// Patch up the header lengths; must be called for the output to be valid.
    pub fn finalize(self) -> Result<(), WavError> {
        let path = self.path;
        self.writer
            .finalize()
            .map_err(|source| WavError::OutputWriteFailure { path, source })
    }
}
