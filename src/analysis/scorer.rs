use serde::Serialize;

use crate::wav::StereoChunk;

/// Scalar quality signal for one transfer: per-channel counts of samples that
/// equal their immediate predecessor. Only meaningful relative to other
/// transfers of the same material with leaders trimmed identically.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Score {
    pub frames: u64,
    pub left: u64,
    pub right: u64,
    pub total: u64,
    pub frac: f64,
}

/// Streaming adjacent-duplicate counter over both channels. Deliberately
/// counts every duplicate, natural ones included; callers compare scores,
/// they don't interpret them absolutely.
#[derive(Debug, Default)]
pub struct DupScorer {
    prev_left: Option<i16>,
    prev_right: Option<i16>,
    left: u64,
    right: u64,
    frames: u64,
}

impl DupScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count duplicates in the next chunk. Each sample is compared against
    /// its true predecessor, which may be the last sample of the previous
    /// chunk; the stream's first sample has no predecessor and never counts.
    pub fn score_chunk(&mut self, chunk: &StereoChunk) {
        for &s in &chunk.left {
            if self.prev_left == Some(s) {
                self.left += 1;
            }
            self.prev_left = Some(s);
        }
        for &s in &chunk.right {
            if self.prev_right == Some(s) {
                self.right += 1;
            }
            self.prev_right = Some(s);
        }
        self.frames += chunk.len() as u64;
    }

    pub fn score(&self) -> Score {
        let total = self.left + self.right;
        let frac = if self.frames == 0 {
            0.0
        } else {
            total as f64 / (2.0 * self.frames as f64)
        };
        Score {
            frames: self.frames,
            left: self.left,
            right: self.right,
            total,
            frac,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(left: &[i16], right: &[i16]) -> StereoChunk {
        StereoChunk {
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }

    #[test]
    fn counts_adjacent_duplicates_per_channel() {
        let mut scorer = DupScorer::new();
        scorer.score_chunk(&chunk(&[5, 5, 5, 2, 2, 9], &[1, 2, 3, 4, 5, 6]));

        let score = scorer.score();
        assert_eq!(score.left, 3);
        assert_eq!(score.right, 0);
        assert_eq!(score.total, 3);
        assert_eq!(score.frames, 6);
        assert!((score.frac - 3.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn first_sample_has_no_predecessor() {
        // a stream starting at 0 must not count an implicit duplicate
        let mut scorer = DupScorer::new();
        scorer.score_chunk(&chunk(&[0, 1], &[0, 0]));

        let score = scorer.score();
        assert_eq!(score.left, 0);
        assert_eq!(score.right, 1);
    }

    #[test]
    fn chunk_boundaries_do_not_change_the_score() {
        let left: Vec<i16> = [5, 5, 5, 2, 2, 9, 9, 9, 9, 1, 1].to_vec();
        let right: Vec<i16> = [3, 4, 4, 4, 4, 4, 7, 8, 8, 2, 3].to_vec();

        let mut whole = DupScorer::new();
        whole.score_chunk(&chunk(&left, &right));
        let expected = whole.score();

        for split in 1..left.len() {
            let mut scorer = DupScorer::new();
            scorer.score_chunk(&chunk(&left[..split], &right[..split]));
            scorer.score_chunk(&chunk(&left[split..], &right[split..]));
            assert_eq!(scorer.score(), expected, "split {split} changed the score");
        }
    }
}
