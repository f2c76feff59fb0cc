use crate::shared::CHUNK;
use crate::wav::{FrameSource, StereoChunk};

/// Count the all-zero frames at the head of a transfer. Computed once per
/// input in its own read pass; every downstream consumer skips this many
/// frames so that transfers line up regardless of how much dead tape each
/// capture recorded.
pub fn leader_length(source: &mut FrameSource) -> u64 {
    let mut lead = 0u64;
    loop {
        let chunk = source.read_chunk(CHUNK);
        if chunk.is_empty() {
            // all-silence file: the whole thing is leader
            return lead;
        }
        let (zeros, hit_sound) = leading_zero_frames(&chunk);
        lead += zeros;
        if hit_sound {
            return lead;
        }
    }
}

// Zero frames at the head of one chunk, plus whether a non-zero frame ended
// the scan inside this chunk.
fn leading_zero_frames(chunk: &StereoChunk) -> (u64, bool) {
    let mut zeros = 0u64;
    for (left, right) in chunk.frames() {
        if left != 0 || right != 0 {
            return (zeros, true);
        }
        zeros += 1;
    }
    (zeros, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_the_first_nonzero_frame() {
        let mut chunk = StereoChunk::default();
        chunk.push(0, 0);
        chunk.push(0, 0);
        chunk.push(0, 3); // one channel is enough to end the leader
        chunk.push(0, 0);

        assert_eq!(leading_zero_frames(&chunk), (2, true));
    }

    #[test]
    fn all_zero_chunk_keeps_scanning() {
        let mut chunk = StereoChunk::default();
        chunk.push(0, 0);
        chunk.push(0, 0);

        assert_eq!(leading_zero_frames(&chunk), (2, false));
    }
}
