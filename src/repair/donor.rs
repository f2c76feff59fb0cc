use std::collections::VecDeque;

use crate::wav::StereoChunk;

// Repair state for one channel: the run currently being accumulated, plus
// samples already decided and waiting for the other channel to catch up.
// Invariant: pending_master and pending_donor always have equal length, one
// donor sample accumulated per master sample.
#[derive(Debug, Default)]
struct ChannelRepair {
    prev: i16,
    pending_master: Vec<i16>,
    pending_donor: Vec<i16>,
    out: VecDeque<i16>,
}

impl ChannelRepair {
    fn push(&mut self, master: i16, donor: i16, thresh: usize) {
        if master == self.prev {
            // still inside a run; no output decision yet
            self.pending_master.push(master);
            self.pending_donor.push(donor);
            return;
        }

        // the value changed, so the run that just ended gets resolved whole
        let run = self.pending_master.len();
        if run > thresh {
            // confirmed dropout. The donor is trusted unconditionally for the
            // span: whatever it holds, it can't be worse than a held value,
            // and scanning the donor for its own dropouts buys little here.
            self.out.extend(self.pending_donor.iter().copied());
        } else if run > 0 {
            // short duplicate run, nothing abnormal
            self.out.extend(self.pending_master.iter().copied());
        }

        // the differing sample seeds the next run
        self.pending_master.clear();
        self.pending_donor.clear();
        self.pending_master.push(master);
        self.pending_donor.push(donor);
        self.prev = master;
    }
}

/// Two-source dropout repair: the master is authoritative, the donor only
/// patches runs of more than `thresh` duplicates. Both channels run their
/// own state machine; output is flushed in lockstep so the interleaved
/// stereo alignment never drifts.
///
/// The run still pending at end of input is never resolved, so trailing
/// buffered samples are dropped rather than written.
pub struct DonorRepair {
    thresh: usize,
    left: ChannelRepair,
    right: ChannelRepair,
}

impl DonorRepair {
    pub fn new(thresh: usize) -> Self {
        Self {
            thresh,
            left: ChannelRepair::default(),
            right: ChannelRepair::default(),
        }
    }

    /// Feed one aligned frame from each source. Frames that are now decided
    /// on both channels are appended to `out`.
    pub fn advance(&mut self, master: (i16, i16), donor: (i16, i16), out: &mut Vec<(i16, i16)>) {
        self.left.push(master.0, donor.0, self.thresh);
        self.right.push(master.1, donor.1, self.thresh);

        // lockstep flush: only emit what both channels have resolved
        let write_len = self.left.out.len().min(self.right.out.len());
        out.extend(
            self.left
                .out
                .drain(..write_len)
                .zip(self.right.out.drain(..write_len)),
        );
    }

    /// Feed one aligned chunk pair, bounded by the shorter chunk.
    pub fn repair_chunk(
        &mut self,
        master: &StereoChunk,
        donor: &StereoChunk,
        out: &mut Vec<(i16, i16)>,
    ) {
        let frames = master.len().min(donor.len());
        for i in 0..frames {
            self.advance(
                (master.left[i], master.right[i]),
                (donor.left[i], donor.right[i]),
                out,
            );
        }
    }

    /// Samples resolved on one channel but still waiting on the other.
    pub fn buffered(&self) -> (usize, usize) {
        (self.left.out.len(), self.right.out.len())
    }
}
