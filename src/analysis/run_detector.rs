use serde::Serialize;

use crate::shared::Channel;

/// One reported dropout: a run of identical consecutive samples whose
/// duplicate count exceeded the threshold. Immutable once emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DropoutEvent {
    pub channel: Channel,
    /// Index of the run's second sample (where the first duplicate landed).
    pub start: u64,
    /// Index of the run's last sample.
    pub end: u64,
    /// Duplicate count: occurrences of the value beyond the first.
    pub duration: u64,
    /// The held sample value.
    pub value: i16,
}

// Run state for one channel. Carried across chunk boundaries, so chunking is
// invisible to detection. `last` only gets set once the run is long enough
// to report; short runs are dropped silently when they end.
#[derive(Clone, Copy, Debug, Default)]
struct RunState {
    prev: i16,
    count: u64,
    first: Option<u64>,
    last: Option<u64>,
}

/// Streaming duplicate-run detector for one channel.
pub struct RunDetector {
    channel: Channel,
    thresh: u64,
    state: RunState,
}

impl RunDetector {
    pub fn new(channel: Channel, thresh: u64) -> Self {
        Self {
            channel,
            thresh,
            state: RunState::default(),
        }
    }

    /// Feed the next chunk of one channel's samples. `base` is the absolute
    /// index of the chunk's first sample; events land in `events` as runs end.
    pub fn scan_chunk(&mut self, base: u64, samples: &[i16], events: &mut Vec<DropoutEvent>) {
        for (i, &sample) in samples.iter().enumerate() {
            let pos = base + i as u64;
            if sample == self.state.prev {
                if self.state.count == 0 {
                    self.state.first = Some(pos);
                }
                self.state.count += 1;
                if self.state.count > self.thresh {
                    // keep tracking the tail so `end` is the run's last sample;
                    // at thresh 0 even the first duplicate qualifies
                    self.state.last = Some(pos);
                }
            } else {
                self.emit(events);
                self.state.count = 0;
                self.state.prev = sample;
            }
        }
    }

    /// End-of-stream flush: catches a dropout that runs to the last sample.
    pub fn finish(&mut self, events: &mut Vec<DropoutEvent>) {
        self.emit(events);
        self.state.count = 0;
    }

    fn emit(&mut self, events: &mut Vec<DropoutEvent>) {
        if let (Some(first), Some(last)) = (self.state.first, self.state.last) {
            events.push(DropoutEvent {
                channel: self.channel,
                start: first,
                end: last,
                duration: self.state.count,
                value: self.state.prev,
            });
        }
        self.state.first = None;
        self.state.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(samples: &[i16], thresh: u64) -> Vec<DropoutEvent> {
        let mut detector = RunDetector::new(Channel::Left, thresh);
        let mut events = Vec::new();
        detector.scan_chunk(0, samples, &mut events);
        detector.finish(&mut events);
        events
    }

    #[test]
    fn reports_a_run_longer_than_the_threshold() {
        // five 9s: four duplicates, threshold 3 exceeded
        let mut samples = vec![1, 2, 3];
        samples.extend([9; 5]);
        samples.extend([4, 5]);

        let events = detect(&samples, 3);
        assert_eq!(events.len(), 1);
        let e = events[0];
        assert_eq!(e.channel, Channel::Left);
        assert_eq!(e.start, 4); // second 9
        assert_eq!(e.end, 7); // last 9
        assert_eq!(e.duration, 4);
        assert_eq!(e.value, 9);
    }

    #[test]
    fn run_at_the_threshold_is_dropped() {
        // four duplicates, threshold 4: not strictly exceeded
        let mut samples = vec![1, 2];
        samples.extend([7; 5]);
        samples.push(3);
        assert!(detect(&samples, 4).is_empty());

        // one more duplicate tips it over
        let mut samples = vec![1, 2];
        samples.extend([7; 6]);
        samples.push(3);
        assert_eq!(detect(&samples, 4).len(), 1);
    }

    #[test]
    fn threshold_zero_reports_every_duplicate_pair() {
        let events = detect(&[1, 5, 5, 2, 8, 8, 8, 3], 0);
        assert_eq!(events.len(), 2);

        // a two-sample run is the minimal reportable case: its single
        // duplicate is both the start and the end of the run
        assert_eq!((events[0].value, events[0].duration), (5, 1));
        assert_eq!((events[0].start, events[0].end), (2, 2));
        assert_eq!((events[1].value, events[1].duration), (8, 2));
        assert_eq!((events[1].start, events[1].end), (5, 6));
    }

    #[test]
    fn run_reaching_end_of_stream_is_flushed() {
        let mut samples = vec![1, 2];
        samples.extend([6; 10]);

        let events = detect(&samples, 3);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].end, samples.len() as u64 - 1);
        assert_eq!(events[0].duration, 9);
    }

    #[test]
    fn chunking_does_not_change_the_events() {
        let mut samples: Vec<i16> = (0..50).collect();
        samples.extend([123; 40]);
        samples.extend(50..80);
        samples.extend([-77; 13]);
        samples.extend(80..90);

        let whole = detect(&samples, 10);
        assert_eq!(whole.len(), 2);

        for split in [1usize, 3, 7, 39, 41, 64] {
            let mut detector = RunDetector::new(Channel::Left, 10);
            let mut events = Vec::new();
            let mut base = 0u64;
            for piece in samples.chunks(split) {
                detector.scan_chunk(base, piece, &mut events);
                base += piece.len() as u64;
            }
            detector.finish(&mut events);
            assert_eq!(events, whole, "split {split} changed the result");
        }
    }

    #[test]
    fn state_is_not_reset_between_chunks() {
        // a run that straddles the chunk boundary must be seen as one run
        let mut detector = RunDetector::new(Channel::Right, 2);
        let mut events = Vec::new();
        detector.scan_chunk(0, &[1, 4, 4], &mut events);
        detector.scan_chunk(3, &[4, 4, 2], &mut events);
        detector.finish(&mut events);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, 2);
        assert_eq!(events[0].end, 4);
        assert_eq!(events[0].duration, 3);
    }
}
