use std::io::{IsTerminal, Write};
use std::path::Path;

use crate::analysis::{DropoutEvent, Score};
use crate::commands::FileReport;
use crate::shared::Timestamp;

/// One human-readable line per detected dropout.
pub fn event_line(event: &DropoutEvent, rate: u32) -> String {
    format!(
        "{} Start {} {:5} End {} {:5} Dur {}",
        event.channel,
        Timestamp::new(event.start, rate),
        event.value,
        Timestamp::new(event.end, rate),
        event.value,
        Timestamp::new(event.duration, rate),
    )
}

pub fn score_line(name: &Path, score: &Score) -> String {
    format!(
        "dropout score: {} frames:{} L:{} R:{} total:{} frac:{:.6}",
        name.display(),
        score.frames,
        score.left,
        score.right,
        score.total,
        score.frac,
    )
}

/// Machine-readable companion to the console report.
pub fn write_json(path: &Path, reports: &[FileReport]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Carriage-return overwrite progress lines. A side channel, not part of any
/// algorithm's contract; stays quiet when stdout isn't a terminal.
pub struct Progress {
    enabled: bool,
}

impl Progress {
    pub fn stdout() -> Self {
        Self {
            enabled: std::io::stdout().is_terminal(),
        }
    }

    pub fn update(&self, line: &str) {
        if !self.enabled {
            return;
        }
        print!("\r{line}");
        let _ = std::io::stdout().flush();
    }

    /// Drop to a fresh line once the pass is done.
    pub fn finish(&self) {
        if self.enabled {
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Channel;

    #[test]
    fn event_line_matches_the_report_format() {
        let event = DropoutEvent {
            channel: Channel::Left,
            start: 44_100,
            end: 44_250,
            duration: 150,
            value: -42,
        };
        assert_eq!(
            event_line(&event, 44_100),
            "L Start 000044100 000m01s+00000samp   -42 \
             End 000044250 000m01s+00150samp   -42 \
             Dur 000000150 000m00s+00150samp"
        );
    }

    #[test]
    fn score_line_matches_the_report_format() {
        let score = Score {
            frames: 1000,
            left: 3,
            right: 5,
            total: 8,
            frac: 0.004,
        };
        assert_eq!(
            score_line(Path::new("take1.wav"), &score),
            "dropout score: take1.wav frames:1000 L:3 R:5 total:8 frac:0.004000"
        );
    }
}
