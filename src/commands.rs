use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::{DropoutEvent, DupScorer, RunDetector, Score, leader_length};
use crate::repair::{DonorRepair, median};
use crate::report::Progress;
use crate::shared::{CHUNK, Channel, Timestamp};
use crate::wav::{FrameSink, FrameSource, StreamInfo};

/// Everything one diagnostic pass learns about a transfer.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub sample_rate: u32,
    pub frames: u64,
    pub leader: u64,
    pub events: Vec<DropoutEvent>,
    pub score: Score,
}

// Open a source, measure its leader in a scan of its own, then reopen
// positioned just past it. Returns the post-leader frame budget alongside.
fn open_trimmed(path: &Path) -> anyhow::Result<(FrameSource, StreamInfo, u64)> {
    let mut source = FrameSource::open(path)?;
    let info = source.info();
    let leader = leader_length(&mut source);
    info!(
        file = %path.display(),
        rate = info.sample_rate,
        frames = info.frames,
        leader,
        net = info.frames.saturating_sub(leader),
        "leader measured"
    );

    let mut source = FrameSource::open(path)?;
    source.skip(leader);
    Ok((source, info, info.frames.saturating_sub(leader)))
}

/// Diagnostic mode: one post-leader pass running the duplicate-run detector
/// on both channels and the dropout scorer, nothing written.
pub fn scan_file(path: &Path, thresh: u64) -> anyhow::Result<FileReport> {
    let (mut source, info, net) =
        open_trimmed(path).with_context(|| format!("scanning {}", path.display()))?;
    let leader = info.frames - net;

    let mut detect_left = RunDetector::new(Channel::Left, thresh);
    let mut detect_right = RunDetector::new(Channel::Right, thresh);
    let mut scorer = DupScorer::new();
    let mut events = Vec::new();
    let progress = Progress::stdout();

    // absolute sample index, so reported timestamps locate the dropout on tape
    let mut pos = leader;
    let mut chunk_num = 0u64;
    loop {
        let chunk = source.read_chunk(CHUNK);
        if chunk.is_empty() {
            break;
        }
        detect_left.scan_chunk(pos, &chunk.left, &mut events);
        detect_right.scan_chunk(pos, &chunk.right, &mut events);
        scorer.score_chunk(&chunk);
        pos += chunk.len() as u64;
        chunk_num += 1;

        let s = scorer.score();
        progress.update(&format!(
            "C:{:08} F:{}\tL:{:09} R:{:09} total:{} frac:{:.6}",
            chunk_num,
            Timestamp::new(pos, info.sample_rate),
            s.left,
            s.right,
            s.total,
            s.frac,
        ));
    }
    detect_left.finish(&mut events);
    detect_right.finish(&mut events);
    progress.finish();

    let score = scorer.score();
    Ok(FileReport {
        path: path.to_path_buf(),
        sample_rate: info.sample_rate,
        frames: score.frames,
        leader,
        events,
        score,
    })
}

/// Three-way median vote: every output sample is the per-channel middle
/// value of the three transfers at that position. Returns frames written.
pub fn repair_median(inputs: [&Path; 3], output: &Path) -> anyhow::Result<u64> {
    let (mut a, a_info, a_net) = open_trimmed(inputs[0])?;
    let (mut b, _b_info, b_net) = open_trimmed(inputs[1])?;
    let (mut c, _c_info, c_net) = open_trimmed(inputs[2])?;

    // pre-trimmed to the shortest of the three
    let budget = a_net.min(b_net).min(c_net);
    let mut sink = FrameSink::create(output, a_info.sample_rate)?;
    let progress = Progress::stdout();

    let mut written = 0u64;
    let mut chunk_num = 0u64;
    let mut out = Vec::with_capacity(CHUNK);
    while written < budget {
        let want = CHUNK.min((budget - written) as usize);
        let ca = a.read_chunk(want);
        let cb = b.read_chunk(want);
        let cc = c.read_chunk(want);
        let frames = ca.len().min(cb.len()).min(cc.len());

        out.clear();
        median::vote_chunk(&ca, &cb, &cc, &mut out);
        sink.write_frames(&out)?;
        written += out.len() as u64;
        chunk_num += 1;
        progress.update(&format!("C:{chunk_num:08} F:{written:09}"));

        if frames < want {
            // a short read is end-of-stream; stop before the inputs drift
            break;
        }
    }
    sink.finalize()?;
    progress.finish();
    debug!(budget, written, "median vote pass complete");

    Ok(written)
}

/// Donor repair: runs of more than `thresh` duplicated master samples are
/// replaced by the aligned donor span. Returns frames written; the run
/// pending at end of input is dropped by design.
pub fn repair_fill(
    master: &Path,
    donor: &Path,
    output: &Path,
    thresh: u64,
) -> anyhow::Result<u64> {
    info!(thresh, "dropout threshold");
    let (mut m, m_info, m_net) = open_trimmed(master)?;
    let (mut d, _d_info, d_net) = open_trimmed(donor)?;

    let budget = m_net.min(d_net);
    let mut sink = FrameSink::create(output, m_info.sample_rate)?;
    let mut repair = DonorRepair::new(thresh as usize);
    let progress = Progress::stdout();

    let mut seen = 0u64;
    let mut written = 0u64;
    let mut chunk_num = 0u64;
    let mut out = Vec::with_capacity(CHUNK);
    while seen < budget {
        let want = CHUNK.min((budget - seen) as usize);
        let mc = m.read_chunk(want);
        let dc = d.read_chunk(want);
        let frames = mc.len().min(dc.len());

        out.clear();
        repair.repair_chunk(&mc, &dc, &mut out);
        sink.write_frames(&out)?;
        seen += frames as u64;
        written += out.len() as u64;
        chunk_num += 1;

        let (l_buf, r_buf) = repair.buffered();
        progress.update(&format!(
            "C:{:08} F:{}\tout:{:06}:{:06}",
            chunk_num,
            Timestamp::new(seen, m_info.sample_rate),
            l_buf,
            r_buf,
        ));

        if frames < want {
            // a short read is end-of-stream; stop before the inputs drift
            break;
        }
    }
    sink.finalize()?;
    progress.finish();
    debug!(budget, written, "fill pass complete");

    Ok(written)
}
