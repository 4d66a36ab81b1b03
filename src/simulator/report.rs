//! Simulation report generation.

use super::runner::{RunOutcome, RunStats};
use serde::Serialize;

/// Width of a score band in the death histogram.
pub const SCORE_BAND: u32 = 10;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub wins: u32,
    pub deaths: u32,
    pub timeouts: u32,

    pub avg_score: f64,
    pub max_score: u32,
    pub avg_frames: f64,
    pub avg_playing_frames: f64,
    /// Fraction of runs that reached the mid-match cutscene.
    pub mid_cutscene_rate: f64,

    /// Deaths per score band: index `i` covers scores `i*10..i*10+9`.
    pub deaths_by_band: Vec<u32>,

    pub invariant_violations: u32,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a report from completed runs.
    pub fn from_runs(runs: Vec<RunStats>, total_pipes: u32) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;
        let count = |outcome: RunOutcome| runs.iter().filter(|r| r.outcome == outcome).count() as u32;

        let avg_score = runs.iter().map(|r| r.final_score as f64).sum::<f64>() / divisor;
        let max_score = runs.iter().map(|r| r.final_score).max().unwrap_or(0);
        let avg_frames = runs.iter().map(|r| r.frames as f64).sum::<f64>() / divisor;
        let avg_playing_frames =
            runs.iter().map(|r| r.playing_frames as f64).sum::<f64>() / divisor;
        let mid_cutscene_rate =
            runs.iter().filter(|r| r.mid_cutscene_seen).count() as f64 / divisor;

        let bands = (total_pipes / SCORE_BAND + 1) as usize;
        let mut deaths_by_band = vec![0; bands];
        for run in runs.iter().filter(|r| r.outcome == RunOutcome::Died) {
            let band = ((run.final_score / SCORE_BAND) as usize).min(bands - 1);
            deaths_by_band[band] += 1;
        }

        Self {
            num_runs,
            wins: count(RunOutcome::Won),
            deaths: count(RunOutcome::Died),
            timeouts: count(RunOutcome::TimedOut),
            avg_score,
            max_score,
            avg_frames,
            avg_playing_frames,
            mid_cutscene_rate,
            deaths_by_band,
            invariant_violations: runs.iter().map(|r| r.invariant_violations).sum(),
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 FLIP-BIRDS SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} won, {} died, {} timed out\n\n",
            self.num_runs, self.wins, self.deaths, self.timeouts
        ));

        report.push_str("── SCORING ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:           {:.1}\n", self.avg_score));
        report.push_str(&format!("  Max Score:           {}\n", self.max_score));
        report.push_str(&format!(
            "  Reached Epoch 2:     {:.1}%\n",
            self.mid_cutscene_rate * 100.0
        ));
        report.push_str(&format!("  Avg Frames:          {:.0}\n", self.avg_frames));
        report.push_str(&format!(
            "  Avg Playing Frames:  {:.0}\n\n",
            self.avg_playing_frames
        ));

        report.push_str("── DEATHS BY SCORE ──────────────────────────────────────────────\n");
        for (band, deaths) in self.deaths_by_band.iter().enumerate() {
            let low = band as u32 * SCORE_BAND;
            let pct = if self.num_runs > 0 {
                *deaths as f64 / self.num_runs as f64 * 100.0
            } else {
                0.0
            };
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:>2}-{:<2}: {:>4} {:>5.1}% {}\n",
                low,
                low + SCORE_BAND - 1,
                deaths,
                pct,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── INVARIANTS ───────────────────────────────────────────────────\n");
        if self.invariant_violations == 0 {
            report.push_str("  Spacing and gap bounds held on every frame\n");
        } else {
            report.push_str(&format!(
                "  ⚠️  {} spacing/gap violations observed\n",
                self.invariant_violations
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
