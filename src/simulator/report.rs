//! Win-rate report generation.

use serde::Serialize;

use crate::battle::MatchupResult;

/// Aggregated results of a roster run.
#[derive(Debug, Clone, Serialize)]
pub struct RosterReport {
    pub names: Vec<String>,
    pub iterations: u32,
    /// One entry per unordered pair, in row-major upper-triangle order.
    pub matchups: Vec<MatchupResult>,
}

impl RosterReport {
    pub fn new(names: Vec<String>, iterations: u32, matchups: Vec<MatchupResult>) -> Self {
        Self {
            names,
            iterations,
            matchups,
        }
    }

    /// The matchup between `names[a]` and `names[b]`, in either order.
    pub fn matchup(&self, a: usize, b: usize) -> Option<&MatchupResult> {
        let n = self.names.len();
        if a == b || a >= n || b >= n {
            return None;
        }
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        // pairs before row i, then the offset within row i
        let index = i * n - i * (i + 1) / 2 + (j - i - 1);
        self.matchups.get(index)
    }

    /// Fraction of battles `names[row]` won against `names[col]`.
    ///
    /// `None` on the diagonal. Draws are nobody's wins.
    pub fn rate(&self, row: usize, col: usize) -> Option<f64> {
        let matchup = self.matchup(row, col)?;
        if matchup.iterations == 0 {
            return Some(0.0);
        }
        let wins = if row < col {
            matchup.left_wins
        } else {
            matchup.right_wins
        };
        Some(wins as f64 / matchup.iterations as f64)
    }

    /// Whether `names[row]` has the edge over `names[col]`.
    ///
    /// Decided once per matchup from the earlier entry's rate, so exactly
    /// one of the two mirrored cells is ahead. An even split favours the
    /// later entry.
    pub fn advantage(&self, row: usize, col: usize) -> Option<bool> {
        let (first, second) = if row < col { (row, col) } else { (col, row) };
        let first_ahead = self.rate(first, second)? > 0.5;
        Some(if row == first { first_ahead } else { !first_ahead })
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                      WIN-RATE MATRIX\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Monsters: {}, matchups: {}, battles per matchup: {}\n\n",
            self.names.len(),
            self.matchups.len(),
            self.iterations
        ));

        let label_width = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| row_label(i, name).chars().count())
            .max()
            .unwrap_or(0);

        report.push_str(&format!("  {:label_width$}", ""));
        for col in 0..self.names.len() {
            report.push_str(&format!(" {:>7}", format!("[{}]", col + 1)));
        }
        report.push('\n');

        for (row, name) in self.names.iter().enumerate() {
            let label = row_label(row, name);
            let pad = label_width - label.chars().count();
            report.push_str(&format!("  {}{}", label, " ".repeat(pad)));
            for col in 0..self.names.len() {
                let cell = match (self.rate(row, col), self.advantage(row, col)) {
                    (Some(rate), Some(ahead)) => {
                        format!("{}{}", format_rate(rate), if ahead { '+' } else { '-' })
                    }
                    _ => "-".to_string(),
                };
                report.push_str(&format!(" {:>7}", cell));
            }
            report.push('\n');
        }
        report.push('\n');

        report.push_str("── MATCHUPS ─────────────────────────────────────────────────────\n");
        for m in &self.matchups {
            report.push_str(&format!(
                "  {} vs {} -> {}:{}",
                m.left,
                m.right,
                m.left_wins,
                m.right_wins
            ));
            if m.draws > 0 {
                report.push_str(&format!(" ({} draws)", m.draws));
            }
            report.push_str(&format!("  avg {:.1} turns\n", m.average_turns()));
        }

        let capped: u32 = self.matchups.iter().map(|m| m.capped).sum();
        if capped > 0 {
            report.push_str(&format!(
                "\n  ⚠️  {} battles stopped at the turn cap\n",
                capped
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

/// Three decimals without the leading zero, e.g. `.523`.
pub fn format_rate(rate: f64) -> String {
    let text = format!("{:.3}", rate);
    match text.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

fn row_label(index: usize, name: &str) -> String {
    format!("[{}] {}", index + 1, name)
}
