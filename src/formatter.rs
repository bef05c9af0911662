//! Output formatters for analysis reports.
//!
//! Trait-based formatters render an [`AnalysisReport`] as a
//! human-readable listing or as JSON. The human form prints the CFG in
//! the `BB(start, end) -> ...` block-listing shape followed by the bound
//! in cycles and milliseconds.

use crate::types::{AnalysisReport, BlockSummary, PathStats};

/// Trait for rendering analysis reports.
pub trait ReportFormatter {
    /// Render the recovered CFG listing.
    fn format_cfg(&self, blocks: &[BlockSummary]) -> Option<String>;

    /// Render the final upper bound.
    fn format_bound(&self, report: &AnalysisReport) -> String;

    /// Render exploration counters.
    fn format_stats(&self, stats: &PathStats) -> Option<String>;

    /// Render the complete report.
    ///
    /// Default implementation concatenates all component outputs.
    fn format_report(&self, report: &AnalysisReport) -> String {
        let mut parts = Vec::new();
        if let Some(s) = self.format_cfg(&report.blocks) {
            parts.push(s);
        }
        parts.push(self.format_bound(report));
        if let Some(s) = self.format_stats(&report.stats) {
            parts.push(s);
        }
        parts.join("")
    }
}

/// Human-readable output formatter.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    /// Show exploration counters.
    pub verbose: bool,
    /// Only print the bound.
    pub quiet: bool,
}

impl HumanFormatter {
    /// Create a formatter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            quiet: false,
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format_cfg(&self, blocks: &[BlockSummary]) -> Option<String> {
        if self.quiet || blocks.is_empty() {
            return None;
        }
        let mut out = String::from("CFG blocks:\n");
        for block in blocks {
            let line = if block.successors.is_empty() {
                format!("  BB({}, {})\n", block.start, block.end)
            } else {
                let targets: Vec<String> =
                    block.successors.iter().map(|s| s.to_string()).collect();
                format!(
                    "  BB({}, {}) -> {}\n",
                    block.start,
                    block.end,
                    targets.join(", ")
                )
            };
            out.push_str(&line);
        }
        Some(out)
    }

    fn format_bound(&self, report: &AnalysisReport) -> String {
        format!(
            "Upper bound: {} cycles ({:.6} ms)\n",
            report.upper_bound_cycles, report.upper_bound_ms
        )
    }

    fn format_stats(&self, stats: &PathStats) -> Option<String> {
        if !self.verbose {
            return None;
        }
        Some(format!(
            "Paths: {} completed, {} pruned, {} back-edges, {} cache hits\n",
            stats.completed, stats.pruned, stats.back_edges, stats.cache_hits
        ))
    }
}

/// JSON output formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Emit compact JSON instead of pretty-printed.
    pub compact: bool,
}

impl JsonFormatter {
    /// Create a pretty-printing JSON formatter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compact single-line formatter.
    pub fn compact() -> Self {
        Self { compact: true }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_cfg(&self, _blocks: &[BlockSummary]) -> Option<String> {
        None
    }

    fn format_bound(&self, report: &AnalysisReport) -> String {
        let rendered = if self.compact {
            serde_json::to_string(report)
        } else {
            serde_json::to_string_pretty(report)
        };
        match rendered {
            Ok(mut s) => {
                s.push('\n');
                s
            }
            Err(e) => format!("{{\"error\": \"{e}\"}}\n"),
        }
    }

    fn format_stats(&self, _stats: &PathStats) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            upper_bound_cycles: 111,
            upper_bound_ms: AnalysisReport::cycles_to_ms(111),
            instruction_count: 3,
            blocks: vec![
                BlockSummary {
                    start: 0,
                    end: 0,
                    successors: vec![2, 1],
                },
                BlockSummary {
                    start: 1,
                    end: 1,
                    successors: vec![2],
                },
                BlockSummary {
                    start: 2,
                    end: 2,
                    successors: vec![],
                },
            ],
            stats: PathStats {
                completed: 2,
                pruned: 1,
                ..PathStats::default()
            },
        }
    }

    #[test]
    fn test_human_listing() {
        let out = HumanFormatter::new().format_report(&sample_report());
        assert!(out.contains("BB(0, 0) -> 2, 1"));
        assert!(out.contains("BB(2, 2)\n"));
        assert!(out.contains("Upper bound: 111 cycles"));
        // Counters only appear in verbose mode.
        assert!(!out.contains("Paths:"));
        let verbose = HumanFormatter::verbose().format_report(&sample_report());
        assert!(verbose.contains("Paths: 2 completed, 1 pruned"));
    }

    #[test]
    fn test_quiet_skips_listing() {
        let formatter = HumanFormatter {
            quiet: true,
            ..HumanFormatter::new()
        };
        let out = formatter.format_report(&sample_report());
        assert!(!out.contains("BB(0"));
        assert!(out.contains("Upper bound"));
    }

    #[test]
    fn test_json_roundtrip() {
        let out = JsonFormatter::compact().format_report(&sample_report());
        let parsed: AnalysisReport = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(parsed, sample_report());
    }
}
