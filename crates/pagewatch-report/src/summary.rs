//! Aggregate counts over a run.

use serde::{Deserialize, Serialize};

use pagewatch_probe::{PageStatus, Verdict};

/// Counts per status and the overall status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub up: usize,
    pub maintenance: usize,
    pub down: usize,
    /// Worst status seen. An empty run is up.
    pub overall: PageStatus,
}

impl Summary {
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let count = |status: PageStatus| verdicts.iter().filter(|v| v.status == status).count();

        let overall = verdicts
            .iter()
            .map(|v| v.status)
            .fold(PageStatus::Up, |acc, s| {
                if s == PageStatus::Down || acc == PageStatus::Down {
                    PageStatus::Down
                } else if s == PageStatus::Maintenance || acc == PageStatus::Maintenance {
                    PageStatus::Maintenance
                } else {
                    PageStatus::Up
                }
            });

        Self {
            total: verdicts.len(),
            up: count(PageStatus::Up),
            maintenance: count(PageStatus::Maintenance),
            down: count(PageStatus::Down),
            overall,
        }
    }

    pub fn any_down(&self) -> bool {
        self.down > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(name: &str, status: PageStatus) -> Verdict {
        Verdict::new(name, format!("https://{}.example.com/", name), status)
    }

    #[test]
    fn test_summary_all_up() {
        let summary = Summary::from_verdicts(&[
            verdict("portal", PageStatus::Up),
            verdict("mail", PageStatus::Up),
        ]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.up, 2);
        assert_eq!(summary.overall, PageStatus::Up);
        assert!(!summary.any_down());
    }

    #[test]
    fn test_summary_maintenance() {
        let summary = Summary::from_verdicts(&[
            verdict("portal", PageStatus::Up),
            verdict("library", PageStatus::Maintenance),
        ]);
        assert_eq!(summary.maintenance, 1);
        assert_eq!(summary.overall, PageStatus::Maintenance);
        assert!(!summary.any_down());
    }

    #[test]
    fn test_summary_down_wins() {
        let summary = Summary::from_verdicts(&[
            verdict("mail", PageStatus::Down),
            verdict("library", PageStatus::Maintenance),
            verdict("portal", PageStatus::Up),
        ]);
        assert_eq!(summary.down, 1);
        assert_eq!(summary.overall, PageStatus::Down);
        assert!(summary.any_down());
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_verdicts(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.overall, PageStatus::Up);
    }
}
