//! Wheel CLI helpers
//!
//! Roster loading and report formatting shared by the `wheel` binary.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use wheel_core::calibration::FairnessReport;
use wheel_core::SpinReport;

/// Split a comma-separated `--names` value. Blank entries are dropped.
pub fn parse_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read one participant per line. Blank lines and `#` comments are skipped.
pub fn read_names_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read participants from {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Resolve the roster from either `--names` or `--file`.
pub fn load_names(names: Option<&str>, file: Option<&Path>) -> Result<Vec<String>> {
    let roster = match (names, file) {
        (Some(_), Some(_)) => bail!("use either --names or --file, not both"),
        (Some(list), None) => parse_names(list),
        (None, Some(path)) => read_names_file(path)?,
        (None, None) => bail!("no participants given (use --names or --file)"),
    };
    if roster.len() < 2 {
        bail!("need at least 2 participants, got {}", roster.len());
    }
    Ok(roster)
}

/// The requested seed, or a random one when none was given.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random::<u64>)
}

pub fn format_spin(report: &SpinReport) -> String {
    let mut line = format!(
        "🎉 {} wins ({} frames, {} ticks, {:.2}s)",
        report.winner.name,
        report.frames,
        report.ticks,
        report.elapsed.as_secs_f64()
    );
    if report.winner.forced {
        line.push_str(" [forced stop]");
    }
    line
}

pub fn format_fairness(report: &FairnessReport) -> String {
    let mut out = format!(
        "Fairness: {} participants, {} spins\n",
        report.participants, report.spins
    );
    for (index, (count, share)) in report.counts.iter().zip(&report.shares).enumerate() {
        out.push_str(&format!("   #{:<3} {:>7}  {:.4}\n", index, count, share));
    }
    out.push_str(&format!(
        "   chi2={:.3} (df={}), max deviation={:.4}, forced={}, mean frames={:.1}",
        report.chi_square,
        report.degrees_of_freedom(),
        report.max_share_deviation,
        report.forced_stops,
        report.mean_frames
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wheel_core::calibration::FairnessRunner;
    use wheel_core::{HeadlessRunner, SpinConfig};

    #[test]
    fn test_parse_names_trims_and_drops_blanks() {
        assert_eq!(parse_names(" Ann, Ben ,,Cat "), vec!["Ann", "Ben", "Cat"]);
        assert!(parse_names(" , ").is_empty());
    }

    #[test]
    fn test_read_names_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# team").unwrap();
        writeln!(file, "Ann").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Ben  ").unwrap();
        let names = read_names_file(file.path()).unwrap();
        assert_eq!(names, vec!["Ann", "Ben"]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = read_names_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn test_load_names_sources() {
        assert!(load_names(None, None).is_err());
        assert!(load_names(Some("solo"), None).is_err());
        assert_eq!(load_names(Some("a,b"), None).unwrap().len(), 2);

        let file = NamedTempFile::new().unwrap();
        assert!(load_names(Some("a,b"), Some(file.path())).is_err());
    }

    #[test]
    fn test_resolve_seed() {
        assert_eq!(resolve_seed(Some(42)), 42);
        let drawn: Vec<u64> = (0..4).map(|_| resolve_seed(None)).collect();
        assert!(drawn.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_format_spin_names_winner() {
        let mut runner =
            HeadlessRunner::with_participants(SpinConfig::default(), 9, ["Ann", "Ben"]).unwrap();
        let report = runner.spin_once().unwrap();
        let line = format_spin(&report);
        assert!(line.contains(&report.winner.name));
        assert!(!line.contains("forced"));
    }

    #[test]
    fn test_format_fairness_lists_every_segment() {
        let report = FairnessRunner::new(1, 30, 3).run().unwrap();
        let text = format_fairness(&report);
        assert!(text.contains("#0"));
        assert!(text.contains("#2"));
        assert!(text.contains("chi2="));
    }
}
