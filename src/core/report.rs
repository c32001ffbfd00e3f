use crate::core::address;
use crate::core::index::OuiIndex;

/// One emitted line of a batch run, in input order.
#[derive(Debug, PartialEq, Eq)]
pub enum ReportEntry {
    /// A successful lookup, ready for stdout.
    Line(String),
    /// A rejected input, ready for stderr.
    Warning(String),
}

/// The result of running one ordered input list through the pipeline.
///
/// Invariant: every accepted input contributes exactly one `Line`; every
/// rejected input contributes at most one `Warning` (none when quiet).
#[derive(Debug, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            ReportEntry::Line(line) => Some(line.as_str()),
            ReportEntry::Warning(_) => None,
        })
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            ReportEntry::Warning(warning) => Some(warning.as_str()),
            ReportEntry::Line(_) => None,
        })
    }
}

/// `{MAC}  {OUI}  {organizations}` with two-space gaps; multiple
/// organization names joined with `", "`, order preserved.
pub fn format_line(mac: &str, oui: &str, orgs: &[String]) -> String {
    format!("{mac}  {oui}  {}", orgs.join(", "))
}

pub fn format_warning(raw: &str) -> String {
    format!("[WARNING]: Not a valid MAC/OUI address: `{raw}`")
}

/// Drive the normalize -> lookup -> format pipeline over `inputs`.
pub fn build_report(inputs: &[String], index: &OuiIndex, quiet: bool) -> Report {
    let mut report = Report::default();
    for input in inputs {
        match address::canonicalize(input) {
            Some(addr) => {
                let orgs = index.lookup(&addr.oui);
                if orgs.is_empty() {
                    // The index contract guarantees the `unknown` sentinel;
                    // an empty result is an internal invariant violation.
                    tracing::error!("empty lookup result for `{}`", addr.oui);
                    continue;
                }
                report
                    .entries
                    .push(ReportEntry::Line(format_line(&addr.mac, &addr.oui, &orgs)));
            }
            None if quiet => {}
            None => report
                .entries
                .push(ReportEntry::Warning(format_warning(input))),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn sample_index() -> OuiIndex {
        let mut entries = HashMap::new();
        entries.insert("7413EA".to_string(), vec!["ARRIS Group, Inc.".to_string()]);
        entries.insert(
            "080030".to_string(),
            vec!["First Org".to_string(), "Second Org".to_string()],
        );
        OuiIndex::from_entries(entries)
    }

    #[test]
    fn test_format_line_layout() {
        assert_eq!(
            format_line("74:13:EA:9A:22:2E", "7413EA", &["ARRIS Group, Inc.".to_string()]),
            "74:13:EA:9A:22:2E  7413EA  ARRIS Group, Inc."
        );
    }

    #[test]
    fn test_format_line_joins_multiple_orgs() {
        let orgs = vec!["First Org".to_string(), "Second Org".to_string()];
        assert_eq!(
            format_line("08:00:30:00:00:00", "080030", &orgs),
            "08:00:30:00:00:00  080030  First Org, Second Org"
        );
    }

    #[test]
    fn test_format_warning() {
        assert_eq!(
            format_warning("not-a-mac"),
            "[WARNING]: Not a valid MAC/OUI address: `not-a-mac`"
        );
    }

    #[test]
    fn test_build_report_one_line_per_accepted_input() {
        let inputs = vec![
            "74:13:ea:9a:22:2e".to_string(),
            "not-a-mac".to_string(),
            "080030".to_string(),
        ];
        let report = build_report(&inputs, &sample_index(), false);
        assert_eq!(report.lines().count(), 2);
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(
            report.lines().next().unwrap(),
            "74:13:EA:9A:22:2E  7413EA  ARRIS Group, Inc."
        );
    }

    #[test]
    fn test_build_report_preserves_input_order() {
        let inputs = vec![
            "bad".to_string(),
            "080030".to_string(),
            "worse".to_string(),
        ];
        let report = build_report(&inputs, &sample_index(), false);
        assert!(matches!(report.entries[0], ReportEntry::Warning(_)));
        assert!(matches!(report.entries[1], ReportEntry::Line(_)));
        assert!(matches!(report.entries[2], ReportEntry::Warning(_)));
    }

    #[test]
    fn test_build_report_quiet_suppresses_warnings() {
        let inputs = vec!["not-a-mac".to_string(), "080030".to_string()];
        let report = build_report(&inputs, &sample_index(), true);
        assert_eq!(report.warnings().count(), 0);
        assert_eq!(report.lines().count(), 1);
    }

    #[test]
    fn test_build_report_unknown_oui_uses_sentinel() {
        let inputs = vec!["ff:ff:ff:00:00:01".to_string()];
        let report = build_report(&inputs, &sample_index(), false);
        assert_eq!(
            report.lines().next().unwrap(),
            "FF:FF:FF:00:00:01  FFFFFF  unknown"
        );
    }

    #[test]
    fn test_build_report_duplicates_looked_up_independently() {
        let inputs = vec!["080030".to_string(), "080030".to_string()];
        let report = build_report(&inputs, &sample_index(), false);
        assert_eq!(report.lines().count(), 2);
    }
}
