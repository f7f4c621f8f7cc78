//! Compliance records and their aggregation.
//!
//! Each pattern bundle may carry a `compliance.json` scoring it against a set
//! of external standards. `overallStatus` is always derivable from
//! `overallCompliance`, which in turn is the arithmetic mean of the standard
//! scores; the auditor recomputes both and flags records whose stored values
//! disagree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const COMPLIANCE_FILE: &str = "compliance.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    PartiallyCompliant,
    NeedsImprovement,
    NonCompliant,
}

impl ComplianceStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            ComplianceStatus::Compliant
        } else if score >= 70.0 {
            ComplianceStatus::PartiallyCompliant
        } else if score >= 50.0 {
            ComplianceStatus::NeedsImprovement
        } else {
            ComplianceStatus::NonCompliant
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::PartiallyCompliant => "partially-compliant",
            ComplianceStatus::NeedsImprovement => "needs-improvement",
            ComplianceStatus::NonCompliant => "non-compliant",
        };
        f.write_str(s)
    }
}

/// On-disk `compliance.json` as authored in a pattern bundle.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    pub pattern: String,
    pub version: Option<String>,
    pub last_audit_date: Option<String>,
    #[serde(default)]
    pub standards: BTreeMap<String, StandardEntry>,
    pub overall_compliance: Option<f64>,
    pub overall_status: Option<ComplianceStatus>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StandardEntry {
    pub status: Option<ComplianceStatus>,
    pub compliance: f64,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub fixes: Vec<String>,
}

/// Derived per-pattern audit result.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PatternAudit {
    pub name: String,
    pub version: Option<String>,
    pub last_audit_date: Option<String>,
    pub overall_compliance: f64,
    pub overall_status: ComplianceStatus,
    /// False when the stored overall score or status disagrees with the
    /// value derived from the standards map.
    pub consistent: bool,
    pub standards: BTreeMap<String, StandardAudit>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StandardAudit {
    pub compliance: f64,
    pub status: ComplianceStatus,
    pub requirements: Vec<String>,
    pub issues: Vec<String>,
    pub fixes: Vec<String>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CriticalIssue {
    pub pattern: String,
    pub standard: String,
    pub issue: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SkippedPattern {
    pub name: String,
    pub reason: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub patterns_dir: String,
    pub audited: usize,
    pub skipped: Vec<SkippedPattern>,
    pub patterns: Vec<PatternAudit>,
    pub standard_averages: BTreeMap<String, f64>,
    pub overall_compliance: f64,
    pub overall_status: ComplianceStatus,
    pub critical: Vec<CriticalIssue>,
}

impl AuditReport {
    pub fn has_critical(&self) -> bool {
        !self.critical.is_empty()
    }
}

/// Issues are tagged by prefix, e.g. `"CRITICAL: table rows lack headers"`.
pub fn is_critical(issue: &str) -> bool {
    issue.starts_with("CRITICAL")
}

fn mean(scores: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = scores.fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Derive a pattern audit from an authored record. The derived mean and
/// bucket always win over the stored ones.
pub fn audit_record(record: &ComplianceRecord) -> PatternAudit {
    let derived = mean(record.standards.values().map(|s| s.compliance));
    let status = ComplianceStatus::from_score(derived);

    let score_consistent = record
        .overall_compliance
        .map(|stored| stored.round() == derived.round())
        .unwrap_or(true);
    let status_consistent = record
        .overall_status
        .map(|stored| stored == status)
        .unwrap_or(true);

    let standards = record
        .standards
        .iter()
        .map(|(name, s)| {
            (
                name.clone(),
                StandardAudit {
                    compliance: s.compliance,
                    status: s
                        .status
                        .unwrap_or_else(|| ComplianceStatus::from_score(s.compliance)),
                    requirements: s.requirements.clone(),
                    issues: s.issues.clone(),
                    fixes: s.fixes.clone(),
                },
            )
        })
        .collect();

    PatternAudit {
        name: record.pattern.clone(),
        version: record.version.clone(),
        last_audit_date: record.last_audit_date.clone(),
        overall_compliance: derived,
        overall_status: status,
        consistent: score_consistent && status_consistent,
        standards,
    }
}

/// Fold per-pattern audits into the report: per-standard means across
/// patterns, an overall mean across patterns, and the flat critical list.
pub fn aggregate(
    patterns_dir: String,
    audits: Vec<PatternAudit>,
    skipped: Vec<SkippedPattern>,
) -> AuditReport {
    let mut per_standard: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut critical = Vec::new();

    for audit in &audits {
        for (standard, s) in &audit.standards {
            per_standard
                .entry(standard.clone())
                .or_default()
                .push(s.compliance);
            for issue in &s.issues {
                if is_critical(issue) {
                    critical.push(CriticalIssue {
                        pattern: audit.name.clone(),
                        standard: standard.clone(),
                        issue: issue.clone(),
                    });
                }
            }
        }
    }

    let standard_averages = per_standard
        .into_iter()
        .map(|(k, v)| {
            let avg = mean(v.iter().copied());
            (k, avg)
        })
        .collect();

    let overall = mean(audits.iter().map(|a| a.overall_compliance));

    AuditReport {
        patterns_dir,
        audited: audits.len(),
        skipped,
        patterns: audits,
        standard_averages,
        overall_compliance: overall,
        overall_status: ComplianceStatus::from_score(overall),
        critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(scores: &[(&str, f64)]) -> ComplianceRecord {
        ComplianceRecord {
            pattern: "metric-card".to_string(),
            version: Some("1.2.0".to_string()),
            last_audit_date: Some("2025-11-02".to_string()),
            standards: scores
                .iter()
                .map(|(name, score)| {
                    (
                        name.to_string(),
                        StandardEntry {
                            status: None,
                            compliance: *score,
                            requirements: vec![],
                            issues: vec![],
                            fixes: vec![],
                        },
                    )
                })
                .collect(),
            overall_compliance: None,
            overall_status: None,
        }
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(
            ComplianceStatus::from_score(90.0),
            ComplianceStatus::Compliant
        );
        assert_eq!(
            ComplianceStatus::from_score(89.9),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            ComplianceStatus::from_score(70.0),
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(
            ComplianceStatus::from_score(69.0),
            ComplianceStatus::NeedsImprovement
        );
        assert_eq!(
            ComplianceStatus::from_score(50.0),
            ComplianceStatus::NeedsImprovement
        );
        assert_eq!(
            ComplianceStatus::from_score(49.9),
            ComplianceStatus::NonCompliant
        );
        assert_eq!(
            ComplianceStatus::from_score(0.0),
            ComplianceStatus::NonCompliant
        );
    }

    #[test]
    fn derived_mean_and_bucket_win() {
        let mut r = record(&[("accessibility", 95.0), ("design", 85.0)]);
        r.overall_compliance = Some(40.0);
        r.overall_status = Some(ComplianceStatus::NonCompliant);

        let audit = audit_record(&r);
        assert_eq!(audit.overall_compliance, 90.0);
        assert_eq!(audit.overall_status, ComplianceStatus::Compliant);
        assert!(!audit.consistent);
    }

    #[test]
    fn consistent_record_is_not_flagged() {
        let mut r = record(&[("accessibility", 80.0), ("design", 70.0)]);
        r.overall_compliance = Some(75.0);
        r.overall_status = Some(ComplianceStatus::PartiallyCompliant);
        assert!(audit_record(&r).consistent);
    }

    #[test]
    fn empty_standards_audit_as_zero() {
        let audit = audit_record(&record(&[]));
        assert_eq!(audit.overall_compliance, 0.0);
        assert_eq!(audit.overall_status, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn critical_issues_are_prefix_matched() {
        assert!(is_critical("CRITICAL: table rows lack headers"));
        assert!(!is_critical("minor: a critical-path nit"));
        assert!(!is_critical("this is not Critical"));
    }

    #[test]
    fn aggregate_averages_across_patterns_and_standards() {
        let mut a = record(&[("accessibility", 100.0), ("design", 80.0)]);
        a.pattern = "a".to_string();
        let mut b = record(&[("accessibility", 60.0)]);
        b.pattern = "b".to_string();
        b.standards.get_mut("accessibility").unwrap().issues =
            vec!["CRITICAL: no focus outline".to_string()];

        let report = aggregate(
            "patterns".to_string(),
            vec![audit_record(&a), audit_record(&b)],
            vec![],
        );

        assert_eq!(report.audited, 2);
        assert_eq!(report.standard_averages["accessibility"], 80.0);
        assert_eq!(report.standard_averages["design"], 80.0);
        // pattern means are 90 and 60, overall 75
        assert_eq!(report.overall_compliance, 75.0);
        assert_eq!(
            report.overall_status,
            ComplianceStatus::PartiallyCompliant
        );
        assert_eq!(report.critical.len(), 1);
        assert_eq!(report.critical[0].pattern, "b");
        assert!(report.has_critical());
    }
}
