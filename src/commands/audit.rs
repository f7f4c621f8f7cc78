use crate::cli::{Cli, DEFAULT_PATTERNS_DIR};
use crate::domain::compliance::{
    self, AuditReport, ComplianceRecord, ComplianceStatus, PatternAudit, SkippedPattern,
    COMPLIANCE_FILE,
};
use crate::services::output::emit_json;
use crate::services::storage;
use colored::{ColoredString, Colorize};
use std::path::Path;

/// Build and print the compliance report. Returns the process exit code:
/// 1 when the report carries critical issues, 0 otherwise.
pub fn handle_audit(
    cli: &Cli,
    verbose: bool,
    patterns_dir: Option<&str>,
) -> anyhow::Result<i32> {
    let dir = match patterns_dir {
        Some(d) => d.to_string(),
        None => storage::load_config()?
            .map(|c| c.patterns_dir)
            .unwrap_or_else(|| DEFAULT_PATTERNS_DIR.to_string()),
    };

    let (audits, skipped) = scan_patterns_dir(Path::new(&dir))?;
    let report = compliance::aggregate(dir, audits, skipped);

    if cli.json {
        emit_json(&report)?;
    } else {
        render_report(&report, verbose);
    }

    Ok(if report.has_critical() { 1 } else { 0 })
}

/// One audit entry per immediate subdirectory. Missing or unparseable
/// `compliance.json` files are warned about and skipped, never fatal.
fn scan_patterns_dir(dir: &Path) -> anyhow::Result<(Vec<PatternAudit>, Vec<SkippedPattern>)> {
    if !dir.is_dir() {
        anyhow::bail!("patterns directory not found: {}", dir.display());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();

    let mut audits = Vec::new();
    let mut skipped = Vec::new();
    for name in names {
        let file = dir.join(&name).join(COMPLIANCE_FILE);
        if !file.exists() {
            eprintln!("warning: {}: no {}, skipping", name, COMPLIANCE_FILE);
            skipped.push(SkippedPattern {
                name,
                reason: format!("no {}", COMPLIANCE_FILE),
            });
            continue;
        }
        let raw = std::fs::read_to_string(&file)?;
        match serde_json::from_str::<ComplianceRecord>(&raw) {
            Ok(record) => audits.push(compliance::audit_record(&record)),
            Err(e) => {
                eprintln!("warning: {}: invalid {}: {}", name, COMPLIANCE_FILE, e);
                skipped.push(SkippedPattern {
                    name,
                    reason: format!("invalid {}: {}", COMPLIANCE_FILE, e),
                });
            }
        }
    }

    Ok((audits, skipped))
}

fn paint(status: ComplianceStatus, text: String) -> ColoredString {
    match status {
        ComplianceStatus::Compliant => text.green(),
        ComplianceStatus::PartiallyCompliant | ComplianceStatus::NeedsImprovement => text.yellow(),
        ComplianceStatus::NonCompliant => text.red(),
    }
}

fn render_report(report: &AuditReport, verbose: bool) {
    println!("compliance audit: {}", report.patterns_dir);
    println!();

    if report.patterns.is_empty() {
        println!("{}", "no patterns audited".dimmed());
    }

    for p in &report.patterns {
        let line = format!(
            "{:<24} {:>5.1}  {}",
            p.name, p.overall_compliance, p.overall_status
        );
        if p.consistent {
            println!("{}", paint(p.overall_status, line));
        } else {
            println!(
                "{}  {}",
                paint(p.overall_status, line),
                "(stored totals inconsistent, using derived)".yellow()
            );
        }
        if verbose {
            render_pattern_detail(p);
        }
    }

    if !report.standard_averages.is_empty() {
        println!();
        println!("standards:");
        for (standard, avg) in &report.standard_averages {
            let status = ComplianceStatus::from_score(*avg);
            println!(
                "  {}",
                paint(status, format!("{:<22} {:>5.1}  {}", standard, avg, status))
            );
        }
    }

    println!();
    let overall = format!(
        "overall: {:.1} {}",
        report.overall_compliance, report.overall_status
    );
    println!("{}", paint(report.overall_status, overall).bold());

    if report.has_critical() {
        println!();
        println!("{}", "critical issues:".red().bold());
        for c in &report.critical {
            println!(
                "  {} {} / {}: {}",
                "✗".red(),
                c.pattern,
                c.standard,
                c.issue
            );
        }
    }

    if !report.skipped.is_empty() {
        println!();
        println!("skipped:");
        for s in &report.skipped {
            println!("  {} {}: {}", "!".yellow(), s.name, s.reason);
        }
    }
}

fn render_pattern_detail(p: &PatternAudit) {
    for (standard, s) in &p.standards {
        println!(
            "    {}",
            paint(
                s.status,
                format!("{:<20} {:>5.1}  {}", standard, s.compliance, s.status)
            )
        );
        for r in &s.requirements {
            println!("      req: {}", r);
        }
        for i in &s.issues {
            if compliance::is_critical(i) {
                println!("      {} {}", "issue:".red(), i);
            } else {
                println!("      issue: {}", i);
            }
        }
        for f in &s.fixes {
            println!("      fix: {}", f);
        }
    }
    if let Some(date) = &p.last_audit_date {
        println!("    last audited: {}", date);
    }
}
