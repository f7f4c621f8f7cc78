use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub project: PathBuf,
    pub catalog: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let project = tmp.path().join("project");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&project).expect("create project dir");

        let catalog = make_fixture_catalog(tmp.path());

        Self {
            _tmp: tmp,
            home,
            project,
            catalog,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("patkit").expect("binary under test");
        cmd.env("HOME", &self.home)
            .current_dir(&self.project)
            .arg("--catalog")
            .arg(self.catalog.to_str().expect("catalog path utf8"));
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_err(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json error output")
    }
}

pub fn make_fixture_catalog(base: &Path) -> PathBuf {
    let catalog = base.join("catalog");
    let metric = catalog.join("patterns/metric-card");
    let table = catalog.join("patterns/data-table");

    fs::create_dir_all(catalog.join(".patkit")).expect("create .patkit");
    fs::create_dir_all(&metric).expect("create metric-card bundle");
    fs::create_dir_all(&table).expect("create data-table bundle");

    fs::write(
        metric.join("component.tsx"),
        "export function MetricCard() { return null; }\n",
    )
    .expect("write component");
    fs::write(metric.join("schema.ts"), "export const schema = {};\n").expect("write schema");
    fs::write(
        metric.join("example.tsx"),
        "export const Example = () => null;\n",
    )
    .expect("write example");
    fs::write(
        metric.join("compliance.json"),
        serde_json::to_string_pretty(&serde_json::json!({
            "pattern": "metric-card",
            "version": "1.2.0",
            "lastAuditDate": "2026-07-14",
            "standards": {
                "accessibility-review": {
                    "status": "compliant",
                    "compliance": 96,
                    "requirements": ["labelled value", "readable contrast"]
                },
                "llm-ui-constraints": {"status": "compliant", "compliance": 92},
                "design-guidelines": {"status": "compliant", "compliance": 94}
            },
            "overallCompliance": 94,
            "overallStatus": "compliant"
        }))
        .expect("serialize compliance"),
    )
    .expect("write metric compliance");

    fs::write(
        table.join("component.tsx"),
        "export function DataTable() { return null; }\n",
    )
    .expect("write component");
    fs::write(
        table.join("compliance.json"),
        serde_json::to_string_pretty(&serde_json::json!({
            "pattern": "data-table",
            "version": "0.9.0",
            "lastAuditDate": "2026-07-14",
            "standards": {
                "accessibility-review": {
                    "status": "needs-improvement",
                    "compliance": 58,
                    "issues": ["CRITICAL: data rows lack header association"],
                    "fixes": ["add scope=col to header cells"]
                },
                "llm-ui-constraints": {"status": "partially-compliant", "compliance": 70},
                "design-guidelines": {"status": "needs-improvement", "compliance": 64}
            },
            "overallCompliance": 64,
            "overallStatus": "needs-improvement"
        }))
        .expect("serialize compliance"),
    )
    .expect("write table compliance");

    let manifest = serde_json::json!({
        "name": "fixture-catalog",
        "owner": {"name": "Fixture", "email": "fixture@example.com"},
        "patterns": [
            {
                "name": "metric-card",
                "source": "./patterns/metric-card",
                "description": "Single metric with label and value",
                "version": "1.2.0",
                "tags": ["display", "metric"]
            },
            {
                "name": "data-table",
                "source": "./patterns/data-table",
                "description": "Sortable data table with empty state",
                "version": "0.9.0",
                "tags": ["table"]
            }
        ]
    });
    fs::write(
        catalog.join(".patkit/catalog.json"),
        serde_json::to_string_pretty(&manifest).expect("serialize catalog"),
    )
    .expect("write catalog manifest");

    catalog
}
