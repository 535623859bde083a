use std::fs;
use std::path::Path;

use makeitsell_core::config::{AppConfig, LoadOptions};
use makeitsell_core::{Catalog, DemoDataset, RecommendationEngine, Strategy, UserBehavior};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_catalog_data(&config));
            checks.push(check_behavior_data(&config));
            checks.push(check_engine_smoke());
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["catalog_data", "behavior_data", "engine_smoke"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog_data(config: &AppConfig) -> DoctorCheck {
    let path = &config.data.catalog_path;
    match read_and_parse_catalog(path) {
        Ok(count) => DoctorCheck {
            name: "catalog_data",
            status: CheckStatus::Pass,
            details: format!("{count} products in `{}`", path.display()),
        },
        Err(details) => DoctorCheck { name: "catalog_data", status: CheckStatus::Fail, details },
    }
}

fn read_and_parse_catalog(path: &Path) -> Result<usize, String> {
    let bytes = fs::read(path)
        .map_err(|error| format!("could not read `{}`: {error}", path.display()))?;
    let catalog = Catalog::from_json_slice(&bytes)
        .map_err(|error| format!("could not parse `{}`: {error}", path.display()))?;
    Ok(catalog.len())
}

fn check_behavior_data(config: &AppConfig) -> DoctorCheck {
    let path = &config.data.behavior_path;
    let result = fs::read(path)
        .map_err(|error| format!("could not read `{}`: {error}", path.display()))
        .and_then(|bytes| {
            serde_json::from_slice::<UserBehavior>(&bytes)
                .map_err(|error| format!("could not parse `{}`: {error}", path.display()))
        });

    match result {
        Ok(behavior) => DoctorCheck {
            name: "behavior_data",
            status: CheckStatus::Pass,
            details: format!(
                "behavior snapshot with {} viewed products, {} categories",
                behavior.viewed_products.len(),
                behavior.viewed_categories.len()
            ),
        },
        Err(details) => DoctorCheck { name: "behavior_data", status: CheckStatus::Fail, details },
    }
}

/// Rank the built-in demo dataset end to end; a healthy engine always finds
/// candidates there.
fn check_engine_smoke() -> DoctorCheck {
    let engine = RecommendationEngine::new();
    let result = engine.recommend_at(
        &DemoDataset::catalog(),
        &DemoDataset::behavior(),
        Strategy::Hybrid,
        4,
        DemoDataset::now(),
    );

    match result {
        Ok(ranked) if !ranked.is_empty() => DoctorCheck {
            name: "engine_smoke",
            status: CheckStatus::Pass,
            details: format!("hybrid smoke ranking returned {} products", ranked.len()),
        },
        Ok(_) => DoctorCheck {
            name: "engine_smoke",
            status: CheckStatus::Fail,
            details: "hybrid smoke ranking returned no products".to_string(),
        },
        Err(error) => DoctorCheck {
            name: "engine_smoke",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::with_capacity(report.checks.len() + 1);
    for check in &report.checks {
        let status = match check.status {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skipped",
        };
        lines.push(format!("[{status}] {}: {}", check.name, check.details));
    }
    lines.push(report.summary.clone());
    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
