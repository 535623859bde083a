use std::env;
use std::sync::{Mutex, OnceLock};

use makeitsell_cli::commands::{config, demo, doctor, recommend};
use makeitsell_core::DemoDataset;
use serde_json::Value;
use uuid::Uuid;

#[test]
fn demo_returns_ok_payload() {
    with_env(&[], || {
        let result = demo::run("hybrid", None);
        assert_eq!(result.exit_code, 0, "expected successful demo ranking");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "demo");
        assert_eq!(payload["status"], "ok");
        assert!(payload["message"].as_str().unwrap_or("").contains("strategy `hybrid`"));
    });
}

#[test]
fn demo_output_is_deterministic_across_runs() {
    with_env(&[], || {
        for strategy in ["personalized", "collaborative", "content", "trending", "hybrid"] {
            let first = demo::run(strategy, None);
            let second = demo::run(strategy, None);

            assert_eq!(first.exit_code, 0, "{strategy} demo should succeed");
            let first_payload = parse_payload(&first.output);
            let second_payload = parse_payload(&second.output);
            assert_eq!(
                first_payload["message"], second_payload["message"],
                "{strategy} demo output should be identical across runs"
            );
        }
    });
}

#[test]
fn demo_personalized_ranks_the_power_bank_first() {
    with_env(&[], || {
        let result = demo::run("personalized", None);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let message = payload["message"].as_str().unwrap_or("");
        let first_line = message.lines().nth(1).unwrap_or("");
        assert!(
            first_line.contains("[prod-power-bank]"),
            "expected the in-budget, brand-and-query-matched power bank first, got: {first_line}"
        );
    });
}

#[test]
fn demo_rejects_unknown_strategy_with_invalid_input() {
    with_env(&[], || {
        let result = demo::run("popular", None);
        assert_eq!(result.exit_code, 5);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "invalid_input");
    });
}

#[test]
fn recommend_reports_missing_data_files_as_data_load() {
    with_env(
        &[
            ("MAKEITSELL_DATA_CATALOG_PATH", "does-not-exist/catalog.json"),
            ("MAKEITSELL_DATA_BEHAVIOR_PATH", "does-not-exist/behavior.json"),
        ],
        || {
            let result = recommend::run(recommend::RecommendArgs {
                user: Uuid::nil(),
                strategy: "hybrid".to_string(),
                limit: None,
                catalog: None,
                behavior: None,
            });
            assert_eq!(result.exit_code, 4, "expected data load failure code");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["command"], "recommend");
            assert_eq!(payload["error_class"], "data_load");
        },
    );
}

#[test]
fn recommend_ranks_a_catalog_loaded_from_json_files() {
    with_env(&[], || {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let catalog_path = dir.path().join("catalog.json");
        let behavior_path = dir.path().join("behavior.json");

        let catalog_json =
            serde_json::to_string(&DemoDataset::catalog()).expect("catalog serializes");
        let behavior_json =
            serde_json::to_string(&DemoDataset::behavior()).expect("behavior serializes");
        std::fs::write(&catalog_path, catalog_json).expect("write catalog");
        std::fs::write(&behavior_path, behavior_json).expect("write behavior");

        let result = recommend::run(recommend::RecommendArgs {
            user: Uuid::nil(),
            strategy: "trending".to_string(),
            limit: Some(3),
            catalog: Some(catalog_path),
            behavior: Some(behavior_path),
        });
        assert_eq!(result.exit_code, 0, "expected successful ranking: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "ok");
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("top 3 of 10 candidates"));
        assert!(message.contains("score"));
    });
}

#[test]
fn recommend_rejects_zero_limit() {
    with_env(&[], || {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let catalog_path = dir.path().join("catalog.json");
        let behavior_path = dir.path().join("behavior.json");
        std::fs::write(
            &catalog_path,
            serde_json::to_string(&DemoDataset::catalog()).expect("catalog serializes"),
        )
        .expect("write catalog");
        std::fs::write(
            &behavior_path,
            serde_json::to_string(&DemoDataset::behavior()).expect("behavior serializes"),
        )
        .expect("write behavior");

        let result = recommend::run(recommend::RecommendArgs {
            user: Uuid::nil(),
            strategy: "trending".to_string(),
            limit: Some(0),
            catalog: Some(catalog_path),
            behavior: Some(behavior_path),
        });
        assert_eq!(result.exit_code, 5, "limit=0 must be rejected, not defaulted");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_input");
    });
}

#[test]
fn config_lists_effective_values_with_source_attribution() {
    with_env(&[("MAKEITSELL_RECOMMENDER_DEFAULT_LIMIT", "6")], || {
        let output = config::run();

        assert!(output.contains(
            "- recommender.default_limit = 6 (source: env (MAKEITSELL_RECOMMENDER_DEFAULT_LIMIT))"
        ));
        assert!(output.contains("- logging.level = info (source: default)"));
        assert!(output.contains("- recommender.personalized_weight = 0.4"));
    });
}

#[test]
fn doctor_json_reports_missing_data_files() {
    with_env(
        &[
            ("MAKEITSELL_DATA_CATALOG_PATH", "does-not-exist/catalog.json"),
            ("MAKEITSELL_DATA_BEHAVIOR_PATH", "does-not-exist/behavior.json"),
        ],
        || {
            let output = doctor::run(true);
            let report: Value =
                serde_json::from_str(&output).expect("doctor --json emits valid JSON");

            assert_eq!(report["overall_status"], "fail");
            let checks = report["checks"].as_array().expect("checks array");
            let catalog_check = checks
                .iter()
                .find(|check| check["name"] == "catalog_data")
                .expect("catalog_data check present");
            assert_eq!(catalog_check["status"], "fail");

            // The engine itself is healthy even when data files are missing.
            let smoke_check = checks
                .iter()
                .find(|check| check["name"] == "engine_smoke")
                .expect("engine_smoke check present");
            assert_eq!(smoke_check["status"], "pass");
        },
    );
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "MAKEITSELL_RECOMMENDER_DEFAULT_LIMIT",
        "MAKEITSELL_DATA_CATALOG_PATH",
        "MAKEITSELL_DATA_BEHAVIOR_PATH",
        "MAKEITSELL_LOGGING_LEVEL",
        "MAKEITSELL_LOGGING_FORMAT",
        "MAKEITSELL_LOG_LEVEL",
        "MAKEITSELL_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
