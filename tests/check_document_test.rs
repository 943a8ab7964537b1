use anyhow::Result;
use scorm_cmi::{CheckDocument, CheckRunner, RejectedWrite};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_check_document_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("score_check.toml");

    std::fs::write(
        &config_path,
        r#"
standard = "scorm12"

[score]
score_range = "0#100"

[collection]
children = "id,score"

[[collection.entries]]
raw = "70"
min = "0"

[[collection.entries]]
raw = "700"

[[writes]]
target = "raw"
value = "85"

[[writes]]
target = "max"
value = "abc"

[[writes]]
target = "collection._count"
value = "5"
"#,
    )?;

    let document = CheckDocument::from_file(&config_path)?;
    let report = CheckRunner::new(document).run()?;

    assert_eq!(
        report.snapshot,
        json!({
            "score": {"raw": "85", "min": "", "max": "100"},
            "collection": {
                "0": {"raw": "70", "min": "0", "max": "100"},
                "1": {"raw": "", "min": "", "max": "100"}
            }
        })
    );
    assert_eq!(
        report.rejected,
        vec![
            RejectedWrite {
                target: "collection.1.raw".to_string(),
                value: "700".to_string(),
                code: 407,
            },
            RejectedWrite {
                target: "max".to_string(),
                value: "abc".to_string(),
                code: 405,
            },
            RejectedWrite {
                target: "collection._count".to_string(),
                value: "5".to_string(),
                code: 402,
            },
        ]
    );
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let err = CheckDocument::from_file("/nonexistent/score_check.toml").unwrap_err();
    assert!(matches!(err, scorm_cmi::CmiError::IoError(_)));
}

#[test]
fn test_invalid_schema_fails_run() -> Result<()> {
    let document = CheckDocument::from_toml_str(
        r#"
[score]
score_range = "zero#100"
"#,
    )?;

    assert!(CheckRunner::new(document).run().is_err());
    Ok(())
}
