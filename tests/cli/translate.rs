use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

/// Discard port: connections are refused, so every model call fails fast.
const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:9/v1";

fn setup_project(test: &CliTest, languages: &str) -> Result<()> {
    test.write_file(
        ".lingorc.json",
        &format!(
            r#"{{
                "defaultLanguage": "en",
                "languages": {},
                "backend": {{ "baseUrl": "{}", "timeoutSecs": 5 }}
            }}"#,
            languages, UNREACHABLE_BASE_URL
        ),
    )?;
    test.write_file("src/app.tsx", "export const App = () => t('Save');")?;
    Ok(())
}

#[test]
fn test_translate_requires_api_key() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, r#"["en", "fr"]"#)?;

    let output = test.translate_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("OPENAI_API_KEY"),
        "stderr: {}",
        stderr(&output)
    );
    assert!(!test.root().join("messages/en.json").exists());

    Ok(())
}

#[test]
fn test_translate_failure_is_reported_without_writing() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, r#"["en", "fr"]"#)?;

    let output = test
        .translate_command()
        .env("OPENAI_API_KEY", "test-key")
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Translation failed"));
    assert!(stderr(&output).contains("failed to add missing translations"));
    assert_eq!(test.read_json("messages/en.json")?, json!({ "Save": "Save" }));
    assert!(!test.root().join("messages/fr.json").exists());

    Ok(())
}

#[test]
fn test_translate_strict_fails_on_pipeline_error() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, r#"["en", "fr"]"#)?;

    let output = test
        .translate_command()
        .arg("--strict")
        .env("OPENAI_API_KEY", "test-key")
        .output()?;

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));

    Ok(())
}

#[test]
fn test_translate_with_nothing_missing_makes_no_calls() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, r#"["en", "fr"]"#)?;
    test.write_file("messages/en.json", r#"{ "Save": "Save" }"#)?;
    test.write_file("messages/fr.json", r#"{ "Save": "Enregistrer" }"#)?;

    let output = test
        .translate_command()
        .arg("--strict")
        .env("OPENAI_API_KEY", "test-key")
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Translated 0 key(s) across 1 language(s)"));
    assert_eq!(
        test.read_json("messages/fr.json")?,
        json!({ "Save": "Enregistrer" })
    );

    Ok(())
}

#[test]
fn test_translate_skip_extract() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test, r#"["en"]"#)?;

    let output = test
        .translate_command()
        .arg("--skip-extract")
        .env("OPENAI_API_KEY", "test-key")
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(!test.root().join("messages/en.json").exists());

    Ok(())
}
