use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

fn setup_project(test: &CliTest) -> Result<()> {
    test.write_file(
        ".lingorc.json",
        r#"{
            "defaultLanguage": "en",
            "languages": ["en", "fr"],
            "includes": ["src"]
        }"#,
    )?;
    test.write_file(
        "src/app.tsx",
        r#"export const App = () => <button title={t("Save")}>{t('Cancel')}</button>;"#,
    )?;
    test.write_file("src/utils.ts", "export const label = t(`It's done`);")?;
    test.write_file("src/app.test.tsx", "t('Only used in tests')")?;
    test.write_file("node_modules/lib/index.js", "t('Vendored')")?;
    Ok(())
}

#[test]
fn test_extract_dry_run_does_not_write() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("+ \"Cancel\""), "stdout: {}", out);
    assert!(out.contains("Would add 3 new key(s)"), "stdout: {}", out);
    assert!(!out.contains("Only used in tests"));
    assert!(!test.root().join("messages/en.json").exists());

    Ok(())
}

#[test]
fn test_extract_apply_adds_identity_entries() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file("messages/en.json", "{\n  \"Save\": \"Save!\"\n}\n")?;

    let output = test.extract_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Added 2 new key(s)"));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({
            "Save": "Save!",
            "Cancel": "Cancel",
            "It's done": "It's done"
        })
    );
    assert!(!test.root().join("messages/fr.json").exists());

    Ok(())
}

#[test]
fn test_extract_is_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    test.extract_command().arg("--apply").output()?;
    let first = test.read_file("messages/en.json")?;

    let output = test.extract_command().arg("--apply").output()?;
    assert!(stdout(&output).contains("is up to date"));
    assert_eq!(test.read_file("messages/en.json")?, first);

    Ok(())
}

#[test]
fn test_extract_respects_messages_root_override() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test
        .extract_command()
        .args(["--apply", "--messages-root", "locales"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(test.root().join("locales/en.json").exists());

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(
        ".lingorc.json",
        r#"{ "defaultLanguage": "de", "languages": ["en", "en"], "ignores": ["[oops"] }"#,
    )?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Error: invalid configuration"), "stderr: {}", err);
    assert!(err.contains("languages[1]"), "stderr: {}", err);
    assert!(err.contains("defaultLanguage"), "stderr: {}", err);
    assert!(err.contains("ignores"), "stderr: {}", err);

    Ok(())
}
