use anyhow::Result;

use crate::{CliTest, stderr, stdout};

fn setup_project(test: &CliTest) -> Result<()> {
    test.write_file(
        ".lingorc.json",
        r#"{ "defaultLanguage": "en", "languages": ["en", "fr", "de"] }"#,
    )?;
    test.write_file(
        "messages/en.json",
        r#"{ "Hello": "Hello", "Bye": "Bye", "Yes": "Yes" }"#,
    )?;
    Ok(())
}

#[test]
fn test_status_reports_missing_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file("messages/fr.json", r#"{ "Hello": "Bonjour", "Bye": "" }"#)?;
    test.write_file(
        "messages/de.json",
        r#"{ "Hello": "Hallo", "Bye": "Tschüss", "Yes": "Ja" }"#,
    )?;

    let output = test.status_command().output()?;

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("3 keys (default)"), "stdout: {}", out);
    assert!(out.contains("de  complete"), "stdout: {}", out);
    assert!(out.contains("fr  2 of 3 missing"), "stdout: {}", out);

    Ok(())
}

#[test]
fn test_status_counts_languages_without_files() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;

    let output = test.status_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("6 missing translation(s) in 2 language(s)"));

    Ok(())
}

#[test]
fn test_status_complete() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".lingorc.json",
        r#"{ "defaultLanguage": "en", "languages": ["en", "fr"] }"#,
    )?;
    test.write_file("messages/en.json", r#"{ "Hello": "Hello" }"#)?;
    test.write_file("messages/fr.json", r#"{ "Hello": "Bonjour" }"#)?;

    let output = test.status_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("All translations are complete"));

    Ok(())
}

#[test]
fn test_status_invalid_json_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    setup_project(&test)?;
    test.write_file("messages/fr.json", "{ broken")?;

    let output = test.status_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse JSON"));

    Ok(())
}
