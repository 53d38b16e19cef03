//! End-to-end tests for the tubenotes binary.

mod common;

use anyhow::Result;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_tubenotes");

/// Tests the render subcommand writes a complete page.
#[test]
fn test_render_command_e2e() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    common::write_file(
        dir.path(),
        "lesson.md",
        "### Intro\nLearn **Rust**\n1. Install\n2. Build\n```bash\ncargo build\n```",
    )?;
    let output = dir.path().join("dist");

    // Act
    let status = Command::new(BIN)
        .arg("render")
        .arg(dir.path().join("lesson.md"))
        .arg("-o")
        .arg(&output)
        .args(["--format", "interview", "--no-open"])
        .env_remove("GOOGLE_API_KEY")
        .status()?;

    // Assert
    assert!(status.success(), "Render command should succeed");
    let html = fs::read_to_string(output.join("lesson.html"))?;
    assert!(html.contains("<h1>📘 Interview QnA Notes</h1>"));
    assert!(html.contains("<h2>Intro</h2>"));
    assert!(html.contains("<p>Learn <strong>Rust</strong></p>"));
    assert!(html.contains("<ol>\n<li>Install</li>\n<li>Build</li>\n</ol>"));
    assert!(html.contains("<pre><code class=\"language-bash\">cargo build</code></pre>"));

    Ok(())
}

/// Tests the notes name controls the output file name.
#[test]
fn test_render_command_custom_name_e2e() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    common::write_file(dir.path(), "in.md", "hello")?;
    let output = dir.path().join("out");

    // Act
    let out = Command::new(BIN)
        .arg("render")
        .arg(dir.path().join("in.md"))
        .args(["--name", "My Notes", "--title", "Custom Header", "--no-open", "-o"])
        .arg(&output)
        .output()?;

    // Assert
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout)?;
    assert!(stdout.contains("Generated:"));
    let html = fs::read_to_string(output.join("My Notes.html"))?;
    assert!(html.contains("<h1>Custom Header</h1>"));
    assert!(html.contains("<p>hello</p>"));

    Ok(())
}

/// Tests a missing input file fails validation.
#[test]
fn test_render_missing_file_fails_e2e() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;

    // Act
    let out = Command::new(BIN)
        .arg("render")
        .arg(dir.path().join("absent.md"))
        .arg("--no-open")
        .output()?;

    // Assert
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr)?;
    assert!(stderr.contains("Notes file does not exist"));

    Ok(())
}

/// Tests generate refuses to run without an API key.
#[test]
fn test_generate_without_api_key_fails_e2e() -> Result<()> {
    // Act
    let out = Command::new(BIN)
        .args(["generate", "abc123", "--no-open"])
        .env_remove("GOOGLE_API_KEY")
        .output()?;

    // Assert
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr)?;
    assert!(stderr.contains("Missing API key"));

    Ok(())
}
