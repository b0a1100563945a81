use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use specrunner_cli::test_utils::TestEnvironment;

fn specrunner(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("specrunner").unwrap();
    cmd.current_dir(env.project_path()).env_remove("SPECRUNNER_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_generate_writes_default_outputs() -> Result<()> {
    let env = TestEnvironment::with_basic_project()?;

    specrunner(&env)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("SpecRunner.html"))
        .stdout(predicate::str::contains("ManualSpecRunner.html"));

    let headless = env.read_file("target/jasmine/SpecRunner.html")?;
    assert!(headless.starts_with("<!DOCTYPE html>"));
    assert!(headless.contains("new jasmine.JsApiReporter()"));
    assert!(headless.contains("charset=UTF-8"));
    assert!(env.read_file("target/jasmine/ManualSpecRunner.html")?.contains("TrivialReporter"));
    Ok(())
}

#[test]
fn test_generate_stdout() -> Result<()> {
    let env = TestEnvironment::with_basic_project()?;

    specrunner(&env)
        .args(["generate", "--stdout", "--reporter", "js-api"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("JsApiReporter"))
        .stdout(predicate::str::contains("PlayerSpec.js"));

    assert!(!env.file_exists("target/jasmine"));
    Ok(())
}

#[test]
fn test_generate_output_dir_override() -> Result<()> {
    let env = TestEnvironment::with_basic_project()?;

    specrunner(&env).args(["generate", "--output-dir", "build/runners"]).assert().success();

    assert!(env.file_exists("build/runners/SpecRunner.html"));
    assert!(!env.file_exists("target/jasmine/SpecRunner.html"));
    Ok(())
}

#[test]
fn test_generate_with_config_from_env() -> Result<()> {
    let env = TestEnvironment::with_basic_project()?;
    let elsewhere = env.temp_dir.path();

    specrunner(&env)
        .current_dir(elsewhere)
        .env("SPECRUNNER_CONFIG", env.project_path().join("specrunner.toml"))
        .arg("generate")
        .assert()
        .success();

    assert!(env.file_exists("target/jasmine/SpecRunner.html"));
    Ok(())
}

#[test]
fn test_generate_without_config_fails() -> Result<()> {
    let env = TestEnvironment::new()?;

    specrunner(&env)
        .arg("generate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("specrunner init"));
    Ok(())
}

#[test]
fn test_generate_invalid_pattern_fails() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_config("source-dir = \"src/main/javascript\"\ninclude = \"lib/[\"\n")?;

    specrunner(&env)
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid file pattern 'lib/['"));
    Ok(())
}

#[test]
fn test_generate_template_error_fails() -> Result<()> {
    let env = TestEnvironment::with_basic_project()?;
    env.create_file("broken.html", "{{ sources ")?;
    env.write_config(&format!("custom-template = \"broken.html\"\n{}", TestEnvironment::basic_config()))?;

    specrunner(&env)
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Runner template error"));
    Ok(())
}

#[test]
fn test_copy_command() -> Result<()> {
    let env = TestEnvironment::with_basic_project()?;
    env.create_file("src/main/javascript/notes.txt", "notes")?;

    specrunner(&env)
        .args(["copy", "src/main/javascript", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied"));

    assert!(env.file_exists("out/player.js"));
    assert!(!env.file_exists("out/notes.txt"));
    Ok(())
}

#[test]
fn test_init_then_generate() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.create_file("src/main/javascript/app.js", "//")?;

    specrunner(&env)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized specrunner.toml"));
    specrunner(&env).arg("init").assert().failure().stderr(predicate::str::contains("--force"));
    specrunner(&env).arg("generate").assert().success();

    assert!(env.read_file("target/jasmine/SpecRunner.html")?.contains("app.js"));
    Ok(())
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("specrunner")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("copy"))
        .stdout(predicate::str::contains("init"));
}
