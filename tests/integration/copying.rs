use anyhow::Result;
use specrunner_cli::copier::DirectoryCopier;
use specrunner_cli::core::{FsOperation, RunnerError};
use specrunner_cli::test_utils::TestEnvironment;

#[test]
fn test_copy_directory_on_disk() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.create_file("src/main/javascript/app.js", "app")?;
    env.create_file("src/main/javascript/notes.txt", "notes")?;
    env.create_file("src/main/javascript/.secret.js", "hidden")?;
    env.create_file("src/main/javascript/models/user.js", "user")?;
    env.create_file("src/main/javascript/.cache/cached.js", "cached")?;
    let destination = env.project_path().join("target/staged");

    DirectoryCopier::new().copy_directory(&env.source_dir, &destination, ".js")?;

    assert_eq!(std::fs::read_to_string(destination.join("app.js"))?, "app");
    assert_eq!(std::fs::read_to_string(destination.join("models/user.js"))?, "user");
    assert!(!destination.join("notes.txt").exists());
    assert!(!destination.join(".secret.js").exists());
    assert!(!destination.join(".cache").exists());
    assert!(env.source_dir.join("notes.txt").exists(), "source must be left untouched");
    Ok(())
}

#[test]
fn test_copy_directory_into_itself_subdirectory() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.create_file("src/main/javascript/app.js", "app")?;
    let destination = env.source_dir.join("staged");

    DirectoryCopier::new().copy_directory(&env.source_dir, &destination, ".js")?;

    assert!(destination.join("app.js").exists());
    assert!(!destination.join("staged").exists());
    Ok(())
}

#[test]
fn test_copy_directory_missing_source() -> Result<()> {
    let env = TestEnvironment::new()?;

    let error = DirectoryCopier::new()
        .copy_directory(&env.project_path().join("nope"), &env.project_path().join("out"), ".js")
        .unwrap_err();

    assert!(matches!(
        error,
        RunnerError::Io {
            operation: FsOperation::Copy,
            ..
        }
    ));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_copy_directory_follows_symlinks() -> Result<()> {
    use std::os::unix::fs::symlink;

    let env = TestEnvironment::new()?;
    let shared = env.create_file("shared/util.js", "util")?;
    env.create_file("src/main/javascript/app.js", "app")?;
    symlink(&shared, env.source_dir.join("linked.js"))?;
    let destination = env.project_path().join("target/staged");

    DirectoryCopier::new().copy_directory(&env.source_dir, &destination, ".js")?;

    assert_eq!(std::fs::read_to_string(destination.join("linked.js"))?, "util");
    assert_eq!(std::fs::read_to_string(destination.join("app.js"))?, "app");
    Ok(())
}
