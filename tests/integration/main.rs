//! Integration tests for Drydock

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;

    fn drydock() -> Command {
        cargo_bin_cmd!("drydock")
    }

    #[test]
    fn help_displays() {
        drydock()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "containerized build and release automation",
            ));
    }

    #[test]
    fn version_displays() {
        drydock()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("drydock"));
    }

    #[test]
    fn config_path() {
        drydock()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        drydock()
            .args(["--no-local", "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"));
    }

    #[test]
    fn status_runs() {
        // Status may report missing tools, but should not panic
        let _ = drydock().arg("status").assert();
    }

    #[test]
    fn completions_bash() {
        drydock()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("drydock"));
    }

    #[test]
    fn release_requires_part() {
        drydock().arg("release").assert().failure();
        drydock().args(["release", "micro"]).assert().failure();
    }

    #[test]
    fn sync_requires_project_layout() {
        let dir = tempfile::tempdir().unwrap();
        drydock()
            .args(["--no-local", "sync", "--project"])
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Expected exactly one"));
    }

    #[test]
    fn sync_normalizes_checkouts() {
        let dir = tempfile::tempdir().unwrap();
        let checkouts = dir.path().join(".build").join("checkouts");
        fs::create_dir_all(checkouts.join("Hello-1.0.3")).unwrap();

        let project = dir.path().join("App.xcodeproj");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("project.pbxproj"), "ref = Hello-1.0.3;").unwrap();

        drydock()
            .args(["--no-local", "sync", "--project"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("1 linked"));

        let rewritten = fs::read_to_string(project.join("project.pbxproj")).unwrap();
        assert_eq!(rewritten, "ref = Hello;");
        assert!(checkouts.join("Hello").symlink_metadata().is_ok());
    }

    #[test]
    fn clean_missing_bucket_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        drydock()
            .args(["--no-local", "clean", "--yes", "--project"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing to clean"));
    }

    #[test]
    fn build_help() {
        drydock()
            .args(["build", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("incremental containerized build"));
    }

    #[test]
    fn package_outside_repo_fails() {
        let dir = tempfile::tempdir().unwrap();
        drydock()
            .args(["--no-local", "package", "--project"])
            .arg(dir.path())
            .assert()
            .failure();
    }
}
