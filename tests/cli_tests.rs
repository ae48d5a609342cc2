#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn packager(work: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("release_packager").unwrap();
        for key in [
            "RELEASE_PACKAGER_CONFIG",
            "RELEASE_PACKAGER_REPO_NAME",
            "RELEASE_PACKAGER_REPO_URL",
            "RELEASE_PACKAGER_BUCKET_TEMPLATE",
            "RELEASE_PACKAGER_REGION",
            "RELEASE_PACKAGER_USE_SSH_CONFIG",
        ] {
            cmd.env_remove(key);
        }
        cmd.arg("--work-dir").arg(work.path());
        cmd
    }

    #[test]
    fn test_help_lists_commands() {
        let work = TempDir::new().unwrap();
        packager(&work)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("package"))
            .stdout(predicate::str::contains("push"))
            .stdout(predicate::str::contains("deploy"));
    }

    #[test]
    fn test_deploy_rejects_invalid_destination_before_work() {
        let work = TempDir::new().unwrap();
        packager(&work)
            .args(["deploy", "1.0.0", "--dest", "production", "--yes"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid destination on s3"));
        assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_package_rejects_option_like_version() {
        let work = TempDir::new().unwrap();
        packager(&work)
            .args(["package", "--", "-c"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid version"));
        assert_eq!(std::fs::read_dir(work.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_push_missing_tarball_fails() {
        let work = TempDir::new().unwrap();
        let tarball = work.path().join("1_0_0.tar.gz");
        packager(&work)
            .arg("push")
            .arg(&tarball)
            .args(["1.0.0", "releases", "--yes"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not found"))
            .stderr(predicate::str::contains("cannot be undone"));
    }

    #[test]
    fn test_push_declined_without_yes() {
        let work = TempDir::new().unwrap();
        let tarball = work.path().join("1_0_0.tar.gz");
        std::fs::write(&tarball, b"archive").unwrap();
        packager(&work)
            .arg("push")
            .arg(&tarball)
            .args(["1.0.0", "releases"])
            .write_stdin("n\n")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not confirmed"));
        assert!(tarball.exists());
    }

    #[test]
    fn test_bad_config_file_is_reported() {
        let work = TempDir::new().unwrap();
        let config = work.path().join("packager.toml");
        std::fs::write(&config, "bucket_template = \"s3://bucket/{dest}\"\n").unwrap();
        packager(&work)
            .arg("--config")
            .arg(&config)
            .args(["package", "1.0.0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("bucket_template"));
    }
}
