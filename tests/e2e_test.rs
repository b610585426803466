/// End-to-end tests for the CLI
mod exit_code_tests {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    /// Exit code 0: help output
    #[test]
    fn test_help_exits_zero() {
        cargo_bin_cmd!("sln-diagram")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--solution"))
            .stdout(predicate::str::contains("--target-framework"));
    }

    /// Exit code 0: version output
    #[test]
    fn test_version_exits_zero() {
        cargo_bin_cmd!("sln-diagram")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("sln-diagram"));
    }

    /// Exit code 2: invalid arguments are rejected by the parser
    #[test]
    fn test_unknown_flag_exits_two() {
        cargo_bin_cmd!("sln-diagram")
            .arg("--no-such-flag")
            .assert()
            .code(2);
    }

    #[test]
    fn test_invalid_direction_exits_two() {
        cargo_bin_cmd!("sln-diagram")
            .args(["--direction", "sideways"])
            .assert()
            .code(2);
    }

    #[test]
    fn test_invalid_image_format_exits_two() {
        cargo_bin_cmd!("sln-diagram")
            .args(["--image-format", "bmp"])
            .assert()
            .code(2);
    }

    /// Exit code 1: an empty configuration fails validation
    #[test]
    fn test_missing_configuration_exits_one() {
        cargo_bin_cmd!("sln-diagram")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("solution path"));
    }

    /// Exit code 1: unreadable configuration file
    #[test]
    fn test_missing_config_file_exits_one() {
        cargo_bin_cmd!("sln-diagram")
            .args(["--config", "/nonexistent/generator.config.json"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to read config file"));
    }
}
