//! End-to-end tests of the termfolio binary

use predicates::prelude::*;

use crate::helpers::{TestEnv, FAST_CONFIG};

#[test]
fn help_lists_subcommands() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reset"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--replay"));
}

#[test]
fn version_flag_prints_version() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn plain_play_prints_sequence_hero_and_contact() {
    let env = TestEnv::with_config(FAST_CONFIG);
    env.cmd()
        .args(["play", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("guest@portfolio:~$"))
        .stdout(predicate::str::contains("[SUCCESS] ready"))
        .stdout(predicate::str::contains("> hi there"))
        .stdout(predicate::str::contains("$ mail: me@example.com"));
}

#[test]
fn second_run_skips_sequence_until_reset() {
    let env = TestEnv::with_config(FAST_CONFIG);

    env.cmd().arg("--plain").assert().success();
    assert!(
        std::fs::read_dir(env.session_dir()).unwrap().count() > 0,
        "first run should leave a session flag"
    );

    env.cmd()
        .arg("--plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("[SUCCESS] ready").not())
        .stdout(predicate::str::contains("> hi there"));

    env.cmd()
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session flag cleared"));

    env.cmd()
        .arg("--plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("[SUCCESS] ready"));
}

#[test]
fn replay_ignores_session_flag() {
    let env = TestEnv::with_config(FAST_CONFIG);
    env.cmd().arg("--plain").assert().success();

    env.cmd()
        .args(["--plain", "--replay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[SUCCESS] ready"));
}

#[test]
fn reset_without_flag_is_a_no_op() {
    let env = TestEnv::new();
    env.cmd()
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));
}

#[test]
fn steps_file_replaces_configured_sequence() {
    let env = TestEnv::with_config(FAST_CONFIG);
    let steps = env.write(
        "boot.json",
        r#"[{"type": "command", "text": "custom boot", "delay": 0}]"#,
    );

    env.cmd()
        .arg("--plain")
        .arg("--steps")
        .arg(&steps)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom boot"))
        .stdout(predicate::str::contains("[SUCCESS] ready").not());
}

#[test]
fn bad_steps_file_fails_with_context() {
    let env = TestEnv::with_config(FAST_CONFIG);
    let steps = env.write("boot.yaml", "- nope");

    env.cmd()
        .arg("--plain")
        .arg("--steps")
        .arg(&steps)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load steps"));
}

#[test]
fn config_path_honors_env_override() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains(
            env.path().to_string_lossy().into_owned(),
        ));
}

#[test]
fn config_show_prints_effective_values() {
    let env = TestEnv::with_config("[hero]\nper_char_ms = 20\n");
    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("per_char_ms = 20"))
        .stdout(predicate::str::contains("settle_ms = 1000"));
}

#[test]
fn invalid_config_is_reported() {
    let env = TestEnv::with_config("[hero\nbroken");
    env.cmd()
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn completions_are_generated() {
    let env = TestEnv::new();
    env.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("termfolio"));
}
