//! CLI arg parsing tests for threatwatch (client)

use assert_cmd::Command;

#[test]
fn test_help_mentions_flags_and_endpoint_shape() {
    let out = Command::cargo_bin("threatwatch")
        .expect("binary")
        .arg("--help")
        .output()
        .expect("run threatwatch --help");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(
        text.contains("--profile")
            && text.contains("-P")
            && text.contains("--demo")
            && text.contains("--dry-run"),
        "help text missing expected flags\n{text}"
    );
    assert!(text.contains("ws://"), "help should show the endpoint shape\n{text}");
}

#[test]
fn test_invalid_endpoint_is_reported_not_panicked() {
    let out = Command::cargo_bin("threatwatch")
        .expect("binary")
        .args(["not a url", "--dry-run"])
        .output()
        .expect("run threatwatch");
    assert!(out.status.success(), "bad URL must exit cleanly");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(text.contains("Invalid endpoint URL"), "{text}");
}

#[test]
fn test_dry_run_reports_env_fallback() {
    let out = Command::cargo_bin("threatwatch")
        .expect("binary")
        .arg("--dry-run")
        .env("THREATWATCH_URL", "ws://envhost:9000/ws")
        // Keep any real profiles out of the way.
        .env("XDG_CONFIG_HOME", std::env::temp_dir())
        .output()
        .expect("run threatwatch");
    let text = String::from_utf8_lossy(&out.stdout).to_string();
    assert!(
        text.contains("ws://envhost:9000/ws"),
        "env endpoint not resolved: {text}"
    );
}
