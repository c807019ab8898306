use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

fn run_with_log(args: &[&str], rust_log: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_maze-chase"));
    let _ = command.args(args).env_remove("RUST_LOG");
    if let Some(filter) = rust_log {
        let _ = command.env("RUST_LOG", filter);
    }
    command
        .output()
        .expect("failed to launch the maze-chase binary")
}

fn run(args: &[&str]) -> Output {
    run_with_log(args, None)
}

fn write_config(name: &str, contents: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::write(&path, contents).expect("config file is writable");
    path
}

#[test]
fn scripted_session_runs_until_the_countdown_expires() {
    let output = run(&["--moves", "UUUUUU", "--time-limit", "2"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.contains("score 30/3600  time 0s  lost: time expired"));
    assert!(stdout.ends_with("game over: time expired (score 30/3600)\n"));
}

#[test]
fn frame_limit_stops_a_running_session() {
    let output = run(&["--frames", "3"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.contains("stopped after 3 frames (score 0/3600)"));
}

#[test]
fn invalid_input_is_reported() {
    let bad_moves = run(&["--moves", "UX"]);
    assert!(!bad_moves.status.success());
    assert!(String::from_utf8_lossy(&bad_moves.stderr).contains("invalid --moves script"));

    let bad_limit = run(&["--time-limit", "0"]);
    assert!(!bad_limit.status.success());
    assert!(String::from_utf8_lossy(&bad_limit.stderr)
        .contains("time_limit_seconds must be positive"));
}

#[test]
fn disabled_countdown_without_frame_limit_is_rejected() {
    let path = write_config(
        "no_countdown.toml",
        "pursuer_period_ms = 0\ncountdown_period_ms = 0\n",
    );
    let config = path.to_str().expect("utf-8 path");

    let unbounded = run(&["--config", config]);
    assert!(!unbounded.status.success());
    assert!(String::from_utf8_lossy(&unbounded.stderr).contains("pass --frames"));

    let bounded = run(&["--config", config, "--frames", "5"]);
    assert!(bounded.status.success());
    assert!(String::from_utf8_lossy(&bounded.stdout).contains("stopped after 5 frames"));
}

#[test]
fn rust_log_overrides_the_default_level() {
    let quiet = run_with_log(&["--frames", "1"], Some("warn"));
    assert!(quiet.status.success());
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("starting session"));

    let chatty = run_with_log(&["--moves", "R", "--frames", "2"], Some("debug"));
    assert!(chatty.status.success());
    assert!(String::from_utf8_lossy(&chatty.stderr).contains("player direction requested"));

    let default = run(&["--frames", "1"]);
    assert!(String::from_utf8_lossy(&default.stderr).contains("starting session"));
}
