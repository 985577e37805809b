use std::collections::BTreeSet;
use std::process::{Command, Output};

fn tgoopt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tgoopt"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run tgoopt")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

/// The `key=value` lines tgoopt prints after a successful parse.
fn state(args: &[&str]) -> Vec<String> {
    let out = tgoopt(args);
    assert_eq!(out.status.code(), Some(0), "tgoopt {:?}: {}", args, stdout(&out));
    stdout(&out).lines().map(String::from).collect()
}

#[test]
fn defaults() {
    assert_eq!(
        state(&[]),
        vec![
            "happy=false",
            "name=anonymous",
            "sound=BOO!",
            "speed=slow",
            "list=",
            "verbose=false",
            "a=false",
            "c=false",
            "args=",
        ]
    );
}

#[test]
fn cluster_equals_separate_flags() {
    assert_eq!(
        state(&["-acb", "X", "file"]),
        state(&["-a", "-c", "-b", "X", "file"])
    );
    let s = state(&["-acb", "X", "file"]);
    assert!(s.contains(&"a=true".to_string()));
    assert!(s.contains(&"c=true".to_string()));
    assert!(s.contains(&"sound=X".to_string()));
    assert!(s.contains(&"args=file".to_string()));
}

#[test]
fn long_value_forms() {
    assert_eq!(state(&["--name=Alice"]), state(&["--name", "Alice"]));
}

#[test]
fn repeated_and_enumerated() {
    let s = state(&["-l", "x", "--list", "y", "--list=z", "--velocity", "fast", "-u"]);
    assert!(s.contains(&"list=x,y,z".to_string()));
    assert!(s.contains(&"speed=fast".to_string()));
    assert!(s.contains(&"happy=false".to_string()));
}

#[test]
fn separator() {
    let s = state(&["--happy", "--", "--name", "-x", "--"]);
    assert!(s.contains(&"happy=true".to_string()));
    assert!(s.contains(&"name=anonymous".to_string()));
    assert!(s.contains(&"args=--name -x --".to_string()));
}

#[test]
fn help_lists_every_name() {
    let out = tgoopt(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.starts_with("Usage of tgoopt:\n\tsilly test program\nOptions:\n"));
    for name in [
        "-h", "--happy", "-u", "--unhappy", "--sad", "--name", "-b", "--speed",
        "--velocity", "--list", "-l", "--verbose", "-a", "-c", "--help",
    ] {
        assert!(text.contains(name), "{} missing from help", name);
    }
    assert!(text.contains("pick your scary sound (default BOO!)"));
    assert!(text.contains("--speed, --velocity=[slow|medium|fast]"));
}

#[test]
fn bad_flag_exits_1() {
    let out = tgoopt(&["--happy", "--bogus"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.starts_with("Usage of tgoopt:"));
    assert!(text.trim_end().ends_with("Bad flag: --bogus"));
    assert!(!text.contains("happy=true"));
}

#[test]
fn invalid_choice_exits_1() {
    let out = tgoopt(&["--speed", "warp"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out)
        .trim_end()
        .ends_with("Error in flag --speed: invalid choice: warp"));
}

#[test]
fn invalid_choice_before_help_exits_1() {
    let out = tgoopt(&["--speed", "warp", "--help"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out)
        .trim_end()
        .ends_with("Error in flag --speed: invalid choice: warp"));
}

#[test]
fn missing_argument_exits_1() {
    let out = tgoopt(&["--name"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out)
        .trim_end()
        .ends_with("Flag --name requires argument!"));
}

#[test]
fn list_options_round_trip() {
    let out = tgoopt(&["--list-options"]);
    assert_eq!(out.status.code(), Some(0));
    let got: BTreeSet<String> = stdout(&out).lines().map(String::from).collect();
    let expected: BTreeSet<String> = [
        "help", "-h", "--happy", "-u", "--unhappy", "--sad", "--name", "-b", "--speed",
        "--velocity", "--list", "-l", "--verbose", "-a", "-c", "--help",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    assert_eq!(got, expected);
}

#[test]
fn manpage() {
    let out = tgoopt(&["--create-man"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.starts_with(".TH \"tgoopt\" 1 \""));
    assert!(text.contains("\"goopt 0.1.0\" \"goopt\"\n"));
    assert!(text.contains(".SH NAME\ntgoopt \\- silly test program\n"));
    assert!(text.contains(".SH DESCRIPTION\nExercises the goopt option parser.\n.PP\n"));
    assert!(text.contains(".TP\n\\-b BOO!\npick your scary sound (default BOO!)\n"));
    assert!(text.ends_with(".SH AUTHOR\nThe goopt authors\n"));
}

#[test]
fn logging_stays_off_stdout() {
    let out = Command::new(env!("CARGO_BIN_EXE_tgoopt"))
        .args(["-a", "--name", "Z"])
        .env("RUST_LOG", "goopt=trace")
        .output()
        .expect("failed to run tgoopt");
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.lines().all(|l| l.contains('=')));
    assert!(String::from_utf8_lossy(&out.stderr).contains("applying option"));
}
