/// Run the `scrip` binary on small scripts and check what it prints.
///
/// Every test works in its own temporary directory and passes `-f` so that no
/// `.scriprc` from the environment is picked up.

use std::path::Path;
use std::process::{Command, Output};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn scrip_binary() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_scrip"))
}

fn run_scrip(dir: &Path, args: &[&str]) -> Output {
    Command::new(scrip_binary())
        .current_dir(dir)
        .env_remove("SCRIP_BASEDIR")
        .arg("-f")
        .args(args)
        .output()
        .expect("failed to spawn scrip binary")
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout).lines().map(str::to_owned).collect()
}

fn write(dir: &Path, name: &str, text: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, text).unwrap();
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn prints_one_token_per_line() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "model.qc", "$modelname \"hero model\" // name\n$scale 1.5\n");
    let out = run_scrip(dir.path(), &["model.qc"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(stdout_lines(&out), ["$modelname", "hero model", "$scale", "1.5"]);
}

#[test]
fn command_text_is_tokenized() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_scrip(dir.path(), &["-c", "$definevariable v 7\nx$v$ y"]);
    assert!(out.status.success());
    assert_eq!(stdout_lines(&out), ["x7", "y"]);
}

#[test]
fn locations_prefix_origin_and_line() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", "one\n\ntwo\n");
    let out = run_scrip(dir.path(), &["-l", "a.txt"]);
    assert_eq!(stdout_lines(&out), ["a.txt:1:one", "a.txt:3:two"]);
}

#[test]
fn expression_mode() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_scrip(dir.path(), &["-e", "-c", "w = (a+b)*2.5"]);
    assert_eq!(stdout_lines(&out), ["w", "=", "(", "a", "+", "b", ")", "*", "2.5"]);
}

#[test]
fn dependency_tree() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "main.txt", "$include lib/a.txt\n$include lib/b.txt\n");
    write(dir.path(), "lib/a.txt", "$include lib/c.txt\n");
    write(dir.path(), "lib/b.txt", "b\n");
    write(dir.path(), "lib/c.txt", "c\n");
    let out = run_scrip(dir.path(), &["-D", "main.txt"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        stdout_lines(&out),
        ["main.txt", "  lib/a.txt", "    lib/c.txt", "  lib/b.txt"]
    );
}

#[test]
fn base_dir_flag_resolves_includes() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shared/defs.txt", "$definevariable root /game\n");
    write(dir.path(), "main.txt", "$include defs.txt\n$root$/maps\n");
    let base = dir.path().join("shared");
    let base = base.to_str().unwrap();
    let out = run_scrip(dir.path(), &["-L", base, "main.txt"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(stdout_lines(&out), ["/game/maps"]);
}

#[test]
fn fatal_error_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.txt", "fine\nx$undefined$\n");
    let out = run_scrip(dir.path(), &["bad.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout_lines(&out), ["fine"]);
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.starts_with("scrip: bad.txt:2:"), "{err}");
    assert!(err.contains("undefined"), "{err}");
}

#[test]
fn missing_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_scrip(dir.path(), &["absent.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("absent.txt"));
}

#[test]
fn usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_scrip(dir.path(), &["-z", "x"]);
    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("unknown option"), "{err}");
    assert!(err.contains("Usage:"), "{err}");
}

#[test]
fn explicit_config_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "limits.rc", "; tight limits\n/set maxtoken=4\n");
    write(dir.path(), "long.txt", "ok toolong\n");
    let out = Command::new(scrip_binary())
        .current_dir(dir.path())
        .env_remove("SCRIP_BASEDIR")
        .args(["-flimits.rc", "long.txt"])
        .output()
        .expect("failed to spawn scrip binary");
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout_lines(&out), ["ok"]);
    assert!(String::from_utf8_lossy(&out.stderr).contains("token"));
}
