use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn ffind(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ffind"))
        .args(args)
        .output()
        .expect("run ffind")
}

fn stdout_paths(output: &Output) -> BTreeSet<PathBuf> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(PathBuf::from)
        .collect()
}

#[test]
fn prints_matches_and_summary() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    fs::write(root.join("a.c"), "").unwrap();
    fs::write(root.join("b.txt"), "").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("a.c"), "").unwrap();

    let output = ffind(&[root.as_os_str(), OsStr::new("a"), OsStr::new("-t"), OsStr::new("2")]);

    assert!(
        output.status.success(),
        "ffind failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout_paths(&output),
        BTreeSet::from([root.join("a.c"), root.join("sub").join("a.c")])
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Found 2 match(es)"), "got: {stderr}");
    assert!(stderr.contains("Scanned 2 dirs, 3 files"), "got: {stderr}");
    assert!(stderr.contains("Threads: 2"), "got: {stderr}");
    assert!(stderr.contains("Time: "), "got: {stderr}");
}

#[cfg(unix)]
#[test]
fn non_utf8_names_are_printed_verbatim() {
    use std::os::unix::ffi::OsStrExt;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    let name = OsStr::from_bytes(b"caf\xe9.txt");
    if fs::write(root.join(name), "").is_err() {
        // Filesystem insists on UTF-8 names.
        return;
    }

    let output = ffind(&[root.as_os_str(), OsStr::new("caf")]);
    assert!(output.status.success());

    let printed: Vec<PathBuf> = output
        .stdout
        .split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| PathBuf::from(OsStr::from_bytes(line)))
        .collect();
    assert_eq!(printed, [root.join(name)]);
    assert!(printed[0].exists());
}

#[test]
fn zero_matches_is_success() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    fs::write(tmp.path().join("x.rs"), "").unwrap();

    let output = ffind(&[tmp.path().as_os_str(), OsStr::new("nothing-here")]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Found 0 match(es)"));
}

#[test]
fn extension_filter_and_empty_needle() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    fs::write(root.join("keep.C"), "").unwrap();
    fs::write(root.join("keep.h"), "").unwrap();
    fs::write(root.join("drop.cpp"), "").unwrap();

    let output = ffind(&[root.as_os_str(), OsStr::new(""), OsStr::new("-e"), OsStr::new("c, h")]);

    assert!(output.status.success());
    assert_eq!(
        stdout_paths(&output),
        BTreeSet::from([root.join("keep.C"), root.join("keep.h")])
    );
}

#[test]
fn bad_thread_count_falls_back_to_cpus() {
    let tmp = tempfile::tempdir().expect("create temp dir");

    let output = ffind(&[tmp.path().as_os_str(), OsStr::new("x"), OsStr::new("-t"), OsStr::new("many")]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Threads: 0"), "got: {stderr}");
}

#[test]
fn missing_arguments_exit_2() {
    let output = ffind(&[OsStr::new("only-root")]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn unknown_flag_exits_2() {
    let tmp = tempfile::tempdir().expect("create temp dir");

    let output = ffind(&[tmp.path().as_os_str(), OsStr::new("x"), OsStr::new("-z")]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
