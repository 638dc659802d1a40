use std::{ fs, path::Path, process::{ Command, Output } };
use tempfile::TempDir;

fn stabsynth(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stabsynth"))
        .args(args)
        .output()
        .unwrap()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn synthesize_then_verify() {
    let dir = TempDir::new().unwrap();
    let stabs = write(&dir, "code.stab", "# [[5,1,3]] + logical Z\nXZZXI\nIXZZX\nXIXZZ\nZXIXZ\nZZZZZ\n");
    let circuit = dir.path().join("code.circ");

    let out = stabsynth(&[Path::new("synthesize"), &stabs, &circuit]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = fs::read_to_string(&circuit).unwrap();
    assert!(text.lines().all(|l| ["H ", "S ", "CX "].iter().any(|g| l.starts_with(g))));

    let out = stabsynth(&[Path::new("verify"), &circuit, &stabs]);
    assert!(out.status.success());
    let report = String::from_utf8_lossy(&out.stdout);
    assert_eq!(report.lines().count(), 5);
    assert!(report.lines().all(|l| l.ends_with(" preserved") && !l.contains("NOT")));
}

#[test]
fn synthesize_to_stdout() {
    let dir = TempDir::new().unwrap();
    let stabs = write(&dir, "plus.stab", "X\n");
    let out = stabsynth(&[Path::new("synthesize"), &stabs]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "H 0\n");

    let stabs = write(&dir, "zero.stab", "Z\n");
    let out = stabsynth(&[Path::new("synthesize"), &stabs]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn failed_verification_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let circuit = write(&dir, "bell.circ", "H 0\nCX 0 1\n");
    let stabs = write(&dir, "bell.stab", "XX\n-ZZ\n");
    let out = stabsynth(&[Path::new("verify"), &circuit, &stabs]);
    assert_eq!(out.status.code(), Some(1));
    let report = String::from_utf8_lossy(&out.stdout);
    assert!(report.contains("1 -ZZ NOT preserved"));
}

#[test]
fn error_codes_on_stderr() {
    let dir = TempDir::new().unwrap();
    let cases = [
        ("bad.stab", "XQ\n", "error[parse]"),
        ("anti.stab", "X\nZ\n", "error[anticommuting]"),
        ("sign.stab", "XX\nZZ\nYY\n", "error[inconsistent-signs]"),
    ];
    for (name, contents, code) in cases {
        let stabs = write(&dir, name, contents);
        let out = stabsynth(&[Path::new("synthesize"), &stabs]);
        assert_eq!(out.status.code(), Some(1), "{name}");
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains(code), "{name}: {stderr}");
    }

    let missing = dir.path().join("missing.stab");
    let out = stabsynth(&[Path::new("synthesize"), &missing]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error[io]"));

    let z = write(&dir, "z.stab", "Z\n");
    for (name, contents) in [
        ("huge.circ", "H 18446744073709551615\n"),
        ("wide.circ", "H 100000000\n"),
    ] {
        let circ = write(&dir, name, contents);
        let out = stabsynth(&[Path::new("verify"), &circ, &z]);
        assert_eq!(out.status.code(), Some(1), "{name}");
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("error[parse]"), "{name}: {stderr}");
    }
}

#[test]
fn strict_and_trial_flags() {
    let dir = TempDir::new().unwrap();
    let stabs = write(&dir, "dup.stab", "XX\nZZ\n-YY\n");
    let out = stabsynth(&[Path::new("synthesize"), &stabs]);
    assert!(out.status.success());
    let out = stabsynth(&[Path::new("synthesize"), &stabs, Path::new("--strict")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error[dependent]"));

    let stabs = write(&dir, "yy.stab", "YY\n");
    let out = stabsynth(&[
        Path::new("synthesize"), &stabs, Path::new("--max-trials"), Path::new("0"),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error[incomplete]"));
    let out = stabsynth(&[
        Path::new("synthesize"), &stabs, Path::new("--seed"), Path::new("7"),
    ]);
    assert!(out.status.success());
}
