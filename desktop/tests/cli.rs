use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn write_input(name: &str, bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("img2sprite-{}-{}.raw", std::process::id(), name));
    std::fs::write(&path, bytes).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_img2sprite"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_all_red_sprite() {
    let path = write_input("red", &[0xFF, 0x00, 0x00].repeat(64));
    let output = run(&[path.to_str().unwrap()]);
    assert!(output.status.success());

    let expected = format!("{{{}}}", vec!["00F8"; 64].join(", "));
    assert_eq!(stdout(&output).trim_end(), expected);
    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_primary_colors_in_order() {
    let mut bytes = Vec::new();
    for pixel in [[255, 255, 255], [0, 0, 0], [255, 0, 0], [0, 255, 0], [0, 0, 255], [0, 0, 0]] {
        bytes.extend_from_slice(&pixel);
    }
    let path = write_input("primaries", &bytes);
    let output = run(&["--width", "3", "--height", "2", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim_end(),
        "{FFFF, 0000, 00F8, E007, 1F00, 0000}"
    );
    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_token_count_matches_pixels() {
    let bytes: Vec<u8> = (0..192u32).map(|v| (v * 13) as u8).collect();
    let path = write_input("tokens", &bytes);
    let output = run(&[path.to_str().unwrap()]);
    assert!(output.status.success());

    let out = stdout(&output);
    let inner = out.trim_end().strip_prefix('{').unwrap().strip_suffix('}').unwrap();
    let tokens: Vec<&str> = inner.split(", ").collect();
    assert_eq!(tokens.len(), 64);
    assert!(tokens.iter().all(|t| t.len() == 4
        && t.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_wrong_size_fails_without_literal() {
    let path = write_input("short", &[1, 2, 3, 4]);
    let output = run(&[path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(!stdout(&output).contains('{'));
    assert!(String::from_utf8_lossy(&output.stderr).contains("192"));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_missing_file_fails() {
    let path = std::env::temp_dir().join("img2sprite-does-not-exist.raw");
    let output = run(&[path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("file access error"));
}

#[test]
fn test_missing_argument_fails() {
    let output = run(&[]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing input file"));
}

#[test]
fn test_zero_width_rejected() {
    let path = write_input("zero", &[]);
    let output = run(&["-w", "0", path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_closed_stdout_fails_without_panic() {
    // 240 KB of output cannot fit in a pipe buffer, so the write hits the closed reader.
    let path = write_input("pipe", &vec![0x80; 200 * 200 * 3]);
    let mut child = Command::new(env!("CARGO_BIN_EXE_img2sprite"))
        .args(["-w", "200", "-H", "200", path.to_str().unwrap()])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    drop(child.stdout.take());

    let output = child.wait_with_output().unwrap();
    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("panicked"));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn test_oversized_input_is_rejected() {
    let path = write_input("long", &[0u8; 193]);
    let output = run(&[path.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("larger than the expected 192 bytes"));
    std::fs::remove_file(path).unwrap();
}
