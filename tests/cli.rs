#![cfg(all(feature = "svg", feature = "pngio"))]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32">
  <circle cx="16" cy="16" r="14" fill="#e63946"/>
</svg>"##;

fn generate_icons(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("generate-icons").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn no_arguments_renders_logo_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("logo.svg"), LOGO).unwrap();

    let output = generate_icons(dir.path()).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("  apple-touch-icon.png (180x180)\n"), "{}", stdout);
    assert!(stdout.contains("  favicon.ico\n"), "{}", stdout);
    assert!(stdout.contains("3. Generate ICNS: iconutil -c icns icon.iconset"),
            "{}",
            stdout);

    let expected = [
        "apple-touch-icon.png",
        "favicon-16x16.png",
        "favicon-192x192.png",
        "favicon-32x32.png",
        "favicon-96x96.png",
        "favicon.ico",
        "icon_1024x1024.png",
        "icon_128x128.png",
        "icon_16x16.png",
        "icon_256x256.png",
        "icon_32x32.png",
        "icon_512x512.png",
        "logo.svg",
    ];
    assert_eq!(file_names(dir.path()), expected);
}

#[test]
fn missing_logo_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();

    let output = generate_icons(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("SVG file logo.svg not found!"), "{}", stderr);
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn existing_outputs_survive_a_missing_logo() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("favicon.ico"), b"old").unwrap();

    generate_icons(dir.path()).assert().failure().code(1);
    assert_eq!(fs::read(dir.path().join("favicon.ico")).unwrap(), b"old");
}

#[test]
fn malformed_logo_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("logo.svg"), "<svg").unwrap();

    generate_icons(dir.path()).assert().failure().code(1);
    assert_eq!(file_names(dir.path()), ["logo.svg"]);
}

#[test]
fn flags_redirect_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("brand.svg"), LOGO).unwrap();

    generate_icons(dir.path())
        .args(["--input", "brand.svg", "--output-dir", "icons", "--quiet"])
        .assert()
        .success()
        .stdout("");
    assert_eq!(file_names(&dir.path().join("icons")).len(), 12);
}

#[test]
fn failure_is_reported_even_with_logging_off() {
    let dir = tempfile::tempdir().unwrap();

    let output = generate_icons(dir.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr, "error: SVG file logo.svg not found!\n");
}

#[test]
fn quiet_overrides_rust_log() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("logo.svg"), LOGO).unwrap();

    generate_icons(dir.path())
        .env("RUST_LOG", "info")
        .arg("-q")
        .assert()
        .success()
        .stdout("");
}
