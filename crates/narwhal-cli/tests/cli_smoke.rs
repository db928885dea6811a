use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("cards").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    let output = Command::new(exe).args(args).output().expect("run narwhal-cli");
    assert!(output.status.success(), "narwhal-cli failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn cli_lays_out_fixture_as_json() {
    let path = fixture("genre_card.json");
    let value = run_json(&["layout", path.to_string_lossy().as_ref()]);

    let placed = value["placed"].as_array().expect("placed array");
    assert!(!placed.is_empty());
    assert_eq!(placed[0]["image_id"], "artist_large");
    assert!(value["reserved"]["height"].as_f64().unwrap() > 0.0);
}

#[test]
fn cli_layout_is_deterministic_with_index_override() {
    let path = fixture("crowded.json");
    let p = path.to_string_lossy().to_string();
    let a = run_json(&["layout", "--index", "11", &p]);
    let b = run_json(&["layout", "--index", "11", &p]);
    assert_eq!(a, b);

    let total = a["placed"].as_array().unwrap().len() + a["dropped"].as_array().unwrap().len();
    assert_eq!(total, 8);
}

#[test]
fn cli_renders_svg_to_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("card.svg");
    let path = fixture("genre_card.json");

    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    Command::new(exe)
        .args([
            "render",
            "--id",
            "genre",
            "--out",
            out.to_string_lossy().as_ref(),
            path.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"id="genre""#));
    assert!(svg.contains("<circle "));
}

#[test]
fn cli_reports_tilted_positions() {
    let path = fixture("genre_card.json");
    let p = path.to_string_lossy().to_string();

    let still = run_json(&["parallax", "--roll", "0.5", "--pitch", "-0.5", "--inactive", &p]);
    for b in still.as_array().unwrap() {
        assert_eq!(b["center"], b["tilted"]);
    }

    let moved = run_json(&["parallax", "--roll", "0.5", "--pitch", "0", &p]);
    let first = &moved.as_array().unwrap()[0];
    assert!(first["tilted"]["x"].as_f64().unwrap() > first["center"]["x"].as_f64().unwrap());
}

#[test]
fn cli_reads_stdin_and_rejects_bad_input() {
    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    assert_cmd::Command::new(exe)
        .arg("layout")
        .write_stdin(r#"{"container":{"width":200,"height":200},"specs":[]}"#)
        .assert()
        .success();

    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    assert_cmd::Command::new(exe)
        .arg("layout")
        .write_stdin("not json")
        .assert()
        .failure()
        .code(1);

    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    Command::new(exe).arg("--bogus").assert().failure().code(2);
}
