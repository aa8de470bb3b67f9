//! Black-box tests of the `artsearch` binary.
//!
//! Every invocation points --data-dir at an empty temp dir, so the hash
//! embedder is the best available backend and nothing touches the real
//! model directory.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn base_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("artsearch"));
    cmd.arg("--data-dir").arg(data_dir);
    for name in [
        "ARTSEARCH_CATALOG",
        "ARTSEARCH_FIELDS",
        "ARTSEARCH_EMBEDDER",
        "ARTSEARCH_TOP_K",
    ] {
        cmd.env_remove(name);
    }
    cmd
}

fn write_catalog(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("catalog.csv");
    fs::write(
        &path,
        "catalogF,title,year,season,medium,hue,place\n\
         F454,Sunflowers,1888,summer,oil on canvas,yellow,Arles\n\
         F612,The Starry Night,1889,spring,oil on canvas,blue,Saint-Remy\n\
         F482,Bedroom in Arles,1888,autumn,oil on canvas,red,Arles\n",
    )
    .unwrap();
    path
}

#[test]
fn search_robot_emits_ranked_json() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    let output = base_cmd(dir.path())
        .args(["search", "sunflowers yellow summer", "--robot", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .get_output()
        .clone();

    let v: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["query"], "sunflowers yellow summer");
    assert_eq!(v["embedder"]["id"], "fnv1a-384");
    assert_eq!(v["total_records"], 3);

    let results = v["results"].as_array().unwrap();
    assert!(!results.is_empty());
    assert!(results.len() <= 5);
    assert_eq!(results[0]["title"], "Sunflowers");
    assert_eq!(results[0]["position"], 0);
    assert!(results[0]["similarity"].as_f64().unwrap() > 0.0);

    let sims: Vec<f64> = results
        .iter()
        .map(|r| r["similarity"].as_f64().unwrap())
        .collect();
    assert!(sims.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn search_human_output_lists_titles() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    base_cmd(dir.path())
        .args(["search", "sunflowers yellow summer", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(contains("Results for"))
        .stdout(contains("Sunflowers"))
        .stdout(contains("[similarity:"));
}

#[test]
fn search_fails_without_catalog() {
    let dir = TempDir::new().unwrap();

    base_cmd(dir.path())
        .args(["search", "sunflowers"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("no catalog configured"))
        .stderr(contains("--catalog"));
}

#[test]
fn search_rejects_top_k_zero() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    base_cmd(dir.path())
        .args(["search", "sunflowers", "-k", "0", "--catalog"])
        .arg(&catalog)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("top_k must be at least 1"));
}

#[test]
fn search_reports_missing_catalog_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.csv");

    base_cmd(dir.path())
        .args(["search", "sunflowers", "--catalog"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(contains("nope.csv"));
}

#[test]
fn search_honors_env_catalog_and_top_k() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    let output = base_cmd(dir.path())
        .args(["search", "oil on canvas", "--robot"])
        .env("ARTSEARCH_CATALOG", &catalog)
        .env("ARTSEARCH_TOP_K", "2")
        .assert()
        .success()
        .get_output()
        .clone();

    let v: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["results"].as_array().unwrap().len(), 2);
}

#[test]
fn fields_flag_changes_what_is_embedded() {
    let dir = TempDir::new().unwrap();
    let catalog = dir.path().join("hues.csv");
    fs::write(
        &catalog,
        "title,hue\nRed Vineyard,blue\nBlue Irises,red\n",
    )
    .unwrap();

    let top_title = |fields: &str| -> String {
        let output = base_cmd(dir.path())
            .args(["search", "blue", "--robot", "--fields", fields, "--catalog"])
            .arg(&catalog)
            .assert()
            .success()
            .get_output()
            .clone();
        let v: Value = serde_json::from_slice(&output.stdout).unwrap();
        v["results"][0]["title"].as_str().unwrap().to_string()
    };

    assert_eq!(top_title("title"), "Blue Irises");
    assert_eq!(top_title("hue"), "Red Vineyard");
}

#[test]
fn explicit_minilm_without_model_files_is_actionable() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    base_cmd(dir.path())
        .args(["search", "sunflowers", "--embedder", "minilm", "--catalog"])
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(contains("model.onnx"))
        .stderr(contains("--embedder hash"));
}

#[test]
fn unknown_embedder_lists_known_names() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(&dir);

    base_cmd(dir.path())
        .args(["search", "sunflowers", "--embedder", "word2vec", "--catalog"])
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(contains("unknown embedder"))
        .stderr(contains("hash"));
}

#[test]
fn embedders_robot_reports_availability() {
    let dir = TempDir::new().unwrap();

    let output = base_cmd(dir.path())
        .args(["embedders", "--robot"])
        .assert()
        .success()
        .get_output()
        .clone();

    let v: Value = serde_json::from_slice(&output.stdout).unwrap();
    let embedders = v["embedders"].as_array().unwrap();
    assert_eq!(embedders.len(), 2);

    let by_name = |name: &str| {
        embedders
            .iter()
            .find(|e| e["name"] == name)
            .unwrap()
            .clone()
    };
    assert_eq!(by_name("hash")["available"], true);
    assert_eq!(by_name("hash")["id"], "fnv1a-384");
    assert_eq!(by_name("minilm")["available"], false);
    assert_eq!(by_name("minilm")["dimension"], 384);
}

#[test]
fn embedders_human_lists_both() {
    let dir = TempDir::new().unwrap();

    base_cmd(dir.path())
        .arg("embedders")
        .assert()
        .success()
        .stdout(contains("minilm"))
        .stdout(contains("hash"));
}

#[test]
fn completions_bash_mentions_binary() {
    let dir = TempDir::new().unwrap();

    base_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("artsearch"));
}

#[test]
fn man_page_renders_roff() {
    let dir = TempDir::new().unwrap();

    base_cmd(dir.path())
        .arg("man")
        .assert()
        .success()
        .stdout(contains(".TH"))
        .stdout(contains("artsearch"));
}

#[test]
fn version_flag_prints_package_version() {
    let dir = TempDir::new().unwrap();

    base_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_flag_carries_build_metadata() {
    let dir = TempDir::new().unwrap();

    // clap shows long_version under --version itself; there is no
    // separate flag for the long form.
    base_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("build timestamp:"))
        .stdout(contains("target:"));

    base_cmd(dir.path())
        .arg("--long-version")
        .assert()
        .failure();
}
