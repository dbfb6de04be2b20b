use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_overloads(path: &Path) {
    fs::write(
        path,
        "feeder,percentage overhead,percentage transformers overloaded,percentage line length overloaded\n\
         p1uhs0_1247,50.0,0.1,0.2\n\
         p1ulv5_3210,20.0,0.0,0.05\n",
    )
    .unwrap();
}

fn write_coords(path: &Path) {
    fs::write(
        path,
        "feeder,latitude,longitude\n\
         p1uhs0_1247,37.0,-121.0\n\
         p1ulv5_3210,37.5,-120.5\n",
    )
    .unwrap();
}

fn write_soil(path: &Path) {
    fs::write(
        path,
        "date,time,latitude,longitude,moisture_fraction\n\
         2016-07-01,12:00:00,37.0,-121.0,0.2\n\
         2016-07-01,12:00:00,37.5,-120.5,0.6\n",
    )
    .unwrap();
}

fn write_ecosystem(path: &Path) {
    fs::write(
        path,
        "Region,Latitude,Longitude,Ecosystem_type,Ecosystem_state,Leaf_habit\n\
         California,37.2,-120.8,Grassland,Unmanaged,Evergreen\n",
    )
    .unwrap();
}

fn write_lightning(path: &Path) {
    fs::write(
        path,
        r#"{"months":[7],"latitude":[37.0],"longitude":[-121.0],"flash_density":[[[0.02]]]}"#,
    )
    .unwrap();
}

#[test]
fn structural_extracts_risk_table() {
    let dir = tempdir().unwrap();
    let overloads = dir.path().join("summary.csv");
    let coords = dir.path().join("coords.csv");
    write_overloads(&overloads);
    write_coords(&coords);
    let out = dir.path().join("dist_risk_scores.csv");

    let mut cmd = Command::cargo_bin("gridfire-cli").unwrap();
    cmd.args([
        "structural",
        "--overloads",
        overloads.to_str().unwrap(),
        "--coords",
        coords.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Extracted 2"));
    assert!(out.exists());
    let body = fs::read_to_string(&out).unwrap();
    assert!(body.contains("p1uhs0_1247"));
    assert!(body.contains("overhead"));
}

#[test]
fn terrain_soil_exports_geojson() {
    let dir = tempdir().unwrap();
    let soil = dir.path().join("soil.csv");
    write_soil(&soil);
    let out = dir.path().join("soil_risk.geojson");

    let mut cmd = Command::cargo_bin("gridfire-cli").unwrap();
    cmd.args([
        "terrain",
        "--factor",
        "soil",
        "--input",
        soil.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Indexed 2 points"));
    let body = fs::read_to_string(&out).unwrap();
    assert!(body.contains("FeatureCollection"));
    assert!(body.contains("soil_moisture"));
}

#[test]
fn run_scores_a_full_data_root() {
    let dir = tempdir().unwrap();
    let region = dir.path().join("P1U");
    fs::create_dir(&region).unwrap();
    write_overloads(&region.join("summary.csv"));
    write_coords(&region.join("coords.csv"));
    let soil = dir.path().join("soil.csv");
    write_soil(&soil);
    let ecosystem = dir.path().join("ecosystem.csv");
    write_ecosystem(&ecosystem);
    let lightning = dir.path().join("lightning.json");
    write_lightning(&lightning);
    let out = dir.path().join("out");

    let mut cmd = Command::cargo_bin("gridfire-cli").unwrap();
    cmd.args([
        "run",
        "--data-root",
        dir.path().to_str().unwrap(),
        "--soil",
        soil.to_str().unwrap(),
        "--ecosystem",
        ecosystem.to_str().unwrap(),
        "--lightning",
        lightning.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--threads",
        "1",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Scored 2 feeders across 1 regions"));
    assert!(out.join("fused_risk.json").exists());
    assert!(out.join("run_manifest.json").exists());
}

#[test]
fn run_fails_on_empty_data_root() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("gridfire-cli").unwrap();
    cmd.args([
        "run",
        "--data-root",
        dir.path().to_str().unwrap(),
        "--soil",
        "soil.csv",
        "--ecosystem",
        "eco.csv",
        "--lightning",
        "lightning.json",
        "-o",
        dir.path().join("out").to_str().unwrap(),
    ])
    .assert()
    .failure();
}

#[test]
fn structural_honours_config_overrides() {
    let dir = tempdir().unwrap();
    let overloads = dir.path().join("summary.csv");
    let coords = dir.path().join("coords.csv");
    write_overloads(&overloads);
    write_coords(&coords);
    let config = dir.path().join("risk.json");
    fs::write(
        &config,
        r#"{"posture":{"hif_detection":0.0,"powersafety_shutoff":0.0,"misting_fire_suppression":0.0,"response_team_coordination":0.0,"high_fidelity_tracking":0.0}}"#,
    )
    .unwrap();
    let out = dir.path().join("dist_risk_scores.csv");

    let mut cmd = Command::cargo_bin("gridfire-cli").unwrap();
    cmd.args([
        "structural",
        "--overloads",
        overloads.to_str().unwrap(),
        "--coords",
        coords.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ])
    .assert()
    .success();
    let body = fs::read_to_string(&out).unwrap();
    // the five posture columns end up zeroed by the override
    let data_line = body.lines().nth(1).unwrap();
    let fields: Vec<&str> = data_line.split(',').collect();
    for value in &fields[fields.len() - 5..] {
        assert_eq!(*value, "0");
    }
}
