//! End-to-end test of the risk-fusion chain over file-backed fixtures:
//! importers → structural extraction → environmental indexes → spatial
//! match → fusion.

use gridfire_algo::{
    assemble_feeder_records, extract_structural_risk, fuse_all, lightning_points,
    match_environment, soil_moisture_points, vegetation_points,
};
use gridfire_core::{RiskConfig, RiskTrait};
use gridfire_io::importers;
use std::io::Write;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn fixture_files_to_fused_scores() {
    let dir = TempDir::new().unwrap();
    let config = RiskConfig::default();

    let overloads = write_file(
        &dir,
        "summary.csv",
        "feeder,percentage overhead,percentage transformers overloaded,percentage line length overloaded\n\
         p1uhs0_1247,50.0,0.1,0.2\n\
         p1ulv4837,30.0,0.0,0.0\n\
         subtransmission,0.0,0.0,0.0\n",
    );
    let coords = write_file(
        &dir,
        "coords.csv",
        "feeder,latitude,longitude\np1uhs0_1247,37.0,-121.0\n",
    );
    let soil = write_file(
        &dir,
        "soil.csv",
        "date,time,latitude,longitude,moisture_fraction\n\
         2016-07-01,12:00:00,37.0,-121.0,0.2\n\
         2016-07-01,12:00:00,45.0,-121.0,0.9\n",
    );
    let ecosystem = write_file(
        &dir,
        "ecosystem.csv",
        "Region,Latitude,Longitude,Species,Soil_type,Soil_drainage,Ecosystem_type,Ecosystem_state,Leaf_habit\n\
         California,37.0,-121.0,Quercus,loam,Dry,Grassland,Unmanaged,Evergreen\n",
    );
    let lightning = write_file(
        &dir,
        "lightning.json",
        r#"{
            "months": [7],
            "latitude": [37.0],
            "longitude": [-121.0],
            "flash_density": [[[0.02]]]
        }"#,
    );

    // structural side
    let overload_import = importers::load_overload_table(&overloads).unwrap();
    assert_eq!(overload_import.rows.len(), 2); // subtransmission dropped
    let lookup = importers::load_coordinate_lookup(&coords).unwrap();
    let (records, assemble) =
        assemble_feeder_records(&overload_import.rows, &lookup, &config.classifier);
    assert_eq!(assemble.num_feeders, 2);
    assert_eq!(assemble.num_unresolved, 1); // p1ulv4837 has no coordinate
    let (risks, _) = extract_structural_risk(&records, &config.posture);
    assert_eq!(risks[0].vector.get(RiskTrait::Overhead), 5.0);
    assert_eq!(risks[1].vector.get(RiskTrait::Uninsulated), 0.0); // low voltage

    // environmental side
    let soil_import = importers::load_soil_table(&soil).unwrap();
    let (soil_pts, soil_summary) =
        soil_moisture_points(&soil_import.observations, &config.region);
    assert_eq!(soil_summary.kept, 1); // the 45N reading is out of region
    assert_eq!(soil_pts[0].risk_score, 8.0);

    let grid = importers::load_lightning_grid(&lightning).unwrap();
    let (light_pts, _) = lightning_points(&grid, &config.region);
    assert_eq!(light_pts.len(), 1);
    assert_eq!(light_pts[0].risk_score, 4.0);

    let eco_import = importers::load_ecosystem_table(&ecosystem, "California").unwrap();
    let (veg_pts, veg_summary) = vegetation_points(&eco_import.sites, &config.region);
    assert_eq!(veg_summary.kept, 11);

    // match + fuse
    let coords: Vec<_> = risks.iter().map(|r| r.coordinate).collect();
    let triplets = match_environment(&coords, &soil_pts, &light_pts, &veg_pts).unwrap();
    assert_eq!(triplets[0].soil.distance_km, 0.0);

    let (fused, summary) = fuse_all(
        &risks,
        &triplets,
        &soil_pts,
        &light_pts,
        &veg_pts,
        &config.matrix,
    );
    assert_eq!(summary.num_feeders, 2);
    assert!(fused.iter().all(|f| f.aggregate_score.is_finite()));
    // the resolved medium-voltage feeder carries more structural risk than
    // the unresolved low-voltage one, and sits on top of its observations
    assert!(fused[0].aggregate_score > fused[1].aggregate_score);
    assert!(fused[0].aggregate_score > 0.0);
}
