use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use epl_extract::checkpoint::Checkpoint;
use epl_extract::config::Config;
use epl_extract::results_dataset::{
    download_all_matches, extract_season, load_all_results, load_match_links, process_all_seasons,
    process_season, validate_match_links, write_match_links,
};
use epl_extract::season_results::FixtureRecord;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

/// Scratch data root seeded with season snapshots.
fn seed_config(seasons: &[(&str, &str)]) -> (TempDir, Config) {
    let dir = TempDir::new().expect("temp dir");
    let config = Config::new(dir.path());
    fs::create_dir_all(config.results_raw_dir()).expect("create results dir");
    for (season, fixture) in seasons {
        fs::write(config.season_raw_file(season), read_fixture(fixture))
            .expect("write season snapshot");
    }
    (dir, config)
}

#[test]
fn process_season_writes_pretty_json() {
    let (_dir, config) = seed_config(&[("2022/2023", "season_2022_2023.html")]);
    let written = process_season(&config, "2022/2023").expect("season should process");
    assert_eq!(written, 3);

    let raw = fs::read_to_string(config.season_out_file("2022/2023")).expect("output exists");
    assert!(raw.starts_with("[\n  {"), "expected 2-space indent");
    let loaded: Vec<FixtureRecord> = serde_json::from_str(&raw).expect("output parses back");
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].match_id, 74920);
}

#[test]
fn aggregation_concatenates_per_season_outputs() {
    let (_dir, config) = seed_config(&[
        ("2022/2023", "season_2022_2023.html"),
        ("2023/2024", "season_2023_2024.html"),
    ]);
    let all = process_all_seasons(&config).expect("aggregate should succeed");
    assert_eq!(all.len(), 4);

    // Concatenation of the per-season runs, in either enumeration order.
    let a = extract_season(&config, "2022/2023").expect("season extracts");
    let b = extract_season(&config, "2023/2024").expect("season extracts");
    let ab = [a.clone(), b.clone()].concat();
    let ba = [b, a].concat();
    assert!(all == ab || all == ba, "aggregate must preserve per-season order");
}

#[test]
fn combined_dataset_round_trips() {
    let (_dir, config) = seed_config(&[
        ("2022/2023", "season_2022_2023.html"),
        ("2023/2024", "season_2023_2024.html"),
    ]);
    let all = process_all_seasons(&config).expect("aggregate should succeed");
    let loaded = load_all_results(&config).expect("all.json loads back");
    assert_eq!(loaded, all);
}

#[test]
fn missing_season_file_is_fatal() {
    let (_dir, config) = seed_config(&[]);
    let err = extract_season(&config, "1999/2000").expect_err("no snapshot for that season");
    assert!(format!("{err:#}").contains("1999/2000"), "{err:#}");
}

#[test]
fn mismatched_match_link_fails_validation() {
    let (_dir, config) = seed_config(&[("2022/2023", "season_2022_2023.html")]);
    let mut records = extract_season(&config, "2022/2023").expect("season extracts");
    records[0].match_link = "https://www.premierleague.com/match/999".to_string();
    assert!(validate_match_links(&records).is_err());
}

#[test]
fn match_links_dataset_drives_the_download_cache() {
    let (_dir, config) = seed_config(&[("2022/2023", "season_2022_2023.html")]);
    let all = process_all_seasons(&config).expect("aggregate should succeed");
    let written = write_match_links(&config, &all).expect("links written");
    assert_eq!(written, 3);

    let links = load_match_links(&config).expect("links load back");
    assert_eq!(links[0].match_id, 74920);
    assert!(links[0].match_link.ends_with("74920"));

    // With every page already on disk the downloader never touches the
    // network and reports pure skips.
    for link in &links {
        let dest = config.match_raw_file(link.match_id);
        fs::create_dir_all(dest.parent().expect("parent dir")).expect("create matches dir");
        fs::write(dest, "<html></html>").expect("seed snapshot");
    }
    let summary = download_all_matches(&config, false).expect("cached run needs no network");
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.downloaded, 0);
}

#[test]
fn checkpoint_rewrites_file_after_each_unit() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("rows.json");

    let mut checkpoint = Checkpoint::new(path.clone());
    checkpoint
        .extend_and_persist(vec![1u32, 2])
        .expect("first unit persists");
    let first: Vec<u32> =
        serde_json::from_str(&fs::read_to_string(&path).expect("file exists")).expect("parses");
    assert_eq!(first, [1, 2]);

    checkpoint
        .extend_and_persist(vec![3])
        .expect("second unit persists");
    let second: Vec<u32> =
        serde_json::from_str(&fs::read_to_string(&path).expect("file exists")).expect("parses");
    assert_eq!(second, [1, 2, 3]);
    assert_eq!(checkpoint.len(), 3);
}
