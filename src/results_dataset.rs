//! Season-level dataset operations: per-season extraction to JSON, the
//! all-seasons aggregate with its referential check, the match-links dataset,
//! and the bulk match-page downloader driven by it.

use std::fs;

use anyhow::{ensure, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::page_fetch::fetch_page;
use crate::season_results::{parse_season_results, FixtureRecord};
use crate::store::{read_html, write_json_pretty, write_text};

static SEASON_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+_\d+)\.html$").expect("valid regex"));

/// Extract one season's records from its downloaded snapshot.
pub fn extract_season(config: &Config, season: &str) -> Result<Vec<FixtureRecord>> {
    let raw_file = config.season_raw_file(season);
    let html =
        read_html(&raw_file).with_context(|| format!("no file found for the {season} season"))?;
    parse_season_results(&html, season).with_context(|| format!("season {season}"))
}

/// Extract one season and write its per-season JSON file. Returns the number
/// of records written.
pub fn process_season(config: &Config, season: &str) -> Result<usize> {
    let records = extract_season(config, season)?;
    write_json_pretty(&config.season_out_file(season), &records)?;
    Ok(records.len())
}

/// Run the extractor over every season snapshot in the results directory
/// (filesystem enumeration order), concatenate, validate, and write the
/// combined `all.json` dataset.
pub fn process_all_seasons(config: &Config) -> Result<Vec<FixtureRecord>> {
    let dir = config.results_raw_dir();
    let mut all = Vec::new();

    for entry in
        fs::read_dir(&dir).with_context(|| format!("read results dir {}", dir.display()))?
    {
        let entry = entry.context("read results dir entry")?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(caps) = SEASON_FILE_RE.captures(name) else {
            continue;
        };
        let season = caps[1].replace('_', "/");
        all.extend(extract_season(config, &season)?);
    }

    validate_match_links(&all)?;
    write_json_pretty(&config.all_results_file(), &all)?;
    Ok(all)
}

/// Referential check: the decimal form of every match id must be the trailing
/// suffix of its match link. A mismatch is a correctness defect, not a
/// warning.
pub fn validate_match_links(records: &[FixtureRecord]) -> Result<()> {
    for record in records {
        let id = record.match_id.to_string();
        ensure!(
            record.match_link.ends_with(&id),
            "match {}: link {:?} does not end with the match id",
            record.match_id,
            record.match_link
        );
    }
    Ok(())
}

/// One row of the match-links dataset used to drive the bulk downloader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLink {
    pub match_id: u64,
    pub match_link: String,
}

/// Load the previously written combined dataset.
pub fn load_all_results(config: &Config) -> Result<Vec<FixtureRecord>> {
    let path = config.all_results_file();
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("no combined results at {} (run process-all first)", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

pub fn write_match_links(config: &Config, records: &[FixtureRecord]) -> Result<usize> {
    let links = records
        .iter()
        .map(|r| MatchLink {
            match_id: r.match_id,
            match_link: r.match_link.clone(),
        })
        .collect::<Vec<_>>();
    write_json_pretty(&config.match_links_file(), &links)?;
    Ok(links.len())
}

pub fn load_match_links(config: &Config) -> Result<Vec<MatchLink>> {
    let path = config.match_links_file();
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("no match links at {} (run match-links first)", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
}

/// Fetch every linked match page into the snapshot store. Existing files are
/// skipped unless `force` is set; a failed fetch aborts, but pages already on
/// disk survive.
pub fn download_all_matches(config: &Config, force: bool) -> Result<DownloadSummary> {
    let links = load_match_links(config)?;
    let mut summary = DownloadSummary::default();

    for link in &links {
        let dest = config.match_raw_file(link.match_id);
        if !force && dest.exists() {
            summary.skipped += 1;
            continue;
        }
        let body = fetch_page(&link.match_link, &[])
            .with_context(|| format!("match {}", link.match_id))?;
        write_text(&dest, &body)?;
        summary.downloaded += 1;
    }

    Ok(summary)
}
