//! End-of-season league table scraper. One request per season, rows parsed by
//! declared column position, accumulated set checkpointed after every season.

use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::checkpoint::Checkpoint;
use crate::config::Config;
use crate::extract::{selector, RowCells};
use crate::page_fetch::fetch_page;

const TABLE_URL_BASE: &str =
    "https://www.transfermarkt.co.uk/premier-league/tabelle/wettbewerb/GB1/saison_id";

/// First Premier League season through 2021/22.
pub const SEASONS: RangeInclusive<i32> = 1992..=2021;

static ROWS: Lazy<Selector> = Lazy::new(|| selector("#yw1 table tbody tr"));
static CELLS: Lazy<Selector> = Lazy::new(|| selector("td"));

// Declared column binding for the table markup. Positional on purpose: the
// page has no per-cell ids, and a layout change must fail loudly here.
mod col {
    pub const POSITION: usize = 0;
    pub const CLUB: usize = 2;
    pub const PLAYED: usize = 3;
    pub const WON: usize = 4;
    pub const DRAWN: usize = 5;
    pub const LOST: usize = 6;
    pub const GOALS: usize = 7;
    pub const GOALS_DIFF: usize = 8;
    pub const POINTS: usize = 9;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowRecord {
    pub position: u32,
    pub club: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    /// "scored:conceded", kept as published.
    pub goals: String,
    pub goals_diff: i32,
    pub points: u32,
    /// Year the season started.
    pub season: i32,
}

pub fn parse_table_rows(html: &str, season: i32) -> Result<Vec<TableRowRecord>> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();
    let mut rows = Vec::new();

    for row in root.select(&ROWS) {
        let cells = RowCells::collect(row, &CELLS);
        let record = TableRowRecord {
            position: parse_u32(&cells.text(col::POSITION, "position")?, "position")?,
            club: cells.text(col::CLUB, "club")?,
            played: parse_u32(&cells.text(col::PLAYED, "played")?, "played")?,
            won: parse_u32(&cells.text(col::WON, "won")?, "won")?,
            drawn: parse_u32(&cells.text(col::DRAWN, "drawn")?, "drawn")?,
            lost: parse_u32(&cells.text(col::LOST, "lost")?, "lost")?,
            goals: cells.text(col::GOALS, "goals")?,
            goals_diff: parse_i32(&cells.text(col::GOALS_DIFF, "goals_diff")?, "goals_diff")?,
            points: parse_u32(&cells.text(col::POINTS, "points")?, "points")?,
            season,
        };
        rows.push(record);
    }

    Ok(rows)
}

/// Scrape every season table into `club_tables.json`, rewriting the file
/// after each season. Returns the total row count.
pub fn crawl_tables(config: &Config) -> Result<usize> {
    let mut checkpoint = Checkpoint::new(config.club_tables_file());
    for season in SEASONS {
        let url = format!("{TABLE_URL_BASE}/{season}");
        let html = fetch_page(&url, &[]).with_context(|| format!("season {season} table"))?;
        let rows = parse_table_rows(&html, season)
            .with_context(|| format!("season {season} table"))?;
        checkpoint.extend_and_persist(rows)?;
    }
    Ok(checkpoint.len())
}

fn parse_u32(text: &str, field: &str) -> Result<u32> {
    text.trim()
        .parse()
        .with_context(|| format!("{field} {text:?} is not an integer"))
}

/// Signed parse; the page prints the diff with an explicit +/- sign.
fn parse_i32(text: &str, field: &str) -> Result<i32> {
    text.trim()
        .parse()
        .with_context(|| format!("{field} {text:?} is not a signed integer"))
}
