//! Season results page parser. One page lists a full season of fixtures
//! grouped by date; each fixture becomes one flat record with the outcome
//! fields derived from the final score.

use std::cmp::Ordering;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::config::MATCH_URL_BASE;
use crate::extract::{attr_required, select_one_required, selector, split_score, strip_tags, text_of};

static DATE_GROUPS: Lazy<Selector> =
    Lazy::new(|| selector("div[data-competition-matches-list]"));
static FIXTURES: Lazy<Selector> = Lazy::new(|| selector(".matchList li"));
static SCORE: Lazy<Selector> = Lazy::new(|| selector(".overview .teams .score"));
static TEAM_NAMES: Lazy<Selector> = Lazy::new(|| selector(".overview .teams .teamName"));
static ABBR: Lazy<Selector> = Lazy::new(|| selector(".abbr"));
static MATCH_ID: Lazy<Selector> = Lazy::new(|| selector("[data-matchid]"));

/// Field order here is the serialized field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub match_id: u64,
    /// Kickoff in epoch milliseconds, as published by the page.
    pub match_ko: i64,
    pub date: String,
    pub home_team: String,
    pub home_team_abbr: String,
    pub away_team: String,
    pub away_team_abbr: String,
    pub home_score: u32,
    pub away_score: u32,
    pub home_team_points: u8,
    pub away_team_points: u8,
    /// -1 draw, 0 home win, 1 away win.
    pub winner: i8,
    pub venue: String,
    pub match_link: String,
    pub season: String,
}

/// Parse a whole season results page. Output order is document order. Any
/// missing node or attribute aborts the document with no partial records.
pub fn parse_season_results(html: &str, season: &str) -> Result<Vec<FixtureRecord>> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();
    let mut records = Vec::new();

    for group in root.select(&DATE_GROUPS) {
        let date = attr_required(group, "data-competition-matches-list")
            .context("fixture date group")?;
        for fixture in group.select(&FIXTURES) {
            let record = parse_fixture(fixture, &date, season)
                .with_context(|| format!("fixture on {date}"))?;
            records.push(record);
        }
    }

    Ok(records)
}

fn parse_fixture(fixture: ElementRef<'_>, date: &str, season: &str) -> Result<FixtureRecord> {
    let home_team = attr_required(fixture, "data-home")?;
    let away_team = attr_required(fixture, "data-away")?;
    // The venue attribute sometimes carries markup fragments.
    let venue = strip_tags(&attr_required(fixture, "data-venue")?);
    let match_ko: i64 = attr_required(fixture, "data-comp-match-item-ko")?
        .parse()
        .context("kickoff timestamp is not an integer")?;

    let score_el = select_one_required(fixture, &SCORE, "score block")?;
    let (home_score, away_score) = split_score(&text_of(score_el))?;

    // Positional: the page renders the home name node first, then away.
    let names = fixture.select(&TEAM_NAMES).collect::<Vec<_>>();
    let [home_name, away_name] = names.as_slice() else {
        bail!("expected two team name nodes, found {}", names.len());
    };
    let home_team_abbr = text_of(select_one_required(
        *home_name,
        &ABBR,
        "home team abbreviation",
    )?);
    let away_team_abbr = text_of(select_one_required(
        *away_name,
        &ABBR,
        "away team abbreviation",
    )?);

    let match_id_el = select_one_required(fixture, &MATCH_ID, "match id node")?;
    let match_id: u64 = attr_required(match_id_el, "data-matchid")?
        .parse()
        .context("match id is not an integer")?;

    // No default arm: draw, home win and away win are the only outcomes.
    let (home_team_points, away_team_points, winner) = match home_score.cmp(&away_score) {
        Ordering::Equal => (1, 1, -1),
        Ordering::Greater => (3, 0, 0),
        Ordering::Less => (0, 3, 1),
    };

    Ok(FixtureRecord {
        match_id,
        match_ko,
        date: date.to_string(),
        home_team,
        home_team_abbr,
        away_team,
        away_team_abbr,
        home_score,
        away_score,
        home_team_points,
        away_team_points,
        winner,
        venue,
        match_link: format!("{MATCH_URL_BASE}{match_id}"),
        season: season.to_string(),
    })
}
