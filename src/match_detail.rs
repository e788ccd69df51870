//! Single-match page parser: half-time score, attendance, officials, and the
//! per-side goal and assist timelines.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::config::{Config, MATCH_URL_BASE};
use crate::extract::{select_one_required, selector, split_score, text_of};
use crate::page_fetch::fetch_page;
use crate::store::{read_html, write_text};

static HALF_TIME: Lazy<Selector> = Lazy::new(|| selector(".matchStats .halfTime"));
static ATTENDANCE: Lazy<Selector> = Lazy::new(|| selector(".attendance"));
static REFEREE: Lazy<Selector> = Lazy::new(|| selector(".matchInfo .referee"));
static STADIUM: Lazy<Selector> = Lazy::new(|| selector(".matchInfo .stadium"));
static HOME_GOAL_EVENTS: Lazy<Selector> = Lazy::new(|| selector(".matchEvents .home .event"));
static AWAY_GOAL_EVENTS: Lazy<Selector> = Lazy::new(|| selector(".matchEvents .away .event"));
static HOME_ASSISTS: Lazy<Selector> = Lazy::new(|| selector(".assists .home .event"));
static AWAY_ASSISTS: Lazy<Selector> = Lazy::new(|| selector(".assists .away .event"));

static HALF_TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+-\d+)").expect("valid regex"));
static ATTENDANCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([\d,]+)").expect("valid regex"));
// Player name is the leading non-digit run, minute the digit run after it.
static EVENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^\d]+)([0-9]+)").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Goal,
    Assist,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub player: String,
    /// Match minute.
    pub time: u32,
}

/// Per-side timelines; goals come before assists within a side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvents {
    pub home: Vec<MatchEvent>,
    pub away: Vec<MatchEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetailRecord {
    pub match_id: u64,
    pub stadium: String,
    pub half_time_score_home: u32,
    pub half_time_score_away: u32,
    pub attendance: u64,
    pub referee: String,
    pub events: MatchEvents,
}

/// Parse one match page. The stat fragments are all required; an event list
/// may be empty (goalless side) but an event entry that defies the
/// name-then-minute form is fatal. No partial record is ever produced.
pub fn parse_match_detail(html: &str, match_id: u64) -> Result<MatchDetailRecord> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let half_time_text = text_of(select_one_required(root, &HALF_TIME, "half time block")?);
    let caps = HALF_TIME_RE
        .captures(&half_time_text)
        .ok_or_else(|| anyhow!("no H-A score in half time text {half_time_text:?}"))?;
    let (half_time_score_home, half_time_score_away) = split_score(&caps[1])?;

    let attendance_text = text_of(select_one_required(root, &ATTENDANCE, "attendance block")?);
    let caps = ATTENDANCE_RE
        .captures(&attendance_text)
        .ok_or_else(|| anyhow!("no crowd figure in attendance text {attendance_text:?}"))?;
    let attendance: u64 = caps[1]
        .replace(',', "")
        .parse()
        .context("attendance is not an integer")?;

    let referee = text_of(select_one_required(root, &REFEREE, "referee")?);
    let stadium = text_of(select_one_required(root, &STADIUM, "stadium")?);

    let mut home = scan_goal_events(root, &HOME_GOAL_EVENTS).context("home goal events")?;
    home.extend(scan_assist_events(root, &HOME_ASSISTS).context("home assists")?);
    let mut away = scan_goal_events(root, &AWAY_GOAL_EVENTS).context("away goal events")?;
    away.extend(scan_assist_events(root, &AWAY_ASSISTS).context("away assists")?);

    Ok(MatchDetailRecord {
        match_id,
        stadium,
        half_time_score_home,
        half_time_score_away,
        attendance,
        referee,
        events: MatchEvents { home, away },
    })
}

/// The event feed mixes goals with cards and substitutions; only entries
/// mentioning "goal" belong to the timeline.
fn scan_goal_events(root: ElementRef<'_>, sel: &Selector) -> Result<Vec<MatchEvent>> {
    let mut events = Vec::new();
    for entry in root.select(sel) {
        let text = text_of(entry);
        if !text.to_lowercase().contains("goal") {
            continue;
        }
        let cleaned = text.replace("Goal", "");
        let (player, time) = parse_event_text(cleaned.trim())?;
        events.push(MatchEvent {
            kind: EventKind::Goal,
            player,
            time,
        });
    }
    Ok(events)
}

fn scan_assist_events(root: ElementRef<'_>, sel: &Selector) -> Result<Vec<MatchEvent>> {
    let mut events = Vec::new();
    for entry in root.select(sel) {
        let (player, time) = parse_event_text(&text_of(entry))?;
        events.push(MatchEvent {
            kind: EventKind::Assist,
            player,
            time,
        });
    }
    Ok(events)
}

fn parse_event_text(text: &str) -> Result<(String, u32)> {
    let caps = EVENT_RE
        .captures(text)
        .ok_or_else(|| anyhow!("event text {text:?} is not in name-then-minute form"))?;
    let player = caps[1].trim().to_string();
    let time = caps[2]
        .parse()
        .with_context(|| format!("event minute in {text:?}"))?;
    Ok((player, time))
}

/// Download one match page to the snapshot store. The on-disk file is the
/// idempotency cache: refuses to refetch unless `force` is set.
pub fn download_match(config: &Config, match_id: u64, force: bool) -> Result<PathBuf> {
    let dest = config.match_raw_file(match_id);
    if !force && dest.exists() {
        bail!("match {match_id} already downloaded to {}", dest.display());
    }
    let body = fetch_page(&format!("{MATCH_URL_BASE}{match_id}"), &[])?;
    write_text(&dest, &body)?;
    Ok(dest)
}

/// Read a downloaded match snapshot and extract its record.
pub fn process_match(config: &Config, match_id: u64) -> Result<MatchDetailRecord> {
    let path = config.match_raw_file(match_id);
    let html = read_html(&path)
        .with_context(|| format!("match {match_id} not found"))?;
    parse_match_detail(&html, match_id).with_context(|| format!("match {match_id}"))
}
