//! Club transfer income/expense scraper. Money columns stay as the published
//! currency strings; normalization is a downstream concern.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::checkpoint::Checkpoint;
use crate::config::Config;
use crate::extract::{selector, RowCells};
use crate::league_table::SEASONS;
use crate::page_fetch::fetch_page;

const FINANCE_URL: &str =
    "https://www.transfermarkt.co.uk/premier-league/einnahmenausgaben/wettbewerb/GB1/plus/1";

static ROWS: Lazy<Selector> = Lazy::new(|| selector("#yw1 table tbody tr"));
static CELLS: Lazy<Selector> = Lazy::new(|| selector("td"));

// Same positional-binding constraint as the league table markup.
mod col {
    pub const CLUB: usize = 2;
    pub const EXPENDITURE: usize = 5;
    pub const ARRIVAL: usize = 6;
    pub const INCOME: usize = 7;
    pub const DEPARTURES: usize = 8;
    pub const BALANCE: usize = 9;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRecord {
    /// Year the season started.
    pub season: i32,
    pub club: String,
    pub expenditure: String,
    pub arrival: String,
    pub income: String,
    pub departures: String,
    pub balance: String,
}

pub fn parse_finance_rows(html: &str, season: i32) -> Result<Vec<FinanceRecord>> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();
    let mut rows = Vec::new();

    for row in root.select(&ROWS) {
        let cells = RowCells::collect(row, &CELLS);
        let record = FinanceRecord {
            season,
            club: cells.text(col::CLUB, "club")?,
            expenditure: cells.text(col::EXPENDITURE, "expenditure")?,
            arrival: cells.text(col::ARRIVAL, "arrival")?,
            income: cells.text(col::INCOME, "income")?,
            departures: cells.text(col::DEPARTURES, "departures")?,
            balance: cells.text(col::BALANCE, "balance")?,
        };
        rows.push(record);
    }

    Ok(rows)
}

/// Scrape every season's income/expense table into `income_expense.json`,
/// rewriting the file after each season. Returns the total row count.
pub fn crawl_finances(config: &Config) -> Result<usize> {
    let mut checkpoint = Checkpoint::new(config.income_expense_file());
    for season in SEASONS {
        let season_id = season.to_string();
        let query = [
            ("ids", "a"),
            ("sa", "1"),
            ("saison_id", season_id.as_str()),
            ("saison_id_bis", season_id.as_str()),
            ("nat", ""),
            ("altersklasse", ""),
            ("w_s", ""),
            ("leihe", ""),
            ("intern", "0"),
        ];
        let html = fetch_page(FINANCE_URL, &query)
            .with_context(|| format!("season {season} finances"))?;
        let rows = parse_finance_rows(&html, season)
            .with_context(|| format!("season {season} finances"))?;
        checkpoint.extend_and_persist(rows)?;
    }
    Ok(checkpoint.len())
}
