//! Thin boundary over the selector engine. An expected fragment that fails to
//! match is the fatal-error trigger for the whole document; there is no
//! best-effort fallback anywhere in the parsers.

use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<]+?>").expect("valid regex"));

pub fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid css selector")
}

pub fn select_one_required<'a>(
    scope: ElementRef<'a>,
    sel: &Selector,
    what: &str,
) -> Result<ElementRef<'a>> {
    scope
        .select(sel)
        .next()
        .ok_or_else(|| anyhow!("missing expected fragment: {what}"))
}

pub fn attr_required(el: ElementRef<'_>, name: &str) -> Result<String> {
    el.value()
        .attr(name)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("missing expected attribute {name:?}"))
}

/// Concatenated descendant text, trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Remove embedded markup from attribute values that carry HTML fragments.
pub fn strip_tags(raw: &str) -> String {
    TAG_RE.replace_all(raw, "").into_owned()
}

/// "H-A" score text into its two non-negative halves.
pub fn split_score(text: &str) -> Result<(u32, u32)> {
    let Some((home, away)) = text.split_once('-') else {
        bail!("score text {text:?} is not in H-A form");
    };
    let home = home
        .trim()
        .parse()
        .with_context(|| format!("home score in {text:?}"))?;
    let away = away
        .trim()
        .parse()
        .with_context(|| format!("away score in {text:?}"))?;
    Ok((home, away))
}

/// Positional cell binding for fixed-layout tables. The markup carries no
/// header ids, so each field declares its column index once and a short row
/// fails loudly instead of silently shifting values into the wrong fields.
pub struct RowCells<'a> {
    cells: Vec<ElementRef<'a>>,
}

impl<'a> RowCells<'a> {
    pub fn collect(row: ElementRef<'a>, cell_selector: &Selector) -> Self {
        Self {
            cells: row.select(cell_selector).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn text(&self, index: usize, field: &str) -> Result<String> {
        let cell = self.cells.get(index).ok_or_else(|| {
            anyhow!(
                "row has {} cells but field {field:?} is bound to column {index}",
                self.cells.len()
            )
        })?;
        Ok(text_of(*cell))
    }
}
