use std::path::{Path, PathBuf};

pub const MATCH_URL_BASE: &str = "https://www.premierleague.com/match/";

/// Filesystem layout for one data root. Every operation takes a `Config`
/// instead of reading module constants, so tests can point it at a scratch
/// directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Manually downloaded season results snapshots, one per season,
    /// named `<start>_<end>.html`.
    pub fn results_raw_dir(&self) -> PathBuf {
        self.data_dir
            .join("extract")
            .join("premierleague.com")
            .join("results")
    }

    pub fn season_raw_file(&self, season: &str) -> PathBuf {
        self.results_raw_dir().join(season_file_name(season, "html"))
    }

    /// Downloaded match pages, named by decimal match id.
    pub fn matches_raw_dir(&self) -> PathBuf {
        self.data_dir
            .join("extract")
            .join("premierleague.com")
            .join("matches")
    }

    pub fn match_raw_file(&self, match_id: u64) -> PathBuf {
        self.matches_raw_dir().join(format!("{match_id}.html"))
    }

    pub fn results_out_dir(&self) -> PathBuf {
        self.data_dir
            .join("transform")
            .join("premierleague.com")
            .join("results")
    }

    pub fn season_out_file(&self, season: &str) -> PathBuf {
        self.results_out_dir().join(season_file_name(season, "json"))
    }

    pub fn all_results_file(&self) -> PathBuf {
        self.results_out_dir().join("all.json")
    }

    pub fn match_links_file(&self) -> PathBuf {
        self.results_out_dir().join("match_links.json")
    }

    pub fn club_tables_file(&self) -> PathBuf {
        self.data_dir.join("club_tables.json")
    }

    pub fn income_expense_file(&self) -> PathBuf {
        self.data_dir.join("income_expense.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Path::new("data"))
    }
}

/// "2002/2003" -> "2002_2003.html"
fn season_file_name(season: &str, extension: &str) -> String {
    format!("{}.{extension}", season.replace('/', "_"))
}
