use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use epl_extract::config::Config;
use epl_extract::{club_finances, league_table, match_detail, results_dataset};

struct Cli {
    command: Option<String>,
    args: Vec<String>,
    data_dir: PathBuf,
    force: bool,
}

fn main() -> Result<()> {
    let cli = parse_cli();
    let config = Config::new(cli.data_dir.clone());

    let Some(command) = cli.command.as_deref() else {
        print_usage();
        bail!("no command given");
    };

    match command {
        "download-match" => {
            let match_id = parse_match_id(&cli)?;
            let dest = match_detail::download_match(&config, match_id, cli.force)?;
            println!("> Downloaded match {match_id} to {}", dest.display());
        }
        "process-match" => {
            let match_id = parse_match_id(&cli)?;
            let record = match_detail::process_match(&config, match_id)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        "process-season" => {
            let season = cli
                .args
                .first()
                .context("usage: process-season <YYYY/YYYY>")?;
            let written = results_dataset::process_season(&config, season)?;
            println!(
                "Processed season {season}: {written} fixtures -> {}",
                config.season_out_file(season).display()
            );
        }
        "process-all" => {
            let records = results_dataset::process_all_seasons(&config)?;
            println!(
                "Written {} records to {}",
                records.len(),
                config.all_results_file().display()
            );
        }
        "match-links" => {
            let records = results_dataset::load_all_results(&config)?;
            let written = results_dataset::write_match_links(&config, &records)?;
            println!(
                "Written {written} match links to {}",
                config.match_links_file().display()
            );
        }
        "download-matches" => {
            let summary = results_dataset::download_all_matches(&config, cli.force)?;
            println!(
                "skipped={}, downloaded={}",
                summary.skipped, summary.downloaded
            );
        }
        "tables" => {
            let rows = league_table::crawl_tables(&config)?;
            println!(
                "Written {rows} table rows to {}",
                config.club_tables_file().display()
            );
        }
        "finances" => {
            let rows = club_finances::crawl_finances(&config)?;
            println!(
                "Written {rows} finance rows to {}",
                config.income_expense_file().display()
            );
        }
        other => {
            print_usage();
            bail!("unknown command {other:?}");
        }
    }

    Ok(())
}

fn parse_cli() -> Cli {
    let raw = std::env::args().skip(1).collect::<Vec<_>>();
    let mut cli = Cli {
        command: None,
        args: Vec::new(),
        data_dir: PathBuf::from("data"),
        force: false,
    };

    let mut idx = 0;
    while idx < raw.len() {
        let arg = &raw[idx];
        if let Some(path) = arg.strip_prefix("--data-dir=") {
            if !path.trim().is_empty() {
                cli.data_dir = PathBuf::from(path);
            }
        } else if arg == "--data-dir" {
            if let Some(next) = raw.get(idx + 1) {
                cli.data_dir = PathBuf::from(next);
                idx += 1;
            }
        } else if arg == "--force" {
            cli.force = true;
        } else if cli.command.is_none() {
            cli.command = Some(arg.clone());
        } else {
            cli.args.push(arg.clone());
        }
        idx += 1;
    }

    cli
}

fn parse_match_id(cli: &Cli) -> Result<u64> {
    let raw = cli.args.first().context("expected a match id argument")?;
    raw.parse()
        .with_context(|| format!("match id {raw:?} is not an integer"))
}

fn print_usage() {
    println!("epl_extract - football match data extraction");
    println!();
    println!("Usage: epl_extract <command> [args] [--data-dir <path>] [--force]");
    println!();
    println!("Commands:");
    println!("  download-match <id>      download one match page snapshot");
    println!("  process-match <id>       extract the record for a downloaded match");
    println!("  process-season <season>  extract one season (e.g. 2002/2003)");
    println!("  process-all              extract and validate all seasons into all.json");
    println!("  match-links              write the match links dataset from all.json");
    println!("  download-matches         download every linked match page");
    println!("  tables                   scrape league tables for 1992-2021");
    println!("  finances                 scrape club income/expense for 1992-2021");
}
