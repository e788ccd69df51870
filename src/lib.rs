pub mod checkpoint;
pub mod club_finances;
pub mod config;
pub mod extract;
pub mod http_client;
pub mod league_table;
pub mod match_detail;
pub mod page_fetch;
pub mod results_dataset;
pub mod season_results;
pub mod store;
