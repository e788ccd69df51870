use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use epl_extract::match_detail::parse_match_detail;
use epl_extract::season_results::parse_season_results;

const SEASON_HTML: &str = include_str!("../tests/fixtures/season_2022_2023.html");
const MATCH_HTML: &str = include_str!("../tests/fixtures/match_74920.html");

fn bench_parsers(c: &mut Criterion) {
    c.bench_function("parse_season_results", |b| {
        b.iter(|| parse_season_results(black_box(SEASON_HTML), "2022/2023").expect("fixture parses"))
    });
    c.bench_function("parse_match_detail", |b| {
        b.iter(|| parse_match_detail(black_box(MATCH_HTML), 74920).expect("fixture parses"))
    });
}

criterion_group!(benches, bench_parsers);
criterion_main!(benches);
