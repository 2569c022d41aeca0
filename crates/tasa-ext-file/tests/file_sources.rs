//! File sources against real files in a temporary directory.

use std::fs;

use rust_decimal_macros::dec;
use tasa_ext_file::{CsvPriceSource, CsvScheduleSource};
use tasa_traits::{ParsedPrice, PriceSource, ScheduleSource, SourceType, Ticker, TraitError};

#[tokio::test]
async fn reads_schedule_by_ticker() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("AL30.DAT"),
        "09/07/21,0.0875,0\n09/01/22,0.5,0\n09/07/24,0.25,4\n",
    )
    .unwrap();

    let source = CsvScheduleSource::new(dir.path()).unwrap();
    let schedule = source.schedule(&Ticker::new("AL30")).await.unwrap();

    assert_eq!(schedule.len(), 3);
    assert_eq!(schedule[2].principal(), dec!(4));
}

#[tokio::test]
async fn missing_schedule_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvScheduleSource::new(dir.path()).unwrap();

    let result = source.schedule(&Ticker::new("GD46")).await;

    assert!(matches!(result, Err(TraitError::NotFound(_))));
}

#[tokio::test]
async fn empty_schedule_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("AE38.DAT"), "").unwrap();
    let source = CsvScheduleSource::new(dir.path()).unwrap();

    let result = source.schedule(&Ticker::new("AE38")).await;

    assert!(matches!(result, Err(TraitError::ScheduleParse { .. })));
}

#[tokio::test]
async fn schedules_are_cached_until_invalidated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("AL35.DAT");
    fs::write(&path, "09/07/25,1,0\n").unwrap();
    let source = CsvScheduleSource::new(dir.path()).unwrap();
    let ticker = Ticker::new("AL35");

    assert_eq!(source.schedule(&ticker).await.unwrap().len(), 1);

    fs::write(&path, "09/07/25,1,0\n09/01/26,1,0\n").unwrap();
    assert_eq!(source.schedule(&ticker).await.unwrap().len(), 1);

    source.invalidate(&ticker);
    assert_eq!(source.schedule(&ticker).await.unwrap().len(), 2);
}

#[test]
fn missing_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = CsvScheduleSource::new(dir.path().join("nope"));
    assert!(matches!(result, Err(TraitError::SourceNotAvailable(_))));
}

#[tokio::test]
async fn reads_prices() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prices.csv");
    fs::write(&path, "ticker,price\nAL30D,\"61,35\"\nAL29D,58.1\nAE38D,-\n").unwrap();

    let source = CsvPriceSource::new(&path).unwrap();

    assert_eq!(source.source_type(), SourceType::File);
    assert_eq!(source.len(), 3);
    assert_eq!(
        source.price(&Ticker::new("AL30D")).await.unwrap(),
        ParsedPrice::Value(61.35)
    );
    assert_eq!(
        source.price(&Ticker::new("AL29D")).await.unwrap().value(),
        Some(58.1)
    );
    assert!(!source.price(&Ticker::new("AE38D")).await.unwrap().is_value());
    assert!(matches!(
        source.price(&Ticker::new("AL41D")).await,
        Err(TraitError::NotFound(_))
    ));
}

#[test]
fn missing_price_file_gives_empty_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvPriceSource::new(dir.path().join("prices.csv")).unwrap();
    assert!(source.is_empty());
}
