//! Command-line drill-down client.
//!
//! A thin wrapper around the `geo_cascade` library: parses arguments,
//! initializes the logger, and walks the cascade through the codes given on
//! the command line, rendering the map and panel events to the console.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use strum::IntoEnumIterator;

use geo_cascade::geometry::{BoundaryStyle, LatLng, Ring};
use geo_cascade::surface::{MapSurface, SelectorPanel};
use geo_cascade::{
    AdministrativeLevel, CascadeController, Config, GeoDataClient, LocationOption,
    SelectionOutcome,
};

/// Map surface that narrates layer changes to stdout.
#[derive(Default)]
struct ConsoleMap {
    next: u64,
}

impl MapSurface for ConsoleMap {
    type LayerHandle = u64;

    fn add_marker(&mut self, position: LatLng, popup: &str) -> u64 {
        println!("[map] marker at {:.5}, {:.5}: {popup}", position.lat, position.lng);
        self.next += 1;
        self.next
    }

    fn add_polygon(&mut self, rings: &[Ring], _style: &BoundaryStyle) -> u64 {
        let points: usize = rings.iter().map(Vec::len).sum();
        println!("[map] boundary with {} ring(s), {points} points", rings.len());
        self.next += 1;
        self.next
    }

    fn remove_layer(&mut self, _layer: u64) {}

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        println!(
            "[map] view {:.5}, {:.5} @ zoom {zoom}",
            center.lat, center.lng
        );
    }
}

/// Selector panel that prints options and detail rows.
struct ConsolePanel;

impl SelectorPanel for ConsolePanel {
    fn populate(&mut self, level: AdministrativeLevel, options: &[LocationOption]) {
        println!("{} options ({}):", level.label(), options.len());
        for option in options {
            println!("  {:<12} {}", option.code, option.name);
        }
    }

    fn clear_level(&mut self, _level: AdministrativeLevel) {}

    fn show_detail(&mut self, level: AdministrativeLevel, rows: &[(&'static str, String)]) {
        println!("selected {}:", level.label());
        for (key, value) in rows {
            println!("  {key}: {value}");
        }
    }

    fn clear_detail(&mut self) {}

    fn show_error(&mut self, level: AdministrativeLevel, message: &str) {
        eprintln!("{}: {message}", level.label());
    }

    fn reset_toggles(&mut self) {}
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    env_logger::Builder::new()
        .filter_level(config.log_level.clone().into())
        .init();

    if config.codes.len() > 4 {
        eprintln!("geo_cascade error: at most four codes (province city district village)");
        process::exit(1);
    }

    let client =
        GeoDataClient::new(&config.base_url).context("failed to create geo-data client")?;
    let mut controller =
        CascadeController::new(client, ConsoleMap::default(), ConsolePanel, config.limit);

    let provinces = match controller.load_provinces(config.search.as_deref()).await {
        Ok(provinces) => provinces,
        Err(e) => {
            eprintln!("geo_cascade error: failed to list provinces: {e}");
            process::exit(1);
        }
    };

    if config.codes.is_empty() {
        println!(
            "{} province(s) listed; pass a code to drill down",
            provinces.len()
        );
        return Ok(());
    }

    for (level, code) in AdministrativeLevel::iter().zip(config.codes.iter()) {
        if let SelectionOutcome::Failed = controller.select(level, Some(code)).await {
            eprintln!(
                "geo_cascade error: could not load {} {code}",
                level.label()
            );
            process::exit(1);
        }
    }

    Ok(())
}
