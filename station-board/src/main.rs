use std::process::ExitCode;

use station_board::board::{self, BoardClient, BoardClientConfig, BoardPage, SectionKind};
use station_board::settings::SettingsStore;
use station_board::stations::{SortMode, StationList, StationListProxy};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Station list path from the environment, query from the command line
    let list_path =
        std::env::var("STATION_LIST").unwrap_or_else(|_| "stations.xml".to_string());
    let query = std::env::args().nth(1);

    let store = SettingsStore::open().expect("Failed to open settings");

    let list = match StationList::load(&list_path) {
        Ok(list) => list,
        Err(e) => {
            eprintln!("Could not load station list {list_path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded {} stations from {list_path}", list.len());

    // Resolve the station: first match for the query, else the one
    // remembered from last time
    let station = match query {
        Some(query) => {
            let mut proxy = StationListProxy::new();
            proxy.set_filter(&query);
            proxy.set_sort_mode(SortMode::Alpha);
            match proxy.apply(&list).first() {
                Some(station) => station.name.clone(),
                None => {
                    eprintln!("No station matches `{query}`");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => match store.last_station() {
            Some(station) => station,
            None => {
                eprintln!("Usage: station-board <station>");
                return ExitCode::FAILURE;
            }
        },
    };

    let client = BoardClient::new(BoardClientConfig::new()).expect("Failed to create board client");
    let html = match client.fetch(&station).await {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Could not fetch the board for {station}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let page = BoardPage::parse(&html);
    let kind = if store.show_arrivals_preferred() {
        SectionKind::Arrivals
    } else {
        SectionKind::Departures
    };

    println!();
    println!("{station} ({})", board::stylesheet_name(store.show_arrivals_preferred()));
    println!("{}", page.section_text(kind));

    if let Err(e) = store.set_last_station(&station) {
        eprintln!("Warning: could not save settings: {e}");
    }

    ExitCode::SUCCESS
}
