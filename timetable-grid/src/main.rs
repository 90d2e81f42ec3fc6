use timetable_grid::catalog::Catalog;
use timetable_grid::config::{load_server_settings, load_timetable_config, TimetableConfig};
use timetable_grid::display::{describe_notification, print_grid, render_swap_preview};
use timetable_grid::parser::{default_seed, load_seed};
use timetable_grid::schedule::slot_utils::parse_coordinate;
use timetable_grid::schedule::{GridStore, Notification, SwapCoordinator};
use timetable_grid::web;
use tracing_subscriber::EnvFilter;

fn load_grid(config: &TimetableConfig, seed_path: Option<&str>) -> Result<GridStore, Box<dyn std::error::Error>> {
    match seed_path {
        Some(path) => {
            println!("Loading timetable seed from {}...", path);
            Ok(load_seed(path, config.dimensions())?)
        }
        None => Ok(default_seed(config.dimensions())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = load_timetable_config()?;
    let catalog = Catalog::builtin();

    match args.get(1).map(String::as_str) {
        Some("web") => {
            let port = args.get(2).and_then(|p| p.parse::<u16>().ok());
            let settings = load_server_settings(port);
            let store = load_grid(&config, std::env::var("TIMETABLE_SEED").ok().as_deref())?;

            println!("Starting web server on port {}...", settings.port);
            println!("Access the API at http://localhost:{}/api/grid", settings.port);

            web::start_server(settings, web::AppState::new(config, catalog, store)).await?;
        }
        Some("swap") => {
            // swap <day,period> <day,period> [seed.csv]
            let (Some(first), Some(second)) = (
                args.get(2).and_then(|a| parse_coordinate(a)),
                args.get(3).and_then(|a| parse_coordinate(a)),
            ) else {
                return Err("usage: timetable-grid swap <day,period> <day,period> [seed.csv]".into());
            };
            let mut store = load_grid(&config, args.get(4).map(String::as_str))?;
            let mut swap = SwapCoordinator::new();
            let mut notifications: Vec<Notification> = Vec::new();

            swap.select_slot(&store, first, &mut notifications)?;
            swap.select_slot(&store, second, &mut notifications)?;
            if let Some(preview) = render_swap_preview(&config, &store, &catalog, swap.state()) {
                println!("{}\n", preview);
            }
            swap.confirm(&mut store, &mut notifications);

            for n in &notifications {
                println!("{}", describe_notification(&config, n));
            }
            println!();
            print_grid(&config, &store, &catalog, None);
        }
        seed => {
            let store = load_grid(&config, seed)?;
            println!("Loaded {} assigned slots", store.len());
            print_grid(&config, &store, &catalog, None);
        }
    }

    Ok(())
}
