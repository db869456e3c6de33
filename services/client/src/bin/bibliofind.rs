//! services/client/src/bin/bibliofind.rs
//!
//! Command-line driver for the Bibliofind search pages: runs a search through
//! the same controller the pages use and prints what the page would show.

use std::sync::Arc;

use bibliofind_client::{adapters::HttpApiAdapter, config::Config, error::ClientError};
use bibliofind_core::{
    controller::{FieldChange, SearchCompletion, SearchInteractionController},
    domain::{FavoriteKind, FavoriteTarget, SearchMode, Timeframe},
    favorites::FavoriteActionHandler,
    page::{Notices, Page, PageConfig, SeriesOption},
    ports::{BibliofindApi, SystemClock},
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "bibliofind", version, about = "Find the latest book by an author or in a series")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for the most recent book within a timeframe.
    Search(SearchArgs),
    /// Add an author or series to your favorites.
    Favorite(FavoriteArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PageKind {
    /// The combined author/series search page.
    Search,
    /// The series result page.
    SeriesResult,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Author name to search for.
    #[arg(long)]
    author: Option<String>,
    /// Series id to search for.
    #[arg(long)]
    series: Option<String>,
    /// Display name of the series, used in labels and email titles.
    #[arg(long)]
    series_name: Option<String>,
    /// One of 1y, 5y, 10y, all.
    #[arg(long, default_value = "5y")]
    timeframe: Timeframe,
    #[arg(long, value_enum, default_value_t = PageKind::Search)]
    page: PageKind,
    /// Add the searched author or series to favorites afterwards.
    #[arg(long)]
    favorite: bool,
    /// Email the results afterwards.
    #[arg(long)]
    email: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TargetKind {
    Author,
    Series,
}

#[derive(Args, Debug)]
struct FavoriteArgs {
    #[arg(value_enum)]
    kind: TargetKind,
    /// Known id; skips the lookup by name.
    #[arg(long, required_unless_present = "name")]
    id: Option<String>,
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Talking to {}", config.base_url);

    // --- 2. Initialize the HTTP Adapter ---
    let api: Arc<dyn BibliofindApi> = Arc::new(HttpApiAdapter::from_config(&config)?);

    // --- 3. Run the Command ---
    match cli.command {
        Command::Search(args) => run_search(api, args).await,
        Command::Favorite(args) => run_favorite(api, args).await,
    }
}

async fn run_search(api: Arc<dyn BibliofindApi>, args: SearchArgs) -> Result<(), ClientError> {
    let config = match args.page {
        PageKind::Search => PageConfig::search_page(),
        PageKind::SeriesResult => PageConfig::series_results_page(),
    };
    let options = match (&args.series, &args.series_name) {
        (Some(id), Some(name)) => vec![SeriesOption {
            id: id.clone(),
            name: name.clone(),
        }],
        _ => Vec::new(),
    };

    let mut controller =
        SearchInteractionController::new(api, Arc::new(SystemClock), config, Page::new(options));

    let mode = if args.series.is_some() && args.author.is_none() {
        SearchMode::Series
    } else {
        SearchMode::Author
    };
    if controller.config().supports(mode) {
        controller.select_mode(mode)?;
    }

    // Fill the form the way a user would, after the mode panel is shown.
    if let Some(author) = args.author {
        controller.page_mut().author = author;
    }
    if let Some(series) = args.series {
        controller.sync_favorite_field(FieldChange::Series(series));
    }
    controller.page_mut().timeframe = args.timeframe;

    let completion = match controller.submit_search().await {
        Ok(completion) => completion,
        Err(e) => {
            print_notices(&mut controller.page_mut().notices);
            if !controller.page().status_line.is_empty() {
                println!("{}", controller.page().status_line);
            }
            return Err(e.into());
        }
    };
    print_notices(&mut controller.page_mut().notices);

    if completion == SearchCompletion::Rendered {
        let page = controller.page();
        println!("{}", page.results_text);
        if !page.most_recent_html.is_empty() {
            println!("{}", page.most_recent_html);
        }

        if args.favorite {
            controller.add_favorite().await?;
        }
        if args.email {
            controller.send_results_by_email().await?;
        }
        print_notices(&mut controller.page_mut().notices);
    }
    Ok(())
}

async fn run_favorite(api: Arc<dyn BibliofindApi>, args: FavoriteArgs) -> Result<(), ClientError> {
    let kind = match args.kind {
        TargetKind::Author => FavoriteKind::Author,
        TargetKind::Series => FavoriteKind::Series,
    };
    let display_name = args.name.or_else(|| args.id.clone()).unwrap_or_default();
    let target = match args.id {
        Some(id) => FavoriteTarget::with_id(kind, id, display_name),
        None => FavoriteTarget {
            kind,
            id: None,
            display_name,
        },
    };

    let mut notices = Notices::default();
    let report = FavoriteActionHandler::new(api)
        .add_favorite(&target, &mut notices)
        .await;
    print_notices(&mut notices);

    if report.succeeded() {
        Ok(())
    } else {
        Err(ClientError::Internal(report.message))
    }
}

fn print_notices(notices: &mut Notices) {
    for notice in notices.drain() {
        println!("{}", notice);
    }
}
