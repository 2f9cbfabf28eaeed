use agenda_algo::cli::CliArgs;
use agenda_algo::config::{LoggingSettings, Settings};
use agenda_algo::services::FeedClient;
use agenda_algo::{standard_configs, MatchPipeline, MatchReport, ProximityMatcher};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let args = CliArgs::parse();

    let settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&settings.logging);

    if let Err(e) = run(args, settings).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.compact().init(),
    }
}

async fn run(args: CliArgs, settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let filter = args.filter_spec()?;
    if let Some(spec) = &filter {
        info!("Filtering events with {:?}", spec);
    }

    let defaults = settings.matching.matcher();
    let matcher = ProximityMatcher::new(
        args.radius.unwrap_or(defaults.radius_m()),
        args.top.unwrap_or(defaults.top_n()),
    );

    let feeds = &settings.feeds;
    let client = FeedClient::new(feeds.timeout())?;

    // Every collection is loaded in full before matching; any failure aborts the run
    let events = client.events(args.events.as_deref().unwrap_or(&feeds.events)).await?;
    info!("Loaded {} events", events.len());
    let stations = client.stations(args.stations.as_deref().unwrap_or(&feeds.stations)).await?;
    info!("Loaded {} bike-share stations", stations.len());
    let parkings = client.parkings(args.parkings.as_deref().unwrap_or(&feeds.parkings)).await?;
    info!("Loaded {} parkings", parkings.len());

    let pipeline = MatchPipeline::from_spec(filter.as_ref(), standard_configs(stations, parkings, matcher))?;
    let enriched = pipeline.run(&events)?;
    let report = MatchReport::new(events.len(), enriched);

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}
