use clap::{Parser, Subcommand};
use places_autocomplete::location::{
    preferred, Autocomplete, BuiltinGeocoder, GeocodeResolver, Geocoder, NominatimClient,
    NominatimOptions, PreferredLocation, SearchSession, SuggestionRanker,
};
use places_autocomplete::location::providers::{suggest_async, NOMINATIM_URL};
use places_autocomplete::server;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Places: preferred-first address suggestions and geocoding
///
/// Examples:
///   places suggest apple
///   places geocode "1 Infinite Loop, Cupertino, CA"
///   places --offline geocode Facebook
///   places serve --port 8080
#[derive(Parser)]
#[command(name = "places", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Offline mode: only the preferred list, no network calls.
    #[arg(long, global = true)]
    offline: bool,

    /// JSON file of preferred locations. Defaults to ~/.places/preferred.json
    /// when present, else the built-in list.
    #[arg(long, global = true)]
    preferred: Option<PathBuf>,

    /// Upper bound for one geocode resolution, in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Nominatim server base URL.
    #[arg(long, global = true, default_value = NOMINATIM_URL)]
    nominatim_url: String,

    /// Country filter for Nominatim (ISO 3166-1 alpha-2, e.g. US).
    #[arg(long, global = true)]
    country: Option<String>,

    /// Maximum number of Nominatim results.
    #[arg(long, global = true, default_value_t = 5)]
    limit: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Ranked suggestions for a partial query (JSON on stdout).
    Suggest { query: String },
    /// Resolve an address to latitude/longitude (JSON on stdout).
    Geocode { address: String },
    /// Serve the JSON API.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

struct Components {
    ranker: SuggestionRanker,
    autocomplete: Option<Arc<dyn Autocomplete>>,
    resolver: GeocodeResolver,
}

fn build(cli: &Cli, preferred: Arc<[PreferredLocation]>) -> Components {
    let (geocoder, autocomplete): (Arc<dyn Geocoder>, Option<Arc<dyn Autocomplete>>) =
        if cli.offline {
            let builtin: Arc<dyn Geocoder> = Arc::new(BuiltinGeocoder::new(preferred.clone()));
            (builtin, None)
        } else {
            let client = Arc::new(NominatimClient::new(NominatimOptions {
                base_url: cli.nominatim_url.clone(),
                country: cli.country.clone(),
                limit: cli.limit,
                ..Default::default()
            }));
            let geocoder: Arc<dyn Geocoder> = client.clone();
            let source: Arc<dyn Autocomplete> = client;
            (geocoder, Some(source))
        };

    let mut resolver = GeocodeResolver::new(geocoder);
    if let Some(secs) = cli.timeout {
        resolver = resolver.with_timeout(Duration::from_secs(secs));
    }

    Components {
        ranker: SuggestionRanker::new(preferred),
        autocomplete,
        resolver,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "places_autocomplete=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let preferred = preferred::load(cli.preferred.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let parts = build(&cli, preferred);

    match &cli.command {
        Command::Suggest { query } => {
            let external = match &parts.autocomplete {
                Some(source) => suggest_async(Arc::clone(source), query)
                    .await
                    .unwrap_or_else(|e| {
                        eprintln!("  Warning: {}", e);
                        Vec::new()
                    }),
                None => Vec::new(),
            };

            let ranked = parts.ranker.rank(query, external);
            for s in &ranked {
                let marker = if s.is_preferred() { "\u{2605}" } else { "\u{1F4CD}" };
                eprintln!("  {} {}  {}", marker, s.display().primary, s.display().secondary);
            }
            print_json(&ranked);
        }
        Command::Geocode { address } => {
            let mut session = SearchSession::new();
            let outcome = session.select(&parts.resolver, address.as_str()).await.clone();
            if let Some(line) = session.status_line() {
                eprintln!("  {}", line);
            }
            print_json(&outcome);
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Command::Serve { host, port } => {
            let app = server::build_router(parts.ranker, parts.autocomplete, parts.resolver);
            if let Err(e) = server::start(host, *port, app).await {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot encode output: {}", e);
            std::process::exit(1);
        }
    }
}
