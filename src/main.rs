use clap::Parser;
use formosa_locator::config::load_gazetteer;
use formosa_locator::intent;
use formosa_locator::location::RegionResolver;
use formosa_locator::server;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Formosa Locator: finds the Taiwan city and district a chat message is about
///
/// Resolves colloquial Chinese messages ("中和天氣如何？", "台北天氣") to a
/// canonical city and district, or serves the resolver over HTTP.
///
/// Examples:
///   formosa 中和天氣如何？
///   formosa --json 信義區的天氣
///   formosa --gazetteer ./gazetteer.json 板橋
///   formosa --dump-gazetteer > gazetteer.json
///   formosa --serve --port 3000
#[derive(Parser)]
#[command(name = "formosa", version, about, long_about = None)]
struct Cli {
    /// Message to resolve. Example: formosa 台北天氣
    #[arg(index = 1)]
    text: Option<String>,

    /// Print the resolution as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Gazetteer JSON file (overrides FORMOSA_GAZETTEER and ~/.formosa/gazetteer.json).
    #[arg(long, short = 'g')]
    gazetteer: Option<PathBuf>,

    /// Print the active gazetteer as JSON and exit.
    #[arg(long)]
    dump_gazetteer: bool,

    /// Start the HTTP API instead of resolving a single message.
    #[arg(long)]
    serve: bool,

    /// Bind host for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port for --serve.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Debug logging (same as RUST_LOG=debug).
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // ── Load gazetteer ──────────────────────────────────────────

    let (gazetteer, _source) = load_gazetteer(cli.gazetteer.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let gazetteer = Arc::new(gazetteer);

    // ── Dump ────────────────────────────────────────────────────

    if cli.dump_gazetteer {
        match serde_json::to_string_pretty(&gazetteer.to_file()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // ── Serve ───────────────────────────────────────────────────

    if cli.serve {
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("Error: Cannot start runtime: {}", e);
            std::process::exit(1);
        });
        if let Err(e) = runtime.block_on(server::start(gazetteer, &cli.host, cli.port)) {
            eprintln!("Error: Server on {}:{} failed: {}", cli.host, cli.port, e);
            std::process::exit(1);
        }
        return;
    }

    // ── Resolve one message ─────────────────────────────────────

    let Some(text) = cli.text.as_deref() else {
        eprintln!("Error: No message given.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  formosa 中和天氣如何？");
        eprintln!("  formosa --json 信義區的天氣");
        eprintln!("  formosa --serve");
        std::process::exit(1);
    };

    let resolver = RegionResolver::new(gazetteer);
    let resolved = resolver.resolve(text);

    eprintln!("  {}", resolved.display_line());
    if let Some(source) = resolved.source() {
        eprintln!("  matched by: {} ({} intent)", source, intent::classify(text));
    }

    if cli.json {
        match serde_json::to_string_pretty(&resolved) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if !resolved.is_resolved() {
        std::process::exit(2);
    }
}
