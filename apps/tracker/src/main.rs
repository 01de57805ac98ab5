use std::time::Duration;

use clap::Parser;
use tokio::io::BufReader;
use tracker::config::client::ClientConfig;
use tracker::controller::{Controller, ControllerOptions};
use tracker::services::HttpGameService;
use tracker::ui::{terminal, TerminalView};

mod telemetry;

#[derive(Parser)]
#[command(name = "rps-tracker")]
#[command(about = "Record rock-paper-scissors games against a tracker service")]
struct Args {
    /// Game service base URL (overrides TRACKER_SERVICE_URL)
    #[arg(long)]
    service_url: Option<String>,

    /// Player id or name selected after every reset (overrides TRACKER_DEFAULT_PLAYER)
    #[arg(long)]
    default_player: Option<String>,

    /// Request timeout in seconds (overrides TRACKER_HTTP_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Send a client timestamp with each game
    #[arg(long)]
    stamp: bool,

    /// Emit logs as JSON
    #[arg(long, env = "TRACKER_LOG_JSON", value_parser = clap::builder::BoolishValueParser::new())]
    json_logs: bool,
}

fn build_config(args: &Args) -> Result<ClientConfig, tracker::AppError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &args.service_url {
        config = config.with_service_url(url.as_str())?;
    }
    if let Some(player) = &args.default_player {
        config = config.with_default_player(player.as_str());
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs))?;
    }
    if args.stamp {
        config = config.with_stamp_submissions(true);
    }
    Ok(config)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    telemetry::init_tracing(args.json_logs);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };

    let service = match HttpGameService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    println!("RPS tracker connected to {}", service.base_url());
    println!("type 'help' for commands");

    let view = TerminalView::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    let mut controller = Controller::new(service, view, ControllerOptions::from(&config));

    // Failures are shown by the controller; the session stays usable.
    let _ = controller.load_players().await;
    let _ = controller.refresh().await;

    if let Err(e) = terminal::run(&mut controller).await {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
