use clap::Parser;
use env_logger::Builder;
use log::{info, LevelFilter};
use std::sync::Arc;
use tradex::cli::commands::{Cli, Commands};
use tradex::web::session::SessionManager;
use tradex::web::{router, AppState};
use tradex::TradeX;

#[tokio::main]
async fn main() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    let db_path = std::env::var("TRADEX_DB").unwrap_or_else(|_| "./tradex.db".into());

    let app = match TradeX::new(&db_path) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing TradeX: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(app, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: TradeX, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Serve { bind } => {
            let state = Arc::new(AppState::new(app, SessionManager::from_env()));
            let listener = tokio::net::TcpListener::bind(&bind).await?;
            info!("listening on http://{bind}");
            axum::serve(listener, router(state)).await?;
        }
        Commands::Seed => {
            let count = app.seed_catalog()?;
            println!("Seeded {count} stocks");
        }
    }
    Ok(())
}
