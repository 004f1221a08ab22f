use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tradex", about = "Simulated stock trading with virtual cash")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
    },
    /// Seed the stock catalog with the built-in symbol list
    Seed,
}
