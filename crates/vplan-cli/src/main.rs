use clap::{Parser, Subcommand};

mod commands;
mod common;
mod presenter;

#[derive(Parser)]
#[command(name = "vplan", version, about = "Substitution-plan client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the app flow: reuse the session, autologin, or prompt
    Start,
    /// Log in to a plan-service instance
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// School id, optionally with descriptive text ("5182 - Schule - Ort")
        #[arg(long)]
        school: String,
        /// Instance URL; defaults to the stored or public instance
        #[arg(long)]
        server: Option<String>,
        /// Keep the password stored for silent re-login
        #[arg(long)]
        autologin: bool,
    },
    /// Check the stored session against the server
    Status,
    /// Fetch and show today's filtered plan
    Plan,
    /// Plan filter settings
    Filter {
        #[command(subcommand)]
        action: commands::filter::FilterAction,
    },
    /// Search the packaged school directory
    Schools { query: String },
    /// Wipe all stored credentials and settings
    Reset,
    /// Open project pages in the browser
    Open {
        #[command(subcommand)]
        target: commands::links::OpenTarget,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Start => commands::plan::run_start().await,
        Commands::Login {
            username,
            password,
            school,
            server,
            autologin,
        } => commands::auth::run_login(username, password, school, server, autologin).await,
        Commands::Status => commands::auth::run_status().await,
        Commands::Plan => commands::plan::run_refresh().await,
        Commands::Filter { action } => commands::filter::run(action).await,
        Commands::Schools { query } => commands::schools::run(&query),
        Commands::Reset => commands::auth::run_reset().await,
        Commands::Open { target } => commands::links::run(target),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
