use std::net::IpAddr;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use feedback_testing::{netlify, start_server, statickit};
use feedback_utils::feedback_version;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::StaticKit { host, port, site } => {
            info!("Starting statickit testing server on {host}:{port}");
            statickit::log_usage(&site);
            start_server(host, port, statickit::router(site)).await?
        }
        Command::Netlify {
            host,
            port,
            form_name,
        } => {
            info!("Starting netlify forms testing server on {host}:{port}");
            netlify::log_usage(&form_name);
            start_server(host, port, netlify::router(form_name)).await?
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = feedback_version())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the statickit testing server
    #[command(name = "statickit")]
    StaticKit {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8001")]
        port: u16,
        #[arg(long, default_value = "0123456789ab")]
        site: String,
    },
    /// Start the netlify forms testing server
    Netlify {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8002")]
        port: u16,
        #[arg(long, default_value = "feedback")]
        form_name: String,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
