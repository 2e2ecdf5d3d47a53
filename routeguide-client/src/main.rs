use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod commands;

use client::RouteGuideClient;

/// Command-line driver for the route guide service
#[derive(Parser)]
#[command(name = "routeguide-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server address and port
    #[arg(
        short,
        long,
        env = "SERVER_ADDRESS",
        default_value = "127.0.0.1:10101",
        global = true
    )]
    server_address: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the feature at a point
    Feature {
        /// Latitude in degrees × 10^7
        #[arg(long, allow_negative_numbers = true)]
        latitude: i32,

        /// Longitude in degrees × 10^7
        #[arg(long, allow_negative_numbers = true)]
        longitude: i32,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the features inside a rectangle
    Features {
        /// Latitude of the first corner
        #[arg(long, allow_negative_numbers = true, default_value_t = 400000000)]
        lo_latitude: i32,

        /// Longitude of the first corner
        #[arg(long, allow_negative_numbers = true, default_value_t = -750000000)]
        lo_longitude: i32,

        /// Latitude of the opposite corner
        #[arg(long, allow_negative_numbers = true, default_value_t = 420000000)]
        hi_latitude: i32,

        /// Longitude of the opposite corner
        #[arg(long, allow_negative_numbers = true, default_value_t = -730000000)]
        hi_longitude: i32,

        /// Output features as JSON lines
        #[arg(short, long)]
        json: bool,
    },

    /// Send a random route and print its summary
    RecordRoute,

    /// Exchange the scripted notes with the server
    RouteChat,

    /// Run every call against the reference points (default)
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routeguide_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = RouteGuideClient::new(&cli.server_address);

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Feature {
            latitude,
            longitude,
            json,
        } => commands::feature::run(&client, latitude, longitude, json).await,
        Commands::Features {
            lo_latitude,
            lo_longitude,
            hi_latitude,
            hi_longitude,
            json,
        } => {
            commands::features::run(
                &client,
                (lo_latitude, lo_longitude),
                (hi_latitude, hi_longitude),
                json,
            )
            .await
        }
        Commands::RecordRoute => commands::route::run(&client).await,
        Commands::RouteChat => commands::chat::run(&client).await,
        Commands::Demo => commands::demo::run(&client).await,
    }
}
