//! Baggage Relay
//!
//! Demonstrates propagation of tracing baggage across a message-queue hop
//! and a subsequent HTTP hop.
//!
//! # Architecture Overview
//!
//! ```text
//!  ┌──────────┐  payload + carrier   ┌─────────┐        ┌──────────────┐
//!  │ producer │─────────────────────▶│  queue  │───────▶│   consumer   │
//!  └──────────┘  (AMQP headers)      │ broker  │        │   pipeline   │
//!       │                            └─────────┘        └──────┬───────┘
//!       │ baggage stamped                 ▲                    │ decode carrier,
//!       │ per message                     │ ack / nack         │ re-encode into
//!       │                                 └────────────────────┤ HTTP headers
//!       ▼                                                      ▼
//!  one context per                                      ┌──────────────┐
//!  unit of work                                         │   receiver   │
//!                                                       │ POST /process│
//!                                                       └──────────────┘
//!                                                               │
//!                                              echoes baggageReceived in response
//! ```
//!
//! The queue transport does not carry headers across the HTTP boundary;
//! the consumer re-injects the context explicitly (decode then encode).

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use baggage_relay::{config, consumer, producer, receiver};

#[derive(Parser)]
#[command(name = "baggage-relay")]
#[command(about = "Baggage propagation demo across a queue hop and an HTTP hop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a batch of messages stamped with baggage
    Produce,
    /// Consume queue messages and relay their baggage downstream
    Consume,
    /// Run the downstream HTTP receiver
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "baggage_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = config::load()?;

    tracing::info!(
        broker = %config.queue.url,
        queue = %config.queue.queue_name,
        downstream = %config.downstream.base_url,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Produce => producer::run(&config).await?,
        Commands::Consume => consumer::run(&config).await?,
        Commands::Serve => receiver::run(&config.receiver.listen_addr).await?,
    }

    Ok(())
}
