//! Swaystatus - a status command for swaybar and i3bar.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use swaystatus::bar::stop_signal;
use swaystatus::modules::builtin::{ClickCounter, Clock, DEFAULT_TIME_FORMAT};
use swaystatus::{Bar, BarConfig};

/// Status line generator for swaybar/i3bar
#[derive(Parser, Debug)]
#[command(name = "swaystatus")]
#[command(version, about, long_about = None)]
struct Args {
    /// Length of generated module identifiers
    #[arg(long, env = "SWAYSTATUS_ID_LEN", default_value_t = swaystatus::ident::DEFAULT_ID_LEN)]
    id_len: usize,

    /// Signal the bar sends to stop this program
    #[arg(long, env = "SWAYSTATUS_STOP_SIGNAL", default_value_t = swaystatus::config::DEFAULT_STOP_SIGNAL)]
    stop_signal: i32,

    /// Milliseconds granted to modules for cleanup on shutdown
    #[arg(long, env = "SWAYSTATUS_GRACE_MS", default_value_t = swaystatus::config::DEFAULT_SHUTDOWN_GRACE_MS)]
    grace_ms: u64,

    /// Do not ask the bar for click events
    #[arg(long)]
    no_click_events: bool,

    /// strftime format of the clock
    #[arg(long, env = "SWAYSTATUS_CLOCK_FORMAT", default_value = DEFAULT_TIME_FORMAT)]
    clock_format: String,

    /// Add a click counter module (useful to test click routing)
    #[arg(long)]
    click_counter: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace)
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> BarConfig {
        BarConfig {
            id_len: self.id_len,
            stop_signal: self.stop_signal,
            click_events: !self.no_click_events,
            ..BarConfig::default()
        }
        .with_shutdown_grace(Duration::from_millis(self.grace_ms))
    }
}

fn init_tracing(args: &Args) {
    let default_filter = if args.verbose {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let config = args.config();
    let grace = config.shutdown_grace();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let bar = Bar::stdout(config);
        bar.register(Clock::new(args.clock_format.clone()))?;
        if args.click_counter {
            bar.register(ClickCounter::new())?;
        }

        let stop = stop_signal(bar.config().stop_signal)?;
        let reason = bar.run(tokio::io::stdin(), stop).await?;
        tracing::info!(?reason, "bar terminated");
        anyhow::Ok(())
    });

    // A stdin read may still sit in the blocking pool; don't wait for it.
    runtime.shutdown_timeout(grace);
    result
}
