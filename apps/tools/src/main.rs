use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use shared::{
    domain::{duration_millis, PolicyKind, TimingEvent, TimingEventKind},
    settings::{load_settings, TimingSettings, DEFAULT_SETTINGS_PATH},
};
use timing::{Controller, ControllerConfig};
use tokio::{
    sync::mpsc,
    time::{sleep_until, Instant},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trigger a controller at the given millisecond offsets and print what happened.
    Replay {
        #[arg(long)]
        policy: PolicyKind,
        #[arg(long, value_delimiter = ',', required = true)]
        at: Vec<u64>,
        #[arg(long)]
        delay_ms: Option<u64>,
        #[arg(long, default_value_t = 50)]
        tail_ms: u64,
    },
    /// Print the effective delay for every policy.
    Delays,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli.settings)
        .with_context(|| format!("failed to load settings from '{}'", cli.settings.display()))?;

    match cli.command {
        Command::Replay {
            policy,
            at,
            delay_ms,
            tail_ms,
        } => {
            let delay = match delay_ms {
                Some(ms) => Duration::from_millis(ms),
                None => settings.delay_for(policy)?,
            };
            let events = replay(policy, delay, &at, Duration::from_millis(tail_ms)).await?;
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
            let fires = events
                .iter()
                .filter(|e| e.kind == TimingEventKind::Fire)
                .count();
            info!(
                %policy,
                delay_ms = duration_millis(delay),
                triggers = at.len(),
                fires,
                resets = events.len() - fires,
                "replay finished"
            );
        }
        Command::Delays => {
            println!("{}", delays_json(&settings)?);
        }
    }

    Ok(())
}

async fn replay(
    policy: PolicyKind,
    delay: Duration,
    offsets_ms: &[u64],
    tail: Duration,
) -> Result<Vec<TimingEvent>> {
    ensure!(
        offsets_ms.windows(2).all(|pair| pair[0] <= pair[1]),
        "trigger offsets must be non-decreasing: {offsets_ms:?}"
    );

    let start = Instant::now();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let record = |kind: TimingEventKind| {
        let tx = tx.clone();
        move || {
            let _ = tx.send(TimingEvent {
                kind,
                policy,
                elapsed_ms: duration_millis(start.elapsed()),
            });
        }
    };
    let controller = Controller::new(
        policy,
        ControllerConfig::new()
            .callback(record(TimingEventKind::Fire))
            .reset(record(TimingEventKind::Reset))
            .delay(delay),
    )?;

    for &offset in offsets_ms {
        sleep_until(start + Duration::from_millis(offset)).await;
        controller.trigger();
    }
    let last = offsets_ms.last().copied().unwrap_or_default();
    sleep_until(start + Duration::from_millis(last) + delay + tail).await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    Ok(events)
}

fn delays_json(settings: &TimingSettings) -> Result<String> {
    let mut delays = serde_json::Map::new();
    for kind in PolicyKind::ALL {
        let delay = settings.delay_for(kind)?;
        delays.insert(
            kind.as_str().to_string(),
            serde_json::json!(duration_millis(delay)),
        );
    }
    Ok(serde_json::Value::Object(delays).to_string())
}
