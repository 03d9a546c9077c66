//! Align chassis controller: main entry point.
//!
//! Hexagonal architecture with a single serialized dispatch loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  stdin reader     publish ticker   StdoutTelemetrySink         │
//! │  (producer)       (producer)       (EventSink)                 │
//! │  JsonFileConfig   MonotonicClock                               │
//! │  (ConfigPort)     (TimePort)                                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ChassisService (pure logic)                 │    │
//! │  │  Interlock · Ingress · FSM · Publisher                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `align-chassis [config.json]`.  Frames are read from stdin,
//! status snapshots are written to stdout, logs go to stderr
//! (`RUST_LOG` overrides the default `info` filter).

use anyhow::{Context, Result};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use align_chassis::adapters::config_file::JsonFileConfig;
use align_chassis::adapters::stdio::{StdoutTelemetrySink, spawn_reader, spawn_ticker};
use align_chassis::adapters::time::MonotonicClock;
use align_chassis::app::ports::{ConfigError, ConfigPort};
use align_chassis::app::service::ChassisService;
use align_chassis::config::ControllerConfig;
use align_chassis::events::{Event, EventQueue};

static EVENTS: EventQueue = EventQueue::new();

fn load_config() -> ControllerConfig {
    let Some(path) = std::env::args().nth(1) else {
        info!("No parameter file given, using defaults");
        return ControllerConfig::default();
    };
    match JsonFileConfig::new(&path).load() {
        Ok(cfg) => cfg,
        Err(ConfigError::NotFound) => {
            warn!("Parameter file {path} not found, using defaults");
            ControllerConfig::default()
        }
        Err(e) => {
            warn!("Parameter file {path} rejected ({e}), using defaults");
            ControllerConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Align chassis controller v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    info!(
        "Publishing status every {} ms, health pass token {:?}",
        config.publish_interval_ms, config.health_pass_token
    );

    // ── 3. Core + adapters ────────────────────────────────────
    let clock = MonotonicClock::new();
    let mut sink = StdoutTelemetrySink::new(std::io::stdout().lock());
    let mut service = ChassisService::new(&config);

    let reader = spawn_reader(
        std::io::stdin(),
        &EVENTS,
        config.health_pass_token.clone(),
        config.event_queue_warn_depth,
    )
    .context("spawning ingress thread")?;
    let ticker = spawn_ticker(&EVENTS, service.publisher().interval()).context("spawning publish ticker")?;

    // ── 4. Dispatch loop ──────────────────────────────────────
    service.start(&mut sink);

    loop {
        let event = futures_lite::future::block_on(EVENTS.receive());
        if event == Event::Shutdown {
            break;
        }
        service.dispatch(event, &clock, &mut sink);
    }

    // ── 5. Teardown ───────────────────────────────────────────
    if ticker.shutdown().is_err() || reader.join().is_err() {
        warn!("A producer thread panicked");
    }
    let m = service.metrics();
    info!(
        "Shutdown: {} health signals, {} commands admitted, {} dropped ({} early, {} stale), \
         {} rejected, {} transitions, {} preemptions, {} snapshots",
        m.health_signals,
        m.commands_admitted,
        m.dropped_inactive + m.dropped_stale,
        m.dropped_inactive,
        m.dropped_stale,
        m.requests_rejected,
        m.transitions,
        m.preemptions,
        m.snapshots_published,
    );
    Ok(())
}
