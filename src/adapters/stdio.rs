//! Standard-stream transport adapter.
//!
//! Inbound health signals and command events arrive as JSON lines on a
//! byte stream (stdin in the binary).  Status snapshots leave as JSON
//! lines on a writer (stdout in the binary).  Logs go to stderr so the
//! two never mix.
//!
//! ```text
//!  stdin ──▶ reader thread ──▶ LineDecoder ──▶ decode_frame ──▶ EventQueue (send)
//!  ticker thread ─────────────────────────────── PublishTick ──▶ EventQueue (try_push)
//!  dispatch loop ──▶ StdoutTelemetrySink ──▶ stdout (status) / log (rest)
//! ```

use std::io::{self, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::events::{Event, EventQueue};
use crate::wire::codec::{LineDecoder, decode_frame, encode_snapshot_json};

use super::log_sink::LogEventSink;

const READ_CHUNK: usize = 256;

// ───────────────────────────────────────────────────────────────
// Inbound
// ───────────────────────────────────────────────────────────────

/// Read frames from `reader` until EOF, pushing decoded events.
///
/// Malformed lines are logged and skipped.  Decoded frames wait for queue
/// space rather than being dropped, which back-pressures the stream.
/// Pushes [`Event::Shutdown`] once the stream ends.  Returns the number
/// of events enqueued.
pub fn pump_frames(
    mut reader: impl Read,
    queue: &EventQueue,
    pass_token: &str,
    warn_depth: usize,
) -> usize {
    let mut decoder = LineDecoder::new();
    let mut chunk = [0u8; READ_CHUNK];
    let mut pushed = 0;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Inbound stream read failed: {e}");
                break;
            }
        };
        decoder.feed(&chunk[..n], |line| match decode_frame(line, pass_token) {
            Ok(event) => {
                if queue.len() >= warn_depth {
                    warn!("Event queue backlog at {} events", queue.len());
                }
                futures_lite::future::block_on(queue.send(event));
                pushed += 1;
            }
            Err(e) => warn!("Dropping inbound frame: {e}"),
        });
    }

    info!("Inbound stream closed");
    futures_lite::future::block_on(queue.send(Event::Shutdown));
    pushed
}

/// Spawn a named thread running [`pump_frames`] over `reader`.
pub fn spawn_reader(
    reader: impl Read + Send + 'static,
    queue: &'static EventQueue,
    pass_token: String,
    warn_depth: usize,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("chassis-ingress".into())
        .spawn(move || {
            let n = pump_frames(reader, queue, &pass_token, warn_depth);
            debug!("Ingress thread exiting after {n} events");
        })
}

/// Handle to the running publish ticker.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

impl Ticker {
    /// Stop the ticker and wait for its thread.  Returns promptly even
    /// mid-interval.
    pub fn shutdown(self) -> thread::Result<()> {
        self.stop.store(true, Ordering::Release);
        self.thread.thread().unpark();
        self.thread.join()
    }
}

/// Spawn the fixed-cadence publish ticker.
///
/// Ticks that find the queue full are dropped; the next tick publishes
/// the same record anyway.
pub fn spawn_ticker(queue: &'static EventQueue, interval: Duration) -> io::Result<Ticker> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    let thread = thread::Builder::new()
        .name("chassis-ticker".into())
        .spawn(move || {
            let mut next = Instant::now() + interval;
            loop {
                let now = Instant::now();
                if now < next {
                    thread::park_timeout(next - now);
                }
                if flag.load(Ordering::Acquire) {
                    break;
                }
                // Spurious wake-up.
                if Instant::now() < next {
                    continue;
                }
                let _ = queue.try_push(Event::PublishTick);
                next += interval;
            }
        })?;
    Ok(Ticker { stop, thread })
}

// ───────────────────────────────────────────────────────────────
// Outbound
// ───────────────────────────────────────────────────────────────

/// Writes status snapshots as JSON lines; everything else goes to the log.
pub struct StdoutTelemetrySink<W: Write> {
    out: W,
    log: LogEventSink,
}

impl<W: Write> StdoutTelemetrySink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            log: LogEventSink::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for StdoutTelemetrySink<W> {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::Status(snapshot) = event {
            let written = encode_snapshot_json(snapshot)
                .map_err(|e| e.to_string())
                .and_then(|line| {
                    writeln!(self.out, "{line}")
                        .and_then(|()| self.out.flush())
                        .map_err(|e| e.to_string())
                });
            if let Err(e) = written {
                warn!("Status publish failed: {e}");
            }
        }
        self.log.emit(event);
    }
}
