//! Feed a face-width trace through the proximity pipeline.
//!
//! Observations are read line by line and processed in order on this task.
//! Events travel over a channel to a separate printer task, which plays the
//! role of the UI consumer.

use screenguard_common::{MonitorConfig, ObservationClock, OrderGuard};
use screenguard_proximity_core::observation::{parse_observation_line, Observation};
use screenguard_proximity_core::{ProximityEvent, ProximityPipeline};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub async fn run(input: String, json: bool, config: MonitorConfig) -> anyhow::Result<()> {
    let mut pipeline =
        ProximityPipeline::new(config).map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = if input == "-" {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        let file = tokio::fs::File::open(&input)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open {input}: {e}"))?;
        Box::new(BufReader::new(file))
    };

    let clock = ObservationClock::start();
    if !json {
        println!("Monitoring observations from: {input}");
        println!("  Started: {}", clock.epoch_wall());
        println!();
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(rx, json));

    let mut ingest = TraceIngest::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let Some(observation) = ingest.ingest(&line, clock.elapsed_ns()) else {
            continue;
        };

        let mut forward = |event: &ProximityEvent| {
            if tx.send(event.clone()).is_err() {
                tracing::trace!("Printer task gone, dropping event");
            }
        };
        if let Err(e) = pipeline.process_observation(&observation, &mut forward) {
            // Already logged by the pipeline; keep going.
            tracing::debug!("Line {}: {}", ingest.line_number, e);
        }
    }

    drop(tx);
    printer.await??;

    let stats = pipeline.stats();
    if json {
        tracing::info!(
            "Processed {} observations ({} rejected, {} no-face, {} transitions)",
            stats.accepted,
            stats.rejected,
            stats.no_face_frames,
            stats.transitions
        );
    } else {
        println!();
        println!("Summary:");
        println!("  Status: {}", pipeline.status());
        if let Some(baseline) = pipeline.baseline() {
            println!("  Baseline face size: {baseline:.4}");
        }
        println!("  Accepted observations: {}", stats.accepted);
        println!("  Rejected observations: {}", stats.rejected);
        println!("  No-face frames: {}", stats.no_face_frames);
        println!("  Unparseable lines: {}", ingest.unparseable);
        println!("  Out-of-order lines: {}", ingest.out_of_order);
        println!("  Alerts: {}", stats.transitions);
    }

    Ok(())
}

/// Turns trace lines into ordered observations.
#[derive(Debug, Default)]
struct TraceIngest {
    guard: OrderGuard,
    line_number: u64,
    unparseable: u64,
    out_of_order: u64,
}

impl TraceIngest {
    /// Parse and admit one line. `now_ns` stamps bare numeric lines, raised
    /// to the last admitted timestamp so a bare line following a JSON line
    /// with a later `t` is not dropped as out of order.
    fn ingest(&mut self, line: &str, now_ns: u64) -> Option<Observation> {
        self.line_number += 1;

        let stamp = self.guard.last_ns().map_or(now_ns, |last| last.max(now_ns));
        let observation = match parse_observation_line(line, stamp) {
            Ok(Some(observation)) => observation,
            Ok(None) => return None,
            Err(e) => {
                self.unparseable += 1;
                tracing::warn!("Line {}: {}", self.line_number, e);
                return None;
            }
        };

        if !self.guard.admit(observation.timestamp_ns) {
            self.out_of_order += 1;
            tracing::warn!(
                "Line {}: timestamp {} precedes {:?}, dropped",
                self.line_number,
                observation.timestamp_ns,
                self.guard.last_ns()
            );
            return None;
        }
        Some(observation)
    }
}

async fn print_events(
    mut rx: mpsc::UnboundedReceiver<ProximityEvent>,
    json: bool,
) -> anyhow::Result<()> {
    while let Some(event) = rx.recv().await {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else if event.is_transition() {
            println!("  >> {event}");
        } else {
            println!("  {event}");
        }
    }
    Ok(())
}
