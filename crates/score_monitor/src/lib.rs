/// Football Updates: Score Monitor
///
/// Jeden update cycle:
///   1. fetch live summary (MatchDataSource)
///   2. prázdný / chybějící batch → warning, konec
///   3. extract + compose řádek zápasu
///   4. dispatch do NotificationSink, výsledek jen zalogovat
///
/// Default `DispatchMode::FirstMatch` posílá jen první zápas z batche.

use football_feed::{extract_match, MatchBatch, MatchDataSource};
use logger::{now_iso, CycleEvent, DispatchEvent, EventLogger};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use telex_notifier::NotificationSink;
use tracing::{error, info, warn};

pub mod composer;

pub use composer::MessageComposer;

// ── Dispatch mode ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// First record only, one send per cycle.
    #[default]
    FirstMatch,
    /// One send per record.
    PerMatch,
    /// One send per cycle with every line of the batch.
    Summary,
}

impl FromStr for DispatchMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first-match" | "first_match" => Ok(DispatchMode::FirstMatch),
            "per-match" | "per_match" | "each"      => Ok(DispatchMode::PerMatch),
            "summary" | "all"                       => Ok(DispatchMode::Summary),
            other => anyhow::bail!("unknown dispatch mode: {other}"),
        }
    }
}

// ── Outcome ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Batch was absent or empty.
    NoMatches,
    FetchFailed(String),
    Dispatched { matches: usize, sent: usize },
    DispatchFailed { matches: usize, sent: usize, error: String },
    /// Overlap guard: previous cycle still in flight.
    Skipped,
}

impl CycleOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CycleOutcome::NoMatches             => "NO_MATCHES",
            CycleOutcome::FetchFailed(_)        => "FETCH_FAILED",
            CycleOutcome::Dispatched { .. }     => "DISPATCHED",
            CycleOutcome::DispatchFailed { .. } => "DISPATCH_FAILED",
            CycleOutcome::Skipped               => "SKIPPED",
        }
    }
}

// ── Update cycle ─────────────────────────────────────────────────────────────

pub struct UpdateCycle {
    source:       Arc<dyn MatchDataSource>,
    sink:         Arc<dyn NotificationSink>,
    logger:       Option<EventLogger>,
    mode:         DispatchMode,
    skip_overlap: bool,
    in_flight:    AtomicBool,
}

/// Clears the in-flight flag when the cycle ends, including on early return.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl UpdateCycle {
    pub fn new(source: Arc<dyn MatchDataSource>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            source,
            sink,
            logger: None,
            mode: DispatchMode::default(),
            skip_overlap: false,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_event_log(mut self, log_dir: impl Into<std::path::PathBuf>) -> Self {
        self.logger = Some(EventLogger::new(log_dir));
        self
    }

    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn skip_overlapping(mut self, skip: bool) -> Self {
        self.skip_overlap = skip;
        self
    }

    /// Runs one cycle. Never fails; everything ends up in the outcome and the logs.
    pub async fn run(&self) -> CycleOutcome {
        let _guard = if self.skip_overlap {
            match InFlight::acquire(&self.in_flight) {
                Some(guard) => Some(guard),
                None => {
                    warn!("Previous update cycle still in flight, skipping this tick.");
                    self.log_cycle(&CycleOutcome::Skipped, 0);
                    return CycleOutcome::Skipped;
                }
            }
        } else {
            None
        };

        let batch = match self.source.fetch_summary().await {
            Ok(batch) => batch,
            Err(e) => {
                error!("Error while fetching football summary: {:#}", e);
                let outcome = CycleOutcome::FetchFailed(format!("{e:#}"));
                self.log_cycle(&outcome, 0);
                return outcome;
            }
        };

        let batch: MatchBatch = match batch {
            Some(b) if !b.is_empty() => b,
            _ => {
                warn!("No matches found.");
                self.log_cycle(&CycleOutcome::NoMatches, 0);
                return CycleOutcome::NoMatches;
            }
        };

        let outcome = match self.mode {
            DispatchMode::FirstMatch => self.dispatch_first(&batch).await,
            DispatchMode::PerMatch   => self.dispatch_each(&batch).await,
            DispatchMode::Summary    => self.dispatch_summary(&batch).await,
        };
        self.log_cycle(&outcome, batch.len());
        outcome
    }

    async fn dispatch_first(&self, batch: &MatchBatch) -> CycleOutcome {
        let matches = batch.len();
        let mut composer = MessageComposer::new();

        // Rest of the batch is never read.
        let Some(record) = batch.first() else {
            return CycleOutcome::NoMatches;
        };
        let m = extract_match(record);
        composer.push(&m);

        match self.dispatch(&composer, composer.contents(), &m.score).await {
            Ok(())   => CycleOutcome::Dispatched { matches, sent: 1 },
            Err(err) => CycleOutcome::DispatchFailed { matches, sent: 0, error: err },
        }
    }

    async fn dispatch_each(&self, batch: &MatchBatch) -> CycleOutcome {
        let matches = batch.len();
        let mut composer = MessageComposer::new();
        let mut sent = 0;
        let mut last_error = None;

        for record in batch {
            let m = extract_match(record);
            let line = composer.push(&m);
            match self.dispatch(&composer, &line, &m.score).await {
                Ok(())   => sent += 1,
                Err(err) => last_error = Some(err),
            }
        }

        match last_error {
            None        => CycleOutcome::Dispatched { matches, sent },
            Some(error) => CycleOutcome::DispatchFailed { matches, sent, error },
        }
    }

    async fn dispatch_summary(&self, batch: &MatchBatch) -> CycleOutcome {
        let matches = batch.len();
        let mut composer = MessageComposer::new();
        let mut scores = Vec::with_capacity(matches);

        for record in batch {
            let m = extract_match(record);
            composer.push(&m);
            scores.push(m.score);
        }

        match self.dispatch(&composer, composer.contents(), &scores.join(", ")).await {
            Ok(())   => CycleOutcome::Dispatched { matches, sent: 1 },
            Err(err) => CycleOutcome::DispatchFailed { matches, sent: 0, error: err },
        }
    }

    /// Single send. Intent is logged before the call, result after; no retry.
    async fn dispatch(&self, composer: &MessageComposer, message: &str, score: &str) -> Result<(), String> {
        info!("Message to be sent to Telex: {}", composer.preview());

        let result = self.sink.send(message, score).await.map_err(|e| format!("{e:#}"));
        match &result {
            Ok(())   => info!("Live scores sent to Telex successfully."),
            Err(err) => error!("Error while sending to Telex: {}", err),
        }

        if let Some(logger) = &self.logger {
            let _ = logger.log(&DispatchEvent {
                ts:      now_iso(),
                event:   "TELEX_DISPATCH",
                message: message.to_string(),
                score:   score.to_string(),
                ok:      result.is_ok(),
                error:   result.as_ref().err().cloned(),
            });
        }
        result
    }

    fn log_cycle(&self, outcome: &CycleOutcome, matches: usize) {
        let Some(logger) = &self.logger else { return };

        let (dispatched, error) = match outcome {
            CycleOutcome::Dispatched { sent, .. }            => (*sent, None),
            CycleOutcome::DispatchFailed { sent, error, .. } => (*sent, Some(error.clone())),
            CycleOutcome::FetchFailed(e)                     => (0, Some(e.clone())),
            CycleOutcome::NoMatches | CycleOutcome::Skipped  => (0, None),
        };

        let _ = logger.log(&CycleEvent {
            ts: now_iso(),
            event: "UPDATE_CYCLE",
            outcome: outcome.label().to_string(),
            matches,
            dispatched,
            error,
        });
    }
}
