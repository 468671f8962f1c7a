use super::{
    top_categories, ApiError, Cancellation, DateReport, DateSummary, PeriodReport, SummarySource,
};
use crate::period::PeriodSelection;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    mpsc::{channel, Receiver, Sender},
    Arc,
};
use std::thread;
use time::Date;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FetchRequest {
    Health,
    Date(Date),
    Period(PeriodSelection),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FetchPayload {
    Health,
    Date(DateReport),
    Period(PeriodReport),
}

#[derive(Debug)]
pub(crate) struct FetchOutcome {
    pub(crate) generation: u64,
    pub(crate) request: FetchRequest,
    pub(crate) result: Result<FetchPayload, ApiError>,
}

/// Runs summary requests on worker threads so that the UI never waits on
/// the network.
///
/// Each date or period request supersedes the ones before it: results are
/// tagged with a generation number, and [`Fetcher::poll()`] only hands out
/// results for the latest generation.  Workers share the current
/// generation so that a superseded request stops retrying.  Health checks
/// are never superseded.
#[derive(Debug)]
pub(crate) struct Fetcher {
    source: Option<Arc<dyn SummarySource>>,
    generation: u64,
    current: Arc<AtomicU64>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl Fetcher {
    pub(crate) fn new(source: Arc<dyn SummarySource>) -> Fetcher {
        Fetcher::with_source(Some(source))
    }

    /// A fetcher that never fetches anything
    pub(crate) fn offline() -> Fetcher {
        Fetcher::with_source(None)
    }

    fn with_source(source: Option<Arc<dyn SummarySource>>) -> Fetcher {
        let (tx, rx) = channel();
        Fetcher {
            source,
            generation: 0,
            current: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
        }
    }

    pub(crate) fn is_online(&self) -> bool {
        self.source.is_some()
    }

    /// Starts fetching in the background.  Returns the generation the
    /// result will carry, or `None` if offline.
    pub(crate) fn request(&mut self, request: FetchRequest) -> Option<u64> {
        let source = Arc::clone(self.source.as_ref()?);
        let cancel = if request == FetchRequest::Health {
            Cancellation::never()
        } else {
            self.generation += 1;
            self.current.store(self.generation, Ordering::Release);
            Cancellation::new(Arc::clone(&self.current), self.generation)
        };
        let generation = self.generation;
        debug!(?request, generation, "starting fetch");
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = fetch(source.as_ref(), request, &cancel);
            if let Err(e) = tx.send(FetchOutcome {
                generation,
                request,
                result,
            }) {
                debug!(generation = e.0.generation, "fetcher gone; dropping result");
            }
        });
        Some(generation)
    }

    /// Returns the next finished result that hasn't been superseded, if any
    pub(crate) fn poll(&self) -> Option<FetchOutcome> {
        loop {
            let outcome = self.rx.try_recv().ok()?;
            if outcome.request == FetchRequest::Health || outcome.generation == self.generation {
                return Some(outcome);
            }
            info!(
                generation = outcome.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
        }
    }
}

fn fetch(
    source: &dyn SummarySource,
    request: FetchRequest,
    cancel: &Cancellation,
) -> Result<FetchPayload, ApiError> {
    match request {
        FetchRequest::Health => source.health(cancel).map(|()| FetchPayload::Health),
        FetchRequest::Date(date) => {
            let summary = source
                .date_summary(date, cancel)?
                .unwrap_or_else(DateSummary::no_data);
            Ok(FetchPayload::Date(DateReport { date, summary }))
        }
        FetchRequest::Period(selection) => {
            let totals = source.period_totals(selection.range, cancel)?;
            let categories = top_categories(source.category_expenses(selection.range, cancel)?);
            Ok(FetchPayload::Period(PeriodReport {
                label: selection.label(),
                range: selection.range,
                totals,
                categories,
            }))
        }
    }
}
