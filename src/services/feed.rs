/// Caller-facing feed with latest-call-wins delivery
use super::ApodService;
use crate::domain::{Apod, FilterState};
use crate::errors::FetchResult;
use chrono::{Local, NaiveDate};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Source of "today" in the caller's calendar
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Identifies one filter call; later calls get larger tickets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Result of the most recent filter call
#[derive(Debug)]
pub struct FeedUpdate {
    pub ticket: Ticket,
    pub filter: FilterState,
    pub outcome: FetchResult<Vec<Apod>>,
}

pub struct ApodFeed {
    service: Arc<ApodService>,
    latest: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<FeedUpdate>,
    clock: Clock,
}

/// Single completion queue for a feed
pub struct FeedReceiver {
    rx: mpsc::UnboundedReceiver<FeedUpdate>,
    latest: Arc<AtomicU64>,
}

impl ApodFeed {
    pub fn new(service: Arc<ApodService>) -> (Self, FeedReceiver) {
        Self::with_clock(service, Arc::new(|| Local::now().date_naive()))
    }

    pub fn with_clock(service: Arc<ApodService>, clock: Clock) -> (Self, FeedReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let latest = Arc::new(AtomicU64::new(0));
        let feed = Self {
            service,
            latest: latest.clone(),
            tx,
            clock,
        };
        (feed, FeedReceiver { rx, latest })
    }

    /// Load the trailing 7-day window ending today
    pub fn apply_range_filter(&self) -> Ticket {
        self.dispatch(FilterState::DateRange)
    }

    /// Load the picture for one committed date
    pub fn apply_single_date_filter(&self, date: NaiveDate) -> Ticket {
        self.dispatch(FilterState::SingleDate(date))
    }

    /// Ticket of the most recently issued call, if any
    pub fn latest_ticket(&self) -> Option<Ticket> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }

    /// Must be called from within a tokio runtime.
    fn dispatch(&self, filter: FilterState) -> Ticket {
        let ticket = Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        let today = (self.clock)();
        let service = self.service.clone();
        let latest = self.latest.clone();
        let tx = self.tx.clone();

        debug!("filter {:?} issued as ticket {}", filter, ticket.0);

        tokio::spawn(async move {
            let outcome = service.load(&filter, today).await;

            if latest.load(Ordering::SeqCst) != ticket.0 {
                debug!("ticket {} superseded, result dropped", ticket.0);
                return;
            }
            // Receiver gone means nobody is listening anymore.
            let _ = tx.send(FeedUpdate {
                ticket,
                filter,
                outcome,
            });
        });

        ticket
    }
}

impl FeedReceiver {
    /// Next update for the latest call; stale updates are skipped
    pub async fn recv(&mut self) -> Option<FeedUpdate> {
        while let Some(update) = self.rx.recv().await {
            if update.ticket.0 == self.latest.load(Ordering::SeqCst) {
                return Some(update);
            }
            debug!("ticket {} overtaken while queued", update.ticket.0);
        }
        None
    }
}
