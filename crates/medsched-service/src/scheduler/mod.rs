//! The `Scheduler`: one instance owns both record stores for the life of the
//! process and is shared by every request.

mod hospitals;
mod meetings;


use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use medsched_calendar::RecurrenceExpander;
use medsched_core::config::{Settings, StoreBackend};
use medsched_core::constants::DEFAULT_MAX_OCCURRENCES;
use medsched_core::model::{Hospital, Meeting};
use medsched_store::RecordStore;
use tokio::sync::RwLock;

use crate::error::ServiceResult;
use crate::seed;

#[derive(Debug, Clone, Copy, Default)]
struct SeedOptions {
    enabled: bool,
    meetings_per_day: u32,
}

impl SeedOptions {
    fn demo_hospitals(self) -> Vec<Hospital> {
        if self.enabled {
            seed::demo_hospitals()
        } else {
            Vec::new()
        }
    }

    fn demo_meetings(self, hospitals: &[Hospital], tz: Tz) -> Vec<Meeting> {
        if self.enabled {
            seed::weekday_meetings(hospitals, self.meetings_per_day, Utc::now(), tz)
        } else {
            Vec::new()
        }
    }

    fn demo_data(self, tz: Tz) -> (Vec<Hospital>, Vec<Meeting>) {
        let hospitals = self.demo_hospitals();
        let meetings = self.demo_meetings(&hospitals, tz);
        if self.enabled {
            tracing::info!(
                hospitals = hospitals.len(),
                meetings = meetings.len(),
                "Seeded demo data"
            );
        }
        (hospitals, meetings)
    }
}

/// ## Summary
/// Meeting and hospital operations over two in-memory stores.
///
/// Each store sits behind its own lock; no operation spans both stores
/// atomically. With the `Remote` backend every operation is a logged no-op.
#[derive(Debug)]
pub struct Scheduler {
    meetings: RwLock<RecordStore<Meeting>>,
    hospitals: RwLock<RecordStore<Hospital>>,
    expander: RecurrenceExpander,
    backend: StoreBackend,
    seed: SeedOptions,
}

impl Scheduler {
    /// ## Summary
    /// Builds the scheduler described by `settings`, seeding demo data when
    /// enabled for the in-memory backend.
    ///
    /// ## Errors
    /// Returns an error if the configured timezone is unknown.
    pub fn new(settings: &Settings) -> ServiceResult<Self> {
        let expander = RecurrenceExpander::from_config(&settings.calendar)?;
        let seed = SeedOptions {
            enabled: settings.store.seed_demo_data,
            meetings_per_day: settings.store.meetings_per_day,
        };
        let backend = settings.store.backend;

        if backend == StoreBackend::Remote {
            tracing::warn!("Remote store backend is not implemented; all operations are no-ops");
            return Ok(Self::build(expander, backend, seed, Vec::new(), Vec::new()));
        }

        let (hospitals, meetings) = seed.demo_data(expander.tz());
        Ok(Self::build(expander, backend, seed, hospitals, meetings))
    }

    /// Empty in-memory scheduler computing calendar days in `tz`.
    #[must_use]
    pub fn in_memory(tz: Tz) -> Self {
        Self::build(
            RecurrenceExpander::new(tz, DEFAULT_MAX_OCCURRENCES),
            StoreBackend::Memory,
            SeedOptions::default(),
            Vec::new(),
            Vec::new(),
        )
    }

    fn build(
        expander: RecurrenceExpander,
        backend: StoreBackend,
        seed: SeedOptions,
        hospitals: Vec<Hospital>,
        meetings: Vec<Meeting>,
    ) -> Self {
        Self {
            meetings: RwLock::new(RecordStore::with_records(meetings)),
            hospitals: RwLock::new(RecordStore::with_records(hospitals)),
            expander,
            backend,
            seed,
        }
    }

    /// Zone used for day boundaries and recurrence arithmetic.
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.expander.tz()
    }

    /// Current local date in the scheduler's zone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz()).date_naive()
    }

    #[must_use]
    pub const fn backend(&self) -> StoreBackend {
        self.backend
    }

    fn is_remote(&self, operation: &'static str) -> bool {
        let remote = matches!(self.backend, StoreBackend::Remote);
        if remote {
            tracing::warn!(operation, "Remote store backend not implemented, skipping");
        }
        remote
    }
}
