use crate::models::{STATUS_BUSY, STATUS_FREE, SlotStore, StoredSlot};
use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike, Utc};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source {0} is unavailable")]
    Unavailable(String),
    #[error("source returned an invalid slot: {0}")]
    InvalidSlot(String),
}

/// A slot as produced by a source, before it gets an id in the store.
#[derive(Debug, Clone)]
pub struct SourceSlot {
    pub club: String,
    pub court: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: u32,
    pub status: String,
    pub source: String,
}

pub trait SlotSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch_slots(&self, now: NaiveDateTime) -> Result<Vec<SourceSlot>, SourceError>;
}

/// Fixed set of slots around the current hour, used for development and
/// to populate an empty store.
pub struct MockSource;

impl SlotSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn fetch_slots(&self, now: NaiveDateTime) -> Result<Vec<SourceSlot>, SourceError> {
        let hour = truncate_to_hour(now);
        let today = hour.date();
        let at = |h: u32, m: u32| {
            NaiveTime::from_hms_opt(h, m, 0)
                .map(|time| today.and_time(time))
                .ok_or_else(|| SourceError::InvalidSlot(format!("{h:02}:{m:02}")))
        };
        let tomorrow = hour + Duration::days(1) + Duration::hours(2);

        Ok(vec![
            self.slot("Tsaritsyno Tennis", "Court 1", at(18, 0)?, at(19, 0)?, STATUS_FREE),
            self.slot("MosTennis Club", "Court 3", at(19, 30)?, at(21, 0)?, STATUS_BUSY),
            self.slot(
                "YClients Arena",
                "Court 2",
                tomorrow,
                tomorrow + Duration::hours(1),
                STATUS_FREE,
            ),
        ])
    }
}

impl MockSource {
    fn slot(
        &self,
        club: &str,
        court: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: &str,
    ) -> SourceSlot {
        SourceSlot {
            club: club.to_string(),
            court: court.to_string(),
            start,
            end,
            duration_minutes: (end - start).num_minutes().max(0) as u32,
            status: status.to_string(),
            source: self.name().to_string(),
        }
    }
}

pub fn default_sources() -> Vec<Box<dyn SlotSource>> {
    vec![Box::new(MockSource)]
}

/// Clears the store and refills it from every source in order. A failing
/// source is logged and skipped. Returns the number of slots stored.
pub fn replace_from_sources(
    data: &mut SlotStore,
    sources: &[Box<dyn SlotSource>],
    now: NaiveDateTime,
) -> usize {
    data.slots.clear();
    let stamp = Utc::now();

    for source in sources {
        info!(source = source.name(), "running slot source");
        let slots = match source.fetch_slots(now) {
            Ok(slots) => slots,
            Err(err) => {
                warn!(source = source.name(), "slot source failed: {err}");
                continue;
            }
        };

        for slot in slots {
            let id = data.next_id;
            data.next_id = data.next_id.saturating_add(1);
            data.slots.push(StoredSlot {
                id,
                club: slot.club,
                court: slot.court,
                start: slot.start,
                end: slot.end,
                duration_minutes: slot.duration_minutes,
                status: slot.status,
                source: Some(slot.source),
                created_at: stamp,
                updated_at: stamp,
            });
        }
    }

    info!(total = data.slots.len(), "slot update finished");
    data.slots.len()
}

fn truncate_to_hour(now: NaiveDateTime) -> NaiveDateTime {
    now.with_minute(0)
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct BrokenSource;

    impl SlotSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn fetch_slots(&self, _now: NaiveDateTime) -> Result<Vec<SourceSlot>, SourceError> {
            Err(SourceError::Unavailable(self.name().to_string()))
        }
    }

    fn morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 42, 17)
            .unwrap()
    }

    #[test]
    fn mock_source_builds_slots_around_current_hour() {
        let slots = MockSource.fetch_slots(morning()).unwrap();
        assert_eq!(slots.len(), 3);

        assert_eq!(slots[0].start.to_string(), "2024-05-01 18:00:00");
        assert_eq!(slots[0].duration_minutes, 60);
        assert_eq!(slots[0].status, STATUS_FREE);

        assert_eq!(slots[1].duration_minutes, 90);
        assert_eq!(slots[1].status, STATUS_BUSY);

        assert_eq!(slots[2].start.to_string(), "2024-05-02 11:00:00");
        assert!(slots.iter().all(|slot| slot.source == "mock"));
    }

    #[test]
    fn failing_source_is_skipped() {
        let sources: Vec<Box<dyn SlotSource>> = vec![Box::new(BrokenSource), Box::new(MockSource)];
        let mut data = SlotStore::default();

        let count = replace_from_sources(&mut data, &sources, morning());

        assert_eq!(count, 3);
        let ids: Vec<u64> = data.slots.iter().map(|slot| slot.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn replacing_clears_previous_slots_and_keeps_ids_growing() {
        let sources = default_sources();
        let mut data = SlotStore::default();
        replace_from_sources(&mut data, &sources, morning());
        replace_from_sources(&mut data, &sources, morning());

        assert_eq!(data.slots.len(), 3);
        assert_eq!(data.slots[0].id, 4);
        assert_eq!(data.next_id, 7);
    }
}
