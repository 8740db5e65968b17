use crate::models::{STATUS_FREE, SlotQuery, SlotView, StoredSlot};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parsed form of a [`SlotQuery`]. Malformed parameters are dropped here
/// rather than rejected.
#[derive(Debug, Default, PartialEq)]
pub struct SlotFilter {
    pub window: Option<(NaiveDateTime, NaiveDateTime)>,
    pub min_duration: Option<u32>,
    pub club: Option<String>,
    pub free_only: bool,
}

impl SlotFilter {
    pub fn from_query(query: &SlotQuery) -> Self {
        let window = non_empty(&query.date).and_then(|date| {
            parse_window(date, non_empty(&query.time_from), non_empty(&query.time_to))
        });

        let min_duration = non_empty(&query.min_duration)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|minutes| *minutes > 0);

        Self {
            window,
            min_duration,
            club: non_empty(&query.club).map(str::to_string),
            free_only: query.free_only.as_deref() == Some("true"),
        }
    }

    pub fn matches(&self, slot: &StoredSlot) -> bool {
        if let Some((from, to)) = self.window {
            if slot.start < from || slot.start > to {
                return false;
            }
        }
        if let Some(minutes) = self.min_duration {
            if slot.duration_minutes < minutes {
                return false;
            }
        }
        if let Some(club) = &self.club {
            if &slot.club != club {
                return false;
            }
        }
        !self.free_only || slot.status == STATUS_FREE
    }
}

/// Applies `filter` and returns the matching slots ordered by start time.
pub fn select_slots(slots: &[StoredSlot], filter: &SlotFilter) -> Vec<SlotView> {
    let mut matching: Vec<&StoredSlot> = slots.iter().filter(|slot| filter.matches(slot)).collect();
    matching.sort_by_key(|slot| slot.start);
    matching.into_iter().map(SlotView::from).collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn parse_window(
    date: &str,
    time_from: Option<&str>,
    time_to: Option<&str>,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let start = match time_from {
        Some(value) => parse_hour_minute(value)?,
        None => NaiveTime::MIN,
    };
    let end = match time_to {
        Some(value) => parse_hour_minute(value)?,
        None => NaiveTime::from_hms_opt(23, 59, 59)?,
    };
    Some((day.and_time(start), day.and_time(end)))
}

fn parse_hour_minute(value: &str) -> Option<NaiveTime> {
    let (hours, minutes) = value.split_once(':')?;
    let hours = hours.trim().parse::<u32>().ok()?;
    let minutes = minutes.trim().parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}
