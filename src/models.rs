use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

pub const STATUS_FREE: &str = "free";
pub const STATUS_BUSY: &str = "busy";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSlot {
    pub id: u64,
    pub club: String,
    pub court: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: u32,
    pub status: String,
    #[serde(default)]
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotStore {
    pub next_id: u64,
    pub slots: Vec<StoredSlot>,
}

impl Default for SlotStore {
    fn default() -> Self {
        Self {
            next_id: 1,
            slots: Vec::new(),
        }
    }
}

/// A slot as it travels over `/api/slots` and as the board renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub date: String,
    pub time_range: String,
    #[serde(serialize_with = "serialize_minutes")]
    pub duration_minutes: f64,
    pub club: String,
    pub court: String,
    pub status: String,
    #[serde(default)]
    pub source: Option<String>,
}

impl SlotView {
    pub fn is_free(&self) -> bool {
        self.status == STATUS_FREE
    }
}

impl From<&StoredSlot> for SlotView {
    fn from(slot: &StoredSlot) -> Self {
        Self {
            id: Some(slot.id),
            date: slot.start.format("%d.%m.%Y").to_string(),
            time_range: format!(
                "{}\u{2013}{}",
                slot.start.format("%H:%M"),
                slot.end.format("%H:%M")
            ),
            duration_minutes: f64::from(slot.duration_minutes),
            club: slot.club.clone(),
            court: slot.court.clone(),
            status: slot.status.clone(),
            source: Some(slot.source.clone().unwrap_or_default()),
        }
    }
}

/// Whole minute counts go out as JSON integers.
fn serialize_minutes<S: Serializer>(minutes: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if minutes.fract() == 0.0 && minutes.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*minutes as i64)
    } else {
        serializer.serialize_f64(*minutes)
    }
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub slots: Vec<SlotView>,
}

/// Raw `/api/slots` query. Everything stays a string so malformed values
/// can be ignored instead of rejected.
#[derive(Debug, Default, Deserialize)]
pub struct SlotQuery {
    pub date: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub min_duration: Option<String>,
    pub club: Option<String>,
    pub free_only: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub updated: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(minutes: f64) -> SlotView {
        SlotView {
            id: None,
            date: "01.05.2024".into(),
            time_range: "18:00\u{2013}19:00".into(),
            duration_minutes: minutes,
            club: "Central".into(),
            court: "1".into(),
            status: STATUS_FREE.into(),
            source: None,
        }
    }

    #[test]
    fn whole_durations_serialize_as_integers() {
        let json = serde_json::to_value(view(60.0)).unwrap();
        assert_eq!(json["duration_minutes"], serde_json::json!(60));

        let json = serde_json::to_value(view(90.5)).unwrap();
        assert_eq!(json["duration_minutes"], serde_json::json!(90.5));
    }

    #[test]
    fn duration_accepts_any_json_number() {
        for raw in ["60", "60.0"] {
            let body = format!(
                r#"{{"date":"d","time_range":"t","duration_minutes":{raw},"club":"c","court":"1","status":"free"}}"#
            );
            let view: SlotView = serde_json::from_str(&body).unwrap();
            assert_eq!(view.duration_minutes, 60.0, "{raw}");
        }
    }
}
