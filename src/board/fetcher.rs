use super::filters::FilterSet;
use crate::models::SlotView;
use reqwest::{Client, StatusCode, header::ACCEPT};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use url::Url;

pub const SLOTS_PATH: &str = "/api/slots";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to load slots (status {0})")]
    Status(StatusCode),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed slots payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid origin: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Deserialize)]
struct SlotsEnvelope {
    #[serde(default, deserialize_with = "falsy_as_empty")]
    slots: Vec<SlotView>,
}

/// `null`, `false`, `0` and `""` all mean "no slots".
fn falsy_as_empty<'de, D>(deserializer: D) -> Result<Vec<SlotView>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let falsy = match &value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    if falsy {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(serde::de::Error::custom)
}

/// Loads slots from `/api/slots` on a fixed origin.
#[derive(Debug, Clone)]
pub struct SlotFetcher {
    client: Client,
    origin: Url,
}

impl SlotFetcher {
    pub fn new(origin: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::new(),
            origin: Url::parse(origin)?,
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Request URL for `filters`: empty values are left out, the rest keep
    /// their filter order.
    pub fn slots_url(&self, filters: Option<&FilterSet>) -> Result<Url, FetchError> {
        let mut url = self.origin.join(SLOTS_PATH)?;
        if let Some(filters) = filters {
            let mut pairs = filters.query_pairs().peekable();
            if pairs.peek().is_some() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
        }
        Ok(url)
    }

    pub async fn fetch(&self, filters: Option<&FilterSet>) -> Result<Vec<SlotView>, FetchError> {
        let url = self.slots_url(filters)?;
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }

        let body = resp.bytes().await?;
        let envelope: SlotsEnvelope = serde_json::from_slice(&body)?;
        Ok(envelope.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_without_filters_has_no_query() {
        let fetcher = SlotFetcher::new("http://127.0.0.1:8080/some/page").unwrap();
        let url = fetcher.slots_url(None).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/slots");

        let url = fetcher.slots_url(Some(&FilterSet::new())).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn url_keeps_only_non_empty_filters_in_order() {
        let fetcher = SlotFetcher::new("http://localhost:8080").unwrap();
        let filters: FilterSet = [
            ("date", "2024-05-01"),
            ("time_from", ""),
            ("club", "Central Park"),
            ("free_only", "true"),
        ]
        .into_iter()
        .collect();

        let url = fetcher.slots_url(Some(&filters)).unwrap();
        assert_eq!(
            url.query(),
            Some("date=2024-05-01&club=Central+Park&free_only=true")
        );
    }

    #[test]
    fn invalid_origin_is_rejected() {
        assert!(matches!(
            SlotFetcher::new("not a url"),
            Err(FetchError::Url(_))
        ));
    }

    #[test]
    fn envelope_with_missing_or_falsy_slots_decodes_to_empty() {
        for body in [
            r#"{}"#,
            r#"{"slots":null}"#,
            r#"{"slots":false}"#,
            r#"{"slots":0}"#,
            r#"{"slots":0.0}"#,
            r#"{"slots":""}"#,
        ] {
            let envelope: SlotsEnvelope = serde_json::from_str(body).unwrap();
            assert!(envelope.slots.is_empty(), "{body}");
        }
    }

    #[test]
    fn envelope_with_truthy_non_list_is_rejected() {
        for body in [r#"{"slots":true}"#, r#"{"slots":"x"}"#, r#"{"slots":{}}"#] {
            assert!(serde_json::from_str::<SlotsEnvelope>(body).is_err(), "{body}");
        }
    }

    #[test]
    fn envelope_decodes_slot_list() {
        let body = r#"{"slots":[{"date":"d","time_range":"t","duration_minutes":30,"club":"c","court":"1","status":"free"}]}"#;
        let envelope: SlotsEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.slots.len(), 1);
        assert_eq!(envelope.slots[0].club, "c");
    }
}
