//! Core data models used throughout launchwatch.
//!
//! These types represent the advisories received from upstream, the windows
//! extracted from their detail text, and the enriched records that are stored.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::RecordError;

/// An advisory exactly as published upstream.
///
/// Only the fields the pipeline reads are typed; every other upstream field
/// is kept verbatim in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub advisoryid: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub details: String,
    pub advisorystarttime: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Advisory {
    /// Validate one raw upstream row against the advisory contract.
    pub fn from_row(row: Value) -> Result<Self, RecordError> {
        let advisoryid = row.get("advisoryid").and_then(Value::as_i64);
        if !row.is_object() {
            return Err(RecordError::Invalid {
                advisoryid,
                reason: "row is not a JSON object".to_string(),
            });
        }
        serde_json::from_value(row).map_err(|e| RecordError::Invalid {
            advisoryid,
            reason: e.to_string(),
        })
    }

    /// Calendar year of `advisorystarttime`, used for every window in this advisory.
    ///
    /// Accepts RFC 3339 (`2024-06-01T00:00:00Z`), a naive date-time
    /// (`2024-06-01T00:00:00`, optionally with fractional seconds or a space
    /// separator) and a bare date. The year is read from the literal
    /// timestamp; no timezone conversion takes place.
    pub fn reference_year(&self) -> Result<i32, RecordError> {
        let raw = self.advisorystarttime.trim();
        let year = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.year())
            .ok()
            .or_else(|| {
                ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .map(|dt| dt.year())
            })
            .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(|d| d.year()));

        year.ok_or_else(|| RecordError::StartTime {
            advisoryid: self.advisoryid,
            value: self.advisorystarttime.clone(),
        })
    }
}

/// One day/time window extracted from advisory detail text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedWindow {
    pub label: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    pub start_datetime: String,
    pub end_datetime: String,
}

impl ParsedWindow {
    /// Assemble a window, deriving the combined date-time fields.
    pub fn new(
        label: impl Into<String>,
        (start_date, end_date): (String, String),
        (start_time, end_time): (String, String),
    ) -> Self {
        Self {
            label: label.into(),
            start_datetime: format!("{}T{}", start_date, start_time),
            end_datetime: format!("{}T{}", end_date, end_time),
            start_date,
            end_date,
            start_time,
            end_time,
        }
    }
}

/// An advisory plus its extracted windows. This is the stored document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedAdvisory {
    #[serde(flatten)]
    pub advisory: Advisory,
    #[serde(rename = "parsedDetails")]
    pub parsed_details: Vec<ParsedWindow>,
}

impl EnrichedAdvisory {
    pub fn advisoryid(&self) -> i64 {
        self.advisory.advisoryid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_row_keeps_unknown_fields() {
        let row = json!({
            "advisoryid": 42,
            "summary": "SpaceX test",
            "details": "x",
            "advisorystarttime": "2024-06-01T00:00:00Z",
            "facility": "ZHU",
            "altitude": { "floor": 0, "ceiling": "UNL" }
        });
        let adv = Advisory::from_row(row).unwrap();
        assert_eq!(adv.advisoryid, 42);
        assert_eq!(adv.extra.get("facility"), Some(&json!("ZHU")));

        let back = serde_json::to_value(&adv).unwrap();
        assert_eq!(back["altitude"]["ceiling"], "UNL");
        assert_eq!(back["summary"], "SpaceX test");
    }

    #[test]
    fn test_from_row_null_text_fields() {
        let adv = Advisory::from_row(json!({
            "advisoryid": 1,
            "summary": null,
            "details": null,
            "advisorystarttime": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(adv.summary, "");
        assert_eq!(adv.details, "");
    }

    #[test]
    fn test_from_row_rejects_bad_rows() {
        let err = Advisory::from_row(json!({ "advisoryid": 9, "summary": "x" })).unwrap_err();
        assert_eq!(err.advisoryid(), Some(9));
        assert!(err.to_string().contains("advisorystarttime"));

        let err = Advisory::from_row(json!({ "advisoryid": "nine", "advisorystarttime": "2024-01-01" }))
            .unwrap_err();
        assert!(matches!(err, RecordError::Invalid { advisoryid: None, .. }));

        let err = Advisory::from_row(json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn test_reference_year_formats() {
        let mut adv = Advisory::from_row(json!({
            "advisoryid": 1,
            "advisorystarttime": "2024-06-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(adv.reference_year().unwrap(), 2024);

        for (raw, year) in [
            ("2023-12-31T23:30:00-05:00", 2023),
            ("2025-02-03T04:05:06", 2025),
            ("2025-02-03T04:05:06.250", 2025),
            ("2026-07-08 09:10:11", 2026),
            ("2022-03-04", 2022),
        ] {
            adv.advisorystarttime = raw.to_string();
            assert_eq!(adv.reference_year().unwrap(), year, "input {}", raw);
        }

        adv.advisorystarttime = "soon".to_string();
        assert!(matches!(
            adv.reference_year(),
            Err(RecordError::StartTime { advisoryid: 1, .. })
        ));
    }

    #[test]
    fn test_window_datetimes() {
        let w = ParsedWindow::new(
            "Launch Day",
            ("2024-06-03".into(), "2024-06-04".into()),
            ("12:00:00Z".into(), "18:00:00Z".into()),
        );
        assert_eq!(w.start_datetime, "2024-06-03T12:00:00Z");
        assert_eq!(w.end_datetime, "2024-06-04T18:00:00Z");

        let v = serde_json::to_value(&w).unwrap();
        assert_eq!(v["startDate"], "2024-06-03");
        assert_eq!(v["endDatetime"], "2024-06-04T18:00:00Z");
    }

    #[test]
    fn test_enriched_round_trips_through_document_shape() {
        let adv = Advisory::from_row(json!({
            "advisoryid": 5,
            "summary": "Starship",
            "details": "",
            "advisorystarttime": "2024-01-01",
            "state": "TX"
        }))
        .unwrap();
        let rec = EnrichedAdvisory {
            advisory: adv,
            parsed_details: vec![],
        };
        let doc = serde_json::to_value(&rec).unwrap();
        assert_eq!(doc["advisoryid"], 5);
        assert_eq!(doc["parsedDetails"], json!([]));
        assert_eq!(doc["state"], "TX");

        let back: EnrichedAdvisory = serde_json::from_value(doc).unwrap();
        assert_eq!(back, rec);
        assert!(!back.advisory.extra.contains_key("parsedDetails"));
    }
}
