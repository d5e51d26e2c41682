//! Google Places web service response types.
//!
//! Only the fields the curation engine reads are modelled. Every response
//! carries a top-level `status` string; see [`super::check_status`].

use curtaincall_core::Coordinate;
use serde::Deserialize;

use crate::error::PlacesError;
use crate::hours::{parse_hhmm, OpeningHours, Period};
use crate::types::RawCandidate;

/// A top-level response carrying the provider's `status` and optional
/// `error_message`.
pub(crate) trait StatusEnvelope {
    fn status(&self) -> &str;
    fn error_message(&self) -> Option<&str>;
}

// ---------------------------------------------------------------------------
// Nearby Search
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    /// Kept as raw values so one malformed entry does not sink the page.
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

impl StatusEnvelope for NearbySearchResponse {
    fn status(&self) -> &str {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    /// Short street address.
    #[serde(default)]
    pub vicinity: Option<String>,
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<NearbyResult> for RawCandidate {
    fn from(result: NearbyResult) -> Self {
        Self {
            id: result.place_id,
            name: result.name,
            address: result.vicinity.unwrap_or_default(),
            coordinate: Coordinate::new(result.geometry.location.lat, result.geometry.location.lng),
            rating: result.rating,
        }
    }
}

// ---------------------------------------------------------------------------
// Place Details (fields=opening_hours)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub result: Option<DetailsResult>,
}

impl StatusEnvelope for DetailsResponse {
    fn status(&self) -> &str {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResult {
    #[serde(default)]
    pub opening_hours: Option<OpeningHoursBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpeningHoursBlock {
    #[serde(default)]
    pub periods: Vec<PeriodEntry>,
}

/// One `{open, close}` pair. Days run Sunday = 0 .. Saturday = 6; times are `"HHMM"`.
#[derive(Debug, Deserialize)]
pub(crate) struct PeriodEntry {
    #[serde(default)]
    pub open: Option<DayTime>,
    #[serde(default)]
    pub close: Option<DayTime>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DayTime {
    pub day: u8,
    pub time: String,
}

impl PeriodEntry {
    /// Interpret one period.
    ///
    /// The provider marks around-the-clock venues with a single period that
    /// opens Sunday at `0000` and has no close.
    fn to_period(&self) -> Result<Period, String> {
        let open = self.open.as_ref().ok_or("period has no open time")?;

        let Some(close) = self.close.as_ref() else {
            if open.day == 0 && open.time == "0000" {
                return Ok(Period::AlwaysOpen);
            }
            return Err(format!(
                "period opening day {} at {} has no close time",
                open.day, open.time
            ));
        };

        if open.day > 6 {
            return Err(format!("day {} out of range", open.day));
        }
        let open_time =
            parse_hhmm(&open.time).ok_or_else(|| format!("bad open time '{}'", open.time))?;
        let close_time =
            parse_hhmm(&close.time).ok_or_else(|| format!("bad close time '{}'", close.time))?;

        Ok(Period::Window {
            day: open.day,
            open: open_time,
            close: close_time,
        })
    }
}

impl OpeningHoursBlock {
    /// Convert every period; a single malformed period fails the whole block.
    pub(crate) fn into_opening_hours(self, place_id: &str) -> Result<OpeningHours, PlacesError> {
        self.periods
            .iter()
            .map(PeriodEntry::to_period)
            .collect::<Result<Vec<_>, _>>()
            .map(OpeningHours::new)
            .map_err(|reason| PlacesError::MalformedHours {
                place_id: place_id.to_string(),
                reason,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(json: serde_json::Value) -> OpeningHoursBlock {
        serde_json::from_value(json).expect("valid opening_hours block")
    }

    #[test]
    fn converts_regular_periods() {
        let hours = block(serde_json::json!({
            "periods": [
                { "open": { "day": 5, "time": "1800" }, "close": { "day": 6, "time": "0200" } },
                { "open": { "day": 1, "time": "0900" }, "close": { "day": 1, "time": "1700" } }
            ]
        }))
        .into_opening_hours("p1")
        .unwrap();
        assert_eq!(
            hours.periods,
            vec![
                Period::Window { day: 5, open: 1800, close: 200 },
                Period::Window { day: 1, open: 900, close: 1700 },
            ]
        );
    }

    #[test]
    fn sunday_midnight_without_close_is_always_open() {
        let hours = block(serde_json::json!({
            "periods": [ { "open": { "day": 0, "time": "0000" } } ]
        }))
        .into_opening_hours("p1")
        .unwrap();
        assert_eq!(hours.periods, vec![Period::AlwaysOpen]);
    }

    #[test]
    fn other_period_without_close_is_malformed() {
        let err = block(serde_json::json!({
            "periods": [ { "open": { "day": 3, "time": "0800" } } ]
        }))
        .into_opening_hours("p1")
        .unwrap_err();
        assert!(matches!(err, PlacesError::MalformedHours { ref place_id, .. } if place_id == "p1"));
    }

    #[test]
    fn bad_time_string_is_malformed() {
        let err = block(serde_json::json!({
            "periods": [ { "open": { "day": 3, "time": "8am" }, "close": { "day": 3, "time": "1700" } } ]
        }))
        .into_opening_hours("p1")
        .unwrap_err();
        assert!(err.to_string().contains("bad open time"), "got: {err}");
    }

    #[test]
    fn missing_periods_means_no_windows() {
        let hours = block(serde_json::json!({ "open_now": true }))
            .into_opening_hours("p1")
            .unwrap();
        assert!(hours.periods.is_empty());
    }

    #[test]
    fn nearby_result_without_vicinity_gets_empty_address() {
        let result: NearbyResult = serde_json::from_value(serde_json::json!({
            "place_id": "abc",
            "name": "Corner Bistro",
            "geometry": { "location": { "lat": 1.5, "lng": -2.5 } }
        }))
        .unwrap();
        let raw = RawCandidate::from(result);
        assert_eq!(raw.address, "");
        assert_eq!(raw.rating, None);
        assert_eq!(raw.coordinate, Coordinate::new(1.5, -2.5));
    }
}
