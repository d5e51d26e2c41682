//! Per-performance show file and availability checkpoint derivation.

use std::path::Path;

use chrono::{DateTime, Duration, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::ConfigError;

/// Which side of the performance a set of recommendations is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    PreShow,
    PostShow,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::PreShow, Phase::PostShow];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::PreShow => "pre_show",
            Phase::PostShow => "post_show",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Offsets from curtain-up at which pre-show venues must be open.
const PRE_SHOW_OFFSETS_MIN: [i64; 2] = [-60, -15];
/// Offsets from curtain-down at which post-show venues must be open.
const POST_SHOW_OFFSETS_MIN: [i64; 2] = [5, 40];

/// Timing for a single performance, in the theatre's local wall-clock time.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_local_datetime")]
    pub start_time: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_local_datetime")]
    pub end_time: NaiveDateTime,
}

impl ShowInfo {
    /// Checkpoints at which a venue must be open to be recommended for `phase`.
    ///
    /// Pre-show: an hour and a quarter hour before the start. Post-show: five
    /// and forty minutes after the end.
    #[must_use]
    pub fn checkpoints(&self, phase: Phase) -> Vec<NaiveDateTime> {
        let (anchor, offsets) = match phase {
            Phase::PreShow => (self.start_time, PRE_SHOW_OFFSETS_MIN),
            Phase::PostShow => (self.end_time, POST_SHOW_OFFSETS_MIN),
        };
        offsets
            .iter()
            .map(|&minutes| anchor + Duration::minutes(minutes))
            .collect()
    }
}

/// Parse an ISO-8601 timestamp into local wall-clock time.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]` with either `T` or a space as the
/// separator. A trailing UTC offset is accepted and dropped: the wall-clock
/// reading is what opening hours are compared against.
#[must_use]
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn deserialize_local_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_local_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid ISO-8601 timestamp '{raw}'")))
}

/// Load and validate a show file (JSON).
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_show(path: &Path) -> Result<ShowInfo, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_show(&content)
}

/// Parse and validate a show file from JSON text.
///
/// # Errors
///
/// Returns [`ConfigError::ShowParse`] for malformed JSON or timestamps and
/// [`ConfigError::Validation`] when the show ends before it starts.
pub fn parse_show(content: &str) -> Result<ShowInfo, ConfigError> {
    let show: ShowInfo = serde_json::from_str(content)?;
    if show.end_time <= show.start_time {
        return Err(ConfigError::Validation(format!(
            "show end_time {} is not after start_time {}",
            show.end_time, show.start_time
        )));
    }
    Ok(show)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parses_show_file() {
        let show = parse_show(
            r#"{"title": "Hamlet", "start_time": "2025-03-14T19:30:00", "end_time": "2025-03-14T22:05:00"}"#,
        )
        .unwrap();
        assert_eq!(show.title.as_deref(), Some("Hamlet"));
        assert_eq!(show.start_time, at(2025, 3, 14, 19, 30));
        assert_eq!(show.end_time, at(2025, 3, 14, 22, 5));
    }

    #[test]
    fn pre_show_checkpoints_are_sixty_and_fifteen_minutes_before_start() {
        let show = parse_show(
            r#"{"start_time": "2025-03-14T19:30", "end_time": "2025-03-14T22:00"}"#,
        )
        .unwrap();
        assert_eq!(
            show.checkpoints(Phase::PreShow),
            vec![at(2025, 3, 14, 18, 30), at(2025, 3, 14, 19, 15)]
        );
    }

    #[test]
    fn post_show_checkpoints_cross_midnight() {
        let show = parse_show(
            r#"{"start_time": "2025-03-14T21:00:00", "end_time": "2025-03-14T23:40:00"}"#,
        )
        .unwrap();
        assert_eq!(
            show.checkpoints(Phase::PostShow),
            vec![at(2025, 3, 14, 23, 45), at(2025, 3, 15, 0, 20)]
        );
    }

    #[test]
    fn offset_timestamps_keep_wall_clock_time() {
        let parsed = parse_local_datetime("2025-03-14T19:30:00-05:00").unwrap();
        assert_eq!(parsed, at(2025, 3, 14, 19, 30));
    }

    #[test]
    fn space_separator_is_accepted() {
        assert_eq!(
            parse_local_datetime("2025-03-14 19:30"),
            Some(at(2025, 3, 14, 19, 30))
        );
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(parse_local_datetime("next tuesday").is_none());
        let err = parse_show(r#"{"start_time": "soon", "end_time": "later"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ShowParse(_)));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = parse_show(
            r#"{"start_time": "2025-03-14T22:00:00", "end_time": "2025-03-14T19:30:00"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn phase_names_match_config_keys() {
        assert_eq!(Phase::PreShow.to_string(), "pre_show");
        assert_eq!(Phase::PostShow.to_string(), "post_show");
    }
}
