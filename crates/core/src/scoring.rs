use crate::models::FileRecord;
use crate::rules::{MAX_SCORE, MIME_WEIGHTS, MIN_SCORE, NAME_WEIGHTS, RECENCY_BANDS};
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Unclamped point sum, or `None` when the modification time does not parse.
pub fn raw_score(file: &FileRecord, now: DateTime<Utc>) -> Option<i32> {
    let modified = file.modified_at()?;
    let days_since = (now - modified).num_milliseconds() as f64 / MILLIS_PER_DAY;

    let mut score = RECENCY_BANDS
        .iter()
        .find(|(max_days, _)| days_since < *max_days)
        .map(|(_, points)| *points)
        .unwrap_or(0);

    let mime = file.mime_or_unknown();
    score += MIME_WEIGHTS
        .iter()
        .filter(|(pattern, _)| mime.contains(pattern))
        .map(|(_, points)| points)
        .sum::<i32>();

    let name = file.lower_name();
    score += NAME_WEIGHTS
        .iter()
        .filter(|(pattern, _)| name.contains(pattern))
        .map(|(_, points)| points)
        .sum::<i32>();

    Some(score)
}

/// Importance in `0..=5`. Unparseable timestamps score 0.
pub fn score(file: &FileRecord, now: DateTime<Utc>) -> u8 {
    raw_score(file, now)
        .map(|s| s.clamp(MIN_SCORE, MAX_SCORE) as u8)
        .unwrap_or(0)
}
