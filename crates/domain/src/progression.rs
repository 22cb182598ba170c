use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;

use crate::WorkoutEntry;

/// Classification of an entry relative to its chronological predecessor.
#[derive(strum::AsRefStr, strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Up,
    Flat,
    Down,
    None,
}

impl Trend {
    fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Trend::Up
        } else if current < previous {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub weight: f64,
    pub trend: Trend,
}

/// Derive the progression of one exercise for one user.
///
/// Entries of other users or exercises are ignored, as are entries whose date cannot be
/// normalized. The result is in ascending date order and the first row never has a trend.
/// Entries sharing a date keep the order in which they were stored.
#[must_use]
pub fn compute_series(entries: &[WorkoutEntry], user: &str, exercise: &str) -> Vec<TrendRow> {
    let mut dated = entries
        .iter()
        .filter(|e| e.user == user && e.exercise == exercise)
        .filter_map(|e| match normalize_date(&e.date) {
            Some(date) => Some((date, e.weight)),
            None => {
                debug!("dropping entry {} with invalid date {:?}", e.id, e.date);
                None
            }
        })
        .collect::<Vec<_>>();

    dated.sort_by_key(|(date, _)| *date);

    let mut previous: Option<f64> = None;
    dated
        .into_iter()
        .map(|(date, weight)| {
            let trend = previous.map_or(Trend::None, |p| Trend::between(p, weight));
            previous = Some(weight);
            TrendRow {
                date,
                weight,
                trend,
            }
        })
        .collect()
}

/// Reverse a computed series for display, newest entry first.
#[must_use]
pub fn display_order(series: &[TrendRow]) -> Vec<TrendRow> {
    series.iter().rev().copied().collect()
}

/// Label every row with its month and day.
///
/// Rows of different years can share a label. A chart keyed by label shows only the later of
/// them, the series itself keeps both.
#[must_use]
pub fn format_for_chart(series: &[TrendRow]) -> Vec<(String, f64)> {
    series
        .iter()
        .map(|row| (row.date.format("%m/%d").to_string(), row.weight))
        .collect()
}

#[must_use]
pub fn normalize_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();

    if let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(date) {
        return Some(date_time.date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
        .map(|date_time| date_time.date())
}
