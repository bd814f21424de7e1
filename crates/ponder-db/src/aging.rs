//! Age-band reporting.
//!
//! Bands are reporting-only: nothing here affects storage or matching.

use chrono::{DateTime, Duration, Utc};
use ponder_core::defaults::{PREVIEW_LENGTH, RECENT_WINDOW_DAYS};
use ponder_core::{AgeBand, AgedNote, AgingReport, AgingStats, Error, Note, Result};

const SECONDS_PER_DAY: i64 = 86_400;

/// Band for a note of the given age.
///
/// `aging` covers `[days_old, 2 × days_old)`, `stale` everything from
/// `2 × days_old` on.
pub fn classify_age(age: Duration, days_old: u32) -> AgeBand {
    // seconds in i64 cover every u32 threshold; chrono days would not
    let threshold = i64::from(days_old) * SECONDS_PER_DAY;
    let age = age.num_seconds();
    if age >= threshold * 2 {
        AgeBand::Stale
    } else if age >= threshold {
        AgeBand::Aging
    } else {
        AgeBand::Fresh
    }
}

/// Build an aging report for `notes` as seen at `now`.
pub fn build_aging_report(notes: &[Note], days_old: u32, now: DateTime<Utc>) -> Result<AgingReport> {
    if days_old == 0 {
        return Err(Error::Validation("days_old must be at least 1".to_string()));
    }

    let mut aging = Vec::new();
    let mut stale = Vec::new();
    let mut fresh_count = 0;
    let mut total_age_days = 0.0;

    for note in notes {
        let age = note.age(now);
        total_age_days += note.age_days(now);
        let entry = || AgedNote {
            id: note.id,
            preview: note.preview(PREVIEW_LENGTH),
            tags: note.tags.clone(),
            created_at: note.created_at,
            age_days: age.num_days(),
        };
        match classify_age(age, days_old) {
            AgeBand::Fresh => fresh_count += 1,
            AgeBand::Aging => aging.push(entry()),
            AgeBand::Stale => stale.push(entry()),
        }
    }

    aging.sort_by_key(|n| n.created_at);
    stale.sort_by_key(|n| n.created_at);

    let average_age_days = if notes.is_empty() {
        0.0
    } else {
        total_age_days / notes.len() as f64
    };

    Ok(AgingReport {
        days_old,
        stats: AgingStats {
            total: notes.len(),
            fresh_count,
            aging_count: aging.len(),
            stale_count: stale.len(),
            average_age_days,
        },
        aging,
        stale,
    })
}

/// Notes created within the fixed recent window.
pub fn count_recent(notes: &[Note], now: DateTime<Utc>) -> usize {
    let window = Duration::days(RECENT_WINDOW_DAYS);
    notes.iter().filter(|n| n.age(now) < window).count()
}
