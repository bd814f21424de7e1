//! Plain-text summaries for terminals and chat surfaces.

use std::fmt::Write;

use ponder_core::defaults::PREVIEW_LENGTH;
use ponder_core::{
    AgedNote, AgingReport, CorpusStats, MatchCandidate, Note, Recommendation, RecommendedAction,
    SimilarityResult,
};

/// Summary shown after a capture.
pub fn capture_summary(
    note: &Note,
    recommendation: &Recommendation,
    related: &[SimilarityResult],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Captured note {}", note.id);
    if !note.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", note.tags.join(", "));
    }

    let _ = writeln!(
        out,
        "\nRecommendation: {} (confidence {:.0}%)",
        recommendation.action,
        recommendation.confidence * 100.0
    );
    if recommendation.degraded {
        let _ = writeln!(out, "  (analysis degraded)");
    }
    let _ = writeln!(out, "  {}", recommendation.reason);

    match (&recommendation.action, &recommendation.best_match) {
        (RecommendedAction::MergeIntoExisting, Some(best)) => {
            let _ = writeln!(out, "  Merge into: {}", best.label());
        }
        (RecommendedAction::ScheduleInterview, _) => {
            let _ = writeln!(out, "  Worth a short interview before turning into a task.");
        }
        (RecommendedAction::CreateNew(path), _) => {
            let _ = writeln!(out, "  Create a new task using the {} flow.", path);
        }
        _ => {}
    }

    if let Some(features) = &recommendation.features {
        let _ = writeln!(
            out,
            "\nAnalysis: {} | complexity {} | urgency {} | tone {}",
            features.category, features.complexity, features.urgency, features.sentiment
        );
        let _ = writeln!(
            out,
            "  Estimate: {:.1}-{:.1}h ({} confidence)",
            features.time.implementation.min_hours,
            features.time.implementation.max_hours,
            features.time.implementation.confidence
        );
        if !features.tech_terms.is_empty() {
            let _ = writeln!(out, "  Tech: {}", features.tech_terms.join(", "));
        }
    }

    if !recommendation.see_also.is_empty() {
        let _ = writeln!(out, "\nSee also:");
        for candidate in &recommendation.see_also {
            let _ = writeln!(out, "  - {}", candidate_line(candidate));
        }
    }

    if !related.is_empty() {
        let _ = writeln!(out, "\nRelated notes ({}):", related.len());
        for result in related {
            let _ = writeln!(out, "  - {}", similarity_line(result));
        }
    }
    out
}

fn candidate_line(candidate: &MatchCandidate) -> String {
    format!("{} [{:.1}]", candidate.label(), candidate.score())
}

/// One line describing a related note.
pub fn similarity_line(result: &SimilarityResult) -> String {
    if result.reasons.is_empty() {
        format!("{:.1} {} \"{}\"", result.score, result.note_id, result.preview)
    } else {
        format!(
            "{:.1} {} \"{}\" ({})",
            result.score,
            result.note_id,
            result.preview,
            result.reasons.join("; ")
        )
    }
}

pub fn stats_report(stats: &CorpusStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Notes: {}", stats.total);
    let _ = writeln!(out, "Captured in the last 7 days: {}", stats.recent_count);
    let _ = writeln!(out, "Storage: {}", human_bytes(stats.storage_size_bytes));
    match stats.last_updated {
        Some(at) => {
            let _ = writeln!(out, "Last updated: {}", at.format("%Y-%m-%d %H:%M UTC"));
        }
        None => {
            let _ = writeln!(out, "Last updated: never");
        }
    }
    if !stats.top_tags.is_empty() {
        let _ = writeln!(out, "Top tags:");
        for tag in &stats.top_tags {
            let _ = writeln!(out, "  {:<24} {}", tag.tag, tag.count);
        }
    }
    out
}

pub fn aging_report(report: &AgingReport) -> String {
    let mut out = String::new();
    let s = &report.stats;
    let days = u64::from(report.days_old);
    let _ = writeln!(
        out,
        "Notes: {} (fresh {}, aging {}, stale {}), average age {:.1} days",
        s.total, s.fresh_count, s.aging_count, s.stale_count, s.average_age_days
    );
    aged_section(
        &mut out,
        &format!("Aging ({}-{} days)", days, days * 2),
        &report.aging,
    );
    aged_section(
        &mut out,
        &format!("Stale ({}+ days)", days * 2),
        &report.stale,
    );
    out
}

fn aged_section(out: &mut String, title: &str, notes: &[AgedNote]) {
    if notes.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}:", title);
    for note in notes {
        let tags = if note.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", note.tags.join(", "))
        };
        let _ = writeln!(out, "  {:>3}d {} {}{}", note.age_days, note.id, note.preview, tags);
    }
}

/// One line per note, newest first as given.
pub fn note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No matching notes.\n".to_string();
    }
    let mut out = String::new();
    for note in notes {
        let _ = writeln!(
            out,
            "{} {} {}",
            note.created_at.format("%Y-%m-%d"),
            note.id,
            note.preview(PREVIEW_LENGTH)
        );
    }
    out
}

/// Full note followed by its related notes.
pub fn note_detail(note: &Note, related: &[SimilarityResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Note {}", note.id);
    let _ = writeln!(out, "Created: {}", note.created_at.format("%Y-%m-%d %H:%M UTC"));
    if note.updated_at != note.created_at {
        let _ = writeln!(out, "Updated: {}", note.updated_at.format("%Y-%m-%d %H:%M UTC"));
    }
    if !note.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", note.tags.join(", "));
    }
    if let Some(context) = &note.context {
        let _ = writeln!(out, "Context: {}", context);
    }
    let _ = writeln!(out, "\n{}", note.content);
    if !related.is_empty() {
        let _ = writeln!(out, "\nRelated:");
        for result in related {
            let _ = writeln!(out, "  - {}", similarity_line(result));
        }
    }
    out
}

fn human_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}
