//! Centralized default constants for ponder.
//!
//! **This module is the single source of truth** for shared default values.
//! The similarity and decision thresholds below are empirically chosen
//! starting points; every one of them is exposed again as a configuration
//! field so deployments can tune them.

// =============================================================================
// STORAGE
// =============================================================================

/// Hidden directory (relative to the workspace root) holding the note store.
pub const STORAGE_DIR_NAME: &str = ".ponder";

/// File name of the persisted note collection.
pub const NOTES_FILE_NAME: &str = "thoughts.json";

/// File name of the derived corpus index.
pub const INDEX_FILE_NAME: &str = "index.json";

/// File name of the optional TOML configuration inside the storage directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Current on-disk index format version.
pub const INDEX_VERSION: u32 = 1;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum characters of note content; longer content is truncated.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Maximum characters of a context string.
pub const MAX_CONTEXT_CHARS: usize = 500;

/// Maximum characters per tag.
pub const MAX_TAG_CHARS: usize = 64;

/// Maximum number of tags per note.
pub const MAX_TAGS: usize = 32;

// =============================================================================
// REPORTING
// =============================================================================

/// Window (days) for the `recent_count` statistic. Fixed, not configurable.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Number of tags reported in `top_tags`.
pub const TOP_TAGS_LIMIT: usize = 10;

/// Default `days_old` threshold for aging reports.
pub const AGING_DAYS: u32 = 7;

/// Default preview length in characters for rendered notes and matches.
pub const PREVIEW_LENGTH: usize = 80;

// =============================================================================
// LEXICAL ANALYSIS
// =============================================================================

/// Maximum keywords kept per text (first-occurrence order).
pub const MAX_KEYWORDS: usize = 15;

/// Minimum keyword length in characters.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Reading speed used for reading-time estimates.
pub const READING_WORDS_PER_MINUTE: usize = 200;

/// Base implementation estimate before category/complexity multipliers.
pub const BASE_IMPLEMENTATION_HOURS: f32 = 4.0;

// =============================================================================
// SIMILARITY
// =============================================================================

/// Maximum points from keyword overlap.
pub const CONTENT_WEIGHT: f32 = 40.0;

/// Multiplier applied to the raw Jaccard ratio before the overlap curve.
pub const CONTENT_OVERLAP_SCALE: f32 = 5.5;

/// Raw keyword overlap above which shared keywords are listed as a reason.
pub const KEYWORD_REASON_RATIO: f32 = 0.3;

/// Maximum points from tag overlap.
pub const TAG_WEIGHT: f32 = 30.0;

/// Flat bonus when both contexts share a term.
pub const CONTEXT_WEIGHT: f32 = 20.0;

/// Maximum recency bonus (for an existing note of age zero).
pub const RECENCY_WEIGHT: f32 = 10.0;

/// Age (days) at which the recency bonus reaches zero.
pub const RECENCY_WINDOW_DAYS: f32 = 7.0;

/// Minimum total score for a candidate to be reported.
pub const INCLUSION_THRESHOLD: f32 = 15.0;

/// Time budget for a single corpus scan in milliseconds.
pub const SCAN_BUDGET_MS: u64 = 2_000;

// =============================================================================
// DECISION
// =============================================================================

/// Best-match score above which a note is merged into the match.
pub const STRONG_MATCH_THRESHOLD: f32 = 35.0;

/// Best-match score above which a match counts as "related but distinct".
pub const RELATED_MATCH_THRESHOLD: f32 = 15.0;

/// Strategic value score at or above which a note warrants a new task.
pub const STRATEGIC_VALUE_THRESHOLD: u32 = 6;

/// Creation-complexity score at or above which the comprehensive path is used.
pub const COMPREHENSIVE_THRESHOLD: u32 = 3;

/// Maximum see-also matches attached to a recommendation.
pub const SEE_ALSO_LIMIT: usize = 3;
