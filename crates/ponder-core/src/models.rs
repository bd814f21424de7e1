//! Core data models for ponder.
//!
//! These types are shared across all ponder crates and represent the core
//! domain entities: persisted notes, the derived analysis of their text,
//! similarity results, and the recommendation handed back to callers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A captured thought.
///
/// `content` only ever grows (append-update), `tags` only ever grow by union,
/// and `context` is fixed at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `sha256:<hex>` of `content`; empty when read from an older file.
    #[serde(default)]
    pub hash: String,
}

impl Note {
    /// First line of the content, truncated to `max_chars`.
    pub fn preview(&self, max_chars: usize) -> String {
        preview_text(&self.content, max_chars)
    }

    /// Age of the note relative to `now`, never negative.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).max(Duration::zero())
    }

    /// Age in fractional days.
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        self.age(now).num_seconds() as f64 / 86_400.0
    }
}

/// Caller-supplied half of a note, before id and timestamps are assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl NoteDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Criteria for `find`. Every field is optional; an empty criteria matches all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteCriteria {
    /// Match notes carrying any of these tags (case-insensitive).
    pub tags: Option<Vec<String>>,
    /// Case-insensitive substring searched in content and context.
    pub content_substring: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub created_after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub created_before: Option<DateTime<Utc>>,
    /// Maximum results, applied after newest-first sorting.
    pub limit: Option<usize>,
}

/// First line of `text`, truncated to `max_chars` with an ellipsis.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let first = text.lines().next().unwrap_or("").trim();
    if first.chars().count() <= max_chars {
        first.to_string()
    } else {
        let cut: String = first.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut.trim_end())
    }
}

// =============================================================================
// CORPUS REPORTING
// =============================================================================

/// Tag with its number of carrying notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Corpus-wide statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total: usize,
    /// Notes created within the last 7 days.
    pub recent_count: usize,
    pub top_tags: Vec<TagCount>,
    /// Size of the persisted collection in bytes.
    pub storage_size_bytes: u64,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Reporting-only age band of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    /// Younger than `days_old`
    Fresh,
    /// In `[days_old, 2 × days_old)`
    Aging,
    /// At least `2 × days_old`
    Stale,
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh"),
            Self::Aging => write!(f, "aging"),
            Self::Stale => write!(f, "stale"),
        }
    }
}

/// A note listed in an aging report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgedNote {
    pub id: Uuid,
    pub preview: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub age_days: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgingStats {
    pub total: usize,
    pub fresh_count: usize,
    pub aging_count: usize,
    pub stale_count: usize,
    pub average_age_days: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingReport {
    pub days_old: u32,
    /// Oldest first.
    pub aging: Vec<AgedNote>,
    /// Oldest first.
    pub stale: Vec<AgedNote>,
    pub stats: AgingStats,
}

// =============================================================================
// ANALYSIS TYPES
// =============================================================================

/// Estimated urgency of a note.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Estimated complexity of the work a note describes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Overall tone of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Neutral => write!(f, "neutral"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Kind of work a note describes.
///
/// Closed set with `General` as the explicit fallback, so every branch on
/// category is exhaustive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Bug,
    Feature,
    Refactor,
    Infrastructure,
    Documentation,
    Testing,
    Research,
    #[default]
    General,
}

impl TaskCategory {
    /// All variants in tie-break order.
    pub const ALL: [TaskCategory; 8] = [
        Self::Bug,
        Self::Feature,
        Self::Refactor,
        Self::Infrastructure,
        Self::Documentation,
        Self::Testing,
        Self::Research,
        Self::General,
    ];
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bug => write!(f, "bug"),
            Self::Feature => write!(f, "feature"),
            Self::Refactor => write!(f, "refactor"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Documentation => write!(f, "documentation"),
            Self::Testing => write!(f, "testing"),
            Self::Research => write!(f, "research"),
            Self::General => write!(f, "general"),
        }
    }
}

impl std::str::FromStr for TaskCategory {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bug" | "bugfix" | "fix" => Ok(Self::Bug),
            "feature" | "enhancement" => Ok(Self::Feature),
            "refactor" | "refactoring" => Ok(Self::Refactor),
            "infrastructure" | "infra" | "ops" => Ok(Self::Infrastructure),
            "documentation" | "docs" => Ok(Self::Documentation),
            "testing" | "test" | "tests" => Ok(Self::Testing),
            "research" | "spike" => Ok(Self::Research),
            "general" | "other" => Ok(Self::General),
            _ => Err(format!("Invalid task category: {}", s)),
        }
    }
}

/// Confidence attached to an implementation-time estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateConfidence {
    Low,
    Medium,
    High,
}

impl EstimateConfidence {
    /// One level lower, saturating at `Low`.
    pub fn downgrade(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium | Self::Low => Self::Low,
        }
    }
}

impl std::fmt::Display for EstimateConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Result of tone analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneAnalysis {
    pub sentiment: Sentiment,
    pub urgency: Urgency,
    /// 0.0-1.0, grows with the number of vocabulary hits
    pub confidence: f32,
    pub positive_hits: usize,
    pub negative_hits: usize,
    pub urgent_hits: usize,
}

/// Result of complexity estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAssessment {
    pub level: Complexity,
    /// Weighted bucket score the level was derived from
    pub score: u32,
    /// Matched terms, for explanations
    pub signals: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImplementationEstimate {
    pub min_hours: f32,
    pub max_hours: f32,
    pub confidence: EstimateConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub reading_minutes: u32,
    pub implementation: ImplementationEstimate,
}

/// Derived summary of a note's text. Computed fresh on every analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub keywords: Vec<String>,
    pub tech_terms: Vec<String>,
    pub urgency: Urgency,
    pub sentiment: Sentiment,
    pub tone_confidence: f32,
    pub complexity: Complexity,
    pub complexity_score: u32,
    pub category: TaskCategory,
    pub time: TimeEstimate,
}

impl FeatureVector {
    /// Whether complexity/urgency mark the note as worth a conversation.
    pub fn is_high_priority(&self) -> bool {
        self.complexity == Complexity::High
            || self.urgency == Urgency::High
            || (self.complexity >= Complexity::Medium && self.urgency >= Urgency::Medium)
    }
}

/// How much a note is worth promoting into a formal task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicValue {
    pub score: u32,
    /// Project-impact buckets that matched (e.g. "reliability")
    pub impact_areas: Vec<String>,
}

// =============================================================================
// SIMILARITY TYPES
// =============================================================================

/// Per-signal breakdown of a similarity score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub content: f32,
    pub tags: f32,
    pub context: f32,
    pub recency: f32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f32 {
        self.content + self.tags + self.context + self.recency
    }
}

/// A stored note related to the query note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub note_id: Uuid,
    pub preview: String,
    pub created_at: DateTime<Utc>,
    pub score: f32,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
}

/// A structured work item supplied by the external task catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingTask {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub file_reference: Option<String>,
}

/// An existing task related to the query note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMatch {
    pub task: ExistingTask,
    pub score: f32,
    pub reasons: Vec<String>,
}

/// Either kind of match, as consumed by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchCandidate {
    Note(SimilarityResult),
    Task(TaskMatch),
}

impl MatchCandidate {
    pub fn score(&self) -> f32 {
        match self {
            Self::Note(n) => n.score,
            Self::Task(t) => t.score,
        }
    }

    pub fn reasons(&self) -> &[String] {
        match self {
            Self::Note(n) => &n.reasons,
            Self::Task(t) => &t.reasons,
        }
    }

    /// Short human-readable label for the matched item.
    pub fn label(&self) -> String {
        match self {
            Self::Note(n) => format!("note {} \"{}\"", n.note_id, n.preview),
            Self::Task(t) => match &t.task.file_reference {
                Some(file) => format!("task \"{}\" ({})", t.task.title, file),
                None => format!("task \"{}\"", t.task.title),
            },
        }
    }
}

// =============================================================================
// RECOMMENDATION TYPES
// =============================================================================

/// Which task-creation flow a `create_new` recommendation should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationPath {
    Simple,
    Comprehensive,
}

impl std::fmt::Display for CreationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Comprehensive => write!(f, "comprehensive"),
        }
    }
}

/// Terminal outcome of the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "path", rename_all = "snake_case")]
pub enum RecommendedAction {
    MergeIntoExisting,
    CreateNew(CreationPath),
    ScheduleInterview,
    ArchiveOnly,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MergeIntoExisting => "merge_into_existing",
            Self::CreateNew(_) => "create_new",
            Self::ScheduleInterview => "schedule_interview",
            Self::ArchiveOnly => "archive_only",
        }
    }
}

impl std::fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateNew(path) => write!(f, "create_new ({})", path),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Suggested next action for a freshly captured note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: RecommendedAction,
    /// Merge target, set only for `merge_into_existing`
    pub best_match: Option<MatchCandidate>,
    /// Other related items worth a look
    pub see_also: Vec<MatchCandidate>,
    pub features: Option<FeatureVector>,
    pub strategic_value: Option<StrategicValue>,
    /// 0.0-1.0
    pub confidence: f32,
    pub reason: String,
    /// True when part of the analysis failed and the outcome fell back
    pub degraded: bool,
}

impl Recommendation {
    /// Fallback used whenever analysis fails.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            action: RecommendedAction::ArchiveOnly,
            best_match: None,
            see_also: Vec::new(),
            features: None,
            strategic_value: None,
            confidence: 0.3,
            reason: reason.into(),
            degraded: true,
        }
    }
}
