//! Fixed word lists driving the heuristics.
//!
//! Terms are lowercase. A term made only of letters and digits matches a
//! whole token; anything else (spaces, `/`, `.`, `-`) matches as a substring.
//! See [`crate::text::TermMatcher`].

use std::collections::HashSet;

use once_cell::sync::Lazy;
use ponder_core::TaskCategory;

// =============================================================================
// KEYWORDS
// =============================================================================

/// Common English words that carry no topical signal.
///
/// Work verbs ("add", "implement", "fix") stay out of this list.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "with", "that", "this", "from", "into", "onto", "have", "has",
        "had", "was", "were", "are", "been", "being", "but", "not", "you", "your", "our",
        "ours", "they", "them", "their", "its", "can", "could", "should", "would", "will",
        "shall", "may", "might", "must", "just", "also", "then", "than", "when", "where",
        "what", "which", "who", "whom", "why", "how", "all", "any", "each", "some", "such",
        "more", "most", "other", "only", "own", "same", "very", "too", "there", "here",
        "about", "above", "below", "over", "under", "again", "once", "out", "off", "does",
        "did", "doing", "done", "while", "because", "until", "after", "before", "between",
        "through", "during", "against", "these", "those", "him", "her", "his", "hers",
        "she", "itself", "myself", "yourself", "ourselves", "themselves", "let", "lets",
        "get", "got", "like", "maybe", "probably", "really", "thing", "things", "stuff",
        "etc", "via", "per", "one", "two", "now", "still", "even", "much", "many", "well",
        "yet", "use", "using", "need", "needs", "want", "wants", "think", "dont", "cant",
        "wont", "isnt", "arent", "doesnt", "didnt", "im", "ive", "weve", "thats", "theres",
    ]
    .into_iter()
    .collect()
});

// =============================================================================
// TECH TERMS
// =============================================================================

/// Domain/technology vocabulary, in reporting order.
pub const TECH_TERMS: &[&str] = &[
    "api",
    "rest",
    "graphql",
    "grpc",
    "http",
    "websocket",
    "database",
    "postgres",
    "postgresql",
    "sql",
    "sqlite",
    "redis",
    "cache",
    "caching",
    "queue",
    "kafka",
    "nats",
    "rabbitmq",
    "message bus",
    "event sourcing",
    "pub/sub",
    "docker",
    "kubernetes",
    "k8s",
    "terraform",
    "ci/cd",
    "aws",
    "gcp",
    "azure",
    "lambda",
    "microservice",
    "microservices",
    "rust",
    "python",
    "typescript",
    "javascript",
    "react",
    "node.js",
    "json",
    "yaml",
    "oauth",
    "jwt",
    "tls",
    "retry",
    "backoff",
    "exponential backoff",
    "circuit breaker",
    "rate limiting",
    "load balancer",
    "timeout",
    "idempotency",
    "webhook",
    "cron",
    "git",
    "github",
];

// =============================================================================
// COMPLEXITY
// =============================================================================

/// Complexity buckets as `(name, weight, terms)`.
pub const COMPLEXITY_BUCKETS: &[(&str, u32, &[&str])] = &[
    (
        "architecture",
        4,
        &[
            "architecture",
            "architectural",
            "redesign",
            "distributed",
            "microservice",
            "microservices",
            "system design",
            "overhaul",
        ],
    ),
    (
        "integration",
        3,
        &[
            "integration",
            "integrate",
            "scalability",
            "scale",
            "scaling",
            "performance",
            "throughput",
            "latency",
            "concurrency",
        ],
    ),
    (
        "data-security",
        2,
        &[
            "api",
            "database",
            "schema",
            "migration",
            "security",
            "authentication",
            "authorization",
            "encryption",
        ],
    ),
    (
        "cross-cutting",
        2,
        &["multiple", "cross-service", "across services", "several", "every service"],
    ),
    (
        "new-feature",
        1,
        &["new", "feature", "add", "implement", "create", "build"],
    ),
];

// =============================================================================
// TONE
// =============================================================================

pub const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "better",
    "improve",
    "improved",
    "improvement",
    "nice",
    "love",
    "excellent",
    "clean",
    "elegant",
    "success",
    "successful",
    "works",
    "happy",
    "easy",
    "fast",
    "simple",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bug",
    "broken",
    "fail",
    "fails",
    "failed",
    "failure",
    "failures",
    "error",
    "errors",
    "crash",
    "crashes",
    "slow",
    "problem",
    "issue",
    "issues",
    "wrong",
    "bad",
    "painful",
    "annoying",
    "flaky",
    "leak",
    "confusing",
];

pub const URGENT_WORDS: &[&str] = &[
    "urgent",
    "urgently",
    "asap",
    "critical",
    "immediately",
    "blocker",
    "blocking",
    "emergency",
    "outage",
    "hotfix",
    "production down",
    "deadline",
];

// =============================================================================
// CATEGORY
// =============================================================================

/// Category signals; ties resolve in [`TaskCategory::ALL`] order.
pub const CATEGORY_TERMS: &[(TaskCategory, &[&str])] = &[
    (
        TaskCategory::Bug,
        &[
            "bug", "fix", "broken", "crash", "crashes", "error", "errors", "regression",
            "failing", "fails", "defect", "incorrect",
        ],
    ),
    (
        TaskCategory::Feature,
        &[
            "feature", "add", "implement", "support", "new", "enable", "introduce", "allow",
        ],
    ),
    (
        TaskCategory::Refactor,
        &[
            "refactor", "refactoring", "cleanup", "clean up", "simplify", "restructure",
            "rename", "extract", "deduplicate",
        ],
    ),
    (
        TaskCategory::Infrastructure,
        &[
            "deploy", "deployment", "infrastructure", "docker", "kubernetes", "pipeline",
            "ci/cd", "terraform", "server", "monitoring", "provision",
        ],
    ),
    (
        TaskCategory::Documentation,
        &[
            "docs", "documentation", "readme", "document", "guide", "tutorial", "changelog",
        ],
    ),
    (
        TaskCategory::Testing,
        &[
            "test", "tests", "testing", "coverage", "flaky", "e2e", "fixture", "assertion",
        ],
    ),
    (
        TaskCategory::Research,
        &[
            "research", "investigate", "explore", "evaluate", "spike", "compare",
            "prototype", "look into",
        ],
    ),
];

// =============================================================================
// TIME ESTIMATION
// =============================================================================

/// Language suggesting dependence on other systems.
pub const INTEGRATION_TERMS: &[&str] = &[
    "integrate",
    "integration",
    "third-party",
    "third party",
    "external service",
    "external api",
    "webhook",
    "synchronize",
    "interop",
];

// =============================================================================
// STRATEGIC VALUE
// =============================================================================

/// Project-impact buckets as `(area, terms)`.
pub const IMPACT_BUCKETS: &[(&str, &[&str])] = &[
    (
        "users",
        &["user", "users", "customer", "customers", "ux", "onboarding", "usability"],
    ),
    (
        "reliability",
        &[
            "reliability", "resilience", "uptime", "outage", "failover", "stability",
            "retry", "circuit breaker", "data loss",
        ],
    ),
    (
        "business",
        &["revenue", "cost", "costs", "business", "billing", "pricing", "growth", "sla"],
    ),
    (
        "security",
        &[
            "security", "vulnerability", "cve", "authentication", "permission", "permissions",
            "secret", "secrets", "encryption",
        ],
    ),
    (
        "velocity",
        &[
            "productivity", "velocity", "automation", "automate", "developer experience",
            "build time", "faster",
        ],
    ),
];

/// Signals for the comprehensive task-creation path as `(signal, weight, terms)`.
pub const CREATION_SIGNALS: &[(&str, u32, &[&str])] = &[
    (
        "multi-repository",
        3,
        &[
            "multiple repositories",
            "multiple repos",
            "multi-repo",
            "cross-repo",
            "across repos",
            "across repositories",
            "several repositories",
        ],
    ),
    (
        "protocol",
        3,
        &[
            "protocol",
            "breaking change",
            "wire format",
            "backwards compatibility",
            "backward compatibility",
        ],
    ),
    (
        "architecture",
        2,
        &["architecture", "architectural", "redesign", "system design"],
    ),
];
