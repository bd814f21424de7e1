//! # ponder-inference
//!
//! Heuristic lexical analysis of note text.
//!
//! This crate provides:
//! - Keyword and technology-term extraction
//! - Complexity estimation from weighted term buckets
//! - Tone analysis (sentiment and urgency)
//! - Task category inference and time estimation
//! - Strategic value and task-creation complexity
//!
//! Everything here is a pure function of its input text.
//!
//! # Example
//!
//! ```
//! use ponder_inference::analyze;
//!
//! let features = analyze("Urgent: payments API times out under load");
//! assert!(features.tech_terms.contains(&"api".to_string()));
//! ```

pub mod category;
pub mod complexity;
pub mod features;
pub mod keywords;
pub mod text;
pub mod time_estimate;
pub mod tone;
pub mod value;
pub mod vocabulary;

// Re-export core types
pub use ponder_core::*;

pub use category::{category_multiplier, infer_category};
pub use complexity::estimate_complexity;
pub use features::analyze;
pub use keywords::{extract_keywords, extract_tech_terms};
pub use time_estimate::{estimate_time, reading_minutes};
pub use tone::analyze_tone;
pub use value::{assess_strategic_value, creation_complexity};
