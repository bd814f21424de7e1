//! Sentiment and urgency from word-list hits.

use ponder_core::{Sentiment, ToneAnalysis, Urgency};

use crate::text::TermMatcher;
use crate::vocabulary::{NEGATIVE_WORDS, POSITIVE_WORDS, URGENT_WORDS};

pub fn analyze_tone(text: &str) -> ToneAnalysis {
    let matcher = TermMatcher::new(text);
    let positive_hits = matcher.count(POSITIVE_WORDS);
    let negative_hits = matcher.count(NEGATIVE_WORDS);
    let urgent_hits = matcher.count(URGENT_WORDS);

    // A single-word lead is noise.
    let sentiment = if positive_hits > negative_hits + 1 {
        Sentiment::Positive
    } else if negative_hits > positive_hits + 1 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    let urgency = if urgent_hits >= 2 {
        Urgency::High
    } else if urgent_hits >= 1 || negative_hits >= 2 {
        Urgency::Medium
    } else {
        Urgency::Low
    };

    let total_hits = positive_hits + negative_hits + urgent_hits;
    let confidence = (0.2 * total_hits as f32).min(1.0);

    ToneAnalysis {
        sentiment,
        urgency,
        confidence,
        positive_hits,
        negative_hits,
        urgent_hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        let tone = analyze_tone("Move the config loader into its own module");
        assert_eq!(tone.sentiment, Sentiment::Neutral);
        assert_eq!(tone.urgency, Urgency::Low);
        assert_eq!(tone.confidence, 0.0);
    }

    #[test]
    fn test_sentiment_needs_margin_over_one() {
        assert_eq!(analyze_tone("good but slow").sentiment, Sentiment::Neutral);
        assert_eq!(analyze_tone("bug, wrong").sentiment, Sentiment::Negative);
        assert_eq!(
            analyze_tone("great, clean and fast").sentiment,
            Sentiment::Positive
        );
    }

    #[test]
    fn test_urgency_levels() {
        assert_eq!(analyze_tone("urgent outage").urgency, Urgency::High);
        assert_eq!(analyze_tone("this is a blocker").urgency, Urgency::Medium);
        assert_eq!(analyze_tone("flaky and broken").urgency, Urgency::Medium);
        assert_eq!(analyze_tone("flaky").urgency, Urgency::Low);
    }

    #[test]
    fn test_confidence_saturates() {
        let tone = analyze_tone("urgent critical outage broken crash bug errors");
        assert_eq!(tone.confidence, 1.0);
        let tone = analyze_tone("broken");
        assert!((tone.confidence - 0.2).abs() < 1e-6);
    }
}
