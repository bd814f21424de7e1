//! Strategic value and task-creation complexity.

use ponder_core::{Complexity, FeatureVector, StrategicValue, Urgency};

use crate::text::TermMatcher;
use crate::vocabulary::{CREATION_SIGNALS, IMPACT_BUCKETS};

const POINTS_PER_IMPACT_AREA: u32 = 2;

/// How much promoting `text` into a formal task would be worth.
///
/// Urgency and complexity contribute 3 (high) or 2 (medium) points each;
/// every matched project-impact area adds 2.
pub fn assess_strategic_value(features: &FeatureVector, text: &str) -> StrategicValue {
    let urgency_points = match features.urgency {
        Urgency::High => 3,
        Urgency::Medium => 2,
        Urgency::Low => 0,
    };
    let complexity_points = match features.complexity {
        Complexity::High => 3,
        Complexity::Medium => 2,
        Complexity::Low => 0,
    };

    let matcher = TermMatcher::new(text);
    let impact_areas: Vec<String> = IMPACT_BUCKETS
        .iter()
        .filter(|(_, terms)| matcher.any(terms))
        .map(|(area, _)| area.to_string())
        .collect();

    StrategicValue {
        score: urgency_points
            + complexity_points
            + impact_areas.len() as u32 * POINTS_PER_IMPACT_AREA,
        impact_areas,
    }
}

/// Weighted count of signals that the work spans repositories, changes a
/// protocol, or reshapes architecture.
pub fn creation_complexity(text: &str) -> u32 {
    let matcher = TermMatcher::new(text);
    CREATION_SIGNALS
        .iter()
        .filter(|(_, _, terms)| matcher.any(terms))
        .map(|(_, weight, _)| weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::analyze;

    #[test]
    fn test_urgent_user_facing_security_issue_is_valuable() {
        let text = "Urgent: customers hit an authentication outage, security critical";
        let value = assess_strategic_value(&analyze(text), text);
        assert!(value.impact_areas.contains(&"users".to_string()));
        assert!(value.impact_areas.contains(&"security".to_string()));
        assert!(value.impact_areas.contains(&"reliability".to_string()));
        // urgency high (3) + three impact areas (6)
        assert!(value.score >= 9);
    }

    #[test]
    fn test_idle_thought_has_no_value() {
        let text = "Try the other coffee place";
        let value = assess_strategic_value(&analyze(text), text);
        assert_eq!(value.score, 0);
        assert!(value.impact_areas.is_empty());
    }

    #[test]
    fn test_creation_complexity_signals() {
        assert_eq!(creation_complexity("Tidy up logging"), 0);
        assert_eq!(creation_complexity("Redesign the sync architecture"), 2);
        assert_eq!(
            creation_complexity("Breaking change to the wire format across repos"),
            6
        );
    }
}
