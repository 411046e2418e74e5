use crate::models::Topic;

/// Score of an age-dependent curve when the subject's age is unknown
const UNKNOWN_AGE_RELEVANCE: f64 = 0.5;

/// Age-relevance table selected by topic.
///
/// The fixed topics map onto a curve directly; free-form topic names (for
/// example pinned "potty" interests) resolve through their aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeCurve {
    Sleep,
    Feeding,
    Development,
    Social,
    Potty,
    Health,
    Neutral,
}

impl AgeCurve {
    pub fn for_topic(topic: Topic) -> Self {
        match topic {
            Topic::Sleep => AgeCurve::Sleep,
            Topic::Food => AgeCurve::Feeding,
            Topic::Health => AgeCurve::Health,
            Topic::Development => AgeCurve::Development,
            Topic::Social => AgeCurve::Social,
            Topic::Activity | Topic::Mood => AgeCurve::Neutral,
        }
    }

    pub fn for_topic_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sleep" => AgeCurve::Sleep,
            "food" | "feeding" => AgeCurve::Feeding,
            "development" | "milestone" => AgeCurve::Development,
            "social" | "friend" => AgeCurve::Social,
            "potty" | "toilet" => AgeCurve::Potty,
            "health" | "medical" => AgeCurve::Health,
            _ => AgeCurve::Neutral,
        }
    }

    /// Relevance in [0, 1] of this curve at `age_months`.
    ///
    /// Constant curves ignore the age; the others fall back to 0.5 when it
    /// is unknown.
    pub fn relevance(self, age_months: Option<u32>) -> f64 {
        let age = match (self, age_months) {
            (AgeCurve::Health, _) => return 0.9,
            (AgeCurve::Neutral, _) => return 0.5,
            (_, None) => return UNKNOWN_AGE_RELEVANCE,
            (_, Some(age)) => age,
        };

        match self {
            AgeCurve::Sleep => {
                if age < 12 {
                    1.0
                } else if age < 24 {
                    0.8
                } else {
                    0.6
                }
            }
            // Solid-food transitions around 6, 12 and 18 months
            AgeCurve::Feeding => match age {
                5..=7 | 11..=13 | 17..=19 => 1.0,
                _ => 0.7,
            },
            AgeCurve::Development => {
                if age < 24 {
                    1.0
                } else if age < 48 {
                    0.9
                } else {
                    0.7
                }
            }
            AgeCurve::Social => {
                if age < 12 {
                    0.3
                } else if age < 24 {
                    0.6
                } else {
                    0.9
                }
            }
            AgeCurve::Potty => match age {
                0..=17 => 0.1,
                18..=36 => 1.0,
                _ => 0.4,
            },
            AgeCurve::Health => 0.9,
            AgeCurve::Neutral => 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_age_is_neutral() {
        for curve in [AgeCurve::Sleep, AgeCurve::Potty, AgeCurve::Social] {
            assert_eq!(curve.relevance(None), 0.5);
        }
    }

    #[test]
    fn test_constant_curves_ignore_age() {
        assert_eq!(AgeCurve::Health.relevance(None), 0.9);
        assert_eq!(AgeCurve::Health.relevance(Some(3)), 0.9);
        assert_eq!(AgeCurve::Neutral.relevance(None), 0.5);
        assert_eq!(AgeCurve::Neutral.relevance(Some(40)), 0.5);
    }

    #[test]
    fn test_feeding_windows() {
        let feeding = AgeCurve::Feeding;
        assert_eq!(feeding.relevance(Some(4)), 0.7);
        assert_eq!(feeding.relevance(Some(5)), 1.0);
        assert_eq!(feeding.relevance(Some(7)), 1.0);
        assert_eq!(feeding.relevance(Some(8)), 0.7);
        assert_eq!(feeding.relevance(Some(12)), 1.0);
        assert_eq!(feeding.relevance(Some(19)), 1.0);
        assert_eq!(feeding.relevance(Some(20)), 0.7);
    }

    #[test]
    fn test_potty_boundaries() {
        let potty = AgeCurve::for_topic_name("Toilet");
        assert_eq!(potty, AgeCurve::Potty);
        assert_eq!(potty.relevance(Some(17)), 0.1);
        assert_eq!(potty.relevance(Some(18)), 1.0);
        assert_eq!(potty.relevance(Some(36)), 1.0);
        assert_eq!(potty.relevance(Some(37)), 0.4);
    }

    #[test]
    fn test_step_curves() {
        assert_eq!(AgeCurve::Sleep.relevance(Some(11)), 1.0);
        assert_eq!(AgeCurve::Sleep.relevance(Some(12)), 0.8);
        assert_eq!(AgeCurve::Sleep.relevance(Some(24)), 0.6);

        assert_eq!(AgeCurve::Development.relevance(Some(23)), 1.0);
        assert_eq!(AgeCurve::Development.relevance(Some(47)), 0.9);
        assert_eq!(AgeCurve::Development.relevance(Some(48)), 0.7);

        assert_eq!(AgeCurve::Social.relevance(Some(6)), 0.3);
        assert_eq!(AgeCurve::Social.relevance(Some(18)), 0.6);
        assert_eq!(AgeCurve::Social.relevance(Some(30)), 0.9);
    }

    #[test]
    fn test_topic_mapping() {
        assert_eq!(AgeCurve::for_topic(Topic::Food), AgeCurve::Feeding);
        assert_eq!(AgeCurve::for_topic(Topic::Mood), AgeCurve::Neutral);
        assert_eq!(AgeCurve::for_topic_name("friend"), AgeCurve::Social);
        assert_eq!(AgeCurve::for_topic_name("weather"), AgeCurve::Neutral);
        assert_eq!(AgeCurve::Health.relevance(Some(60)), 0.9);
    }
}
