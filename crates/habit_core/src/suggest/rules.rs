//! Keyword-matched fallback suggestions.

use super::Suggestion;

const WEIGHT_LOSS_KEYWORDS: &[&str] = &["weight", "lose", "kg", "fat"];
const STUDY_KEYWORDS: &[&str] = &["study", "learn", "exam"];
const SLEEP_KEYWORDS: &[&str] = &["sleep"];

static WEIGHT_LOSS_SUGGESTIONS: [(&str, &str); 3] = [
    ("Walk 30 minutes", "Daily cardio to burn calories"),
    ("Track calories", "Monitor intake to create deficit"),
    ("No sugar drink", "Reduce empty calories"),
];
static STUDY_SUGGESTIONS: [(&str, &str); 3] = [
    ("Study 1 hour", "Daily focused study"),
    ("Active recall", "Practice retrieving knowledge"),
    ("Summarize notes", "Condense and review"),
];
static SLEEP_SUGGESTIONS: [(&str, &str); 3] = [
    ("Sleep by 11pm", "Consistent bedtime improves sleep"),
    ("No screens 30m", "Reduce blue light before bed"),
    ("Wind-down ritual", "Relax before sleep"),
];
static GENERAL_SUGGESTIONS: [(&str, &str); 3] = [
    ("Daily 10-min effort", "Small daily action builds habit"),
    ("Track progress", "Logging increases adherence"),
    ("Review weekly", "Adjust and stay accountable"),
];

/// Goal category picked by keyword matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalCategory {
    WeightLoss,
    Study,
    Sleep,
    General,
}

impl GoalCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::Study => "study",
            Self::Sleep => "sleep",
            Self::General => "general",
        }
    }

    fn suggestions(self) -> &'static [(&'static str, &'static str); 3] {
        match self {
            Self::WeightLoss => &WEIGHT_LOSS_SUGGESTIONS,
            Self::Study => &STUDY_SUGGESTIONS,
            Self::Sleep => &SLEEP_SUGGESTIONS,
            Self::General => &GENERAL_SUGGESTIONS,
        }
    }
}

/// Classifies a goal by substring match on its lowercased text.
///
/// Categories are checked in priority order: weight loss, study, sleep.
pub fn classify_goal(goal: &str) -> GoalCategory {
    let lower = goal.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|keyword| lower.contains(keyword));

    if matches(WEIGHT_LOSS_KEYWORDS) {
        GoalCategory::WeightLoss
    } else if matches(STUDY_KEYWORDS) {
        GoalCategory::Study
    } else if matches(SLEEP_KEYWORDS) {
        GoalCategory::Sleep
    } else {
        GoalCategory::General
    }
}

/// Returns the fixed three suggestions for the goal's category.
pub fn fallback_suggestions(goal: &str) -> Vec<Suggestion> {
    classify_goal(goal)
        .suggestions()
        .iter()
        .map(|(name, reason)| Suggestion::new(*name, *reason))
        .collect()
}
