use log::debug;

use super::provider::{FetchError, ProgressProvider};
use crate::models::{DataError, Lesson, ProgressScreenData};

const PROGRESS_JSON: &str = include_str!("../../assets/progress.json");
const LESSON_JSON: &str = include_str!("../../assets/lessons.json");

/// Serves the bundled demo snapshot. Every fetch parses and validates the
/// embedded feed afresh, so a refresh replaces the snapshot with an equal one.
#[derive(Debug, Default, Clone)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressProvider for MockProvider {
    fn fetch_progress_snapshot(&self) -> Result<ProgressScreenData, FetchError> {
        let data = ProgressScreenData::from_json(PROGRESS_JSON)?;
        debug!(
            "mock feed: {} activities, {} subjects, {} achievements, {} goals",
            data.activities.len(),
            data.subjects.len(),
            data.achievements.len(),
            data.goals.len()
        );
        Ok(data)
    }
}

/// The lesson walked through on the Learn view.
pub fn bundled_lesson() -> Result<Lesson, DataError> {
    Ok(serde_json::from_str(LESSON_JSON)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rarity;

    #[test]
    fn test_bundled_snapshot_is_valid() {
        let data = MockProvider::new().fetch_progress_snapshot().unwrap();
        assert_eq!(data.stats.problems_solved, 127);
        assert_eq!(data.activities.len(), 7);
        assert_eq!(crate::models::progress::max_problems(&data.activities), 8);
        assert_eq!(data.subjects.len(), 4);
        assert_eq!(
            data.achievements.iter().filter(|a| a.rarity == Rarity::Legendary).count(),
            1
        );
        let completions: Vec<i64> = data.goals.iter().map(|g| g.completion_percent()).collect();
        assert_eq!(completions, vec![70, 75]);
    }

    #[test]
    fn test_fetch_is_deterministic() {
        let provider = MockProvider::new();
        assert_eq!(
            provider.fetch_progress_snapshot().unwrap(),
            provider.fetch_progress_snapshot().unwrap()
        );
    }

    #[test]
    fn test_bundled_lesson() {
        let lesson = bundled_lesson().unwrap();
        assert_eq!(lesson.steps.len(), 5);
        assert_eq!(lesson.steps[0].title, "Let's Break This Down");
        assert_eq!(lesson.example.result, "x = 1/2 or x = -3");
    }
}
