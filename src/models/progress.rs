use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use super::{DataError, HexColor, Icon};

/// Points of disagreement tolerated between a subject's reported progress and its
/// problem counts before a warning is logged.
const SUBJECT_DRIFT_WARN: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub problems_solved: u32,
    pub hours_learned: u32,
    pub day_streak: u32,
    pub total_points: u32,
    pub level: u32,
    pub rank: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub problems: u32,
    pub minutes: u32,
    pub completed: bool,
}

impl DailyActivity {
    /// Short weekday label, e.g. "Mon".
    pub fn day_label(&self) -> String {
        self.date.format("%a").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProgress {
    pub id: String,
    pub name: String,
    /// Reported completion percentage. This is what the ring displays.
    pub progress: u8,
    pub color: HexColor,
    pub problems: u32,
    pub total_problems: u32,
    pub icon: Icon,
    pub last_activity: String,
}

impl SubjectProgress {
    /// Completion implied by the problem counts, for comparison only.
    pub fn counted_percent(&self) -> f64 {
        if self.total_problems == 0 {
            0.0
        } else {
            self.problems as f64 / self.total_problems as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Border and shadow colour of a badge of this rarity.
    pub fn accent(&self) -> HexColor {
        match self {
            Rarity::Legendary => HexColor::new(0xFF, 0xD7, 0x00),
            Rarity::Epic => HexColor::new(0x9B, 0x59, 0xB6),
            Rarity::Rare => HexColor::new(0x34, 0x98, 0xDB),
            Rarity::Common => HexColor::new(0x95, 0xA5, 0xA6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Icon,
    pub color: HexColor,
    pub unlocked_at: NaiveDate,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_progress: Option<u32>,
}

impl Achievement {
    /// Fill ratio of the secondary bar; `None` means the bar is not drawn.
    pub fn sub_progress(&self) -> Option<f64> {
        match (self.progress, self.max_progress) {
            (Some(p), Some(max)) if max > 0 => Some(p as f64 / max as f64),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Daily,
    Weekly,
    Monthly,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Daily => "daily",
            GoalType::Weekly => "weekly",
            GoalType::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningGoal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub progress: f64,
    pub target: f64,
    pub deadline: NaiveDate,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub icon: Icon,
    pub color: HexColor,
}

impl LearningGoal {
    /// Displayed completion. Not clamped: an overachieved goal reads above 100.
    pub fn completion_percent(&self) -> i64 {
        (self.progress / self.target * 100.0).round() as i64
    }

    /// Fill ratio for drawing, clamped to `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        (self.progress / self.target).clamp(0.0, 1.0)
    }
}

/// Everything the progress view shows, fetched as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressScreenData {
    pub stats: ProgressStats,
    pub activities: Vec<DailyActivity>,
    pub subjects: Vec<SubjectProgress>,
    pub achievements: Vec<Achievement>,
    pub goals: Vec<LearningGoal>,
}

impl ProgressScreenData {
    /// Parse a JSON snapshot and check its invariants.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        check_icon_tags(&raw)?;
        let data: ProgressScreenData = serde_json::from_value(raw)?;
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        for s in &self.subjects {
            if s.problems > s.total_problems {
                return Err(DataError::SubjectOverflow {
                    id: s.id.clone(),
                    problems: s.problems,
                    total: s.total_problems,
                });
            }
            if s.progress > 100 {
                return Err(DataError::SubjectPercent {
                    id: s.id.clone(),
                    progress: s.progress,
                });
            }
            let drift = (s.progress as f64 - s.counted_percent()).abs();
            if drift > SUBJECT_DRIFT_WARN {
                warn!(
                    "subject '{}' reports {}% but {}/{} problems done",
                    s.name, s.progress, s.problems, s.total_problems
                );
            }
        }

        for a in &self.achievements {
            if let (Some(progress), Some(max)) = (a.progress, a.max_progress) {
                if progress > max {
                    return Err(DataError::AchievementOverflow {
                        id: a.id.clone(),
                        progress,
                        max,
                    });
                }
            }
        }

        for g in &self.goals {
            if !(g.target > 0.0) {
                return Err(DataError::GoalTarget { id: g.id.clone() });
            }
        }

        Ok(())
    }
}

/// Report an unknown icon as such instead of as a generic parse failure.
fn check_icon_tags(raw: &serde_json::Value) -> Result<(), DataError> {
    for section in ["subjects", "achievements", "goals"] {
        let entries = raw.get(section).and_then(|v| v.as_array()).into_iter().flatten();
        for tag in entries.filter_map(|e| e.get("icon")).filter_map(|t| t.as_str()) {
            tag.parse::<Icon>()?;
        }
    }
    Ok(())
}

pub fn max_problems(activities: &[DailyActivity]) -> u32 {
    activities.iter().map(|d| d.problems).max().unwrap_or(0).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(progress: f64, target: f64) -> LearningGoal {
        LearningGoal {
            id: "g".into(),
            title: "Goal".into(),
            description: String::new(),
            progress,
            target,
            deadline: NaiveDate::from_ymd_opt(2024, 1, 28).unwrap(),
            goal_type: GoalType::Weekly,
            icon: Icon::Target,
            color: HexColor::new(0x8a, 0x2b, 0xe2),
        }
    }

    fn day(date: &str, problems: u32) -> DailyActivity {
        DailyActivity {
            date: date.parse().unwrap(),
            problems,
            minutes: problems * 10,
            completed: problems > 0,
        }
    }

    #[test]
    fn test_goal_completion_rounds() {
        assert_eq!(goal(35.0, 50.0).completion_percent(), 70);
        assert_eq!(goal(7.5, 10.0).completion_percent(), 75);
    }

    #[test]
    fn test_goal_completion_not_clamped() {
        let g = goal(60.0, 50.0);
        assert_eq!(g.completion_percent(), 120);
        assert_eq!(g.fill_ratio(), 1.0);
    }

    #[test]
    fn test_max_problems_floor_is_one() {
        assert_eq!(max_problems(&[]), 1);
        assert_eq!(max_problems(&[day("2024-01-15", 0), day("2024-01-16", 0)]), 1);
        assert_eq!(max_problems(&[day("2024-01-15", 3), day("2024-01-16", 8)]), 8);
    }

    #[test]
    fn test_day_label() {
        // 2024-01-15 was a Monday
        assert_eq!(day("2024-01-15", 1).day_label(), "Mon");
    }

    #[test]
    fn test_sub_progress_requires_both_fields() {
        let mut a = Achievement {
            id: "1".into(),
            title: "Problem Solver".into(),
            description: "Solved 50 problems".into(),
            icon: Icon::Target,
            color: HexColor::new(0x8a, 0x2b, 0xe2),
            unlocked_at: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            rarity: Rarity::Epic,
            progress: None,
            max_progress: None,
        };
        assert_eq!(a.sub_progress(), None);
        a.progress = Some(42);
        assert_eq!(a.sub_progress(), None);
        a.max_progress = Some(50);
        assert_eq!(a.sub_progress(), Some(0.84));
    }

    #[test]
    fn test_rarity_accents() {
        assert_eq!(Rarity::Legendary.accent().to_string(), "#FFD700");
        assert_eq!(Rarity::Epic.accent().to_string(), "#9B59B6");
        assert_eq!(Rarity::Rare.accent().to_string(), "#3498DB");
        assert_eq!(Rarity::Common.accent().to_string(), "#95A5A6");
        assert!(Rarity::Legendary > Rarity::Epic);
    }

    #[test]
    fn test_validate_rejects_broken_invariants() {
        let json = r##"{
            "stats": {"problemsSolved": 1, "hoursLearned": 1, "dayStreak": 1,
                      "totalPoints": 1, "level": 1, "rank": "New"},
            "activities": [],
            "subjects": [{"id": "1", "name": "Maths", "progress": 50, "color": "#8A2BE2",
                          "problems": 9, "totalProblems": 5, "icon": "calculator",
                          "lastActivity": "now"}],
            "achievements": [],
            "goals": []
        }"##;
        assert!(matches!(
            ProgressScreenData::from_json(json),
            Err(DataError::SubjectOverflow { problems: 9, total: 5, .. })
        ));

        let json = json.replace("\"problems\": 9", "\"problems\": 2");
        assert!(ProgressScreenData::from_json(&json).is_ok());

        let unknown = json.replace("calculator", "abacus");
        assert!(matches!(
            ProgressScreenData::from_json(&unknown),
            Err(DataError::UnknownIcon(tag)) if tag == "abacus"
        ));

        let truncated = &json[..json.len() - 10];
        assert!(matches!(ProgressScreenData::from_json(truncated), Err(DataError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_zero_goal_target() {
        let data = ProgressScreenData {
            stats: ProgressStats {
                problems_solved: 0,
                hours_learned: 0,
                day_streak: 0,
                total_points: 0,
                level: 1,
                rank: "New".into(),
            },
            activities: vec![],
            subjects: vec![],
            achievements: vec![],
            goals: vec![goal(1.0, 0.0)],
        };
        assert!(matches!(data.validate(), Err(DataError::GoalTarget { .. })));
    }
}
