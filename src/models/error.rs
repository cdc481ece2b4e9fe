use thiserror::Error;

/// Reasons a snapshot from the data feed is refused.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown icon tag '{0}'")]
    UnknownIcon(String),

    #[error("'{0}' is not a #RRGGBB colour")]
    BadColor(String),

    #[error("subject '{id}' has {problems} of {total} problems")]
    SubjectOverflow { id: String, problems: u32, total: u32 },

    #[error("subject '{id}' reports {progress}% progress")]
    SubjectPercent { id: String, progress: u8 },

    #[error("achievement '{id}' has progress {progress} beyond {max}")]
    AchievementOverflow { id: String, progress: u32, max: u32 },

    #[error("goal '{id}' has a non-positive target")]
    GoalTarget { id: String },
}
