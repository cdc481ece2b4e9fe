use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStep {
    pub id: u32,
    pub title: String,
    pub content: String,
    pub hint: String,
    pub fact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkedExample {
    pub equation: String,
    pub steps: Vec<String>,
    pub result: String,
}

/// A guided lesson: ordered steps plus the example worked alongside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub steps: Vec<LearningStep>,
    pub example: WorkedExample,
}
