use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub grade: i64,
    pub goals: String,
    pub skill_level: String,
    pub study_hours: i64,
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommended_courses: Vec<String>,
}

/// One historical survey row after the collection columns have been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    pub grade: i64,
    pub goals: String,
    pub skill_level: String,
    pub study_hours: i64,
    pub interests: Vec<String>,
    pub recommended_courses: Vec<String>,
}
