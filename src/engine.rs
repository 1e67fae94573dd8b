//! The process-wide recommendation context.
//!
//! Built once at startup from the full historical dataset and shared
//! read-only across request handlers. There is no retraining or update path;
//! a restart is the only way to pick up new data.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::{
    classifier::CourseClassifier,
    config::Config,
    dataset,
    encoding::SurveyEncoder,
    error::AppError,
    types::{RecommendRequest, RecommendResponse, SurveyRecord},
};

#[derive(Debug)]
pub struct RecommendEngine {
    encoder: SurveyEncoder,
    classifier: CourseClassifier,
    fallback: Vec<String>,
}

impl RecommendEngine {
    pub fn bootstrap(config: &Config) -> Result<Self, AppError> {
        info!("Bootstrapping recommendation engine...");
        let records = dataset::load_survey(Path::new(&config.dataset_path))?;
        Self::from_records(&records, config)
    }

    pub fn from_records(records: &[SurveyRecord], config: &Config) -> Result<Self, AppError> {
        if records.is_empty() {
            return Err(AppError::Dataset("survey dataset is empty".to_string()));
        }

        let encoder = SurveyEncoder::fit(records);
        info!(
            "Fitted encodings: {} goals, {} skill levels, {} interests, {} courses, feature width {}",
            encoder.goal_vocabulary().len(),
            encoder.skill_vocabulary().len(),
            encoder.interest_vocabulary().len(),
            encoder.course_count(),
            encoder.feature_dim(),
        );

        let features = encoder.feature_matrix(records)?;
        let targets = encoder.course_indicator_matrix(records);
        let classifier = CourseClassifier::fit(&features, &targets, config.max_tree_depth)?;
        info!(
            "Trained {} one-vs-rest course trees on {} records",
            classifier.label_count(),
            records.len(),
        );

        let fallback = most_frequent_courses(records, config.fallback_top_k);

        Ok(Self {
            encoder,
            classifier,
            fallback,
        })
    }

    pub fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, AppError> {
        validate_request(request)?;

        let features = self.encoder.encode_request(request)?;
        let indicator = self.classifier.predict(&features);
        let mut recommended_courses = self.encoder.decode_courses(&indicator);

        if recommended_courses.is_empty() && !self.fallback.is_empty() {
            debug!("Classifier produced no courses, falling back to frequency ranking");
            recommended_courses = self.fallback.clone();
        }

        Ok(RecommendResponse {
            recommended_courses,
        })
    }

    pub fn course_vocabulary(&self) -> &[String] {
        self.encoder.course_vocabulary()
    }
}

fn validate_request(request: &RecommendRequest) -> Result<(), AppError> {
    if request.goals.trim().is_empty() {
        return Err(AppError::InvalidInput("goals cannot be empty".to_string()));
    }
    if request.skill_level.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "skill_level cannot be empty".to_string(),
        ));
    }
    if request.grade < 0 {
        return Err(AppError::InvalidInput("grade cannot be negative".to_string()));
    }
    if request.study_hours < 0 {
        return Err(AppError::InvalidInput(
            "study_hours cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Courses ranked by training-set frequency, most common first. Ties break
/// alphabetically to keep the ranking stable.
fn most_frequent_courses(records: &[SurveyRecord], top_k: usize) -> Vec<String> {
    if top_k == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        for course in &record.recommended_courses {
            *counts.entry(course.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(top_k)
        .map(|(course, _)| course.to_string())
        .collect()
}
