//! Survey dataset loading.
//!
//! One CSV row per historical record. The `interests` and
//! `recommended_courses` columns hold textual list literals and go through
//! the strict parser in [`crate::literal`].

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::{error::AppError, literal, types::SurveyRecord};

#[derive(Debug, Deserialize)]
struct RawSurveyRow {
    grade: i64,
    goals: String,
    skill_level: String,
    study_hours: i64,
    interests: String,
    recommended_courses: String,
}

pub fn load_survey(path: &Path) -> Result<Vec<SurveyRecord>, AppError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<RawSurveyRow>().enumerate() {
        let row = row?;
        // Header occupies the first line of the file.
        let line = index + 2;

        let interests = literal::parse_string_list(&row.interests).map_err(|e| {
            AppError::Dataset(format!(
                "{}:{}: bad interests literal: {}",
                path.display(),
                line,
                e
            ))
        })?;
        let recommended_courses =
            literal::parse_string_list(&row.recommended_courses).map_err(|e| {
                AppError::Dataset(format!(
                    "{}:{}: bad recommended_courses literal: {}",
                    path.display(),
                    line,
                    e
                ))
            })?;

        records.push(SurveyRecord {
            grade: row.grade,
            goals: row.goals,
            skill_level: row.skill_level,
            study_hours: row.study_hours,
            interests,
            recommended_courses,
        });
    }

    if records.is_empty() {
        return Err(AppError::Dataset(format!(
            "{}: no survey rows",
            path.display()
        )));
    }

    info!("Loaded {} survey records from {}", records.len(), path.display());
    Ok(records)
}
