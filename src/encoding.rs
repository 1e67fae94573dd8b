//! Encodings bridging raw survey attributes and the numeric feature space.
//!
//! All vocabularies are fixed when `fit` runs against the historical dataset
//! and never grow afterwards. Categorical fields (`goals`, `skill_level`)
//! reject values outside the fit vocabulary; set-valued fields (`interests`,
//! `recommended_courses`) project unknown labels to nothing.

use std::collections::HashMap;

use ndarray::Array2;
use thiserror::Error;

use crate::types::{RecommendRequest, SurveyRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("unknown {field} value: {value:?}")]
    UnknownLabel { field: &'static str, value: String },
}

/// Bijection between a fixed string vocabulary and integer codes 0..k-1.
///
/// Codes are assigned in first-seen order, so the mapping is deterministic
/// for a given input order. Frozen after fit.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    codes: HashMap<String, usize>,
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut codes = HashMap::new();
        let mut classes = Vec::new();
        for value in values {
            if !codes.contains_key(value) {
                codes.insert(value.to_string(), classes.len());
                classes.push(value.to_string());
            }
        }
        Self { codes, classes }
    }

    pub fn transform(&self, field: &'static str, value: &str) -> Result<usize, EncodingError> {
        self.codes
            .get(value)
            .copied()
            .ok_or_else(|| EncodingError::UnknownLabel {
                field,
                value: value.to_string(),
            })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Bijection between a fixed label vocabulary and positions in a binary
/// indicator vector. Width equals the vocabulary size.
#[derive(Debug, Clone)]
pub struct MultiLabelBinarizer {
    positions: HashMap<String, usize>,
    classes: Vec<String>,
}

impl MultiLabelBinarizer {
    pub fn fit<'a>(label_sets: impl IntoIterator<Item = &'a [String]>) -> Self {
        let mut positions = HashMap::new();
        let mut classes = Vec::new();
        for labels in label_sets {
            for label in labels {
                if !positions.contains_key(label.as_str()) {
                    positions.insert(label.clone(), classes.len());
                    classes.push(label.clone());
                }
            }
        }
        Self { positions, classes }
    }

    /// Labels outside the fit vocabulary contribute no bit.
    pub fn transform(&self, labels: &[String]) -> Vec<usize> {
        let mut indicator = vec![0usize; self.classes.len()];
        for label in labels {
            if let Some(&position) = self.positions.get(label.as_str()) {
                indicator[position] = 1;
            }
        }
        indicator
    }

    pub fn inverse_transform(&self, indicator: &[usize]) -> Vec<String> {
        self.classes
            .iter()
            .zip(indicator)
            .filter(|(_, &bit)| bit != 0)
            .map(|(class, _)| class.clone())
            .collect()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// The full set of fitted encodings for survey records.
#[derive(Debug, Clone)]
pub struct SurveyEncoder {
    goals: LabelEncoder,
    skill_level: LabelEncoder,
    interests: MultiLabelBinarizer,
    courses: MultiLabelBinarizer,
}

impl SurveyEncoder {
    pub fn fit(records: &[SurveyRecord]) -> Self {
        let goals = LabelEncoder::fit(records.iter().map(|r| r.goals.as_str()));
        let skill_level = LabelEncoder::fit(records.iter().map(|r| r.skill_level.as_str()));
        let interests = MultiLabelBinarizer::fit(records.iter().map(|r| r.interests.as_slice()));
        let courses =
            MultiLabelBinarizer::fit(records.iter().map(|r| r.recommended_courses.as_slice()));
        Self {
            goals,
            skill_level,
            interests,
            courses,
        }
    }

    /// Column order is load-bearing: grade, goal code, skill code, study
    /// hours, then the interest indicator bits in vocabulary order. The
    /// trained classifier expects exactly this arrangement.
    pub fn encode(
        &self,
        grade: i64,
        goals: &str,
        skill_level: &str,
        study_hours: i64,
        interests: &[String],
    ) -> Result<Vec<f64>, EncodingError> {
        let goal_code = self.goals.transform("goals", goals)?;
        let skill_code = self.skill_level.transform("skill_level", skill_level)?;

        let mut features = Vec::with_capacity(self.feature_dim());
        features.push(grade as f64);
        features.push(goal_code as f64);
        features.push(skill_code as f64);
        features.push(study_hours as f64);
        features.extend(
            self.interests
                .transform(interests)
                .into_iter()
                .map(|bit| bit as f64),
        );
        Ok(features)
    }

    pub fn encode_record(&self, record: &SurveyRecord) -> Result<Vec<f64>, EncodingError> {
        self.encode(
            record.grade,
            &record.goals,
            &record.skill_level,
            record.study_hours,
            &record.interests,
        )
    }

    pub fn encode_request(&self, request: &RecommendRequest) -> Result<Vec<f64>, EncodingError> {
        self.encode(
            request.grade,
            &request.goals,
            &request.skill_level,
            request.study_hours,
            &request.interests,
        )
    }

    pub fn feature_matrix(&self, records: &[SurveyRecord]) -> Result<Array2<f64>, EncodingError> {
        let mut data = Vec::with_capacity(records.len() * self.feature_dim());
        for record in records {
            data.extend(self.encode_record(record)?);
        }
        Ok(Array2::from_shape_vec((records.len(), self.feature_dim()), data)
            .expect("row width matches feature_dim"))
    }

    pub fn course_indicator_matrix(&self, records: &[SurveyRecord]) -> Array2<usize> {
        let mut data = Vec::with_capacity(records.len() * self.courses.len());
        for record in records {
            data.extend(self.courses.transform(&record.recommended_courses));
        }
        Array2::from_shape_vec((records.len(), self.courses.len()), data)
            .expect("row width matches course vocabulary size")
    }

    pub fn decode_courses(&self, indicator: &[usize]) -> Vec<String> {
        self.courses.inverse_transform(indicator)
    }

    pub fn feature_dim(&self) -> usize {
        4 + self.interests.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn course_vocabulary(&self) -> &[String] {
        self.courses.classes()
    }

    pub fn interest_vocabulary(&self) -> &[String] {
        self.interests.classes()
    }

    pub fn goal_vocabulary(&self) -> &[String] {
        self.goals.classes()
    }

    pub fn skill_vocabulary(&self) -> &[String] {
        self.skill_level.classes()
    }
}
