//! One-vs-rest course classifier.
//!
//! One binary decision tree per course label. Tree fitting in linfa has no
//! randomized step, so a fixed training set yields a fixed model and
//! prediction is deterministic.

use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};
use tracing::debug;

use crate::error::AppError;

#[derive(Debug)]
pub struct CourseClassifier {
    trees: Vec<DecisionTree<f64, usize>>,
}

impl CourseClassifier {
    /// Trains one tree per target column. `features` rows and `targets` rows
    /// must correspond; target entries are 0/1 indicator bits.
    pub fn fit(
        features: &Array2<f64>,
        targets: &Array2<usize>,
        max_depth: usize,
    ) -> Result<Self, AppError> {
        let mut trees = Vec::with_capacity(targets.ncols());
        for label in 0..targets.ncols() {
            let column: Array1<usize> = targets.column(label).to_owned();
            let dataset = Dataset::new(features.clone(), column);
            let tree = DecisionTree::params()
                .max_depth(Some(max_depth))
                .fit(&dataset)
                .map_err(|e| AppError::Training(format!("course label {}: {}", label, e)))?;
            debug!("Trained decision tree for course label {}", label);
            trees.push(tree);
        }
        Ok(Self { trees })
    }

    /// Indicator vector over the course vocabulary, one entry per label.
    pub fn predict(&self, features: &[f64]) -> Vec<usize> {
        let row = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .expect("single-row matrix from feature slice");
        self.trees.iter().map(|tree| tree.predict(&row)[0]).collect()
    }

    pub fn label_count(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn memorizes_separable_training_data() {
        // Label 0 fires on small first features, label 1 on large ones.
        let features = array![
            [1.0, 0.0],
            [2.0, 1.0],
            [9.0, 0.0],
            [10.0, 1.0],
        ];
        let targets = array![
            [1usize, 0usize],
            [1, 0],
            [0, 1],
            [0, 1],
        ];

        let classifier = CourseClassifier::fit(&features, &targets, 8).unwrap();
        assert_eq!(classifier.label_count(), 2);

        assert_eq!(classifier.predict(&[1.0, 0.0]), vec![1, 0]);
        assert_eq!(classifier.predict(&[10.0, 1.0]), vec![0, 1]);
    }

    #[test]
    fn prediction_is_deterministic() {
        let features = array![[1.0, 5.0], [2.0, 3.0], [8.0, 1.0]];
        let targets = array![[1usize], [1], [0]];

        let classifier = CourseClassifier::fit(&features, &targets, 8).unwrap();
        let first = classifier.predict(&[2.0, 3.0]);
        let second = classifier.predict(&[2.0, 3.0]);
        assert_eq!(first, second);
    }

    #[test]
    fn handles_constant_target_column() {
        // A course present in every record still trains a (trivial) tree.
        let features = array![[1.0, 0.0], [5.0, 1.0], [9.0, 0.0]];
        let targets = array![[1usize], [1], [1]];

        let classifier = CourseClassifier::fit(&features, &targets, 8).unwrap();
        assert_eq!(classifier.predict(&[3.0, 1.0]), vec![1]);
    }
}
