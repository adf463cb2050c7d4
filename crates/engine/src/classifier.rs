//! Binary classifier models
//!
//! The engine treats the trained model as an opaque object that maps a
//! feature vector to a two-class probability pair. Artifacts describe the
//! model in a self-contained serde format; how it was fit is irrelevant
//! here.

use serde::{Deserialize, Serialize};

/// Contract every classifier in an artifact satisfies.
///
/// Implementations must be pure: same vector in, same probabilities out.
pub trait Classifier {
    /// Input dimensionality the model was fit on
    fn num_features(&self) -> usize;

    /// Probability pair `[p_negative, p_positive]` for one sample
    fn predict_proba(&self, x: &[f64]) -> [f64; 2];

    /// Human readable model name
    fn name(&self) -> &'static str;
}

/// Numerically stable logistic function
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Logistic regression over the scaled feature vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl Classifier for LogisticModel {
    fn num_features(&self) -> usize {
        self.weights.len()
    }

    fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        let z: f64 = self
            .weights
            .iter()
            .zip(x.iter())
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.bias;
        let p = sigmoid(z);
        [1.0 - p, p]
    }

    fn name(&self) -> &'static str {
        "logistic"
    }
}

/// One node of a decision tree, stored as a flat array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree emitting a log-odds contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk the tree for one sample. Values below the threshold go left.
    ///
    /// A malformed node index terminates traversal with a zero
    /// contribution rather than panicking; artifact loading bounds-checks
    /// feature indices so only index corruption inside the tree itself can
    /// reach this path.
    fn score(&self, x: &[f64]) -> f64 {
        let mut idx = 0usize;
        // Node count bounds the walk; a cycle cannot loop forever.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(*feature).copied().unwrap_or(0.0);
                    idx = if value < *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
        0.0
    }

    /// Largest feature index referenced by any split
    pub fn max_feature_index(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                TreeNode::Split { feature, .. } => Some(*feature),
                TreeNode::Leaf { .. } => None,
            })
            .max()
    }
}

fn default_learning_rate() -> f64 {
    1.0
}

/// Gradient-boosted tree ensemble: summed tree outputs in log-odds space,
/// squashed through the logistic function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub num_features: usize,
    pub trees: Vec<Tree>,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub base_score: f64,
}

impl TreeEnsemble {
    /// Largest feature index referenced by any tree
    pub fn max_feature_index(&self) -> Option<usize> {
        self.trees.iter().filter_map(Tree::max_feature_index).max()
    }
}

impl Classifier for TreeEnsemble {
    fn num_features(&self) -> usize {
        self.num_features
    }

    fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        let margin: f64 = self.base_score
            + self.learning_rate * self.trees.iter().map(|t| t.score(x)).sum::<f64>();
        let p = sigmoid(margin);
        [1.0 - p, p]
    }

    fn name(&self) -> &'static str {
        "tree_ensemble"
    }
}

/// Serialized classifier description inside an artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierSpec {
    Logistic(LogisticModel),
    TreeEnsemble(TreeEnsemble),
}

impl Classifier for ClassifierSpec {
    fn num_features(&self) -> usize {
        match self {
            ClassifierSpec::Logistic(m) => m.num_features(),
            ClassifierSpec::TreeEnsemble(m) => m.num_features(),
        }
    }

    fn predict_proba(&self, x: &[f64]) -> [f64; 2] {
        match self {
            ClassifierSpec::Logistic(m) => m.predict_proba(x),
            ClassifierSpec::TreeEnsemble(m) => m.predict_proba(x),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ClassifierSpec::Logistic(m) => m.name(),
            ClassifierSpec::TreeEnsemble(m) => m.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_symmetry() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!((sigmoid(1.0) - 0.731_058_578_630_004_9).abs() < 1e-12);
        assert!((sigmoid(3.0) + sigmoid(-3.0) - 1.0).abs() < 1e-12);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
    }

    #[test]
    fn test_logistic_zero_model_is_coin_flip() {
        let model = LogisticModel {
            weights: vec![0.0, 0.0, 0.0],
            bias: 0.0,
        };
        let proba = model.predict_proba(&[1.0, 2.0, 3.0]);
        assert!((proba[0] - 0.5).abs() < 1e-12);
        assert!((proba[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_probabilities_sum_to_one() {
        let model = LogisticModel {
            weights: vec![0.7, -1.2],
            bias: 0.3,
        };
        let proba = model.predict_proba(&[2.0, 0.5]);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert!(proba[1] > 0.0 && proba[1] < 1.0);
    }

    fn stump(feature: usize, threshold: f64, low: f64, high: f64) -> Tree {
        Tree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: low },
                TreeNode::Leaf { value: high },
            ],
        }
    }

    #[test]
    fn test_tree_traversal() {
        let tree = stump(0, 5.0, -1.0, 1.0);
        assert_eq!(tree.score(&[4.9]), -1.0);
        assert_eq!(tree.score(&[5.0]), 1.0);
        assert_eq!(tree.max_feature_index(), Some(0));
    }

    #[test]
    fn test_ensemble_margin() {
        let ensemble = TreeEnsemble {
            num_features: 2,
            trees: vec![stump(0, 0.5, -1.0, 1.0), stump(1, 0.5, -1.0, 1.0)],
            learning_rate: 0.5,
            base_score: 0.0,
        };
        // Both splits go high: margin = 0.5 * (1 + 1) = 1.0
        let proba = ensemble.predict_proba(&[1.0, 1.0]);
        assert!((proba[1] - sigmoid(1.0)).abs() < 1e-12);
        // Both go low: margin = -1.0
        let proba = ensemble.predict_proba(&[0.0, 0.0]);
        assert!((proba[1] - sigmoid(-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_tree_does_not_panic() {
        let tree = Tree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.5,
                left: 42,
                right: 43,
            }],
        };
        assert_eq!(tree.score(&[1.0]), 0.0);
    }

    #[test]
    fn test_classifier_spec_deserialization() {
        let spec: ClassifierSpec = serde_json::from_value(serde_json::json!({
            "kind": "logistic",
            "weights": [0.1, 0.2],
            "bias": -0.3
        }))
        .unwrap();
        assert_eq!(spec.num_features(), 2);
        assert_eq!(spec.name(), "logistic");

        let spec: ClassifierSpec = serde_json::from_value(serde_json::json!({
            "kind": "tree_ensemble",
            "num_features": 3,
            "trees": [{"nodes": [{"node": "leaf", "value": 0.4}]}]
        }))
        .unwrap();
        assert_eq!(spec.num_features(), 3);
        let proba = spec.predict_proba(&[0.0, 0.0, 0.0]);
        assert!((proba[1] - sigmoid(0.4)).abs() < 1e-12);
    }
}
