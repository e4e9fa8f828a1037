//! Serialized forms of the fitted estimators the pipeline loads at start.
//!
//! The layouts follow the fitted attributes of the usual scikit-learn estimators
//! (`mean_`/`scale_`, `min_`/`scale_`, `classes_`, and the flat `tree_` arrays)
//! so an exporter only has to dump those attributes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fitted linear feature transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl ScalerArtifact {
    pub fn n_features(&self) -> usize {
        match self {
            ScalerArtifact::Standard { mean, .. } => mean.len(),
            ScalerArtifact::MinMax { min, .. } => min.len(),
        }
    }
}

/// A fitted label vocabulary. The code of a label is its index in `classes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderArtifact {
    pub classes: Vec<String>,
}

/// A class a classifier can emit: text for the crop model, an encoded integer
/// for the fertilizer model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Code(i64),
    Name(String),
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Code(code) => write!(f, "{}", code),
            ClassLabel::Name(name) => f.write_str(name),
        }
    }
}

/// One binary decision tree in flat array form.
///
/// Node `i` is a leaf when `children_left[i] == children_right[i]` (both `-1`).
/// Internal nodes send `x[feature[i]] <= threshold[i]` to the left child.
/// `value[i]` holds the per-class weights that reached node `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl TreeArtifact {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    DecisionTree {
        n_features: usize,
        classes: Vec<ClassLabel>,
        tree: TreeArtifact,
    },
    RandomForest {
        n_features: usize,
        classes: Vec<ClassLabel>,
        trees: Vec<TreeArtifact>,
    },
}

impl ClassifierArtifact {
    pub fn n_features(&self) -> usize {
        match self {
            ClassifierArtifact::DecisionTree { n_features, .. }
            | ClassifierArtifact::RandomForest { n_features, .. } => *n_features,
        }
    }

    pub fn classes(&self) -> &[ClassLabel] {
        match self {
            ClassifierArtifact::DecisionTree { classes, .. }
            | ClassifierArtifact::RandomForest { classes, .. } => classes,
        }
    }

    pub fn trees(&self) -> Vec<&TreeArtifact> {
        match self {
            ClassifierArtifact::DecisionTree { tree, .. } => vec![tree],
            ClassifierArtifact::RandomForest { trees, .. } => trees.iter().collect(),
        }
    }
}
