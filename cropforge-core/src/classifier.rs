//! Tree-ensemble inference over fitted decision trees.

use crate::error::CropforgeError;
use cropforge_schemas::artifact::{ClassLabel, ClassifierArtifact, TreeArtifact};

#[derive(Debug, Clone)]
pub struct Classifier {
    artifact: ClassifierArtifact,
}

impl Classifier {
    /// Wraps a fitted classifier after checking that every tree is well formed.
    ///
    /// Children must point forward (to a higher node index) so that a walk always
    /// terminates at a leaf.
    pub fn new(artifact: ClassifierArtifact) -> Result<Self, CropforgeError> {
        let n_classes = artifact.classes().len();
        if n_classes == 0 {
            return Err(CropforgeError::InvalidArtifact(
                "classifier has no classes".to_string(),
            ));
        }

        let trees = artifact.trees();
        if trees.is_empty() {
            return Err(CropforgeError::InvalidArtifact(
                "random forest has no trees".to_string(),
            ));
        }
        for (t, tree) in trees.iter().enumerate() {
            validate_tree(tree, artifact.n_features(), n_classes)
                .map_err(|reason| CropforgeError::InvalidArtifact(format!("tree {}: {}", t, reason)))?;
        }

        Ok(Self { artifact })
    }

    pub fn n_features(&self) -> usize {
        self.artifact.n_features()
    }

    pub fn classes(&self) -> &[ClassLabel] {
        self.artifact.classes()
    }

    /// Predicts exactly one class for a single feature vector.
    ///
    /// A single tree answers with the majority class of the leaf reached. A forest
    /// averages the class proportions of every tree's leaf and answers with the
    /// highest; ties go to the class listed first.
    pub fn predict(&self, features: &[f64]) -> Result<&ClassLabel, CropforgeError> {
        if features.len() != self.n_features() {
            return Err(CropforgeError::FeatureShape {
                expected: self.n_features(),
                found: features.len(),
            });
        }

        let trees = self.artifact.trees();
        let mut votes = vec![0.0; self.classes().len()];
        for tree in &trees {
            let leaf = &tree.value[leaf_index(tree, features)];
            let total: f64 = leaf.iter().sum();
            if total > 0.0 {
                for (vote, weight) in votes.iter_mut().zip(leaf) {
                    *vote += weight / total;
                }
            }
        }

        let best = votes
            .iter()
            .enumerate()
            .fold(0, |best, (i, v)| if *v > votes[best] { i } else { best });
        Ok(&self.classes()[best])
    }
}

fn leaf_index(tree: &TreeArtifact, features: &[f64]) -> usize {
    let mut node = 0;
    while !is_leaf(tree, node) {
        let feature = tree.feature[node] as usize;
        node = if features[feature] <= tree.threshold[node] {
            tree.children_left[node] as usize
        } else {
            tree.children_right[node] as usize
        };
    }
    node
}

fn is_leaf(tree: &TreeArtifact, node: usize) -> bool {
    tree.children_left[node] == tree.children_right[node]
}

fn validate_tree(tree: &TreeArtifact, n_features: usize, n_classes: usize) -> Result<(), String> {
    let n = tree.node_count();
    if n == 0 {
        return Err("tree has no nodes".to_string());
    }
    if tree.children_right.len() != n
        || tree.feature.len() != n
        || tree.threshold.len() != n
        || tree.value.len() != n
    {
        return Err("node arrays differ in length".to_string());
    }

    for node in 0..n {
        if tree.value[node].len() != n_classes {
            return Err(format!(
                "node {} has {} class weights, expected {}",
                node,
                tree.value[node].len(),
                n_classes
            ));
        }
        if is_leaf(tree, node) {
            continue;
        }
        for child in [tree.children_left[node], tree.children_right[node]] {
            if child <= node as i64 || child >= n as i64 {
                return Err(format!("node {} has invalid child {}", node, child));
            }
        }
        let feature = tree.feature[node];
        if feature < 0 || feature as usize >= n_features {
            return Err(format!("node {} splits on missing feature {}", node, feature));
        }
    }
    Ok(())
}
