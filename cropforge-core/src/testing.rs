//! Small in-memory artifact set shared by the unit tests.
//!
//! Both scalers are identities so the trees split on raw values:
//!
//! * crop model: rainfall <= 150 → maize; else humidity <= 60 → cotton; else rice
//! * crop encoder: barley, maize, mungbean (no rice, no cotton)
//! * fertilizer model: crop code <= 0.5 → 0; else nitrogen <= 50 → 1; else 2
//! * fertilizer encoder: 10-26-26, DAP, Urea

use crate::{
    artifacts::{builder::ArtifactSetBuilder, ArtifactSet, FERTILIZER_FEATURE_COUNT},
    classifier::Classifier,
    encoder::LabelEncoder,
    scaler::FeatureScaler,
};
use cropforge_schemas::{
    artifact::{ClassLabel, ClassifierArtifact, EncoderArtifact, ScalerArtifact, TreeArtifact},
    sample::CROP_FEATURE_COUNT,
};

pub fn identity_scaler(n_features: usize) -> FeatureScaler {
    FeatureScaler::new(ScalerArtifact::MinMax {
        min: vec![0.0; n_features],
        scale: vec![1.0; n_features],
    })
    .unwrap()
}

pub fn constant_classifier(n_features: usize, label: ClassLabel) -> Classifier {
    Classifier::new(ClassifierArtifact::DecisionTree {
        n_features,
        classes: vec![label],
        tree: TreeArtifact {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![vec![1.0]],
        },
    })
    .unwrap()
}

/// Two nested splits: `first` on node 0 and `second` on node 2, with leaves
/// 1, 3 and 4 voting for class 0, 1 and 2 respectively.
fn two_split_tree(first: (i64, f64), second: (i64, f64)) -> TreeArtifact {
    TreeArtifact {
        children_left: vec![1, -1, 3, -1, -1],
        children_right: vec![2, -1, 4, -1, -1],
        feature: vec![first.0, -2, second.0, -2, -2],
        threshold: vec![first.1, -2.0, second.1, -2.0, -2.0],
        value: vec![
            vec![1.0, 1.0, 1.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 1.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ],
    }
}

fn names(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

pub fn crop_model() -> Classifier {
    Classifier::new(ClassifierArtifact::DecisionTree {
        n_features: CROP_FEATURE_COUNT,
        classes: ["maize", "cotton", "rice"]
            .iter()
            .map(|s| ClassLabel::Name(s.to_string()))
            .collect(),
        tree: two_split_tree((6, 150.0), (4, 60.0)),
    })
    .unwrap()
}

pub fn fertilizer_model() -> Classifier {
    Classifier::new(ClassifierArtifact::DecisionTree {
        n_features: FERTILIZER_FEATURE_COUNT,
        classes: vec![ClassLabel::Code(0), ClassLabel::Code(1), ClassLabel::Code(2)],
        tree: two_split_tree((0, 0.5), (2, 50.0)),
    })
    .unwrap()
}

pub fn crop_encoder() -> LabelEncoder {
    LabelEncoder::new(
        "crop",
        EncoderArtifact {
            classes: names(&["barley", "maize", "mungbean"]),
        },
    )
    .unwrap()
}

pub fn soil_encoder() -> LabelEncoder {
    LabelEncoder::new(
        "soil type",
        EncoderArtifact {
            classes: names(&["black", "clay", "loamy", "red", "sandy"]),
        },
    )
    .unwrap()
}

pub fn fertilizer_encoder() -> LabelEncoder {
    LabelEncoder::new(
        "fertilizer",
        EncoderArtifact {
            classes: names(&["10-26-26", "DAP", "Urea"]),
        },
    )
    .unwrap()
}

pub fn builder() -> ArtifactSetBuilder {
    ArtifactSetBuilder::new()
        .with_crop_model(crop_model())
        .with_crop_scaler(identity_scaler(CROP_FEATURE_COUNT))
        .with_fertilizer_model(fertilizer_model())
        .with_fertilizer_scaler(identity_scaler(FERTILIZER_FEATURE_COUNT))
        .with_crop_encoder(crop_encoder())
        .with_soil_encoder(soil_encoder())
        .with_fertilizer_encoder(fertilizer_encoder())
}

pub fn artifacts() -> ArtifactSet {
    builder().build().unwrap()
}
