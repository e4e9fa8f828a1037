//! Feature normalization with a pre-fitted linear transform.

use crate::error::CropforgeError;
use cropforge_schemas::artifact::ScalerArtifact;

#[derive(Debug, Clone)]
pub struct FeatureScaler {
    artifact: ScalerArtifact,
}

impl FeatureScaler {
    /// Wraps a fitted scaler, rejecting mismatched vector lengths and zero or
    /// non-finite standard-scaler divisors.
    pub fn new(artifact: ScalerArtifact) -> Result<Self, CropforgeError> {
        match &artifact {
            ScalerArtifact::Standard { mean, scale } => {
                if mean.len() != scale.len() {
                    return Err(CropforgeError::InvalidArtifact(format!(
                        "standard scaler has {} means but {} scales",
                        mean.len(),
                        scale.len()
                    )));
                }
                if let Some(i) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
                    return Err(CropforgeError::InvalidArtifact(format!(
                        "standard scaler divisor for feature {} is {}",
                        i, scale[i]
                    )));
                }
            }
            ScalerArtifact::MinMax { min, scale } => {
                if min.len() != scale.len() {
                    return Err(CropforgeError::InvalidArtifact(format!(
                        "min-max scaler has {} offsets but {} scales",
                        min.len(),
                        scale.len()
                    )));
                }
            }
        }
        Ok(Self { artifact })
    }

    pub fn n_features(&self) -> usize {
        self.artifact.n_features()
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, CropforgeError> {
        if features.len() != self.n_features() {
            return Err(CropforgeError::FeatureShape {
                expected: self.n_features(),
                found: features.len(),
            });
        }

        let scaled = match &self.artifact {
            ScalerArtifact::Standard { mean, scale } => features
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| (x - m) / s)
                .collect(),
            ScalerArtifact::MinMax { min, scale } => features
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
        };
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn standard_scaler_centers_and_divides() {
        let scaler = FeatureScaler::new(ScalerArtifact::Standard {
            mean: vec![50.0, 20.0],
            scale: vec![25.0, 5.0],
        })
        .unwrap();

        let scaled = scaler.transform(&[100.0, 15.0]).unwrap();
        assert_relative_eq!(scaled[0], 2.0);
        assert_relative_eq!(scaled[1], -1.0);
    }

    #[test]
    fn min_max_scaler_maps_into_unit_range() {
        // Fitted on [0, 200] and [0, 10].
        let scaler = FeatureScaler::new(ScalerArtifact::MinMax {
            min: vec![0.0, 0.0],
            scale: vec![0.005, 0.1],
        })
        .unwrap();

        let scaled = scaler.transform(&[90.0, 6.5]).unwrap();
        assert_relative_eq!(scaled[0], 0.45, epsilon = 1e-12);
        assert_relative_eq!(scaled[1], 0.65, epsilon = 1e-12);
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let scaler = FeatureScaler::new(ScalerArtifact::MinMax {
            min: vec![0.0; 7],
            scale: vec![1.0; 7],
        })
        .unwrap();

        match scaler.transform(&[1.0, 2.0]) {
            Err(CropforgeError::FeatureShape { expected, found }) => {
                assert_eq!(expected, 7);
                assert_eq!(found, 2);
            }
            other => panic!("expected a shape error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_zero_divisor() {
        let result = FeatureScaler::new(ScalerArtifact::Standard {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 0.0],
        });
        assert!(matches!(result, Err(CropforgeError::InvalidArtifact(_))));
    }
}
