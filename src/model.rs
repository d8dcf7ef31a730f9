use crate::verdict::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One vocabulary term with its inverse-document-frequency weight, fixed at
/// training time. Vocabulary order defines feature-vector order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabEntry {
    pub term: String,
    pub idf: f64,
}

/// Trained model parameters: TF-IDF vocabulary plus the logistic-regression
/// coefficient vector. Loaded once at startup, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_version")]
    pub version: String,
    pub vocabulary: Vec<VocabEntry>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl ModelArtifact {
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_yaml::from_str(&content)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Internal-consistency check. A mismatch means the artifact was packaged
    /// against a different vocabulary and must refuse to serve.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.vocabulary.is_empty() {
            return Err(EngineError::ModelShape("empty vocabulary".to_string()));
        }
        if self.vocabulary.len() != self.coefficients.len() {
            return Err(EngineError::ModelShape(format!(
                "vocabulary has {} terms but coefficient vector has {} entries",
                self.vocabulary.len(),
                self.coefficients.len()
            )));
        }
        Ok(())
    }

    /// Compiled-in model trained on the phishing/safe corpus. Used when no
    /// artifact file is present.
    pub fn builtin() -> Self {
        let mut vocabulary = Vec::with_capacity(BUILTIN_TERMS.len());
        let mut coefficients = Vec::with_capacity(BUILTIN_TERMS.len());
        for &(term, idf, coefficient) in BUILTIN_TERMS {
            vocabulary.push(VocabEntry {
                term: term.to_string(),
                idf,
            });
            coefficients.push(coefficient);
        }
        Self {
            version: format!("{}-builtin", env!("CARGO_PKG_VERSION")),
            vocabulary,
            coefficients,
            intercept: -1.2,
        }
    }
}

// (term, idf, coefficient) triples exported from the trained vectorizer and
// classifier. Order is significant.
const BUILTIN_TERMS: &[(&str, f64, f64)] = &[
    ("account", 1.8, 1.6),
    ("login", 1.9, 1.5),
    ("verify", 2.2, 1.9),
    ("secure", 2.0, 1.2),
    ("update", 1.7, 1.0),
    ("urgent", 2.4, 1.8),
    ("password", 2.1, 1.4),
    ("bank", 2.0, 1.3),
    ("paypal", 2.3, 1.7),
    ("signin", 2.6, 1.6),
    ("confirm", 2.0, 1.2),
    ("suspended", 2.7, 1.8),
    ("click", 1.8, 1.1),
    ("refund", 2.3, 1.4),
    ("invoice", 2.2, 0.9),
    ("alert", 2.1, 1.0),
    ("limited", 2.2, 0.8),
    ("expire", 2.4, 1.2),
    ("billing", 2.2, 1.1),
    ("security", 1.9, 0.9),
    ("free", 1.7, 0.7),
    ("winner", 2.6, 1.5),
    ("prize", 2.5, 1.4),
    ("lottery", 2.8, 1.6),
    ("bitcoin", 2.5, 1.1),
    ("gift", 2.1, 0.8),
    ("card", 1.9, 0.7),
    ("http", 1.2, 0.6),
    ("www", 1.1, 0.3),
    ("com", 0.9, 0.1),
    ("meeting", 2.0, -1.1),
    ("lunch", 2.3, -1.2),
    ("weather", 2.4, -1.0),
    ("report", 1.8, -0.6),
    ("schedule", 2.1, -0.9),
    ("project", 1.9, -0.8),
    ("thanks", 1.7, -1.0),
    ("tomorrow", 2.0, -0.9),
    ("team", 1.8, -0.7),
    ("newsletter", 2.2, -0.5),
    ("weekend", 2.2, -1.0),
    ("family", 2.1, -0.9),
    ("photos", 2.2, -0.8),
    ("dinner", 2.3, -1.1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_consistent() {
        let artifact = ModelArtifact::builtin();
        assert!(artifact.validate().is_ok());
        assert_eq!(artifact.vocabulary.len(), artifact.coefficients.len());
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut artifact = ModelArtifact::builtin();
        artifact.coefficients.pop();
        let err = artifact.validate().unwrap_err();
        assert!(matches!(err, EngineError::ModelShape(_)));
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let artifact = ModelArtifact {
            version: "test".to_string(),
            vocabulary: Vec::new(),
            coefficients: Vec::new(),
            intercept: 0.0,
        };
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip_preserves_parameters() {
        let artifact = ModelArtifact::builtin();
        let yaml = serde_yaml::to_string(&artifact).unwrap();
        let reloaded: ModelArtifact = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(artifact.version, reloaded.version);
        assert_eq!(artifact.intercept, reloaded.intercept);
        assert_eq!(artifact.coefficients, reloaded.coefficients);
        assert_eq!(artifact.vocabulary.len(), reloaded.vocabulary.len());
        for (a, b) in artifact.vocabulary.iter().zip(reloaded.vocabulary.iter()) {
            assert_eq!(a.term, b.term);
            assert_eq!(a.idf, b.idf);
        }
    }
}
