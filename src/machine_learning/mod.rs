use crate::model::ModelArtifact;
use crate::verdict::EngineError;
use regex::Regex;
use std::collections::HashMap;

/// Term-weighting feature extractor. Maps raw text onto the trained
/// vocabulary: term frequency times the precomputed IDF weight, L2
/// normalized. Out-of-vocabulary tokens contribute nothing, matching the
/// transform the classifier was trained against.
pub struct TfidfVectorizer {
    index: HashMap<String, usize>,
    idf: Vec<f64>,
    token_regex: Regex,
}

impl TfidfVectorizer {
    pub fn new(artifact: &ModelArtifact) -> Self {
        let mut index = HashMap::with_capacity(artifact.vocabulary.len());
        let mut idf = Vec::with_capacity(artifact.vocabulary.len());
        for (position, entry) in artifact.vocabulary.iter().enumerate() {
            index.insert(entry.term.to_lowercase(), position);
            idf.push(entry.idf);
        }
        Self {
            index,
            idf,
            token_regex: Regex::new(r"[a-z0-9]{2,}").unwrap(),
        }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    /// Produce the fixed-length feature vector for one input. Deterministic:
    /// vector order is the vocabulary order of the artifact.
    pub fn extract(&self, text: &str) -> Result<Vec<f64>, EngineError> {
        let lowered = text.to_lowercase();
        if lowered.trim().is_empty() {
            return Err(EngineError::InvalidInput);
        }

        let mut weights = vec![0.0_f64; self.idf.len()];
        for token in self.token_regex.find_iter(&lowered) {
            if let Some(&position) = self.index.get(token.as_str()) {
                weights[position] += self.idf[position];
            }
        }

        let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in &mut weights {
                *w /= norm;
            }
        }

        Ok(weights)
    }
}

/// Trained linear binary classifier: weighted sum plus intercept, squashed
/// through the logistic function into a phishing probability.
pub struct LogisticClassifier {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticClassifier {
    pub fn new(artifact: &ModelArtifact) -> Self {
        Self {
            coefficients: artifact.coefficients.clone(),
            intercept: artifact.intercept,
        }
    }

    /// Pure function of the feature vector and the loaded parameters.
    pub fn score(&self, features: &[f64]) -> Result<f64, EngineError> {
        if features.len() != self.coefficients.len() {
            return Err(EngineError::ModelShape(format!(
                "feature vector has {} entries but coefficient vector has {}",
                features.len(),
                self.coefficients.len()
            )));
        }

        let z = self.intercept
            + features
                .iter()
                .zip(self.coefficients.iter())
                .map(|(f, c)| f * c)
                .sum::<f64>();
        Ok(sigmoid(z))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VocabEntry;

    fn test_artifact() -> ModelArtifact {
        ModelArtifact {
            version: "test".to_string(),
            vocabulary: vec![
                VocabEntry {
                    term: "verify".to_string(),
                    idf: 1.0,
                },
                VocabEntry {
                    term: "meeting".to_string(),
                    idf: 1.0,
                },
            ],
            coefficients: vec![2.0, -2.0],
            intercept: 0.0,
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let vectorizer = TfidfVectorizer::new(&ModelArtifact::builtin());
        let first = vectorizer.extract("Verify your account now").unwrap();
        let second = vectorizer.extract("Verify your account now").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_vocabulary_tokens_ignored() {
        let vectorizer = TfidfVectorizer::new(&test_artifact());
        let features = vectorizer.extract("zzyzx flurble quux").unwrap();
        assert!(features.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_empty_input_rejected() {
        let vectorizer = TfidfVectorizer::new(&test_artifact());
        assert!(matches!(
            vectorizer.extract("   "),
            Err(EngineError::InvalidInput)
        ));
    }

    #[test]
    fn test_vector_is_l2_normalized() {
        let vectorizer = TfidfVectorizer::new(&test_artifact());
        let features = vectorizer.extract("verify the meeting").unwrap();
        let norm = features.iter().map(|w| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_orders_phishing_above_benign() {
        let artifact = test_artifact();
        let vectorizer = TfidfVectorizer::new(&artifact);
        let classifier = LogisticClassifier::new(&artifact);

        let phishy = classifier
            .score(&vectorizer.extract("verify verify").unwrap())
            .unwrap();
        let benign = classifier
            .score(&vectorizer.extract("meeting meeting").unwrap())
            .unwrap();

        assert!(phishy > 0.5);
        assert!(benign < 0.5);
        assert!((0.0..=1.0).contains(&phishy));
        assert!((0.0..=1.0).contains(&benign));
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let classifier = LogisticClassifier::new(&test_artifact());
        let err = classifier.score(&[0.0; 5]).unwrap_err();
        assert!(matches!(err, EngineError::ModelShape(_)));
    }
}
