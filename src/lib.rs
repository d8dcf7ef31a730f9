pub mod engine;
pub mod machine_learning;
pub mod model;
pub mod rules;
pub mod url_utils;
pub mod verdict;

pub use engine::AnalysisEngine;
pub use model::ModelArtifact;
pub use rules::{RuleEvaluator, RulesConfig};
pub use verdict::{EngineError, Label, Verdict};
