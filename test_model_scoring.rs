#![allow(clippy::uninlined_format_args)]

use phishguard::machine_learning::{LogisticClassifier, TfidfVectorizer};
use phishguard::model::ModelArtifact;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Inspecting the statistical classifier in isolation...");

    let artifact = ModelArtifact::builtin();
    artifact
        .validate()
        .map_err(|e| anyhow::anyhow!("artifact rejected: {}", e))?;
    println!(
        "Model {}: {} vocabulary terms, intercept {}",
        artifact.version,
        artifact.vocabulary.len(),
        artifact.intercept
    );

    let vectorizer = TfidfVectorizer::new(&artifact);
    let classifier = LogisticClassifier::new(&artifact);

    let samples = [
        "verify your paypal account password urgently",
        "free prize winner! claim your lottery gift card",
        "team lunch moved to tomorrow, thanks",
        "weekly project report attached for the meeting",
    ];

    for text in &samples {
        let features = vectorizer.extract(text)?;
        let active = features.iter().filter(|&&w| w != 0.0).count();
        let score = classifier.score(&features)?;
        println!(
            "\nscore {:.3} ({} active terms): {:?}",
            score, active, text
        );
    }

    // Round trip through the on-disk format must not change a single bit.
    let yaml = serde_yaml::to_string(&artifact)?;
    let reloaded: ModelArtifact = serde_yaml::from_str(&yaml)?;
    let reference = vectorizer.extract(samples[0])?;
    let original = classifier.score(&reference)?;
    let reloaded_score = LogisticClassifier::new(&reloaded).score(&reference)?;
    if original == reloaded_score {
        println!("\n✅ Artifact round trip reproduces score {:.6}", original);
    } else {
        println!(
            "\n❌ Round trip drift: {:.6} vs {:.6}",
            original, reloaded_score
        );
    }

    Ok(())
}
