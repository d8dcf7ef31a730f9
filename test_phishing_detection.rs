#![allow(clippy::uninlined_format_args)]

use phishguard::engine::AnalysisEngine;
use phishguard::model::ModelArtifact;
use phishguard::rules::RulesConfig;
use phishguard::verdict::Label;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing the hybrid engine against known phishing shapes...");

    let engine = AnalysisEngine::new(&ModelArtifact::builtin(), &RulesConfig::default())
        .map_err(|e| anyhow::anyhow!("engine init failed: {}", e))?;

    let samples = [
        ("http://192.168.0.1/verify-account-urgent", true),
        ("http://paypa1.com/login", true),
        ("https://secure-login-update.account.example.icu/confirm", true),
        ("urgent! your account is suspended, verify your password now", true),
        ("https://example.com/about", false),
        ("see you at the team lunch tomorrow", false),
        ("the weather report says rain this weekend", false),
    ];

    let mut correct = 0;
    for (text, expect_phishing) in &samples {
        let verdict = engine.analyze(text)?;
        let flagged = verdict.label == Label::Phishing;
        let marker = if flagged == *expect_phishing {
            correct += 1;
            "✅"
        } else {
            "❌"
        };
        println!("\n{} {:?}", marker, text);
        println!(
            "   verdict: {:?}, confidence {:.1}%",
            verdict.label,
            verdict.confidence * 100.0
        );
        for reason in &verdict.reasons {
            println!("   - {}", reason);
        }
    }

    println!("\n{}/{} samples classified as expected", correct, samples.len());
    Ok(())
}
