use clap::{Arg, Command};
use log::LevelFilter;
use phishguard::engine::AnalysisEngine;
use phishguard::model::ModelArtifact;
use phishguard::rules::RulesConfig;
use phishguard::verdict::{Label, Verdict};
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("phishguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Hybrid phishing detector combining a statistical text classifier with rule-based URL analysis")
        .arg(
            Arg::new("text")
                .value_name("TEXT")
                .help("URL or message text to analyze")
                .index(1),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("Model artifact path")
                .default_value("model/phishing_model.yaml"),
        )
        .arg(
            Arg::new("rules")
                .short('r')
                .long("rules")
                .value_name("FILE")
                .help("Rule configuration path")
                .default_value("config/rules.yaml"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit the verdict as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("DIR")
                .help("Write default model and rule files into a directory")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the model artifact and rule configuration, then exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-rule detail")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(dir) = matches.get_one::<String>("generate-config") {
        if let Err(e) = generate_default_config(dir) {
            eprintln!("Error generating configuration: {e}");
            process::exit(1);
        }
        return;
    }

    let model_path = matches.get_one::<String>("model").unwrap();
    let rules_path = matches.get_one::<String>("rules").unwrap();

    let model = match load_model(model_path) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error loading model artifact: {e}");
            process::exit(1);
        }
    };
    let rules = match load_rules(rules_path) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error loading rule configuration: {e}");
            process::exit(1);
        }
    };

    let engine = match AnalysisEngine::new(&model, &rules) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error initializing engine: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("Configuration OK: model {} loaded", model.version);
        return;
    }

    let Some(text) = matches.get_one::<String>("text") else {
        eprintln!("No input text provided. Pass a URL or message to analyze.");
        process::exit(2);
    };

    match engine.analyze(text) {
        Ok(verdict) => {
            if matches.get_flag("json") {
                match serde_json::to_string_pretty(&verdict) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error serializing verdict: {e}");
                        process::exit(1);
                    }
                }
            } else {
                print_verdict(&verdict);
            }
        }
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            process::exit(1);
        }
    }
}

fn load_model(path: &str) -> anyhow::Result<ModelArtifact> {
    if Path::new(path).exists() {
        ModelArtifact::load_from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("invalid model artifact '{}': {}", path, e))
    } else {
        log::warn!("Model artifact not found at {path}, using built-in model");
        Ok(ModelArtifact::builtin())
    }
}

fn load_rules(path: &str) -> anyhow::Result<RulesConfig> {
    if Path::new(path).exists() {
        RulesConfig::load_from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("invalid rule configuration '{}': {}", path, e))
    } else {
        log::warn!("Rule configuration not found at {path}, using defaults");
        Ok(RulesConfig::default())
    }
}

fn generate_default_config(dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    let model_path = format!("{dir}/phishing_model.yaml");
    let rules_path = format!("{dir}/rules.yaml");
    std::fs::write(
        &model_path,
        serde_yaml::to_string(&ModelArtifact::builtin())?,
    )?;
    std::fs::write(&rules_path, serde_yaml::to_string(&RulesConfig::default())?)?;
    println!("Wrote {model_path}");
    println!("Wrote {rules_path}");
    Ok(())
}

fn print_verdict(verdict: &Verdict) {
    match verdict.label {
        Label::Phishing => println!("❌ Phishing detected"),
        Label::Safe => println!("✅ Safe"),
    }
    println!("Confidence: {:.1}%", verdict.confidence * 100.0);
    if !verdict.reasons.is_empty() {
        println!("Why flagged?");
        for reason in &verdict.reasons {
            println!("  - {reason}");
        }
    }
}
