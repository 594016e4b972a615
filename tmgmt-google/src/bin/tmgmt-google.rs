use clap::{Arg, Command};
use std::sync::Arc;
use tmgmt::{DataItem, DataTree, Job, JobState, Translator, TranslatorPlugin};
use tmgmt_google::{GoogleConfig, GoogleError, GoogleTranslator, MockApi, MockMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let matches = Command::new("tmgmt-google")
        .version("0.1.0")
        .about("Submit translation jobs to Google Translate v2")
        .arg(
            Arg::new("text")
                .help("Source texts to translate")
                .num_args(0..)
                .index(1),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .help("Target language code (e.g. de, fr)"),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source language code (default: en)")
                .default_value("en"),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use the mock backend instead of the live API")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("languages")
                .long("languages")
                .short('l')
                .help("List the supported target languages and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("detect")
                .long("detect")
                .short('d')
                .help("Detect the language of the given texts and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show job messages and per-key results")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let source = matches.get_one::<String>("source").unwrap();
    let use_mock = matches.get_flag("mock");
    let verbose = matches.get_flag("verbose");

    let plugin = if use_mock {
        GoogleTranslator::with_api(
            GoogleConfig::new("mock"),
            Arc::new(MockApi::new(MockMode::Suffix)),
        )
    } else {
        let config = match GoogleConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("   Set it with: export GOOGLE_TRANSLATE_API_KEY=your_api_key");
                eprintln!("   Or use --mock to use the mock backend");
                return Err(e.into());
            }
        };
        GoogleTranslator::new(config)?
    };

    let translator = Translator::new("Google translator", plugin.plugin_id())
        .with_mappings(plugin.default_remote_language_mappings());

    if matches.get_flag("languages") {
        for language in plugin.supported_target_languages(&translator, source).await {
            println!("{}", language);
        }
        return Ok(());
    }

    let texts: Vec<String> = matches
        .get_many::<String>("text")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if texts.is_empty() {
        eprintln!("No source texts given");
        std::process::exit(2);
    }

    if matches.get_flag("detect") {
        for (text, detection) in texts.iter().zip(plugin.detect(&texts).await?) {
            println!(
                "{}: {} (confidence {:.2})",
                text, detection.language, detection.confidence
            );
        }
        return Ok(());
    }

    let target = matches
        .get_one::<String>("target")
        .ok_or("--target is required unless --languages or --detect is given")?;

    let data = DataTree::Group(
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                (
                    format!("item-{}", i),
                    DataTree::Leaf(DataItem::new(text.clone())),
                )
            })
            .collect(),
    );
    let mut job = Job::new(source.clone(), target.clone(), data);

    if !plugin.can_translate(&translator, &job) {
        return Err(GoogleError::Precondition(
            "missing API key or a text over the size limit".to_string(),
        )
        .into());
    }

    plugin.request_translation(&translator, &mut job).await;

    if verbose {
        for message in job.messages() {
            eprintln!("[{:?}] {}", message.severity, message.text);
        }
    }

    match job.state() {
        JobState::Submitted => {
            for (key, item) in job.data().flatten() {
                let translation = item.translation.as_deref().unwrap_or("");
                if verbose {
                    println!("{}: {}", key, translation);
                } else {
                    println!("{}", translation);
                }
            }
            Ok(())
        }
        _ => {
            let reason = job
                .messages()
                .last()
                .map(|m| m.text.clone())
                .unwrap_or_else(|| "job was not submitted".to_string());
            Err(reason.into())
        }
    }
}
