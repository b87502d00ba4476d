use clap::Parser;
use notebook_quiz::core::ConfigProvider;
use notebook_quiz::utils::logger;
use notebook_quiz::{CliConfig, LocalStorage, QuizEngine, QuizPipeline, QuizSettings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting notebook-quiz generator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match QuizSettings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(".".to_string());
    let difficulties = settings.difficulties().to_vec();
    let pipeline = QuizPipeline::new(storage, settings);
    let engine = QuizEngine::new(pipeline);

    match engine.run(&difficulties) {
        Ok(summary) => {
            for outcome in &summary.outcomes {
                match (&outcome.output_path, &outcome.error) {
                    (Some(path), _) => println!("{}: {}", outcome.level, path),
                    (None, Some(error)) => println!("{}: FAILED ({})", outcome.level, error),
                    (None, None) => {}
                }
            }
            if summary.all_succeeded() {
                tracing::info!("All difficulty versions generated");
            } else {
                tracing::error!(
                    "Some versions failed: {}",
                    summary.failed_levels().join(", ")
                );
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(
                "Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());

            let exit_code = match e.severity() {
                notebook_quiz::utils::error::ErrorSeverity::Low => 0,
                notebook_quiz::utils::error::ErrorSeverity::Medium => 2,
                notebook_quiz::utils::error::ErrorSeverity::High => 1,
                notebook_quiz::utils::error::ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
