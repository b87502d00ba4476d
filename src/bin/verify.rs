use anyhow::Context;
use clap::Parser;
use notebook_quiz::core::verifier::Verifier;
use notebook_quiz::utils::logger;
use notebook_quiz::{DifficultyLevel, MarkerConfig, Notebook};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "verify-quiz")]
#[command(about = "Checks generated quiz notebooks against the source notebook")]
struct Args {
    /// The original worked-example notebook
    #[arg(long)]
    original: String,

    /// Directory holding one subdirectory per difficulty tier
    #[arg(long, default_value = "./output")]
    generated_root: String,

    #[arg(long, default_value = "5")]
    easy_blanks: usize,

    #[arg(long, default_value = "10")]
    normal_blanks: usize,

    #[arg(long, default_value = "20")]
    hard_blanks: usize,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

fn read_notebook(path: &Path) -> anyhow::Result<Notebook> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read notebook {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("failed to parse notebook {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let original_path = PathBuf::from(&args.original);
    let original = read_notebook(&original_path)?;
    let filename = original_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "notebook.ipynb".to_string());

    let levels = vec![
        DifficultyLevel::new("easy", args.easy_blanks),
        DifficultyLevel::new("normal", args.normal_blanks),
        DifficultyLevel::new("hard", args.hard_blanks),
    ];

    let markers = MarkerConfig::default();
    let verifier = Verifier::new(&markers);
    let mut all_passed = true;

    for level in &levels {
        let generated_path = Path::new(&args.generated_root)
            .join(&level.name)
            .join(&filename);

        println!("--- Verifying {} ({}) ---", level.name, generated_path.display());

        // One unreadable tier must not stop the others from being checked.
        let generated = match read_notebook(&generated_path) {
            Ok(notebook) => notebook,
            Err(e) => {
                tracing::error!("Skipping {}: {:#}", level.name, e);
                println!("  SKIPPED: {:#}", e);
                all_passed = false;
                continue;
            }
        };

        let report = verifier.verify_level(&level.name, &original, &generated, level.blanks);

        for check in &report.checks {
            println!(
                "  Problem {} part {}: {} blanks (target {}) .. {}",
                check.problem,
                check.part,
                check.blanks_found,
                check.target,
                if check.passed { "ok" } else { "FAIL" }
            );
        }
        for mismatch in &report.mismatches {
            println!("  MISMATCH: {}", mismatch);
        }

        if report.passed() {
            println!("  {} PASSED", level.name);
        } else {
            println!("  {} FAILED", level.name);
            all_passed = false;
        }
    }

    if all_passed {
        println!("All notebooks verified successfully");
        Ok(())
    } else {
        println!("Verification found problems");
        std::process::exit(1);
    }
}
