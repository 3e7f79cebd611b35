use clap::Parser;
use housing_filter::app::report::render_run_report;
use housing_filter::utils::error::ErrorSeverity;
use housing_filter::utils::{logger, validation::Validate};
use housing_filter::{CliConfig, FilterEngine, JsonFilterPipeline, LocalStorage};

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting housing-filter");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // Paths in the config are used as given, relative to the working directory.
    let storage = LocalStorage::new(".");
    let pipeline = JsonFilterPipeline::new(storage, config);
    let engine = FilterEngine::new(pipeline);

    match engine.run() {
        Ok(report) => {
            print!("{}", render_run_report(&report));
        }
        Err(e) => {
            tracing::error!(
                "Filter run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
