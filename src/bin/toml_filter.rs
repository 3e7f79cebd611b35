use clap::Parser;
use housing_filter::app::report::render_run_report;
use housing_filter::core::ConfigProvider;
use housing_filter::utils::{logger, validation::Validate};
use housing_filter::{FilterEngine, JsonFilterPipeline, LocalStorage, SelectionPolicy, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-filter")]
#[command(about = "Date filter for housing records driven by a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "filter-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Override the policy from the config
    #[arg(long, value_enum)]
    policy: Option<SelectionPolicy>,

    /// Filter and report counts without writing any file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(policy) = args.policy {
        config.set_policy(policy);
        tracing::info!("Policy overridden to: {}", policy);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!(
        "Input: {} | Output: {} | Cutoff: {} | Policy: {} | Fallback: {}",
        config.input_path(),
        config.output_path(),
        config.cutoff(),
        config.policy(),
        config.fallback_enabled()
    );

    let dry_run = args.dry_run;
    let engine = FilterEngine::new(JsonFilterPipeline::new(LocalStorage::new("."), config));

    let report = if dry_run {
        tracing::info!("DRY RUN MODE - no files will be written");
        engine.preview()?
    } else {
        engine.run()?
    };

    print!("{}", render_run_report(&report));
    Ok(())
}
