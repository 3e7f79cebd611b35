use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use housing_filter::app::pipelines::json_pipeline::parse_records;
use housing_filter::app::report::render_survey;
use housing_filter::config::parse_cutoff_arg;
use housing_filter::core::survey::{date_like_fields, DateSurvey};
use housing_filter::core::Storage;
use housing_filter::utils::logger;
use housing_filter::LocalStorage;

#[derive(Parser)]
#[command(name = "date-survey")]
#[command(about = "Year distribution of project dates and records past a cutoff")]
struct Args {
    #[arg(long, default_value = "./data/nyc_affordable_housing_data.json")]
    input: String,

    #[arg(long, value_parser = parse_cutoff_arg)]
    cutoff: NaiveDate,

    /// Number of leading records scanned for date-like field names
    #[arg(long, default_value = "5")]
    sample: usize,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let bytes = LocalStorage::new(".")
        .read_file(&args.input)
        .with_context(|| format!("reading {}", args.input))?;
    let records = parse_records(&args.input, &bytes)?;
    tracing::info!("Analyzing date patterns in {} records", records.len());

    let survey = DateSurvey::build(&records, args.cutoff);
    let fields = date_like_fields(&records, args.sample);

    print!("{}", render_survey(&survey, &fields));
    Ok(())
}
