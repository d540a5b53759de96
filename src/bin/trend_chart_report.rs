use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use trend_chart::ChartResult;
use trend_chart::api::{ChartEngine, ChartEngineConfig};
use trend_chart::core::{
    ChartModel, DateGranularity, FieldAliases, Record, SeriesBuilder, Viewport, group_by_metric,
};
use trend_chart::render::NullRenderer;
use trend_chart::telemetry;

const USAGE: &str = "usage: trend_chart_report --input <records.json> [--output <report.json>] [--since YYYY-MM-DD] [--month] [--item-count N]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    since: Option<NaiveDate>,
    granularity: DateGranularity,
    item_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricReport {
    metric: String,
    points: usize,
    first_category: Option<String>,
    last_category: Option<String>,
    axis_min: f64,
    axis_max: f64,
    ticks: Vec<f64>,
    scientific: bool,
    guide_lines: usize,
    draw_commands: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    records_read: usize,
    records_skipped: usize,
    metrics: Vec<MetricReport>,
    metrics_failed: Vec<String>,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let document: Value = serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
    let entries = document
        .as_array()
        .ok_or_else(|| "input must be a JSON array of records".to_owned())?;

    let aliases = FieldAliases::default();
    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (position, entry) in entries.iter().enumerate() {
        match Record::from_json(entry, &aliases) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(position, error = %err, "skipping unreadable record");
                skipped += 1;
            }
        }
    }
    let records_read = records.len();

    let mut builder = SeriesBuilder::new().with_granularity(args.granularity);
    if let Some(since) = args.since {
        builder = builder.with_since(since);
    }
    let models = builder.build(&group_by_metric(records));

    let config = ChartEngineConfig::new(Viewport::new(375, 260))
        .with_item_count(args.item_count)
        .with_scroll(true);
    let mut metrics = Vec::with_capacity(models.len());
    let mut metrics_failed = Vec::new();
    for model in models {
        let metric = model
            .series
            .first()
            .map(|series| series.name.clone())
            .unwrap_or_default();
        match chart_metric(&metric, model, &config) {
            Ok(report) => metrics.push(report),
            Err(err) => {
                warn!(metric = %metric, error = %err, "skipping metric that failed to chart");
                metrics_failed.push(metric);
            }
        }
    }

    let report = Report {
        records_read,
        records_skipped: skipped,
        metrics,
        metrics_failed,
    };
    let payload = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("failed to serialize report: {err}"))?;
    match args.output {
        Some(path) => fs::write(&path, payload)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn chart_metric(
    metric: &str,
    model: ChartModel,
    config: &ChartEngineConfig,
) -> ChartResult<MetricReport> {
    let points = model.categories.len();
    let first_category = model.categories.first().cloned();
    let last_category = model.categories.last().cloned();
    let scientific = model.scientific;
    let guide_lines = model.guide_lines.len();

    let mut engine = ChartEngine::with_model(NullRenderer::default(), config.clone(), model)?;
    engine.render()?;
    let range = engine.resolved_range()?;
    let draw_commands = engine.renderer().last_command_count;
    info!(metric, points, draw_commands, "metric charted");

    Ok(MetricReport {
        metric: metric.to_owned(),
        points,
        first_category,
        last_category,
        axis_min: range.min,
        axis_max: range.max,
        ticks: range.tick_values().to_vec(),
        scientific,
        guide_lines,
        draw_commands,
    })
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut since = None::<NaiveDate>;
    let mut granularity = DateGranularity::Day;
    let mut item_count = 7;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--since" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --since".to_owned())?;
                let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|err| format!("invalid --since date `{value}`: {err}"))?;
                since = Some(date);
            }
            "--item-count" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --item-count".to_owned())?;
                item_count = value
                    .parse()
                    .map_err(|err| format!("invalid --item-count `{value}`: {err}"))?;
            }
            "--month" => granularity = DateGranularity::Month,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| USAGE.to_owned())?,
        output,
        since,
        granularity,
        item_count,
    })
}
