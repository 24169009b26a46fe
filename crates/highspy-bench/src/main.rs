use clap::{Parser, Subcommand, ValueEnum};
use highspy_core::{MatrixFormat, ObjSense};
use highspy_native::{Highs, ModelArrays, model_status_label};
use highspy_tools::{StageTimer, StageRecord, current_rss};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

const DEFAULT_SIZES: [usize; 4] = [10, 50, 100, 200];
const SCHEMA_VERSION: u32 = 1;

#[derive(Parser, Debug)]
#[command(author, version, about = "HiGHS solver handle benchmark runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve transportation LPs and save JSONL artifacts
    Run(RunArgs),
    /// Render benchmark artifact summaries
    Report(ReportArgs),
    /// Compare two benchmark artifacts and optionally enforce thresholds
    Compare(CompareArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Comma-separated list of problem sizes (sources = sinks = size)
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,

    /// Number of repetitions per size
    #[arg(long, default_value_t = 1)]
    repetitions: u32,

    /// Solver option `presolve` passed to every run
    #[arg(long, default_value = "choose")]
    presolve: String,

    /// JSONL output artifact path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Input JSONL benchmark artifact
    #[arg(long)]
    input: PathBuf,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct CompareArgs {
    /// Baseline JSONL benchmark artifact
    #[arg(long)]
    baseline: PathBuf,

    /// Candidate JSONL benchmark artifact
    #[arg(long)]
    candidate: PathBuf,

    /// Stage filter for comparison (for example, run)
    #[arg(long, default_value = "total")]
    stage: String,

    /// Fail if duration regression exceeds this percentage
    #[arg(long)]
    duration_threshold_pct: Option<f64>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

/// Column-wise arrays of a balanced transportation problem.
#[derive(Debug, Clone)]
struct Transportation {
    size: usize,
    cost: Vec<f64>,
    col_upper: Vec<f64>,
    row_lower: Vec<f64>,
    row_upper: Vec<f64>,
    start: Vec<usize>,
    index: Vec<usize>,
    value: Vec<f64>,
}

impl Transportation {
    /// `size` sources each supplying `size` units and `size` sinks each
    /// demanding `size` units. Column `i * size + j` ships from `i` to `j`.
    fn new(size: usize) -> Self {
        let num_col = size * size;
        let mut cost = Vec::with_capacity(num_col);
        let mut start = Vec::with_capacity(num_col);
        let mut index = Vec::with_capacity(2 * num_col);
        for source in 0..size {
            for sink in 0..size {
                cost.push(((source * 7 + sink * 13) % 17 + 1) as f64);
                start.push(index.len());
                index.push(source);
                index.push(size + sink);
            }
        }
        let supply = size as f64;
        let mut row_lower = vec![f64::NEG_INFINITY; size];
        row_lower.extend(std::iter::repeat_n(supply, size));
        let mut row_upper = vec![supply; size];
        row_upper.extend(std::iter::repeat_n(f64::INFINITY, size));
        Transportation {
            size,
            cost,
            col_upper: vec![f64::INFINITY; num_col],
            row_lower,
            row_upper,
            start,
            value: vec![1.0; index.len()],
            index,
        }
    }

    fn num_col(&self) -> usize {
        self.size * self.size
    }

    fn arrays<'a>(&'a self, col_lower: &'a [f64]) -> ModelArrays<'a> {
        ModelArrays {
            num_col: self.num_col(),
            num_row: 2 * self.size,
            num_nz: self.index.len(),
            a_format: MatrixFormat::Colwise,
            sense: ObjSense::Minimize,
            offset: 0.0,
            col_cost: &self.cost,
            col_lower,
            col_upper: &self.col_upper,
            row_lower: &self.row_lower,
            row_upper: &self.row_upper,
            a_start: &self.start,
            a_index: &self.index,
            a_value: &self.value,
            integrality: None,
        }
    }
}

#[derive(Debug, Clone)]
struct CaseExecution {
    columns: usize,
    rows: usize,
    model_status: &'static str,
    objective_value: f64,
    stages: Vec<StageRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BenchRecord {
    schema_version: u32,
    run_id: String,
    case_name: String,
    repetition: u32,
    columns: usize,
    rows: usize,
    model_status: String,
    objective_value: f64,
    stage: String,
    duration_ms: f64,
    rss_after_bytes: Option<u64>,
    rss_delta_bytes: Option<i64>,
}

#[derive(Debug, Clone, Eq, Ord, PartialEq, PartialOrd)]
struct SummaryKey {
    case_name: String,
    stage: String,
}

#[derive(Debug, Clone, Serialize)]
struct SummaryRow {
    case_name: String,
    stage: String,
    samples: usize,
    mean_duration_ms: f64,
    max_duration_ms: f64,
    mean_rss_delta_bytes: Option<f64>,
    max_rss_after_bytes: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
struct CompareRow {
    case_name: String,
    stage: String,
    baseline_mean_duration_ms: f64,
    candidate_mean_duration_ms: f64,
    duration_change_pct: Option<f64>,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run_command(args),
        Command::Report(args) => report_command(args),
        Command::Compare(args) => compare_command(args),
    }
}

fn run_command(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.repetitions == 0 {
        return Err(boxed_input_error("repetitions must be greater than zero"));
    }
    let sizes = args.sizes.clone().unwrap_or_else(|| DEFAULT_SIZES.to_vec());
    if sizes.contains(&0) {
        return Err(boxed_input_error("sizes must be greater than zero"));
    }

    let run_id = build_run_id()?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("artifacts/bench/{}.jsonl", run_id.as_str())));

    let mut records = Vec::new();
    for size in sizes {
        let case_name = format!("transport_{}", size);
        for rep_idx in 0..args.repetitions {
            let execution = execute_case(size, &args.presolve)?;
            records.extend(case_records(&run_id, &case_name, rep_idx + 1, &execution));
        }
    }

    write_records_jsonl(&output_path, &records)?;
    render_output(args.format, &records)?;
    println!("artifact: {}", output_path.display());
    Ok(())
}

fn report_command(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_records_jsonl(&args.input)?;
    render_output(args.format, &records)?;
    Ok(())
}

fn compare_command(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let baseline = summarize_records(&load_records_jsonl(&args.baseline)?);
    let candidate = summarize_records(&load_records_jsonl(&args.candidate)?);
    let rows = build_comparison_rows(&baseline, &candidate, &args.stage);
    if rows.is_empty() {
        return Err(boxed_input_error(
            "no overlapping case/stage rows to compare",
        ));
    }

    render_compare_output(args.format, &rows)?;
    if has_regressions(&rows, args.duration_threshold_pct) {
        return Err(boxed_input_error(
            "regression threshold violated (see compare output)",
        ));
    }
    Ok(())
}

fn execute_case(size: usize, presolve: &str) -> Result<CaseExecution, Box<dyn std::error::Error>> {
    let mut timer = StageTimer::start();
    let total_rss_before = current_rss();

    let problem = Transportation::new(size);
    let col_lower = vec![0.0; problem.num_col()];
    timer.mark("build");

    let mut highs = Highs::new()?;
    highs.set_option_value("output_flag", false)?;
    highs.set_option_value("presolve", presolve)?;
    highs.pass_model_arrays(problem.arrays(&col_lower))?;
    timer.mark("pass");

    highs.run()?;
    timer.mark("run");

    let total = timer.total();
    let total_rss_after = current_rss();
    let mut stages = timer.into_records();
    stages.push(StageRecord {
        stage: "total".to_string(),
        elapsed: total,
        rss_bytes: total_rss_after,
        rss_delta: match (total_rss_before, total_rss_after) {
            (Some(before), Some(after)) => Some(after as i64 - before as i64),
            _ => None,
        },
    });

    Ok(CaseExecution {
        columns: highs.get_num_col(),
        rows: highs.get_num_row(),
        model_status: model_status_label(highs.get_model_status()),
        objective_value: highs.get_objective_value(),
        stages,
    })
}

fn case_records(
    run_id: &str,
    case_name: &str,
    repetition: u32,
    execution: &CaseExecution,
) -> Vec<BenchRecord> {
    execution
        .stages
        .iter()
        .map(|stage| BenchRecord {
            schema_version: SCHEMA_VERSION,
            run_id: run_id.to_string(),
            case_name: case_name.to_string(),
            repetition,
            columns: execution.columns,
            rows: execution.rows,
            model_status: execution.model_status.to_string(),
            objective_value: execution.objective_value,
            stage: stage.stage.clone(),
            duration_ms: stage.elapsed_ms(),
            rss_after_bytes: stage.rss_bytes,
            rss_delta_bytes: stage.rss_delta,
        })
        .collect()
}

fn render_output(
    format: OutputFormat,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            print_summary_table(&summarize_records(records));
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
            Ok(())
        }
        OutputFormat::Ndjson => {
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
            Ok(())
        }
    }
}

fn render_compare_output(
    format: OutputFormat,
    rows: &[CompareRow],
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            print_compare_table(rows);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
            Ok(())
        }
        OutputFormat::Ndjson => {
            for row in rows {
                println!("{}", serde_json::to_string(row)?);
            }
            Ok(())
        }
    }
}

fn summarize_records(records: &[BenchRecord]) -> Vec<SummaryRow> {
    #[derive(Default)]
    struct Acc {
        samples: usize,
        duration_sum: f64,
        duration_max: f64,
        rss_delta_sum: f64,
        rss_delta_count: usize,
        rss_after_max: Option<u64>,
    }

    let mut groups: BTreeMap<SummaryKey, Acc> = BTreeMap::new();
    for record in records {
        let key = SummaryKey {
            case_name: record.case_name.clone(),
            stage: record.stage.clone(),
        };
        let entry = groups.entry(key).or_default();
        entry.samples += 1;
        entry.duration_sum += record.duration_ms;
        entry.duration_max = entry.duration_max.max(record.duration_ms);
        if let Some(delta) = record.rss_delta_bytes {
            entry.rss_delta_sum += delta as f64;
            entry.rss_delta_count += 1;
        }
        entry.rss_after_max = entry.rss_after_max.max(record.rss_after_bytes);
    }

    groups
        .into_iter()
        .map(|(key, acc)| SummaryRow {
            case_name: key.case_name,
            stage: key.stage,
            samples: acc.samples,
            mean_duration_ms: if acc.samples == 0 {
                0.0
            } else {
                acc.duration_sum / acc.samples as f64
            },
            max_duration_ms: acc.duration_max,
            mean_rss_delta_bytes: (acc.rss_delta_count > 0)
                .then(|| acc.rss_delta_sum / acc.rss_delta_count as f64),
            max_rss_after_bytes: acc.rss_after_max,
        })
        .collect()
}

fn build_comparison_rows(
    baseline: &[SummaryRow],
    candidate: &[SummaryRow],
    stage_filter: &str,
) -> Vec<CompareRow> {
    let baseline_map: BTreeMap<&str, &SummaryRow> = baseline
        .iter()
        .filter(|row| row.stage == stage_filter)
        .map(|row| (row.case_name.as_str(), row))
        .collect();

    candidate
        .iter()
        .filter(|row| row.stage == stage_filter)
        .filter_map(|row| {
            let base = baseline_map.get(row.case_name.as_str())?;
            Some(CompareRow {
                case_name: row.case_name.clone(),
                stage: row.stage.clone(),
                baseline_mean_duration_ms: base.mean_duration_ms,
                candidate_mean_duration_ms: row.mean_duration_ms,
                duration_change_pct: percent_change(base.mean_duration_ms, row.mean_duration_ms),
            })
        })
        .collect()
}

fn has_regressions(rows: &[CompareRow], duration_threshold_pct: Option<f64>) -> bool {
    rows.iter().any(|row| {
        duration_threshold_pct
            .is_some_and(|threshold| row.duration_change_pct.is_some_and(|pct| pct > threshold))
    })
}

fn percent_change(baseline: f64, candidate: f64) -> Option<f64> {
    if baseline.abs() <= f64::EPSILON {
        return None;
    }
    Some(((candidate - baseline) / baseline.abs()) * 100.0)
}

fn print_summary_table(rows: &[SummaryRow]) {
    println!(
        "{:<16} {:<8} {:>7} {:>12} {:>12} {:>14} {:>14}",
        "case", "stage", "samples", "mean_ms", "max_ms", "mean_rss_mb", "max_rss_mb"
    );
    for row in rows {
        println!(
            "{:<16} {:<8} {:>7} {:>12.3} {:>12.3} {:>14} {:>14}",
            row.case_name,
            row.stage,
            row.samples,
            row.mean_duration_ms,
            row.max_duration_ms,
            format_option_mb(row.mean_rss_delta_bytes),
            format_option_mb(row.max_rss_after_bytes.map(|bytes| bytes as f64)),
        );
    }
}

fn print_compare_table(rows: &[CompareRow]) {
    println!(
        "{:<16} {:<8} {:>12} {:>12} {:>10}",
        "case", "stage", "base_ms", "cand_ms", "dur_%"
    );
    for row in rows {
        println!(
            "{:<16} {:<8} {:>12.3} {:>12.3} {:>10}",
            row.case_name,
            row.stage,
            row.baseline_mean_duration_ms,
            row.candidate_mean_duration_ms,
            row.duration_change_pct
                .map_or_else(|| "-".to_string(), |pct| format!("{:.2}", pct)),
        );
    }
}

fn format_option_mb(value: Option<f64>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |bytes| format!("{:.3}", bytes / (1024.0 * 1024.0)),
    )
}

fn write_records_jsonl(
    path: &Path,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn load_records_jsonl(path: &Path) -> Result<Vec<BenchRecord>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str::<BenchRecord>(&line)?);
    }
    Ok(records)
}

fn build_run_id() -> Result<String, Box<dyn std::error::Error>> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| std::io::Error::other(err.to_string()))?
        .as_millis();
    Ok(format!("bench_{}", millis))
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}
