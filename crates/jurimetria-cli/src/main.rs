mod display;
mod pipeline;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use jurimetria_analysis::Analyzer;
use jurimetria_core::{CaseNumber, CaseRecord, Extraction};
use jurimetria_portal::{ChromiumPortal, PageSnapshot, PortalConfig, extract_case, parse_snapshot};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Cases searched when `run` is given none.
const DEFAULT_CASES: &[&str] = &["1001535-69.2025.8.26.0260"];

#[derive(Parser)]
#[command(
    name = "jurimetria",
    version,
    about = "Jurimetric study of TJSP judicial recovery cases: e-SAJ extraction and research-question classification"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search cases on e-SAJ, classify them, and write the report and summary
    Run(RunArgs),
    /// Search one case and save a screenshot of the result page
    Probe(ProbeArgs),
    /// Parse a saved case page offline and print its card
    Parse(ParseArgs),
    /// Print cases from a Parquet report
    Show(ShowArgs),
}

#[derive(Args)]
struct BrowserArgs {
    /// Show the browser window
    #[arg(long)]
    headed: bool,

    #[arg(long, default_value_t = 15_000)]
    element_timeout_ms: u64,

    #[arg(long, default_value_t = 30_000)]
    page_timeout_ms: u64,
}

impl BrowserArgs {
    fn config(&self) -> PortalConfig {
        PortalConfig {
            headless: !self.headed,
            element_timeout_ms: self.element_timeout_ms,
            page_timeout_ms: self.page_timeout_ms,
            ..PortalConfig::default()
        }
    }
}

#[derive(Args)]
struct RunArgs {
    /// Case numbers, e.g. 1001535-69.2025.8.26.0260
    cases: Vec<String>,

    #[arg(long, env = "JURIMETRIA_OUTPUT_DIR", default_value = "resultados")]
    output_dir: PathBuf,

    /// Pause between cases, in seconds
    #[arg(long, default_value_t = 3.0)]
    delay_secs: f64,

    /// Report file name without extension [default: relatorio_jurimetria_<timestamp>]
    #[arg(long)]
    report_name: Option<String>,

    #[command(flatten)]
    browser: BrowserArgs,
}

#[derive(Args)]
struct ProbeArgs {
    case: String,

    #[arg(long, default_value = ".")]
    screenshot_dir: PathBuf,

    #[command(flatten)]
    browser: BrowserArgs,
}

#[derive(Args)]
struct ParseArgs {
    /// Saved HTML of an e-SAJ case page
    html: PathBuf,

    /// Case number to report [default: file stem]
    #[arg(long)]
    case: Option<String>,
}

#[derive(Args)]
struct ShowArgs {
    parquet: PathBuf,

    /// Only this case number
    case: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    info!("jurimetria v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => run(args).await,
        Command::Probe(args) => probe(args).await,
        Command::Parse(args) => parse(args),
        Command::Show(args) => show(args),
    }
}

async fn run(args: RunArgs) -> anyhow::Result<()> {
    let cases: Vec<CaseNumber> = if args.cases.is_empty() {
        DEFAULT_CASES.iter().copied().map(CaseNumber::from).collect()
    } else {
        args.cases.iter().map(|c| CaseNumber::new(c.as_str())).collect()
    };
    if !args.delay_secs.is_finite() || args.delay_secs < 0.0 {
        bail!("--delay-secs must be a non-negative number");
    }
    let cooldown = Duration::from_secs_f64(args.delay_secs);

    info!(cases = cases.len(), "starting batch");
    let records = match ChromiumPortal::launch(args.browser.config()).await {
        Ok(mut portal) => {
            let records =
                pipeline::run_batch(&mut portal, &cases, &Analyzer::new(), cooldown).await;
            if let Err(e) = portal.close().await {
                warn!(error = %e, "closing browser");
            }
            records
        }
        Err(e) => {
            warn!(error = %e, "browser did not start, every case fails");
            pipeline::fail_all(&cases, &e.to_string())
        }
    };

    let stem = args
        .report_name
        .unwrap_or_else(|| jurimetria_store::default_report_name(chrono::Local::now().naive_local()));
    let batch = jurimetria_store::report_batch(&records).context("building report")?;
    let paths = jurimetria_store::write_report(&batch, &args.output_dir, &stem)
        .with_context(|| format!("writing report to {}", args.output_dir.display()))?;

    let summary = jurimetria_store::summarize(&records);
    let summary_path = jurimetria_store::write_summary(&summary, &args.output_dir)
        .context("writing summary")?;

    println!();
    display::print_summary(&summary);
    if let Some(first) = records.first()
        && first.is_success()
    {
        println!();
        display::print_case_card(&batch, 0);
    }
    println!("Relatório: {} | {}", paths.csv.display(), paths.parquet.display());
    println!("Resumo: {}", summary_path.display());
    Ok(())
}

async fn probe(args: ProbeArgs) -> anyhow::Result<()> {
    let number = CaseNumber::new(args.case);
    let mut portal = ChromiumPortal::launch(args.browser.config())
        .await
        .context("launching browser")?;

    let extraction = extract_case(&mut portal, &number).await;
    std::fs::create_dir_all(&args.screenshot_dir)
        .with_context(|| format!("creating {}", args.screenshot_dir.display()))?;
    let shot = args
        .screenshot_dir
        .join(pipeline::screenshot_name(&number, &extraction));
    if let Err(e) = portal.screenshot(&shot).await {
        warn!(error = %e, "screenshot failed");
    }
    if let Err(e) = portal.close().await {
        warn!(error = %e, "closing browser");
    }

    print_record(record(number, extraction))
}

fn parse(args: ParseArgs) -> anyhow::Result<()> {
    let html = std::fs::read_to_string(&args.html)
        .with_context(|| format!("reading {}", args.html.display()))?;
    let number = CaseNumber::new(args.case.unwrap_or_else(|| file_stem(&args.html)));
    let extraction = parse_snapshot(&PageSnapshot::from_html(html)).context("parsing page")?;
    print_record(record(number, extraction))
}

fn show(args: ShowArgs) -> anyhow::Result<()> {
    let batches = jurimetria_store::read_parquet(&args.parquet)
        .with_context(|| format!("reading {}", args.parquet.display()))?;

    let mut shown = 0usize;
    for batch in &batches {
        for row in 0..batch.num_rows() {
            let number = display::cell(batch, "Processo", row);
            if args.case.as_deref().is_some_and(|c| number != Some(c)) {
                continue;
            }
            display::print_case_card(batch, row);
            shown += 1;
        }
    }

    match (&args.case, shown) {
        (Some(case), 0) => bail!("case {case} not in {}", args.parquet.display()),
        _ => Ok(()),
    }
}

fn record(number: CaseNumber, extraction: Extraction) -> CaseRecord {
    let analyzer = Analyzer::new();
    CaseRecord::from_extraction(number, extraction, |file| analyzer.analyze(file))
}

fn print_record(record: CaseRecord) -> anyhow::Result<()> {
    let batch = jurimetria_store::report_batch(std::slice::from_ref(&record))?;
    display::print_case_card(&batch, 0);
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "offline".to_string())
}
