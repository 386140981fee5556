use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use labor_app::config::{AppConfig, ConfigOverrides};
use labor_app::export::write_history_csv;
use labor_app::install::{InstallError, InstallFlow, InstallOutcome, ScriptedPrompt};
use labor_app::manifest::WebManifest;
use labor_app::state::AppState;
use labor_app::svg::{ChartView, render_svg};
use labor_app::workflow::{SubmitError, Submission, Workflow};
use labor_app::{build_registry, logging};
use labor_core::advice::ScriptedAdvisor;
use labor_core::format::{format_days, format_won};
use labor_core::history::display_date;
use labor_core::store::Preferences;
use labor_core::{CalculationResult, CalculatorKind, HistoryEntry, KeyValueStore};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Annual leave, severance pay and overtime pay calculators.
///
/// Inputs, history and the dark-mode flag persist between runs in the
/// configured store.
#[derive(Debug, Parser)]
#[command(name = "labor", version)]
struct Cli {
    /// TOML file with defaults for the options below.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend (`file` or `memory`).
    #[arg(long = "store", global = true)]
    backend: Option<String>,

    /// Directory for the `file` backend. Defaults to `$LABOR_DATA_DIR`, then
    /// `./.labor`.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `labor_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Delay before calculating, in milliseconds.
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Do not add calculations to the history.
    #[arg(long, global = true)]
    no_history: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 연차계산기
    AnnualLeave {
        /// Join date (YYYY-MM-DD).
        #[arg(long)]
        join: Option<String>,
        /// Base date (YYYY-MM-DD); today when empty.
        #[arg(long)]
        base: Option<String>,
        /// Leave days already used.
        #[arg(long)]
        used: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// 퇴직금계산기
    Severance {
        #[arg(long)]
        join: Option<String>,
        /// Leave date (YYYY-MM-DD); today when empty.
        #[arg(long)]
        leave: Option<String>,
        /// Monthly base salary in won.
        #[arg(long)]
        salary: Option<String>,
        /// Annual bonus in won.
        #[arg(long)]
        bonus: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// 야근수당계산기
    Overtime {
        /// Hourly wage in won.
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        overtime: Option<String>,
        #[arg(long)]
        night: Option<String>,
        #[arg(long)]
        holiday: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Past calculations, newest first.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show or change the dark-mode flag.
    DarkMode {
        #[arg(value_enum, default_value = "show")]
        action: DarkModeAction,
    },
    /// Print the web app manifest as JSON.
    Manifest,
    /// Run the install prompt with a scripted answer.
    Install {
        #[arg(value_enum, default_value = "accept")]
        answer: InstallAnswer,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Write both charts to this SVG file.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Print the result, charts and advice as JSON.
    #[arg(long)]
    json: bool,

    /// Reset the saved inputs instead of calculating.
    #[arg(long)]
    clear: bool,
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    List,
    Search {
        /// Matches the calculator label or the date, e.g. `2024. 3.`.
        #[arg(default_value = "")]
        term: String,
        #[arg(long, value_parser = parse_kind)]
        kind: Option<CalculatorKind>,
    },
    Clear,
    Export {
        /// Output file; stdout when omitted.
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DarkModeAction {
    On,
    Off,
    Toggle,
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InstallAnswer {
    Accept,
    Dismiss,
    Fail,
}

fn parse_kind(s: &str) -> Result<CalculatorKind, String> {
    CalculatorKind::parse(s).ok_or_else(|| {
        let known: Vec<_> = CalculatorKind::all().iter().map(|k| k.as_str()).collect();
        format!("unknown calculator '{s}'; expected one of {}", known.join(", "))
    })
}

// ─── helpers ─────────────────────────────────────────────────────────────────

fn set_if_some(
    field: &mut String,
    value: Option<String>,
) {
    if let Some(v) = value {
        *field = v;
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let file = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    Ok(file.apply(ConfigOverrides {
        backend: cli.backend.clone(),
        data_dir: cli.data_dir.clone(),
        log_level: cli.log_level.clone(),
        log_file: cli.log_file.clone(),
        delay_ms: cli.delay_ms,
        no_history: cli.no_history,
    }))
}

fn apply_logging(config: &AppConfig) -> Result<()> {
    if let Some(level) = &config.log.level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &config.log.file {
        logging::enable_file_logging(path)?;
    }
    Ok(())
}

async fn open_state(
    config: &AppConfig,
    today: NaiveDate,
) -> Result<AppState> {
    let store_config = config.store_config();
    debug!(backend = %store_config.backend, "opening store");
    let store: Arc<dyn KeyValueStore> = Arc::from(
        build_registry()
            .create(&store_config)
            .await
            .with_context(|| format!("cannot open '{}' store", store_config.backend))?,
    );
    Ok(AppState::load(Preferences::new(store), today))
}

// ─── output ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SubmissionReport<'a> {
    result: &'a CalculationResult,
    summary: String,
    charts: &'a ChartView,
    advice: &'a str,
}

fn print_result(result: &CalculationResult) {
    println!("[{}]", result.kind().title());
    match result {
        CalculationResult::AnnualLeave(r) => {
            println!("  총 연차      {}", format_days(r.total_entitled_days));
            println!("  사용 연차    {}", format_days(r.used_days));
            println!("  잔여 연차    {}", format_days(r.available_days));
            println!(
                "  근속 기간    {}년 {}개월",
                r.work_period.years, r.work_period.months
            );
        }
        CalculationResult::SeverancePay(r) => {
            println!("  예상 퇴직금  {}", format_won(r.amount));
            println!(
                "  근속 기간    {}년 {}개월 ({}일)",
                r.work_period.years, r.work_period.months, r.work_period.days
            );
            println!("  월평균임금   {}", format_won(r.average_monthly_wage));
            println!(
                "  기본급 기반  {}",
                format_won(r.breakdown.base_salary_component)
            );
            println!("  상여금 기반  {}", format_won(r.breakdown.bonus_component));
        }
        CalculationResult::OvertimePay(r) => {
            println!("  총 수당      {}", format_won(r.total_allowance));
            println!(
                "  연장근로     {} ({}시간)",
                format_won(r.breakdown.overtime),
                r.hours.overtime.normalize()
            );
            println!(
                "  야간근로     {} ({}시간)",
                format_won(r.breakdown.night),
                r.hours.night.normalize()
            );
            println!(
                "  휴일근로     {} ({}시간)",
                format_won(r.breakdown.holiday),
                r.hours.holiday.normalize()
            );
        }
    }
}

fn print_submission(
    submission: &Submission,
    output: &OutputArgs,
    dark: bool,
) -> Result<()> {
    if output.json {
        let report = SubmissionReport {
            result: &submission.result,
            summary: submission.result.summary(),
            charts: &submission.charts,
            advice: submission.advice_text(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_result(&submission.result);
        println!();
        println!("AI 조언: {}", submission.advice_text());
    }

    if let Some(path) = &output.svg {
        write_svg(path, &submission.charts, dark)?;
    }
    Ok(())
}

fn write_svg(
    path: &Path,
    charts: &ChartView,
    dark: bool,
) -> Result<()> {
    std::fs::write(path, render_svg(charts, dark))
        .with_context(|| format!("cannot write SVG to '{}'", path.display()))?;
    info!(path = %path.display(), "charts written");
    Ok(())
}

fn print_entries(entries: &[&HistoryEntry]) {
    if entries.is_empty() {
        println!("계산 기록이 없습니다.");
        return;
    }
    for entry in entries {
        println!(
            "{:>14}  {:<8}  {:<12}  {}",
            entry.id,
            display_date(entry),
            entry.calculator.label(),
            entry.result.summary()
        );
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

async fn run_calculator(
    config: &AppConfig,
    state: &mut AppState,
    kind: CalculatorKind,
    output: &OutputArgs,
    today: NaiveDate,
) -> Result<()> {
    if output.clear {
        state.clear_inputs(kind, today)?;
        println!("{} 입력값을 초기화했습니다.", kind.title());
        return Ok(());
    }

    let workflow = Workflow::new(Arc::new(ScriptedAdvisor::with_delay(
        config.advice_delay(),
    )))
    .with_delay(config.delay_for(kind))
    .with_history(config.record_history);

    match workflow.submit(state, kind, today).await {
        Ok(submission) => print_submission(&submission, output, state.dark_mode()),
        Err(SubmitError::Form(e)) => anyhow::bail!("{}", e.user_message(kind)),
        Err(e) => Err(e.into()),
    }
}

fn run_history(
    state: &mut AppState,
    action: HistoryAction,
) -> Result<()> {
    match action {
        HistoryAction::List => {
            let entries: Vec<&HistoryEntry> = state.history_entries().iter().collect();
            print_entries(&entries);
        }
        HistoryAction::Search { term, kind } => {
            print_entries(&state.history().search(&term, kind));
        }
        HistoryAction::Clear => {
            state.clear_history()?;
            println!("계산 기록을 모두 삭제했습니다.");
        }
        HistoryAction::Export { csv: Some(path) } => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("cannot create '{}'", path.display()))?;
            write_history_csv(file, state.history_entries())?;
            info!(path = %path.display(), rows = state.history_entries().len(), "history exported");
        }
        HistoryAction::Export { csv: None } => {
            write_history_csv(std::io::stdout().lock(), state.history_entries())?;
        }
    }
    Ok(())
}

fn run_dark_mode(
    state: &mut AppState,
    action: DarkModeAction,
) -> Result<()> {
    let enabled = match action {
        DarkModeAction::On => {
            state.set_dark_mode(true)?;
            true
        }
        DarkModeAction::Off => {
            state.set_dark_mode(false)?;
            false
        }
        DarkModeAction::Toggle => state.toggle_dark_mode()?,
        DarkModeAction::Show => state.dark_mode(),
    };
    println!("dark mode: {}", if enabled { "on" } else { "off" });
    Ok(())
}

async fn run_install(answer: InstallAnswer) -> Result<()> {
    let scripted = match answer {
        InstallAnswer::Accept => Ok(InstallOutcome::Accepted),
        InstallAnswer::Dismiss => Ok(InstallOutcome::Dismissed),
        InstallAnswer::Fail => Err(InstallError::PromptFailed(
            "prompt was blocked".to_string(),
        )),
    };

    let mut flow = InstallFlow::new();
    flow.mark_installable(Box::new(ScriptedPrompt(scripted)));
    if let Err(e) = flow.request_install().await {
        eprintln!("PWA 설치 실패: {e}");
    }

    let (title, body) = flow.state().banner();
    println!("{title}\n{body}");
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    apply_logging(&config)?;

    let today = Local::now().date_naive();

    match cli.command {
        Command::Manifest => {
            println!("{}", WebManifest::default_manifest().to_json_pretty()?);
            Ok(())
        }
        Command::Install { answer } => run_install(answer).await,
        Command::AnnualLeave {
            join,
            base,
            used,
            output,
        } => {
            let mut state = open_state(&config, today).await?;
            set_if_some(&mut state.annual_leave.join_date, join);
            set_if_some(&mut state.annual_leave.base_date, base);
            set_if_some(&mut state.annual_leave.used_leave, used);
            run_calculator(&config, &mut state, CalculatorKind::AnnualLeave, &output, today).await
        }
        Command::Severance {
            join,
            leave,
            salary,
            bonus,
            output,
        } => {
            let mut state = open_state(&config, today).await?;
            set_if_some(&mut state.severance.join_date, join);
            set_if_some(&mut state.severance.leave_date, leave);
            set_if_some(&mut state.severance.monthly_salary, salary);
            set_if_some(&mut state.severance.bonus, bonus);
            run_calculator(&config, &mut state, CalculatorKind::SeverancePay, &output, today).await
        }
        Command::Overtime {
            rate,
            overtime,
            night,
            holiday,
            output,
        } => {
            let mut state = open_state(&config, today).await?;
            set_if_some(&mut state.overtime.hourly_rate, rate);
            set_if_some(&mut state.overtime.overtime_hours, overtime);
            set_if_some(&mut state.overtime.night_hours, night);
            set_if_some(&mut state.overtime.holiday_hours, holiday);
            run_calculator(&config, &mut state, CalculatorKind::OvertimePay, &output, today).await
        }
        Command::History { action } => {
            let mut state = open_state(&config, today).await?;
            run_history(&mut state, action)
        }
        Command::DarkMode { action } => {
            let mut state = open_state(&config, today).await?;
            run_dark_mode(&mut state, action)
        }
    }
}
