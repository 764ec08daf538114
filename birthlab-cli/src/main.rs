//! BirthLab CLI - births statistics and two-sample tests from the command line.
//!
//! Commands:
//! - `trend` - total births per year
//! - `countries` - total births of selected countries
//! - `top` - countries with the most births
//! - `codes` - two-letter country codes present in the data
//! - `distribution` - histogram with normal fit and confidence interval
//! - `compare` - two-sample t-test between two countries
//! - `config` - print the effective settings
//!
//! Charts are drawn inline when stdout is a terminal (or `--charts terminal`)
//! and printed as text tables otherwise.

mod charts;
mod report;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use birthlab_core::data::{country_codes, Totals};
use birthlab_core::stats::{parse_alpha_or_default, Alternative, VarianceAssumption};
use birthlab_core::{load_table, ChartOutput, ObservationTable, RenderMode, Settings};
use birthlab_tui::panels::{BoxPlot, HistogramChart, TotalsBarChart, TrendChart};
use birthlab_tui::views::{self, CleanedView, NormalView, TestView};
use birthlab_tui::Theme;

#[derive(Parser)]
#[command(
    name = "birthlab",
    version,
    about = "BirthLab CLI: births statistics and two-sample hypothesis tests"
)]
struct Cli {
    /// Settings file (TOML). Defaults to ./birthlab.toml, then the user config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV data file; overrides `data_path` from the settings.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Chart output: auto, terminal or text.
    #[arg(long, global = true)]
    charts: Option<RenderMode>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Total number of births per year.
    Trend,
    /// Total births of the given countries, largest first.
    Countries {
        /// Two-letter country codes (e.g., DE FR IT).
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Countries with the most births.
    Top {
        /// Number of countries to show.
        #[arg(long, default_value_t = views::TOP_COUNTRIES)]
        n: usize,
    },
    /// List the two-letter country codes in the data.
    Codes,
    /// Distribution of birth counts.
    Distribution {
        /// Trim outliers and log-transform before fitting the normal curve.
        #[arg(long, default_value_t = false)]
        clean: bool,
    },
    /// Two-sample t-test on the birth counts of two countries.
    Compare(CompareArgs),
    /// Print the effective settings as TOML.
    Config,
}

#[derive(Args)]
struct CompareArgs {
    /// First group (country code).
    group1: String,

    /// Second group (country code).
    group2: String,

    /// Alternative hypothesis: two-sided, greater or less. Unknown values fall back to two-sided.
    #[arg(long, default_value = "two-sided")]
    alternative: String,

    /// Significance level. Unparsable values fall back to 0.05.
    #[arg(long)]
    alpha: Option<String>,

    /// Use Welch's unequal-variance test instead of the pooled test.
    #[arg(long, default_value_t = false)]
    welch: bool,

    /// Print the result as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Everything a command needs, resolved once at startup.
struct Session {
    settings: Settings,
    output: ChartOutput,
    theme: Theme,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::discover(cli.config.as_deref()).context("loading settings")?;
    if let Some(data) = cli.data {
        settings.data_path = data;
    }
    if let Some(charts) = cli.charts {
        settings.charts = charts;
    }
    let output = settings.charts.resolve(io::stdout().is_terminal());
    debug!(charts = %settings.charts, ?output, "chart output resolved");

    let ctx = Session {
        settings,
        output,
        theme: Theme::default(),
    };

    if let Commands::Config = cli.command {
        print!("{}", ctx.settings.to_toml()?);
        return Ok(());
    }

    let table = load_table(&ctx.settings.data_path)
        .with_context(|| format!("loading {}", ctx.settings.data_path.display()))?;

    match cli.command {
        Commands::Trend => run_trend(&ctx, &table),
        Commands::Countries { codes } => run_countries(&ctx, &table, &codes),
        Commands::Top { n } => run_top(&ctx, &table, n),
        Commands::Codes => run_codes(&ctx, &table),
        Commands::Distribution { clean } => run_distribution(&ctx, &table, clean),
        Commands::Compare(args) => run_compare(&ctx, &table, &args),
        Commands::Config => Ok(()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_totals(ctx: &Session, title: &str, key_header: &str, totals: &Totals, bars: bool) -> Result<()> {
    match ctx.output {
        ChartOutput::Text => {
            println!("{title}");
            print!("{}", report::totals_table(key_header, totals));
            Ok(())
        }
        ChartOutput::Terminal if bars => {
            charts::draw_inline(TotalsBarChart::new(totals, title, &ctx.theme), charts::chart_height())
        }
        ChartOutput::Terminal => {
            charts::draw_inline(TrendChart::new(totals, title, &ctx.theme), charts::chart_height())
        }
    }
}

fn run_trend(ctx: &Session, table: &ObservationTable) -> Result<()> {
    let totals = views::trend(table, &ctx.settings)?;
    print_totals(ctx, "Total Number of Births Over Years", "Year", &totals, false)
}

fn run_countries(ctx: &Session, table: &ObservationTable, codes: &[String]) -> Result<()> {
    let codes: Vec<String> = codes.iter().map(|c| c.trim().to_uppercase()).collect();
    let totals = views::selected_countries(table, &ctx.settings, &codes)?;
    for code in &codes {
        if !totals.iter().any(|(k, _)| k == code) {
            warn!(code = %code, "no births recorded for country");
            eprintln!("warning: no births recorded for '{code}'");
        }
    }
    if totals.is_empty() {
        anyhow::bail!("none of the selected countries are in the data");
    }
    print_totals(ctx, "Selected Countries by Total Births", "Country", &totals, true)
}

fn run_top(ctx: &Session, table: &ObservationTable, n: usize) -> Result<()> {
    let totals = views::top_countries(table, &ctx.settings, n)?;
    let title = format!("Top {n} Countries by Number of Births");
    print_totals(ctx, &title, "Country", &totals, true)
}

fn run_codes(ctx: &Session, table: &ObservationTable) -> Result<()> {
    for code in country_codes(table, &ctx.settings.columns.group)? {
        println!("{code}");
    }
    Ok(())
}

fn run_distribution(ctx: &Session, table: &ObservationTable, clean: bool) -> Result<()> {
    if clean {
        let view = CleanedView::build(table, &ctx.settings)?;
        print!("{}", report::cleaned_summary(&view));
        let title = "Histogram of Cleaned & Log-Transformed Birth Counts";
        return match ctx.output {
            ChartOutput::Text => {
                println!("\n{title}");
                print!("{}", report::histogram_text(&view.histogram));
                Ok(())
            }
            ChartOutput::Terminal => charts::draw_inline(
                HistogramChart::new(&view.histogram, &view.curve, title, "Log(Number of Births)", &ctx.theme),
                charts::chart_height(),
            ),
        };
    }

    let view = NormalView::build(table, &ctx.settings)?;
    print!("{}", report::normal_summary(&view));
    let title = "Histogram of Birth Counts with Normal Curve";
    match ctx.output {
        ChartOutput::Text => {
            println!("\n{title}");
            print!("{}", report::histogram_text(&view.histogram));
            Ok(())
        }
        ChartOutput::Terminal => {
            let (lo, hi) = view.visible_interval();
            let (x_lo, x_hi) = view.x_bounds;
            let chart = HistogramChart::new(&view.histogram, &view.curve, title, "Number of Births", &ctx.theme)
                .x_bounds(x_lo, x_hi)
                .mean(view.summary.mean)
                .band(lo, hi, format!("{:.0}% CI", view.interval.level * 100.0));
            charts::draw_inline(chart, charts::chart_height())
        }
    }
}

fn run_compare(ctx: &Session, table: &ObservationTable, args: &CompareArgs) -> Result<()> {
    let (group1, group2) = (args.group1.as_str(), args.group2.as_str());
    let alternative = args.alternative.as_str();
    let direction = match alternative.parse::<Alternative>() {
        Ok(alt) => alt,
        Err(_) => {
            eprintln!("warning: invalid test type '{alternative}', defaulting to 'two-sided'");
            Alternative::TwoSided
        }
    };
    let alpha = match args.alpha.as_deref() {
        Some(text) => {
            let parsed = parse_alpha_or_default(text);
            if parsed.defaulted {
                eprintln!("warning: invalid alpha '{text}', defaulting to {}", parsed.value);
            }
            parsed.value
        }
        None => ctx.settings.hypothesis.alpha,
    };

    let mut settings = ctx.settings.clone();
    if args.welch {
        settings.hypothesis.variance = VarianceAssumption::Welch;
    }

    let view = TestView::build(table, &settings, group1, group2, direction, alpha)
        .with_context(|| format!("comparing {group1} and {group2}"))?;

    if args.json {
        println!("{}", view.result.to_json()?);
        return Ok(());
    }

    println!("Hypothesis Test Result:");
    match ctx.output {
        ChartOutput::Text => {
            print!("{}", report::comparison_text(&view));
            Ok(())
        }
        ChartOutput::Terminal => {
            for line in &view.lines {
                println!("{line}");
            }
            let title = format!(
                "Comparison of '{}' Between {} and {} ({})",
                settings.columns.metric,
                group1,
                group2,
                view.caption()
            );
            let plot = BoxPlot::new(
                vec![(group1, &view.box1), (group2, &view.box2)],
                &title,
                &ctx.theme,
            );
            charts::draw_inline(plot, 8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn compare_arguments_parse() {
        let cli = Cli::try_parse_from([
            "birthlab", "--charts", "text", "compare", "DE", "FR", "--alternative", "greater",
            "--alpha", "0.01", "--welch", "--json",
        ])
        .unwrap();
        assert_eq!(cli.charts, Some(RenderMode::Text));
        match cli.command {
            Commands::Compare(args) => {
                assert_eq!((args.group1.as_str(), args.group2.as_str()), ("DE", "FR"));
                assert_eq!(args.alternative, "greater");
                assert_eq!(args.alpha.as_deref(), Some("0.01"));
                assert!(args.welch && args.json);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["birthlab", "top", "--n", "5", "--data", "x.csv"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("x.csv")));
        assert!(matches!(cli.command, Commands::Top { n: 5 }));
    }

    #[test]
    fn top_defaults_to_ten() {
        let cli = Cli::try_parse_from(["birthlab", "top"]).unwrap();
        assert!(matches!(cli.command, Commands::Top { n: 10 }));
    }

    #[test]
    fn bad_chart_mode_is_rejected() {
        assert!(Cli::try_parse_from(["birthlab", "--charts", "gui", "trend"]).is_err());
    }

    #[test]
    fn countries_needs_codes() {
        assert!(Cli::try_parse_from(["birthlab", "countries"]).is_err());
    }
}
