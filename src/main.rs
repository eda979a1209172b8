mod input;

use aso_health::category::format_count;
use aso_health::{
    AsoConfig, AsoInputs, AsoScorer, CategoryFitAnalyzer, CategoryFitInput, FunnelAnalyzer,
    FunnelInput, ListingValidator,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::input::{read_json, ListingRequest};

#[derive(Parser)]
#[command(name = "aso-health", about = "App store listing health scoring")]
struct Cli {
    /// Config file (defaults to ASO_CONFIG_PATH or config/aso.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Overall health score from metadata, ratings, keyword and conversion metrics
    Score(ReportArgs),
    /// Conversion funnel stages and the biggest bottleneck
    Funnel(FunnelArgs),
    /// Category competitiveness and strategy
    Category(ReportArgs),
    /// Character limits and keyword density for listing text
    Listing(ReportArgs),
    /// Write the default configuration as TOML
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    /// JSON input file; stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct FunnelArgs {
    #[command(flatten)]
    report: ReportArgs,
    /// Category, density or competition tier overriding the input's selector
    #[arg(long)]
    tier: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/aso.toml")]
    path: PathBuf,
}

fn main() {
    load_dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Command::InitConfig(args) = &cli.command {
        return init_config(&args.path);
    }

    let (config, _) = AsoConfig::load(cli.config).map_err(|err| err.to_string())?;

    match cli.command {
        Command::Score(args) => run_score(&config, &args),
        Command::Funnel(args) => run_funnel(&config, &args),
        Command::Category(args) => run_category(&config, &args),
        Command::Listing(args) => run_listing(&config, &args),
        Command::InitConfig(args) => init_config(&args.path),
    }
}

fn run_score(config: &AsoConfig, args: &ReportArgs) -> Result<(), String> {
    let inputs: AsoInputs = read_json(args.input.as_deref())?;
    let scorer = AsoScorer::new(config).map_err(|err| err.to_string())?;
    let report = scorer.calculate_overall_score(&inputs);

    if args.json {
        return print_json(&report);
    }

    println!("ASO score: {:.1} ({})", report.overall_score, report.health_summary);
    for (dimension, entry) in report.score_breakdown.entries() {
        println!(
            "  {}: {:.1} (weight {}, contributes {:.1})",
            dimension.label(),
            entry.score,
            entry.weight,
            entry.weighted_contribution
        );
    }

    println!("\nStrengths:");
    for strength in &report.strengths {
        println!("- {}", strength);
    }
    println!("\nWeaknesses:");
    for weakness in &report.weaknesses {
        println!("- {}", weakness);
    }

    if !report.priority_actions.is_empty() {
        println!("\nPriority actions:");
        for action in &report.priority_actions {
            println!("- [{}] {}: {}", action.priority.label(), action.action, action.details);
        }
    }

    Ok(())
}

fn run_funnel(config: &AsoConfig, args: &FunnelArgs) -> Result<(), String> {
    let mut input: FunnelInput = read_json(args.report.input.as_deref())?;
    if let Some(tier) = args.tier.as_ref() {
        input.competition_tier = tier.clone();
    }

    let analyzer = FunnelAnalyzer::new(config.funnel.clone(), config.categories.clone())
        .map_err(|err| err.to_string())?;
    let report = analyzer.analyze(&input);

    if args.report.json {
        return print_json(&report);
    }

    let stages = &report.stages;
    println!("Competition tier: {}", report.competition_tier.label());
    println!(
        "Impressions -> page views: {} ({})",
        stages.impressions_to_page_views.rate_pct,
        stages.impressions_to_page_views.assessment.label()
    );
    println!(
        "Page views -> installs: {} ({})",
        stages.page_views_to_installs.rate_pct,
        stages.page_views_to_installs.assessment.label()
    );
    println!(
        "Overall conversion: {} ({})",
        stages.overall_conversion.rate_pct,
        stages.overall_conversion.assessment.label()
    );
    println!(
        "Day-1 retention: {} ({})",
        stages.retention.day1_rate_pct,
        stages.retention.assessment.label()
    );
    println!("\n{}", report.summary);
    for fix in &report.biggest_bottleneck.fix_priority {
        println!("- {}", fix);
    }

    Ok(())
}

fn run_category(config: &AsoConfig, args: &ReportArgs) -> Result<(), String> {
    let input: CategoryFitInput = read_json(args.input.as_deref())?;
    let analyzer =
        CategoryFitAnalyzer::new(config.categories.clone()).map_err(|err| err.to_string())?;
    let report = analyzer.analyze(&input);

    if args.json {
        return print_json(&report);
    }

    let current = &report.current_category;
    println!(
        "{}: {} ratings vs {} avg top 10 in a {} density category ({:?})",
        current.name,
        format_count(current.your_ratings),
        format_count(current.avg_top10_ratings),
        current.density.label(),
        current.competitiveness
    );
    for alternative in &report.alternatives {
        println!(
            "  {}: {} avg top 10{}",
            alternative.category,
            format_count(alternative.avg_top10_ratings),
            if alternative.easier_than_current {
                " (easier)"
            } else {
                ""
            }
        );
    }
    println!("\n{}", report.recommendation.message);
    println!("{}", report.secondary_category.rationale);

    Ok(())
}

fn run_listing(config: &AsoConfig, args: &ReportArgs) -> Result<(), String> {
    let request: ListingRequest = read_json(args.input.as_deref())?;
    let platform = request
        .platform
        .as_deref()
        .unwrap_or(config.listing.platform.as_str());
    let validator = ListingValidator::new(platform, config.benchmarks.keyword_density)
        .map_err(|err| err.to_string())?;

    let limits = validator.validate_character_limits(&request.fields);
    let density = request
        .text
        .as_deref()
        .map(|text| validator.analyze_keyword_density(text, &request.keywords));

    if args.json {
        #[derive(Serialize)]
        struct ListingReport<'a> {
            platform: &'a str,
            limits: &'a aso_health::listing::LimitValidation,
            density: Option<&'a aso_health::listing::DensityAnalysis>,
        }
        return print_json(&ListingReport {
            platform: validator.platform().label(),
            limits: &limits,
            density: density.as_ref(),
        });
    }

    println!(
        "Platform: {} ({})",
        validator.platform(),
        if limits.is_valid { "within limits" } else { "over limits" }
    );
    for error in &limits.errors {
        println!("error: {}", error);
    }
    for warning in &limits.warnings {
        println!("warning: {}", warning);
    }
    if let Some(density) = density {
        println!(
            "\nKeyword density: {:.2}% over {} words - {}",
            density.overall_keyword_density,
            density.total_words,
            density.assessment_message
        );
        for recommendation in &density.recommendations {
            println!("- {}", recommendation);
        }
    }

    Ok(())
}

fn init_config(path: &Path) -> Result<(), String> {
    AsoConfig::default()
        .write(path)
        .map_err(|err| err.to_string())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize report: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
