use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use values_lens::config::{self, AppConfig};
use values_lens::engine::{ArchetypeId, Attribution, Baseline, LensEngine, PolicyId};
use values_lens::error::AppError;
use values_lens::import::ResponseImporter;
use values_lens::lenses::{Lens, LensRegistry, LensVersion};
use values_lens::report::{ProfileReport, DEFAULT_TOP_DRIVERS};
use values_lens::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "values-lens",
    about = "Score questionnaire responses into values profiles and explain policy alignment",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available lenses (default command)
    Lenses,
    /// Print a lens questionnaire, for authoring response files
    Questions(QuestionsArgs),
    /// Score a response file and report archetype and policy alignment
    Profile(ProfileArgs),
}

#[derive(Args, Debug)]
struct QuestionsArgs {
    /// Lens to print (defaults to VALUES_LENS_DEFAULT_LENS)
    #[arg(long)]
    lens: Option<LensVersion>,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// CSV (`question_id,response`) or JSON object of answers
    #[arg(long)]
    responses: PathBuf,
    /// Lens to score against (defaults to VALUES_LENS_DEFAULT_LENS)
    #[arg(long)]
    lens: Option<LensVersion>,
    /// Score a single policy instead of the whole catalog
    #[arg(long)]
    policy: Option<String>,
    /// Compare against an archetype instead of the population baseline
    #[arg(long)]
    baseline: Option<String>,
    /// Archetype similarity threshold in [-1, 1]
    #[arg(long, value_parser = parse_threshold)]
    threshold: Option<f64>,
    /// Divergence drivers listed per policy
    #[arg(long, default_value_t = DEFAULT_TOP_DRIVERS)]
    top: usize,
    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let registry = LensRegistry::load()?;
    info!(
        default_lens = %config.scoring.default_lens,
        "values-lens ready"
    );

    match cli.command.unwrap_or(Command::Lenses) {
        Command::Lenses => {
            render_lenses(&registry);
            Ok(())
        }
        Command::Questions(args) => {
            let lens = registry.lens(args.lens.unwrap_or(config.scoring.default_lens));
            render_questions(lens);
            Ok(())
        }
        Command::Profile(args) => run_profile(&registry, &config, args),
    }
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    config::parse_threshold(raw).map_err(|err| err.to_string())
}

fn run_profile(
    registry: &LensRegistry,
    config: &AppConfig,
    args: ProfileArgs,
) -> Result<(), AppError> {
    let ProfileArgs {
        responses,
        lens,
        policy,
        baseline,
        threshold,
        top,
        json,
    } = args;

    let lens = registry.lens(lens.unwrap_or(config.scoring.default_lens));
    let responses = ResponseImporter::from_path(&responses)?;

    let mut engine = LensEngine::new(lens);
    if let Some(threshold) = threshold.or(config.scoring.match_threshold) {
        engine = engine.with_match_threshold(threshold);
    }
    let baseline = match baseline {
        Some(id) => Baseline::Archetype(ArchetypeId::new(id)),
        None => Baseline::Population,
    };
    let policy = policy.map(PolicyId::new);

    let report = ProfileReport::generate(&engine, &responses, &baseline, policy.as_ref(), top)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_profile(&report);
    }
    Ok(())
}

fn render_lenses(registry: &LensRegistry) {
    println!("Available lenses");
    for lens in registry.iter() {
        println!(
            "- {} {}: {} factors, {} questions, {} archetypes, {} policies",
            lens.version(),
            lens.name(),
            lens.factors().len(),
            lens.questions().len(),
            lens.archetypes().len(),
            lens.policies().len()
        );
    }
}

fn render_questions(lens: &Lens) {
    let scale = lens.scale();
    println!("{} ({})", lens.name(), lens.version());
    println!(
        "Answer each statement from {} (strongly disagree) to {} (strongly agree).",
        scale.min(),
        scale.max()
    );
    println!("Response files use the columns question_id,response.\n");
    for question in lens.questions() {
        println!("- {}: {}", question.id, question.prompt);
    }
}

fn render_profile(report: &ProfileReport) {
    println!("Values profile ({} {})", report.lens, report.lens_name);
    println!("Answered {}/{} questions", report.answered, report.questions);

    println!("\nFactors");
    for factor in &report.factors {
        println!(
            "- {}: weight {:+.2} (score {:+.2}) -> {}",
            factor.label, factor.weight, factor.score, factor.leaning_label
        );
    }

    println!(
        "\nArchetype: {} (similarity {:.2}, threshold {:.2})",
        report.archetype.label, report.archetype.similarity, report.archetype.threshold
    );
    for archetype in &report.archetypes {
        let marker = if archetype.selected { "*" } else { "-" };
        println!(
            "{} {} ({}): {:.2}",
            marker, archetype.name, archetype.philosopher, archetype.similarity
        );
    }

    let baseline = match &report.baseline {
        Baseline::Population => "population".to_string(),
        Baseline::Archetype(id) => format!("archetype {id}"),
    };
    println!("\nPolicies (baseline: {baseline})");
    for policy in &report.policies {
        println!(
            "- {}: {:+.1} vs {:+.1} [{}]",
            policy.name, policy.display, policy.baseline_display, policy.consensus_label
        );
        if !policy.fired.is_empty() {
            let fired: Vec<&str> = policy.fired.iter().map(|id| id.as_str()).collect();
            println!("    modifiers: {}", fired.join(", "));
        }
        for driver in &policy.drivers {
            println!(
                "    {}: {:+.1} points ({:+.2} vs {:+.2})",
                driver.label, driver.points, driver.individual_weight, driver.baseline_weight
            );
        }
        if policy.attribution == Attribution::Approximate {
            println!(
                "    attribution {} (residual {:+.3})",
                policy.attribution_label, policy.residual
            );
        }
    }
}
