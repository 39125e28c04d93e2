use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use atar_calc::config::{self, Config};
use atar_calc::scoring::{calculate_with_policy, JurisdictionId, SubjectEntry};
use atar_calc::CalculationError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate a score and list the courses it meets the cutoff for
    Calculate {
        /// Jurisdiction rules to apply (nsw, vic, qld, sa, wa, tas)
        #[arg(short, long)]
        jurisdiction: Option<String>,

        /// Subject and grade as "NAME=GRADE", e.g. "Physics=A" (repeatable)
        #[arg(short, long = "subject", value_parser = parse_subject_arg)]
        subjects: Vec<SubjectEntry>,

        /// YAML file with a list of { subject, grade } entries
        #[arg(long)]
        subjects_file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the subject catalog used for a jurisdiction
    Subjects {
        /// Jurisdiction whose catalog to show
        #[arg(short, long)]
        jurisdiction: Option<String>,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "atar-calc")]
#[command(about = "Estimate an admission score and find matching courses", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/atar-calc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Input problems exit 1; anything the user cannot fix from the command line exits 4.
fn exit_code(err: &CalculationError) -> i32 {
    if err.is_user_recoverable() {
        EXIT_INPUT
    } else {
        EXIT_CONFIG
    }
}

/// Parse "NAME=GRADE". The last '=' separates the grade so names may contain '='.
fn parse_subject_arg(raw: &str) -> Result<SubjectEntry, String> {
    match raw.rsplit_once('=') {
        Some((subject, grade)) if !subject.trim().is_empty() => {
            Ok(SubjectEntry::new(subject.trim(), grade.trim()))
        }
        _ => Err(format!("expected NAME=GRADE, got '{}'", raw)),
    }
}

fn read_subjects_file(path: &Path) -> Result<Vec<SubjectEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read subjects file at {}", path.display()))?;
    serde_saphyr::from_str(&content).with_context(|| {
        format!(
            "Failed to parse subjects: invalid YAML in {}",
            path.display()
        )
    })
}

/// The `--jurisdiction` argument wins over the config file. `None` when neither names one.
fn select_jurisdiction(
    arg: Option<&str>,
    config: &Config,
) -> Result<Option<JurisdictionId>, CalculationError> {
    match arg {
        Some(raw) => raw.parse().map(Some),
        None => Ok(config.jurisdiction),
    }
}

fn resolve_jurisdiction(arg: Option<&str>, config: &Config) -> JurisdictionId {
    match select_jurisdiction(arg, config) {
        Ok(Some(j)) => j,
        Ok(None) => {
            eprintln!("No jurisdiction given. Pass --jurisdiction or set `jurisdiction` in the config file.");
            std::process::exit(EXIT_INPUT);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_code(&e));
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = atar_calc::logging::init(cli.verbose) {
        eprintln!("Logging setup failed: {}", e);
    }

    if let Commands::Init = cli.command {
        let path = cli.config.map(PathBuf::from);
        if let Err(e) = config::init::run_init_wizard(path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let (config, config_path) = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors in {}:", config_path.display());
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let catalogs = config.catalogs();
    let use_colors = atar_calc::output::should_use_colors();

    match cli.command {
        Commands::Calculate {
            jurisdiction,
            mut subjects,
            subjects_file,
            format,
        } => {
            let jurisdiction = resolve_jurisdiction(jurisdiction.as_deref(), &config);

            if let Some(path) = subjects_file {
                match read_subjects_file(&path) {
                    Ok(mut from_file) => {
                        from_file.append(&mut subjects);
                        subjects = from_file;
                    }
                    Err(e) => {
                        eprintln!("Input error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            }

            let base_dir = config::config_base_dir(&config_path);
            let courses = match config.load_all_courses(&base_dir) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            let course_errors = config::validate_courses("courses", &courses);
            if !course_errors.is_empty() {
                eprintln!("Course catalog errors:");
                for error in course_errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }

            debug!(
                %jurisdiction,
                subjects = subjects.len(),
                courses = courses.len(),
                "running calculation"
            );

            let result = match calculate_with_policy(
                jurisdiction,
                &subjects,
                catalogs.for_jurisdiction(jurisdiction),
                &courses,
                config.unknown_subjects,
            ) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(exit_code(&e));
                }
            };

            match format {
                OutputFormat::Table => {
                    println!("{}", atar_calc::output::format_result(&result, use_colors));
                }
                OutputFormat::Tsv => {
                    let tsv = atar_calc::output::format_tsv(&result);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                OutputFormat::Json => match atar_calc::output::format_json(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                },
            }
        }
        Commands::Subjects { jurisdiction } => {
            let jurisdiction = resolve_jurisdiction(jurisdiction.as_deref(), &config);
            println!("{} ({}) subjects, * = anchor", jurisdiction, jurisdiction.name());
            println!(
                "{}",
                atar_calc::output::format_subject_catalog(
                    catalogs.for_jurisdiction(jurisdiction),
                    use_colors
                )
            );
        }
        Commands::Init => unreachable!("handled before config load"),
    }

    std::process::exit(EXIT_SUCCESS);
}
