//! Plan and next command handlers
//!
//! `plan` schedules every remaining semester in one run. `next` closes a single
//! semester and stores the planning state so the following call can resume it.

use crate::args::PlanArgs;
use degree_planner::config::Config;
use degree_planner::core::catalog::{load_catalog, load_certificates, Catalog, CertificateCatalog};
use degree_planner::core::models::Term;
use degree_planner::core::planner::{
    PlanOutcome, PlanSetup, PlanStatus, Planner, PlannerConfig, PlanningState, RunMode,
};
use degree_planner::core::report::{
    formats::ReportFormat, HtmlReporter, MarkdownReporter, ReportContext, ReportGenerator,
};
use logger::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog and certificates named on the command line
struct Inputs {
    catalog: Catalog,
    certificates: Option<CertificateCatalog>,
}

impl Inputs {
    fn load(args: &PlanArgs) -> Result<Self, String> {
        let catalog = load_catalog(&args.catalog).map_err(|e| {
            error!("Failed to load catalog {}: {e}", args.catalog.display());
            format!("✗ Failed to load {}: {e}", args.catalog.display())
        })?;
        info!(
            "Catalog loaded: {} ({} courses)",
            args.catalog.display(),
            catalog.len()
        );

        let certificates = match &args.certificates {
            Some(path) => {
                let certificates = load_certificates(path).map_err(|e| {
                    error!("Failed to load certificates {}: {e}", path.display());
                    format!("✗ Failed to load {}: {e}", path.display())
                })?;
                info!(
                    "Certificates loaded: {} ({} certificates)",
                    path.display(),
                    certificates.len()
                );
                Some(certificates)
            }
            None => None,
        };

        Ok(Self {
            catalog,
            certificates,
        })
    }

    /// Build a planner for `state`, looking up the certificate it carries
    fn planner<'a>(
        &'a self,
        state: &PlanningState,
        config: &'a PlannerConfig,
    ) -> Result<Planner<'a>, String> {
        let certificate = state
            .certificate
            .as_deref()
            .and_then(|id| self.certificates.as_ref()?.get(id));
        Planner::new(&self.catalog, certificate, config).map_err(|e| format!("✗ {e}"))
    }

    fn certificate_name(&self, state: &PlanningState) -> Option<&str> {
        let id = state.certificate.as_deref()?;
        self.certificates
            .as_ref()
            .and_then(|certificates| certificates.get(id))
            .map(|certificate| certificate.name.as_str())
    }
}

/// Translate command-line flags into first-invocation parameters
fn plan_setup(args: &PlanArgs, config: &Config) -> PlanSetup {
    let mut terms = vec![Term::Fall, Term::Spring];
    if args.summer || config.planner.include_summer {
        terms.push(Term::Summer);
    }

    PlanSetup {
        start_term: args.start_term,
        terms,
        credits_earned: args.credits_earned,
        taken: args.taken.clone(),
        waived: args.waived.clone(),
        upper_division_electives: args
            .upper_electives
            .unwrap_or(config.planner.upper_division_electives),
        certificate: args.certificate.clone(),
    }
}

fn planner_config(args: &PlanArgs, config: &Config, run_mode: RunMode) -> PlannerConfig {
    let mut planner_config = config.planner_config().with_run_mode(run_mode);
    if let Some(min_credits) = args.min_credits {
        planner_config.min_semester_credits = min_credits;
    }
    planner_config
}

fn new_state(inputs: &Inputs, args: &PlanArgs, config: &Config) -> Result<PlanningState, String> {
    PlanningState::new(
        &inputs.catalog,
        inputs.certificates.as_ref(),
        &plan_setup(args, config),
    )
    .map_err(|e| {
        error!("Invalid planning parameters: {e}");
        format!("✗ {e}")
    })
}

fn execute(planner: &Planner, state: &mut PlanningState) -> Result<PlanOutcome, String> {
    planner.run(state).map_err(|e| {
        error!("Planning failed: {e}");
        format!("✗ Planning failed: {e}")
    })
}

fn warn_unresolved(planner: &Planner, verbose: bool) {
    let unresolved = planner.unresolved_prerequisites();
    if verbose && !unresolved.is_empty() {
        println!("⚠ {} prerequisite references are not in the catalog", unresolved.len());
        for (course, missing) in unresolved {
            println!("  {course} requires unknown {missing}");
        }
    }
}

/// Run the `plan` command
pub fn run_plan(
    args: &PlanArgs,
    report: Option<&str>,
    output: Option<&Path>,
    state_out: Option<&Path>,
    config: &Config,
    verbose: bool,
) {
    if let Err(err) = plan_all(args, report, output, state_out, config, verbose) {
        eprintln!("{err}");
    }
}

fn plan_all(
    args: &PlanArgs,
    report: Option<&str>,
    output: Option<&Path>,
    state_out: Option<&Path>,
    config: &Config,
    verbose: bool,
) -> Result<(), String> {
    // Validate the format before doing any planning work
    let format = report
        .map(|f| f.parse::<ReportFormat>().map_err(|e| format!("✗ {e}")))
        .transpose()?;

    let inputs = Inputs::load(args)?;
    let planner_config = planner_config(args, config, RunMode::FullPlan);
    let mut state = new_state(&inputs, args, config)?;
    let planner = inputs.planner(&state, &planner_config)?;
    warn_unresolved(&planner, verbose);

    let outcome = execute(&planner, &mut state)?;

    let ctx = ReportContext::new(
        &inputs.catalog.program,
        &state,
        planner_config.degree_credits,
    )
    .with_certificate(inputs.certificate_name(&state));

    println!("{}", MarkdownReporter::schedule_table(&ctx));
    println!(
        "✓ {} semesters planned, {} of {} credits",
        outcome.semesters.len(),
        state.total_credits_accumulated,
        planner_config.degree_credits
    );
    if verbose {
        for (kind, count) in ctx.filler_counts() {
            println!("  {kind}: {count}");
        }
    }

    if let Some(format) = format {
        let path = report_path(args, output, config, format)?;
        let generator: Box<dyn ReportGenerator> = match format {
            ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
            ReportFormat::Html => Box::new(HtmlReporter::new()),
        };
        generator.generate(&ctx, &path).map_err(|e| {
            error!("Failed to write report {}: {e}", path.display());
            format!("✗ Failed to write report {}: {e}", path.display())
        })?;
        println!("✓ Report generated: {}", path.display());
        info!("Report written to: {}", path.display());
    }

    if let Some(path) = state_out {
        save_state(&state, path)?;
        println!("✓ State saved: {}", path.display());
    }

    Ok(())
}

fn report_path(
    args: &PlanArgs,
    output: Option<&Path>,
    config: &Config,
    format: ReportFormat,
) -> Result<PathBuf, String> {
    if let Some(output) = output {
        return Ok(output.to_path_buf());
    }

    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;

    let stem = args
        .catalog
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("catalog");
    Ok(reports_dir.join(format!("{stem}_plan.{}", format.extension())))
}

/// Run the `next` command
pub fn run_next(args: &PlanArgs, state_file: &Path, config: &Config, verbose: bool) {
    if let Err(err) = plan_next(args, state_file, config, verbose) {
        eprintln!("{err}");
    }
}

fn plan_next(
    args: &PlanArgs,
    state_file: &Path,
    config: &Config,
    verbose: bool,
) -> Result<(), String> {
    let inputs = Inputs::load(args)?;
    let planner_config = planner_config(args, config, RunMode::SingleSemester);
    let state_path = resolve_state_path(state_file, config);

    let mut state = if state_path.exists() {
        let state = load_state(&state_path)?;
        info!(
            "Resuming plan from {} ({} semesters closed)",
            state_path.display(),
            state.schedule.len()
        );
        state
    } else {
        info!("Starting new plan at {}", state_path.display());
        new_state(&inputs, args, config)?
    };

    let planner = inputs.planner(&state, &planner_config)?;
    warn_unresolved(&planner, verbose);

    let outcome = execute(&planner, &mut state)?;

    for record in &outcome.semesters {
        let courses: Vec<&str> = record.course_list.iter().map(|item| item.code()).collect();
        println!(
            "✓ {}: {} ({} credits)",
            ReportContext::semester_label(record),
            courses.join(", "),
            record.credit_total
        );
    }

    match outcome.status {
        PlanStatus::Complete => println!(
            "✓ Plan complete with {} credits",
            state.total_credits_accumulated
        ),
        PlanStatus::SemesterClosed => println!(
            "  {} of {} credits, next term {}",
            state.total_credits_accumulated, planner_config.degree_credits, state.current_term
        ),
    }

    save_state(&state, &state_path)?;
    if verbose {
        println!("✓ State saved: {}", state_path.display());
    }
    Ok(())
}

/// Bare file names are stored under the configured state directory
fn resolve_state_path(state_file: &Path, config: &Config) -> PathBuf {
    let bare = state_file
        .parent()
        .map_or(true, |parent| parent.as_os_str().is_empty());
    if bare && !config.paths.state_dir.is_empty() {
        PathBuf::from(&config.paths.state_dir).join(state_file)
    } else {
        state_file.to_path_buf()
    }
}

fn load_state(path: &Path) -> Result<PlanningState, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("✗ Failed to read state {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| {
        error!("Corrupt planning state {}: {e}", path.display());
        format!("✗ Failed to parse state {}: {e}", path.display())
    })
}

fn save_state(state: &PlanningState, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                format!("✗ Failed to create directory {}: {e}", parent.display())
            })?;
        }
    }
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| format!("✗ Failed to serialize state: {e}"))?;
    fs::write(path, json).map_err(|e| {
        warn!("Could not write state {}: {e}", path.display());
        format!("✗ Failed to write state {}: {e}", path.display())
    })
}
