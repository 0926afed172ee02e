use survivor::config::{self, Settings};
use survivor::error::{ConfigError, Error, ReportError};
use survivor::output;
use survivor::processor;
use survivor::runner;
use survivor::session::{Outcome, ReportEvent, Session};
use survivor::sink::ConsoleSink;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "survivor", version, about = "Turn surviving Stryker mutants into diagnostics")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Project root the report's paths are relative to
    #[arg(long, global = true, env = "SURVIVOR_ROOT", default_value = ".")]
    root: PathBuf,
    /// Mutation report, relative to the root
    #[arg(long, global = true, env = "SURVIVOR_REPORT", default_value = config::DEFAULT_REPORT)]
    report: PathBuf,
    /// Mutation-testing config that must exist before `run`
    #[arg(long, global = true, env = "SURVIVOR_MUTATE_CONFIG", default_value = config::DEFAULT_MUTATE_CONFIG)]
    mutate_config: PathBuf,
    /// Command used to launch the mutation runner
    #[arg(long, global = true, env = "SURVIVOR_RUNNER", default_value = config::DEFAULT_RUNNER)]
    runner: String,
    /// Suffix marking test files (repeatable)
    #[arg(long = "test-suffix", global = true, value_delimiter = ',')]
    test_suffixes: Vec<String>,
    /// Log skipped files and mutants to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the report once and print diagnostics for surviving mutants
    Diagnostics {
        /// Output JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// Keep diagnostics in sync with the report until interrupted
    Watch {
        /// Output JSON lines instead of human-readable text
        #[arg(long)]
        json: bool,
        /// Quiet period used to coalesce bursts of report writes, in milliseconds
        #[arg(long, default_value = "200")]
        debounce_ms: u64,
    },
    /// Re-run mutation testing for a single source file
    Run {
        /// Source file to mutate, relative to the current directory
        file: PathBuf,
        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let settings = settings_from(&cli.global);

    let exit_code = match cli.command {
        Commands::Diagnostics { json } => cmd_diagnostics(&settings, json),
        Commands::Watch { json, debounce_ms } => cmd_watch(&settings, json, debounce_ms),
        Commands::Run { file, dry_run } => cmd_run(&settings, file, dry_run),
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "survivor=debug" } else { "survivor=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn settings_from(args: &GlobalArgs) -> Settings {
    let mut settings = Settings {
        root: args.root.clone(),
        report_path: args.report.clone(),
        mutate_config: args.mutate_config.clone(),
        runner: args.runner.clone(),
        ..Settings::default()
    };
    if !args.test_suffixes.is_empty() {
        settings.test_suffixes = args.test_suffixes.clone();
    }
    settings
}

fn exit_code_for(err: &Error) -> i32 {
    match err {
        Error::Config(_) => 2,
        _ => 3,
    }
}

fn report_failure(err: Error) -> i32 {
    output::print_error(&err.to_string());
    exit_code_for(&err)
}

fn cmd_diagnostics(settings: &Settings, json_mode: bool) -> i32 {
    let (root, report_path) = match locate(settings) {
        Ok(paths) => paths,
        Err(e) => return report_failure(e.into()),
    };

    let map = match processor::process_report(&report_path, &root) {
        Ok(map) => map,
        Err(e) => return report_failure(e.into()),
    };

    if json_mode {
        match output::diagnostics_json(&map) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                output::print_error(&format!("Failed to serialize diagnostics: {}", e));
                return 3;
            }
        }
    } else {
        output::print_diagnostics(&map, &root);
    }

    if map.is_empty() { 0 } else { 1 }
}

fn locate(settings: &Settings) -> Result<(PathBuf, PathBuf), ConfigError> {
    let root = settings.resolve_root()?;
    let report_path = settings.existing_report(&root)?;
    Ok((root, report_path))
}

fn cmd_watch(settings: &Settings, json_mode: bool, debounce_ms: u64) -> i32 {
    let (root, report_path) = match locate(settings) {
        Ok(paths) => paths,
        Err(e) => return report_failure(e.into()),
    };

    let mut session = Session::new(&report_path, &root, ConsoleSink::new(&root, json_mode));
    match session.toggle() {
        Ok(_) => output::print_info(&format!("Watching {}", report_path.display())),
        Err(e) => return report_failure(e),
    }

    announce(session.refresh().map(Outcome::Published), json_mode);

    let debounce = Duration::from_millis(debounce_ms);
    loop {
        let Some(event) = session.next_event(Duration::from_secs(3600)) else {
            continue;
        };
        // Reports are usually written in several chunks; let them settle.
        std::thread::sleep(debounce);
        let event = session.coalesce(event);
        if !json_mode {
            match &event {
                ReportEvent::Changed(_) => output::print_info("Report changed. Processing again..."),
                ReportEvent::Created(_) => output::print_info("Report created. Processing..."),
                ReportEvent::Deleted => output::print_warning("Report deleted. Diagnostics cleared."),
            }
        }
        announce(session.dispatch(event), json_mode);
    }
}

fn announce(result: Result<Outcome, ReportError>, json_mode: bool) {
    match result {
        Ok(Outcome::Published(count)) if !json_mode => {
            output::print_success(&format!("Diagnostics created for {} surviving mutants.", count));
        }
        Ok(_) => {}
        Err(e) => output::print_error(&format!("Failed to process report: {}", e)),
    }
}

fn cmd_run(settings: &Settings, file: PathBuf, dry_run: bool) -> i32 {
    let root = match settings.resolve_root() {
        Ok(r) => r,
        Err(e) => return report_failure(e.into()),
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| root.clone());
    let rel_path = runner::relative_to_root(&root, &cwd, &file);
    let command = match runner::prepare(settings, &root, &rel_path) {
        Ok(c) => c,
        Err(e) => return report_failure(e.into()),
    };

    if dry_run {
        println!("{}", command);
        return 0;
    }

    match command.spawn() {
        Ok(status) => status.code().unwrap_or(3),
        Err(e) => report_failure(e),
    }
}
