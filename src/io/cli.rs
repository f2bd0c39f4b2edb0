//! Command-line interface for solving map files and generating test maps

use crate::algorithm::executor::{BuildOrderSolver, SolverConfig, Strategy};
use crate::io::configuration::{
    AREA_QUEUE_CAPACITY, DEFAULT_FILL_RATIO, DEFAULT_SEED, DEFAULT_THREADS, MAP_EXTENSION,
    OUTPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::mapfile::{format_map, read_map, write_commands};
use crate::io::progress::{ProgressManager, Stage};
use crate::simulation::generate::{MapGenerator, MapPattern};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "unbuild")]
#[command(
    author,
    version,
    about = "Reconstruct the build order behind a final height map"
)]
/// Command-line arguments shared by all subcommands
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output and non-error logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available operations
#[derive(Subcommand)]
pub enum Commands {
    /// Reconstruct build orders for a map file or a directory of maps
    Solve(SolveArgs),
    /// Print a generated, solvable map
    Generate(GenerateArgs),
}

/// Arguments of the `solve` subcommand
#[derive(Args, Clone, Debug)]
pub struct SolveArgs {
    /// Input map file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Threads used for independent areas
    #[arg(short, long, default_value_t = DEFAULT_THREADS)]
    pub threads: usize,

    /// Solve independent areas on the main thread
    #[arg(short, long)]
    pub sequential: bool,

    /// Skip replaying the result against the input
    #[arg(long)]
    pub no_verify: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl SolveArgs {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Solver configuration selected by the flags
    pub const fn solver_config(&self) -> SolverConfig {
        let strategy = if self.sequential {
            Strategy::Sequential
        } else {
            Strategy::Parallel {
                threads: self.threads,
            }
        };
        SolverConfig {
            strategy,
            queue_capacity: AREA_QUEUE_CAPACITY,
            verify: !self.no_verify,
        }
    }
}

/// Arguments of the `generate` subcommand
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Placement order used to build the map
    #[arg(value_enum)]
    pub pattern: MapPattern,

    /// Number of rows
    pub rows: usize,

    /// Number of columns
    pub cols: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Fraction of cells that receive a building
    #[arg(short, long, default_value_t = DEFAULT_FILL_RATIO)]
    pub fill: f64,

    /// Write the map to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Run the parsed command line
///
/// # Errors
///
/// Returns the first error raised by the selected operation
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Solve(args) => {
            let mut processor = FileProcessor::new(args, !cli.quiet);
            processor.process().map(|_| ())
        }
        Commands::Generate(args) => generate(&args),
    }
}

/// Generate a map and write it to stdout or the requested file
///
/// # Errors
///
/// Returns an error if the parameters are invalid or writing fails
pub fn generate(args: &GenerateArgs) -> Result<()> {
    let generated = MapGenerator::new(args.seed).generate(
        args.pattern,
        args.rows,
        args.cols,
        args.fill,
    )?;
    let text = format_map(&generated.map);
    info!(
        rows = args.rows,
        cols = args.cols,
        buildings = generated.commands.len(),
        "generated map"
    );

    match &args.output {
        Some(path) => std::fs::write(path, text).with_path(path, "write"),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Orchestrates batch solving of map files with progress tracking
pub struct FileProcessor {
    args: SolveArgs,
    solver: BuildOrderSolver,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor, optionally drawing progress bars
    pub fn new(args: SolveArgs, show_progress: bool) -> Self {
        let progress_manager = show_progress.then(ProgressManager::new);
        let solver = BuildOrderSolver::new(args.solver_config());

        Self {
            args,
            solver,
            progress_manager,
        }
    }

    /// Solve every selected map and write its command list
    ///
    /// Returns the paths of the written outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, solving, or writing fails
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        self.solver.config().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut written = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            written.push(self.process_file(file, index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.args.target;
        if target.is_file() {
            if !is_map_file(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("file must have the .{MAP_EXTENSION} extension"),
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                Vec::new()
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory")?.path();
                if is_map_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a map file or a directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.args.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path);
        if output_path.exists() {
            info!(path = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<PathBuf> {
        let start_time = Instant::now();
        let output_path = output_path(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
            pm.enter_stage(index, Stage::Read);
        }
        let map = read_map(input_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.enter_stage(index, Stage::Solve);
        }
        let solution = self.solver.solve(&map)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.enter_stage(index, Stage::Write);
        }
        write_commands(&output_path, &solution.commands)?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            commands = solution.commands.len(),
            areas = solution.stats.areas,
            guesses = solution.stats.guesses,
            elapsed_ms = start_time.elapsed().as_millis(),
            "solved map"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(output_path)
    }
}

fn is_map_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(MAP_EXTENSION)
}

/// Output location for a map: `<stem>_order.txt` beside the input
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        OUTPUT_EXTENSION
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
