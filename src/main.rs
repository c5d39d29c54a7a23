// voltc: VoltScript to C++ compiler with a terminal viewer

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, Level};

use voltc::parser::DEFAULT_MAX_NESTING_DEPTH;
use voltc::ui::App;
use voltc::{compile_with, default_output_path, ensure_not_empty, CompileError, CompileOptions};

#[derive(Parser)]
#[command(name = "voltc", about = "Compile VoltScript to C++", version)]
struct Cli {
    /// VoltScript source file
    input: PathBuf,

    /// Output file (defaults to INPUT with a .cpp extension)
    output: Option<PathBuf>,

    /// Print the generated C++ instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Open the interactive viewer instead of writing output
    #[arg(long, conflicts_with_all = ["output", "stdout"])]
    tui: bool,

    /// Maximum nesting depth of blocks and expressions
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    max_depth: usize,

    /// Map a VoltScript type to a C++ type, e.g. --map-type float=float
    #[arg(long = "map-type", value_name = "NAME=TARGET", value_parser = parse_type_mapping)]
    map_types: Vec<(String, String)>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_type_mapping(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, target)) if !name.trim().is_empty() && !target.trim().is_empty() => {
            Ok((name.trim().to_string(), target.trim().to_string()))
        }
        _ => Err(format!("expected NAME=TARGET, got '{arg}'")),
    }
}

fn log_level(verbose: u8, tui: bool) -> Level {
    // The viewer owns the screen; keep stderr quiet
    if tui {
        return Level::WARN;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level(cli.verbose, cli.tui))
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {}", err.label(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CompileError> {
    let options = CompileOptions {
        max_nesting_depth: cli.max_depth,
        type_overrides: cli.map_types.clone(),
    };

    let source = CompileError::read_source(&cli.input)?;
    info!(path = %cli.input.display(), bytes = source.len(), "read source");

    if cli.tui {
        return run_viewer(&cli.input, source, options).map_err(CompileError::Terminal);
    }

    ensure_not_empty(&source)?;
    let cpp = compile_with(&source, &options)?;

    if cli.stdout {
        println!("{cpp}");
        return Ok(());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    fs::write(&output, cpp).map_err(|source| CompileError::Write {
        path: output.clone(),
        source,
    })?;

    println!(
        "Successfully compiled '{}' to '{}'",
        cli.input.display(),
        output.display()
    );
    Ok(())
}

fn run_viewer(path: &Path, source: String, options: CompileOptions) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(path.to_path_buf(), source, options);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
