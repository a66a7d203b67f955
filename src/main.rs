// declcheck: lexical, syntax and semantic checks for typed declarations

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use declcheck::pipeline::fixture::run_dir;
use declcheck::pipeline::{analyze, Phase};
use declcheck::ui::App;

#[derive(Parser)]
#[command(name = "declcheck")]
#[command(about = "Lexical, syntax and semantic checks for `type name = value;` declarations")]
#[command(version)]
struct Cli {
    /// Log every phase at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer on a source file
    View {
        /// Source file to analyze
        file: PathBuf,
    },
    /// Run all phases on a source file and print the results
    Check {
        /// Source file to analyze
        file: PathBuf,
    },
    /// Run every `.decl` fixture in a directory against its expected outcomes
    Fixtures {
        /// Directory holding the fixtures
        #[arg(default_value = "fixtures")]
        dir: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The viewer owns the terminal; only log there when explicitly asked to.
    let default_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if matches!(cli.command, Commands::View { .. }) {
        log::LevelFilter::Off
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let passed = match cli.command {
        Commands::View { file } => {
            view(file)?;
            true
        }
        Commands::Check { file } => check(&file)?,
        Commands::Fixtures { dir } => fixtures(&dir)?,
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}

fn read_source(file: &Path) -> Result<String, Box<dyn std::error::Error>> {
    fs::read_to_string(file).map_err(|e| format!("cannot read '{}': {}", file.display(), e).into())
}

fn view(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_source(&file)?;
    log::info!("opening viewer on {}", file.display());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(file, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn check(file: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let source = read_source(file)?;
    let analysis = analyze(&source);

    for phase in Phase::ALL {
        println!("{:<9} {}", format!("{}:", phase), analysis.outcome(phase));
        match phase {
            Phase::Lexical => {
                if let Some(tokens) = &analysis.tokens {
                    println!("  {} token(s)", tokens.len());
                }
            }
            Phase::Syntax => {
                if let Some(ast) = &analysis.ast {
                    for line in ast.view().to_string().lines() {
                        println!("  {}", line);
                    }
                }
            }
            Phase::Semantic => {
                for finding in analysis.findings.iter().flatten() {
                    println!("  {}", finding);
                }
            }
        }
    }

    Ok(analysis.is_clean())
}

fn fixtures(dir: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let reports = run_dir(dir)?;
    let failed = reports.iter().filter(|r| !r.passed()).count();

    for report in &reports {
        println!("{}", report);
    }
    println!(
        "\n{} fixture(s), {} passed, {} failed",
        reports.len(),
        reports.len() - failed,
        failed
    );

    Ok(failed == 0)
}
