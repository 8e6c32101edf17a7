// sortty: Step-Through Sorting Algorithm Visualizer

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sortty::array::Value;
use sortty::config::{self, Config};
use sortty::session::Session;
use sortty::sorting::validation::{self, DEFAULT_BUDGET, DEFAULT_SIZES};
use sortty::ui::App;

#[derive(Parser, Debug)]
#[command(author, version, about = "Step through sorting algorithms in the terminal")]
struct Args {
    /// Algorithm to start with (e.g. "Quick Sort")
    #[arg(long, default_value = "Bubble Sort")]
    algorithm: String,

    /// Number of values to shuffle
    #[arg(long, default_value_t = config::DEFAULT_SIZE)]
    size: usize,

    /// Playback delay between frames in milliseconds
    #[arg(long, default_value_t = 10)]
    delay: u64,

    /// Explicit initial values, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Option<Vec<Value>>,

    /// Seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Memory budget for the snapshot log
    #[arg(long, default_value_t = config::DEFAULT_SNAPSHOT_LIMIT_MB)]
    snapshot_limit_mb: usize,

    /// Validate every algorithm headlessly and exit
    #[arg(long)]
    validate: bool,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            algorithm: self.algorithm.clone(),
            size: self.size,
            delay: Duration::from_millis(self.delay),
            initial_values: self.values.clone(),
            seed: self.seed,
            snapshot_limit: self.snapshot_limit_mb.saturating_mul(1024 * 1024),
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    if args.validate {
        let reports = validation::validate_all(&DEFAULT_SIZES, DEFAULT_BUDGET, args.seed);
        let failures = reports.iter().filter(|r| !r.passed()).count();
        for report in &reports {
            println!("{}", report);
        }
        println!();
        println!("{} checks, {} failed", reports.len(), failures);
        if failures > 0 {
            std::process::exit(1);
        }
        return Ok(());
    }

    let config = args.config();
    let session = match Session::new(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Available algorithms:");
            for algorithm in sortty::sorting::catalog() {
                eprintln!("  {}", algorithm.name);
            }
            std::process::exit(1);
        }
    };
    info!(algorithm = %config.algorithm, size = session.size(), "starting visualizer");

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
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
