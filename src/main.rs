// memviz: annotated stack and heap diagrams for paused C programs

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use memviz::config::VisualizerConfig;
use memviz::session::Session;
use memviz::ui::{app::viewport_units, App};

const DEFAULT_LOG_FILE: &str = "memviz.log";

struct Args {
    snapshot: Option<PathBuf>,
    config: Option<PathBuf>,
    log: PathBuf,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} [snapshot.json] [--config <file.toml>] [--log <file>]", program_name);
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/sample.json        # Inspect the bundled sample snapshot",
        program_name
    );
    eprintln!(
        "  {}                          # Start empty",
        program_name
    );
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        snapshot: None,
        config: None,
        log: PathBuf::from(DEFAULT_LOG_FILE),
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or("--config needs a file")?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--log" => {
                let value = args.next().ok_or("--log needs a file")?;
                parsed.log = PathBuf::from(value);
            }
            "-h" | "--help" => return Err(String::new()),
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            path if parsed.snapshot.is_none() => parsed.snapshot = Some(PathBuf::from(path)),
            extra => return Err(format!("Unexpected argument '{}'", extra)),
        }
    }

    Ok(parsed)
}

/// Log to a file; the terminal belongs to the TUI
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,memviz=debug")),
        )
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program_name = std::env::args()
        .next()
        .unwrap_or_else(|| "memviz".to_string());

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("Error: {}", message);
                eprintln!();
            }
            usage(&program_name);
            std::process::exit(1);
        }
    };

    init_logging(&args.log)?;

    let config = match &args.config {
        Some(path) => match VisualizerConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => VisualizerConfig::default(),
    };

    if let Some(path) = &args.snapshot {
        if !path.exists() {
            eprintln!("Error: File '{}' not found", path.display());
            usage(&program_name);
            std::process::exit(1);
        }
    }

    let (columns, rows) = terminal::size()?;
    let (width, height) = viewport_units(columns, rows);
    tracing::info!(width, height, snapshot = ?args.snapshot, "starting memviz");
    let session = Session::new(config, width, height);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, args.snapshot);
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
