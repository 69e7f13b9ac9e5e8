use anyhow::{Context, Result};
use clap::Parser;
use project_isolation::config::IsolationConfig;
use project_isolation::hooks::{HookRegistry, mount};
use project_isolation::types::{HookInput, HookOutput};
use std::env;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`EnvFilter` syntax).
const LOG_ENV: &str = "PROJECT_ISOLATION_LOG";

/// Per-project session storage hook.
///
/// Reads one hook event as JSON on stdin and prints the (possibly annotated)
/// context as JSON on stdout.
#[derive(Debug, Parser)]
#[command(name = "project-isolation", version)]
struct Cli {
    /// TOML file with `use_git_root`, `storage_base`, `create_dirs` and
    /// `git_timeout_ms`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding one subdirectory per project.
    #[arg(long, value_name = "PATH")]
    storage_base: Option<PathBuf>,

    /// Use the working directory as the project root even inside a git repo.
    #[arg(long)]
    no_git_root: bool,

    /// Only compute paths; create no directories or files.
    #[arg(long)]
    no_create_dirs: bool,

    /// Bounded wait for each git query.
    #[arg(long, value_name = "MS")]
    git_timeout_ms: Option<u64>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    fn config(&self) -> Result<IsolationConfig> {
        let mut config = match &self.config {
            Some(path) => IsolationConfig::load(path)?,
            None => IsolationConfig::default(),
        };
        if let Some(base) = &self.storage_base {
            config.storage_base = base.clone();
        }
        if self.no_git_root {
            config.use_git_root = false;
        }
        if self.no_create_dirs {
            config.create_dirs = false;
        }
        if let Some(ms) = self.git_timeout_ms {
            config.git_timeout_ms = ms;
        }
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading hook input")?;
    Ok(buffer)
}

fn run(cli: &Cli) -> Result<HookOutput> {
    let input: HookInput =
        serde_json::from_str(&read_stdin()?).context("parsing hook input")?;
    let config = cli.config()?;
    let cwd = match input.cwd {
        Some(cwd) => cwd,
        None => env::current_dir().context("reading current directory")?,
    };

    let mut registry = HookRegistry::new();
    mount(&mut registry, config, cwd);

    let mut context = input.context;
    let action = registry.dispatch(&input.hook_event_name, &mut context)?;
    Ok(HookOutput { action, context })
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = run(&cli).and_then(|output| {
        serde_json::to_string(&output).context("serializing hook output")
    });

    match result {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("project-isolation: {err:#}");
            process::exit(2);
        }
    }
}
