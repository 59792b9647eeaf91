use clap::{Parser, Subcommand};
use pgall::{
    commands::{config, interactive, list, run, ConfigAction},
    GlobalOpts,
};
use pgall_logger as logger;

#[derive(Parser)]
#[command(name = "pgall")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Plugin gallery launcher",
    long_about = "pgall is a CLI tool for discovering and launching local plugins. \
Each plugin is a directory with a plugin.json manifest and install/run lifecycle scripts."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List discovered plugins
    List,
    /// Run a plugin's lifecycle (install stage if present, then run stage)
    Run {
        /// Name of the plugin to run
        name: String,
        /// Skip the OS-support confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show or edit pgall configuration
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    // Keep the launcher alive on Ctrl-C; the interrupt reaches the running
    // plugin's process, whose exit the runner classifies and reports.
    if let Err(e) = ctrlc::set_handler(|| {}) {
        logger::debug(&format!("Failed to install Ctrl-C handler: {}", e));
    }

    match cli.command {
        Some(Commands::List) => {
            // Scan failures are reported but non-fatal; list always exits 0
            if let Err(e) = list::list_plugins(&cli.global) {
                logger::error(&format!("{}", e));
            }
        }
        Some(Commands::Run { name, yes }) => {
            if let Err(e) = run::handle_run(&name, yes, &cli.global) {
                run::report_failure(&e);
                std::process::exit(1);
            }
        }
        Some(Commands::Config { action }) => {
            config::handle_config(action, &cli.global);
        }
        None => {
            if let Err(e) = interactive::run_loop(&cli.global) {
                logger::error(&format!("{}", e));
                std::process::exit(1);
            }
        }
    }
}
