use clap::{ArgAction, Parser};
use tracing::Level;

#[derive(Debug, Clone)]
pub struct Command {
    pub config_path: Option<String>,
    pub index: Option<String>,
    pub output_dir: Option<String>,
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "fwmirror",
    version,
    author = "Nick Guletskii",
    about = "Mirror every firmware image listed in a vendor firmware index, verifying each against its published MD5"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file with index, output and HTTP settings"
    )]
    config: Option<String>,

    #[arg(
        value_name = "INDEX",
        help = "Firmware index URL or local XML file (default: config index_url or the vendor endpoint)"
    )]
    index: Option<String>,

    #[arg(
        value_name = "OUTPUT_DIR",
        help = "Directory to mirror firmware into (default: config output_dir or ./firmware_downloads)"
    )]
    output_dir: Option<String>,
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let command = Command {
        config_path: cli.config,
        index: cli.index,
        output_dir: cli.output_dir,
    };

    Args { command, log_level }
}
