use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;
use crate::ui::OutputFormat;

/// Fetch the Bing image of the day and set it as wallpaper
#[derive(Parser, Debug)]
#[command(name = "bingwall", author, version, about, long_about = None)]
pub struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch, store and apply today's image (default)
    Run(RunArgs),

    /// Show today's image metadata without downloading it
    Info(SourceArgs),

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Market (locale) such as zh-CN or en-US
    #[arg(short, long)]
    pub market: Option<String>,

    /// Day index, 0 is today, 1 is yesterday
    #[arg(short, long)]
    pub index: Option<u32>,

    /// Origin of the image service
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory to store images in (default: ~/Pictures/Bing)
    #[arg(long)]
    pub dir: Option<String>,

    /// Store the image without changing the wallpaper
    #[arg(long)]
    pub no_set: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration if no config file exists
    Init,
}

impl From<SourceArgs> for Overrides {
    fn from(args: SourceArgs) -> Self {
        Self {
            base_url: args.base_url,
            market: args.market,
            index: args.index,
            ..Default::default()
        }
    }
}

impl From<RunArgs> for Overrides {
    fn from(args: RunArgs) -> Self {
        Self {
            store_dir: args.dir,
            no_set: args.no_set,
            ..Overrides::from(args.source)
        }
    }
}
