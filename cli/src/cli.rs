use std::path::PathBuf;

use migramap::ViewMode;

/// Migration map CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "migramap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Join polygons, statistics and flows into a scene file
    Render(RenderArgs),

    /// Print the largest statistics
    Top(TopArgs),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum View { Arrivals, Routes }

impl From<View> for ViewMode {
    fn from(view: View) -> Self {
        match view {
            View::Arrivals => ViewMode::Statistic,
            View::Routes => ViewMode::Flow,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Polygon dataset (GeoJSON FeatureCollection)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub polygons: PathBuf,

    /// Statistics dataset ({"totalsByCountry": {...}})
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub statistics: PathBuf,

    /// Flow dataset ({"routes": [...]})
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub flows: PathBuf,

    /// Output scene file, defaults to "./scene.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// View to render the scene in
    #[arg(long, value_enum, default_value_t = View::Arrivals)]
    pub view: View,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Overwrite if the output file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct TopArgs {
    /// Statistics dataset ({"totalsByCountry": {...}})
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub statistics: PathBuf,

    /// Number of entries, defaults to the configured ranking size
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Engine configuration file (JSON), for code aliases
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}
