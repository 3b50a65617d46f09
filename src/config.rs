use clap::{Args, Parser, Subcommand};

use tilemerge::renderer::ColorScheme;

#[derive(Parser, Debug)]
#[command(name = "tilemerge", version, about = "Slide and merge tiles until the board locks up")]
pub struct Cli {
    /// Seed for tile spawns (defaults to the clock)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Tile colors
    #[arg(long, value_enum, default_value_t = ColorScheme::Original, global = true)]
    pub scheme: ColorScheme,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Play in the terminal (the default)
    Play(PlayArgs),
    /// Run the bundled slide cases
    Test,
    /// Play many random games in parallel and report the results
    Simulate {
        #[arg(long, default_value_t = 1000)]
        games: usize,
        /// Print the time spent in each engine operation
        #[arg(long)]
        profile: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PlayArgs {
    /// Start from a save string instead of a new game
    #[arg(long, value_name = "SAVE")]
    pub restore: Option<String>,

    /// Pause between a move and the tile it spawns
    #[arg(long, value_name = "MS", default_value_t = 150)]
    pub spawn_delay_ms: u64,

    /// Print the save string under the board
    #[arg(long)]
    pub show_save: bool,
}

impl Default for PlayArgs {
    fn default() -> Self {
        PlayArgs {
            restore: None,
            spawn_delay_ms: 150,
            show_save: false,
        }
    }
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.cmd
            .clone()
            .unwrap_or_else(|| Command::Play(PlayArgs::default()))
    }
}
