mod config;

use std::io::{stdout, Write};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use config::{Cli, Command, PlayArgs};
use tilemerge::input::{self, Action, TerminalGuard};
use tilemerge::renderer::{self, ColorScheme};
use tilemerge::{selfplay, selftest, Game};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command_or_default() {
        Command::Play(args) => play(&cli, &args),
        Command::Test => {
            self_test();
            Ok(())
        }
        Command::Simulate { games, profile } => {
            simulate(cli.seed.unwrap_or(0), games, profile);
            Ok(())
        }
    }
}

fn play(cli: &Cli, args: &PlayArgs) -> anyhow::Result<()> {
    let mut game = match cli.seed {
        Some(seed) => Game::from_seed(seed),
        None => Game::new(),
    };
    if let Some(save) = &args.restore {
        game.restore(save.trim())
            .context("could not restore the save string")?;
    }

    let _guard = TerminalGuard::new()?;
    let mut out = stdout();
    draw(&mut out, &game, cli.scheme, args.show_save)?;
    // a restored game may already be finished
    if game.is_game_over() {
        return game_over(&mut out, &game);
    }
    loop {
        match input::read_action()? {
            Action::Quit => {
                write!(out, "            QUIT            \r\n")?;
                break;
            }
            Action::Restart => {
                game.reset();
                draw(&mut out, &game, cli.scheme, args.show_save)?;
            }
            Action::Move(direction) => {
                if !game.apply_move(direction) {
                    continue;
                }
                draw(&mut out, &game, cli.scheme, args.show_save)?;
                thread::sleep(Duration::from_millis(args.spawn_delay_ms));
                game.spawn_tile();
                draw(&mut out, &game, cli.scheme, args.show_save)?;
                if game.is_game_over() {
                    return game_over(&mut out, &game);
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn game_over(out: &mut impl Write, game: &Game) -> anyhow::Result<()> {
    write!(out, "         GAME OVER          \r\n")?;
    out.flush()?;
    info!("game over with score {}", game.score());
    Ok(())
}

fn draw(out: &mut impl Write, game: &Game, scheme: ColorScheme, show_save: bool) -> std::io::Result<()> {
    write!(out, "{}", renderer::render(game.board(), game.score(), scheme))?;
    if show_save {
        // pad so a shorter string fully covers the previous one
        write!(out, "{:<60}\r\n", game.to_save_string())?;
    }
    out.flush()
}

fn self_test() {
    match selftest::run() {
        Ok(count) => println!("All {} tests executed successfully", count),
        Err(mismatch) => {
            println!("{}", mismatch);
            std::process::exit(1);
        }
    }
}

fn simulate(seed: u64, games: usize, profile: bool) {
    time_graph::enable_data_collection(profile);
    let mut agents = selfplay::create_agents(games, seed);
    selfplay::run_all(&mut agents);
    let summary = selfplay::Summary::from_agents(&agents);

    println!("Games      : {}", summary.games);
    println!("Moves      : {}", summary.total_moves);
    println!("Mean score : {:.1}", summary.mean_score);
    println!("Best score : {}", summary.best_score);
    println!("Best tile  : {}", tilemerge::board::tile_value(summary.best_rank));
    if profile {
        println!("{}", time_graph::get_full_graph().as_table());
    }
}
