/// Entry point and session loop.

mod config;
mod domain;
mod net;
mod sim;
mod ui;

use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use config::ClientConfig;
use domain::movement::Command;
use sim::event::GameEvent;
use sim::save::{self, SaveError};
use sim::step;
use sim::world::WorldState;
use ui::banner;
use ui::input::{install_interrupt_handler, spawn_listener, TerminalGuard, TerminalHandle};
use ui::renderer::Renderer;

/// How a session ended.
#[derive(Debug)]
enum SessionEnd {
    /// Escape pressed.
    Quit,
    /// The key listener stopped; reading keys failed.
    InputClosed,
    /// The roster was empty from the start.
    NothingToCatch,
    /// Everything caught; carries the persistence outcome.
    Finished(Result<usize, SaveError>),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Armed only once raw mode is on; until then an interrupt just exits.
    let term = TerminalHandle::new();
    if let Err(e) = install_interrupt_handler(term.clone()) {
        log::warn!("could not install interrupt handler: {e}");
    }

    let config = ClientConfig::load();

    let player_name = match prompt_name() {
        Ok(name) => name,
        Err(e) => {
            eprintln!("Failed to read player name: {e}");
            return;
        }
    };

    println!("Welcome {player_name} To Pokecat!!!");
    banner::print_title();
    std::thread::sleep(Duration::from_millis(config.title_delay_ms));

    let roster = match fetch_roster(&config) {
        Ok(roster) => roster,
        Err(e) => {
            eprintln!("{e}");
            let code = e.exit_code();
            if code != 0 {
                std::process::exit(code);
            }
            return;
        }
    };
    log::info!("received {} creatures", roster.len());

    let mut world = WorldState::new(player_name, roster);

    let end = match run_session(&mut world, &config, term) {
        Ok(end) => end,
        Err(e) => {
            eprintln!("Game error: {e}");
            return;
        }
    };

    match end {
        SessionEnd::Finished(Ok(total)) => {
            println!();
            println!("Thanks for playing, {}! You caught {} Pokémon.", world.player_name, world.caught.len());
            log::info!("{} now holds {total} sessions", config.player_data.display());
        }
        SessionEnd::Finished(Err(e)) => {
            log::error!("{e}");
            eprintln!("{e}");
        }
        SessionEnd::InputClosed => {
            eprintln!("Keyboard input stopped; leaving the game.");
        }
        SessionEnd::Quit | SessionEnd::NothingToCatch => {}
    }
}

fn prompt_name() -> io::Result<String> {
    let mut out = io::stdout();
    write!(out, "Enter your name: ")?;
    out.flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn fetch_roster(config: &ClientConfig) -> Result<Vec<domain::creature::Creature>, net::NetError> {
    let mut stream = net::connect(&config.server)?;
    net::receive_roster(&mut stream, config.server.buffer_size)
}

/// Take over the terminal, run the loop, and give the terminal back.
fn run_session(world: &mut WorldState, config: &ClientConfig, handle: TerminalHandle) -> io::Result<SessionEnd> {
    let term = TerminalGuard::enable(handle.clone())?;
    let keys = spawn_listener(handle)?;
    let mut renderer = Renderer::stdout();

    let result = game_loop(world, &mut renderer, &keys, config);

    if let Err(e) = term.restore() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    result
}

fn game_loop<W: Write>(
    world: &mut WorldState,
    renderer: &mut Renderer<W>,
    keys: &Receiver<Command>,
    config: &ClientConfig,
) -> io::Result<SessionEnd> {
    if world.all_caught() {
        renderer.render(world)?;
        return Ok(SessionEnd::NothingToCatch);
    }

    loop {
        renderer.render(world)?;

        let cmd = match keys.recv() {
            Ok(cmd) => cmd,
            Err(_) => return Ok(SessionEnd::InputClosed),
        };

        for event in step::step(world, cmd) {
            match event {
                GameEvent::QuitRequested => return Ok(SessionEnd::Quit),
                GameEvent::AllCaught => {
                    let saved = save::append_session(&config.player_data, &world.player_name, &world.caught);
                    renderer.render(world)?;
                    return Ok(SessionEnd::Finished(saved));
                }
                GameEvent::PlayerMoved { .. } | GameEvent::CreatureCaught { .. } => {
                    log::trace!("{event:?}");
                }
            }
        }
    }
}
