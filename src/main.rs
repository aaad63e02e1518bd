//! Headless explorer for the endless dungeon.
//!
//! Usage:
//!   endless-dungeon --seed ABCDEFGH --moves eeessn
//!   endless-dungeon --restore save.json --moves www --save save.json
//!   endless-dungeon --config dungeon.json --no-fog --profile
//!
//! The library reports through `tracing` but this driver installs no
//! subscriber; hosts that embed the library collect events with their own.

use std::error::Error;
use std::path::PathBuf;

use endless_dungeon::{MoveResult, SaveState, Seed, Session, SessionConfig};

#[derive(Debug, Default)]
struct Args {
    seed: Option<String>,
    config: Option<PathBuf>,
    moves: String,
    restore: Option<PathBuf>,
    save: Option<PathBuf>,
    no_fog: bool,
    profile: bool,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut args = Args::default();
        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            let mut value = || {
                iter.next()
                    .ok_or_else(|| format!("{flag} expects a value"))
            };
            match flag.as_str() {
                "--seed" => args.seed = Some(value()?),
                "--config" => args.config = Some(value()?.into()),
                "--moves" => args.moves = value()?,
                "--restore" => args.restore = Some(value()?.into()),
                "--save" => args.save = Some(value()?.into()),
                "--no-fog" => args.no_fog = true,
                "--profile" => args.profile = true,
                other => return Err(format!("unknown argument: {other}")),
            }
        }
        Ok(args)
    }
}

fn direction(step: char) -> Option<(i32, i32)> {
    match step.to_ascii_lowercase() {
        'n' => Some((0, -1)),
        's' => Some((0, 1)),
        'e' => Some((1, 0)),
        'w' => Some((-1, 0)),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse()?;

    let _server = if args.profile {
        puffin::set_scopes_on(true);
        let addr = format!("0.0.0.0:{}", puffin_http::DEFAULT_PORT);
        println!("Profiler listening on {addr}");
        Some(puffin_http::Server::new(&addr)?)
    } else {
        None
    };

    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let mut session = match &args.restore {
        Some(path) => Session::restore_json(&std::fs::read_to_string(path)?, config)?,
        None => {
            let seed = args.seed.clone().map(Seed::new).unwrap_or_else(Seed::random);
            Session::new(seed, config)
        }
    };
    if args.no_fog {
        session.set_fog_of_war(false);
    }
    session.tick();

    let mut blocked = 0;
    for step in args.moves.chars() {
        let (dx, dy) = direction(step).ok_or_else(|| format!("unknown move '{step}'"))?;
        puffin::GlobalProfiler::lock().new_frame();
        if session.attempt_move(dx, dy) == MoveResult::Blocked {
            blocked += 1;
        }
        session.tick();
    }

    print_view(&session);
    println!("seed:     {}", session.world().seed());
    println!("position: {:?}", session.position());
    println!("moves:    {} ({} blocked)", args.moves.len(), blocked);
    println!("chunks:   {}", session.world().chunk_count());
    println!("visible:  {}", session.visible().len());
    println!("seen:     {}", session.seen().len());

    if let Some(path) = &args.save {
        let state: SaveState = session.export_state();
        std::fs::write(path, state.to_json()?)?;
        println!("saved to  {}", path.display());
    }

    Ok(())
}

/// Draw the square around the observer. Unseen tiles are blank.
fn print_view(session: &Session) {
    let (px, py) = session.position();
    let r = session.config().view_radius;
    for y in py - r..=py + r {
        let row: String = (px - r..=px + r)
            .map(|x| {
                if (x, y) == (px, py) {
                    return '@';
                }
                if !session.seen().contains(&(x, y)) {
                    return ' ';
                }
                session
                    .world()
                    .peek_tile(x, y)
                    .map_or(' ', |tile| tile.glyph())
            })
            .collect();
        println!("{}", row.trim_end());
    }
}
