//! Headless harness: drive the simulation with a scripted delve and print
//! a top-down debug view plus the message log.

use gloam_lib::game::{Command, Game, Status};
use gloam_lib::terrain::terrain_rune;

const DT: f32 = 1.0 / 60.0;

fn main() {
    let mut game = Game::new();

    let script = [
        Command::StepForward,
        Command::StepForward,
        Command::RotateRight,
        Command::StepForward,
        Command::StepForward,
        Command::ToggleDoor,
        Command::StepForward,
        Command::RotateLeft,
        Command::StepForward,
        Command::Attack,
        Command::Wait,
        Command::StepForward,
    ];

    for cmd in script.iter().cycle().take(60) {
        // Wait out animations and cooldowns, then issue the command.
        for _ in 0..600 {
            if game.player_can_act() {
                break;
            }
            game.update(DT);
        }
        if !matches!(game.status, Status::Playing) {
            break;
        }
        game.command(*cmd);
        game.update(DT);
    }
    for _ in 0..300 {
        game.update(DT);
    }

    print_map(&game);
    println!();
    for entry in game.log.entries.iter().rev().take(12).rev() {
        println!("  {}", entry.text);
    }
    println!();
    println!(
        "turns: {}  monsters alive: {}  status: {:?}",
        game.turn(),
        game.living_monsters(),
        game.status
    );
}

/// Top-down ASCII view: actors over doors over terrain.
fn print_map(game: &Game) {
    for y in 0..game.map.height() {
        let mut line = String::new();
        for x in 0..game.map.width() {
            let p = crawl_core::Point::new(x, y);
            let ch = if game.player().is_some_and(|pl| pl.grid_pos == p) {
                '@'
            } else if let Some((_, a)) = game.actors().find(|(_, a)| a.grid_pos == p) {
                a.name.chars().next().unwrap_or('?')
            } else if let Some(door) = game.doors.door_at(p) {
                if door.open { '/' } else { '+' }
            } else {
                game.map
                    .terrain()
                    .at(p)
                    .map_or(' ', terrain_rune)
            };
            line.push(ch);
        }
        println!("{line}");
    }
}
