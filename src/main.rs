use anyhow::Result;

use std::io::{stdin, stdout, Stdin, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use network_ai::{
    arena, board::Board, piece::*, player::Player, search::MachinePlayer, DEFAULT_SEARCH_DEPTH,
};

mod terminal;

fn ask(stdin: &Stdin, prompt: &str) -> Result<String> {
    print!("{}", prompt);
    stdout().flush().expect("failed to flush to stdout!");
    let mut buffer = String::new();
    stdin.read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

fn ask_yes_no(stdin: &Stdin, prompt: &str) -> Result<bool> {
    loop {
        match ask(stdin, prompt)?.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_number(stdin: &Stdin, prompt: &str, default: usize) -> Result<usize> {
    loop {
        let answer = ask(stdin, prompt)?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<usize>() {
            Ok(number) if number > 0 => return Ok(number),
            _ => println!("Invalid number: {}", answer),
        }
    }
}

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Network\n");

    let depth = ask_number(
        &stdin,
        &format!("Search depth for AI players (default {}): ", DEFAULT_SEARCH_DEPTH),
        DEFAULT_SEARCH_DEPTH,
    )?;

    if ask_yes_no(&stdin, "Play a tournament of AI against random moves? y/n: ")? {
        let games = ask_number(&stdin, "Number of games (default 20): ", 20)?;
        let seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        arena::tournament_verbose(games, depth, seed);
        return Ok(());
    }

    // one searching agent per AI controlled colour, each tracking the game on its own board
    let mut ai_players: Vec<MachinePlayer> = Vec::new();
    for &color in [Color::White, Color::Black].iter() {
        if ask_yes_no(&stdin, &format!("Is {} AI controlled? y/n: ", color))? {
            ai_players.push(MachinePlayer::with_config(color, depth, network_ai::BOARD_SIZE)?);
        }
    }

    println!("White connects left to right, Black connects top to bottom.");
    println!("Enter moves as 'x y' to add, 'x y from_x from_y' to step, or 'quit'.\n");

    let mut board = Board::new();
    let both_ai = ai_players.len() == 2;

    // game loop
    loop {
        terminal::display(&board)?;

        let mover = board.next_player();
        let next_move = match ai_players.iter_mut().find(|ai| ai.color() == mover) {
            // AI player
            Some(ai) => {
                println!("AI is thinking...");
                stdout().flush().expect("Failed to flush to stdout!");

                // slow down play if both players are AI
                if both_ai {
                    std::thread::sleep(std::time::Duration::new(1, 0));
                }
                ai.choose_move_verbose()
            }

            // human player
            None => {
                let input = ask(&stdin, &format!("{} move > ", mover))?;
                match input.parse::<Move>() {
                    Err(err) => {
                        println!("{}", err);
                        continue;
                    }
                    Ok(parsed) => {
                        if !board.is_legal(parsed, mover) {
                            println!("Illegal move {} for {}", parsed, mover);
                            // try the move again
                            continue;
                        }
                        parsed
                    }
                }
            }
        };

        if next_move == Move::Quit {
            println!("{} quits, {} wins!", mover, mover.other());
            break;
        }

        let applied = board.apply_move(next_move, mover);
        assert!(applied, "{} played illegal move {}", mover, next_move);
        for ai in ai_players.iter_mut().filter(|ai| ai.color() != mover) {
            let accepted = ai.opponent_move(next_move);
            assert!(accepted, "{} AI rejected {} by {}", ai.color(), next_move, mover);
        }

        // end states, the mover's own network takes precedence
        if let Some(winner) = [mover, mover.other()]
            .iter()
            .copied()
            .find(|&color| board.is_win(color))
        {
            terminal::display(&board)?;
            println!("{} wins!", winner);
            break;
        }
    }
    Ok(())
}
