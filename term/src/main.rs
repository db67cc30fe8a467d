use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mnemo_core as game;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use web_time::Instant;

use game::{Alphabet, CardIndex, Coord2, Difficulty, GameError, RandomDeckGenerator, Session};
use view::TermView;

mod view;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Find all the pairs", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Skip the menu and start at this difficulty
    #[arg(short, long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How long a mismatched pair stays visible, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Pick(CardIndex),
    NewGame,
    Quit,
}

/// Parses `row col` (1-based), `n` or `q`.
fn parse_command(line: &str, size: Coord2) -> Option<Command> {
    let line = line.trim();
    match line {
        "q" | "quit" => return Some(Command::Quit),
        "n" | "new" => return Some(Command::NewGame),
        _ => {}
    }

    let mut parts = line.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty());
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let (rows, cols) = (usize::from(size.0), usize::from(size.1));
    if !(1..=rows).contains(&row) || !(1..=cols).contains(&col) {
        return None;
    }
    Some(Command::Pick((row - 1) * cols + (col - 1)))
}

fn parse_difficulty(line: &str) -> Option<Difficulty> {
    let choice: usize = line.trim().parse().ok()?;
    Difficulty::ALL.get(choice.checked_sub(1)?).copied()
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Could not read input")?;
    Ok((read > 0).then_some(line))
}

fn choose_difficulty(input: &mut impl BufRead, out: &mut impl Write) -> Result<Option<Difficulty>> {
    loop {
        writeln!(out, "\nMemory Game")?;
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, difficulty)?;
        }
        write!(out, "Difficulty (q to quit): ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line.trim() == "q" {
            return Ok(None);
        }
        match parse_difficulty(&line) {
            Some(difficulty) => return Ok(Some(difficulty)),
            None => writeln!(out, "Pick 1-{}", Difficulty::ALL.len())?,
        }
    }
}

fn play(
    session: &mut Session,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<Command>> {
    let size = session.engine().size();
    let mut view = TermView::new(size);

    loop {
        view.render(out)?;
        if view.is_won() {
            writeln!(out, "You've won in {} moves!", session.moves())?;
            return Ok(Some(Command::NewGame));
        }
        write!(
            out,
            "{}/{} pairs. Card as `row col`, n for new game, q to quit: ",
            view.found_pairs(),
            session.engine().deck().pair_count()
        )?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        let index = match parse_command(&line, size) {
            Some(Command::Pick(index)) => index,
            Some(command) => return Ok(Some(command)),
            None => {
                writeln!(out, "Expected a row and column inside the board")?;
                continue;
            }
        };

        match session.click(index, Instant::now(), &mut view) {
            Ok(outcome) if !outcome.has_update() => {
                writeln!(out, "That card is already face up")?;
            }
            Ok(_) => {}
            Err(GameError::InvalidIndex) => {
                log::warn!("Rejected card index {}", index);
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        if let Some(due) = session.next_deadline() {
            view.render(out)?;
            std::thread::sleep(due.saturating_duration_since(Instant::now()));
            session.poll(Instant::now(), &mut view);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let options = game::SessionOptions {
        hide_delay: Duration::from_millis(args.delay_ms),
    };
    let mut seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    let mut difficulty = match args.difficulty {
        Some(arg) => Difficulty::from(arg),
        None => match choose_difficulty(&mut input, &mut out)? {
            Some(difficulty) => difficulty,
            None => return Ok(()),
        },
    };

    let mut session = Session::new(
        difficulty.config(),
        Alphabet::animals(),
        RandomDeckGenerator::new(seed),
        options,
    )?;

    while let Some(Command::NewGame) = play(&mut session, &mut input, &mut out)? {
        difficulty = match choose_difficulty(&mut input, &mut out)? {
            Some(difficulty) => difficulty,
            None => break,
        };
        seed = seed.wrapping_add(1);
        session.setup(difficulty.config(), RandomDeckGenerator::new(seed))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_based_positions() {
        assert_eq!(parse_command("1 1", (3, 4)), Some(Command::Pick(0)));
        assert_eq!(parse_command(" 2,3 \n", (3, 4)), Some(Command::Pick(6)));
        assert_eq!(parse_command("3 4", (3, 4)), Some(Command::Pick(11)));
    }

    #[test]
    fn rejects_positions_outside_board() {
        assert_eq!(parse_command("0 1", (3, 4)), None);
        assert_eq!(parse_command("4 1", (3, 4)), None);
        assert_eq!(parse_command("1 5", (3, 4)), None);
        assert_eq!(parse_command("1", (3, 4)), None);
        assert_eq!(parse_command("1 2 3", (3, 4)), None);
        assert_eq!(parse_command("a b", (3, 4)), None);
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("q\n", (3, 4)), Some(Command::Quit));
        assert_eq!(parse_command("n", (3, 4)), Some(Command::NewGame));
    }

    #[test]
    fn parses_menu_choice() {
        assert_eq!(parse_difficulty("1"), Some(Difficulty::Easy));
        assert_eq!(parse_difficulty(" 3\n"), Some(Difficulty::Hard));
        assert_eq!(parse_difficulty("0"), None);
        assert_eq!(parse_difficulty("4"), None);
    }

    #[test]
    fn plays_scripted_game_to_the_end() {
        let deck = game::Deck::from_symbols((1, 4), &['A', 'B', 'A', 'B']).unwrap();
        let mut session = Session::new(
            deck.board_config(),
            Alphabet::new(['A', 'B']).unwrap(),
            deck,
            game::SessionOptions {
                hide_delay: Duration::ZERO,
            },
        )
        .unwrap();
        // one mismatch, then both pairs
        let mut input = io::Cursor::new("1 1\n1 2\n1 1\n1 3\n1 2\n1 4\n");
        let mut out = Vec::new();

        let next = play(&mut session, &mut input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(next, Some(Command::NewGame));
        assert!(text.contains("You've won in 3 moves!"));
        assert!(session.is_won());
    }

    #[test]
    fn end_of_input_stops_play() {
        let mut session = Session::new(
            Difficulty::Easy.config(),
            Alphabet::animals(),
            RandomDeckGenerator::new(5),
            Default::default(),
        )
        .unwrap();
        let mut input = io::Cursor::new("q\n");
        let mut out = Vec::new();

        assert_eq!(
            play(&mut session, &mut input, &mut out).unwrap(),
            Some(Command::Quit)
        );
        assert_eq!(
            play(&mut session, &mut io::Cursor::new(""), &mut out).unwrap(),
            None
        );
    }
}
