//! Interactive ikitai board.
//!
//! Reads one command per line from stdin until `quit` or end of input. Any
//! failed action is reported as an alert and the board keeps running.

use std::io::{self, BufRead, Write};

use crate::api::IkitaiApi;
use crate::context::AppContext;
use crate::core::ikitai::IkitaiBoard;
use crate::errors::{AppError, AppResult};
use crate::location::LocationProvider;
use crate::models::time_slot::TimeSlot;
use crate::ui::board::{render_chips, render_friends, render_status};
use crate::ui::messages::{alert, header};

const HELP: &str = "\
commands:
  on            turn ラーメンイキタイ on (shares your location)
  off           turn it off
  slot <s>      time slot: now, lunch or night
  filter <m>    show friends in municipality <m>
  all           clear the municipality filter
  reload        fetch the friend list again
  list          redraw the board
  help          this text
  quit          leave the board";

enum Input {
    On,
    Off,
    Slot(String),
    Filter(String),
    All,
    Reload,
    List,
    Help,
    Quit,
    Unknown(String),
}

fn parse(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    Some(match (word.to_lowercase().as_str(), rest) {
        ("on", _) => Input::On,
        ("off", _) => Input::Off,
        ("slot", s) if !s.is_empty() => Input::Slot(s.to_string()),
        ("filter", m) if !m.is_empty() => Input::Filter(m.to_string()),
        ("all", _) => Input::All,
        ("reload", _) => Input::Reload,
        ("list" | "ls", _) => Input::List,
        ("help" | "?", _) => Input::Help,
        ("quit" | "exit" | "q", _) => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    })
}

fn draw<A, L>(board: &IkitaiBoard<'_, A, L>)
where
    A: IkitaiApi + ?Sized,
    L: LocationProvider + ?Sized,
{
    header("ラーメンイキタイ");
    print!(
        "{}",
        render_status(board.is_ikitai(), board.selected_time_slot(), board.expires_at())
    );
    println!();
    println!(
        "{}",
        render_chips(&board.municipalities(), board.selected_municipality())
    );
    print!("{}", render_friends(&board.filtered_friends()));
}

pub fn handle(ctx: &AppContext) -> AppResult<()> {
    let mut board = IkitaiBoard::new(
        ctx.api.as_ref(),
        &ctx.location,
        ctx.credentials()?,
        ctx.cfg.default_time_slot,
    );

    println!("データを読み込み中...");
    if let Err(e) = board.activate() {
        alert(format!("Could not load friends: {}", e));
        board.sync_own_status();
    }

    draw(&board);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let Some(input) = parse(&line?) else { continue };

        let outcome: AppResult<bool> = match input {
            Input::On => board.set_ikitai(true).map(|_| true),
            Input::Off => board.set_ikitai(false).map(|_| true),
            Input::Slot(s) => s
                .parse::<TimeSlot>()
                .and_then(|slot| board.select_time_slot(slot))
                .map(|_| true),
            Input::Filter(m) => {
                if board.municipalities().contains(&m) {
                    board.select_municipality(Some(m));
                    Ok(true)
                } else {
                    Err(AppError::Validation(format!("no friends in '{}'", m)))
                }
            }
            Input::All => {
                board.select_municipality(None);
                Ok(true)
            }
            Input::Reload => board.reload().map(|_| true),
            Input::List => Ok(true),
            Input::Help => {
                println!("{}", HELP);
                Ok(false)
            }
            Input::Quit => break,
            Input::Unknown(s) => {
                println!("unknown command '{}', type `help`", s);
                Ok(false)
            }
        };

        match outcome {
            Ok(true) => draw(&board),
            Ok(false) => {}
            Err(AppError::PermissionDenied) => alert("位置情報の利用が許可されていません。"),
            Err(e) => alert(format!("エラーが発生しました。 ({})", e)),
        }
    }

    println!();
    Ok(())
}
