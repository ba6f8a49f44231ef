use crate::api::RamenApi;
use crate::cli::parser::{Commands, IkitaiAction};
use crate::context::AppContext;
use crate::core::ikitai::IkitaiBoard;
use crate::errors::AppResult;
use crate::location::ConfiguredLocation;
use crate::models::time_slot::TimeSlot;
use crate::ui::board::render_status;
use crate::ui::messages::{info, success};

type Board<'a> = IkitaiBoard<'a, dyn RamenApi, ConfiguredLocation>;

/// One-shot changes to the user's own status.
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Ikitai { action } = cmd {
        let mut board: Board = IkitaiBoard::new(
            ctx.api.as_ref(),
            &ctx.location,
            ctx.credentials()?,
            ctx.cfg.default_time_slot,
        );
        board.sync_own_status();

        match action {
            IkitaiAction::On { slot } => {
                let slot = slot.as_deref().map(str::parse::<TimeSlot>).transpose()?;
                turn_on(&mut board, slot)?;
                success(format!(
                    "ラーメンイキタイ ON ({})",
                    board.selected_time_slot().label()
                ));
            }
            IkitaiAction::Off => {
                board.set_ikitai(false)?;
                success("ラーメンイキタイ OFF");
            }
            IkitaiAction::Slot { slot } => {
                let slot: TimeSlot = slot.parse()?;
                board.select_time_slot(slot)?;
                if board.is_ikitai() {
                    success(format!("Time slot changed to {}", slot.label()));
                } else {
                    info(format!(
                        "Time slot set to {}; it is sent when you turn the status on",
                        slot.label()
                    ));
                }
            }
            IkitaiAction::Show => {}
        }

        print!(
            "{}",
            render_status(board.is_ikitai(), board.selected_time_slot(), board.expires_at())
        );
    }
    Ok(())
}

/// Already on: a new slot is a slot change, otherwise re-send the location.
fn turn_on(board: &mut Board<'_>, slot: Option<TimeSlot>) -> AppResult<()> {
    match slot {
        Some(s) if board.is_ikitai() && s != board.selected_time_slot() => {
            board.select_time_slot(s)
        }
        Some(s) => {
            if !board.is_ikitai() {
                board.select_time_slot(s)?;
            }
            board.set_ikitai(true)
        }
        None => board.set_ikitai(true),
    }
}
