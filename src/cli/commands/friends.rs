use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::ikitai::IkitaiBoard;
use crate::core::view;
use crate::errors::{AppError, AppResult};
use crate::models::time_slot::TimeSlot;
use crate::ui::board::{render_chips, render_friends};

/// List friends who are ikitai, optionally narrowed by municipality, slot
/// and a name search.
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Friends {
        municipality,
        slot,
        search,
        json,
    } = cmd
    {
        let slot = slot
            .as_deref()
            .map(|s| TimeSlot::from_code(s).ok_or_else(|| AppError::InvalidTimeSlot(s.into())))
            .transpose()?;

        let mut board = IkitaiBoard::new(
            ctx.api.as_ref(),
            &ctx.location,
            ctx.credentials()?,
            ctx.cfg.default_time_slot,
        );
        board.reload()?;
        board.select_municipality(municipality.clone());

        let by_area = board.filtered_friends();
        let by_slot = view::filter_by_time_slot(&by_area, slot);
        let shown = view::filter_by_name(&by_slot, search.as_deref().unwrap_or_default());

        if *json {
            println!("{}", serde_json::to_string_pretty(&shown)?);
            return Ok(());
        }

        println!(
            "{}\n",
            render_chips(&board.municipalities(), board.selected_municipality())
        );
        print!("{}", render_friends(&shown));

        let counts = view::count_by_time_slot(&shown);
        let summary: Vec<String> = counts
            .iter()
            .map(|(s, n)| format!("{} {}", s.label(), n))
            .collect();
        println!("\n{}", summary.join(" / "));
    }
    Ok(())
}
