use crate::api::RamenLogApi;
use crate::cli::parser::{Commands, LogAction};
use crate::context::AppContext;
use crate::errors::{AppError, AppResult};
use crate::models::ramen_log::{NewRamenLog, RamenLog};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::date::{format_local, parse_visit};
use crate::utils::formatting::{or_dash, rating_stars};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Log { action } = cmd {
        let auth = ctx.optional_credentials()?;
        let auth = auth.as_ref();

        match action {
            LogAction::List => {
                let logs = ctx.api.list_logs(auth)?;
                if logs.is_empty() {
                    info("No ramen logged yet");
                } else {
                    print!("{}", render_list(&logs));
                }
            }
            LogAction::Show { id } => {
                let log = ctx.api.get_log(auth, *id)?;
                print!("{}", render_detail(&log));
            }
            LogAction::Add {
                shop,
                user,
                item,
                hardness,
                toppings,
                rating,
                date,
            } => {
                let user_name = match user {
                    Some(u) => u.clone(),
                    None => ctx.tokens.username()?.ok_or_else(|| {
                        AppError::Validation("pass --user or log in first".into())
                    })?,
                };
                let visited_at = date.as_deref().map(parse_visit).transpose()?;

                let draft = NewRamenLog {
                    shop_name: shop.trim().to_string(),
                    user_name,
                    ordered_item: item.clone(),
                    noodle_hardness: hardness.clone(),
                    toppings: toppings.clone(),
                    rating: *rating,
                    visited_at,
                };
                draft.validate()?;

                let saved = ctx.api.create_log(auth, &draft)?;
                success(format!("Logged {} (id {})", saved.shop_name, saved.id));
            }
            LogAction::Del { id } => {
                ctx.api.delete_log(auth, *id)?;
                success(format!("Deleted entry {}", id));
            }
        }
    }
    Ok(())
}

fn render_list(logs: &[RamenLog]) -> String {
    let mut table = Table::new(vec![
        Column::new("id"),
        Column::new("visited"),
        Column::new("shop"),
        Column::new("ordered"),
        Column::new("rating"),
    ]);
    for l in logs {
        table.add_row(vec![
            l.id.to_string(),
            l.visited_at
                .as_ref()
                .map(format_local)
                .unwrap_or_else(|| "-".into()),
            l.shop_name.clone(),
            or_dash(l.ordered_item.as_deref()),
            rating_stars(l.rating),
        ]);
    }
    table.render()
}

fn render_detail(log: &RamenLog) -> String {
    let mut out = format!("🍜 {} (#{})\n", log.shop_name, log.id);
    let rows = [
        ("by", log.user_name.clone()),
        (
            "visited",
            log.visited_at
                .as_ref()
                .map(format_local)
                .unwrap_or_else(|| "訪問日未登録".into()),
        ),
        ("ordered", or_dash(log.ordered_item.as_deref())),
        ("hardness", or_dash(log.noodle_hardness.as_deref())),
        ("rating", rating_stars(log.rating)),
    ];
    for (k, v) in rows {
        out.push_str(&format!("  {:<9}{}\n", k, colorize_optional(&v)));
    }

    let toppings = or_dash(log.toppings.as_deref());
    let opts = textwrap::Options::new(60).subsequent_indent("           ");
    let wrapped = textwrap::wrap(&toppings, opts);
    out.push_str(&format!("  {:<9}{}\n", "toppings", wrapped.join("\n")));
    out
}
