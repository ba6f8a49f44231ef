use crate::api::RelationshipApi;
use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::view;
use crate::errors::{AppError, AppResult};
use crate::models::relationship::{FollowAction, UserRelationship};
use crate::ui::messages::{info, success};
use crate::utils::date::format_local;
use crate::utils::table::{Column, Table};

fn check_id(user_id: i64) -> AppResult<i64> {
    if user_id <= 0 {
        return Err(AppError::Validation(format!(
            "user id must be positive (got {})",
            user_id
        )));
    }
    Ok(user_id)
}

/// follow / unfollow / approve / deny
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let auth = ctx.credentials()?;
    match cmd {
        Commands::Follow { user_id } => {
            let rel = ctx.api.follow(&auth, check_id(*user_id)?)?;
            success(format!(
                "Follow request sent to {} (waiting for approval)",
                rel.followed.username
            ));
        }
        Commands::Unfollow { user_id } => {
            ctx.api.unfollow(&auth, check_id(*user_id)?)?;
            success(format!("Unfollowed user {}", user_id));
        }
        Commands::Approve { user_id } => {
            let rel = ctx
                .api
                .respond(&auth, check_id(*user_id)?, FollowAction::Approve)?;
            success(format!("{} can now follow you", rel.follower.username));
        }
        Commands::Deny { user_id } => {
            let rel = ctx
                .api
                .respond(&auth, check_id(*user_id)?, FollowAction::Deny)?;
            success(format!("Denied the request from {}", rel.follower.username));
        }
        _ => {}
    }
    Ok(())
}

/// following / followers / requests, optionally narrowed by a search
pub fn list(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let auth = ctx.credentials()?;
    // incoming listings show the follower, outgoing the followed user
    let (rows, incoming, empty, search) = match cmd {
        Commands::Following { search } => (
            ctx.api.following(&auth)?,
            false,
            "You are not following anyone yet",
            search,
        ),
        Commands::Followers { search } => (
            ctx.api.followers(&auth)?,
            true,
            "Nobody follows you yet",
            search,
        ),
        Commands::Requests { search } => (
            ctx.api.pending_requests(&auth)?,
            true,
            "No pending follow requests",
            search,
        ),
        _ => return Ok(()),
    };

    if rows.is_empty() {
        info(empty);
        return Ok(());
    }

    let query = search.as_deref().unwrap_or_default();
    let table = render(&rows, incoming, query);
    if table.is_empty() {
        info(format!("No one matches '{}'", query.trim()));
    } else {
        print!("{}", table.render());
    }
    Ok(())
}

fn render(rows: &[UserRelationship], incoming: bool, query: &str) -> Table {
    let mut table = Table::new(vec![
        Column::new("user id"),
        Column::new("username"),
        Column::new("email"),
        Column::new("since"),
    ]);
    for r in rows {
        let u = if incoming { &r.follower } else { &r.followed };
        if !(view::matches_query(&u.username, query) || view::matches_query(&u.email, query)) {
            continue;
        }
        table.add_row(vec![
            u.id.to_string(),
            u.username.clone(),
            u.email.clone(),
            r.created_at
                .as_ref()
                .map(format_local)
                .unwrap_or_else(|| "-".into()),
        ]);
    }
    table
}
