//! Text rendering of the ikitai board.

use ansi_term::Colour;

use crate::core::view;
use crate::models::ikitai::IkitaiFriend;
use crate::models::time_slot::TimeSlot;
use crate::utils::colors;
use crate::utils::date::format_until;
use crate::utils::table::{Column, Table};

use chrono::{DateTime, Utc};

fn slot_colour(slot: TimeSlot) -> Colour {
    match slot {
        TimeSlot::Now => Colour::Red,
        TimeSlot::Lunch => Colour::Yellow,
        TimeSlot::Night => Colour::Blue,
    }
}

/// Time slot badge, e.g. `[昼]`.
pub fn badge(slot: TimeSlot) -> String {
    let text = format!("[{}]", slot.label());
    if colors::enabled() {
        slot_colour(slot).bold().paint(text).to_string()
    } else {
        text
    }
}

/// The user's own switch and slot selector.
pub fn render_status(is_ikitai: bool, selected: TimeSlot, expires_at: Option<DateTime<Utc>>) -> String {
    let mut out = String::new();
    let switch = if is_ikitai { "ON" } else { "OFF" };
    out.push_str(&format!("ラーメンイキタイ: {}\n", switch));

    if is_ikitai {
        let chips: Vec<String> = TimeSlot::ALL
            .iter()
            .map(|s| {
                if *s == selected {
                    format!("({}●)", s.label())
                } else {
                    format!("({})", s.label())
                }
            })
            .collect();
        out.push_str(&format!("時間帯: {}  [{}]\n", chips.join(" "), selected.as_str()));
        if let Some(at) = expires_at {
            out.push_str(&format!("until {}\n", format_until(&at)));
        }
    }
    out
}

/// Filter chips, the current selection marked with `*`.
pub fn render_chips(municipalities: &[String], selected: Option<&str>) -> String {
    municipalities
        .iter()
        .map(|m| {
            let active = if m == view::ALL_MUNICIPALITIES {
                view::is_show_all(selected)
            } else {
                selected == Some(m.as_str())
            };
            if active { format!("*{}", m) } else { m.clone() }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Friend list with a head count title, or the empty-state message.
pub fn render_friends(friends: &[&IkitaiFriend]) -> String {
    let mut out = format!("イキタイ中のフレンド ({}人)\n", friends.len());

    if friends.is_empty() {
        out.push_str("イキタイ中のフレンドがいません\n");
        out.push_str("友達をアプリに招待してみましょう\n");
        return out;
    }

    let mut table = Table::new(vec![
        Column::new("id"),
        Column::new("name").min(12),
        Column::new("area"),
        Column::new("slot"),
    ]);
    for f in friends {
        table.add_row(vec![
            f.user_id.clone(),
            f.user_name.clone(),
            f.municipality.clone(),
            badge(f.time_slot),
        ]);
    }
    out.push_str(&table.render());
    out
}
