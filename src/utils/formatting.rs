//! Formatting utilities used for CLI outputs.

/// `★★★★☆ 4.5` style rating, rounded to the nearest whole star.
pub fn rating_stars(rating: Option<f64>) -> String {
    match rating {
        None => "-".to_string(),
        Some(r) => {
            let full = r.round().clamp(0.0, 5.0) as usize;
            format!("{}{} {:.1}", "★".repeat(full), "☆".repeat(5 - full), r)
        }
    }
}

/// Value or a dash placeholder.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_round_to_nearest() {
        assert_eq!(rating_stars(Some(4.5)), "★★★★★ 4.5");
        assert_eq!(rating_stars(Some(3.2)), "★★★☆☆ 3.2");
        assert_eq!(rating_stars(None), "-");
    }

    #[test]
    fn dash_for_blank() {
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(Some("バリカタ")), "バリカタ");
    }
}
