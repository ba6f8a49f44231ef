//! Derived views over the fetched friend list.

use crate::models::ikitai::IkitaiFriend;
use crate::models::time_slot::TimeSlot;

/// Filter chip meaning "no municipality filter".
pub const ALL_MUNICIPALITIES: &str = "すべて";

/// `true` when `selection` means "show everyone".
pub fn is_show_all(selection: Option<&str>) -> bool {
    match selection {
        None => true,
        Some(s) => s == ALL_MUNICIPALITIES,
    }
}

/// The sentinel followed by each distinct municipality once, in first-seen order.
pub fn municipalities(friends: &[IkitaiFriend]) -> Vec<String> {
    let mut out = vec![ALL_MUNICIPALITIES.to_string()];
    for f in friends {
        if !out[1..].iter().any(|m| m == &f.municipality) {
            out.push(f.municipality.clone());
        }
    }
    out
}

/// Friends in `selection`, keeping server order. The sentinel or no
/// selection returns the whole list.
pub fn filter_by_municipality<'a>(
    friends: &'a [IkitaiFriend],
    selection: Option<&str>,
) -> Vec<&'a IkitaiFriend> {
    if is_show_all(selection) {
        return friends.iter().collect();
    }
    let wanted = selection.unwrap_or_default();
    friends.iter().filter(|f| f.municipality == wanted).collect()
}

/// Narrow an already filtered list to one time slot.
pub fn filter_by_time_slot<'a>(
    friends: &[&'a IkitaiFriend],
    slot: Option<TimeSlot>,
) -> Vec<&'a IkitaiFriend> {
    match slot {
        None => friends.to_vec(),
        Some(s) => friends.iter().copied().filter(|f| f.time_slot == s).collect(),
    }
}

/// Case-insensitive substring match. A blank query matches everything.
pub fn matches_query(text: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// Friends whose display name contains `query`, keeping the given order.
pub fn filter_by_name<'a>(friends: &[&'a IkitaiFriend], query: &str) -> Vec<&'a IkitaiFriend> {
    friends
        .iter()
        .copied()
        .filter(|f| matches_query(&f.user_name, query))
        .collect()
}

/// Head count per slot, in `TimeSlot::ALL` order.
pub fn count_by_time_slot(friends: &[&IkitaiFriend]) -> [(TimeSlot, usize); 3] {
    TimeSlot::ALL.map(|slot| (slot, friends.iter().filter(|f| f.time_slot == slot).count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(id: &str, m: &str, slot: TimeSlot) -> IkitaiFriend {
        IkitaiFriend {
            user_id: id.into(),
            user_name: format!("user{id}"),
            user_icon_url: String::new(),
            time_slot: slot,
            municipality: m.into(),
        }
    }

    fn sample() -> Vec<IkitaiFriend> {
        vec![
            f("1", "渋谷区", TimeSlot::Now),
            f("2", "新宿区", TimeSlot::Lunch),
            f("3", "渋谷区", TimeSlot::Night),
        ]
    }

    #[test]
    fn municipalities_are_distinct_with_sentinel_first() {
        assert_eq!(municipalities(&sample()), vec!["すべて", "渋谷区", "新宿区"]);
    }

    #[test]
    fn empty_list_only_has_sentinel() {
        assert_eq!(municipalities(&[]), vec![ALL_MUNICIPALITIES]);
    }

    #[test]
    fn filter_keeps_order_and_matches_selection() {
        let friends = sample();
        let shibuya = filter_by_municipality(&friends, Some("渋谷区"));
        assert_eq!(shibuya, vec![&friends[0], &friends[2]]);
    }

    #[test]
    fn sentinel_and_none_return_everything() {
        let friends = sample();
        assert_eq!(filter_by_municipality(&friends, None).len(), 3);
        assert_eq!(
            filter_by_municipality(&friends, Some(ALL_MUNICIPALITIES)),
            friends.iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn unknown_municipality_yields_nothing() {
        assert!(filter_by_municipality(&sample(), Some("豊島区")).is_empty());
    }

    #[test]
    fn every_selection_is_a_subsequence() {
        let friends = sample();
        for m in municipalities(&friends) {
            let filtered = filter_by_municipality(&friends, Some(&m));
            let mut it = friends.iter();
            for x in &filtered {
                assert!(it.any(|y| std::ptr::eq(y, *x)), "order broken for {m}");
                assert!(m == ALL_MUNICIPALITIES || x.municipality == m);
            }
        }
    }

    #[test]
    fn slot_facet_and_counts() {
        let friends = sample();
        let all = filter_by_municipality(&friends, None);
        assert_eq!(filter_by_time_slot(&all, Some(TimeSlot::Night)).len(), 1);
        assert_eq!(filter_by_time_slot(&all, None).len(), 3);
        assert_eq!(
            count_by_time_slot(&all),
            [(TimeSlot::Now, 1), (TimeSlot::Lunch, 1), (TimeSlot::Night, 1)]
        );
    }

    #[test]
    fn name_search_ignores_case_and_keeps_order() {
        let mut friends = sample();
        friends[0].user_name = "Ramen Suzuki".into();
        friends[1].user_name = "つけ麺 Sato".into();
        friends[2].user_name = "RAMEN Tanaka".into();
        let all = filter_by_municipality(&friends, None);

        let hits = filter_by_name(&all, "ramen");
        assert_eq!(hits, vec![&friends[0], &friends[2]]);
        assert_eq!(filter_by_name(&all, "つけ麺"), vec![&friends[1]]);
        assert!(filter_by_name(&all, "miso").is_empty());
    }

    #[test]
    fn blank_search_returns_everything() {
        let friends = sample();
        let all = filter_by_municipality(&friends, None);
        assert_eq!(filter_by_name(&all, ""), all);
        assert_eq!(filter_by_name(&all, "   "), all);
        assert!(matches_query("anything", ""));
    }
}
