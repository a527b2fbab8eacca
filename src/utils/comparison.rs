//! Utilities to compare tasks
//!
//! These can be used to sort results, e.g. by using `sort_by` on a `Vec<&Task>`.
//! All of them compare in ascending order; [`crate::sort`] takes care of the direction.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use deunicode::deunicode;

use crate::Task;

/// The primary collation key of a name: accents folded to their base letters, then lowercased
fn collation_key(name: &str) -> String {
    deunicode(name).to_lowercase()
}

/// Compare alphabetically, the way a default collator does.
///
/// Accents and case are ignored first, so `Éclairs` sorts among the `e`s. Names that still compare equal are then
/// ordered by their accented form, and finally lowercase first.
pub fn compare_names(left: &Task, right: &Task) -> Ordering {
    Ord::cmp(&collation_key(left.name()), &collation_key(right.name()))
        .then_with(|| Ord::cmp(&left.name().to_lowercase(), &right.name().to_lowercase()))
        .then_with(|| Ord::cmp(right.name(), left.name()))
}

/// `Urgent` first, `Low` last
pub fn compare_priorities(left: &Task, right: &Task) -> Ordering {
    Ord::cmp(&left.priority(), &right.priority())
}

/// `To Do` first, `Done` last
pub fn compare_statuses(left: &Task, right: &Task) -> Ordering {
    Ord::cmp(&left.status(), &right.status())
}

/// Compare two effective due dates.
///
/// Only the order between two present dates depends on `descending`: a missing date always comes last.
pub fn compare_due_dates(left: Option<&NaiveDateTime>, right: Option<&NaiveDateTime>, descending: bool) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => {
            let ord = Ord::cmp(l, r);
            if descending { ord.reverse() } else { ord }
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::parse_date;

    #[test]
    fn names_ignore_case() {
        let apple = Task::new("apple".to_string());
        let banana = Task::new("Banana".to_string());
        let upper_apple = Task::new("Apple".to_string());

        assert_eq!(compare_names(&apple, &banana), Ordering::Less);
        assert_eq!(compare_names(&banana, &upper_apple), Ordering::Greater);
        assert_eq!(compare_names(&apple, &upper_apple), Ordering::Less);
        assert_eq!(compare_names(&apple, &apple.clone()), Ordering::Equal);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let eclairs = Task::new("Éclairs".to_string());
        let fruit = Task::new("Fruit platter".to_string());
        let zines = Task::new("Zines".to_string());
        let plain = Task::new("Eclairs".to_string());
        let creme = Task::new("crème brûlée".to_string());
        let cookies = Task::new("Cookies".to_string());

        assert_eq!(compare_names(&eclairs, &fruit), Ordering::Less);
        assert_eq!(compare_names(&eclairs, &zines), Ordering::Less);
        assert_eq!(compare_names(&cookies, &creme), Ordering::Less);
        // Same letters: the unaccented form comes first
        assert_eq!(compare_names(&plain, &eclairs), Ordering::Less);
        assert_eq!(compare_names(&eclairs, &plain), Ordering::Greater);
    }

    #[test]
    fn priorities_and_statuses_follow_declaration_order() {
        use crate::{Priority, TaskStatus};

        let urgent = Task::new("a".to_string()).with_priority(Priority::Urgent);
        let low = Task::new("b".to_string()).with_priority(Priority::Low).with_status(TaskStatus::Done);
        assert_eq!(compare_priorities(&urgent, &low), Ordering::Less);
        assert_eq!(compare_statuses(&urgent, &low), Ordering::Less);
        assert_eq!(compare_statuses(&low, &low.clone()), Ordering::Equal);
    }

    #[test]
    fn missing_due_dates_come_last_in_both_directions() {
        let early = parse_date("2025-01-01");
        let late = parse_date("2025-02-01");

        assert_eq!(compare_due_dates(early.as_ref(), late.as_ref(), false), Ordering::Less);
        assert_eq!(compare_due_dates(early.as_ref(), late.as_ref(), true), Ordering::Greater);

        for descending in [false, true].iter().copied() {
            assert_eq!(compare_due_dates(early.as_ref(), None, descending), Ordering::Less);
            assert_eq!(compare_due_dates(None, late.as_ref(), descending), Ordering::Greater);
            assert_eq!(compare_due_dates(None, None, descending), Ordering::Equal);
        }
    }
}
