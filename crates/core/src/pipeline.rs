//! The filter-sort pipeline: raw snapshot + view state in, render-ready
//! sequence out. Pure and deterministic; the stages are conjunctive and run
//! in a fixed order (status, search, priority, overdue, due range).

use std::cmp::Ordering;

use crate::calendar::local_due_date;
use crate::model::Task;
use crate::view::{SortMode, ViewState};

/// Apply every active filter stage, then sort. The result is always a
/// subsequence of `tasks`; equal-key entries keep their filtered order
/// (the sort is stable).
pub fn apply(tasks: &[Task], view: &ViewState) -> Vec<Task> {
    let term = view.search_term.trim().to_lowercase();

    let mut filtered: Vec<Task> = tasks
        .iter()
        .filter(|task| view.status_filter.matches(task.status))
        .filter(|task| matches_search(task, &term))
        .filter(|task| view.priority_filter.matches(task.priority))
        .filter(|task| !view.show_overdue_only || task.overdue)
        .filter(|task| within_due_range(task, view))
        .cloned()
        .collect();

    sort(&mut filtered, view.sort_by);
    filtered
}

/// Case-insensitive substring match over title or description. The title is
/// always checked; a missing description only skips the description check.
fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    if task.title.to_lowercase().contains(term) {
        return true;
    }
    task.description
        .as_ref()
        .map(|description| description.to_lowercase().contains(term))
        .unwrap_or(false)
}

/// Inclusive local-calendar-date bounds. A task without a due date is
/// excluded by whichever bound is active.
fn within_due_range(task: &Task, view: &ViewState) -> bool {
    if view.due_from.is_none() && view.due_to.is_none() {
        return true;
    }
    let Some(due) = local_due_date(task) else {
        return false;
    };
    if let Some(from) = view.due_from {
        if due < from {
            return false;
        }
    }
    if let Some(to) = view.due_to {
        if due > to {
            return false;
        }
    }
    true
}

fn sort(tasks: &mut [Task], mode: SortMode) {
    match mode {
        SortMode::Recent => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::Deadline => tasks.sort_by(|a, b| compare_due_dates(a, b)),
        SortMode::Priority => tasks.sort_by_key(|task| task.priority.rank()),
    }
}

/// Ascending by due date; tasks without one rank after every task that has
/// one, and compare equal among themselves so stability decides.
fn compare_due_dates(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};
    use crate::view::{PriorityFilter, StatusFilter};
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn task(id: i64, title: &str) -> Task {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap() + Duration::minutes(id);
        Task {
            id,
            title: title.to_string(),
            description: None,
            due_date: None,
            priority: Priority::Medium,
            status: Status::Todo,
            category: None,
            created_at: created,
            updated_at: created,
            overdue: false,
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn result_is_a_subsequence_of_the_input() {
        let mut a = task(1, "alpha");
        a.status = Status::Done;
        let b = task(2, "beta");
        let raw = vec![a, b];

        let mut view = ViewState::new();
        view.status_filter = StatusFilter::Only(Status::Todo);
        let filtered = apply(&raw, &view);

        assert!(filtered.iter().all(|t| raw.contains(t)));
        assert_eq!(titles(&filtered), vec!["beta"]);
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let mut report = task(1, "Write REPORT");
        report.description = None;
        let mut notes = task(2, "Sync");
        notes.description = Some(String::from("prepare the report outline"));
        let other = task(3, "Groceries");

        let mut view = ViewState::new();
        view.search_term = String::from("Report");
        let filtered = apply(&[report, notes, other], &view);

        assert_eq!(titles(&filtered).len(), 2);
        assert!(!titles(&filtered).contains(&"Groceries"));
    }

    #[test]
    fn blank_search_term_keeps_everything() {
        let raw = vec![task(1, "one"), task(2, "two")];
        let mut view = ViewState::new();
        view.search_term = String::from("   ");
        assert_eq!(apply(&raw, &view).len(), 2);
    }

    #[test]
    fn overdue_filter_trusts_the_store_flag() {
        let mut flagged = task(1, "flagged");
        flagged.overdue = true;
        // A past due date without the flag must not slip through.
        let mut past_due = task(2, "past due");
        past_due.due_date = Some(Utc.with_ymd_and_hms(2000, 1, 1, 9, 0, 0).unwrap());

        let mut view = ViewState::new();
        view.show_overdue_only = true;
        let filtered = apply(&[flagged, past_due], &view);

        assert_eq!(titles(&filtered), vec!["flagged"]);
    }

    #[test]
    fn active_due_bound_excludes_undated_tasks() {
        let undated = task(1, "undated");
        let mut dated = task(2, "dated");
        dated.due_date = Some(Utc.with_ymd_and_hms(2025, 7, 10, 12, 0, 0).unwrap());

        let mut view = ViewState::new();
        view.due_to = chrono::NaiveDate::from_ymd_opt(2025, 12, 31);
        let filtered = apply(&[undated, dated], &view);

        assert_eq!(titles(&filtered), vec!["dated"]);
    }

    #[test]
    fn deadline_sort_puts_undated_tasks_last() {
        let mut soon = task(1, "soon");
        soon.due_date = Some(Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap());
        let mut later = task(2, "later");
        later.due_date = Some(Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap());
        let undated = task(3, "undated");

        let mut view = ViewState::new();
        view.sort_by = SortMode::Deadline;
        let filtered = apply(&[undated, later, soon], &view);

        assert_eq!(titles(&filtered), vec!["soon", "later", "undated"]);
    }

    #[test]
    fn recent_sort_is_newest_first() {
        let raw = vec![task(1, "oldest"), task(2, "middle"), task(3, "newest")];
        let view = ViewState::new();
        assert_eq!(titles(&apply(&raw, &view)), vec!["newest", "middle", "oldest"]);
    }

    #[rstest]
    #[case(SortMode::Recent)]
    #[case(SortMode::Deadline)]
    #[case(SortMode::Priority)]
    fn sorting_is_deterministic_for_fixed_inputs(#[case] mode: SortMode) {
        let mut a = task(1, "a");
        a.priority = Priority::High;
        let mut b = task(2, "b");
        b.priority = Priority::High;
        let c = task(3, "c");
        let raw = vec![a, b, c];

        let mut view = ViewState::new();
        view.sort_by = mode;
        let first = apply(&raw, &view);
        let second = apply(&raw, &view);
        assert_eq!(first, second);
    }

    #[test]
    fn priority_sort_never_puts_lower_urgency_first() {
        let mut low = task(1, "low");
        low.priority = Priority::Low;
        let mut high = task(2, "high");
        high.priority = Priority::High;
        let mut medium = task(3, "medium");
        medium.priority = Priority::Medium;

        let mut view = ViewState::new();
        view.sort_by = SortMode::Priority;
        let filtered = apply(&[low, high, medium], &view);

        assert_eq!(titles(&filtered), vec!["high", "medium", "low"]);
    }

    #[test]
    fn priority_ties_keep_filtered_order() {
        let first = task(1, "first");
        let second = task(2, "second");
        let mut view = ViewState::new();
        view.sort_by = SortMode::Priority;
        assert_eq!(titles(&apply(&[first, second], &view)), vec!["first", "second"]);
    }

    #[test]
    fn board_scenario_with_three_tasks() {
        let now = Utc::now();
        let mut milk = task(1, "Buy milk");
        milk.status = Status::Todo;
        milk.priority = Priority::High;
        milk.due_date = Some(now - Duration::days(1));
        milk.overdue = true;

        let mut report = task(2, "Write report");
        report.status = Status::InProgress;
        report.priority = Priority::Medium;
        report.due_date = Some(now + Duration::days(1));

        let mut archive = task(3, "Archive");
        archive.status = Status::Done;
        archive.priority = Priority::Low;

        let raw = vec![milk, report, archive];

        let mut view = ViewState::new();
        view.sort_by = SortMode::Priority;
        assert_eq!(
            titles(&apply(&raw, &view)),
            vec!["Buy milk", "Write report", "Archive"]
        );

        view.show_overdue_only = true;
        assert_eq!(titles(&apply(&raw, &view)), vec!["Buy milk"]);
    }

    #[test]
    fn stages_are_conjunctive() {
        let mut hit = task(1, "pay rent");
        hit.priority = Priority::High;
        hit.status = Status::Todo;
        let mut wrong_priority = task(2, "pay rent");
        wrong_priority.priority = Priority::Low;
        let mut wrong_title = task(3, "water plants");
        wrong_title.priority = Priority::High;

        let mut view = ViewState::new();
        view.search_term = String::from("rent");
        view.priority_filter = PriorityFilter::Only(Priority::High);
        let filtered = apply(&[hit, wrong_priority, wrong_title], &view);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }
}
