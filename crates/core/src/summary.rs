//! Fixed global summaries over the raw snapshot: the bounded "upcoming"
//! strip and the aggregate counts. Both ignore the view filters entirely.

use crate::model::{Status, Task, TaskStats};

/// Cap on the upcoming strip; displayed as two columns of two.
const UPCOMING_LIMIT: usize = 4;

/// The next few dated, unfinished tasks plus an overall progress figure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Upcoming {
    pub tasks: Vec<Task>,
    /// Percent of the eligible (dated, not-done) tasks already in progress,
    /// rounded to the nearest integer. Zero when nothing is eligible.
    pub progress: u8,
}

impl Upcoming {
    /// First column of the two-column layout.
    pub fn left(&self) -> &[Task] {
        &self.tasks[..self.tasks.len().min(2)]
    }

    /// Second column of the two-column layout.
    pub fn right(&self) -> &[Task] {
        if self.tasks.len() > 2 {
            &self.tasks[2..]
        } else {
            &[]
        }
    }
}

/// Select tasks that have a due date and are still open, order them by due
/// date ascending, and keep the first four.
pub fn upcoming(tasks: &[Task]) -> Upcoming {
    let mut eligible: Vec<&Task> = tasks
        .iter()
        .filter(|task| {
            task.due_date.is_some() && matches!(task.status, Status::Todo | Status::InProgress)
        })
        .collect();
    eligible.sort_by_key(|task| task.due_date);

    let in_progress = eligible
        .iter()
        .filter(|task| task.status == Status::InProgress)
        .count();
    let progress = if eligible.is_empty() {
        0
    } else {
        ((100.0 * in_progress as f64) / eligible.len() as f64).round() as u8
    };

    Upcoming {
        tasks: eligible
            .into_iter()
            .take(UPCOMING_LIMIT)
            .cloned()
            .collect(),
        progress,
    }
}

/// Counts by predicate over the full collection. The overdue count trusts
/// the store-supplied flag; it is never rederived from dates here.
pub fn stats(tasks: &[Task]) -> TaskStats {
    let mut counts = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };
    for task in tasks {
        match task.status {
            Status::Todo => counts.todo += 1,
            Status::InProgress => counts.in_progress += 1,
            Status::Done => counts.done += 1,
        }
        if task.overdue {
            counts.overdue += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn task(id: i64, status: Status, due_in_days: Option<i64>) -> Task {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        Task {
            id,
            title: format!("task-{id}"),
            description: None,
            due_date: due_in_days.map(|days| base + Duration::days(days)),
            priority: Priority::Medium,
            status,
            category: None,
            created_at: base,
            updated_at: base,
            overdue: false,
        }
    }

    #[test]
    fn upcoming_skips_done_and_undated_tasks() {
        let raw = vec![
            task(1, Status::Done, Some(1)),
            task(2, Status::Done, Some(2)),
            task(3, Status::Todo, Some(3)),
            task(4, Status::InProgress, Some(4)),
            task(5, Status::Todo, Some(5)),
            task(6, Status::Todo, Some(6)),
            task(7, Status::Todo, None),
        ];

        let result = upcoming(&raw);
        let ids: Vec<i64> = result.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 4, 5, 6]);
    }

    #[test]
    fn upcoming_splits_two_by_two() {
        let raw = vec![
            task(1, Status::Todo, Some(1)),
            task(2, Status::Todo, Some(2)),
            task(3, Status::Todo, Some(3)),
            task(4, Status::Todo, Some(4)),
        ];
        let result = upcoming(&raw);
        assert_eq!(result.left().iter().map(|t| t.id).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(result.right().iter().map(|t| t.id).collect::<Vec<_>>(), [3, 4]);
    }

    #[test]
    fn upcoming_handles_fewer_than_four() {
        let raw = vec![task(1, Status::Todo, Some(1))];
        let result = upcoming(&raw);
        assert_eq!(result.left().len(), 1);
        assert!(result.right().is_empty());
    }

    #[test]
    fn progress_is_share_of_eligible_tasks_in_progress() {
        let raw = vec![
            task(1, Status::InProgress, Some(1)),
            task(2, Status::Todo, Some(2)),
            task(3, Status::Todo, Some(3)),
        ];
        // 1 of 3 eligible → 33%.
        assert_eq!(upcoming(&raw).progress, 33);
    }

    #[test]
    fn empty_eligible_set_yields_zero_progress() {
        let raw = vec![task(1, Status::Done, Some(1)), task(2, Status::Todo, None)];
        let result = upcoming(&raw);
        assert!(result.tasks.is_empty());
        assert_eq!(result.progress, 0);
    }

    #[test]
    fn stats_counts_every_bucket() {
        let mut flagged = task(1, Status::Todo, Some(-1));
        flagged.overdue = true;
        let raw = vec![
            flagged,
            task(2, Status::InProgress, Some(1)),
            task(3, Status::Done, None),
        ];

        assert_eq!(
            stats(&raw),
            TaskStats {
                total: 3,
                todo: 1,
                in_progress: 1,
                done: 1,
                overdue: 1,
            }
        );
    }

    #[test]
    fn stats_overdue_trusts_the_flag() {
        // Past due but unflagged: the store decides, not us.
        let stale = task(1, Status::Todo, Some(-30));
        assert_eq!(stats(&[stale]).overdue, 0);
    }
}
