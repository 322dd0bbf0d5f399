//! Month-grid construction for the calendar view.
//!
//! All date comparisons go through local calendar dates: a task lands in a
//! day cell when its due date's local Y/M/D equals the cell's date. Comparing
//! instants instead would shift tasks across midnight in non-UTC locales.

use chrono::{Datelike, Local, NaiveDate};

use crate::model::Task;

/// One slot in the month grid: a leading blank before the 1st, or a concrete
/// day with the tasks due on it.
#[derive(Debug, Clone, PartialEq)]
pub enum DayCell {
    Blank,
    Day {
        date: NaiveDate,
        day: u32,
        tasks: Vec<Task>,
    },
}

impl DayCell {
    pub fn is_blank(&self) -> bool {
        matches!(self, DayCell::Blank)
    }
}

/// The task's due date as a local calendar date, time-of-day discarded.
pub fn local_due_date(task: &Task) -> Option<NaiveDate> {
    task.due_date
        .map(|due| due.with_timezone(&Local).date_naive())
}

/// First day of a zero-based-month cursor position. `None` only for an
/// out-of-range cursor, which the navigation arithmetic never produces.
pub fn first_of(year: i32, month0: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
}

fn days_in_month(first: NaiveDate) -> u32 {
    // Day before the 1st of the following month is the last valid day.
    let (next_year, next_month0) = if first.month0() == 11 {
        (first.year() + 1, 0)
    } else {
        (first.year(), first.month0() + 1)
    };
    match first_of(next_year, next_month0) {
        Some(next_first) => next_first.pred_opt().map(|d| d.day()).unwrap_or(31),
        None => 31,
    }
}

/// Build the ordered cell sequence for one month: leading blanks up to the
/// weekday of the 1st (Sunday = 0), then one cell per day carrying every task
/// whose due date falls on it.
pub fn build(year: i32, month0: u32, tasks: &[Task]) -> Vec<DayCell> {
    let Some(first) = first_of(year, month0) else {
        return Vec::new();
    };

    let leading = first.weekday().num_days_from_sunday() as usize;
    let day_count = days_in_month(first);

    let mut cells = Vec::with_capacity(leading + day_count as usize);
    cells.extend(std::iter::repeat_with(|| DayCell::Blank).take(leading));

    for day in 1..=day_count {
        let date = first.with_day(day).unwrap_or(first);
        let due_here: Vec<Task> = tasks
            .iter()
            .filter(|task| local_due_date(task) == Some(date))
            .cloned()
            .collect();
        cells.push(DayCell::Day {
            date,
            day,
            tasks: due_here,
        });
    }

    cells
}

/// Tasks due on `date`, regardless of any active filter. The day-detail
/// drill-down intentionally answers from whatever collection the caller
/// passes, which [`crate::board::BoardState`] keeps as the raw snapshot.
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| local_due_date(task) == Some(date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Status};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn task_due_local(id: i64, y: i32, m: u32, d: u32, hour: u32, minute: u32) -> Task {
        let due = Local
            .with_ymd_and_hms(y, m, d, hour, minute, 0)
            .single()
            .expect("unambiguous local time")
            .with_timezone(&Utc);
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Task {
            id,
            title: format!("task-{id}"),
            description: None,
            due_date: Some(due),
            priority: Priority::Medium,
            status: Status::Todo,
            category: None,
            created_at: created,
            updated_at: created,
            overdue: false,
        }
    }

    fn leading_blanks(cells: &[DayCell]) -> usize {
        cells.iter().take_while(|cell| cell.is_blank()).count()
    }

    #[rstest]
    #[case(2025, 0, 3, 31)] // January 2025 starts on a Wednesday
    #[case(2025, 5, 0, 30)] // June 2025 starts on a Sunday
    #[case(2024, 1, 4, 29)] // February 2024, leap year
    #[case(2025, 1, 6, 28)] // February 2025, Saturday start
    fn grid_length_is_blanks_plus_day_count(
        #[case] year: i32,
        #[case] month0: u32,
        #[case] blanks: usize,
        #[case] days: usize,
    ) {
        let cells = build(year, month0, &[]);
        assert_eq!(leading_blanks(&cells), blanks);
        assert_eq!(cells.len(), blanks + days);
    }

    #[test]
    fn wednesday_start_month_has_three_leading_blanks() {
        let cells = build(2025, 0, &[]);
        assert_eq!(leading_blanks(&cells), 3);
    }

    #[test]
    fn tasks_bucket_by_local_calendar_date() {
        // Due times hugging both sides of midnight must stay on their own day
        // no matter which offset the host runs in.
        let late = task_due_local(1, 2025, 7, 10, 23, 30);
        let early = task_due_local(2, 2025, 7, 11, 0, 15);
        let cells = build(2025, 6, &[late, early]);

        let day_tasks = |wanted: u32| -> Vec<i64> {
            cells
                .iter()
                .find_map(|cell| match cell {
                    DayCell::Day { day, tasks, .. } if *day == wanted => {
                        Some(tasks.iter().map(|t| t.id).collect())
                    }
                    _ => None,
                })
                .unwrap()
        };

        assert_eq!(day_tasks(10), vec![1]);
        assert_eq!(day_tasks(11), vec![2]);
        assert_eq!(day_tasks(12), Vec::<i64>::new());
    }

    #[test]
    fn undated_tasks_appear_in_no_cell() {
        let mut undated = task_due_local(1, 2025, 3, 5, 12, 0);
        undated.due_date = None;
        let cells = build(2025, 2, &[undated]);
        let total: usize = cells
            .iter()
            .map(|cell| match cell {
                DayCell::Day { tasks, .. } => tasks.len(),
                DayCell::Blank => 0,
            })
            .sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn day_cells_are_emitted_in_order() {
        let cells = build(2025, 4, &[]);
        let days: Vec<u32> = cells
            .iter()
            .filter_map(|cell| match cell {
                DayCell::Day { day, .. } => Some(*day),
                DayCell::Blank => None,
            })
            .collect();
        let expected: Vec<u32> = (1..=31).collect();
        assert_eq!(days, expected);
    }

    #[test]
    fn tasks_due_on_matches_exact_date() {
        let a = task_due_local(1, 2025, 7, 10, 9, 0);
        let b = task_due_local(2, 2025, 7, 11, 9, 0);
        let date = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        let found = tasks_due_on(&[a, b], date);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }
}
