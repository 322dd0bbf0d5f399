//! The add/edit task form: text fields plus two cycled choice rows,
//! validated into a [`TaskRequest`] on save.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

use super::buffer::FieldBuffer;
use crate::model::{Priority, Status, Task, TaskRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Title,
    Description,
    Due,
    Priority,
    Status,
    Category,
}

impl FormField {
    pub(crate) const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Description,
        FormField::Due,
        FormField::Priority,
        FormField::Status,
        FormField::Category,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Due => "Due (YYYY-MM-DD)",
            FormField::Priority => "Priority",
            FormField::Status => "Status",
            FormField::Category => "Category",
        }
    }

    fn index(self) -> usize {
        match self {
            FormField::Title => 0,
            FormField::Description => 1,
            FormField::Due => 2,
            FormField::Priority => 3,
            FormField::Status => 4,
            FormField::Category => 5,
        }
    }

    pub(crate) fn is_text(self) -> bool {
        !matches!(self, FormField::Priority | FormField::Status)
    }
}

#[derive(Debug)]
pub(crate) struct TaskForm {
    pub(crate) editing_id: Option<i64>,
    pub(crate) title: FieldBuffer,
    pub(crate) description: FieldBuffer,
    pub(crate) due: FieldBuffer,
    pub(crate) priority: Priority,
    pub(crate) status: Status,
    pub(crate) category: FieldBuffer,
    pub(crate) focus: FormField,
    pub(crate) error: Option<String>,
}

impl TaskForm {
    pub(crate) fn blank() -> Self {
        Self {
            editing_id: None,
            title: FieldBuffer::new(),
            description: FieldBuffer::new(),
            due: FieldBuffer::new(),
            priority: Priority::default(),
            status: Status::Todo,
            category: FieldBuffer::new(),
            focus: FormField::Title,
            error: None,
        }
    }

    pub(crate) fn edit(task: &Task) -> Self {
        Self {
            editing_id: Some(task.id),
            title: FieldBuffer::from(task.title.clone()),
            description: FieldBuffer::from(task.description.clone().unwrap_or_default()),
            due: FieldBuffer::from(
                task.due_date
                    .map(|due| due.with_timezone(&Local).format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            priority: task.priority,
            status: task.status,
            category: FieldBuffer::from(task.category.clone().unwrap_or_default()),
            focus: FormField::Title,
            error: None,
        }
    }

    pub(crate) fn heading(&self) -> &'static str {
        if self.editing_id.is_some() {
            "Edit Task"
        } else {
            "Add Task"
        }
    }

    pub(crate) fn next_field(&mut self) {
        let next = (self.focus.index() + 1) % FormField::ALL.len();
        self.focus = FormField::ALL[next];
    }

    pub(crate) fn prev_field(&mut self) {
        let idx = self.focus.index();
        let prev = if idx == 0 {
            FormField::ALL.len() - 1
        } else {
            idx - 1
        };
        self.focus = FormField::ALL[prev];
    }

    pub(crate) fn focused_buffer(&mut self) -> Option<&mut FieldBuffer> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Due => Some(&mut self.due),
            FormField::Category => Some(&mut self.category),
            FormField::Priority | FormField::Status => None,
        }
    }

    /// Left/Right on a choice row steps through the variants.
    pub(crate) fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Priority => self.priority = step(&Priority::ALL, self.priority, forward),
            FormField::Status => self.status = step(&Status::ALL, self.status, forward),
            _ => {}
        }
    }

    pub(crate) fn field_text(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.as_str().to_string(),
            FormField::Description => self.description.as_str().to_string(),
            FormField::Due => self.due.as_str().to_string(),
            FormField::Priority => self.priority.label().to_string(),
            FormField::Status => self.status.label().to_string(),
            FormField::Category => self.category.as_str().to_string(),
        }
    }

    pub(crate) fn to_request(&self) -> Result<TaskRequest, String> {
        if self.title.is_blank() {
            return Err(String::from("Title is required"));
        }
        let due_date = parse_due_input(self.due.as_str())?;
        Ok(TaskRequest {
            title: self.title.as_str().trim().to_string(),
            description: optional(self.description.as_str()),
            due_date,
            priority: self.priority,
            status: Some(self.status),
            category: optional(self.category.as_str()),
        })
    }
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn step<T: Copy + PartialEq>(variants: &[T], current: T, forward: bool) -> T {
    let idx = variants
        .iter()
        .position(|candidate| *candidate == current)
        .unwrap_or(0);
    let next = if forward {
        (idx + 1) % variants.len()
    } else if idx == 0 {
        variants.len() - 1
    } else {
        idx - 1
    };
    variants[next]
}

/// Parse the due field: empty means no due date, otherwise a local calendar
/// date anchored at local midnight (noon when midnight does not exist, as
/// happens on some DST switch days).
pub(crate) fn parse_due_input(raw: &str) -> Result<Option<DateTime<Utc>>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| format!("'{trimmed}' is not a date (expected YYYY-MM-DD)"))?;

    let midnight = date.and_time(NaiveTime::MIN);
    let local = match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
            match Local.from_local_datetime(&date.and_time(noon)) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
                LocalResult::None => return Err(format!("'{trimmed}' is not a valid local date")),
            }
        }
    };
    Ok(Some(local.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};
    use pretty_assertions::assert_eq;

    fn sample_task() -> Task {
        let created = Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap();
        Task {
            id: 7,
            title: String::from("Write report"),
            description: Some(String::from("quarterly numbers")),
            due_date: Some(created + chrono::Duration::days(3)),
            priority: Priority::High,
            status: Status::InProgress,
            category: Some(String::from("work")),
            created_at: created,
            updated_at: created,
            overdue: false,
        }
    }

    #[test]
    fn blank_form_requires_a_title() {
        let form = TaskForm::blank();
        assert!(form.to_request().is_err());
    }

    #[test]
    fn edit_form_round_trips_the_task() {
        let task = sample_task();
        let form = TaskForm::edit(&task);
        let request = form.to_request().expect("valid form");

        assert_eq!(request.title, task.title);
        assert_eq!(request.description, task.description);
        assert_eq!(request.priority, task.priority);
        assert_eq!(request.status, Some(task.status));
        assert_eq!(request.category, task.category);
        // The due field holds only a date; the request keeps that local day.
        let local_day = request
            .due_date
            .expect("due date")
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(
            local_day,
            task.due_date.unwrap().with_timezone(&Local).date_naive()
        );
    }

    #[test]
    fn due_input_parses_or_rejects() {
        assert_eq!(parse_due_input("   ").expect("empty is fine"), None);
        assert!(parse_due_input("2025-07-10").expect("valid").is_some());
        assert!(parse_due_input("07/10/2025").is_err());
        assert!(parse_due_input("2025-13-01").is_err());
    }

    #[test]
    fn parsed_due_date_lands_on_the_typed_local_day() {
        let parsed = parse_due_input("2025-07-10")
            .expect("valid")
            .expect("some");
        let local = parsed.with_timezone(&Local).date_naive();
        assert_eq!((local.year(), local.month(), local.day()), (2025, 7, 10));
    }

    #[test]
    fn cycling_choice_rows_wraps() {
        let mut form = TaskForm::blank();
        form.focus = FormField::Priority;
        form.cycle(true);
        assert_eq!(form.priority, Priority::High);
        form.cycle(true);
        assert_eq!(form.priority, Priority::Low);

        form.focus = FormField::Status;
        form.cycle(false);
        assert_eq!(form.status, Status::Done);
    }

    #[test]
    fn field_navigation_wraps_both_ways() {
        let mut form = TaskForm::blank();
        form.prev_field();
        assert_eq!(form.focus, FormField::Category);
        form.next_field();
        assert_eq!(form.focus, FormField::Title);
    }
}
