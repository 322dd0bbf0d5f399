use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);

pub(crate) const STATUS_ENTER_SEARCH: &str =
    "Search titles and descriptions — Enter to keep, Esc to clear";
pub(crate) const STATUS_FILTER_PICKER: &str =
    "Filter picker — ←/→ column • ↑/↓ move • Space select • C resets • Enter apply • Esc cancel";
pub(crate) const STATUS_FORM: &str =
    "Tab/Shift+Tab move between fields • ←/→ cycle choices • Enter save • Esc cancel";
pub(crate) const STATUS_REFRESHED: &str = "Refreshed tasks";
pub(crate) const STATUS_VIEW_DETAILS: &str = "Viewing task details • Enter/Esc to close";
pub(crate) const STATUS_DAY_DETAIL: &str =
    "Everything due this day, filters ignored • Enter/Esc to close";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
pub(crate) const STATUS_CONFIRM_DELETE: &str =
    "Confirm deletion — arrows choose, Enter confirms, Esc cancels";
