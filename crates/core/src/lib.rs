pub mod board;
pub mod calendar;
pub mod config;
pub mod database;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod session;
pub mod summary;
pub mod view;

pub use board::BoardState;
pub use calendar::DayCell;
pub use config::AppConfig;
pub use database::Database;
pub use error::{StoreError, StoreResult};
pub use model::*;
pub use session::{Session, User};
pub use summary::Upcoming;
pub use view::{PriorityFilter, SortMode, StatusFilter, ViewMode, ViewState};
