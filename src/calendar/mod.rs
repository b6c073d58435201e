pub mod event;
pub mod grid;
pub mod overlap;
pub mod store;

pub use event::CalendarEvent;
pub use grid::DayCell;
pub use store::Store;
