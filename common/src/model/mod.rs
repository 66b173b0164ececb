pub mod bast;
pub mod checklist;
pub mod page;
pub mod personnel;
pub mod station;
