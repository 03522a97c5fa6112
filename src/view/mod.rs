pub mod agenda;
pub mod month;
pub mod week;

pub use month::MonthLayout;
pub use week::WeekLayout;
