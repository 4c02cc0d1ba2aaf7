//! Data models for the portfolio catalog.

mod category;
mod project;

pub use category::Category;
pub use project::{Field, Project};

/// Direction of a one-step reorder, in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the front of the list
    Back,
    /// Toward the end of the list
    Forward,
}

impl Direction {
    /// The index offset this direction represents.
    pub fn offset(&self) -> isize {
        match self {
            Direction::Back => -1,
            Direction::Forward => 1,
        }
    }
}
