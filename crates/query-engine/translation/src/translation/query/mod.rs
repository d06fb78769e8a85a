//! Translate read requests into SELECT descriptors.

pub mod accounts;
pub mod availability;
pub mod bookings;
pub mod filtering;
pub mod hotels;
pub mod pagination;
pub mod rewards;
pub mod rooms;
pub mod sorting;

/// What a search descriptor yields when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Sorted, paginated result rows.
    Rows,
    /// A single `count` of every matching result, ignoring sort and pagination.
    Count,
}
