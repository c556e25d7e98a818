//! Sort state types.

use serde::{Deserialize, Serialize};

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// No column sort; rows are ordered by identifier.
    #[default]
    None,
    /// Smallest first.
    #[serde(alias = "asc")]
    Ascending,
    /// Largest first.
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// Next direction in the header-click cycle `none → asc → desc → none`.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::None => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::None,
        }
    }
}

/// The column and direction the display order currently follows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Column last sorted by.
    pub column: Option<String>,
    /// Direction of the sort.
    pub direction: SortDirection,
}

impl SortState {
    /// Returns the sort column when a directional sort is active.
    #[must_use]
    pub fn active_column(&self) -> Option<&str> {
        match self.direction {
            SortDirection::None => None,
            SortDirection::Ascending | SortDirection::Descending => self.column.as_deref(),
        }
    }

    /// Returns `true` once any sort has been applied, including `none`.
    ///
    /// A `none` sort still fixes the display order to identifier order.
    #[must_use]
    pub const fn in_effect(&self) -> bool {
        self.column.is_some()
    }

    /// Direction shown for `column` in a header (none unless it is the active column).
    #[must_use]
    pub fn direction_for(&self, column: &str) -> SortDirection {
        if self.active_column() == Some(column) {
            self.direction
        } else {
            SortDirection::None
        }
    }
}
