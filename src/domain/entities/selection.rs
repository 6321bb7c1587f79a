//! Picker selection modes.

/// How many images a pick request may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Exactly one image.
    #[default]
    Single,
    /// Up to `max_selection` images; [`SelectionMode::UNLIMITED`] means no limit.
    Multiple {
        /// Maximum number of images.
        max_selection: usize,
    },
}

impl SelectionMode {
    /// Sentinel for an unlimited multiple selection.
    pub const UNLIMITED: usize = 0;

    /// Multiple selection without a limit.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self::Multiple {
            max_selection: Self::UNLIMITED,
        }
    }

    /// Returns the maximum number of items, or None when unlimited.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        match self {
            Self::Single => Some(1),
            Self::Multiple { max_selection } if *max_selection == Self::UNLIMITED => None,
            Self::Multiple { max_selection } => Some(*max_selection),
        }
    }

    /// Truncates a candidate list to the allowed size.
    pub fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if let Some(limit) = self.limit() {
            items.truncate(limit);
        }
        items
    }
}
