//! Media request/response DTOs.

use bytes::Bytes;

use crate::domain::entities::{FilterKind, ResizeOptions, SelectionMode};

/// Pick request data.
#[derive(Debug, Clone, Copy)]
pub struct PickRequest {
    /// How many images may be picked.
    pub selection: SelectionMode,
    /// Resize parameters applied to every pick.
    pub resize: ResizeOptions,
    /// Filter applied to every pick.
    pub filter: FilterKind,
}

impl PickRequest {
    /// Creates a pick request with default resize options and no filter.
    #[must_use]
    pub fn new(selection: SelectionMode) -> Self {
        Self {
            selection,
            resize: ResizeOptions::default(),
            filter: FilterKind::Default,
        }
    }

    /// Sets the resize options.
    #[must_use]
    pub const fn with_resize(mut self, resize: ResizeOptions) -> Self {
        self.resize = resize;
        self
    }

    /// Sets the filter.
    #[must_use]
    pub const fn with_filter(mut self, filter: FilterKind) -> Self {
        self.filter = filter;
        self
    }
}

/// Pick response data.
#[derive(Debug, Clone, Default)]
pub struct PickResponse {
    /// Encoded images in selection order.
    pub images: Vec<Bytes>,
    /// Number of selected images that produced no output.
    pub dropped: usize,
}

impl PickResponse {
    /// Returns true if nothing was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
