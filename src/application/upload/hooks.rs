// SPDX-License-Identifier: MPL-2.0
//! The collaborators an uploader is wired to.

use crate::application::port::{BeforeUpload, DeleteGuard, SharedUploader};
use std::fmt;
use std::sync::Arc;

/// What happens when the user asks to delete an item.
#[derive(Clone, Default)]
pub enum OnDelete {
    /// Remove right away.
    #[default]
    Immediate,
    /// Ask with the built-in confirmation dialog.
    Dialog,
    /// Ask an external guard and wait for its answer.
    Guard(Arc<dyn DeleteGuard>),
}

impl fmt::Debug for OnDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnDelete::Immediate => write!(f, "Immediate"),
            OnDelete::Dialog => write!(f, "Dialog"),
            OnDelete::Guard(_) => write!(f, "Guard(..)"),
        }
    }
}

/// Upload function plus the optional validation and deletion hooks.
#[derive(Clone)]
pub struct Hooks {
    pub uploader: SharedUploader,
    pub before_upload: Option<Arc<dyn BeforeUpload>>,
    pub on_delete: OnDelete,
}

impl Hooks {
    pub fn new(uploader: SharedUploader) -> Self {
        Self {
            uploader,
            before_upload: None,
            on_delete: OnDelete::Immediate,
        }
    }

    #[must_use]
    pub fn with_before_upload(mut self, hook: impl BeforeUpload + 'static) -> Self {
        self.before_upload = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn with_on_delete(mut self, on_delete: OnDelete) -> Self {
        self.on_delete = on_delete;
        self
    }

    /// Shorthand for [`OnDelete::Guard`].
    #[must_use]
    pub fn with_delete_guard(self, guard: impl DeleteGuard + 'static) -> Self {
        self.with_on_delete(OnDelete::Guard(Arc::new(guard)))
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_upload", &self.before_upload.is_some())
            .field("on_delete", &self.on_delete)
            .finish_non_exhaustive()
    }
}
