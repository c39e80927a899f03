// SPDX-License-Identifier: MPL-2.0
//! Deletion confirmation port (`on_delete`).
//!
//! A [`DeleteGuard`] is asked before an item is removed. Resolving with
//! `Ok(())` lets the deletion proceed; an error, or a future that never
//! resolves, cancels it.

use crate::domain::upload::UploadItem;
use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;

/// The guard declined the deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteCancelled;

impl fmt::Display for DeleteCancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deletion cancelled")
    }
}

impl std::error::Error for DeleteCancelled {}

/// Port for asynchronous deletion confirmation.
pub trait DeleteGuard: Send + Sync {
    /// Decides whether `item` may be removed.
    fn confirm(&self, item: &UploadItem) -> BoxFuture<'static, Result<(), DeleteCancelled>>;
}

impl<F, Fut> DeleteGuard for F
where
    F: Fn(&UploadItem) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), DeleteCancelled>> + Send + 'static,
{
    fn confirm(&self, item: &UploadItem) -> BoxFuture<'static, Result<(), DeleteCancelled>> {
        Box::pin(self(item))
    }
}
