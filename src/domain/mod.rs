// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core upload types with ZERO external dependencies.
//!
//! This module contains pure domain types and the per-item state machine.
//! It has no dependencies on external crates (except `std`) so the queue
//! logic can be tested without a renderer or an executor.
//!
//! # Modules
//!
//! - [`upload`]: Upload item types ([`UploadItem`](upload::UploadItem),
//!   [`ItemId`](upload::ItemId), [`ItemStatus`](upload::ItemStatus),
//!   [`SelectedFile`](upload::SelectedFile))

pub mod upload;
