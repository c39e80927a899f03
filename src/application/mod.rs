// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions for the collaborators the uploader talks to
//!   (upload function, validation hook, deletion confirmation)
//! - [`upload`]: The upload queue manager and the upload task runner
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer (`ui::image_uploader`) drives the queue through
//!   explicit method calls and never mutates items directly

pub mod port;
pub mod upload;
