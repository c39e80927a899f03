// SPDX-License-Identifier: MPL-2.0
//! Upload task runner.
//!
//! The runner turns pending items into independent upload jobs and applies
//! their outcomes back to the queue. It does not own an executor: the
//! presentation layer wraps each [`run`] future in an Iced `Task`, and
//! tests simply await them.

use super::queue::{Completion, UploadQueue};
use crate::application::port::{SharedUploader, UploadError, UploadResponse};
use crate::domain::upload::{ItemId, SelectedFile};

/// One upload to perform.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub id: ItemId,
    pub file: SelectedFile,
}

/// Result of a finished job, ready to be applied to the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub id: ItemId,
    pub result: Result<UploadResponse, UploadError>,
}

/// Starts every pending item and returns one job per item.
pub fn dispatch(queue: &mut UploadQueue) -> Vec<UploadJob> {
    queue
        .start_pending()
        .into_iter()
        .map(|(id, file)| UploadJob { id, file })
        .collect()
}

/// Performs a single upload.
pub async fn run(uploader: SharedUploader, job: UploadJob) -> JobOutcome {
    let UploadJob { id, file } = job;
    tracing::debug!(item = id.value(), file = file.name(), size = file.size(), "upload started");
    let result = uploader.upload(file).await;
    JobOutcome { id, result }
}

/// Applies a finished job to the queue, logging failures.
pub fn apply(queue: &mut UploadQueue, outcome: JobOutcome) -> Completion {
    let JobOutcome { id, result } = outcome;
    if let Err(err) = &result {
        tracing::warn!(item = id.value(), error = %err, "upload failed");
    }
    let completion = queue.complete(id, result);
    if completion == Completion::Ignored {
        tracing::debug!(item = id.value(), "upload finished for an item no longer uploading");
    }
    completion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::upload::Options;
    use crate::domain::upload::ItemStatus;
    use std::sync::Arc;
    use std::time::Duration;

    /// Succeeds after a short delay, a longer one for `slow*` files.
    fn delayed_uploader() -> SharedUploader {
        Arc::new(|file: SelectedFile| async move {
            let delay = if file.name().starts_with("slow") { 60 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(UploadResponse::new(format!("file:///uploads/{}", file.name())))
        })
    }

    fn failing_uploader() -> SharedUploader {
        Arc::new(|_file: SelectedFile| async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Err(UploadError::Other("Fail to upload".into()))
        })
    }

    #[test]
    fn dispatch_marks_items_uploading() {
        let mut queue = UploadQueue::with_value(&Options::default(), ["https://cdn/a.png"]);
        queue.select(vec![SelectedFile::new("hello.png", b"hello".to_vec())], None);

        let jobs = dispatch(&mut queue);
        assert_eq!(jobs.len(), 1);
        assert_eq!(queue.items()[0].status(), ItemStatus::Done);
        assert_eq!(queue.items()[1].status(), ItemStatus::Uploading);
    }

    #[tokio::test]
    async fn concurrent_uploads_complete_out_of_order() {
        let options = Options::default().multiple(true);
        let mut queue = UploadQueue::new(&options);
        queue.select(
            vec![
                SelectedFile::new("slow.png", vec![1u8]),
                SelectedFile::new("fast.png", vec![2u8]),
            ],
            None,
        );
        let uploader = delayed_uploader();
        let jobs = dispatch(&mut queue);

        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| tokio::spawn(run(uploader.clone(), job)))
            .collect();

        // Apply in the reverse of dispatch order.
        let mut finished = Vec::new();
        for handle in handles {
            finished.push(handle.await.unwrap());
        }
        finished.reverse();
        for outcome in finished {
            assert_eq!(apply(&mut queue, outcome), Completion::Done);
        }

        assert_eq!(queue.count_with_status(ItemStatus::Done), 2);
        assert_eq!(queue.items()[0].url(), Some("file:///uploads/slow.png"));
        assert_eq!(queue.items()[1].url(), Some("file:///uploads/fast.png"));
    }

    #[tokio::test]
    async fn failing_uploader_marks_items_failed() {
        let mut queue = UploadQueue::new(&Options::default());
        queue.select(vec![SelectedFile::new("hello.png", vec![1u8])], None);
        let uploader = failing_uploader();

        for job in dispatch(&mut queue) {
            let outcome = run(uploader.clone(), job).await;
            assert_eq!(apply(&mut queue, outcome), Completion::Failed);
        }
        assert_eq!(queue.count_with_status(ItemStatus::Failed), 1);
    }

    #[tokio::test]
    async fn failing_uploader_without_show_failed_empties_queue() {
        let mut queue = UploadQueue::new(&Options::default().show_failed(false));
        queue.select(vec![SelectedFile::new("hello.png", vec![1u8])], None);
        let uploader = failing_uploader();

        for job in dispatch(&mut queue) {
            let outcome = run(uploader.clone(), job).await;
            assert_eq!(apply(&mut queue, outcome), Completion::Dropped);
        }
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn late_result_for_removed_item_is_ignored() {
        let mut queue = UploadQueue::new(&Options::default());
        queue.select(vec![SelectedFile::new("hello.png", vec![1u8])], None);
        let job = dispatch(&mut queue).remove(0);
        let id = job.id;

        let pending = tokio::spawn(run(delayed_uploader(), job));
        queue.remove(id);
        queue.drain_events();

        let outcome = pending.await.unwrap();
        assert_eq!(apply(&mut queue, outcome), Completion::Ignored);
        assert!(queue.is_empty());
        assert!(queue.drain_events().is_empty());
    }
}
