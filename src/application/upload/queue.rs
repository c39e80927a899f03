// SPDX-License-Identifier: MPL-2.0
//! Upload queue manager.
//!
//! The `UploadQueue` owns the ordered list of items and is the only place
//! that mutates them. Every mutation records a [`QueueEvent::Changed`]
//! snapshot in an outbox that the presentation layer drains after each
//! update, so observers see exactly one notification per mutation.

use super::Options;
use crate::application::port::{BeforeUpload, Rejection, UploadError, UploadResponse};
use crate::domain::upload::{ItemId, ItemStatus, SelectedFile, UploadItem};

/// Notifications produced by queue mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    /// The list changed; carries the full new snapshot.
    Changed(Vec<UploadItem>),
    /// The set of done items changed; carries only the done items.
    ValueChanged(Vec<UploadItem>),
    /// A selection went past `max_count`; carries the number of dropped files.
    CountExceeded(usize),
    /// The validation hook kept a file out.
    Rejected { file_name: String, reason: Rejection },
}

/// Outcome of a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Items created for the admitted files, in selection order.
    pub admitted: Vec<ItemId>,
    /// Files refused by the validation hook.
    pub rejected: usize,
    /// Files dropped because of `max_count`.
    pub exceeded: usize,
    /// Extra files ignored because `multiple` is off.
    pub ignored: usize,
}

/// What applying an upload result did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The item is now done.
    Done,
    /// The item is now failed and stays visible.
    Failed,
    /// The item failed and was removed (`show_failed` is off).
    Dropped,
    /// The item is gone or was not uploading; nothing changed.
    Ignored,
}

/// Ordered list of upload items plus the rules that govern it.
#[derive(Debug, Default)]
pub struct UploadQueue {
    items: Vec<UploadItem>,
    multiple: bool,
    max_count: Option<usize>,
    show_failed: bool,
    events: Vec<QueueEvent>,
}

impl UploadQueue {
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            items: Vec::new(),
            multiple: options.multiple,
            max_count: options.max_count,
            show_failed: options.show_failed,
            events: Vec::new(),
        }
    }

    /// Creates a queue seeded with already uploaded items.
    #[must_use]
    pub fn with_value<I, S>(options: &Options, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue = Self::new(options);
        queue.items = urls.into_iter().map(UploadItem::done).collect();
        queue
    }

    /// Applies new options. Turning `show_failed` off drops failed items.
    pub fn set_options(&mut self, options: &Options) {
        self.multiple = options.multiple;
        self.max_count = options.max_count;
        self.show_failed = options.show_failed;
        if self.sweep_failed() {
            self.notify_changed();
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[must_use]
    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&UploadItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// The done items, i.e. the uploader's value.
    #[must_use]
    pub fn value(&self) -> Vec<UploadItem> {
        self.items.iter().filter(|item| item.is_done()).cloned().collect()
    }

    /// How many more items fit, or `None` without a cap.
    #[must_use]
    pub fn remaining_capacity(&self) -> Option<usize> {
        self.max_count
            .map(|max| max.saturating_sub(self.items.len()))
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.remaining_capacity() == Some(0)
    }

    #[must_use]
    pub fn count_with_status(&self, status: ItemStatus) -> usize {
        self.items.iter().filter(|item| item.status() == status).count()
    }

    /// Takes the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<QueueEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a user selection to the queue.
    ///
    /// Files go through `before_upload` first, then the count cap. Without
    /// `multiple` only the first file of the selection is considered.
    /// Admitted files become `Pending` items appended at the end.
    pub fn select(
        &mut self,
        mut files: Vec<SelectedFile>,
        before_upload: Option<&dyn BeforeUpload>,
    ) -> Selection {
        let mut selection = Selection::default();

        if !self.multiple && files.len() > 1 {
            selection.ignored = files.len() - 1;
            files.truncate(1);
        }

        let mut accepted = Vec::with_capacity(files.len());
        for file in files {
            let Some(hook) = before_upload else {
                accepted.push(file);
                continue;
            };
            let file_name = file.name().to_string();
            match hook.check(file, &self.items) {
                Ok(file) => accepted.push(file),
                Err(reason) => {
                    selection.rejected += 1;
                    self.events.push(QueueEvent::Rejected { file_name, reason });
                }
            }
        }

        // Failed items left over from earlier selections never count.
        let swept = self.sweep_failed();

        if let Some(max) = self.max_count {
            let allowed = max.saturating_sub(self.items.len()).min(accepted.len());
            let dropped = accepted.len() - allowed;
            if dropped > 0 {
                accepted.truncate(allowed);
                selection.exceeded = dropped;
                self.events.push(QueueEvent::CountExceeded(dropped));
            }
        }

        for file in accepted {
            let item = UploadItem::pending(file);
            selection.admitted.push(item.id());
            self.items.push(item);
        }

        if swept || !selection.admitted.is_empty() {
            self.notify_changed();
        }
        selection
    }

    /// Moves every pending item to `Uploading` and hands out their files.
    pub fn start_pending(&mut self) -> Vec<(ItemId, SelectedFile)> {
        let started: Vec<(ItemId, SelectedFile)> = self
            .items
            .iter_mut()
            .filter_map(|item| item.start().map(|file| (item.id(), file)))
            .collect();
        if !started.is_empty() {
            self.notify_changed();
        }
        started
    }

    /// Applies the outcome of an upload to its item.
    ///
    /// Results for items that were removed meanwhile, or that are not
    /// uploading, are ignored and produce no event.
    pub fn complete(
        &mut self,
        id: ItemId,
        result: Result<UploadResponse, UploadError>,
    ) -> Completion {
        let Some(index) = self.position(id) else {
            return Completion::Ignored;
        };
        if self.items[index].status() != ItemStatus::Uploading {
            return Completion::Ignored;
        }

        match result {
            Ok(response) => {
                self.items[index].succeed(response.url);
                self.notify_changed();
                self.notify_value_changed();
                Completion::Done
            }
            Err(_) if self.show_failed => {
                self.items[index].fail();
                self.notify_changed();
                Completion::Failed
            }
            Err(_) => {
                self.items.remove(index);
                self.notify_changed();
                Completion::Dropped
            }
        }
    }

    /// Removes an item. Returns it if it was present.
    pub fn remove(&mut self, id: ItemId) -> Option<UploadItem> {
        let index = self.position(id)?;
        let item = self.items.remove(index);
        self.notify_changed();
        if item.is_done() {
            self.notify_value_changed();
        }
        Some(item)
    }

    /// Replaces the done items with `urls`, keeping in-flight and failed
    /// items after them. Items whose URL is unchanged keep their id.
    pub fn set_value<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (mut previous, others): (Vec<UploadItem>, Vec<UploadItem>) =
            std::mem::take(&mut self.items)
                .into_iter()
                .partition(UploadItem::is_done);

        let mut items: Vec<UploadItem> = urls
            .into_iter()
            .map(Into::into)
            .map(|url: String| {
                match previous.iter().position(|item| item.url() == Some(url.as_str())) {
                    Some(index) => previous.remove(index),
                    None => UploadItem::done(url),
                }
            })
            .collect();
        items.extend(others);
        self.items = items;
        self.notify_changed();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Drops failed items when they must not be shown. Returns whether
    /// anything was removed.
    fn sweep_failed(&mut self) -> bool {
        if self.show_failed {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| !item.is_failed());
        self.items.len() != before
    }

    fn notify_changed(&mut self) {
        self.events.push(QueueEvent::Changed(self.items.clone()));
    }

    fn notify_value_changed(&mut self) {
        self.events.push(QueueEvent::ValueChanged(self.value()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::MaxFileSize;

    const DEMO_SRC: &str = "https://images.example.com/photo-1567945716310.jpg";

    fn file(name: &str) -> SelectedFile {
        SelectedFile::new(name, name.as_bytes().to_vec())
    }

    fn files(names: &[&str]) -> Vec<SelectedFile> {
        names.iter().map(|name| file(name)).collect()
    }

    fn changed_count(events: &[QueueEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, QueueEvent::Changed(_)))
            .count()
    }

    fn upload_all(queue: &mut UploadQueue) -> Vec<ItemId> {
        queue.start_pending().into_iter().map(|(id, _)| id).collect()
    }

    #[test]
    fn with_value_seeds_done_items() {
        let queue = UploadQueue::with_value(&Options::default(), [DEMO_SRC]);
        assert_eq!(queue.len(), 1);
        assert!(queue.items()[0].is_done());
        assert_eq!(queue.value().len(), 1);
    }

    #[test]
    fn select_appends_pending_items_and_notifies_once() {
        let mut queue = UploadQueue::with_value(&Options::default(), [DEMO_SRC]);
        let selection = queue.select(files(&["hello.png"]), None);

        assert_eq!(selection.admitted.len(), 1);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.items()[1].status(), ItemStatus::Pending);

        let events = queue.drain_events();
        assert_eq!(changed_count(&events), 1);
        assert!(queue.drain_events().is_empty());
    }

    #[test]
    fn single_mode_keeps_only_first_file_of_a_selection() {
        let mut queue = UploadQueue::new(&Options::default());
        let selection = queue.select(files(&["one.png", "two.png"]), None);

        assert_eq!(selection.admitted.len(), 1);
        assert_eq!(selection.ignored, 1);
        assert_eq!(queue.items()[0].label(), "one.png");

        // A later selection still appends.
        queue.select(files(&["three.png"]), None);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn rejected_files_never_enter_the_queue() {
        let mut queue = UploadQueue::with_value(&Options::default(), [DEMO_SRC]);
        let hook = MaxFileSize(4);
        let selection = queue.select(files(&["hello.png"]), Some(&hook));

        assert!(selection.admitted.is_empty());
        assert_eq!(selection.rejected, 1);
        assert_eq!(queue.len(), 1);

        let events = queue.drain_events();
        assert_eq!(changed_count(&events), 0);
        assert!(matches!(
            &events[0],
            QueueEvent::Rejected { file_name, reason: Rejection::TooLarge { .. } }
                if file_name == "hello.png"
        ));
    }

    #[test]
    fn count_cap_reports_dropped_files() {
        let options = Options::default().multiple(true).max_count(3);
        let mut queue = UploadQueue::new(&options);
        let selection = queue.select(files(&["a.png", "b.png", "c.png", "d.png"]), None);

        assert_eq!(selection.admitted.len(), 3);
        assert_eq!(selection.exceeded, 1);
        assert!(queue.is_full());

        let exceeded: Vec<usize> = queue
            .drain_events()
            .into_iter()
            .filter_map(|event| match event {
                QueueEvent::CountExceeded(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(exceeded, vec![1]);
    }

    #[test]
    fn count_cap_accounts_for_existing_items() {
        let options = Options::default().multiple(true).max_count(3);
        let mut queue = UploadQueue::with_value(&options, [DEMO_SRC]);
        let selection = queue.select(files(&["one.png", "two.png", "three.png"]), None);

        assert_eq!(selection.admitted.len(), 2);
        assert_eq!(selection.exceeded, 1);
        assert_eq!(queue.remaining_capacity(), Some(0));
    }

    #[test]
    fn full_queue_admits_nothing_and_does_not_notify_change() {
        let options = Options::default().multiple(true).max_count(1);
        let mut queue = UploadQueue::with_value(&options, [DEMO_SRC]);
        let selection = queue.select(files(&["a.png", "b.png"]), None);

        assert!(selection.admitted.is_empty());
        assert_eq!(selection.exceeded, 2);
        let events = queue.drain_events();
        assert_eq!(events, vec![QueueEvent::CountExceeded(2)]);
    }

    #[test]
    fn start_pending_moves_items_to_uploading() {
        let mut queue = UploadQueue::with_value(&Options::default(), [DEMO_SRC]);
        queue.select(files(&["hello.png"]), None);
        queue.drain_events();

        let started = queue.start_pending();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].1.name(), "hello.png");
        assert_eq!(queue.count_with_status(ItemStatus::Uploading), 1);
        assert_eq!(queue.count_with_status(ItemStatus::Done), 1);
        assert_eq!(changed_count(&queue.drain_events()), 1);

        // Nothing left to start.
        assert!(queue.start_pending().is_empty());
        assert!(queue.drain_events().is_empty());
    }

    #[test]
    fn successful_upload_stores_url_and_updates_value() {
        let mut queue = UploadQueue::new(&Options::default());
        queue.select(files(&["hello.png"]), None);
        let id = upload_all(&mut queue)[0];
        queue.drain_events();

        let completion = queue.complete(id, Ok(UploadResponse::new("file:///up/hello.png")));
        assert_eq!(completion, Completion::Done);

        let item = queue.get(id).unwrap();
        assert!(item.is_done());
        assert!(item.file().is_none());

        let events = queue.drain_events();
        assert_eq!(changed_count(&events), 1);
        assert!(matches!(&events[1], QueueEvent::ValueChanged(value) if value.len() == 1));
    }

    #[test]
    fn failed_upload_is_shown_when_show_failed() {
        let mut queue = UploadQueue::new(&Options::default());
        queue.select(files(&["hello.png"]), None);
        let id = upload_all(&mut queue)[0];

        let completion = queue.complete(id, Err(UploadError::Other("Fail to upload".into())));
        assert_eq!(completion, Completion::Failed);
        assert!(queue.get(id).unwrap().is_failed());
        assert!(queue.get(id).unwrap().url().is_none());
    }

    #[test]
    fn failed_upload_is_dropped_when_not_show_failed() {
        let options = Options::default().max_count(2).show_failed(false);
        let mut queue = UploadQueue::with_value(&options, [DEMO_SRC]);
        queue.select(files(&["hello.png"]), None);
        let id = upload_all(&mut queue)[0];
        queue.drain_events();

        let completion = queue.complete(id, Err(UploadError::Status(500)));
        assert_eq!(completion, Completion::Dropped);
        assert!(queue.get(id).is_none());
        assert_eq!(changed_count(&queue.drain_events()), 1);

        // The failure does not eat into the cap.
        assert_eq!(queue.remaining_capacity(), Some(1));
        assert!(!queue.is_full());
    }

    #[test]
    fn repeated_failing_selections_do_not_accumulate() {
        let options = Options::default().show_failed(false);
        let mut queue = UploadQueue::new(&options);

        for round in 0..3 {
            let name = format!("round-{round}.png");
            queue.select(vec![file(&name)], None);
            let ids = upload_all(&mut queue);
            assert_eq!(queue.len(), 1);
            for id in ids {
                queue.complete(id, Err(UploadError::Other("Fail to upload".into())));
            }
            assert!(queue.is_empty());
        }
    }

    #[test]
    fn turning_off_show_failed_sweeps_failed_items() {
        let mut queue = UploadQueue::new(&Options::default());
        queue.select(files(&["hello.png"]), None);
        let id = upload_all(&mut queue)[0];
        queue.complete(id, Err(UploadError::Status(500)));
        queue.drain_events();

        queue.set_options(&Options::default().show_failed(false));
        assert!(queue.is_empty());
        assert_eq!(changed_count(&queue.drain_events()), 1);
    }

    #[test]
    fn late_completion_after_removal_is_a_no_op() {
        let mut queue = UploadQueue::new(&Options::default());
        queue.select(files(&["hello.png"]), None);
        let id = upload_all(&mut queue)[0];
        queue.remove(id);
        queue.drain_events();

        let completion = queue.complete(id, Ok(UploadResponse::new("file:///late.png")));
        assert_eq!(completion, Completion::Ignored);
        assert!(queue.is_empty());
        assert!(queue.drain_events().is_empty());
    }

    #[test]
    fn completions_in_any_order_are_all_applied() {
        let options = Options::default().multiple(true);
        let mut queue = UploadQueue::new(&options);
        queue.select(files(&["a.png", "b.png"]), None);
        let ids = upload_all(&mut queue);

        queue.complete(ids[1], Err(UploadError::Status(502)));
        queue.complete(ids[0], Ok(UploadResponse::new("file:///a.png")));

        assert!(queue.get(ids[0]).unwrap().is_done());
        assert!(queue.get(ids[1]).unwrap().is_failed());
        assert_eq!(queue.items()[0].id(), ids[0]);
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut queue = UploadQueue::new(&Options::default());
        queue.select(files(&["hello.png"]), None);
        let id = upload_all(&mut queue)[0];

        assert_eq!(queue.complete(id, Ok(UploadResponse::new("u"))), Completion::Done);
        assert_eq!(queue.complete(id, Err(UploadError::Status(500))), Completion::Ignored);
        assert!(queue.get(id).unwrap().is_done());
    }

    #[test]
    fn remove_done_item_updates_value() {
        let mut queue = UploadQueue::with_value(&Options::default(), [DEMO_SRC]);
        let id = queue.items()[0].id();

        let removed = queue.remove(id).expect("item should be removed");
        assert_eq!(removed.url(), Some(DEMO_SRC));
        assert!(queue.is_empty());

        let events = queue.drain_events();
        assert_eq!(changed_count(&events), 1);
        assert!(matches!(&events[1], QueueEvent::ValueChanged(value) if value.is_empty()));
        assert!(queue.remove(id).is_none());
    }

    #[test]
    fn set_value_keeps_ids_of_unchanged_urls_and_in_flight_items() {
        let mut queue = UploadQueue::with_value(&Options::default(), ["a", "b"]);
        let id_b = queue.items()[1].id();
        queue.select(files(&["c.png"]), None);
        upload_all(&mut queue);

        queue.set_value(["b", "z"]);
        let labels: Vec<&str> = queue.items().iter().map(UploadItem::label).collect();
        assert_eq!(labels, vec!["b", "z", "c.png"]);
        assert_eq!(queue.items()[0].id(), id_b);
        assert_eq!(queue.count_with_status(ItemStatus::Uploading), 1);
    }
}
