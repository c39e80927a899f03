// SPDX-License-Identifier: MPL-2.0
//! Image uploader component encapsulating state, update logic and view.

use super::cell::{self, CellKind, ItemCell, Overlay};
use super::{dialog, preview, styles};
use crate::app::config::SPINNER_TICK_MS;
use crate::app::i18n::I18n;
use crate::application::port::{DeleteCancelled, Rejection, UploadError};
use crate::application::upload::options::{MAX_COLUMNS, MIN_COLUMNS};
use crate::application::upload::{
    runner, Completion, Hooks, JobOutcome, OnDelete, Options, QueueEvent, UploadQueue,
};
use crate::domain::upload::{ItemId, ItemStatus, SelectedFile, UploadItem};
use crate::error::Error;
use crate::infrastructure::files::{self, ReadBatch};
use crate::infrastructure::images;
use crate::infrastructure::{ImageLoader, LoadedImage};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::widgets::{Rotation, Spinner};
use iced::widget::{button, container, image, mouse_area, text, Column, Container, Row, Stack};
use iced::{alignment, event, keyboard, mouse, ContentFit, Element, Length, Subscription, Task};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Messages handled by the uploader.
#[derive(Debug, Clone)]
pub enum Message {
    /// The add cell was pressed; opens the native picker.
    AddPressed,
    FilesRead(ReadBatch),
    FilesSelected(Vec<SelectedFile>),
    UploadFinished(JobOutcome),
    ImageLoaded(ItemId, Result<LoadedImage, Error>),
    CellPressed(ItemId),
    DeletePressed(ItemId),
    /// Answer of an external delete guard.
    DeleteResolved(ItemId, Result<(), DeleteCancelled>),
    Dialog(dialog::Message),
    Preview(preview::Message),
    SpinnerTick,
    EscapePressed,
}

/// Notifications for the host application.
#[derive(Debug, Clone)]
pub enum Event {
    /// Any change of the item list; carries the full snapshot.
    QueueChanged(Vec<UploadItem>),
    /// The done items changed; carries the new value.
    ValueChanged(Vec<UploadItem>),
    /// Files dropped because of `max_count`.
    CountExceeded(usize),
    Rejected {
        file_name: String,
        reason: Rejection,
    },
    UploadFailed {
        label: String,
        error: UploadError,
    },
    /// A picked or dropped path could not be read.
    ReadFailed {
        path: PathBuf,
        error: Error,
    },
    /// A done cell was pressed while `notify_preview` is on.
    Preview {
        index: usize,
        item: UploadItem,
    },
}

impl From<QueueEvent> for Event {
    fn from(event: QueueEvent) -> Self {
        match event {
            QueueEvent::Changed(items) => Event::QueueChanged(items),
            QueueEvent::ValueChanged(items) => Event::ValueChanged(items),
            QueueEvent::CountExceeded(dropped) => Event::CountExceeded(dropped),
            QueueEvent::Rejected { file_name, reason } => Event::Rejected { file_name, reason },
        }
    }
}

/// Decoded image of an item.
#[derive(Debug, Clone)]
enum ImageSlot {
    Loading,
    Ready(LoadedImage),
    Broken,
}

/// Wraps the default cell of an item.
pub type RenderItem<'a> = dyn Fn(Element<'a, Message>, &UploadItem) -> Element<'a, Message> + 'a;

/// Environment information required to render the uploader.
pub struct ViewEnv<'a> {
    pub i18n: &'a I18n,
    pub render_item: Option<&'a RenderItem<'a>>,
    /// Replaces the content of the add cell.
    pub upload_button: Option<Element<'a, Message>>,
}

impl<'a> ViewEnv<'a> {
    pub fn new(i18n: &'a I18n) -> Self {
        Self {
            i18n,
            render_item: None,
            upload_button: None,
        }
    }
}

/// Complete uploader state.
pub struct State {
    queue: UploadQueue,
    options: Options,
    hooks: Hooks,
    images: HashMap<ItemId, ImageSlot>,
    loader: Option<ImageLoader>,
    pending_delete: Option<ItemId>,
    preview: Option<preview::State>,
    rotation: Rotation,
}

impl State {
    /// Creates the uploader with already uploaded `value` URLs.
    ///
    /// The returned task loads their thumbnails.
    pub fn new<I, S>(options: Options, hooks: Hooks, value: I) -> (Self, Task<Message>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let loader = match ImageLoader::new() {
            Ok(loader) => Some(loader),
            Err(err) => {
                tracing::warn!(error = %err, "remote thumbnails disabled");
                None
            }
        };

        let mut state = Self {
            queue: UploadQueue::with_value(&options, value),
            options,
            hooks,
            images: HashMap::new(),
            loader,
            pending_delete: None,
            preview: None,
            rotation: Rotation::default(),
        };
        let task = state.load_missing_images();
        (state, task)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn items(&self) -> &[UploadItem] {
        self.queue.items()
    }

    /// The done items.
    pub fn value(&self) -> Vec<UploadItem> {
        self.queue.value()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Index of the previewed item among the done items.
    pub fn preview_index(&self) -> Option<usize> {
        self.preview.map(preview::State::index)
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn has_image(&self, id: ItemId) -> bool {
        matches!(self.images.get(&id), Some(ImageSlot::Ready(_)))
    }

    // =========================================================================
    // Host operations
    // =========================================================================

    /// Applies new options.
    pub fn set_options(&mut self, options: Options) -> Vec<Event> {
        self.queue.set_options(&options);
        self.options = options;
        self.forget_removed();
        self.drain_events()
    }

    /// Replaces the done items, keeping in-flight and failed ones.
    pub fn set_value<I, S>(&mut self, urls: I) -> (Vec<Event>, Task<Message>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue.set_value(urls);
        self.forget_removed();
        let task = self.load_missing_images();
        (self.drain_events(), task)
    }

    /// Reads `paths` (drag and drop, command line) and adds them.
    pub fn add_paths(&self, paths: Vec<PathBuf>) -> Task<Message> {
        if paths.is_empty() {
            return Task::none();
        }
        Task::perform(files::read_selected_files(paths), Message::FilesRead)
    }

    /// Adds files as if the user had picked them, and starts their uploads.
    pub fn add_files(&mut self, files: Vec<SelectedFile>) -> (Vec<Event>, Task<Message>) {
        if self.options.disable_upload {
            tracing::debug!(count = files.len(), "upload disabled, selection ignored");
            return (Vec::new(), Task::none());
        }

        let selection = self
            .queue
            .select(files, self.hooks.before_upload.as_deref());
        tracing::debug!(
            admitted = selection.admitted.len(),
            rejected = selection.rejected,
            exceeded = selection.exceeded,
            ignored = selection.ignored,
            "files selected"
        );

        let thumbnails = self.decode_selected(&selection.admitted);
        let uploads = self.start_uploads();
        self.forget_removed();
        (self.drain_events(), Task::batch([thumbnails, uploads]))
    }

    // =========================================================================
    // Update
    // =========================================================================

    pub fn update(&mut self, message: Message) -> (Vec<Event>, Task<Message>) {
        match message {
            Message::AddPressed => {
                if self.options.disable_upload || self.queue.is_full() {
                    return (Vec::new(), Task::none());
                }
                let multiple = self.options.multiple;
                let task = Task::perform(
                    async move { files::read_selected_files(files::pick_files(multiple).await).await },
                    Message::FilesRead,
                );
                (Vec::new(), task)
            }
            Message::FilesRead(batch) => self.files_read(batch),
            Message::FilesSelected(files) => self.add_files(files),
            Message::UploadFinished(outcome) => (self.upload_finished(outcome), Task::none()),
            Message::ImageLoaded(id, result) => {
                self.image_loaded(id, result);
                (Vec::new(), Task::none())
            }
            Message::CellPressed(id) => (self.cell_pressed(id), Task::none()),
            Message::DeletePressed(id) => self.delete_pressed(id),
            Message::DeleteResolved(id, Ok(())) => (self.remove(id), Task::none()),
            Message::DeleteResolved(id, Err(DeleteCancelled)) => {
                tracing::debug!(item = id.value(), "deletion cancelled");
                (Vec::new(), Task::none())
            }
            Message::Dialog(dialog::Message::Confirm) => match self.pending_delete.take() {
                Some(id) => (self.remove(id), Task::none()),
                None => (Vec::new(), Task::none()),
            },
            Message::Dialog(dialog::Message::Cancel) => {
                self.pending_delete = None;
                (Vec::new(), Task::none())
            }
            Message::Preview(message) => {
                let total = self.queue.count_with_status(ItemStatus::Done);
                if self
                    .preview
                    .as_mut()
                    .is_some_and(|state| !state.update(message, total))
                {
                    self.preview = None;
                }
                (Vec::new(), Task::none())
            }
            Message::SpinnerTick => {
                self.rotation.advance();
                (Vec::new(), Task::none())
            }
            Message::EscapePressed => {
                // The preview sits above the dialog.
                if self.preview.take().is_none() {
                    self.pending_delete = None;
                }
                (Vec::new(), Task::none())
            }
        }
    }

    fn files_read(&mut self, batch: ReadBatch) -> (Vec<Event>, Task<Message>) {
        let ReadBatch { files, failed } = batch;
        let mut events: Vec<Event> = failed
            .into_iter()
            .map(|(path, error)| Event::ReadFailed { path, error })
            .collect();

        // A cancelled picker leaves the queue untouched.
        if files.is_empty() {
            return (events, Task::none());
        }

        let (added, task) = self.add_files(files);
        events.extend(added);
        (events, task)
    }

    fn upload_finished(&mut self, outcome: JobOutcome) -> Vec<Event> {
        let label = self
            .queue
            .get(outcome.id)
            .map(|item| item.label().to_string());
        let error = outcome.result.as_ref().err().cloned();

        let completion = runner::apply(&mut self.queue, outcome);
        self.forget_removed();

        let mut events = self.drain_events();
        if matches!(completion, Completion::Failed | Completion::Dropped) {
            if let (Some(label), Some(error)) = (label, error) {
                events.push(Event::UploadFailed { label, error });
            }
        }
        events
    }

    fn image_loaded(&mut self, id: ItemId, result: Result<LoadedImage, Error>) {
        if self.queue.get(id).is_none() {
            return;
        }
        let slot = match result {
            Ok(image) => ImageSlot::Ready(image),
            Err(err) => {
                tracing::warn!(item = id.value(), error = %err, "cannot load thumbnail");
                ImageSlot::Broken
            }
        };
        self.images.insert(id, slot);
    }

    fn cell_pressed(&mut self, id: ItemId) -> Vec<Event> {
        let done: Vec<&UploadItem> = self
            .queue
            .items()
            .iter()
            .filter(|item| item.is_done())
            .collect();
        let Some(index) = done.iter().position(|item| item.id() == id) else {
            return Vec::new();
        };
        let item = done[index].clone();
        let total = done.len();

        if self.options.preview {
            self.preview = Some(preview::State::new(index, total));
        }
        if self.options.notify_preview {
            vec![Event::Preview { index, item }]
        } else {
            Vec::new()
        }
    }

    fn delete_pressed(&mut self, id: ItemId) -> (Vec<Event>, Task<Message>) {
        if !self.options.deletable || self.queue.get(id).is_none() {
            return (Vec::new(), Task::none());
        }

        match self.hooks.on_delete.clone() {
            OnDelete::Immediate => (self.remove(id), Task::none()),
            OnDelete::Dialog => {
                self.pending_delete = Some(id);
                (Vec::new(), Task::none())
            }
            OnDelete::Guard(guard) => {
                let Some(item) = self.queue.get(id) else {
                    return (Vec::new(), Task::none());
                };
                let confirmation = guard.confirm(item);
                let task = Task::perform(confirmation, move |result| {
                    Message::DeleteResolved(id, result)
                });
                (Vec::new(), task)
            }
        }
    }

    fn remove(&mut self, id: ItemId) -> Vec<Event> {
        if let Some(item) = self.queue.remove(id) {
            tracing::debug!(item = id.value(), label = item.label(), "item removed");
        }
        self.forget_removed();
        self.drain_events()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn drain_events(&mut self) -> Vec<Event> {
        self.queue
            .drain_events()
            .into_iter()
            .map(Event::from)
            .collect()
    }

    /// Releases images of removed items and closes overlays pointing at them.
    fn forget_removed(&mut self) {
        let queue = &self.queue;
        self.images.retain(|id, _| queue.get(*id).is_some());

        if self.pending_delete.is_some_and(|id| queue.get(id).is_none()) {
            self.pending_delete = None;
        }

        let total = queue.count_with_status(ItemStatus::Done);
        if self
            .preview
            .as_mut()
            .is_some_and(|state| !state.clamp(total))
        {
            self.preview = None;
        }
    }

    fn start_uploads(&mut self) -> Task<Message> {
        let jobs = runner::dispatch(&mut self.queue);
        let uploader = &self.hooks.uploader;
        Task::batch(jobs.into_iter().map(|job| {
            Task::perform(
                runner::run(Arc::clone(uploader), job),
                Message::UploadFinished,
            )
        }))
    }

    /// Decodes thumbnails of freshly selected files from their bytes.
    fn decode_selected(&mut self, admitted: &[ItemId]) -> Task<Message> {
        let mut tasks = Vec::with_capacity(admitted.len());
        for &id in admitted {
            let Some(file) = self.queue.get(id).and_then(UploadItem::file) else {
                continue;
            };
            let bytes = Arc::clone(file.bytes());
            self.images.insert(id, ImageSlot::Loading);
            tasks.push(Task::perform(
                images::decode_in_background(bytes),
                move |result| Message::ImageLoaded(id, result),
            ));
        }
        Task::batch(tasks)
    }

    /// Fetches thumbnails of done items that have none yet.
    fn load_missing_images(&mut self) -> Task<Message> {
        let Some(loader) = &self.loader else {
            return Task::none();
        };

        let mut tasks = Vec::new();
        for item in self.queue.items() {
            let id = item.id();
            let Some(url) = item.url() else {
                continue;
            };
            if self.images.contains_key(&id) {
                continue;
            }
            self.images.insert(id, ImageSlot::Loading);
            let loader = loader.clone();
            let url = url.to_string();
            tasks.push(Task::perform(
                async move { loader.load(url).await },
                move |result| Message::ImageLoaded(id, result),
            ));
        }
        Task::batch(tasks)
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Spinner animation while uploading, Escape while an overlay is open.
    pub fn subscription(&self) -> Subscription<Message> {
        let uploading = self.options.show_upload
            && self.queue.items().iter().any(|item| {
                matches!(item.status(), ItemStatus::Pending | ItemStatus::Uploading)
            });
        let spinner = if uploading {
            iced::time::every(Duration::from_millis(SPINNER_TICK_MS))
                .map(|_| Message::SpinnerTick)
        } else {
            Subscription::none()
        };

        let escape = if self.preview.is_some() || self.pending_delete.is_some() {
            event::listen_with(|event, _status, _window| match event {
                event::Event::Keyboard(keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::Escape),
                    ..
                }) => Some(Message::EscapePressed),
                _ => None,
            })
        } else {
            Subscription::none()
        };

        Subscription::batch([spinner, escape])
    }

    // =========================================================================
    // View
    // =========================================================================

    pub fn view<'a>(&'a self, env: ViewEnv<'a>) -> Element<'a, Message> {
        let ViewEnv {
            i18n,
            render_item,
            mut upload_button,
        } = env;
        let items = self.queue.items();
        let columns = self.options.columns.clamp(MIN_COLUMNS, MAX_COLUMNS);

        let mut grid = Column::new().spacing(spacing::XS);
        let mut row = Row::new().spacing(spacing::XS);
        let mut in_row = 0;
        for cell in cell::project(items, &self.options) {
            let element = match cell {
                CellKind::Item(cell) => {
                    let item = &items[cell.index];
                    let element = self.view_item(cell, item, i18n);
                    match render_item {
                        Some(wrap) => wrap(element, item),
                        None => element,
                    }
                }
                CellKind::Add => view_add_cell(upload_button.take(), i18n),
            };
            row = row.push(element);
            in_row += 1;
            if in_row == columns {
                grid = grid.push(row);
                row = Row::new().spacing(spacing::XS);
                in_row = 0;
            }
        }
        if in_row > 0 {
            grid = grid.push(row);
        }

        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(
                Container::new(grid)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .padding(spacing::MD),
            );

        if self.pending_delete.is_some() {
            layers = layers.push(dialog::view(i18n).map(Message::Dialog));
        }

        if let Some(state) = self.preview {
            let done: Vec<&UploadItem> = items.iter().filter(|item| item.is_done()).collect();
            let handle = done
                .get(state.index())
                .and_then(|item| match self.images.get(&item.id()) {
                    Some(ImageSlot::Ready(image)) => Some(&image.full),
                    _ => None,
                });
            let ctx = preview::ViewContext {
                i18n,
                state,
                total: done.len(),
                handle,
            };
            layers = layers.push(preview::view(ctx).map(Message::Preview));
        }

        layers.into()
    }

    fn view_item<'a>(
        &'a self,
        cell: ItemCell,
        item: &'a UploadItem,
        i18n: &'a I18n,
    ) -> Element<'a, Message> {
        let thumbnail: Element<'a, Message> = match self.images.get(&cell.id) {
            Some(ImageSlot::Ready(loaded)) => image(loaded.thumbnail.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            Some(ImageSlot::Loading | ImageSlot::Broken) | None => text(item.label())
                .size(typography::CAPTION)
                .width(Length::Fill)
                .height(Length::Fill)
                .center()
                .into(),
        };

        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(thumbnail);
        match cell.overlay {
            Overlay::Uploading => {
                let spinner = Spinner::new(palette::WHITE, self.rotation, sizing::SPINNER);
                layers = layers.push(mask(
                    Column::new()
                        .spacing(spacing::XXS)
                        .align_x(alignment::Horizontal::Center)
                        .push(spinner.into_element::<Message>())
                        .push(text(i18n.tr("uploader-uploading")).size(typography::CAPTION)),
                ));
            }
            Overlay::Failed => {
                layers = layers.push(mask(
                    Column::new()
                        .spacing(spacing::XXS)
                        .align_x(alignment::Horizontal::Center)
                        .push(text("!").size(typography::GLYPH))
                        .push(text(i18n.tr("uploader-failed")).size(typography::CAPTION)),
                ));
            }
            Overlay::None => {}
        }

        let framed = Container::new(layers)
            .width(Length::Fixed(sizing::CELL))
            .height(Length::Fixed(sizing::CELL))
            .clip(true)
            .style(styles::cell(cell.status == ItemStatus::Failed));

        let body: Element<'a, Message> = if cell.preview_index.is_some() {
            mouse_area(framed)
                .on_press(Message::CellPressed(cell.id))
                .interaction(mouse::Interaction::Pointer)
                .into()
        } else {
            framed.into()
        };

        if !cell.deletable {
            return body;
        }

        let badge = button(
            text("×")
                .size(typography::CAPTION)
                .width(Length::Fill)
                .height(Length::Fill)
                .center(),
        )
        .width(Length::Fixed(sizing::DELETE_BADGE))
        .height(Length::Fixed(sizing::DELETE_BADGE))
        .padding(0)
        .style(styles::delete_badge)
        .on_press(Message::DeletePressed(cell.id));

        Stack::new()
            .push(body)
            .push(
                Container::new(badge)
                    .width(Length::Fixed(sizing::CELL))
                    .padding(spacing::XXS)
                    .align_x(alignment::Horizontal::Right),
            )
            .into()
    }
}

fn mask<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .center(Length::Fill)
        .style(styles::mask)
        .into()
}

fn view_add_cell<'a>(content: Option<Element<'a, Message>>, i18n: &'a I18n) -> Element<'a, Message> {
    let content = content.unwrap_or_else(|| {
        Column::new()
            .spacing(spacing::XXS)
            .align_x(alignment::Horizontal::Center)
            .push(text("+").size(typography::GLYPH))
            .push(text(i18n.tr("uploader-add")).size(typography::CAPTION))
            .into()
    });

    button(container(content).center(Length::Fill))
        .width(Length::Fixed(sizing::CELL))
        .height(Length::Fixed(sizing::CELL))
        .padding(0)
        .style(styles::add_cell)
        .on_press(Message::AddPressed)
        .into()
}
