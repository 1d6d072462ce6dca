use iced::alignment::Horizontal;
use iced::widget::{
    button, column, container, horizontal_space, row, stack, text, text_input, vertical_space,
    Space,
};
use iced::{font, keyboard, window};
use iced::{Color, ContentFit, Element, Font, Length, Size, Subscription, Task, Theme};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use meme_me::config::Config;
use meme_me::error::EditorError;
use meme_me::platform;
use meme_me::render::compositor::Compositor;
use meme_me::render::font::CaptionFont;
use meme_me::state::data::{AccessStatus, CaptionSlot, ImageSourceKind, PickOutcome, ShareOutcome};
use meme_me::state::editor::{Editor, SourceStep};

/// Main application state
struct MemeMe {
    /// Captions, photo, export gate and presentation slot
    editor: Editor,
    /// Flattens the scene when sharing
    compositor: Compositor,
    /// Session answers to "may we access your photos?"
    access: platform::access::AccessLedger,
    /// Where pickers and the save dialog open
    start_dir: Option<PathBuf>,
    /// Toolbar colour from the config
    chrome_color: Color,
    /// GPU handle for the loaded photo
    preview: Option<iced::widget::image::Handle>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User tapped the album or camera button
    PickImage(ImageSourceKind),
    /// The access prompt was answered
    AccessResolved(ImageSourceKind, AccessStatus),
    /// The settings prompt was answered (YES = true)
    SettingsAnswered(ImageSourceKind, bool),
    /// The picker closed
    ImagePicked(PickOutcome),
    /// User tapped a caption
    BeginEditing(CaptionSlot),
    /// User typed into the focused caption
    CaptionChanged(CaptionSlot, String),
    /// Return pressed or focus lost
    EndEditing,
    /// User tapped "Share"
    Share,
    /// The save dialog closed
    ShareFinished(ShareOutcome),
    /// User tapped "Cancel"
    Reset,
    /// Window resized or rotated
    WindowResized(window::Id, Size),
    /// The display reported its scale factor
    ScaleFactorChanged(f32),
}

impl MemeMe {
    /// Create a new instance of the application
    fn new(config: Config) -> (Self, Task<Message>) {
        let font = match CaptionFont::discover(&config.caption) {
            Ok(font) => {
                tracing::info!(path = %font.path().display(), "caption font loaded");
                Some(font)
            }
            Err(e) => {
                tracing::warn!("{e}; captions cannot be exported until a font is configured");
                None
            }
        };

        let [r, g, b, a] = config.scene.chrome_color;
        let app = MemeMe {
            editor: Editor::new(&config, platform::access::camera_available()),
            compositor: Compositor::new(config.caption.clone(), font),
            access: platform::access::AccessLedger::default(),
            start_dir: config.export_dir(),
            chrome_color: Color::from_rgba8(r, g, b, a as f32 / 255.0),
            preview: None,
            status: String::from("Pick a photo to get started."),
        };

        let scale = window::get_oldest()
            .and_then(window::get_scale_factor)
            .map(Message::ScaleFactorChanged);

        (app, scale)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage(kind) => {
                let status = self.access.status(kind);
                match self.editor.request_image(kind, status) {
                    Ok(step) => self.present(step),
                    Err(e) => self.report(e),
                }
            }
            Message::AccessResolved(kind, status) => {
                self.access.record(kind, status);
                match self.editor.access_resolved(kind, status) {
                    Ok(step) => self.present(step),
                    Err(e) => self.report(e),
                }
            }
            Message::SettingsAnswered(kind, open) => {
                self.editor.settings_prompt_dismissed();
                if open {
                    // Desktop "settings" is our own ledger: ask again next time
                    self.access.forget(kind);
                    self.status = format!("Access to the {kind} will be requested again.");
                }
                Task::none()
            }
            Message::ImagePicked(outcome) => {
                match self.editor.image_picked(outcome) {
                    Ok(()) => {
                        self.preview = self.editor.background().map(|photo| {
                            iced::widget::image::Handle::from_rgba(
                                photo.width(),
                                photo.height(),
                                photo.as_raw().clone(),
                            )
                        });
                        self.status = String::from("Tap a caption to edit it.");
                    }
                    Err(EditorError::PickerCancelled) => {}
                    Err(e) => {
                        return self.report(e);
                    }
                }
                Task::none()
            }
            Message::BeginEditing(slot) => {
                self.editor.begin_editing(slot);
                text_input::focus(caption_id(slot))
            }
            Message::CaptionChanged(slot, value) => {
                self.editor.edit_caption(slot, &value);
                Task::none()
            }
            Message::EndEditing => {
                self.editor.end_editing();
                Task::none()
            }
            Message::Share => match self.editor.begin_share(&self.compositor) {
                Ok(memed) => Task::perform(
                    platform::share::share(memed, self.start_dir.clone()),
                    Message::ShareFinished,
                ),
                Err(e) => self.report(e),
            },
            Message::ShareFinished(outcome) => {
                let failure = match &outcome {
                    ShareOutcome::Failed(reason) => Some(reason.clone()),
                    _ => None,
                };
                if let Some(meme) = self.editor.share_finished(outcome) {
                    self.status = format!("✅ Saved \"{} / {}\".", meme.top_text(), meme.bottom_text());
                } else if let Some(reason) = failure {
                    self.status = format!("⚠️ {reason}");
                }
                Task::none()
            }
            Message::Reset => {
                self.editor.reset();
                self.preview = None;
                self.status = String::from("Pick a photo to get started.");
                Task::none()
            }
            Message::WindowResized(id, size) => {
                self.editor.resize(size.width, size.height);
                // The window may have moved to a display with another scale
                window::get_scale_factor(id).map(Message::ScaleFactorChanged)
            }
            Message::ScaleFactorChanged(scale) => {
                self.editor.set_scale(scale);
                Task::none()
            }
        }
    }

    /// Start whatever dialog the editor asked for
    fn present(&self, step: SourceStep) -> Task<Message> {
        match step {
            SourceStep::RequestAccess(kind) => Task::perform(
                platform::access::request_access(kind),
                move |status| Message::AccessResolved(kind, status),
            ),
            SourceStep::PresentPicker(kind) => Task::perform(
                platform::picker::pick_image(kind, self.start_dir.clone()),
                Message::ImagePicked,
            ),
            SourceStep::ShowSettingsPrompt(prompt) => {
                let kind = prompt.source;
                Task::perform(
                    platform::access::show_settings_prompt(prompt),
                    move |open| Message::SettingsAnswered(kind, open),
                )
            }
        }
    }

    /// Log an editor error and show it in the status line
    fn report(&mut self, error: EditorError) -> Task<Message> {
        match &error {
            EditorError::PickerCancelled | EditorError::PresentationInProgress => {
                tracing::debug!("{error}");
            }
            _ => {
                tracing::warn!("{error}");
                self.status = format!("⚠️ {error}");
            }
        }
        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let idle = !self.editor.is_presenting();
        let toolbar_height = self.editor.metrics().toolbar_height;

        let top_bar = row![
            button("Share").on_press_maybe(
                (idle && self.editor.can_export()).then_some(Message::Share)
            ),
            horizontal_space(),
            button("Cancel").on_press(Message::Reset),
        ]
        .padding(8)
        .align_y(iced::Alignment::Center);

        let bottom_bar = row![
            horizontal_space(),
            button("Camera").on_press_maybe(
                self.editor
                    .can_pick_from(ImageSourceKind::Camera)
                    .then_some(Message::PickImage(ImageSourceKind::Camera))
            ),
            button("Album").on_press_maybe(
                self.editor
                    .can_pick_from(ImageSourceKind::Library)
                    .then_some(Message::PickImage(ImageSourceKind::Library))
            ),
            horizontal_space(),
        ]
        .spacing(40)
        .padding(8)
        .align_y(iced::Alignment::Center);

        let photo: Element<Message> = match &self.preview {
            Some(handle) => iced::widget::image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => Space::new(Length::Fill, Length::Fill).into(),
        };

        let backdrop = container(photo)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Color::BLACK.into()),
                ..container::Style::default()
            });

        let overlay = column![
            self.toolbar(top_bar.into(), toolbar_height),
            self.caption(CaptionSlot::Top),
            vertical_space(),
            text(&self.status).size(14).color(Color::from_rgb8(180, 180, 180)),
            self.caption(CaptionSlot::Bottom),
            self.toolbar(bottom_bar.into(), toolbar_height),
        ]
        .spacing(16)
        .align_x(iced::Alignment::Center);

        stack![backdrop, overlay].into()
    }

    fn toolbar<'a>(&self, content: Element<'a, Message>, height: f32) -> Element<'a, Message> {
        let chrome = self.chrome_color;
        container(content)
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .style(move |_theme| container::Style {
                background: Some(chrome.into()),
                ..container::Style::default()
            })
            .into()
    }

    /// A caption: a tappable label, or a text input while being edited
    fn caption(&self, slot: CaptionSlot) -> Element<Message> {
        let captions = self.editor.captions();
        let size = self.compositor.style().font_size;
        let caption_font = Font {
            weight: font::Weight::Black,
            ..Font::DEFAULT
        };

        if captions.is_editing(slot) {
            return text_input("", captions.text(slot))
                .id(caption_id(slot))
                .on_input(move |value| Message::CaptionChanged(slot, value))
                .on_submit(Message::EndEditing)
                .font(caption_font)
                .size(size)
                .padding(4)
                .into();
        }

        button(
            text(captions.text(slot))
                .size(size)
                .font(caption_font)
                .color(Color::WHITE)
                .width(Length::Fill)
                .align_x(Horizontal::Center),
        )
        .style(button::text)
        .width(Length::Fill)
        .on_press(Message::BeginEditing(slot))
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::resize_events().map(|(id, size)| Message::WindowResized(id, size)),
            keyboard::on_key_press(|key, _modifiers| match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::EndEditing),
                _ => None,
            }),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn caption_id(slot: CaptionSlot) -> text_input::Id {
    match slot {
        CaptionSlot::Top => text_input::Id::new("top-caption"),
        CaptionSlot::Bottom => text_input::Id::new("bottom-caption"),
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("meme_me=info")),
        )
        .init();

    let config = Config::load();
    let window_size = Size::new(config.scene.width, config.scene.height);

    iced::application("MemeMe", MemeMe::update, MemeMe::view)
        .theme(MemeMe::theme)
        .subscription(MemeMe::subscription)
        .window_size(window_size)
        .centered()
        .run_with(move || MemeMe::new(config))
}
