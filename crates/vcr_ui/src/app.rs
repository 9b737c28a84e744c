//! Main application: state, messages, update loop, and views.
//!
//! Layout follows the single-panel design: fake title bar, load button,
//! analog-audio checkbox, CRT status readout, progress bar, and a log
//! panel, preceded by a short splash screen.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use iced::widget::{button, center, checkbox, column, container, progress_bar, row, scrollable, text};
use iced::{Element, Font, Length, Task, Theme};

use vcr_core::config::{ConfigManager, ConfigSection};
use vcr_core::media::{default_output_name, MediaKind};
use vcr_core::models::ConversionRequest;

use crate::theme::{self, colors, font, spacing};
use crate::workers::{self, WorkerEvent};

/// File-dialog filter for loadable media.
const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mkv", "mov", "flv", "webm", "jpg", "jpeg", "png", "bmp", "webp", "tiff", "gif",
];

/// How long the splash screen stays up.
const SPLASH_DURATION: Duration = Duration::from_millis(3500);

/// Upper bound on retained log lines.
const MAX_LOG_LINES: usize = 500;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Splash,
    Main,
}

/// Conversion status shown in the readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ready,
    Processing,
    Done,
}

impl Status {
    fn label(&self) -> &'static str {
        match self {
            Status::Ready => " SYSTEM READY ",
            Status::Processing => " PROCESSING… ",
            Status::Done => " DONE ",
        }
    }
}

/// All possible messages the application can receive.
#[derive(Debug, Clone)]
pub enum Message {
    SplashFinished,
    LoadPressed,
    InputPicked(Option<PathBuf>),
    OutputPicked(PathBuf, Option<PathBuf>),
    AnalogAudioToggled(bool),
    Worker(WorkerEvent),
    OpenOutputFolder,
}

/// Application state.
pub struct App {
    config: Arc<Mutex<ConfigManager>>,
    screen: Screen,
    status: Status,
    analog_audio: bool,
    is_converting: bool,
    progress: f32,
    log_lines: Vec<String>,
    last_output: Option<PathBuf>,
}

impl App {
    pub fn new(config: Arc<Mutex<ConfigManager>>) -> (Self, Task<Message>) {
        let analog_audio = config.lock().unwrap().settings().audio.analog_audio;

        let app = Self {
            config,
            screen: Screen::Splash,
            status: Status::Ready,
            analog_audio,
            is_converting: false,
            progress: 0.0,
            log_lines: Vec::new(),
            last_output: None,
        };

        let splash = Task::perform(tokio::time::sleep(SPLASH_DURATION), |_| {
            Message::SplashFinished
        });

        (app, splash)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SplashFinished => {
                self.screen = Screen::Main;
                Task::none()
            }

            Message::LoadPressed => {
                if self.is_converting {
                    return Task::none();
                }
                let start_dir = self.last_dir(|paths| paths.last_input_dir.clone());
                Task::perform(pick_input(start_dir), Message::InputPicked)
            }

            Message::InputPicked(None) => Task::none(),

            Message::InputPicked(Some(input)) => {
                self.remember_dir(&input, true);
                let start_dir = self.last_dir(|paths| {
                    if paths.last_output_dir.is_empty() {
                        paths.output_folder.clone()
                    } else {
                        paths.last_output_dir.clone()
                    }
                });
                Task::perform(pick_output(input, start_dir), |(input, output)| {
                    Message::OutputPicked(input, output)
                })
            }

            Message::OutputPicked(_, None) => Task::none(),

            Message::OutputPicked(input, Some(output)) => {
                self.remember_dir(&output, false);
                self.start_conversion(input, output)
            }

            Message::AnalogAudioToggled(value) => {
                self.analog_audio = value;
                let mut cfg = self.config.lock().unwrap();
                cfg.settings_mut().audio.analog_audio = value;
                if let Err(e) = cfg.update_section(ConfigSection::Audio) {
                    tracing::warn!("Failed to persist audio setting: {}", e);
                }
                Task::none()
            }

            Message::Worker(WorkerEvent::Log(line)) => {
                self.push_log(line);
                Task::none()
            }

            Message::Worker(WorkerEvent::Progress { percent, .. }) => {
                self.progress = percent as f32 / 100.0;
                Task::none()
            }

            Message::Worker(WorkerEvent::Finished { output_path }) => {
                self.is_converting = false;
                self.status = Status::Done;
                self.progress = 1.0;
                self.push_log(format!("Output: {}", output_path.display()));
                workers::open_containing_folder(&output_path);
                self.last_output = Some(output_path);
                Task::none()
            }

            Message::OpenOutputFolder => {
                if let Some(path) = &self.last_output {
                    workers::open_containing_folder(path);
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match self.screen {
            Screen::Splash => self.splash_view(),
            Screen::Main => self.main_view(),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::root)
            .into()
    }

    fn splash_view(&self) -> Element<'_, Message> {
        let content = column![
            text("VCR MANAGER")
                .size(font::TITLE)
                .font(Font::MONOSPACE)
                .color(colors::PHOSPHOR),
            text("Universal Edition")
                .size(font::NORMAL)
                .color(colors::TEXT_SECONDARY),
            text("LOADING…")
                .size(font::SMALL)
                .font(Font::MONOSPACE)
                .color(colors::TEXT_MUTED),
        ]
        .spacing(spacing::MD)
        .align_x(iced::Alignment::Center);

        center(content).into()
    }

    fn main_view(&self) -> Element<'_, Message> {
        let title_bar = container(
            text(" VCR_MANAGER.EXE ")
                .size(font::LG)
                .font(Font::MONOSPACE),
        )
        .style(theme::title_bar)
        .width(Length::Fill)
        .padding([spacing::XS, spacing::SM]);

        let load_label = if self.is_converting {
            "CONVERTING…"
        } else {
            "LOAD MEDIA FILE"
        };
        let load_button = button(text(load_label).size(font::NORMAL))
            .on_press_maybe((!self.is_converting).then_some(Message::LoadPressed))
            .style(theme::load_button)
            .padding([spacing::SM, spacing::LG]);

        let audio_toggle = checkbox(self.analog_audio)
            .label("ANALOG AUDIO")
            .on_toggle(Message::AnalogAudioToggled)
            .text_size(font::NORMAL);

        let open_folder = button(text("OPEN OUTPUT FOLDER").size(font::SMALL))
            .on_press_maybe(self.last_output.is_some().then_some(Message::OpenOutputFolder))
            .style(theme::secondary_button)
            .padding([spacing::XS, spacing::SM]);

        let panel = container(
            column![
                title_bar,
                column![
                    load_button,
                    audio_toggle,
                    row![open_folder].width(Length::Fill),
                ]
                .spacing(spacing::SM)
                .padding(spacing::MD),
            ],
        )
        .style(theme::panel)
        .width(Length::Fill);

        let status = container(
            text(self.status.label())
                .size(font::NORMAL)
                .font(Font::MONOSPACE),
        )
        .style(theme::status_readout)
        .width(Length::Fill)
        .padding(spacing::SM);

        let progress = progress_bar(0.0..=1.0, self.progress);

        let log_panel = container(
            scrollable(
                column(
                    self.log_lines
                        .iter()
                        .map(|line| {
                            text(line.as_str())
                                .size(font::SMALL)
                                .font(Font::MONOSPACE)
                                .color(colors::TEXT_SECONDARY)
                                .into()
                        }),
                )
                .spacing(2),
            )
            .anchor_bottom()
            .width(Length::Fill)
            .height(Length::Fill),
        )
        .style(theme::log_panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::SM);

        let credits = text(format!("vcr-manager v{}", vcr_core::version()))
            .size(font::SMALL)
            .color(colors::TEXT_MUTED);

        column![panel, status, progress, log_panel, credits]
            .spacing(spacing::SM)
            .padding(spacing::LG)
            .into()
    }

    /// Kick off a conversion on the background worker.
    fn start_conversion(&mut self, input: PathBuf, output: PathBuf) -> Task<Message> {
        self.is_converting = true;
        self.status = Status::Processing;
        self.progress = 0.0;
        self.log_lines.clear();

        tracing::info!("Converting {} -> {}", input.display(), output.display());

        let request = ConversionRequest::new(input, output, self.analog_audio);
        let stream = workers::spawn_conversion(request, &self.config);
        Task::run(stream, Message::Worker)
    }

    fn push_log(&mut self, line: String) {
        if self.log_lines.len() >= MAX_LOG_LINES {
            self.log_lines.remove(0);
        }
        self.log_lines.push(line);
    }

    /// Read a last-used directory from settings, if set.
    fn last_dir(&self, pick: impl Fn(&vcr_core::config::PathSettings) -> String) -> Option<PathBuf> {
        let cfg = self.config.lock().unwrap();
        let dir = pick(&cfg.settings().paths);
        if dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(dir))
        }
    }

    /// Persist the parent directory of a picked path.
    fn remember_dir(&self, path: &Path, input: bool) {
        let Some(parent) = path.parent() else {
            return;
        };
        let mut cfg = self.config.lock().unwrap();
        let dir = parent.to_string_lossy().to_string();
        if input {
            cfg.settings_mut().paths.last_input_dir = dir;
        } else {
            cfg.settings_mut().paths.last_output_dir = dir;
        }
        if let Err(e) = cfg.update_section(ConfigSection::Paths) {
            tracing::warn!("Failed to persist last-used directory: {}", e);
        }
    }
}

/// Show the open dialog filtered to loadable media.
async fn pick_input(start_dir: Option<PathBuf>) -> Option<PathBuf> {
    let mut dialog = rfd::AsyncFileDialog::new()
        .set_title("Select media file")
        .add_filter("Media", MEDIA_EXTENSIONS);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file().await.map(|file| file.path().to_path_buf())
}

/// Show the save dialog with a default name matching the input kind.
async fn pick_output(input: PathBuf, start_dir: Option<PathBuf>) -> (PathBuf, Option<PathBuf>) {
    let kind = MediaKind::from_path(&input);
    let (filter_name, extensions): (&str, &[&str]) = match kind {
        MediaKind::Image => ("PNG image", &["png"]),
        MediaKind::Video => ("MP4 video", &["mp4"]),
    };

    let mut dialog = rfd::AsyncFileDialog::new()
        .set_title("Save converted file")
        .set_file_name(default_output_name(kind))
        .add_filter(filter_name, extensions);
    if let Some(dir) = start_dir {
        dialog = dialog.set_directory(dir);
    }

    let output = dialog.save_file().await.map(|file| file.path().to_path_buf());
    (input, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_cover_all_states() {
        assert_eq!(Status::Ready.label(), " SYSTEM READY ");
        assert_eq!(Status::Processing.label(), " PROCESSING… ");
        assert_eq!(Status::Done.label(), " DONE ");
    }
}
