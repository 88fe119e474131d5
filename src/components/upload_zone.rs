use crate::error::UploadError;
use crate::message::Message;
use crate::model::{UploadCandidate, UploadedFile};
use crate::utils::format_bytes;
use iced::border::{Border, Radius};
use iced::widget::text::Wrapping;
use iced::widget::{button, column, container, text};
use iced::{Alignment, Background, Color, Element, Length, Theme};
use std::path::PathBuf;

/// State of the drop/pick target. Both input paths funnel into [`UploadZone::submit`].
#[derive(Debug, Default)]
pub struct UploadZone {
    dragging: bool,
    disabled: bool,
    loading: bool,
    /// A drop from the current drag gesture has already been taken.
    drop_taken: bool,
    error: Option<UploadError>,
}

impl UploadZone {
    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.dragging = false;
        } else {
            self.drop_taken = false;
        }
    }

    fn accepts_input(&self) -> bool {
        !self.disabled && !self.loading
    }

    pub fn hover(&mut self) {
        self.drop_taken = false;
        if self.accepts_input() {
            self.dragging = true;
        }
    }

    pub fn leave(&mut self) {
        self.dragging = false;
    }

    /// Window drop entry point. A multi-file drop delivers one path per file;
    /// only the first of a gesture is submitted.
    pub fn drop_path(&mut self, path: PathBuf, limit_bytes: u64) -> Option<UploadCandidate> {
        if self.drop_taken {
            log::debug!("Ignoring extra dropped file {}", path.display());
            self.dragging = false;
            return None;
        }
        self.drop_taken = true;
        self.submit(path, limit_bytes)
    }

    /// Validates `path` against its metadata. Rejections are kept for inline
    /// display; an accepted candidate clears the previous error and puts the
    /// zone in the loading state until [`UploadZone::finish_load`].
    pub fn submit(&mut self, path: PathBuf, limit_bytes: u64) -> Option<UploadCandidate> {
        self.dragging = false;
        if !self.accepts_input() {
            log::debug!("Upload zone busy; ignoring {}", path.display());
            return None;
        }

        let validated = UploadCandidate::inspect(path).and_then(|candidate| {
            candidate.validate(limit_bytes)?;
            Ok(candidate)
        });

        match validated {
            Ok(candidate) => {
                self.error = None;
                self.loading = true;
                Some(candidate)
            }
            Err(err) => {
                self.reject(err);
                None
            }
        }
    }

    /// Takes the outcome of reading the accepted candidate from disk.
    pub fn finish_load(
        &mut self,
        loaded: Result<UploadedFile, UploadError>,
    ) -> Option<UploadedFile> {
        if !self.loading {
            log::debug!("Discarding file load that is no longer awaited");
            return None;
        }
        self.loading = false;

        match loaded {
            Ok(file) => Some(file),
            Err(err) => {
                self.reject(err);
                None
            }
        }
    }

    fn reject(&mut self, err: UploadError) {
        match &err {
            UploadError::InvalidType { media_type } => log::warn!(
                "Upload rejected: declared type {}",
                media_type.as_deref().unwrap_or("unknown")
            ),
            UploadError::TooLarge {
                size_bytes,
                limit_bytes,
            } => log::warn!(
                "Upload rejected: {} exceeds {}",
                format_bytes(*size_bytes),
                format_bytes(*limit_bytes)
            ),
            UploadError::Unreadable { .. } => log::warn!("Upload rejected: {err}"),
        }
        self.error = Some(err);
    }

    pub fn view(&self) -> Element<'_, Message> {
        let headline = if self.loading {
            "Loading preview..."
        } else if self.dragging {
            "Drop X-Ray here"
        } else {
            "Click to upload or drag and drop"
        };

        let mut browse = button(text("Browse files")).padding([8, 20]);
        if self.accepts_input() {
            browse = browse.on_press(Message::PickFile);
        }

        let mut content = column![
            text(headline).size(20),
            text("DICOM, PNG, JPG (Max 10MB)").size(14),
            browse,
        ]
        .spacing(12)
        .align_x(Alignment::Center);

        if let Some(error) = &self.error {
            content = content.push(
                text(error.to_string())
                    .size(14)
                    .color(Color::from_rgb8(0xef, 0x44, 0x44))
                    .wrapping(Wrapping::Word),
            );
        }

        let dragging = self.dragging;
        let disabled = !self.accepts_input();
        container(content)
            .width(Length::Fill)
            .height(Length::Fixed(256.0))
            .padding(24)
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .style(move |theme: &Theme| drop_target_style(theme, dragging, disabled))
            .into()
    }
}

fn drop_target_style(theme: &Theme, dragging: bool, disabled: bool) -> container::Style {
    let palette = theme.extended_palette();

    let (background, border_color) = if dragging {
        (
            palette.primary.weak.color.scale_alpha(0.15),
            palette.primary.strong.color,
        )
    } else {
        (
            palette.background.weak.color.scale_alpha(0.4),
            palette.background.strong.color,
        )
    };

    let alpha = if disabled { 0.5 } else { 1.0 };

    container::Style {
        background: Some(Background::Color(background.scale_alpha(alpha))),
        border: Border {
            color: border_color.scale_alpha(alpha),
            width: 2.0,
            radius: Radius::new(16.0),
        },
        ..Default::default()
    }
}
