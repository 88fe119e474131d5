use super::image_viewer::scan_preview;
use crate::error::AnalysisError;
use crate::message::Message;
use crate::model::scan::PROCESSING_STEPS;
use crate::model::UploadedFile;
use crate::utils::format_bytes;
use iced::widget::{button, column, container, text};
use iced::{Alignment, Color, Element, Length};

pub fn processing<'a>(
    file: &'a UploadedFile,
    step_label: Option<&'static str>,
    step_index: Option<usize>,
) -> Element<'a, Message> {
    let progress = step_index
        .map(|index| format!("Step {} of {}", index + 1, PROCESSING_STEPS.len()))
        .unwrap_or_default();

    container(
        column![
            scan_preview(file),
            text("Analyzing Scan").size(22),
            text(step_label.unwrap_or_default()).size(14),
            text(progress).size(12),
            text(format!(
                "{} • {} • {}",
                file.file_name(),
                file.media_type,
                format_bytes(file.size_bytes)
            ))
            .size(12),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding([96, 0])
    .align_x(Alignment::Center)
    .into()
}

pub fn failure() -> Element<'static, Message> {
    container(
        column![
            text("Analysis Failed")
                .size(22)
                .color(Color::from_rgb8(0xdc, 0x26, 0x26)),
            text(AnalysisError::USER_MESSAGE).size(14),
            button(text("Try Again")).padding([8, 24]).on_press(Message::Reset),
        ]
        .spacing(16)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding([80, 0])
    .align_x(Alignment::Center)
    .into()
}
