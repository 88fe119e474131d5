use crate::components::finding_overlay::FindingOverlay;
use crate::message::Message;
use crate::model::{AnalysisResult, ReportState, UploadedFile};
use iced::widget::{button, canvas, column, container, image, row, stack, text, Space};
use iced::{Color, ContentFit, Element, Length};

/// Uploaded image with the finding overlay stacked on top, plus the overlay toggle.
pub fn image_viewer<'a>(
    file: &'a UploadedFile,
    result: &'a AnalysisResult,
    report: &ReportState,
) -> Element<'a, Message> {
    let picture = image(file.preview.clone())
        .content_fit(ContentFit::Contain)
        .width(Length::Fill)
        .height(Length::Fill);

    let mut layers = stack![picture].width(Length::Fill).height(Length::Fill);
    if report.show_overlay {
        let overlay = FindingOverlay::new(&result.findings, report.selected, file.dimensions);
        layers = layers.push(canvas(overlay).width(Length::Fill).height(Length::Fill));
    }

    let toggle_label = if report.show_overlay {
        "AI Overlay On"
    } else {
        "AI Overlay Off"
    };

    let toolbar = row![
        button(text(toggle_label).size(14))
            .on_press(Message::ToggleOverlay)
            .style(button::secondary),
        Space::with_width(Length::Fill),
        container(text("NVIDIA Inference").size(12))
            .padding([4, 8])
            .style(container::rounded_box),
    ];

    container(column![toolbar, layers].spacing(12))
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Color::from_rgb8(0x02, 0x06, 0x17).into()),
            ..Default::default()
        })
        .into()
}

/// Preview shown while the scan is running.
pub fn scan_preview(file: &UploadedFile) -> Element<'_, Message> {
    container(
        image(file.preview.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fixed(256.0))
            .height(Length::Fixed(256.0)),
    )
    .style(container::rounded_box)
    .into()
}
