use crate::components::upload_zone::UploadZone;
use crate::message::Message;
use iced::widget::text::Wrapping;
use iced::widget::{column, container, row, text};
use iced::{Alignment, Element, Length};

const HIGHLIGHTS: [(&str, &str); 3] = [
    ("< 200ms", "Inference Time"),
    ("0.94", "Accuracy (AUC)"),
    ("14+", "Classes"),
];

pub fn landing(upload_zone: &UploadZone) -> Element<'_, Message> {
    let intro = column![
        text("AI-Powered Chest Radiography").size(36),
        text(
            "Advanced deep learning models for immediate preliminary analysis. \
             Detects Pneumonia, Atelectasis, Effusion, and more with high precision."
        )
        .size(16)
        .wrapping(Wrapping::Word),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    let highlights = HIGHLIGHTS
        .iter()
        .fold(row![].spacing(16), |cards, (value, label)| {
            cards.push(
                container(
                    column![text(*value).size(24), text(*label).size(12)]
                        .spacing(4)
                        .align_x(Alignment::Center),
                )
                .padding(16)
                .width(Length::FillPortion(1))
                .align_x(Alignment::Center)
                .style(container::rounded_box),
            )
        });

    container(
        column![intro, upload_zone.view(), highlights]
            .spacing(32)
            .max_width(760)
            .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding([48, 0])
    .align_x(Alignment::Center)
    .into()
}
