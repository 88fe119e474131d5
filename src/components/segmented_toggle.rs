use crate::message::Message;
use crate::model::ReportTab;
use iced::border::{Border, Radius};
use iced::widget::button::{Button, Status};
use iced::widget::text::Wrapping;
use iced::widget::{button, container, row, text, Container};
use iced::{Alignment, Background, Color, Length, Shadow, Theme};

pub fn report_tab_toggle(current: ReportTab) -> Container<'static, Message> {
    segmented_toggle(
        [
            ("Findings", ReportTab::Findings),
            ("Confidence Graph", ReportTab::ConfidenceGraph),
        ],
        current,
        Message::SetReportTab,
    )
}

/// Two-segment pill switch. `on_select` builds the message for the pressed side.
pub fn segmented_toggle<T>(
    options: [(&'static str, T); 2],
    current: T,
    on_select: fn(T) -> Message,
) -> Container<'static, Message>
where
    T: Copy + PartialEq + 'static,
{
    let [(left_label, left), (right_label, right)] = options;

    let toggle_row = row![
        segment(left_label, left == current, on_select(left), Side::Left)
            .width(Length::FillPortion(1)),
        segment(right_label, right == current, on_select(right), Side::Right)
            .width(Length::FillPortion(1)),
    ]
    .spacing(0);

    container(toggle_row)
        .padding(3)
        .width(Length::Fill)
        .style(track_style)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn segment(
    label: &'static str,
    is_active: bool,
    on_press: Message,
    side: Side,
) -> Button<'static, Message> {
    let content = container(text(label).size(14).wrapping(Wrapping::None))
        .width(Length::Fill)
        .height(Length::Fixed(32.0))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .padding([6, 16]);

    button(content)
        .padding(0)
        .on_press(on_press)
        .style(move |theme, status| segment_style(theme, status, is_active, side))
}

fn track_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette.background.strong.color)),
        border: Border {
            color: palette.background.strong.color.scale_alpha(0.6),
            width: 1.0,
            radius: Radius::new(999.0),
        },
        ..Default::default()
    }
}

fn segment_style(theme: &Theme, status: Status, is_active: bool, side: Side) -> button::Style {
    let palette = theme.extended_palette();

    let background_color = match (status, is_active) {
        (Status::Hovered, true) => palette.primary.base.color,
        (Status::Hovered, false) => palette.background.base.color.scale_alpha(0.8),
        (Status::Pressed, true) => palette.primary.base.color.scale_alpha(0.9),
        (Status::Pressed, false) => palette.background.base.color.scale_alpha(0.9),
        (Status::Disabled, true) => palette.primary.strong.color.scale_alpha(0.5),
        (Status::Disabled, false) => palette.background.strong.color.scale_alpha(0.2),
        (Status::Active, true) => palette.primary.strong.color,
        (Status::Active, false) => palette.background.strong.color.scale_alpha(0.4),
    };

    let text_color = if is_active {
        palette.primary.strong.text
    } else {
        palette.background.base.text
    };

    let (outer, inner) = (999.0, 10.0);
    let radius = match side {
        Side::Left => Radius {
            top_left: outer,
            top_right: inner,
            bottom_right: inner,
            bottom_left: outer,
        },
        Side::Right => Radius {
            top_left: inner,
            top_right: outer,
            bottom_right: outer,
            bottom_left: inner,
        },
    };

    button::Style {
        background: Some(Background::Color(background_color)),
        text_color,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius,
        },
        shadow: Shadow::default(),
    }
}
