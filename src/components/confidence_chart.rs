use crate::message::Message;
use crate::model::Finding;
use iced::border::{Border, Radius};
use iced::widget::{column, progress_bar, row, text};
use iced::{Alignment, Background, Color, Element, Length, Theme};

const ELEVATED_THRESHOLD: f32 = 0.8;
const NORMAL_PLACEHOLDER_PERCENT: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarTone {
    Elevated,
    Moderate,
    Normal,
}

impl BarTone {
    pub fn color(self) -> Color {
        match self {
            BarTone::Elevated => Color::from_rgb8(0xef, 0x44, 0x44),
            BarTone::Moderate => Color::from_rgb8(0xea, 0xb3, 0x08),
            BarTone::Normal => Color::from_rgb8(0x22, 0xc5, 0x5e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    pub label: String,
    pub percent: u32,
    pub tone: BarTone,
}

/// One bar per finding. With no findings a single "Normal" placeholder bar is
/// charted; the findings themselves are left alone.
pub fn chart_bars(findings: &[Finding]) -> Vec<ChartBar> {
    if findings.is_empty() {
        return vec![ChartBar {
            label: "Normal".to_string(),
            percent: NORMAL_PLACEHOLDER_PERCENT,
            tone: BarTone::Normal,
        }];
    }

    findings
        .iter()
        .map(|finding| ChartBar {
            label: finding.condition.clone(),
            percent: finding.confidence_percent(),
            tone: if finding.confidence > ELEVATED_THRESHOLD {
                BarTone::Elevated
            } else {
                BarTone::Moderate
            },
        })
        .collect()
}

pub fn confidence_chart(findings: &[Finding]) -> Element<'static, Message> {
    let bars = chart_bars(findings)
        .into_iter()
        .fold(column![].spacing(14), |chart, bar| {
            chart.push(
                row![
                    text(bar.label).size(12).width(Length::Fixed(96.0)),
                    tinted_bar(bar.percent as f32, bar.tone.color()),
                    text(format!("{}%", bar.percent))
                        .size(12)
                        .width(Length::Fixed(40.0)),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            )
        });

    column![
        bars,
        text("Confidence scores based on training data (ImageNet + NIH Chest X-Ray)").size(11),
    ]
    .spacing(20)
    .into()
}

/// Horizontal bar filled to `percent` of its width in `fill`.
pub fn tinted_bar(percent: f32, fill: Color) -> Element<'static, Message> {
    progress_bar(0.0..=100.0, percent.clamp(0.0, 100.0))
        .height(Length::Fixed(12.0))
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            progress_bar::Style {
                background: Background::Color(palette.background.strong.color),
                bar: Background::Color(fill),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: Radius::new(4.0),
                },
            }
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Localization, Severity};

    fn finding(condition: &str, confidence: f32) -> Finding {
        Finding {
            condition: condition.to_string(),
            confidence,
            severity: Severity::High,
            description: String::new(),
            localization: Localization::ConditionOnly,
        }
    }

    #[test]
    fn empty_findings_chart_a_normal_placeholder() {
        let findings: Vec<Finding> = Vec::new();
        let bars = chart_bars(&findings);

        assert_eq!(
            bars,
            vec![ChartBar {
                label: "Normal".to_string(),
                percent: 99,
                tone: BarTone::Normal,
            }]
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn tone_follows_threshold() {
        let bars = chart_bars(&[
            finding("Pneumonia", 0.93),
            finding("Nodule", 0.8),
            finding("Effusion", 0.76),
        ]);

        let tones: Vec<_> = bars.iter().map(|bar| bar.tone).collect();
        assert_eq!(tones, [BarTone::Elevated, BarTone::Moderate, BarTone::Moderate]);
        assert_eq!(bars[0].label, "Pneumonia");
        assert_eq!(bars[0].percent, 93);
    }
}
