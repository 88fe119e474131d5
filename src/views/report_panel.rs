use crate::components::confidence_chart::{confidence_chart, tinted_bar};
use crate::components::segmented_toggle::report_tab_toggle;
use crate::message::Message;
use crate::model::{AnalysisResult, Finding, OverallStatus, ReportState, ReportTab, Severity};
use crate::utils::format_timestamp;
use iced::border::{Border, Radius};
use iced::widget::text::Wrapping;
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Background, Color, Element, Length, Theme};

/// (background, foreground) of the overall status badge.
pub fn status_palette(status: OverallStatus) -> (Color, Color) {
    match status {
        OverallStatus::Normal => (
            Color::from_rgb8(0xdc, 0xfc, 0xe7),
            Color::from_rgb8(0x15, 0x80, 0x3d),
        ),
        OverallStatus::Abnormal => (
            Color::from_rgb8(0xfe, 0xe2, 0xe2),
            Color::from_rgb8(0xb9, 0x1c, 0x1c),
        ),
        OverallStatus::Inconclusive => (
            Color::from_rgb8(0xfe, 0xf9, 0xc3),
            Color::from_rgb8(0xa1, 0x62, 0x07),
        ),
    }
}

fn severity_palette(severity: Severity) -> (Color, Color) {
    match severity {
        Severity::High => (
            Color::from_rgb8(0xfe, 0xe2, 0xe2),
            Color::from_rgb8(0xb9, 0x1c, 0x1c),
        ),
        Severity::Medium | Severity::Low => (
            Color::from_rgb8(0xfe, 0xf9, 0xc3),
            Color::from_rgb8(0xa1, 0x62, 0x07),
        ),
    }
}

/// Badge text of the report header; always the reported overall status.
fn status_label(result: &AnalysisResult) -> String {
    result.overall_status.to_string()
}

pub fn report_panel<'a>(result: &'a AnalysisResult, report: &ReportState) -> Element<'a, Message> {
    let header = column![
        row![
            text("Analysis Report").size(22),
            Space::with_width(Length::Fill),
            badge(status_label(result), status_palette(result.overall_status)),
        ]
        .align_y(Alignment::Center),
        text(format!("ID: {} • {}ms", result.id, result.processing_time_ms)).size(13),
        text(format!(
            "Patient {} • {} • {}",
            result.patient_id,
            result.modality,
            format_timestamp(&result.timestamp)
        ))
        .size(13),
    ]
    .spacing(6);

    let body: Element<'a, Message> = match report.tab {
        ReportTab::Findings => findings_list(&result.findings, report),
        ReportTab::ConfidenceGraph => confidence_chart(&result.findings),
    };

    let actions = row![
        button(centered_label("Upload New"))
            .width(Length::FillPortion(1))
            .on_press(Message::Reset)
            .style(button::secondary),
        button(centered_label("Export"))
            .width(Length::FillPortion(1))
            .on_press(Message::ExportRequested)
            .style(button::primary),
    ]
    .spacing(12);

    column![
        header,
        report_tab_toggle(report.tab),
        scrollable(body).height(Length::Fill),
        actions,
    ]
    .spacing(16)
    .into()
}

fn findings_list<'a>(findings: &'a [Finding], report: &ReportState) -> Element<'a, Message> {
    if findings.is_empty() {
        return container(text("No abnormalities detected.").size(16))
            .width(Length::Fill)
            .padding([40, 0])
            .align_x(Alignment::Center)
            .into();
    }

    findings
        .iter()
        .enumerate()
        .fold(column![].spacing(12), |list, (index, finding)| {
            list.push(finding_card(index, finding, report.is_selected(index)))
        })
        .into()
}

fn finding_card(index: usize, finding: &Finding, is_selected: bool) -> Element<'_, Message> {
    let percent = finding.confidence_percent();

    let content = column![
        row![
            text(&finding.condition).size(16),
            Space::with_width(Length::Fill),
            badge(finding.severity.label().to_string(), severity_palette(finding.severity)),
        ]
        .align_y(Alignment::Center),
        text(&finding.description)
            .size(13)
            .wrapping(Wrapping::Word),
        row![
            tinted_bar(finding.confidence * 100.0, Color::from_rgb8(0x3b, 0x82, 0xf6)),
            text(format!("{percent}%")).size(12),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(8);

    button(content)
        .width(Length::Fill)
        .padding(14)
        .on_press(Message::SelectFinding(index))
        .style(move |theme: &Theme, status| {
            let palette = theme.extended_palette();
            let base = button::secondary(theme, status);
            let border_color = if is_selected {
                palette.primary.strong.color
            } else {
                palette.background.strong.color
            };
            button::Style {
                background: Some(Background::Color(if is_selected {
                    palette.primary.weak.color.scale_alpha(0.25)
                } else {
                    palette.background.weak.color
                })),
                text_color: palette.background.base.text,
                border: Border {
                    color: border_color,
                    width: if is_selected { 2.0 } else { 1.0 },
                    radius: Radius::new(12.0),
                },
                ..base
            }
        })
        .into()
}

fn centered_label(label: &'static str) -> Element<'static, Message> {
    container(text(label).size(14))
        .width(Length::Fill)
        .align_x(Alignment::Center)
        .into()
}

fn badge<'a>(label: String, (background, foreground): (Color, Color)) -> Element<'a, Message> {
    container(text(label).size(12).color(foreground))
        .padding([2, 10])
        .style(move |_theme: &Theme| container::Style {
            background: Some(Background::Color(background)),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: Radius::new(999.0),
            },
            ..Default::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Localization};
    use chrono::Utc;

    fn result(findings: Vec<Finding>, overall_status: OverallStatus) -> AnalysisResult {
        AnalysisResult {
            id: "scan-7".to_string(),
            timestamp: Utc::now(),
            patient_id: "ANON-7".to_string(),
            modality: "CXR (Chest X-Ray)".to_string(),
            findings,
            overall_status,
            processing_time_ms: 200,
        }
    }

    fn nodule() -> Finding {
        Finding {
            condition: "Nodule".to_string(),
            confidence: 0.88,
            severity: Severity::Medium,
            description: "Growth of abnormal tissue.".to_string(),
            localization: Localization::Region(BoundingBox::new(30.0, 40.0, 20.0, 20.0)),
        }
    }

    #[test]
    fn header_badge_follows_overall_status() {
        let normal = result(vec![], OverallStatus::from_findings(&[]));
        assert_eq!(status_label(&normal), "Normal");
        assert_eq!(
            status_palette(normal.overall_status),
            status_palette(OverallStatus::Normal)
        );

        let findings = vec![nodule()];
        let abnormal = result(findings.clone(), OverallStatus::from_findings(&findings));
        assert_eq!(status_label(&abnormal), "Abnormal");
        assert_eq!(
            status_palette(abnormal.overall_status),
            status_palette(OverallStatus::Abnormal)
        );
    }

    #[test]
    fn header_badge_is_not_derived_from_findings() {
        let inconclusive = result(vec![nodule()], OverallStatus::Inconclusive);
        assert_eq!(status_label(&inconclusive), "Inconclusive");

        let empty_but_flagged = result(vec![], OverallStatus::Abnormal);
        assert_eq!(status_label(&empty_but_flagged), "Abnormal");
    }

    #[test]
    fn normal_and_abnormal_badges_differ() {
        assert_ne!(
            status_palette(OverallStatus::Normal),
            status_palette(OverallStatus::Abnormal)
        );
        assert_ne!(
            status_palette(OverallStatus::Inconclusive),
            status_palette(OverallStatus::Abnormal)
        );
    }
}
