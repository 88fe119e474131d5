use super::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportTab {
    #[default]
    Findings,
    ConfidenceGraph,
}

/// View-only state of the analysis report. Never mutates the result it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportState {
    pub selected: Option<usize>,
    pub show_overlay: bool,
    pub tab: ReportTab,
}

impl Default for ReportState {
    fn default() -> Self {
        Self {
            selected: None,
            show_overlay: true,
            tab: ReportTab::default(),
        }
    }
}

impl ReportState {
    /// Fresh state for a newly arrived result: first finding selected, if any.
    pub fn for_result(result: &AnalysisResult) -> Self {
        Self {
            selected: result.has_findings().then_some(0),
            ..Self::default()
        }
    }

    pub fn select(&mut self, index: usize, finding_count: usize) {
        if index < finding_count {
            self.selected = Some(index);
        } else {
            log::warn!("Ignoring selection of finding {index}; only {finding_count} available");
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn toggle_overlay(&mut self) {
        self.show_overlay = !self.show_overlay;
    }
}
