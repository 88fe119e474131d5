use super::Finding;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallStatus {
    Normal,
    Abnormal,
    Inconclusive,
}

impl OverallStatus {
    /// Status a result with `findings` would carry when produced by the mock backend.
    pub fn from_findings(findings: &[Finding]) -> Self {
        if findings.is_empty() {
            OverallStatus::Normal
        } else {
            OverallStatus::Abnormal
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverallStatus::Normal => "Normal",
            OverallStatus::Abnormal => "Abnormal",
            OverallStatus::Inconclusive => "Inconclusive",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub patient_id: String,
    pub modality: String,
    pub findings: Vec<Finding>,
    pub overall_status: OverallStatus,
    /// Reported by the backend for display only.
    pub processing_time_ms: u32,
}

impl AnalysisResult {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}
