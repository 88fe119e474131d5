use crate::error::UploadError;
use crate::model::{ReportTab, SessionId, UploadedFile};
use crate::service::AnalysisOutcome;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    PickFile,
    FilePicked(Option<PathBuf>),
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    FileLoaded(Result<UploadedFile, UploadError>),
    StepTick,
    AnalysisSettled {
        session: SessionId,
        outcome: AnalysisOutcome,
    },
    SelectFinding(usize),
    ToggleOverlay,
    SetReportTab(ReportTab),
    ExportRequested,
    Reset,
}
