pub mod analysis;
pub mod finding;
pub mod report;
pub mod scan;
pub mod upload;

pub use analysis::{AnalysisResult, OverallStatus};
pub use finding::{BoundingBox, Finding, Localization, Severity};
pub use report::{ReportState, ReportTab};
pub use scan::{ScanMachine, ScanStatus, SessionId, Settlement};
pub use upload::{UploadCandidate, UploadedFile};
