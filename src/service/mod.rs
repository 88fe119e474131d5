//! Analysis backends. The UI only ever talks to [`AnalysisService`], so a real
//! inference client can replace the mock without touching the scan controller.

pub mod mock;

pub use mock::MockAnalysisService;

use crate::error::AnalysisError;
use crate::model::{AnalysisResult, UploadedFile};
use iced::futures::future::BoxFuture;

pub type AnalysisOutcome = Result<AnalysisResult, AnalysisError>;

pub trait AnalysisService: Send + Sync {
    /// Submits `file` for analysis. The returned future owns everything it needs
    /// so it can outlive the borrow of `file`.
    fn analyze(&self, file: &UploadedFile) -> BoxFuture<'static, AnalysisOutcome>;
}
