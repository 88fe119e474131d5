use super::{AnalysisResult, UploadedFile};
use crate::error::AnalysisError;
use std::fmt;
use thiserror::Error;

pub const PROCESSING_STEPS: [&str; 5] = [
    "Uploading DICOM data...",
    "Normalizing contrast...",
    "Sending to NVIDIA Inference Server...",
    "Running detection models...",
    "Aggregating heatmap...",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStatus {
    #[default]
    Idle,
    Uploading,
    Processing,
    Complete,
    Error,
}

impl ScanStatus {
    pub fn can_transition_to(self, next: ScanStatus) -> bool {
        use ScanStatus::*;
        matches!(
            (self, next),
            (Idle, Uploading)
                | (Uploading, Processing)
                | (Uploading, Idle)
                | (Processing, Complete)
                | (Processing, Error)
                | (Processing, Idle)
                | (Complete, Idle)
                | (Error, Idle)
        )
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScanStatus::Idle => "idle",
            ScanStatus::Uploading => "uploading",
            ScanStatus::Processing => "processing",
            ScanStatus::Complete => "complete",
            ScanStatus::Error => "error",
        })
    }
}

/// Identifies one scan session. Completions carrying an older id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeginError {
    /// A session is already in flight or awaiting reset.
    #[error("a scan is already {0}")]
    Busy(ScanStatus),
}

/// Outcome of feeding a settlement into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied(ScanStatus),
    Stale,
}

#[derive(Debug, Default)]
pub struct ScanMachine {
    status: ScanStatus,
    session: u64,
    step: Option<usize>,
    file: Option<UploadedFile>,
    result: Option<AnalysisResult>,
    trail: Vec<ScanStatus>,
}

impl ScanMachine {
    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// States visited since the last reset, in order.
    #[cfg(test)]
    pub fn trail(&self) -> &[ScanStatus] {
        &self.trail
    }

    pub fn step_label(&self) -> Option<&'static str> {
        self.step.map(|index| PROCESSING_STEPS[index])
    }

    pub fn step_index(&self) -> Option<usize> {
        self.step
    }

    pub fn current_session(&self) -> SessionId {
        SessionId(self.session)
    }

    /// Takes ownership of an accepted file and moves through Uploading into
    /// Processing. The returned id must accompany the eventual settlement.
    pub fn begin(&mut self, file: UploadedFile) -> Result<SessionId, BeginError> {
        if self.status != ScanStatus::Idle {
            log::warn!(
                "Refusing {} while a scan is {}",
                file.path.display(),
                self.status
            );
            return Err(BeginError::Busy(self.status));
        }

        self.session += 1;
        self.trail.clear();
        self.file = Some(file);
        self.result = None;
        self.enter(ScanStatus::Uploading);
        self.enter(ScanStatus::Processing);
        self.step = Some(0);

        Ok(SessionId(self.session))
    }

    /// Advances the cosmetic step label, holding on the last one.
    pub fn tick(&mut self) {
        if self.status != ScanStatus::Processing {
            return;
        }
        if let Some(step) = self.step.as_mut() {
            if *step + 1 < PROCESSING_STEPS.len() {
                *step += 1;
                log::debug!("Processing step: {}", PROCESSING_STEPS[*step]);
            }
        }
    }

    pub fn settle(
        &mut self,
        session: SessionId,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Settlement {
        if session.0 != self.session || self.status != ScanStatus::Processing {
            log::warn!(
                "Ignoring stale analysis result for session {session} (current {}, {})",
                self.current_session(),
                self.status
            );
            return Settlement::Stale;
        }

        self.step = None;
        match outcome {
            Ok(result) => {
                log::info!(
                    "Session {session} complete: {} with {} finding(s)",
                    result.overall_status,
                    result.findings.len()
                );
                self.result = Some(result);
                self.enter(ScanStatus::Complete);
            }
            Err(err) => {
                log::error!("Session {session} failed: {err}");
                self.result = None;
                self.enter(ScanStatus::Error);
            }
        }

        log::debug!("Session {session} trail: {:?}", self.trail);
        Settlement::Applied(self.status)
    }

    /// Returns to Idle from any state, discarding the file and result. Bumps
    /// the session so in-flight completions are ignored.
    pub fn reset(&mut self) {
        if let Some(file) = self.file.take() {
            log::debug!("Releasing preview for {}", file.path.display());
        }
        self.result = None;
        self.step = None;
        self.session += 1;
        if self.status != ScanStatus::Idle {
            log::info!("Scan reset from {}", self.status);
            self.enter(ScanStatus::Idle);
        }
        self.trail.clear();
    }

    /// Moves to `next` if the transition table allows it. Refused transitions
    /// leave status and trail untouched.
    fn enter(&mut self, next: ScanStatus) -> bool {
        if !self.status.can_transition_to(next) {
            log::warn!("Refusing scan transition {} -> {next}", self.status);
            return false;
        }
        log::debug!("Scan status {} -> {next}", self.status);
        self.status = next;
        self.trail.push(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Finding, Localization, OverallStatus, Severity};
    use chrono::Utc;
    use iced::widget::image::Handle;
    use std::path::PathBuf;

    fn uploaded(name: &str) -> UploadedFile {
        UploadedFile {
            path: PathBuf::from(name),
            media_type: "image/png".to_string(),
            size_bytes: 3,
            preview: Handle::from_bytes(vec![1u8, 2, 3]),
            dimensions: None,
        }
    }

    fn result(findings: Vec<Finding>) -> AnalysisResult {
        AnalysisResult {
            id: "scan-1".to_string(),
            timestamp: Utc::now(),
            patient_id: "ANON-1".to_string(),
            modality: "CXR (Chest X-Ray)".to_string(),
            overall_status: OverallStatus::from_findings(&findings),
            findings,
            processing_time_ms: 200,
        }
    }

    fn effusion() -> Finding {
        Finding {
            condition: "Effusion".to_string(),
            confidence: 0.9,
            severity: Severity::High,
            description: "Fluid.".to_string(),
            localization: Localization::ConditionOnly,
        }
    }

    #[test]
    fn begin_passes_through_uploading_into_processing() {
        let mut machine = ScanMachine::default();
        machine.begin(uploaded("a.png")).unwrap();

        assert_eq!(machine.status(), ScanStatus::Processing);
        assert_eq!(
            machine.trail(),
            &[ScanStatus::Uploading, ScanStatus::Processing]
        );
        assert_eq!(machine.step_label(), Some(PROCESSING_STEPS[0]));
        assert!(machine.file().is_some());
    }

    #[test]
    fn ticker_holds_on_last_step() {
        let mut machine = ScanMachine::default();
        machine.begin(uploaded("a.png")).unwrap();

        for _ in 0..10 {
            machine.tick();
        }
        assert_eq!(machine.step_index(), Some(PROCESSING_STEPS.len() - 1));
        assert_eq!(machine.step_label(), Some("Aggregating heatmap..."));
    }

    #[test]
    fn tick_outside_processing_is_ignored() {
        let mut machine = ScanMachine::default();
        machine.tick();
        assert_eq!(machine.step_label(), None);

        let session = machine.begin(uploaded("a.png")).unwrap();
        machine.settle(session, Ok(result(vec![])));
        machine.tick();
        assert_eq!(machine.step_label(), None);
    }

    #[test]
    fn success_completes_and_stops_ticker() {
        let mut machine = ScanMachine::default();
        let session = machine.begin(uploaded("a.png")).unwrap();
        machine.tick();

        let outcome = machine.settle(session, Ok(result(vec![effusion()])));

        assert_eq!(outcome, Settlement::Applied(ScanStatus::Complete));
        assert_eq!(machine.step_label(), None);
        assert_eq!(machine.result().map(|r| r.findings.len()), Some(1));
        assert_eq!(
            machine.trail(),
            &[
                ScanStatus::Uploading,
                ScanStatus::Processing,
                ScanStatus::Complete
            ]
        );
    }

    #[test]
    fn failure_enters_error_without_result() {
        let mut machine = ScanMachine::default();
        let session = machine.begin(uploaded("a.png")).unwrap();

        let outcome = machine.settle(
            session,
            Err(AnalysisError::Unavailable("connection refused".to_string())),
        );

        assert_eq!(outcome, Settlement::Applied(ScanStatus::Error));
        assert!(machine.result().is_none());
        assert_eq!(machine.step_label(), None);
    }

    #[test]
    fn second_begin_is_refused_while_in_flight() {
        let mut machine = ScanMachine::default();
        let first = machine.begin(uploaded("a.png")).unwrap();

        let err = machine.begin(uploaded("b.png")).unwrap_err();

        assert_eq!(err, BeginError::Busy(ScanStatus::Processing));
        assert_eq!(machine.current_session(), first);
        assert_eq!(
            machine.file().map(|f| f.path.clone()),
            Some(PathBuf::from("a.png"))
        );
    }

    #[test]
    fn settlement_after_reset_is_stale() {
        let mut machine = ScanMachine::default();
        let session = machine.begin(uploaded("a.png")).unwrap();
        machine.reset();

        let outcome = machine.settle(session, Ok(result(vec![effusion()])));

        assert_eq!(outcome, Settlement::Stale);
        assert_eq!(machine.status(), ScanStatus::Idle);
        assert!(machine.result().is_none());
        assert!(machine.file().is_none());
        assert_eq!(machine.step_label(), None);
    }

    #[test]
    fn stale_settlement_does_not_touch_a_newer_session() {
        let mut machine = ScanMachine::default();
        let old = machine.begin(uploaded("a.png")).unwrap();
        machine.reset();
        let current = machine.begin(uploaded("b.png")).unwrap();

        assert_eq!(machine.settle(old, Ok(result(vec![]))), Settlement::Stale);
        assert_eq!(machine.status(), ScanStatus::Processing);

        assert_eq!(
            machine.settle(current, Ok(result(vec![]))),
            Settlement::Applied(ScanStatus::Complete)
        );
    }

    #[test]
    fn reset_is_idempotent_and_sequence_repeats() {
        let mut machine = ScanMachine::default();
        let session = machine.begin(uploaded("a.png")).unwrap();
        machine.settle(session, Ok(result(vec![])));
        let first_trail = machine.trail().to_vec();

        machine.reset();
        machine.reset();
        assert_eq!(machine.status(), ScanStatus::Idle);
        assert!(machine.file().is_none());
        assert!(machine.result().is_none());
        assert!(machine.trail().is_empty());

        let session = machine.begin(uploaded("a.png")).unwrap();
        machine.settle(session, Ok(result(vec![])));
        assert_eq!(machine.trail(), first_trail.as_slice());
    }

    #[test]
    fn transition_table() {
        use ScanStatus::*;
        assert!(Idle.can_transition_to(Uploading));
        assert!(!Idle.can_transition_to(Processing));
        assert!(!Uploading.can_transition_to(Complete));
        assert!(Processing.can_transition_to(Error));
        assert!(Error.can_transition_to(Idle));
        assert!(!Complete.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Idle));
        assert!(!Idle.can_transition_to(Idle));
    }

    #[test]
    fn illegal_transition_is_refused() {
        let mut machine = ScanMachine::default();
        assert!(!machine.enter(ScanStatus::Complete));
        assert_eq!(machine.status(), ScanStatus::Idle);
        assert!(machine.trail().is_empty());

        let session = machine.begin(uploaded("a.png")).unwrap();
        assert!(!machine.enter(ScanStatus::Uploading));
        assert_eq!(machine.status(), ScanStatus::Processing);
        assert_eq!(
            machine.trail(),
            &[ScanStatus::Uploading, ScanStatus::Processing]
        );

        machine.settle(session, Ok(result(vec![])));
        assert!(!machine.enter(ScanStatus::Error));
        assert_eq!(machine.status(), ScanStatus::Complete);
        assert_eq!(machine.trail().len(), 3);
    }

    #[test]
    fn reset_mid_processing_goes_through_the_table() {
        let mut machine = ScanMachine::default();
        machine.begin(uploaded("a.png")).unwrap();

        machine.reset();

        assert_eq!(machine.status(), ScanStatus::Idle);
        assert!(machine.trail().is_empty());
        assert_eq!(machine.step_label(), None);
    }
}
