use super::{AnalysisOutcome, AnalysisService};
use crate::model::{
    AnalysisResult, BoundingBox, Finding, Localization, OverallStatus, Severity, UploadedFile,
};
use chrono::{DateTime, Utc};
use iced::futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

pub const MODALITY: &str = "CXR (Chest X-Ray)";

const ABNORMAL_PROBABILITY: f64 = 0.4;
const HIGH_SEVERITY_PROBABILITY: f64 = 0.5;

pub struct Condition {
    pub name: &'static str,
    pub description: &'static str,
}

pub const CONDITIONS: [Condition; 5] = [
    Condition {
        name: "Pneumonia",
        description: "Inflammation of the air sacs in one or both lungs.",
    },
    Condition {
        name: "Infiltration",
        description:
            "Substance denser than air, such as pus or blood, lingers in the parenchyma.",
    },
    Condition {
        name: "Nodule",
        description: "Growth of abnormal tissue.",
    },
    Condition {
        name: "Atelectasis",
        description: "Complete or partial collapse of the entire lung or area (lobe) of the lung.",
    },
    Condition {
        name: "Effusion",
        description:
            "Buildup of fluid between the layers of tissue that line the lungs and chest cavity.",
    },
];

/// Stand-in for the inference server: waits a fixed latency, then answers with
/// randomized but well-formed findings. Never fails.
#[derive(Clone)]
pub struct MockAnalysisService {
    latency: Duration,
    rng: Arc<Mutex<StdRng>>,
}

impl MockAnalysisService {
    pub fn new(latency: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            latency,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

impl AnalysisService for MockAnalysisService {
    fn analyze(&self, file: &UploadedFile) -> BoxFuture<'static, AnalysisOutcome> {
        log::info!(
            "Submitting {} ({} bytes) to mock inference",
            file.file_name(),
            file.size_bytes
        );
        let latency = self.latency;
        let rng = Arc::clone(&self.rng);

        Box::pin(async move {
            tokio::time::sleep(latency).await;
            let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(generate_result(&mut *rng, Utc::now()))
        })
    }
}

pub fn generate_result<R: Rng + ?Sized>(rng: &mut R, timestamp: DateTime<Utc>) -> AnalysisResult {
    let abnormal = rng.gen_bool(ABNORMAL_PROBABILITY);
    let count = if abnormal { rng.gen_range(1..=2) } else { 0 };
    let findings: Vec<Finding> = (0..count).map(|_| generate_finding(rng)).collect();

    AnalysisResult {
        id: format!("scan-{}", rng.gen_range(0..100_000)),
        timestamp,
        patient_id: format!("ANON-{}", rng.gen_range(0..9_999)),
        modality: MODALITY.to_string(),
        overall_status: OverallStatus::from_findings(&findings),
        findings,
        processing_time_ms: rng.gen_range(120..420),
    }
}

fn generate_finding<R: Rng + ?Sized>(rng: &mut R) -> Finding {
    let condition = &CONDITIONS[rng.gen_range(0..CONDITIONS.len())];
    let confidence = rng.gen_range(0.75..=0.99_f32);
    let severity = if rng.gen_bool(HIGH_SEVERITY_PROBABILITY) {
        Severity::High
    } else {
        Severity::Medium
    };
    let region = BoundingBox::new(
        rng.gen_range(20.0..60.0),
        rng.gen_range(20.0..60.0),
        rng.gen_range(15.0..35.0),
        rng.gen_range(15.0..35.0),
    );

    Finding {
        condition: condition.name.to_string(),
        confidence,
        severity,
        description: condition.description.to_string(),
        localization: Localization::Region(region),
    }
}
