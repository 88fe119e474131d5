use std::time::Duration;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const SEED_VAR: &str = "CLARASCAN_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub analysis_latency: Duration,
    pub step_interval: Duration,
    pub max_upload_bytes: u64,
    pub seed: Option<u64>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            analysis_latency: Duration::from_millis(3500),
            step_interval: Duration::from_millis(700),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            seed: None,
        }
    }
}

impl ScanSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from defaults plus the seed override, if `lookup` yields
    /// one. Timings are fixed. Unparseable values are logged and skipped.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(seed) = parse_override(&lookup, SEED_VAR) {
            log::info!("Mock analysis seeded with {seed}");
            settings.seed = Some(seed);
        }

        settings
    }
}

fn parse_override(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u64> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring {name}={raw:?}: {err}");
            None
        }
    }
}
