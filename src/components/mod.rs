pub mod confidence_chart;
pub mod finding_overlay;
pub mod segmented_toggle;
pub mod upload_zone;

pub use upload_zone::UploadZone;
