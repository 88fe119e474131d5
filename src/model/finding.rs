use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Not produced by the mock backend.
    #[allow(dead_code)]
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Region of interest, in percent of the image width/height.
///
/// Values are kept exactly as produced by the backend and may extend past the
/// image edges; renderers clip when drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Maps the box into pixel space of an image drawn at `origin` with `size`.
    pub fn project(&self, origin: (f32, f32), size: (f32, f32)) -> (f32, f32, f32, f32) {
        (
            origin.0 + size.0 * self.x / 100.0,
            origin.1 + size.1 * self.y / 100.0,
            size.0 * self.width / 100.0,
            size.1 * self.height / 100.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Localization {
    Region(BoundingBox),
    ConditionOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub condition: String,
    pub confidence: f32,
    pub severity: Severity,
    pub description: String,
    pub localization: Localization,
}

impl Finding {
    pub fn region(&self) -> Option<&BoundingBox> {
        match &self.localization {
            Localization::Region(region) => Some(region),
            Localization::ConditionOnly => None,
        }
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(confidence: f32, localization: Localization) -> Finding {
        Finding {
            condition: "Nodule".to_string(),
            confidence,
            severity: Severity::Medium,
            description: "Growth of abnormal tissue.".to_string(),
            localization,
        }
    }

    #[test]
    fn confidence_percent_rounds() {
        assert_eq!(finding(0.754, Localization::ConditionOnly).confidence_percent(), 75);
        assert_eq!(finding(0.987, Localization::ConditionOnly).confidence_percent(), 99);
    }

    #[test]
    fn condition_only_has_no_region() {
        assert!(finding(0.9, Localization::ConditionOnly).region().is_none());
        let region = BoundingBox::new(20.0, 30.0, 15.0, 25.0);
        assert_eq!(
            finding(0.9, Localization::Region(region)).region(),
            Some(&region)
        );
    }

    #[test]
    fn projection_scales_percentages() {
        let region = BoundingBox::new(25.0, 50.0, 10.0, 20.0);
        let (x, y, w, h) = region.project((10.0, 0.0), (200.0, 100.0));
        assert_eq!((x, y, w, h), (60.0, 50.0, 20.0, 20.0));
    }
}
