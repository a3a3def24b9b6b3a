//! Display banding for the service-computed relevance score.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelevanceBand {
    Low,
    Medium,
    High,
}

impl RelevanceBand {
    pub const MEDIUM_THRESHOLD: i64 = 50;
    pub const HIGH_THRESHOLD: i64 = 80;

    /// Scores outside 0..=100 are clamped first.
    pub fn from_score(score: i64) -> Self {
        match score.clamp(0, 100) {
            s if s >= Self::HIGH_THRESHOLD => RelevanceBand::High,
            s if s >= Self::MEDIUM_THRESHOLD => RelevanceBand::Medium,
            _ => RelevanceBand::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelevanceBand::Low => "low",
            RelevanceBand::Medium => "medium",
            RelevanceBand::High => "high",
        }
    }

    /// RGB in 0.0..=1.0, ready for the renderer.
    pub fn rgb(&self) -> [f32; 3] {
        match self {
            RelevanceBand::High => [0.086, 0.639, 0.290],
            RelevanceBand::Medium => [0.792, 0.541, 0.016],
            RelevanceBand::Low => [0.863, 0.149, 0.149],
        }
    }
}
