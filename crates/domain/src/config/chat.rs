use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Question answering
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Sampling temperature for answers (0.0 – 2.0).
    #[serde(default = "d_temperature")]
    pub temperature: f32,
    #[serde(default = "d_2000")]
    pub max_tokens: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2_000,
        }
    }
}

/// Clamp a user-chosen temperature into the supported range.
pub fn clamp_temperature(t: f32) -> f32 {
    if t.is_nan() {
        return d_temperature();
    }
    t.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

fn d_temperature() -> f32 {
    0.7
}
fn d_2000() -> u32 {
    2_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_range() {
        assert_eq!(clamp_temperature(-1.0), 0.0);
        assert_eq!(clamp_temperature(3.5), 2.0);
        assert_eq!(clamp_temperature(0.4), 0.4);
        assert_eq!(clamp_temperature(f32::NAN), 0.7);
    }
}
