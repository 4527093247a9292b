//! Sampling knobs sent with a completion

/// Sampling parameters. Unset fields are left to the provider's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SamplingParams {
    pub temperature: Option<f32>,
    /// Cap on completion tokens
    pub max_tokens: Option<u32>,
}

impl SamplingParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_everything_to_provider() {
        let params = SamplingParams::default();
        assert!(params.temperature.is_none());
        assert!(params.max_tokens.is_none());
    }

    #[test]
    fn test_with_temperature_keeps_token_cap() {
        let params = SamplingParams {
            max_tokens: Some(32),
            ..Default::default()
        }
        .with_temperature(0.5);

        assert_eq!(params.temperature, Some(0.5));
        assert_eq!(params.max_tokens, Some(32));
    }
}
