//! Terminal settings, read from the environment

use anyhow::{bail, Context, Result};
use pong_core::Config;

/// Default pixel-to-cell scale: every second row and column is sampled
pub const DEFAULT_SCALE: u16 = 2;
pub const MAX_SCALE: u16 = 4;

#[derive(Debug, Clone)]
pub struct TermConfig {
    pub core: Config,
    /// Screen pixels per cell column; a cell row covers `2 * scale` pixel rows
    pub scale: u16,
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            core: Config::default(),
            scale: DEFAULT_SCALE,
        }
    }
}

impl TermConfig {
    /// Defaults overridden by `PONG_FRAME_HZ` and `PONG_SCALE`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("PONG_FRAME_HZ") {
            let hz: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("PONG_FRAME_HZ must be a whole number, got {raw:?}"))?;
            if hz == 0 {
                bail!("PONG_FRAME_HZ must be at least 1");
            }
            config.core.frame_hz = hz;
        }

        if let Some(raw) = lookup("PONG_SCALE") {
            let scale: u16 = raw
                .trim()
                .parse()
                .with_context(|| format!("PONG_SCALE must be a whole number, got {raw:?}"))?;
            if !(1..=MAX_SCALE).contains(&scale) {
                bail!("PONG_SCALE must be between 1 and {MAX_SCALE}, got {scale}");
            }
            config.scale = scale;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = TermConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.core.frame_hz, 60);
        assert_eq!(config.scale, 2);
    }

    #[test]
    fn test_overrides() {
        let config =
            TermConfig::from_lookup(lookup(&[("PONG_FRAME_HZ", " 30 "), ("PONG_SCALE", "1")]))
                .unwrap();
        assert_eq!(config.core.frame_hz, 30);
        assert_eq!(config.scale, 1);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(TermConfig::from_lookup(lookup(&[("PONG_FRAME_HZ", "fast")])).is_err());
        assert!(TermConfig::from_lookup(lookup(&[("PONG_FRAME_HZ", "0")])).is_err());
        assert!(TermConfig::from_lookup(lookup(&[("PONG_SCALE", "5")])).is_err());
        assert!(TermConfig::from_lookup(lookup(&[("PONG_SCALE", "0")])).is_err());
    }
}
