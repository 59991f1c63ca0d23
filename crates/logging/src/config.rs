//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a verbose level.
    ///
    /// Level 0 only reports skipped entries. Each additional level widens the
    /// set of categories; level 4 and above enables everything at its
    /// highest meaningful level.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();
        config.info.skip = 1;

        if level >= 1 {
            config.info.copy = 1;
            config.info.remove = 1;
            config.info.walk = 1;
        }
        if level >= 2 {
            config.debug.walk = 1;
            config.debug.dup = 1;
            config.debug.del = 1;
            config.debug.lock = 1;
        }
        if level >= 3 {
            config.debug.walk = 2;
            config.debug.copy = 1;
            config.debug.open = 1;
        }
        if level >= 4 {
            config.info.set_all(2);
            config.debug.set_all(2);
        }

        config
    }

    /// Apply a single info flag token (e.g., "copy2", "skip").
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        let flag = InfoFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown info flag: {name}"))?;
        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a single debug flag token (e.g., "walk2", "dup").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        let flag = DebugFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.debug.set(flag, level);
        Ok(())
    }
}

/// Parse a flag token like "copy2" into ("copy", 2) or "del" into ("del", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verbose_level_0() {
        let config = VerbosityConfig::from_verbose_level(0);
        assert_eq!(config.info.skip, 1);
        assert_eq!(config.info.copy, 0);
        assert_eq!(config.debug, DebugLevels::default());
    }

    #[test]
    fn test_from_verbose_level_2() {
        let config = VerbosityConfig::from_verbose_level(2);
        assert_eq!(config.info.copy, 1);
        assert_eq!(config.debug.walk, 1);
        assert_eq!(config.debug.dup, 1);
        assert_eq!(config.debug.open, 0);
    }

    #[test]
    fn test_from_verbose_level_4_and_higher() {
        for level in [4, 5, 9] {
            let config = VerbosityConfig::from_verbose_level(level);
            assert!(InfoFlag::ALL.into_iter().all(|f| config.info.get(f) == 2));
            assert_eq!(config.debug.walk, 2);
            assert_eq!(config.debug.io, 2);
        }
    }

    #[test]
    fn test_parse_flag_token() {
        assert_eq!(parse_flag_token("copy").unwrap(), ("copy", 1));
        assert_eq!(parse_flag_token("copy2").unwrap(), ("copy", 2));
        assert_eq!(parse_flag_token("walk10").unwrap(), ("walk", 10));
        assert!(parse_flag_token("").is_err());
        assert!(parse_flag_token("3").is_err());
        assert!(parse_flag_token("walk999").is_err());
    }

    #[test]
    fn test_apply_info_flag() {
        let mut config = VerbosityConfig::default();
        config.apply_info_flag("remove2").unwrap();
        assert_eq!(config.info.remove, 2);
        assert!(config.apply_info_flag("bogus").is_err());
    }

    #[test]
    fn test_apply_debug_flag() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flag("dup").unwrap();
        config.apply_debug_flag("lock3").unwrap();
        assert_eq!(config.debug.dup, 1);
        assert_eq!(config.debug.lock, 3);
        let error = config.apply_debug_flag("nope").unwrap_err();
        assert_eq!(error, "unknown debug flag: nope");
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_verbosity_config_serde_roundtrip() {
            let config = VerbosityConfig::from_verbose_level(3);
            let json = serde_json::to_string(&config).unwrap();
            let decoded: VerbosityConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded, config);
        }
    }
}
