use std::fmt;
use std::str::FromStr;

use super::ContextError;

/// Recognized context configuration keys.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ConfigKey {
    RedSize,
    GreenSize,
    BlueSize,
    AlphaSize,
    DepthSize,
    StencilSize,
    DoubleBuffer,
    Stereo,
    Samples,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 9] = [
        ConfigKey::RedSize,
        ConfigKey::GreenSize,
        ConfigKey::BlueSize,
        ConfigKey::AlphaSize,
        ConfigKey::DepthSize,
        ConfigKey::StencilSize,
        ConfigKey::DoubleBuffer,
        ConfigKey::Stereo,
        ConfigKey::Samples,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ConfigKey::RedSize => "red_size",
            ConfigKey::GreenSize => "green_size",
            ConfigKey::BlueSize => "blue_size",
            ConfigKey::AlphaSize => "alpha_size",
            ConfigKey::DepthSize => "depth_size",
            ConfigKey::StencilSize => "stencil_size",
            ConfigKey::DoubleBuffer => "double_buffer",
            ConfigKey::Stereo => "stereo",
            ConfigKey::Samples => "samples",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ContextError::UnknownConfigKey(s.to_string()))
    }
}

/// A configuration value as supplied by a caller.
///
/// Only `Int` and `Bool` are valid for the recognized keys; the other
/// variants exist so that mistyped input can be reported instead of being
/// unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Int(i64),
    Bool(bool),
    Float(f64),
    Str(String),
}

impl ConfigValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Int(_) => "int",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Float(_) => "float",
            ConfigValue::Str(_) => "str",
        }
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Int(v)
    }
}

impl From<i32> for ConfigValue {
    fn from(v: i32) -> Self {
        ConfigValue::Int(v.into())
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Float(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::Str(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        ConfigValue::Str(v)
    }
}

/// Pixel-format request of a rendering surface.
///
/// The backend reads this to pick a matching native configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    pub red_size: i64,
    pub green_size: i64,
    pub blue_size: i64,
    pub alpha_size: i64,
    pub depth_size: i64,
    pub stencil_size: i64,
    pub double_buffer: bool,
    pub stereo: bool,
    pub samples: i64,
}

impl Default for ContextConfig {
    /// 8-bit RGBA, 16-bit depth, no stencil, double-buffered, no stereo,
    /// no multisampling.
    fn default() -> Self {
        Self {
            red_size: 8,
            green_size: 8,
            blue_size: 8,
            alpha_size: 8,
            depth_size: 16,
            stencil_size: 0,
            double_buffer: true,
            stereo: false,
            samples: 0,
        }
    }
}

/// Returns a fresh copy of the default configuration.
pub fn default_config() -> ContextConfig {
    ContextConfig::default()
}

impl ContextConfig {
    /// Builds a configuration by laying `overrides` over the defaults.
    ///
    /// Fails on the first unknown key or mistyped value; no partially
    /// applied configuration escapes.
    pub fn from_overrides<I, K, V>(overrides: I) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ConfigValue>,
    {
        let mut config = Self::default();
        for (key, value) in overrides {
            let key: ConfigKey = key.as_ref().parse()?;
            config.set(key, value.into())?;
        }
        Ok(config)
    }

    pub fn get(&self, key: ConfigKey) -> ConfigValue {
        match key {
            ConfigKey::RedSize => ConfigValue::Int(self.red_size),
            ConfigKey::GreenSize => ConfigValue::Int(self.green_size),
            ConfigKey::BlueSize => ConfigValue::Int(self.blue_size),
            ConfigKey::AlphaSize => ConfigValue::Int(self.alpha_size),
            ConfigKey::DepthSize => ConfigValue::Int(self.depth_size),
            ConfigKey::StencilSize => ConfigValue::Int(self.stencil_size),
            ConfigKey::DoubleBuffer => ConfigValue::Bool(self.double_buffer),
            ConfigKey::Stereo => ConfigValue::Bool(self.stereo),
            ConfigKey::Samples => ConfigValue::Int(self.samples),
        }
    }

    /// Looks a value up by its string key.
    pub fn get_str(&self, key: &str) -> Result<ConfigValue, ContextError> {
        Ok(self.get(key.parse()?))
    }

    /// Sets one key, rejecting values whose type differs from the default's.
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue) -> Result<(), ContextError> {
        let mismatch = |expected: &'static str, value: &ConfigValue| ContextError::ConfigType {
            key: key.as_str(),
            expected,
            found: value.type_name(),
        };

        match (key, value) {
            (ConfigKey::DoubleBuffer, ConfigValue::Bool(v)) => self.double_buffer = v,
            (ConfigKey::Stereo, ConfigValue::Bool(v)) => self.stereo = v,
            (ConfigKey::DoubleBuffer | ConfigKey::Stereo, other) => {
                return Err(mismatch("bool", &other));
            }
            (ConfigKey::RedSize, ConfigValue::Int(v)) => self.red_size = v,
            (ConfigKey::GreenSize, ConfigValue::Int(v)) => self.green_size = v,
            (ConfigKey::BlueSize, ConfigValue::Int(v)) => self.blue_size = v,
            (ConfigKey::AlphaSize, ConfigValue::Int(v)) => self.alpha_size = v,
            (ConfigKey::DepthSize, ConfigValue::Int(v)) => self.depth_size = v,
            (ConfigKey::StencilSize, ConfigValue::Int(v)) => self.stencil_size = v,
            (ConfigKey::Samples, ConfigValue::Int(v)) => self.samples = v,
            (_, other) => return Err(mismatch("int", &other)),
        }
        Ok(())
    }

    /// Iterates all keys with their current values.
    pub fn iter(&self) -> impl Iterator<Item = (ConfigKey, ConfigValue)> + '_ {
        ConfigKey::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = default_config();
        assert_eq!(c.get(ConfigKey::RedSize), ConfigValue::Int(8));
        assert_eq!(c.get(ConfigKey::DepthSize), ConfigValue::Int(16));
        assert_eq!(c.get(ConfigKey::StencilSize), ConfigValue::Int(0));
        assert_eq!(c.get(ConfigKey::DoubleBuffer), ConfigValue::Bool(true));
        assert_eq!(c.get(ConfigKey::Stereo), ConfigValue::Bool(false));
        assert_eq!(c.get(ConfigKey::Samples), ConfigValue::Int(0));
        assert_eq!(c.iter().count(), 9);
    }

    #[test]
    fn override_keeps_other_defaults() {
        let c = ContextConfig::from_overrides([("stencil_size", 8_i64)]).unwrap();
        assert_eq!(c.get_str("stencil_size").unwrap(), ConfigValue::Int(8));
        assert_eq!(
            ContextConfig { stencil_size: 0, ..c.clone() },
            ContextConfig::default()
        );
    }

    #[test]
    fn unknown_key_rejected() {
        let err = ContextConfig::from_overrides([("bogus_key", 1_i64)]).unwrap_err();
        assert_eq!(err, ContextError::UnknownConfigKey("bogus_key".to_string()));
        assert!(err.is_config());
    }

    #[test]
    fn wrong_type_rejected() {
        let err = ContextConfig::from_overrides([("samples", "high")]).unwrap_err();
        assert_eq!(
            err,
            ContextError::ConfigType {
                key: "samples",
                expected: "int",
                found: "str",
            }
        );
    }

    #[test]
    fn bool_is_not_an_int() {
        let err = ContextConfig::from_overrides([("depth_size", true)]).unwrap_err();
        assert!(matches!(err, ContextError::ConfigType { key: "depth_size", .. }));

        let err = ContextConfig::from_overrides([("stereo", 1_i64)]).unwrap_err();
        assert!(matches!(err, ContextError::ConfigType { expected: "bool", .. }));
    }

    #[test]
    fn mixed_value_types() {
        let overrides: [(&str, ConfigValue); 2] =
            [("stereo", ConfigValue::Bool(true)), ("samples", ConfigValue::Int(4))];
        let c = ContextConfig::from_overrides(overrides).unwrap();
        assert!(c.stereo);
        assert_eq!(c.samples, 4);
    }

    #[test]
    fn key_names_round_trip() {
        for key in ConfigKey::ALL {
            assert_eq!(key.as_str().parse::<ConfigKey>().unwrap(), key);
        }
    }
}
