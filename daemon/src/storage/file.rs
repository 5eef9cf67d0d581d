use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// File writes that keep a `.bak` copy of the previous contents.
pub trait FileIoWithBackup {
    fn write_with_backup<P: AsRef<Path>>(path: P, content: &str) -> Result<(), std::io::Error> {
        let path = path.as_ref();

        if path.exists() {
            std::fs::copy(path, path.with_extension("bak"))?;
        }

        std::fs::write(path, content)
    }
}

/// JSON-file-backed configuration handling.
pub trait Config: FileIoWithBackup {
    type ConfigType: Serialize + DeserializeOwned;

    fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Self::ConfigType> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self::ConfigType = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn save_config<P: AsRef<Path>>(path: P, config: &Self::ConfigType) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        Self::write_with_backup(path, &content)?;
        Ok(())
    }

    /// Loads the file if it exists; otherwise persists and returns the
    /// default, so a first run leaves an editable config behind.
    fn load_config_or_default<P: AsRef<Path>, F: FnOnce() -> Self::ConfigType>(
        path: P,
        default: F,
    ) -> anyhow::Result<Self::ConfigType> {
        match std::fs::metadata(path.as_ref()) {
            Ok(metadata) if metadata.is_file() => Self::load_config(path),
            _ => {
                let config = default();
                Self::save_config(path, &config)?;
                Ok(config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestConfig {
        interval: u64,
        path: String,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                interval: 5000,
                path: "/status".to_string(),
            }
        }
    }

    struct TestLoader;
    impl FileIoWithBackup for TestLoader {}
    impl Config for TestLoader {
        type ConfigType = TestConfig;
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let loaded = TestLoader::load_config_or_default(&path, TestConfig::default).unwrap();
        assert_eq!(loaded, TestConfig::default());
        assert!(path.is_file());

        // Second load reads the file that was just written.
        let reloaded = TestLoader::load_config_or_default(&path, TestConfig::default).unwrap();
        assert_eq!(reloaded, loaded);
    }

    #[test]
    fn rewrite_keeps_a_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        TestLoader::save_config(&path, &TestConfig::default()).unwrap();
        TestLoader::save_config(
            &path,
            &TestConfig {
                interval: 1000,
                path: "/state".to_string(),
            },
        )
        .unwrap();

        let backup = path.with_extension("bak");
        assert!(backup.is_file());
        let old: TestConfig =
            serde_json::from_str(&std::fs::read_to_string(&backup).unwrap()).unwrap();
        assert_eq!(old, TestConfig::default());
    }
}
