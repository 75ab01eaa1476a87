//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["assembly.toml", ".assembly.toml"];

/// Prefix of environment overrides (`ASSEMBLY_OUTPUT__FORMAT=json`)
const ENV_PREFIX: &str = "ASSEMBLY_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `ASSEMBLY_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./assembly.toml` or `./.assembly.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/assembly-quorum/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )?
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(Box::new)
    }

    /// Merge the given files over the defaults (no environment)
    pub fn load_files(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(global, project, explicit)?
            .extract()
            .map_err(Box::new)
    }

    fn figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Figment, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // An explicit path must exist; it is never searched for in parent directories
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file_exact(path));
        }

        Ok(figment)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/assembly-quorum/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("assembly-quorum").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        let overrides: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if overrides.is_empty() {
            println!("  [     ] Env:     {}*", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:     {}", overrides.join(", "));
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./assembly.toml or ./.assembly.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assembly_domain::OutputFormat;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.decision.prefer_manual_tally);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("assembly-quorum"));
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("assembly.toml");
        fs::write(
            &global,
            "[output]\nformat = \"full\"\ncolor = false\n\n[decision]\nprefer_manual_tally = false\n",
        )
        .unwrap();
        fs::write(&project, "[output]\nformat = \"json\"\n").unwrap();

        let config = ConfigLoader::load_files(Some(&global), Some(&project), None).unwrap();
        // project wins on format, global still applies elsewhere
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.decision.prefer_manual_tally);
        // untouched keys keep their defaults
        assert_eq!(config.output.ratio_precision, 3);
    }

    #[test]
    fn test_explicit_file_has_highest_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("assembly.toml");
        let explicit = dir.path().join("custom.toml");
        fs::write(&project, "[journal]\npath = \"a.jsonl\"\n").unwrap();
        fs::write(&explicit, "[journal]\npath = \"b.jsonl\"\n").unwrap();

        let config = ConfigLoader::load_files(None, Some(&project), Some(&explicit)).unwrap();
        assert_eq!(config.journal.path, Some(PathBuf::from("b.jsonl")));
    }

    #[test]
    fn test_missing_files_are_skipped_but_explicit_is_required() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = ConfigLoader::load_files(Some(&missing), Some(&missing), None).unwrap();
        assert!(config.output.format.is_none());

        let err = ConfigLoader::load_files(None, None, Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_explicit_file_is_not_searched_in_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("custom.toml"), "[output]\nformat = \"json\"\n").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();

        // only the parent directory has custom.toml
        let relative = nested.join("custom.toml");
        assert!(ConfigLoader::load_files(None, None, Some(&relative)).is_err());

        let config =
            ConfigLoader::load_files(None, None, Some(&dir.path().join("custom.toml"))).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "[output]\nformat = \"pdf\"\n").unwrap();

        assert!(ConfigLoader::load_files(None, None, Some(&explicit)).is_err());
    }
}
