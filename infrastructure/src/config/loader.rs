//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
const PROJECT_CONFIG: &str = "ark.toml";
/// Environment prefix; `__` separates section and key
const ENV_PREFIX: &str = "ARK_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./ark.toml`
    /// 3. Global: `$XDG_CONFIG_HOME/ark-runtime/config.toml`
    /// 4. `ARK_` environment variables (`ARK_RUNTIME__DEFAULT_NAMESPACE=team-a`)
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();
        Self::figment(global.as_deref(), project.as_deref(), config_path)
            .extract()
            .map_err(Box::new)
    }

    /// Build the merged figment from explicit source locations
    pub fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = global {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }
        // An explicit path that does not exist is an error, not a silent skip
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }
        figment
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// `$XDG_CONFIG_HOME/ark-runtime/config.toml` (or the platform equivalent)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ark-runtime").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = config_path {
            let found = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{found:^7}] Explicit: {}", path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [ FOUND ] Project:  {}", path.display()),
            None => println!("  [       ] Project:  ./{PROJECT_CONFIG}"),
        }

        if let Some(path) = Self::global_config_path() {
            let found = if path.exists() { " FOUND " } else { "       " };
            println!("  [{found}] Global:   {}", path.display());
        }

        let env_count = std::env::vars().filter(|(k, _)| k.starts_with(ENV_PREFIX)).count();
        println!("  [{env_count:^7}] Env:      {ENV_PREFIX}* variables");
        println!("  [       ] Default:  built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.runtime.default_namespace, "default");
        assert_eq!(config.evaluators.baseline_timeout_secs, 120);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("ark-runtime"));
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            &dir,
            "global.toml",
            "[runtime]\ndefault_namespace = \"global\"\n\n[evaluators]\ntimeout_secs = 10\n",
        );
        let project = write_toml(&dir, "ark.toml", "[runtime]\ndefault_namespace = \"project\"\n");
        let explicit = write_toml(&dir, "explicit.toml", "[mcp]\nclient_name = \"explicit\"\n");

        let config: FileConfig = ConfigLoader::figment(Some(&global), Some(&project), Some(&explicit))
            .extract()
            .unwrap();

        assert_eq!(config.runtime.default_namespace, "project");
        assert_eq!(config.evaluators.timeout_secs, 10);
        assert_eq!(config.evaluators.baseline_timeout_secs, 120);
        assert_eq!(config.mcp.client_name, "explicit");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(&missing)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(&dir, "bad.toml", "[evaluators]\ntimeout_secs = \"thirty\"\n");
        assert!(ConfigLoader::load(Some(&path)).is_err());
    }
}
