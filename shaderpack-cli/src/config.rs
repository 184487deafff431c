use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shaderpack::{Encoding, EscapeMode, PackOptions};

use crate::cli::Cli;

pub const CONFIG_FILE_NAME: &str = "shaderpack.toml";

/// Settings read from shaderpack.toml. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackConfig {
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub escape: Option<EscapeMode>,
    #[serde(default)]
    pub encoding: Option<Encoding>,
    #[serde(default)]
    pub recursive: Option<bool>,
    #[serde(default)]
    pub create_output: Option<bool>,
}

/// A config file together with where it was found.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Directory holding the file; relative paths in it resolve from here.
    pub base_dir: PathBuf,
    pub path: PathBuf,
    pub config: PackConfig,
}

pub fn load_config(path: &Path) -> anyhow::Result<LoadedConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: PackConfig =
        toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(LoadedConfig {
        base_dir,
        path: path.to_path_buf(),
        config,
    })
}

/// Find shaderpack.toml starting from a specific directory, walking up.
pub fn find_config_from(start: &Path) -> anyhow::Result<Option<LoadedConfig>> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return load_config(&candidate).map(Some);
        }
        if !dir.pop() {
            return Ok(None);
        }
    }
}

/// Combine defaults, the config file and command line flags, in rising precedence.
pub fn resolve_options(cli: &Cli, loaded: Option<&LoadedConfig>) -> PackOptions {
    let mut opts = PackOptions::default();

    if let Some(loaded) = loaded {
        let cfg = &loaded.config;
        if let Some(dir) = &cfg.input_dir {
            opts.input_dir = loaded.base_dir.join(dir);
        }
        if let Some(dir) = &cfg.output_dir {
            opts.output_dir = loaded.base_dir.join(dir);
        }
        opts.escape = cfg.escape.unwrap_or(opts.escape);
        opts.encoding = cfg.encoding.unwrap_or(opts.encoding);
        opts.recursive = cfg.recursive.unwrap_or(opts.recursive);
        opts.create_output = cfg.create_output.unwrap_or(opts.create_output);
    }

    if let Some(dir) = &cli.input {
        opts.input_dir = dir.clone();
    }
    if let Some(dir) = &cli.output {
        opts.output_dir = dir.clone();
    }
    if let Some(escape) = cli.escape {
        opts.escape = escape;
    }
    if cli.compat {
        opts.escape = EscapeMode::Compat;
    }
    if let Some(encoding) = cli.encoding {
        opts.encoding = encoding;
    }
    if cli.recursive {
        opts.recursive = true;
    } else if cli.no_recursive {
        opts.recursive = false;
    }
    if cli.create_output {
        opts.create_output = true;
    } else if cli.no_create_output {
        opts.create_output = false;
    }
    opts
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("shaderpack").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_without_config() {
        let opts = resolve_options(&cli(&[]), None);
        assert_eq!(opts, PackOptions::default());
        assert_eq!(opts.input_dir, PathBuf::from("./shaders"));
        assert_eq!(opts.output_dir, PathBuf::from("src/gen"));
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "input_dir = \"glsl\"\noutput_dir = \"include/gen\"\nescape = \"compat\"\nencoding = \"bytes\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let loaded = find_config_from(&nested).unwrap().unwrap();
        assert_eq!(loaded.base_dir, dir.path());
        assert_eq!(loaded.config.escape, Some(EscapeMode::Compat));

        let opts = resolve_options(&cli(&[]), Some(&loaded));
        assert_eq!(opts.input_dir, dir.path().join("glsl"));
        assert_eq!(opts.output_dir, dir.path().join("include/gen"));
        assert_eq!(opts.escape, EscapeMode::Compat);
        assert_eq!(opts.encoding, Encoding::Bytes);
        assert!(!opts.recursive);
    }

    #[test]
    fn test_no_config_found() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("x");
        std::fs::create_dir(&nested).unwrap();
        // Only meaningful when no ancestor of the temp dir has a config.
        if let Some(found) = find_config_from(&nested).unwrap() {
            assert!(!found.base_dir.starts_with(dir.path()));
        }
    }

    #[test]
    fn test_cli_overrides_config() {
        let loaded = LoadedConfig {
            base_dir: PathBuf::from("/proj"),
            path: PathBuf::from("/proj/shaderpack.toml"),
            config: PackConfig {
                input_dir: Some("glsl".into()),
                encoding: Some(Encoding::Bytes),
                ..PackConfig::default()
            },
        };
        let opts = resolve_options(
            &cli(&["-i", "other", "--encoding", "lines", "--create-output"]),
            Some(&loaded),
        );
        assert_eq!(opts.input_dir, PathBuf::from("other"));
        assert_eq!(opts.encoding, Encoding::Lines);
        assert!(opts.create_output);
    }

    #[test]
    fn test_cli_can_undo_config_switches() {
        let loaded = LoadedConfig {
            base_dir: PathBuf::from("/proj"),
            path: PathBuf::from("/proj/shaderpack.toml"),
            config: PackConfig {
                escape: Some(EscapeMode::Compat),
                recursive: Some(true),
                create_output: Some(true),
                ..PackConfig::default()
            },
        };
        let opts = resolve_options(&cli(&[]), Some(&loaded));
        assert_eq!(opts.escape, EscapeMode::Compat);
        assert!(opts.recursive);
        assert!(opts.create_output);

        let opts = resolve_options(
            &cli(&["--escape", "escaped", "--no-recursive", "--no-create-output"]),
            Some(&loaded),
        );
        assert_eq!(opts.escape, EscapeMode::Escaped);
        assert!(!opts.recursive);
        assert!(!opts.create_output);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "shader_dir = \"x\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
