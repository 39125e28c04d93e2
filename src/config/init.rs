use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::catalog::{default_subjects, UnknownSubjectPolicy};
use crate::config::{get_config_path, Config};
use crate::scoring::JurisdictionId;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

fn parse_policy(input: &str) -> Option<UnknownSubjectPolicy> {
    match input.trim().to_ascii_lowercase().as_str() {
        "fallback" => Some(UnknownSubjectPolicy::Fallback),
        "reject" => Some(UnknownSubjectPolicy::Reject),
        _ => None,
    }
}

/// Serialize `config` as YAML and write it atomically, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the suggested config file path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("ATAR Calculator Configuration");
    println!("=============================");
    println!();

    println!("Scores are calculated with the rules of one jurisdiction:");
    for jurisdiction in JurisdictionId::ALL {
        println!("  {:<4} {}", jurisdiction.code(), jurisdiction.name());
    }
    let jurisdiction = loop {
        let input = prompt_with_default("Default jurisdiction", "nsw")?;
        match input.parse::<JurisdictionId>() {
            Ok(j) => break j,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    println!();
    println!("Subjects missing from the catalog can be scored at factor 1.0 (fallback)");
    println!("or rejected so typos are caught (reject).");
    let unknown_subjects = loop {
        let input = prompt_with_default("Unknown subjects", "fallback")?;
        match parse_policy(&input) {
            Some(policy) => break policy,
            None => println!("  Invalid: expected 'fallback' or 'reject'. Try again."),
        }
    };

    println!();
    let subjects = if prompt_yes_no(
        "Copy the built-in subject catalog into the config so you can edit it?",
        false,
    )? {
        Some(default_subjects())
    } else {
        None
    };

    println!();
    println!("Courses are matched against the calculated score by their cutoff.");
    let courses_file = {
        let input = prompt("Course file (YAML or JSON, empty to skip): ")?;
        if input.is_empty() {
            None
        } else {
            Some(PathBuf::from(input))
        }
    };

    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        jurisdiction: Some(jurisdiction),
        unknown_subjects,
        subjects,
        courses_file,
        ..Config::default()
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `atar-calc calculate -s \"English (Standard)=A\" ...` to get started.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_parse_policy() {
        assert_eq!(parse_policy(" Reject "), Some(UnknownSubjectPolicy::Reject));
        assert_eq!(parse_policy("fallback"), Some(UnknownSubjectPolicy::Fallback));
        assert_eq!(parse_policy("ignore"), None);
    }

    #[test]
    fn test_write_config_creates_directories_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            jurisdiction: Some(JurisdictionId::Wa),
            unknown_subjects: UnknownSubjectPolicy::Reject,
            courses_file: Some(PathBuf::from("courses.yaml")),
            ..Config::default()
        };

        write_config(&path, &config).unwrap();
        let (loaded, _) = load_config(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_write_config_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "garbage: [").unwrap();

        write_config(&path, &Config::default()).unwrap();
        let (loaded, _) = load_config(Some(path)).unwrap();
        assert_eq!(loaded, Config::default());
    }
}
