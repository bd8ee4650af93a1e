use std::path::{Path, PathBuf};

use anyhow::Context as _;
use blockfall_engine::{BagSeed, Rules};
use ratatui_runtime::Runtime;

use self::app::PlayApp;
use crate::{ui::widgets::format_time, util};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece sequence seed as 32 hex digits; every game replays it
    #[clap(long)]
    pub(crate) seed: Option<BagSeed>,
    /// Rules JSON file (see the `rules` command)
    #[clap(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Starting level, overriding the rules file
    #[clap(long)]
    pub(crate) level: Option<u32>,
    /// Frames per second of the game loop
    #[clap(long, default_value_t = 60.0)]
    pub(crate) fps: f64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            rules: None,
            level: None,
            fps: 60.0,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        rules,
        level,
        fps,
    } = arg;

    let rules = load_rules(rules.as_deref(), *level)?;
    anyhow::ensure!(
        fps.is_finite() && *fps >= 1.0,
        "fps must be at least 1, got {fps}"
    );

    let mut app = PlayApp::new(rules, *seed, *fps);
    Runtime::new().run(&mut app)?;

    let results = app.into_results();
    eprintln!("Played {} game(s)", results.len());
    for (i, result) in results.iter().enumerate() {
        eprintln!(
            "  #{}: {}, score {}, {} lines, level {}, {} pieces in {} (seed {})",
            i + 1,
            result.reason,
            result.stats.score(),
            result.stats.total_cleared_lines(),
            result.stats.level(),
            result.stats.completed_pieces(),
            format_time(result.elapsed),
            result.seed,
        );
    }
    Ok(())
}

fn load_rules(path: Option<&Path>, level: Option<u32>) -> anyhow::Result<Rules> {
    let mut rules = match path {
        Some(path) => {
            let rules = util::read_json_file::<Rules, _>("rules", path)?;
            eprintln!("Loaded rules from {}", path.display());
            rules
        }
        None => Rules::default(),
    };
    if let Some(level) = level {
        rules.starting_level = level;
    }
    rules.validate().context("Invalid rules")?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use std::{fs, process};

    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("blockfall-{}-{name}", process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_rules_without_file() {
        assert_eq!(load_rules(None, None).unwrap(), Rules::default());
    }

    #[test]
    fn test_level_overrides_rules_file() {
        let path = temp_file("level.json", r#"{ "starting_level": 3, "lock_delay": 1.0 }"#);
        let rules = load_rules(Some(&path), Some(7)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(rules.starting_level, 7);
        assert!((rules.lock_delay - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_rules_are_reported() {
        let err = load_rules(None, Some(0)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid rules");
        assert_eq!(err.root_cause().to_string(), "starting level must be at least 1");
    }

    #[test]
    fn test_unreadable_rules_file() {
        let path = temp_file("broken.json", "{ not json");
        let err = load_rules(Some(&path), None).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().starts_with("Failed to parse rules JSON file"));

        let err = load_rules(Some(Path::new("/nonexistent/rules.json")), None).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open rules file"));
    }
}
