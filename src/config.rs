//! Command-line options

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "flappy-gap")]
#[command(about = "Flap through the gaps. Space to jump, q to quit.")]
pub struct Config {
    /// High score history file
    #[arg(long, default_value = "scores.txt")]
    pub scores: PathBuf,

    /// Background music, looped while playing
    #[arg(long, default_value = "audio.mp3")]
    pub music: PathBuf,

    /// Seed for obstacle gaps (default: from the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where diagnostics go; the terminal is busy drawing the game
    #[arg(long, default_value = "flappy-gap.log")]
    pub log_file: PathBuf,

    /// No music or sound effects
    #[arg(long)]
    pub mute: bool,
}

impl Config {
    /// The configured seed, or one derived from the current time
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["flappy-gap"]);
        assert_eq!(config.scores, PathBuf::from("scores.txt"));
        assert_eq!(config.music, PathBuf::from("audio.mp3"));
        assert_eq!(config.log_file, PathBuf::from("flappy-gap.log"));
        assert!(config.seed.is_none());
        assert!(!config.mute);
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse_from([
            "flappy-gap",
            "--scores",
            "/tmp/s.txt",
            "--seed",
            "42",
            "--mute",
        ]);
        assert_eq!(config.scores, PathBuf::from("/tmp/s.txt"));
        assert_eq!(config.seed(), 42);
        assert!(config.mute);
    }
}
