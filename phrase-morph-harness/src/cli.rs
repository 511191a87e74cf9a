use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use phrase_morph::MorphConfig;

/// Terminal host for the morphing headline.
#[derive(Parser, Debug)]
#[command(name = "phrase-morph-harness")]
#[command(about = "Cycle localized headline phrases with a morph transition")]
pub struct Args {
    /// Page path; its first segment picks the locale (`/en`, `/km`)
    #[arg(long, default_value = "/en")]
    pub path: String,

    /// Phrase to cycle instead of the locale bundle's list (repeatable)
    #[arg(long = "phrase", value_name = "TEXT")]
    pub phrases: Vec<String>,

    /// Length of each morph, in milliseconds
    #[arg(long, default_value_t = 2000)]
    pub morph_ms: u64,

    /// Rest on each phrase for this long, in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub cooldown_ms: u64,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Write logs here; the terminal itself is taken by the UI
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn morph_config(&self) -> MorphConfig {
        MorphConfig {
            morph_duration: Duration::from_millis(self.morph_ms),
            cooldown_duration: Duration::from_millis(self.cooldown_ms),
            ..MorphConfig::HERO
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hero_timing() {
        let args = Args::parse_from(["phrase-morph-harness"]);

        assert_eq!(args.morph_config(), MorphConfig::HERO);
        assert_eq!(args.path, "/en");
        assert!(args.phrases.is_empty());
    }

    #[test]
    fn phrases_repeat() {
        let args = Args::parse_from([
            "phrase-morph-harness",
            "--phrase",
            "Plan",
            "--phrase",
            "Track",
            "--fps",
            "30",
        ]);

        assert_eq!(args.phrases, ["Plan", "Track"]);
        assert_eq!(args.frame_interval(), Duration::from_secs(1) / 30);
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(Args::try_parse_from(["phrase-morph-harness", "--fps", "0"]).is_err());
    }
}
