//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::Utc;

use telly_core::{CatalogShow, Episode, Show};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a list of shows with their unwatched counts
    pub fn print_shows(&self, shows: &[&Show], episodes: &[Episode]) {
        match self.format {
            OutputFormat::Human => {
                if shows.is_empty() {
                    println!("No shows tracked.");
                    return;
                }
                let now = Utc::now();
                for show in shows {
                    let unwatched = episodes
                        .iter()
                        .filter(|e| {
                            e.show_id == show.id && e.is_released(now) && !e.watched
                        })
                        .count();
                    let status = show.status.as_deref().unwrap_or("-");
                    let marker = if show.ignored { " [ignored]" } else { "" };
                    println!(
                        "{:>8} | {:<35} | {:<8} | {} unwatched{}",
                        show.id,
                        truncate(&show.name, 35),
                        status,
                        unwatched,
                        marker
                    );
                }
                println!("\n{} show(s)", shows.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(shows).unwrap());
            }
            OutputFormat::Quiet => {
                for show in shows {
                    println!("{}", show.id);
                }
            }
        }
    }

    /// Print a list of episodes with aired/watched markers
    pub fn print_episodes(&self, episodes: &[&Episode]) {
        match self.format {
            OutputFormat::Human => {
                if episodes.is_empty() {
                    println!("No episodes.");
                    return;
                }
                let now = Utc::now();
                for episode in episodes {
                    let airdate = episode
                        .airdate
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "TBA".to_string());
                    let state = if episode.watched {
                        "watched"
                    } else if episode.is_released(now) {
                        "unwatched"
                    } else {
                        "upcoming"
                    };
                    println!(
                        "{:>8} | {} | {:<30} | {:<10} | {}",
                        episode.id,
                        episode.label(),
                        truncate(&episode.name, 30),
                        airdate,
                        state
                    );
                }
                println!("\n{} episode(s)", episodes.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(episodes).unwrap());
            }
            OutputFormat::Quiet => {
                for episode in episodes {
                    println!("{}", episode.id);
                }
            }
        }
    }

    /// Print untracked catalog metadata
    pub fn print_catalog_show(&self, show: &CatalogShow) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:     {}", show.id);
                println!("Name:   {}", show.name);
                println!("Status: {}", show.status.as_deref().unwrap_or("-"));
                if let Some(ref image) = show.image {
                    println!("Image:  {}", image);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(show).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", show.id);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }
}
