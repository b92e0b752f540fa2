use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{ElementKind, ImageSource};
use crate::scene::Scene;

pub const CONTRIBUTION_WEEKS: usize = 52;
pub const CONTRIBUTION_DAYS: usize = 7;

/// Aggregate profile counters, consumed as already-resolved values.
/// Fetching them is a collaborator's job; the engine never talks to the
/// GitHub API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubStats {
    pub total_stars: u64,
    pub total_commits: u64,
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    pub total_issues: u64,
    pub contributed_to: u64,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStat {
    pub name: String,
    pub percentage: f32,
    pub color: String,
}

impl LanguageStat {
    pub fn new(name: &str, percentage: f32, color: &str) -> Self {
        Self {
            name: name.to_string(),
            percentage,
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: String,
    pub count: u32,
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StatBinding {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "Total Stars")]
    TotalStars,
    #[serde(rename = "Total Commits")]
    TotalCommits,
    #[serde(rename = "Total PRs")]
    TotalPrs,
    #[serde(rename = "Total Issues")]
    TotalIssues,
    #[serde(rename = "Contributed to")]
    ContributedTo,
    #[serde(rename = "Public Repositories")]
    PublicRepos,
    #[serde(rename = "Followers")]
    Followers,
    #[serde(rename = "Following")]
    Following,
}

impl StatBinding {
    pub fn resolve(self, stats: &GitHubStats) -> Option<String> {
        match self {
            StatBinding::None => None,
            StatBinding::TotalStars => Some(format_number(stats.total_stars)),
            StatBinding::TotalCommits => Some(format_number(stats.total_commits)),
            StatBinding::TotalPrs => Some(stats.total_prs.to_string()),
            StatBinding::TotalIssues => Some(stats.total_issues.to_string()),
            StatBinding::ContributedTo => Some(stats.contributed_to.to_string()),
            StatBinding::PublicRepos => Some(stats.public_repos.to_string()),
            StatBinding::Followers => Some(stats.followers.to_string()),
            StatBinding::Following => Some(stats.following.to_string()),
        }
    }
}

/// Everything a single binding pass may need. All parts optional: a
/// partial bundle only touches the elements it has data for, so a failed
/// fetch never wipes previously bound values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<GitHubStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<LanguageStat>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions: Option<Vec<ContributionDay>>,
}

/// One-shot data binding: resolves every stat-bound element in the scene
/// from the bundle. Must run before rendering; renderers never fetch.
pub fn apply_stats(scene: &mut Scene, bundle: &StatsBundle) {
    let grid = bundle
        .contributions
        .as_deref()
        .map(contribution_grid);

    let mut touched = 0usize;
    for element in &mut scene.elements {
        match &mut element.kind {
            ElementKind::Text(attrs) => {
                if let Some(stats) = &bundle.stats
                    && let Some(value) = attrs.github_stat.resolve(stats)
                {
                    attrs.content = value;
                    touched += 1;
                }
            }
            ElementKind::StatsCard(attrs) => {
                if let Some(stats) = &bundle.stats
                    && let Some(value) = stat_card_value(&attrs.stat_type, stats)
                {
                    attrs.stat_value = value;
                    touched += 1;
                }
            }
            ElementKind::LanguageBar(attrs) => {
                if let Some(languages) = &bundle.languages {
                    attrs.languages = languages.clone();
                    touched += 1;
                }
            }
            ElementKind::ContributionGraph(attrs) => {
                if let Some(grid) = &grid {
                    attrs.contribution_data = grid.clone();
                    touched += 1;
                }
            }
            ElementKind::Image(attrs) => {
                if attrs.image_type == ImageSource::GithubProfile
                    && let Some(username) = &bundle.username
                {
                    attrs.src = format!("https://github.com/{username}.png");
                    touched += 1;
                }
            }
            _ => {}
        }
    }
    debug!(touched, "stat binding applied");
}

fn stat_card_value(stat_type: &str, stats: &GitHubStats) -> Option<String> {
    let value = match stat_type {
        "stars" => format_number(stats.total_stars),
        "commits" => format_number(stats.total_commits),
        "prs" => stats.total_prs.to_string(),
        "issues" => stats.total_issues.to_string(),
        "repos" => stats.public_repos.to_string(),
        "followers" => format_number(stats.followers),
        _ => return None,
    };
    Some(value)
}

/// Normalizes a day list into the fixed 52x7 grid (weeks outer, days
/// inner). Missing days default to level 0; surplus days are dropped.
pub fn contribution_grid(days: &[ContributionDay]) -> Vec<Vec<u8>> {
    let mut grid = Vec::with_capacity(CONTRIBUTION_WEEKS);
    for week in 0..CONTRIBUTION_WEEKS {
        let mut week_data = Vec::with_capacity(CONTRIBUTION_DAYS);
        for day in 0..CONTRIBUTION_DAYS {
            let index = week * CONTRIBUTION_DAYS + day;
            let level = days.get(index).map(|d| d.level.min(4)).unwrap_or(0);
            week_data.push(level);
        }
        grid.push(week_data);
    }
    grid
}

pub fn contribution_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=8 => 3,
        _ => 4,
    }
}

pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"github\.com/([^/\s?#]+)").expect("username regex"));

pub fn extract_username(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(caps) = USERNAME_RE.captures(trimmed) {
        return Some(caps[1].to_string());
    }
    if trimmed.contains('/') || trimmed.contains(' ') {
        return None;
    }
    Some(trimmed.to_string())
}
