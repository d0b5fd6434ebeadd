//! Portfolio content: the zero-argument commands the host plugs into the
//! dispatcher.
//!
//! Pure functions from (profile, environment snapshot, theme store) to
//! [`Output`]. The text comes from a configurable [`Profile`].

use serde::Deserialize;

use crate::dispatch::ContentRegistry;
use crate::platform::EnvironmentInfo;
use crate::themes::ThemeStore;
use crate::types::{Output, OutputLine, Tone};

// ============================================================================
// PROFILE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Social {
    pub label: String,
    pub url: String,
}

/// Who the portfolio is about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// Full name, used in `about`.
    pub name: String,
    /// Login shown in the prompt and header.
    pub user: String,
    /// Paragraphs of the `about` text.
    pub bio: Vec<String>,
    pub location: String,
    pub open_to: String,
    pub projects: Vec<Project>,
    /// "All projects" link under the project list.
    pub projects_url: Option<String>,
    pub socials: Vec<Social>,
    pub tech_stack: Vec<String>,
    /// Where the resume PDF can be opened.
    pub resume_url: String,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            name: "Your Name".into(),
            user: "guest".into(),
            bio: vec![
                "I build practical systems, explore how things work at scale, and learn by \
                 designing, breaking and improving real-world applications."
                    .into(),
                "Currently focusing on data structures and algorithms, end-to-end software \
                 projects, and security-oriented system design."
                    .into(),
            ],
            location: "Earth".into(),
            open_to: "Freelance & Full-time opportunities".into(),
            projects: vec![Project {
                title: "terminal-folio".into(),
                description: "This portfolio: a simulated shell session in your terminal.".into(),
                tags: vec!["Rust".into(), "ratatui".into()],
                github: None,
                demo: None,
            }],
            projects_url: None,
            socials: vec![Social {
                label: "Email".into(),
                url: "mailto:you@example.com".into(),
            }],
            tech_stack: vec![
                "Rust".into(),
                "TypeScript".into(),
                "Git / GitHub".into(),
                "Docker".into(),
            ],
            resume_url: "resume.pdf".into(),
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Registered command names, in `help` order. `cv` is an alias of `resume`.
pub const COMMANDS: [&str; 9] = [
    "help", "about", "projects", "cv", "resume", "socials", "neofetch", "themes", "gui",
];

/// The default content registry.
#[derive(Debug, Clone)]
pub struct PortfolioContent {
    profile: Profile,
    env: EnvironmentInfo,
}

impl PortfolioContent {
    pub fn new(profile: Profile, env: EnvironmentInfo) -> Self {
        PortfolioContent { profile, env }
    }
}

impl ContentRegistry for PortfolioContent {
    fn contains(&self, name: &str) -> bool {
        COMMANDS.contains(&name)
    }

    fn resolve(&self, name: &str, themes: &ThemeStore) -> Option<Output> {
        let output = match name {
            "help" => help(),
            "about" => about(&self.profile),
            "projects" => projects(&self.profile),
            "cv" | "resume" => resume(&self.profile),
            "socials" => socials(&self.profile),
            "neofetch" => neofetch(&self.profile, &self.env),
            "themes" => themes_list(themes),
            "gui" => gui(),
            _ => return None,
        };
        Some(output)
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

const HELP: [(&str, &str); 10] = [
    ("help", "Display all available commands"),
    ("about", "Learn more about me"),
    ("projects", "View my projects portfolio"),
    ("cv / resume", "View my resume/CV"),
    ("socials", "Find me on social media"),
    ("neofetch", "Display system information"),
    ("themes", "List available color themes"),
    ("themes set <n>", "Change color theme"),
    ("gui", "Switch to graphical interface"),
    ("clear", "Clear terminal history"),
];

fn help() -> Output {
    let mut lines = vec![OutputLine::of("Available commands:", Tone::Normal), OutputLine::blank()];
    for (cmd, desc) in HELP {
        lines.push(OutputLine::of(format!("{:<18}", cmd), Tone::Bold).push(desc, Tone::Dim));
    }
    Output::new(lines)
}

fn about(profile: &Profile) -> Output {
    let mut lines = vec![
        OutputLine::of(format!("Hi, I'm {}", profile.name), Tone::Heading),
        OutputLine::blank(),
    ];
    for paragraph in &profile.bio {
        lines.push(OutputLine::of(paragraph.as_str(), Tone::Normal));
        lines.push(OutputLine::blank());
    }
    lines.push(OutputLine::of(format!("Location: {}", profile.location), Tone::Dim));
    lines.push(OutputLine::of(format!("Open to: {}", profile.open_to), Tone::Dim));
    Output::new(lines)
}

fn projects(profile: &Profile) -> Output {
    let mut lines = vec![OutputLine::of("Featured Projects", Tone::Heading), OutputLine::blank()];

    for project in &profile.projects {
        lines.push(OutputLine::of(project.title.as_str(), Tone::Bold));
        lines.push(OutputLine::of(project.description.as_str(), Tone::Normal));
        if !project.tags.is_empty() {
            let tags = project
                .tags
                .iter()
                .map(|t| format!("[{}]", t))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(OutputLine::of(tags, Tone::Dim));
        }
        if let Some(url) = &project.github {
            lines.push(OutputLine::of("Code: ", Tone::Normal).push(url.as_str(), Tone::Accent));
        }
        if let Some(url) = &project.demo {
            lines.push(OutputLine::of("Demo: ", Tone::Normal).push(url.as_str(), Tone::Accent));
        }
        lines.push(OutputLine::blank());
    }

    if let Some(url) = &profile.projects_url {
        lines.push(
            OutputLine::of("You can find all my projects at ", Tone::Dim).push(url.as_str(), Tone::Accent),
        );
    }
    Output::new(lines)
}

fn resume(profile: &Profile) -> Output {
    Output::new(vec![
        OutputLine::of("My Resume", Tone::Heading),
        OutputLine::blank(),
        OutputLine::of("Open: ", Tone::Normal).push(profile.resume_url.as_str(), Tone::Accent),
        OutputLine::of(
            "PDF preview is not available in a terminal; open the link in a viewer.",
            Tone::Dim,
        ),
    ])
}

fn socials(profile: &Profile) -> Output {
    let mut lines = vec![OutputLine::of("Connect with me:", Tone::Heading), OutputLine::blank()];
    for social in &profile.socials {
        lines.push(
            OutputLine::of(format!("{:<10}", social.label), Tone::Bold).push(social.url.as_str(), Tone::Accent),
        );
    }
    Output::new(lines)
}

fn neofetch(profile: &Profile, env: &EnvironmentInfo) -> Output {
    let mut lines = vec![
        OutputLine::of(format!("{}@portfolio", profile.user), Tone::Heading),
        OutputLine::of("─".repeat(24), Tone::Dim),
        OutputLine::of("OS: ", Tone::Bold).push(env.platform.as_str(), Tone::Normal),
        OutputLine::of("Terminal: ", Tone::Bold).push(env.terminal.as_str(), Tone::Normal),
        OutputLine::of("Resolution: ", Tone::Bold).push(env.resolution.as_str(), Tone::Normal),
        OutputLine::of("Language: ", Tone::Bold).push(env.locale.as_str(), Tone::Normal),
        OutputLine::blank(),
        OutputLine::of("Tech Stack", Tone::Heading),
        OutputLine::of("─".repeat(24), Tone::Dim),
    ];
    for tech in &profile.tech_stack {
        lines.push(OutputLine::of(tech.as_str(), Tone::Normal));
    }
    Output::new(lines)
}

fn themes_list(themes: &ThemeStore) -> Output {
    let active = themes.active_key();
    let mut lines = vec![OutputLine::of("Available Themes:", Tone::Heading), OutputLine::blank()];
    for (key, theme) in themes.list() {
        let marker = if key == active { "* " } else { "  " };
        lines.push(
            OutputLine::of(marker, Tone::Accent)
                .push(format!("{:<14}", key), Tone::Bold)
                .push(format!("{:<14}", theme.name), Tone::Normal)
                .push(
                    format!("{} {} {}", theme.background, theme.foreground, theme.accent),
                    Tone::Dim,
                ),
        );
    }
    lines.push(OutputLine::blank());
    lines.push(OutputLine::of("Usage: ", Tone::Dim).push("themes set <name>", Tone::Bold));
    Output::new(lines)
}

fn gui() -> Output {
    Output::new(vec![
        OutputLine::of("Initializing graphical interface...", Tone::Normal),
        OutputLine::of("Redirecting...", Tone::Accent),
        OutputLine::of("(GUI mode coming soon!)", Tone::Dim),
    ])
}

// ============================================================================
// TESTS
// ============================================================================
