//! Terminal detection for CLI output

use std::io::IsTerminal;

/// Variables set by common CI runners
const CI_MARKERS: [&str; 9] = [
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
];

/// Whether status lines are rendered for a person or for a pipe
#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    styled: bool,
}

impl UiContext {
    /// Styled output only on a terminal outside CI
    pub fn detect() -> Self {
        let terminal = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        let ci = CI_MARKERS.iter().any(|var| std::env::var_os(var).is_some());
        Self {
            styled: terminal && !ci,
        }
    }

    /// Plain prefixed lines
    pub fn plain() -> Self {
        Self { styled: false }
    }

    pub fn is_styled(&self) -> bool {
        self.styled
    }
}
