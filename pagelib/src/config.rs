use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use crate::error::{ConfigError, Result};
use crate::Page;

/// Upper bound on the number of frames accepted at the input boundary
pub const MAX_FRAMES: usize = 100;

/// Upper bound on the reference string length accepted by the interactive menu
pub const MAX_REFERENCES: usize = 100;

/// Highest page number accepted unless configured otherwise
pub const MAX_PAGE: Page = 999;

/// A simulation configuration, usually parsed from JSON
#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    pub frames: usize,
    #[serde(default = "PolicyKind::all")]
    pub policies: Vec<PolicyKind>,
    #[serde(default = "default_max_page")]
    pub max_page: Page,
    pub reference: ReferenceConfig,
}

/// Where the reference string comes from - an inline list, a random draw, or a file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceConfig {
    Pages(Vec<Page>),
    Random {
        count: usize,
        #[serde(default)]
        seed: Option<u64>,
    },
    Trace(PathBuf),
}

/// The replacement policy - fifo, lru, or optimal
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum PolicyKind {
    #[serde(alias = "fifo", alias = "FIFO")]
    #[value(name = "fifo")]
    Fifo,
    #[serde(alias = "lru", alias = "LRU")]
    #[value(name = "lru")]
    LeastRecentlyUsed,
    #[serde(alias = "optimal", alias = "opt")]
    #[value(name = "optimal", alias = "opt")]
    Optimal,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Fifo, PolicyKind::LeastRecentlyUsed, PolicyKind::Optimal];

    /// Every policy, in menu order. Used as the serde default
    pub fn all() -> Vec<PolicyKind> {
        Self::ALL.to_vec()
    }

    /// Short display name, as used in tables and headers
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::LeastRecentlyUsed => "LRU",
            PolicyKind::Optimal => "Optimal",
        }
    }
}

impl Display for PolicyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn default_max_page() -> Page {
    MAX_PAGE
}

impl SimulationConfig {
    /// Checks everything that can be checked without resolving the reference string
    pub fn validate(&self) -> Result<()> {
        check_frames(self.frames)?;
        if self.policies.is_empty() {
            return Err(ConfigError::NoPolicies);
        }
        match &self.reference {
            ReferenceConfig::Pages(pages) => {
                check_reference_count(pages.len(), usize::MAX)?;
                check_pages(pages, self.max_page)
            }
            ReferenceConfig::Random { count, .. } => check_reference_count(*count, usize::MAX).map(|_| ()),
            ReferenceConfig::Trace(_) => Ok(()),
        }
    }
}

/// Checks a frame count is within 1..=[`MAX_FRAMES`]
pub fn check_frames(frames: usize) -> Result<usize> {
    if frames == 0 || frames > MAX_FRAMES {
        return Err(ConfigError::FrameCount { got: frames, max: MAX_FRAMES });
    }
    Ok(frames)
}

/// Checks a reference string length is within 1..=max
pub fn check_reference_count(count: usize, max: usize) -> Result<usize> {
    if count == 0 || count > max {
        return Err(ConfigError::ReferenceCount { got: count, max });
    }
    Ok(count)
}

/// Checks every page is at most `max_page`, reporting the first one which isn't
pub fn check_pages(pages: &[Page], max_page: Page) -> Result<()> {
    match pages.iter().position(|&p| p > max_page) {
        Some(position) => Err(ConfigError::PageOutOfRange {
            page: pages[position],
            position,
            max: max_page,
        }),
        None => Ok(()),
    }
}
