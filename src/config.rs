//! User configuration: where relative links point, selector overrides and
//! the rewrite rules applied to assignment titles.
//!
//! Everything has a built-in default, so a config file only needs the keys
//! it wants to change:
//!
//! ```toml
//! base_url = "https://canvas.example.edu"
//!
//! [selectors]
//! module = ".context_module[aria-label*=Unit]"
//!
//! [[title_rewrites]]
//! position = "prefix"
//! from = "Quiz: "
//! to = "Q: "
//! ```

use crate::error::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_BASE_URL: &'static str = "https://canvas.liberty.edu";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prepended to links that are not already absolute.
    pub base_url: String,
    /// Overrides for entries of the built-in selector table, by name.
    pub selectors: HashMap<String, String>,
    /// Applied to every assignment title, in order.
    ///
    /// Setting this in a config file replaces the default list entirely.
    pub title_rewrites: Vec<TitleRewrite>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.into(),
            selectors: HashMap::new(),
            title_rewrites: default_title_rewrites(),
        }
    }
}

impl Config {
    /// Reads a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .chain_err(|| format!("could not read config file {}", path.display()))?;

        Self::from_toml(&contents)
    }

    #[inline]
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Where in a title a `TitleRewrite` looks for its text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Prefix,
    Suffix
}

/// Replaces `from` with `to` when the title starts (or ends) with `from`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TitleRewrite {
    pub position: Position,
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl TitleRewrite {
    pub fn prefix<S: Into<String>, T: Into<String>>(from: S, to: T) -> Self {
        TitleRewrite { position: Position::Prefix, from: from.into(), to: to.into() }
    }

    pub fn suffix<S: Into<String>, T: Into<String>>(from: S, to: T) -> Self {
        TitleRewrite { position: Position::Suffix, from: from.into(), to: to.into() }
    }

    /// Applies the rewrite once, returning the title unchanged when it doesn't match.
    pub fn apply(&self, title: &str) -> String {
        match self.position {
            Position::Prefix => match title.strip_prefix(self.from.as_str()) {
                Some(rest) => format!("{}{}", self.to, rest),
                None => title.into()
            },
            Position::Suffix => match title.strip_suffix(self.from.as_str()) {
                Some(rest) => format!("{}{}", rest, self.to),
                None => title.into()
            }
        }
    }
}

pub fn default_title_rewrites() -> Vec<TitleRewrite> {
    vec![
        TitleRewrite::suffix(" Assignment", ""),
        TitleRewrite::prefix("Homework: ", ""),
        TitleRewrite::prefix("Simulation Lab: ", "Sim Lab: "),
        TitleRewrite::prefix("Virtual Machine Lab: ", "VM Lab: "),
        TitleRewrite::prefix("Discussion Thread: ", "DT: "),
        TitleRewrite::prefix("Discussion Replies: ", "DR: "),
        TitleRewrite::prefix("Research Paper: ", "Paper: "),
    ]
}
