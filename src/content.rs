//! Static portfolio content, loaded once at startup
//!
//! The built-in document is compiled into the binary; a `content.yaml`
//! in the config directory replaces it wholesale.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const BUILTIN_CONTENT: &str = include_str!("../assets/content.yaml");
const CONTENT_FILE: &str = "content.yaml";

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid content document: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfoItem {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Short display name used in the logo and hero
    pub name: String,
    pub full_name: String,
    pub role: String,
    pub about: String,
    #[serde(default)]
    pub projects_completed: String,
    #[serde(default)]
    pub info: Vec<InfoItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0-100
    pub percentage: u8,
    /// Hex color such as `#ff6b35`
    #[serde(default)]
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactDetail {
    #[serde(default)]
    pub icon: String,
    pub label: String,
    pub value: String,
}

/// Everything the sections render; immutable after load
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub profile: Profile,
    #[serde(default)]
    pub services_intro: String,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub contact: Vec<ContactDetail>,
}

impl Content {
    /// The document compiled into the binary
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_yaml(BUILTIN_CONTENT)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ContentError> {
        let mut content: Content = serde_yaml::from_str(text)?;
        for skill in &mut content.skills {
            skill.percentage = skill.percentage.min(100);
        }
        Ok(content)
    }

    /// Load `content.yaml` from `dir`, or the built-in document if absent
    pub fn load(dir: &Path) -> Result<Self, ContentError> {
        let path = dir.join(CONTENT_FILE);
        if !path.exists() {
            return Self::builtin();
        }

        let text = fs::read_to_string(&path).map_err(|source| ContentError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_yaml(&text)
    }
}
