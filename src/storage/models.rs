use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::PageViewError;
use crate::utils::title::{normalize_display_title, normalize_title_key};

/// Namespace every imported page is filed under.
///
/// Historical imports carry no namespace information, so the bulk path files
/// them all under the main (article) namespace while `record_view` keeps the
/// caller-supplied value.
pub const IMPORT_NAMESPACE_ID: i32 = 0;

/// The wiki a page belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Project {
    Wikipedia {
        language_code: String,
        variant_code: Option<String>,
    },
    Commons,
    Wikidata,
}

impl Project {
    pub fn wikipedia(language_code: impl Into<String>) -> Self {
        Project::Wikipedia {
            language_code: language_code.into(),
            variant_code: None,
        }
    }

    /// Identifier stored in `pages.project_id`
    pub fn identifier(&self) -> String {
        match self {
            Project::Wikipedia {
                language_code,
                variant_code: Some(variant),
            } => format!("wikipedia~{}~{}", language_code, variant),
            Project::Wikipedia { language_code, .. } => format!("wikipedia~{}", language_code),
            Project::Commons => "commons".to_string(),
            Project::Wikidata => "wikidata".to_string(),
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

impl FromStr for Project {
    type Err = PageViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.split('~');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("commons"), None, _, _) => Ok(Project::Commons),
            (Some("wikidata"), None, _, _) => Ok(Project::Wikidata),
            (Some("wikipedia"), Some(lang), variant, None) if !lang.is_empty() => {
                Ok(Project::Wikipedia {
                    language_code: lang.to_lowercase(),
                    variant_code: variant.filter(|v| !v.is_empty()).map(str::to_lowercase),
                })
            }
            _ => Err(PageViewError::validation(format!(
                "Invalid project identifier: '{}'. Expected wikipedia~<lang>[~<variant>], commons or wikidata",
                s
            ))),
        }
    }
}

impl From<Project> for String {
    fn from(project: Project) -> Self {
        project.identifier()
    }
}

impl TryFrom<String> for Project {
    type Error = PageViewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Natural key of a page: `(project_id, namespace_id, title_key)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub project_id: String,
    pub namespace_id: i32,
    pub title_key: String,
}

impl PageKey {
    pub fn new(project: &Project, namespace_id: i32, title: &str) -> Self {
        Self {
            project_id: project.identifier(),
            namespace_id,
            title_key: normalize_title_key(title),
        }
    }
}

/// A unique encyclopedia page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub project_id: String,
    pub namespace_id: i32,
    pub title: String,
    pub last_seen_at: DateTime<Utc>,
}

/// Number of recorded views of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewCount {
    pub page: Page,
    pub count: u64,
}

impl PageViewCount {
    /// Stable identifier: `{project_id}~{namespace_id}~{title}`
    pub fn id(&self) -> String {
        format!(
            "{}~{}~{}",
            self.page.project_id, self.page.namespace_id, self.page.title
        )
    }
}

/// A historical view to backfill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageViewImportRequest {
    pub title: String,
    pub project: Project,
    pub viewed_date: DateTime<Utc>,
}

impl PageViewImportRequest {
    pub fn new(title: impl Into<String>, project: Project, viewed_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            project,
            viewed_date,
        }
    }

    /// Natural key this request resolves to
    pub fn page_key(&self) -> PageKey {
        PageKey::new(&self.project, IMPORT_NAMESPACE_ID, &self.title)
    }

    pub fn display_title(&self) -> String {
        normalize_display_title(&self.title)
    }
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Distinct pages created or refreshed
    pub pages_upserted: usize,
    pub views_inserted: usize,
    /// Requests whose page could not be found after the upsert phase
    pub views_skipped: usize,
}
