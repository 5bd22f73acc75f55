//! Comparison of local template files against the templates an app serves.
//!
//! Items are matched by `(type, key, language_tag)`; `content_md5` decides
//! whether a matched pair differs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Identity of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateRef {
    /// Template type, e.g. `forgot_password_email.html`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional key, e.g. a provider name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Optional language tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_tag: Option<String>,
}

/// A template file found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTemplateItem {
    /// Template identity.
    #[serde(flatten)]
    pub reference: TemplateRef,
    /// MD5 of the file content, base64.
    pub content_md5: String,
    /// Where the file lives.
    pub file_path: PathBuf,
}

/// A template currently served for the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTemplateItem {
    /// Template identity.
    #[serde(flatten)]
    pub reference: TemplateRef,
    /// MD5 of the stored content, base64.
    pub content_md5: String,
    /// Asset URI.
    pub uri: String,
    /// Pre-signed download URL.
    pub signed_uri: String,
}

/// Outcome of [`diff`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    /// Local templates the app does not have yet.
    pub added: Vec<LocalTemplateItem>,
    /// Remote templates with no local file.
    pub removed: Vec<RemoteTemplateItem>,
    /// Local templates whose content differs from the served one.
    pub updated: Vec<LocalTemplateItem>,
    /// Remote templates matching their local file.
    pub unchanged: Vec<RemoteTemplateItem>,
}

impl DiffResult {
    /// Whether uploading the local templates would change anything.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty())
    }
}

/// Compares `remote` against `local`. Each bucket keeps input order.
#[must_use]
pub fn diff(remote: &[RemoteTemplateItem], local: &[LocalTemplateItem]) -> DiffResult {
    let mut result = DiffResult::default();

    for item in local {
        match remote.iter().find(|r| r.reference == item.reference) {
            None => result.added.push(item.clone()),
            Some(r) if r.content_md5 != item.content_md5 => result.updated.push(item.clone()),
            Some(_) => {}
        }
    }

    for item in remote {
        match local.iter().find(|l| l.reference == item.reference) {
            None => result.removed.push(item.clone()),
            Some(l) if l.content_md5 == item.content_md5 => result.unchanged.push(item.clone()),
            Some(_) => {}
        }
    }

    result
}

/// Where a template lives under `template_dir`: `<dir>/[<key>/]<type>`.
#[must_use]
pub fn local_template_path(item: &TemplateRef, template_dir: &Path) -> PathBuf {
    let mut path = template_dir.to_path_buf();
    if let Some(key) = item.key.as_deref().filter(|k| !k.is_empty()) {
        path.push(key);
    }
    path.push(&item.kind);
    path
}
