//! Payload file loading.

use crate::{Entropy, TemplateError, TemplateResult, expand};
use jsonseed_types::SeedValue;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A payload template read from disk once and expanded on demand.
///
/// The parsed template is never modified: every [`get_payload`] call builds
/// a new tree, so tokens are re-sampled from the declared template each time
/// rather than from a previous expansion.
///
/// [`get_payload`]: TemplateSource::get_payload
#[derive(Debug, Clone)]
pub struct TemplateSource {
    path: PathBuf,
    template: SeedValue,
}

impl TemplateSource {
    /// Reads and parses the payload file.
    pub fn load(path: impl AsRef<Path>) -> TemplateResult<Self> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path).map_err(|source| TemplateError::Read {
            path: path.clone(),
            source,
        })?;
        let template = SeedValue::from_json_str(&text).map_err(|source| TemplateError::Parse {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), kind = template.kind(), "Payload template loaded");
        Ok(Self { path, template })
    }

    /// Wraps an already parsed template.
    #[must_use]
    pub fn from_value(template: SeedValue) -> Self {
        Self {
            path: PathBuf::new(),
            template,
        }
    }

    /// Path the template was loaded from; empty for [`from_value`](Self::from_value).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The template as declared.
    #[must_use]
    pub fn template(&self) -> &SeedValue {
        &self.template
    }

    /// A freshly expanded payload.
    pub fn get_payload<E: Entropy + ?Sized>(&self, entropy: &mut E) -> TemplateResult<SeedValue> {
        expand(&self.template, entropy)
    }
}
