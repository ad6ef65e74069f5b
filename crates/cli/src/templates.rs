//! Directory-backed template store.
//!
//! Template ids are paths relative to the template directory, so
//! `splunk/inputs.conf.tpl` resolves to `<dir>/splunk/inputs.conf.tpl`.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use splunk_lib::template::{TemplateError, TemplateStore};
use tracing::debug;

pub struct DirTemplates {
  root: PathBuf,
}

impl DirTemplates {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// The template directory used when none is given: `templates/` next to
  /// the parameter file.
  pub fn default_root(params: &Path) -> PathBuf {
    params.parent().unwrap_or(Path::new(".")).join("templates")
  }

  pub fn root(&self) -> &Path {
    &self.root
  }
}

impl TemplateStore for DirTemplates {
  fn load(&self, id: &str) -> Result<String, TemplateError> {
    let relative = Path::new(id);
    if id.is_empty() || relative.components().any(|c| !matches!(c, Component::Normal(_))) {
      return Err(TemplateError::Load {
        id: id.to_string(),
        message: "template id must be a relative path inside the template directory".to_string(),
      });
    }

    let path = self.root.join(relative);
    match fs::read_to_string(&path) {
      Ok(text) => {
        debug!(template = id, path = %path.display(), "loaded template");
        Ok(text)
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Err(TemplateError::NotFound(id.to_string())),
      Err(e) => Err(TemplateError::Load {
        id: id.to_string(),
        message: e.to_string(),
      }),
    }
  }
}
