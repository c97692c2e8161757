use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{RecorderError, RecorderResult};
use crate::trace::statement::Trace;
use crate::value::handle::ResourceKind;

/// File name offered when exporting a trace.
pub const DEFAULT_TRACE_FILENAME: &str = "trace.js";
/// MIME type of exported traces.
pub const TRACE_MIME_TYPE: &str = "application/javascript";

const INDENT: &str = "  ";

/// Assemble a replayable script from `trace`.
///
/// The script is an async generator `render(gl)`: one empty list per resource kind in `kinds`,
/// then the trace statements in order. `yield;` statements are where the replay driver regains
/// control; image loads are awaited in place.
pub fn compile_trace(trace: &Trace, kinds: &[ResourceKind], header: Option<&str>) -> String {
    let mut text = String::from("async function* render(gl) {\n");
    if let Some(header) = header {
        text.push_str(INDENT);
        text.push_str("// ");
        text.push_str(header);
        text.push('\n');
    }
    for kind in kinds {
        text.push_str(INDENT);
        text.push_str("var ");
        text.push_str(&kind.list_name());
        text.push_str(" = [];\n");
    }
    for line in trace.lines() {
        text.push_str(INDENT);
        text.push_str(&line);
        text.push('\n');
    }
    text.push_str("}\n");
    text
}

/// A compiled trace ready to be handed to the host as a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceArtifact {
    /// Suggested file name.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// Script text.
    pub text: String,
}

impl TraceArtifact {
    /// Artifact with the default MIME type.
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: TRACE_MIME_TYPE.to_string(),
            text: text.into(),
        }
    }
}

/// Id of a transient download link attached to the host page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkId(pub u32);

/// Host side of a download: a link is attached, clicked, then detached.
pub trait DownloadHost {
    /// Attach a link carrying `artifact`.
    fn attach_link(&mut self, artifact: &TraceArtifact) -> RecorderResult<LinkId>;
    /// Trigger the download behind `link`.
    fn click(&mut self, link: LinkId) -> RecorderResult<()>;
    /// Remove `link` again.
    fn detach_link(&mut self, link: LinkId);
}

/// Offer `artifact` for download through `host`.
///
/// Fire-and-forget: host failures are logged and otherwise ignored. An attached link is always
/// detached.
pub fn offer_download(host: &mut dyn DownloadHost, artifact: &TraceArtifact) {
    let link = match host.attach_link(artifact) {
        Ok(link) => link,
        Err(err) => {
            tracing::debug!(error = %err, filename = %artifact.filename, "download link not attached");
            return;
        }
    };
    match host.click(link) {
        Ok(()) => tracing::debug!(filename = %artifact.filename, "trace offered for download"),
        Err(err) => {
            tracing::debug!(error = %err, filename = %artifact.filename, "download not triggered")
        }
    }
    host.detach_link(link);
}

/// Download host that saves artifacts into a directory.
#[derive(Debug)]
pub struct DirectoryDownloadHost {
    dir: PathBuf,
    links: HashMap<LinkId, TraceArtifact>,
    next_link: u32,
    saved: Vec<PathBuf>,
}

impl DirectoryDownloadHost {
    /// Save into `dir`, creating it on first download.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            links: HashMap::new(),
            next_link: 0,
            saved: Vec::new(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    /// Links currently attached.
    pub fn attached(&self) -> usize {
        self.links.len()
    }
}

impl DownloadHost for DirectoryDownloadHost {
    fn attach_link(&mut self, artifact: &TraceArtifact) -> RecorderResult<LinkId> {
        let name = Path::new(&artifact.filename);
        if artifact.filename.is_empty() || name.components().count() != 1 || name.is_absolute() {
            return Err(RecorderError::validation(format!(
                "download file name '{}' must be a plain file name",
                artifact.filename
            )));
        }
        let link = LinkId(self.next_link);
        self.next_link += 1;
        self.links.insert(link, artifact.clone());
        Ok(link)
    }

    fn click(&mut self, link: LinkId) -> RecorderResult<()> {
        let artifact = self
            .links
            .get(&link)
            .ok_or_else(|| RecorderError::validation("download link is not attached"))?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create download dir '{}'", self.dir.display()))?;
        let path = self.dir.join(&artifact.filename);
        std::fs::write(&path, artifact.text.as_bytes())
            .with_context(|| format!("write trace '{}'", path.display()))?;
        self.saved.push(path);
        Ok(())
    }

    fn detach_link(&mut self, link: LinkId) {
        self.links.remove(&link);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/compiler.rs"]
mod tests;
