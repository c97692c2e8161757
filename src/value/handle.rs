use std::fmt;
use std::sync::Arc;

/// Category of opaque object a WebGL context hands out.
///
/// The serialized name is the host constructor name, which is also the prefix of the symbolic list
/// the exported script keeps for that kind (`WebGLBuffer` -> `WebGLBuffers[i]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum ResourceKind {
    /// `WebGLActiveInfo`
    #[serde(rename = "WebGLActiveInfo")]
    ActiveInfo,
    /// `WebGLBuffer`
    #[serde(rename = "WebGLBuffer")]
    Buffer,
    /// `WebGLFramebuffer`
    #[serde(rename = "WebGLFramebuffer")]
    Framebuffer,
    /// `WebGLProgram`
    #[serde(rename = "WebGLProgram")]
    Program,
    /// `WebGLRenderbuffer`
    #[serde(rename = "WebGLRenderbuffer")]
    Renderbuffer,
    /// `WebGLShader`
    #[serde(rename = "WebGLShader")]
    Shader,
    /// `WebGLShaderPrecisionFormat`
    #[serde(rename = "WebGLShaderPrecisionFormat")]
    ShaderPrecisionFormat,
    /// `WebGLTexture`
    #[serde(rename = "WebGLTexture")]
    Texture,
    /// `WebGLUniformLocation`
    #[serde(rename = "WebGLUniformLocation")]
    UniformLocation,
}

impl ResourceKind {
    /// Every tracked kind, in declaration order.
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::ActiveInfo,
        ResourceKind::Buffer,
        ResourceKind::Framebuffer,
        ResourceKind::Program,
        ResourceKind::Renderbuffer,
        ResourceKind::Shader,
        ResourceKind::ShaderPrecisionFormat,
        ResourceKind::Texture,
        ResourceKind::UniformLocation,
    ];

    /// Host constructor name for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::ActiveInfo => "WebGLActiveInfo",
            ResourceKind::Buffer => "WebGLBuffer",
            ResourceKind::Framebuffer => "WebGLFramebuffer",
            ResourceKind::Program => "WebGLProgram",
            ResourceKind::Renderbuffer => "WebGLRenderbuffer",
            ResourceKind::Shader => "WebGLShader",
            ResourceKind::ShaderPrecisionFormat => "WebGLShaderPrecisionFormat",
            ResourceKind::Texture => "WebGLTexture",
            ResourceKind::UniformLocation => "WebGLUniformLocation",
        }
    }

    /// Inverse of [`ResourceKind::type_name`].
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == name)
    }

    /// Name of the list variable the exported script declares for this kind.
    pub fn list_name(self) -> String {
        format!("{}s", self.type_name())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[derive(Debug)]
struct HandleCell {
    kind: ResourceKind,
}

/// Opaque resource handle returned by a drawing context.
///
/// Clones refer to the same resource. Two handles created separately are never equal, even when
/// they have the same kind.
#[derive(Clone, Debug)]
pub struct Handle(Arc<HandleCell>);

impl Handle {
    /// Allocate a fresh handle of `kind`.
    pub fn new(kind: ResourceKind) -> Self {
        Self(Arc::new(HandleCell { kind }))
    }

    /// Kind this handle belongs to.
    pub fn kind(&self) -> ResourceKind {
        self.0.kind
    }

    /// Whether both handles refer to the same resource.
    pub fn same(&self, other: &Handle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared cell. Stable while any clone is alive.
    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Handle {}

#[cfg(test)]
#[path = "../../tests/unit/value/handle.rs"]
mod tests;
