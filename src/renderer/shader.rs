use gl::types::{GLenum, GLuint};
use std::ffi::CString;
use std::fmt;
use std::fs;
use std::path::Path;
use std::ptr;

use super::error::{self, Error, ObjectKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
        })
    }
}

#[derive(Debug)]
pub struct Shader {
    id: GLuint,
    kind: ShaderKind,
}

impl Shader {
    /// `origin` names where the source came from, for error messages.
    pub fn compile(kind: ShaderKind, source: &str, origin: &str) -> Result<Self, Error> {
        let source = to_c_source(source, origin)?;

        unsafe {
            let id = gl::CreateShader(kind.gl_enum());
            gl::ShaderSource(id, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(id);

            if let Err(log) = error::check_status(ObjectKind::Shader, id) {
                gl::DeleteShader(id);
                return Err(Error::Compile {
                    kind,
                    origin: origin.to_owned(),
                    log,
                });
            }

            log::debug!("compiled {} shader from {}", kind, origin);
            Ok(Shader { id, kind })
        }
    }

    pub fn from_path<P: AsRef<Path>>(kind: ShaderKind, path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = read_source(path)?;
        Self::compile(kind, &source, &path.display().to_string())
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) }
    }
}

pub(super) fn read_source(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::ReadSource {
        path: path.to_owned(),
        source,
    })
}

fn to_c_source(source: &str, origin: &str) -> Result<CString, Error> {
    CString::new(source).map_err(|_| Error::InvalidSource {
        origin: origin.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn data_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("src/data")
            .join(name)
    }

    #[test]
    fn kinds_map_to_gl_enums() {
        assert_eq!(ShaderKind::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderKind::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
        assert_eq!(ShaderKind::Vertex.to_string(), "vertex");
        assert_eq!(ShaderKind::Fragment.to_string(), "fragment");
    }

    #[test]
    fn reads_shader_files() {
        for name in &["triangle.vert", "orange.frag", "uniform_color.frag"] {
            let source = read_source(&data_path(name)).unwrap();
            assert!(source.starts_with("#version 330 core"), "{}", name);
            assert!(source.contains("void main()"), "{}", name);
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = data_path("does_not_exist.frag");
        match read_source(&path) {
            Err(Error::ReadSource { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn nul_in_source_is_rejected() {
        match to_c_source("void main() {}\0junk", "inline") {
            Err(Error::InvalidSource { origin }) => assert_eq!(origin, "inline"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(to_c_source("void main() {}", "inline").is_ok());
    }
}
