use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use std::fmt;
use std::io;
use std::path::PathBuf;

use super::shader::ShaderKind;

#[derive(Debug)]
pub enum Error {
    Compile {
        kind: ShaderKind,
        origin: String,
        log: String,
    },
    Link {
        log: String,
    },
    ReadSource {
        path: PathBuf,
        source: io::Error,
    },
    InvalidSource {
        origin: String,
    },
    MissingUniform {
        name: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Compile { kind, origin, log } => {
                write!(f, "failed to compile {} shader from {}: {}", kind, origin, log)
            }
            Error::Link { log } => write!(f, "failed to link shader program: {}", log),
            Error::ReadSource { path, source } => {
                write!(f, "failed to read shader source {}: {}", path.display(), source)
            }
            Error::InvalidSource { origin } => {
                write!(f, "shader source from {} contains a NUL byte", origin)
            }
            Error::MissingUniform { name } => {
                write!(f, "uniform `{}` is not active in the program", name)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReadSource { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The two kinds of GL object whose build step reports a status and an info log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ObjectKind {
    Shader,
    Program,
}

impl ObjectKind {
    fn status_pname(self) -> GLenum {
        match self {
            ObjectKind::Shader => gl::COMPILE_STATUS,
            ObjectKind::Program => gl::LINK_STATUS,
        }
    }

    unsafe fn parameter(self, id: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        match self {
            ObjectKind::Shader => gl::GetShaderiv(id, pname, &mut value),
            ObjectKind::Program => gl::GetProgramiv(id, pname, &mut value),
        }
        value
    }

    unsafe fn info_log(self, id: GLuint) -> String {
        let len = self.parameter(id, gl::INFO_LOG_LENGTH);
        if len <= 0 {
            return String::new();
        }

        let mut buf = vec![0u8; len as usize];
        let mut written: GLsizei = 0;
        let out = buf.as_mut_ptr() as *mut GLchar;
        match self {
            ObjectKind::Shader => gl::GetShaderInfoLog(id, len, &mut written, out),
            ObjectKind::Program => gl::GetProgramInfoLog(id, len, &mut written, out),
        }
        buf.truncate(written.max(0) as usize);
        decode_info_log(buf)
    }
}

/// Checks the compile/link status of `id`, returning the info log on failure.
///
/// # Safety
///
/// A context must be current and `id` must name a live object of `kind`.
pub(super) unsafe fn check_status(kind: ObjectKind, id: GLuint) -> Result<(), String> {
    if kind.parameter(id, kind.status_pname()) == gl::FALSE as GLint {
        Err(kind.info_log(id))
    } else {
        Ok(())
    }
}

pub(super) fn decode_info_log(mut buf: Vec<u8>) -> String {
    while buf.last() == Some(&0) {
        buf.pop();
    }
    String::from_utf8_lossy(&buf).trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn info_log_strips_terminator_and_newline() {
        let raw = b"0:3(1): error: syntax error\n\0".to_vec();
        assert_eq!(decode_info_log(raw), "0:3(1): error: syntax error");
    }

    #[test]
    fn empty_info_log() {
        assert_eq!(decode_info_log(vec![0]), "");
        assert_eq!(decode_info_log(Vec::new()), "");
    }

    #[test]
    fn info_log_tolerates_invalid_utf8() {
        let log = decode_info_log(vec![b'o', b'k', 0xff, 0]);
        assert!(log.starts_with("ok"));
    }

    #[test]
    fn compile_error_names_kind_origin_and_log() {
        let err = Error::Compile {
            kind: ShaderKind::Fragment,
            origin: "src/data/orange.frag".into(),
            log: "0:1: bad".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to compile fragment shader from src/data/orange.frag: 0:1: bad"
        );
    }

    #[test]
    fn link_error_text() {
        let err = Error::Link {
            log: "missing main".into(),
        };
        assert_eq!(err.to_string(), "failed to link shader program: missing main");
    }

    #[test]
    fn read_error_keeps_io_source() {
        let err = Error::ReadSource {
            path: PathBuf::from("nope.vert"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("nope.vert"));
        assert!(err.source().is_some());
    }

    #[test]
    fn status_parameters_per_kind() {
        assert_eq!(ObjectKind::Shader.status_pname(), gl::COMPILE_STATUS);
        assert_eq!(ObjectKind::Program.status_pname(), gl::LINK_STATUS);
    }
}
