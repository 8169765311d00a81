use gl::types::{GLint, GLuint};
use std::ffi::CString;

use super::error::{self, Error, ObjectKind};
use super::shader::Shader;

#[derive(Debug)]
pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn link(shaders: &[&Shader]) -> Result<Self, Error> {
        unsafe {
            let id = gl::CreateProgram();
            for shader in shaders {
                gl::AttachShader(id, shader.id());
            }
            gl::LinkProgram(id);

            let status = error::check_status(ObjectKind::Program, id);
            for shader in shaders {
                gl::DetachShader(id, shader.id());
            }

            if let Err(log) = status {
                gl::DeleteProgram(id);
                return Err(Error::Link { log });
            }

            log::debug!(
                "linked program {} from {:?}",
                id,
                shaders.iter().map(|s| s.kind()).collect::<Vec<_>>()
            );
            Ok(Program { id })
        }
    }

    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }

    pub fn uniform_location(&self, name: &str) -> Result<GLint, Error> {
        let missing = || Error::MissingUniform {
            name: name.to_owned(),
        };
        let c_name = CString::new(name).map_err(|_| missing())?;
        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };
        if location < 0 {
            return Err(missing());
        }
        Ok(location)
    }

    /// Sets a `vec4` uniform. The program must be bound.
    pub fn set_vec4(&self, location: GLint, value: [f32; 4]) {
        let [x, y, z, w] = value;
        unsafe { gl::Uniform4f(location, x, y, z, w) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}
