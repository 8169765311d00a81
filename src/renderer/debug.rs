use gl::types::{GLchar, GLenum, GLsizei, GLuint};
use std::ffi::c_void;
use std::ptr;

/// Forwards driver debug messages to `log`, if the driver exposes KHR_debug.
///
/// A 3.3 core context only has the entry point through the extension, so this
/// quietly does nothing on drivers without it.
pub fn install() {
    if !gl::DebugMessageCallback::is_loaded() {
        log::debug!("glDebugMessageCallback unavailable, driver messages disabled");
        return;
    }

    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::DebugMessageCallback(Some(debug_callback), ptr::null());
    }
    log::debug!("driver debug output enabled");
}

extern "system" fn debug_callback(
    source: GLenum,
    ty: GLenum,
    id: GLuint,
    severity: GLenum,
    msg_len: GLsizei,
    msg: *const GLchar,
    _user_param: *mut c_void,
) {
    if msg.is_null() || msg_len < 0 {
        return;
    }
    let message = {
        let slice = unsafe { std::slice::from_raw_parts(msg as *const u8, msg_len as usize) };
        String::from_utf8_lossy(slice)
    };

    if let Some(level) = severity_level(severity) {
        log::log!(
            level,
            "{}-{} ({}): {}",
            type_name(ty),
            id,
            source_name(source),
            message.trim_end()
        );
    }
}

fn severity_level(severity: GLenum) -> Option<log::Level> {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => Some(log::Level::Error),
        gl::DEBUG_SEVERITY_MEDIUM => Some(log::Level::Warn),
        gl::DEBUG_SEVERITY_LOW => Some(log::Level::Info),
        gl::DEBUG_SEVERITY_NOTIFICATION => Some(log::Level::Debug),
        _ => None,
    }
}

fn source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        gl::DEBUG_SOURCE_APPLICATION => "Application",
        gl::DEBUG_SOURCE_OTHER => "Other",
        _ => "Unknown",
    }
}

fn type_name(ty: GLenum) -> &'static str {
    match ty {
        gl::DEBUG_TYPE_ERROR => "Error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        gl::DEBUG_TYPE_PORTABILITY => "Portability",
        gl::DEBUG_TYPE_PERFORMANCE => "Performance",
        gl::DEBUG_TYPE_MARKER => "Marker",
        gl::DEBUG_TYPE_OTHER => "Other",
        _ => "Unknown",
    }
}
