// eglctx/src/info.rs
//
//! OpenGL and EGL version information.

use crate::egl;
use crate::egl::types::EGLenum;

use std::fmt::{self, Display, Formatter};

/// The client rendering API bound to the display (OpenGL or OpenGL ES).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GLApi {
    GL,
    GLES,
}

impl GLApi {
    #[inline]
    pub(crate) fn to_egl_api(self) -> EGLenum {
        match self {
            GLApi::GL => egl::OPENGL_API,
            GLApi::GLES => egl::OPENGL_ES_API,
        }
    }
}

/// Describes the OpenGL version that is requested when a context is created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GLVersion {
    pub major: u8,
    pub minor: u8,
}

/// The EGL version reported by `eglInitialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EGLVersion {
    pub major: i32,
    pub minor: i32,
}

impl Display for EGLVersion {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
