// eglctx/src/error.rs
//
//! Various errors that methods can produce.

use std::fmt::{self, Display, Formatter};

/// Various errors that methods can produce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// The system EGL library couldn't be located.
    NoEGLLibraryFound,
    /// Neither the platform extension nor `eglGetDisplay` produced a display.
    DisplayUnavailable,
    /// The display was obtained but `eglInitialize` rejected it.
    DisplayInitFailed(WindowingApiError),
    /// No configuration matched the requested attributes.
    NoConfigFound(WindowingApiError),
    /// The system couldn't create an EGL context.
    ContextCreationFailed(WindowingApiError),
    /// The system couldn't create a window surface.
    SurfaceCreationFailed(WindowingApiError),
    /// The system couldn't make the context current.
    BindFailed(WindowingApiError),
    /// The operation needs a display and a surface, and at least one of them is missing.
    PreconditionFailed,
    /// The size of the window surface couldn't be queried.
    SurfaceQueryFailed(WindowingApiError),
    /// The driver rejected the requested swap interval.
    VSyncUnsupported(WindowingApiError),
    /// The native display handle type is not supported by EGL.
    IncompatibleNativeDisplay,
    /// The native widget type is not supported by EGL.
    IncompatibleNativeWidget,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Error::NoEGLLibraryFound => write!(f, "no EGL library found"),
            Error::DisplayUnavailable => write!(f, "failed to get EGL display"),
            Error::DisplayInitFailed(err) => write!(f, "failed to initialize EGL display ({:?})", err),
            Error::NoConfigFound(err) => write!(f, "no suitable EGL config found ({:?})", err),
            Error::ContextCreationFailed(err) => write!(f, "failed to create EGL context ({:?})", err),
            Error::SurfaceCreationFailed(err) => {
                write!(f, "failed to create EGL window surface ({:?})", err)
            }
            Error::BindFailed(err) => write!(f, "failed to make context current ({:?})", err),
            Error::PreconditionFailed => write!(f, "no EGL display or surface"),
            Error::SurfaceQueryFailed(err) => write!(f, "failed to query EGL surface ({:?})", err),
            Error::VSyncUnsupported(err) => write!(f, "failed to set swap interval ({:?})", err),
            Error::IncompatibleNativeDisplay => write!(f, "unsupported native display handle"),
            Error::IncompatibleNativeWidget => write!(f, "unsupported native window handle"),
        }
    }
}

impl std::error::Error for Error {}

/// Abstraction of the errors that EGL returns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowingApiError {
    /// Miscellaneous error.
    Failed,
    /// EGL is not initialized, or could not be initialized, for the specified EGL display
    /// connection.
    NotInitialized,
    /// EGL cannot access a requested resource (for example a context is bound in another thread).
    BadAccess,
    /// EGL failed to allocate resources for the requested operation.
    BadAlloc,
    /// An unrecognized attribute or attribute value was passed in the attribute list.
    BadAttribute,
    /// An EGLConfig argument does not name a valid EGL frame buffer configuration.
    BadConfig,
    /// An EGLContext argument does not name a valid EGL rendering context.
    BadContext,
    /// The current surface of the calling thread is a window, pixel buffer or pixmap that is no
    /// longer valid.
    BadCurrentSurface,
    /// An EGLDisplay argument does not name a valid EGL display connection.
    BadDisplay,
    /// Arguments are inconsistent (for example, a valid context requires buffers not supplied by
    /// a valid surface).
    BadMatch,
    /// A NativePixmapType argument does not refer to a valid native pixmap.
    BadNativePixmap,
    /// A NativeWindowType argument does not refer to a valid native window.
    BadNativeWindow,
    /// One or more argument values are invalid.
    BadParameter,
    /// An EGLSurface argument does not name a valid surface (window, pixel buffer or pixmap)
    /// configured for GL rendering.
    BadSurface,
    /// A power management event has occurred. The application must destroy all contexts and
    /// reinitialise OpenGL ES state and objects to continue rendering.
    ContextLost,
}
