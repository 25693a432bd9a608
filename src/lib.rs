// eglctx/src/lib.rs
//
//! EGL display, context and window surface lifecycle management.
//!
//! This crate negotiates an EGL display with the native platform (preferring the GBM platform
//! extension when the driver advertises it), selects a window-capable configuration, and owns the
//! resulting display, context and surface handles for the lifetime of a `GraphicsContext`. It is
//! meant to be driven by a windowing layer that already owns the native display and window; it
//! does not create windows, run an event loop, or issue GL rendering commands.

pub mod platform;
pub use platform::egl::context::{ContextState, GraphicsContext};
pub use platform::egl::display::DisplayAcquisition;
pub use platform::egl::driver::{EglDriver, SystemEgl};
pub use platform::egl::native::{NativeDisplay, NativeWidget};

pub mod error;
pub use crate::error::{Error, WindowingApiError};

mod context;
pub use crate::context::{ConfigAttributes, ContextID, DirtyRegionSolver};
pub use crate::context::{RenderableType, SurfaceTypeFlags};

mod info;
pub use crate::info::{EGLVersion, GLApi, GLVersion};

#[allow(non_camel_case_types)]
#[allow(dead_code)]
mod egl {
    use std::os::raw::{c_long, c_void};
    pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
    pub type khronos_uint64_t = u64;
    pub type khronos_ssize_t = c_long;
    pub type EGLint = i32;
    pub type EGLNativeDisplayType = *const c_void;
    pub type EGLNativePixmapType = *const c_void;
    pub type EGLNativeWindowType = *const c_void;
    pub type NativeDisplayType = EGLNativeDisplayType;
    pub type NativePixmapType = EGLNativePixmapType;
    pub type NativeWindowType = EGLNativeWindowType;
    include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));
}
