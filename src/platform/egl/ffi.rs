// eglctx/src/platform/egl/ffi.rs
//
//! EGL types, plus the extension definitions that the core bindings don't carry.

pub use crate::egl::types::{EGLBoolean, EGLConfig, EGLContext, EGLDisplay, EGLSurface};
pub use crate::egl::types::{EGLNativeDisplayType, EGLNativeWindowType, EGLenum, EGLint};

use std::ffi::CStr;
use std::os::raw::c_void;

pub const EGL_PLATFORM_GBM_KHR: EGLenum = 0x31d7;

pub const EGL_EXT_PLATFORM_BASE: &str = "EGL_EXT_platform_base";
pub const EGL_KHR_PLATFORM_GBM: &str = "EGL_KHR_platform_gbm";

pub const GET_PLATFORM_DISPLAY_EXT: &CStr = c"eglGetPlatformDisplayEXT";

#[allow(non_camel_case_types)]
pub type PFNEGLGETPLATFORMDISPLAYEXTPROC = unsafe extern "C" fn(platform: EGLenum,
                                                                native_display: *mut c_void,
                                                                attrib_list: *const EGLint)
                                                                -> EGLDisplay;
