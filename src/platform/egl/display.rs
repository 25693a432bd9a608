// eglctx/src/platform/egl/display.rs
//
//! Capability negotiation for acquiring an `EGLDisplay`.

use super::driver::EglDriver;
use super::ffi::{EGL_EXT_PLATFORM_BASE, EGL_KHR_PLATFORM_GBM, EGL_PLATFORM_GBM_KHR};
use super::ffi::{GET_PLATFORM_DISPLAY_EXT, PFNEGLGETPLATFORMDISPLAYEXTPROC};
use super::native::NativeDisplay;
use crate::egl;
use crate::egl::types::{EGLDisplay, EGLint};

use log::{debug, info, warn};
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::os::raw::c_void;
use std::ptr;

/// How a display is obtained from a native display handle.
///
/// This is decided once per graphics context from the client extension string and reused for
/// every later acquisition.
#[derive(Clone, Copy)]
pub enum DisplayAcquisition {
    /// `eglGetPlatformDisplayEXT(EGL_PLATFORM_GBM_KHR, ...)`, falling back to `eglGetDisplay` if
    /// the platform call yields no display.
    PlatformGbm {
        get_platform_display: PFNEGLGETPLATFORMDISPLAYEXTPROC,
    },
    /// Plain `eglGetDisplay`.
    Default,
}

impl Debug for DisplayAcquisition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            DisplayAcquisition::PlatformGbm { .. } => write!(f, "PlatformGbm"),
            DisplayAcquisition::Default => write!(f, "Default"),
        }
    }
}

impl DisplayAcquisition {
    /// Probes the client extensions and picks the acquisition path.
    pub(crate) unsafe fn negotiate<D>(driver: &D) -> DisplayAcquisition where D: EglDriver {
        let client_extensions = driver.query_string(egl::NO_DISPLAY, egl::EXTENSIONS as EGLint);
        let client_extensions = match client_extensions {
            Some(client_extensions) => client_extensions,
            None => {
                debug!("No EGL client extensions; using eglGetDisplay");
                return DisplayAcquisition::Default;
            }
        };
        info!("EGL client extensions: {}", client_extensions);

        if !has_extension(&client_extensions, EGL_EXT_PLATFORM_BASE) ||
                !has_extension(&client_extensions, EGL_KHR_PLATFORM_GBM) {
            return DisplayAcquisition::Default;
        }

        let get_platform_display = driver.get_proc_address(GET_PLATFORM_DISPLAY_EXT);
        if get_platform_display.is_null() {
            warn!("{} is advertised but eglGetPlatformDisplayEXT is missing", EGL_KHR_PLATFORM_GBM);
            return DisplayAcquisition::Default;
        }

        DisplayAcquisition::PlatformGbm {
            get_platform_display: mem::transmute::<*const c_void,
                                                   PFNEGLGETPLATFORMDISPLAYEXTPROC>(
                                                       get_platform_display),
        }
    }

    /// Returns the display for `native_display`, or `egl::NO_DISPLAY`.
    pub(crate) unsafe fn acquire<D>(&self, driver: &D, native_display: NativeDisplay)
                                    -> EGLDisplay where D: EglDriver {
        if let DisplayAcquisition::PlatformGbm { get_platform_display } = *self {
            let egl_display = get_platform_display(EGL_PLATFORM_GBM_KHR,
                                                   native_display.0 as *mut c_void,
                                                   ptr::null());
            if egl_display != egl::NO_DISPLAY {
                return egl_display;
            }
            warn!("eglGetPlatformDisplayEXT returned no display; falling back to eglGetDisplay");
        }

        driver.get_display(native_display.0)
    }
}

/// Whether `name` appears as a whole token in a space-separated extension string.
pub(crate) fn has_extension(extensions: &str, name: &str) -> bool {
    extensions.split_ascii_whitespace().any(|extension| extension == name)
}
