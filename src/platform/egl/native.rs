// eglctx/src/platform/egl/native.rs
//
//! Native display and window handles, as supplied by the windowing layer.

use crate::egl::types::{EGLNativeDisplayType, EGLNativeWindowType};
#[cfg(feature = "sm-raw-window-handle-06")]
use crate::Error;

use std::os::raw::c_void;
use std::ptr;

/// A native display connection: a `gbm_device *`, an X11 `Display *`, a `wl_display *`, or the
/// default display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeDisplay(pub EGLNativeDisplayType);

/// A native window: a `gbm_surface *`, an X11 window, or an `ANativeWindow *`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeWidget {
    pub native_window: EGLNativeWindowType,
}

impl NativeDisplay {
    /// `EGL_DEFAULT_DISPLAY`.
    pub const DEFAULT: NativeDisplay = NativeDisplay(ptr::null());

    /// Wraps a raw native display pointer.
    #[inline]
    pub fn from_ptr(raw: *mut c_void) -> NativeDisplay {
        NativeDisplay(raw as EGLNativeDisplayType)
    }

    /// Creates a native display from the given `DisplayHandle`.
    #[cfg(feature = "sm-raw-window-handle-06")]
    pub fn from_display_handle(handle: rwh_06::DisplayHandle) -> Result<NativeDisplay, Error> {
        use rwh_06::RawDisplayHandle;

        match handle.as_raw() {
            RawDisplayHandle::Gbm(handle) => Ok(NativeDisplay::from_ptr(handle.gbm_device.as_ptr())),
            RawDisplayHandle::Xlib(handle) => Ok(handle
                .display
                .map_or(NativeDisplay::DEFAULT, |display| NativeDisplay::from_ptr(display.as_ptr()))),
            RawDisplayHandle::Wayland(handle) => Ok(NativeDisplay::from_ptr(handle.display.as_ptr())),
            RawDisplayHandle::Android(_) => Ok(NativeDisplay::DEFAULT),
            _ => Err(Error::IncompatibleNativeDisplay),
        }
    }
}

impl NativeWidget {
    /// Wraps a raw native window pointer.
    #[inline]
    pub fn from_ptr(raw: *mut c_void) -> NativeWidget {
        debug_assert!(!raw.is_null());
        NativeWidget { native_window: raw as EGLNativeWindowType }
    }

    /// Creates a native widget from the given `WindowHandle`.
    ///
    /// Wayland surfaces need a `wl_egl_window` wrapper, which this crate doesn't create, so they
    /// are rejected.
    #[cfg(feature = "sm-raw-window-handle-06")]
    pub fn from_window_handle(handle: rwh_06::WindowHandle) -> Result<NativeWidget, Error> {
        use rwh_06::RawWindowHandle;

        match handle.as_raw() {
            RawWindowHandle::Gbm(handle) => Ok(NativeWidget::from_ptr(handle.gbm_surface.as_ptr())),
            // Window id 0 is `None` in Xlib.
            RawWindowHandle::Xlib(handle) if handle.window == 0 => {
                Err(Error::IncompatibleNativeWidget)
            }
            RawWindowHandle::Xlib(handle) => {
                Ok(NativeWidget { native_window: handle.window as usize as EGLNativeWindowType })
            }
            RawWindowHandle::AndroidNdk(handle) => {
                Ok(NativeWidget::from_ptr(handle.a_native_window.as_ptr()))
            }
            _ => Err(Error::IncompatibleNativeWidget),
        }
    }
}
