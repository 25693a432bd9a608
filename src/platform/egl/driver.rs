// eglctx/src/platform/egl/driver.rs
//
//! The EGL entry points that a graphics context calls, and their implementation on top of the
//! system EGL library.

use crate::egl::types::{EGLBoolean, EGLConfig, EGLContext, EGLDisplay, EGLSurface};
use crate::egl::types::{EGLNativeDisplayType, EGLNativeWindowType, EGLenum, EGLint};
use crate::egl::Egl;
use crate::Error;

use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::ptr;
use std::sync::OnceLock;

#[cfg(windows)]
use winapi::shared::minwindef::HMODULE;
#[cfg(windows)]
use winapi::um::libloaderapi;

#[cfg(linux)]
const EGL_LIBRARY_NAMES: [&CStr; 2] = [c"libEGL.so.1", c"libEGL.so"];
#[cfg(android)]
const EGL_LIBRARY_NAMES: [&CStr; 1] = [c"libEGL.so"];
#[cfg(windows)]
const EGL_LIBRARY_NAMES: [&CStr; 1] = [c"libEGL.dll"];
#[cfg(not(any(linux, android, windows)))]
const EGL_LIBRARY_NAMES: [&CStr; 1] = [c"libEGL.dylib"];

static EGL_LIBRARY: OnceLock<Option<EGLLibrary>> = OnceLock::new();

/// The EGL entry points used by `GraphicsContext`.
///
/// Each method corresponds to the EGL function of the same name and follows its semantics: handles
/// are passed through untouched, failures are reported as `egl::FALSE` or a sentinel handle, and
/// the cause is available from `get_error()` until the next call.
///
/// # Safety
///
/// Implementations talk to the GPU driver. Callers must pass handles obtained from the same
/// implementation and must stay on the thread that owns the current context.
pub trait EglDriver {
    /// `eglQueryString`. Returns `None` when the driver returns a null string.
    unsafe fn query_string(&self, display: EGLDisplay, name: EGLint) -> Option<String>;
    /// `eglGetProcAddress`. Returns null if the symbol is unknown.
    unsafe fn get_proc_address(&self, symbol_name: &CStr) -> *const c_void;
    unsafe fn get_display(&self, native_display: EGLNativeDisplayType) -> EGLDisplay;
    unsafe fn initialize(&self, display: EGLDisplay, major: &mut EGLint, minor: &mut EGLint)
                         -> EGLBoolean;
    unsafe fn bind_api(&self, api: EGLenum) -> EGLBoolean;
    /// `eglChooseConfig`, filling at most `configs.len()` entries.
    unsafe fn choose_config(&self,
                            display: EGLDisplay,
                            attributes: &[EGLint],
                            configs: &mut [EGLConfig],
                            config_count: &mut EGLint)
                            -> EGLBoolean;
    unsafe fn create_context(&self,
                             display: EGLDisplay,
                             config: EGLConfig,
                             share_context: EGLContext,
                             attributes: &[EGLint])
                             -> EGLContext;
    unsafe fn create_window_surface(&self,
                                    display: EGLDisplay,
                                    config: EGLConfig,
                                    native_window: EGLNativeWindowType,
                                    attributes: &[EGLint])
                                    -> EGLSurface;
    unsafe fn make_current(&self,
                           display: EGLDisplay,
                           draw: EGLSurface,
                           read: EGLSurface,
                           context: EGLContext)
                           -> EGLBoolean;
    unsafe fn surface_attrib(&self,
                             display: EGLDisplay,
                             surface: EGLSurface,
                             attribute: EGLint,
                             value: EGLint)
                             -> EGLBoolean;
    unsafe fn query_surface(&self,
                            display: EGLDisplay,
                            surface: EGLSurface,
                            attribute: EGLint,
                            value: &mut EGLint)
                            -> EGLBoolean;
    unsafe fn swap_interval(&self, display: EGLDisplay, interval: EGLint) -> EGLBoolean;
    unsafe fn swap_buffers(&self, display: EGLDisplay, surface: EGLSurface) -> EGLBoolean;
    unsafe fn destroy_context(&self, display: EGLDisplay, context: EGLContext) -> EGLBoolean;
    unsafe fn destroy_surface(&self, display: EGLDisplay, surface: EGLSurface) -> EGLBoolean;
    unsafe fn terminate(&self, display: EGLDisplay) -> EGLBoolean;
    /// `eglGetError`: the error code of the last call made on this thread.
    fn get_error(&self) -> EGLint;
}

/// The EGL implementation of the running system, loaded at runtime.
pub struct SystemEgl {
    egl: Egl,
}

struct EGLLibrary(*mut c_void);

// The handle is only ever used to look up symbols, which is thread-safe.
unsafe impl Send for EGLLibrary {}
unsafe impl Sync for EGLLibrary {}

impl SystemEgl {
    /// Opens the system EGL library and loads its entry points.
    pub fn new() -> Result<SystemEgl, Error> {
        let library = EGL_LIBRARY
            .get_or_init(|| unsafe { EGLLibrary::open() })
            .as_ref()
            .ok_or(Error::NoEGLLibraryFound)?;
        let egl = Egl::load_with(|symbol_name| library.lookup(symbol_name));
        Ok(SystemEgl { egl })
    }
}

impl EGLLibrary {
    #[cfg(not(windows))]
    unsafe fn open() -> Option<EGLLibrary> {
        EGL_LIBRARY_NAMES
            .iter()
            .map(|name| libc::dlopen(name.as_ptr(), libc::RTLD_LAZY))
            .find(|library| !library.is_null())
            .map(EGLLibrary)
    }

    #[cfg(windows)]
    unsafe fn open() -> Option<EGLLibrary> {
        EGL_LIBRARY_NAMES
            .iter()
            .map(|name| libloaderapi::LoadLibraryA(name.as_ptr()) as *mut c_void)
            .find(|library| !library.is_null())
            .map(EGLLibrary)
    }

    fn lookup(&self, symbol_name: &str) -> *const c_void {
        let symbol_name = match CString::new(symbol_name) {
            Ok(symbol_name) => symbol_name,
            Err(_) => return ptr::null(),
        };
        unsafe { self.lookup_symbol(&symbol_name) }
    }

    #[cfg(not(windows))]
    unsafe fn lookup_symbol(&self, symbol_name: &CStr) -> *const c_void {
        libc::dlsym(self.0, symbol_name.as_ptr()) as *const c_void
    }

    #[cfg(windows)]
    unsafe fn lookup_symbol(&self, symbol_name: &CStr) -> *const c_void {
        libloaderapi::GetProcAddress(self.0 as HMODULE, symbol_name.as_ptr()) as *const c_void
    }
}

impl EglDriver for SystemEgl {
    unsafe fn query_string(&self, display: EGLDisplay, name: EGLint) -> Option<String> {
        let string = self.egl.QueryString(display, name);
        if string.is_null() {
            return None;
        }
        Some(CStr::from_ptr(string).to_string_lossy().into_owned())
    }

    #[inline]
    unsafe fn get_proc_address(&self, symbol_name: &CStr) -> *const c_void {
        self.egl.GetProcAddress(symbol_name.as_ptr()) as *const c_void
    }

    #[inline]
    unsafe fn get_display(&self, native_display: EGLNativeDisplayType) -> EGLDisplay {
        self.egl.GetDisplay(native_display)
    }

    #[inline]
    unsafe fn initialize(&self, display: EGLDisplay, major: &mut EGLint, minor: &mut EGLint)
                         -> EGLBoolean {
        self.egl.Initialize(display, major, minor)
    }

    #[inline]
    unsafe fn bind_api(&self, api: EGLenum) -> EGLBoolean {
        self.egl.BindAPI(api)
    }

    unsafe fn choose_config(&self,
                            display: EGLDisplay,
                            attributes: &[EGLint],
                            configs: &mut [EGLConfig],
                            config_count: &mut EGLint)
                            -> EGLBoolean {
        self.egl.ChooseConfig(display,
                              attributes.as_ptr(),
                              configs.as_mut_ptr(),
                              configs.len() as EGLint,
                              config_count)
    }

    #[inline]
    unsafe fn create_context(&self,
                             display: EGLDisplay,
                             config: EGLConfig,
                             share_context: EGLContext,
                             attributes: &[EGLint])
                             -> EGLContext {
        self.egl.CreateContext(display, config, share_context, attributes.as_ptr())
    }

    #[inline]
    unsafe fn create_window_surface(&self,
                                    display: EGLDisplay,
                                    config: EGLConfig,
                                    native_window: EGLNativeWindowType,
                                    attributes: &[EGLint])
                                    -> EGLSurface {
        self.egl.CreateWindowSurface(display, config, native_window, attributes.as_ptr())
    }

    #[inline]
    unsafe fn make_current(&self,
                           display: EGLDisplay,
                           draw: EGLSurface,
                           read: EGLSurface,
                           context: EGLContext)
                           -> EGLBoolean {
        self.egl.MakeCurrent(display, draw, read, context)
    }

    #[inline]
    unsafe fn surface_attrib(&self,
                             display: EGLDisplay,
                             surface: EGLSurface,
                             attribute: EGLint,
                             value: EGLint)
                             -> EGLBoolean {
        self.egl.SurfaceAttrib(display, surface, attribute, value)
    }

    #[inline]
    unsafe fn query_surface(&self,
                            display: EGLDisplay,
                            surface: EGLSurface,
                            attribute: EGLint,
                            value: &mut EGLint)
                            -> EGLBoolean {
        self.egl.QuerySurface(display, surface, attribute, value)
    }

    #[inline]
    unsafe fn swap_interval(&self, display: EGLDisplay, interval: EGLint) -> EGLBoolean {
        self.egl.SwapInterval(display, interval)
    }

    #[inline]
    unsafe fn swap_buffers(&self, display: EGLDisplay, surface: EGLSurface) -> EGLBoolean {
        self.egl.SwapBuffers(display, surface)
    }

    #[inline]
    unsafe fn destroy_context(&self, display: EGLDisplay, context: EGLContext) -> EGLBoolean {
        self.egl.DestroyContext(display, context)
    }

    #[inline]
    unsafe fn destroy_surface(&self, display: EGLDisplay, surface: EGLSurface) -> EGLBoolean {
        self.egl.DestroySurface(display, surface)
    }

    #[inline]
    unsafe fn terminate(&self, display: EGLDisplay) -> EGLBoolean {
        self.egl.Terminate(display)
    }

    #[inline]
    fn get_error(&self) -> EGLint {
        unsafe { self.egl.GetError() }
    }
}
