// eglctx/src/platform/egl/context.rs
//
//! The EGL display, config, context and window surface owned by one graphics context.

use super::display::{self, DisplayAcquisition};
use super::driver::{EglDriver, SystemEgl};
use super::native::{NativeDisplay, NativeWidget};
use crate::context::{ConfigAttributes, ContextID, DirtyRegionSolver, RenderableType};
use crate::egl;
use crate::egl::types::{EGLConfig, EGLContext, EGLDisplay, EGLSurface, EGLenum, EGLint};
use crate::{EGLVersion, Error, GLApi, GLVersion, WindowingApiError};

use euclid::default::Size2D;
use log::{debug, error, info, warn};
use std::ptr;

const CLIENT_VERSION: GLVersion = GLVersion { major: 2, minor: 0 };

/// Where a graphics context is in its lifecycle.
///
/// `detach()` moves `Bound` and `SurfaceReady` back to `ContextReady`; `destroy()` moves any state
/// back to `Uninitialized`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContextState {
    /// No display.
    Uninitialized,
    /// A display is initialized, but no config matched.
    DisplayReady,
    /// A config is selected; no context yet.
    ConfigSelected,
    /// A context exists; no surface.
    ContextReady,
    /// A context and a window surface exist, but have not been made current.
    SurfaceReady,
    /// The context is current on the surface.
    Bound,
}

/// An EGL display connection together with the config, context and window surface created from
/// it.
///
/// Resources are acquired in order: `create_display()` (display and config), `create_context()`,
/// `create_surface()`. The surface can be released and recreated with `detach()` without touching
/// the context. `destroy()`, which also runs on drop, releases the context, then the surface, then
/// the display; every step is skipped when its handle is already released.
///
/// Contexts are bound to the thread that created them, so this type is neither `Send` nor `Sync`.
pub struct GraphicsContext<D = SystemEgl> where D: EglDriver {
    driver: D,
    id: ContextID,
    dirty_region_solver: DirtyRegionSolver,
    display_acquisition: Option<DisplayAcquisition>,
    egl_display: EGLDisplay,
    egl_config: EGLConfig,
    egl_context: EGLContext,
    egl_surface: EGLSurface,
    egl_version: Option<EGLVersion>,
    display_extensions: Option<String>,
    surface_generation: u64,
    bound: bool,
}

impl GraphicsContext<SystemEgl> {
    /// Loads the system EGL library and creates an empty graphics context.
    ///
    /// `dirty_region_solver` decides whether window surfaces must preserve their back buffer
    /// across swaps.
    pub fn new(dirty_region_solver: DirtyRegionSolver) -> Result<GraphicsContext, Error> {
        let driver = SystemEgl::new().map_err(|err| {
            error!("Failed to load EGL: {}", err);
            err
        })?;
        Ok(GraphicsContext::with_driver(driver, dirty_region_solver))
    }
}

impl<D> GraphicsContext<D> where D: EglDriver {
    /// Creates an empty graphics context that issues its EGL calls through `driver`.
    pub fn with_driver(driver: D, dirty_region_solver: DirtyRegionSolver) -> GraphicsContext<D> {
        GraphicsContext {
            driver,
            id: ContextID::next(),
            dirty_region_solver,
            display_acquisition: None,
            egl_display: egl::NO_DISPLAY,
            egl_config: ptr::null(),
            egl_context: egl::NO_CONTEXT,
            egl_surface: egl::NO_SURFACE,
            egl_version: None,
            display_extensions: None,
            surface_generation: 0,
            bound: false,
        }
    }

    /// Acquires and initializes the display for `native_display`, binds `api`, and selects a
    /// window config supporting `renderable_type`.
    ///
    /// If a display is still held from an earlier call whose config selection failed, it is
    /// reused.
    pub fn create_display(&mut self,
                          native_display: NativeDisplay,
                          renderable_type: RenderableType,
                          api: GLApi)
                          -> Result<(), Error> {
        unsafe {
            let driver = &self.driver;
            let display_acquisition = *self
                .display_acquisition
                .get_or_insert_with(|| DisplayAcquisition::negotiate(driver));

            if self.egl_display == egl::NO_DISPLAY {
                self.egl_display = display_acquisition.acquire(&self.driver, native_display);
            }
            if self.egl_display == egl::NO_DISPLAY {
                error!("Failed to get EGL display for context {}", self.id);
                return Err(Error::DisplayUnavailable);
            }

            let (mut major, mut minor) = (0, 0);
            if self.driver.initialize(self.egl_display, &mut major, &mut minor) == egl::FALSE {
                let err = self.last_error();
                error!("Failed to initialize EGL display for context {}: {:?}", self.id, err);
                self.egl_display = egl::NO_DISPLAY;
                return Err(Error::DisplayInitFailed(err));
            }
            let egl_version = EGLVersion { major, minor };
            info!("EGL {} initialized for context {} ({:?})",
                  egl_version,
                  self.id,
                  display_acquisition);
            self.egl_version = Some(egl_version);

            if self.driver.bind_api(api.to_egl_api()) == egl::FALSE {
                let err = self.last_error();
                warn!("Failed to bind {:?} for context {}: {:?}", api, self.id, err);
            }

            if !self.egl_config.is_null() {
                warn!("Context {} already has an EGL config; keeping it", self.id);
                return Ok(());
            }

            let config_attributes = ConfigAttributes::new(renderable_type,
                                                          self.dirty_region_solver);
            let egl_config_attributes = config_attributes.to_egl_attributes();
            let mut configs: [EGLConfig; 1] = [ptr::null()];
            let mut config_count = 0;
            if self.driver.choose_config(self.egl_display,
                                         &egl_config_attributes,
                                         &mut configs,
                                         &mut config_count) == egl::FALSE {
                let err = self.last_error();
                error!("Failed to query EGL configs for context {}: {:?}", self.id, err);
                return Err(Error::NoConfigFound(err));
            }
            if config_count <= 0 {
                error!("No suitable EGL configs found for {:?}", config_attributes);
                return Err(Error::NoConfigFound(WindowingApiError::Failed));
            }
            self.egl_config = configs[0];

            self.display_extensions = self.driver.query_string(self.egl_display,
                                                               egl::EXTENSIONS as EGLint);
            info!("EGL display extensions: {}",
                  self.display_extensions.as_deref().unwrap_or(""));
        }

        Ok(())
    }

    /// Creates an OpenGL ES 2 context for the selected config. Does nothing if a context already
    /// exists.
    pub fn create_context(&mut self) -> Result<(), Error> {
        if self.egl_context != egl::NO_CONTEXT {
            return Ok(());
        }

        // Include an extra zero to work around broken implementations.
        let egl_context_attributes = [
            egl::CONTEXT_CLIENT_VERSION as EGLint, CLIENT_VERSION.major as EGLint,
            egl::NONE as EGLint, 0,
        ];

        unsafe {
            self.egl_context = self.driver.create_context(self.egl_display,
                                                          self.egl_config,
                                                          egl::NO_CONTEXT,
                                                          &egl_context_attributes);
            if self.egl_context == egl::NO_CONTEXT {
                let err = self.last_error();
                error!("Failed to create EGL context {}: {:?}", self.id, err);
                return Err(Error::ContextCreationFailed(err));
            }
        }

        debug!("Created EGL context {} for OpenGL ES {}.{}",
               self.id,
               CLIENT_VERSION.major,
               CLIENT_VERSION.minor);
        Ok(())
    }

    /// Creates a window surface for `native_widget`.
    ///
    /// Any surface already held is overwritten, not destroyed; call `detach()` first when
    /// replacing the window.
    pub fn create_surface(&mut self, native_widget: NativeWidget) -> Result<(), Error> {
        if self.egl_surface != egl::NO_SURFACE {
            warn!("Context {} replaces surface generation {} without detaching it",
                  self.id,
                  self.surface_generation);
        }

        let egl_surface_attributes = [egl::NONE as EGLint];
        self.bound = false;

        unsafe {
            self.egl_surface = self.driver.create_window_surface(self.egl_display,
                                                                 self.egl_config,
                                                                 native_widget.native_window,
                                                                 &egl_surface_attributes);
            if self.egl_surface == egl::NO_SURFACE {
                let code = self.driver.get_error();
                error!("Failed to create EGL window surface for context {}: {:#x}", self.id, code);
                return Err(Error::SurfaceCreationFailed(windowing_api_error(code)));
            }
        }

        self.surface_generation += 1;
        debug!("Created surface generation {} for context {}", self.surface_generation, self.id);
        Ok(())
    }

    /// Makes the context current on this thread, drawing to and reading from the surface.
    ///
    /// A failure here means the frame cannot be rendered; the previous binding, if any, stays in
    /// place.
    pub fn bind_context(&mut self) -> Result<(), Error> {
        unsafe {
            if self.driver.make_current(self.egl_display,
                                        self.egl_surface,
                                        self.egl_surface,
                                        self.egl_context) == egl::FALSE {
                let err = self.last_error();
                error!("Failed to make context {} current (surface generation {}, {:?}): {:?}",
                       self.id,
                       self.surface_generation,
                       self.state(),
                       err);
                return Err(Error::BindFailed(err));
            }
        }

        self.bound = true;
        Ok(())
    }

    /// Asks the driver to preserve the surface's back buffer across swaps, if the dirty-region
    /// solver repaints partial frames.
    ///
    /// Drivers that don't support `EGL_SWAP_BEHAVIOR` are tolerated: the failure is logged and
    /// this still succeeds.
    pub fn surface_attrib(&mut self) -> Result<(), Error> {
        if !self.dirty_region_solver.preserves_buffer() {
            return Ok(());
        }

        if self.egl_display == egl::NO_DISPLAY || self.egl_surface == egl::NO_SURFACE {
            error!("Context {} has no display or surface to set EGL_SWAP_BEHAVIOR on", self.id);
            return Err(Error::PreconditionFailed);
        }

        unsafe {
            if self.driver.surface_attrib(self.egl_display,
                                          self.egl_surface,
                                          egl::SWAP_BEHAVIOR as EGLint,
                                          egl::BUFFER_PRESERVED as EGLint) == egl::FALSE {
                let err = self.last_error();
                warn!("Could not set EGL_SWAP_BEHAVIOR for context {}: {:?}", self.id, err);
            }
        }

        Ok(())
    }

    /// Sets the swap interval to 1 (`enable`) or 0.
    pub fn set_vsync(&mut self, enable: bool) -> Result<(), Error> {
        let interval = if enable { 1 } else { 0 };
        unsafe {
            if self.driver.swap_interval(self.egl_display, interval) == egl::FALSE {
                let err = self.last_error();
                error!("Failed to set swap interval {} for context {}: {:?}",
                       interval,
                       self.id,
                       err);
                return Err(Error::VSyncUnsupported(err));
            }
        }
        Ok(())
    }

    /// Presents the back buffer. Does nothing without a display and surface; a failed swap drops
    /// the frame silently.
    pub fn swap_buffers(&self) {
        if self.egl_display == egl::NO_DISPLAY || self.egl_surface == egl::NO_SURFACE {
            return;
        }

        unsafe {
            self.driver.swap_buffers(self.egl_display, self.egl_surface);
        }
    }

    /// Unbinds the context and destroys the surface, keeping the context and display.
    pub fn detach(&mut self) {
        unsafe {
            if self.egl_context != egl::NO_CONTEXT {
                self.driver.make_current(self.egl_display,
                                         egl::NO_SURFACE,
                                         egl::NO_SURFACE,
                                         egl::NO_CONTEXT);
            }
            self.bound = false;

            self.release_surface();
        }
    }

    /// Releases the context, then the surface, then the display.
    pub fn destroy(&mut self) {
        unsafe {
            if self.egl_context != egl::NO_CONTEXT {
                self.driver.make_current(self.egl_display,
                                         egl::NO_SURFACE,
                                         egl::NO_SURFACE,
                                         egl::NO_CONTEXT);
                if self.driver.destroy_context(self.egl_display, self.egl_context) == egl::FALSE {
                    let err = self.last_error();
                    warn!("Failed to destroy EGL context {}: {:?}", self.id, err);
                }
                self.egl_context = egl::NO_CONTEXT;
            }
            self.bound = false;

            self.release_surface();

            if self.egl_display != egl::NO_DISPLAY {
                if self.driver.terminate(self.egl_display) == egl::FALSE {
                    let err = self.last_error();
                    warn!("Failed to terminate EGL display of context {}: {:?}", self.id, err);
                }
                self.egl_display = egl::NO_DISPLAY;
                debug!("Destroyed context {}", self.id);
            }
        }

        self.egl_config = ptr::null();
        self.egl_version = None;
        self.display_extensions = None;
    }

    unsafe fn release_surface(&mut self) {
        if self.egl_surface == egl::NO_SURFACE {
            return;
        }

        if self.driver.destroy_surface(self.egl_display, self.egl_surface) == egl::FALSE {
            let err = self.last_error();
            warn!("Failed to destroy surface generation {} of context {}: {:?}",
                  self.surface_generation,
                  self.id,
                  err);
        }
        self.egl_surface = egl::NO_SURFACE;
    }

    // Reads and clears the error of the last EGL call on this thread.
    fn last_error(&self) -> WindowingApiError {
        windowing_api_error(self.driver.get_error())
    }

    /// Returns the size of the window surface, in device pixels.
    pub fn surface_size(&self) -> Result<Size2D<i32>, Error> {
        if self.egl_display == egl::NO_DISPLAY || self.egl_surface == egl::NO_SURFACE {
            return Err(Error::PreconditionFailed);
        }

        let (mut width, mut height) = (0, 0);
        unsafe {
            if self.driver.query_surface(self.egl_display,
                                         self.egl_surface,
                                         egl::WIDTH as EGLint,
                                         &mut width) == egl::FALSE ||
                    self.driver.query_surface(self.egl_display,
                                              self.egl_surface,
                                              egl::HEIGHT as EGLint,
                                              &mut height) == egl::FALSE {
                let err = self.last_error();
                error!("Failed to query surface size of context {}: {:?}", self.id, err);
                return Err(Error::SurfaceQueryFailed(err));
            }
        }

        Ok(Size2D::new(width, height))
    }

    /// Where this context is in its lifecycle, derived from the handles it holds.
    ///
    /// `Bound` means the last `bind_context()` on this instance succeeded and nothing has been
    /// detached or replaced since. It does not reflect the thread's live binding: making another
    /// context current on this thread leaves this instance reporting `Bound`.
    pub fn state(&self) -> ContextState {
        if self.egl_display == egl::NO_DISPLAY {
            ContextState::Uninitialized
        } else if self.egl_config.is_null() {
            ContextState::DisplayReady
        } else if self.egl_context == egl::NO_CONTEXT {
            ContextState::ConfigSelected
        } else if self.egl_surface == egl::NO_SURFACE {
            ContextState::ContextReady
        } else if self.bound {
            ContextState::Bound
        } else {
            ContextState::SurfaceReady
        }
    }

    /// Whether the display advertises `name` in its extension string.
    pub fn has_display_extension(&self, name: &str) -> bool {
        self.display_extensions
            .as_deref()
            .is_some_and(|extensions| display::has_extension(extensions, name))
    }

    #[inline]
    pub fn id(&self) -> ContextID {
        self.id
    }

    #[inline]
    pub fn dirty_region_solver(&self) -> DirtyRegionSolver {
        self.dirty_region_solver
    }

    /// The acquisition path chosen by the first `create_display()` call.
    #[inline]
    pub fn display_acquisition(&self) -> Option<DisplayAcquisition> {
        self.display_acquisition
    }

    /// The EGL version reported when the display was initialized.
    #[inline]
    pub fn egl_version(&self) -> Option<EGLVersion> {
        self.egl_version
    }

    #[inline]
    pub fn egl_display(&self) -> EGLDisplay {
        self.egl_display
    }

    #[inline]
    pub fn egl_config(&self) -> EGLConfig {
        self.egl_config
    }

    #[inline]
    pub fn egl_context(&self) -> EGLContext {
        self.egl_context
    }

    #[inline]
    pub fn egl_surface(&self) -> EGLSurface {
        self.egl_surface
    }

    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D> Drop for GraphicsContext<D> where D: EglDriver {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Maps an `eglGetError` code to the error reported to callers. Codes with no dedicated variant,
/// `EGL_SUCCESS` included, become `Failed`.
pub(crate) fn windowing_api_error(code: EGLint) -> WindowingApiError {
    match code as EGLenum {
        egl::NOT_INITIALIZED => WindowingApiError::NotInitialized,
        egl::CONTEXT_LOST => WindowingApiError::ContextLost,
        egl::BAD_ACCESS => WindowingApiError::BadAccess,
        egl::BAD_ALLOC => WindowingApiError::BadAlloc,
        egl::BAD_ATTRIBUTE => WindowingApiError::BadAttribute,
        egl::BAD_PARAMETER => WindowingApiError::BadParameter,
        egl::BAD_MATCH => WindowingApiError::BadMatch,
        egl::BAD_DISPLAY => WindowingApiError::BadDisplay,
        egl::BAD_CONFIG => WindowingApiError::BadConfig,
        egl::BAD_CONTEXT => WindowingApiError::BadContext,
        egl::BAD_SURFACE => WindowingApiError::BadSurface,
        egl::BAD_CURRENT_SURFACE => WindowingApiError::BadCurrentSurface,
        egl::BAD_NATIVE_WINDOW => WindowingApiError::BadNativeWindow,
        egl::BAD_NATIVE_PIXMAP => WindowingApiError::BadNativePixmap,
        _ => WindowingApiError::Failed,
    }
}
