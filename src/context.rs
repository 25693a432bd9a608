// eglctx/src/context.rs
//
//! Declarations common to all graphics contexts: identifiers and configuration attributes.

use crate::egl;
use crate::egl::types::EGLint;

use bitflags::bitflags;
use std::fmt::{self, Display, Formatter};
use std::sync::Mutex;

const RGBA_CHANNEL_BIT_DEPTH: EGLint = 8;
const DEPTH_BIT_DEPTH: EGLint = 16;

/// An opaque identifier for a graphics context, used in diagnostics instead of handle addresses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextID(pub u64);

impl Display for ContextID {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) static CREATE_CONTEXT_MUTEX: Mutex<ContextID> = Mutex::new(ContextID(0));

impl ContextID {
    pub(crate) fn next() -> ContextID {
        let mut next_context_id = CREATE_CONTEXT_MUTEX.lock().unwrap_or_else(|err| err.into_inner());
        let id = *next_context_id;
        next_context_id.0 += 1;
        id
    }
}

bitflags! {
    /// Client APIs a configuration must support (`EGL_RENDERABLE_TYPE`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RenderableType: EGLint {
        const OPENGL_ES  = egl::OPENGL_ES_BIT as EGLint;
        const OPENVG     = egl::OPENVG_BIT as EGLint;
        const OPENGL_ES2 = egl::OPENGL_ES2_BIT as EGLint;
        const OPENGL     = egl::OPENGL_BIT as EGLint;
        const OPENGL_ES3 = egl::OPENGL_ES3_BIT as EGLint;
    }
}

bitflags! {
    /// Surface kinds a configuration must support (`EGL_SURFACE_TYPE`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SurfaceTypeFlags: EGLint {
        const PBUFFER                 = egl::PBUFFER_BIT as EGLint;
        const PIXMAP                  = egl::PIXMAP_BIT as EGLint;
        const WINDOW                  = egl::WINDOW_BIT as EGLint;
        const SWAP_BEHAVIOR_PRESERVED = egl::SWAP_BEHAVIOR_PRESERVED_BIT as EGLint;
    }
}

/// The GUI dirty-region algorithm in use by the application.
///
/// The values match the integer setting `algorithmdirtyregions`. The non-trivial solvers repaint
/// only part of the frame and therefore need the back buffer to keep its contents across swaps.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DirtyRegionSolver {
    FillViewportAlways,
    Union,
    CostReduction,
    #[default]
    FillViewportOnChange,
}

impl DirtyRegionSolver {
    /// Maps the integer setting to a solver. Unknown values fall back to the default.
    pub fn from_setting(value: i32) -> DirtyRegionSolver {
        match value {
            0 => DirtyRegionSolver::FillViewportAlways,
            1 => DirtyRegionSolver::Union,
            2 => DirtyRegionSolver::CostReduction,
            _ => DirtyRegionSolver::FillViewportOnChange,
        }
    }

    /// Whether the back buffer must be preserved across `eglSwapBuffers`.
    #[inline]
    pub fn preserves_buffer(self) -> bool {
        matches!(self, DirtyRegionSolver::Union | DirtyRegionSolver::CostReduction)
    }
}

/// The attributes used to choose an EGL configuration.
///
/// Color is always RGBA8888 with a 16-bit depth buffer, no stencil and no multisampling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigAttributes {
    pub renderable_type: RenderableType,
    pub surface_type: SurfaceTypeFlags,
}

impl ConfigAttributes {
    pub fn new(renderable_type: RenderableType,
               dirty_region_solver: DirtyRegionSolver)
               -> ConfigAttributes {
        let mut surface_type = SurfaceTypeFlags::WINDOW;
        surface_type.set(SurfaceTypeFlags::SWAP_BEHAVIOR_PRESERVED,
                         dirty_region_solver.preserves_buffer());
        ConfigAttributes { renderable_type, surface_type }
    }

    /// Returns the `EGL_NONE`-terminated list for `eglChooseConfig`.
    pub(crate) fn to_egl_attributes(&self) -> [EGLint; 21] {
        [
            egl::RED_SIZE as EGLint,        RGBA_CHANNEL_BIT_DEPTH,
            egl::GREEN_SIZE as EGLint,      RGBA_CHANNEL_BIT_DEPTH,
            egl::BLUE_SIZE as EGLint,       RGBA_CHANNEL_BIT_DEPTH,
            egl::ALPHA_SIZE as EGLint,      RGBA_CHANNEL_BIT_DEPTH,
            egl::DEPTH_SIZE as EGLint,      DEPTH_BIT_DEPTH,
            egl::STENCIL_SIZE as EGLint,    0,
            egl::SAMPLE_BUFFERS as EGLint,  0,
            egl::SAMPLES as EGLint,         0,
            egl::SURFACE_TYPE as EGLint,    self.surface_type.bits(),
            egl::RENDERABLE_TYPE as EGLint, self.renderable_type.bits(),
            egl::NONE as EGLint,
        ]
    }
}
