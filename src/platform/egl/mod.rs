// eglctx/src/platform/egl/mod.rs
//
//! EGL window-surface contexts on GBM, X11 and Android.

pub mod context;
pub mod display;
pub mod driver;
pub mod ffi;
pub mod native;
