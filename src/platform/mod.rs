// eglctx/src/platform/mod.rs
//
//! Platform-specific backends.

pub mod egl;
