#![allow(non_snake_case)]

mod dialog;
mod error;
pub mod imgui;
mod library;
pub mod openal;
pub mod platform;
mod toast;
mod types;

pub use dialog::{boxer_show, show_dialog, show_native, DialogRequest, DialogToolkit};
pub use error::DialogError;
pub use toast::*;
pub use types::*;

#[macro_use]
extern crate log;

// string and value box constructors for C callers
extern crate value_box_ffi;

// The unmangled `boxer_test` C symbol is exported by `value_box_ffi` (identical body);
// a second `#[no_mangle]` definition here is a duplicate-symbol link error.
pub extern "C" fn boxer_test() -> bool {
    true
}

/// Installs the env_logger backend, configured by `RUST_LOG`. Safe to call more than once.
#[no_mangle]
pub extern "C" fn boxer_init_logger() {
    if env_logger::try_init().is_err() {
        debug!("Logger is already initialized");
    }
}
