//! C-linkage forwarders for the Dear ImGui platform and renderer backends.
//!
//! The backends are C++ code. A backend is bound either by loading a shared
//! library that exports the C-linkage `ImGui_Impl*` entry points (cimgui builds
//! them with `IMGUI_IMPL_API=extern "C"`), or by the host installing a function
//! table it already resolved. Once bound, every `imgui_*` function forwards its
//! arguments and result unchanged.

#[cfg(feature = "glfw")]
pub mod glfw;
#[cfg(feature = "opengl3")]
pub mod opengl3;

use crate::library;
use anyhow::{bail, Context};
use libloading::Library;
use parking_lot::Mutex;
use string_box::StringBox;
use value_box::{ReturnBoxerResult, ValueBox, ValueBoxPointer};

/// Libraries whose symbols back the currently bound tables, by load path.
static LIBRARIES: Mutex<Vec<(String, Library)>> = Mutex::new(Vec::new());

/// Keeps `item` under `path`, replacing whatever was held for that path.
fn hold<T>(held: &mut Vec<(String, T)>, path: &str, item: T) {
    match held.iter_mut().find(|(held_path, _)| held_path == path) {
        Some((_, existing)) => *existing = item,
        None => held.push((path.to_string(), item)),
    }
}

/// Loads `path` and binds every backend it exports. Fails if it exports none.
pub fn load_backend_library(path: &str) -> anyhow::Result<()> {
    let library = library::open_first("ImGui backends", [path])
        .with_context(|| format!("Could not load ImGui backends from {}", path))?;

    #[allow(unused_mut)]
    let mut bound: Vec<&str> = Vec::new();

    #[cfg(feature = "glfw")]
    match unsafe { glfw::ImGuiGlfwBackend::resolve(&library) } {
        Ok(backend) => {
            glfw::install(backend);
            bound.push("GLFW");
        }
        Err(error) => debug!("{} has no GLFW backend: {:#}", path, error),
    }

    #[cfg(feature = "opengl3")]
    match unsafe { opengl3::ImGuiOpenGl3Backend::resolve(&library) } {
        Ok(backend) => {
            opengl3::install(backend);
            bound.push("OpenGL3");
        }
        Err(error) => debug!("{} has no OpenGL3 backend: {:#}", path, error),
    }

    if bound.is_empty() {
        bail!("{} does not export any supported ImGui backend", path);
    }

    info!("Bound ImGui {} backends from {}", bound.join(", "), path);
    hold(&mut LIBRARIES.lock(), path, library);
    Ok(())
}

/// Forgets every bound backend and closes the libraries loaded for them.
/// Must not race with a forwarder call in progress.
pub fn unload_backends() {
    #[cfg(feature = "glfw")]
    glfw::uninstall();
    #[cfg(feature = "opengl3")]
    opengl3::uninstall();

    LIBRARIES.lock().clear();
}

#[no_mangle]
pub extern "C" fn imgui_backend_load(library_path: *mut ValueBox<StringBox>) -> bool {
    library_path
        .with_ref(|library_path| {
            load_backend_library(&library_path.to_string())
                .map(|_| true)
                .map_err(|error| error.into())
        })
        .or_log(false)
}

#[no_mangle]
pub extern "C" fn imgui_backend_unload() {
    unload_backends();
}

#[cfg(test)]
pub(crate) static TEST_GUARD: Mutex<()> = Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_a_missing_library_fails() {
        let _guard = TEST_GUARD.lock();
        let error = load_backend_library("libimgui-backends-that-does-not-exist.so").unwrap_err();
        assert!(format!("{:#}", error).contains("Could not load ImGui backends"));
    }

    #[test]
    fn loading_over_the_c_abi_reports_false_on_failure() {
        let _guard = TEST_GUARD.lock();
        let path = ValueBox::new(StringBox::from_string(
            "libimgui-backends-that-does-not-exist.so".to_string(),
        ))
        .into_raw();

        assert!(!imgui_backend_load(path));
        path.release();
    }

    #[test]
    fn reloading_a_path_replaces_the_held_library() {
        let mut held = Vec::new();
        hold(&mut held, "libimgui.so", 1);
        hold(&mut held, "libother.so", 2);
        hold(&mut held, "libimgui.so", 3);

        assert_eq!(
            held,
            vec![("libimgui.so".to_string(), 3), ("libother.so".to_string(), 2)]
        );
    }
}
