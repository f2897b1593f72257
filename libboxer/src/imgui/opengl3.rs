use crate::library::symbol;
use libloading::Library;
use parking_lot::RwLock;
use std::os::raw::c_char;

#[repr(C)]
pub struct ImDrawData {
    _private: [u8; 0],
}

/// Entry points of `imgui_impl_opengl3`, in declaration order.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct ImGuiOpenGl3Backend {
    pub init: unsafe extern "C" fn(*const c_char) -> bool,
    pub shutdown: unsafe extern "C" fn(),
    pub new_frame: unsafe extern "C" fn(),
    pub render_draw_data: unsafe extern "C" fn(*mut ImDrawData),
    pub create_fonts_texture: unsafe extern "C" fn() -> bool,
    pub destroy_fonts_texture: unsafe extern "C" fn(),
    pub create_device_objects: unsafe extern "C" fn() -> bool,
    pub destroy_device_objects: unsafe extern "C" fn(),
}

impl ImGuiOpenGl3Backend {
    /// # Safety
    /// `library` must export the `ImGui_ImplOpenGL3_*` functions with C linkage
    /// and must outlive every call through the returned table.
    pub unsafe fn resolve(library: &Library) -> anyhow::Result<Self> {
        Ok(Self {
            init: symbol(library, "ImGui_ImplOpenGL3_Init")?,
            shutdown: symbol(library, "ImGui_ImplOpenGL3_Shutdown")?,
            new_frame: symbol(library, "ImGui_ImplOpenGL3_NewFrame")?,
            render_draw_data: symbol(library, "ImGui_ImplOpenGL3_RenderDrawData")?,
            create_fonts_texture: symbol(library, "ImGui_ImplOpenGL3_CreateFontsTexture")?,
            destroy_fonts_texture: symbol(library, "ImGui_ImplOpenGL3_DestroyFontsTexture")?,
            create_device_objects: symbol(library, "ImGui_ImplOpenGL3_CreateDeviceObjects")?,
            destroy_device_objects: symbol(library, "ImGui_ImplOpenGL3_DestroyDeviceObjects")?,
        })
    }
}

static BACKEND: RwLock<Option<ImGuiOpenGl3Backend>> = RwLock::new(None);

pub fn install(backend: ImGuiOpenGl3Backend) {
    *BACKEND.write() = Some(backend);
}

pub fn uninstall() {
    *BACKEND.write() = None;
}

fn backend() -> Option<ImGuiOpenGl3Backend> {
    let backend = *BACKEND.read();
    if backend.is_none() {
        warn!("ImGui OpenGL3 backend is not bound, ignoring the call");
    }
    backend
}

#[no_mangle]
pub extern "C" fn imgui_opengl3_install_backend(backend: *const ImGuiOpenGl3Backend) -> bool {
    match unsafe { backend.as_ref() } {
        Some(backend) => {
            install(*backend);
            true
        }
        None => false,
    }
}

#[no_mangle]
pub extern "C" fn imgui_opengl3_has_backend() -> bool {
    BACKEND.read().is_some()
}

/// `glsl_version` may be null to let the backend pick its default.
#[no_mangle]
pub extern "C" fn imgui_opengl3_init(glsl_version: *const c_char) -> bool {
    backend()
        .map(|backend| unsafe { (backend.init)(glsl_version) })
        .unwrap_or(false)
}

#[no_mangle]
pub extern "C" fn imgui_opengl3_shutdown() {
    if let Some(backend) = backend() {
        unsafe { (backend.shutdown)() }
    }
}

#[no_mangle]
pub extern "C" fn imgui_opengl3_new_frame() {
    if let Some(backend) = backend() {
        unsafe { (backend.new_frame)() }
    }
}

#[no_mangle]
pub extern "C" fn imgui_opengl3_render_draw_data(draw_data: *mut ImDrawData) {
    if let Some(backend) = backend() {
        unsafe { (backend.render_draw_data)(draw_data) }
    }
}

#[no_mangle]
pub extern "C" fn imgui_opengl3_create_fonts_texture() -> bool {
    backend()
        .map(|backend| unsafe { (backend.create_fonts_texture)() })
        .unwrap_or(false)
}

#[no_mangle]
pub extern "C" fn imgui_opengl3_destroy_fonts_texture() {
    if let Some(backend) = backend() {
        unsafe { (backend.destroy_fonts_texture)() }
    }
}

#[no_mangle]
pub extern "C" fn imgui_opengl3_create_device_objects() -> bool {
    backend()
        .map(|backend| unsafe { (backend.create_device_objects)() })
        .unwrap_or(false)
}

#[no_mangle]
pub extern "C" fn imgui_opengl3_destroy_device_objects() {
    if let Some(backend) = backend() {
        unsafe { (backend.destroy_device_objects)() }
    }
}
