use crate::library::symbol;
use libloading::Library;
use parking_lot::RwLock;
use std::os::raw::{c_int, c_uint};

#[repr(C)]
pub struct GLFWwindow {
    _private: [u8; 0],
}

#[repr(C)]
pub struct GLFWmonitor {
    _private: [u8; 0],
}

/// Entry points of `imgui_impl_glfw`, in declaration order.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct ImGuiGlfwBackend {
    pub init_for_opengl: unsafe extern "C" fn(*mut GLFWwindow, bool) -> bool,
    pub init_for_vulkan: unsafe extern "C" fn(*mut GLFWwindow, bool) -> bool,
    pub init_for_other: unsafe extern "C" fn(*mut GLFWwindow, bool) -> bool,
    pub shutdown: unsafe extern "C" fn(),
    pub new_frame: unsafe extern "C" fn(),
    pub set_callbacks_chain_for_all_windows: unsafe extern "C" fn(bool),
    pub window_focus_callback: unsafe extern "C" fn(*mut GLFWwindow, c_int),
    pub cursor_enter_callback: unsafe extern "C" fn(*mut GLFWwindow, c_int),
    pub cursor_pos_callback: unsafe extern "C" fn(*mut GLFWwindow, f64, f64),
    pub mouse_button_callback: unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int),
    pub scroll_callback: unsafe extern "C" fn(*mut GLFWwindow, f64, f64),
    pub key_callback: unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int, c_int),
    pub char_callback: unsafe extern "C" fn(*mut GLFWwindow, c_uint),
    pub monitor_callback: unsafe extern "C" fn(*mut GLFWmonitor, c_int),
}

impl ImGuiGlfwBackend {
    /// # Safety
    /// `library` must export the `ImGui_ImplGlfw_*` functions with C linkage
    /// and must outlive every call through the returned table.
    pub unsafe fn resolve(library: &Library) -> anyhow::Result<Self> {
        Ok(Self {
            init_for_opengl: symbol(library, "ImGui_ImplGlfw_InitForOpenGL")?,
            init_for_vulkan: symbol(library, "ImGui_ImplGlfw_InitForVulkan")?,
            init_for_other: symbol(library, "ImGui_ImplGlfw_InitForOther")?,
            shutdown: symbol(library, "ImGui_ImplGlfw_Shutdown")?,
            new_frame: symbol(library, "ImGui_ImplGlfw_NewFrame")?,
            set_callbacks_chain_for_all_windows: symbol(
                library,
                "ImGui_ImplGlfw_SetCallbacksChainForAllWindows",
            )?,
            window_focus_callback: symbol(library, "ImGui_ImplGlfw_WindowFocusCallback")?,
            cursor_enter_callback: symbol(library, "ImGui_ImplGlfw_CursorEnterCallback")?,
            cursor_pos_callback: symbol(library, "ImGui_ImplGlfw_CursorPosCallback")?,
            mouse_button_callback: symbol(library, "ImGui_ImplGlfw_MouseButtonCallback")?,
            scroll_callback: symbol(library, "ImGui_ImplGlfw_ScrollCallback")?,
            key_callback: symbol(library, "ImGui_ImplGlfw_KeyCallback")?,
            char_callback: symbol(library, "ImGui_ImplGlfw_CharCallback")?,
            monitor_callback: symbol(library, "ImGui_ImplGlfw_MonitorCallback")?,
        })
    }
}

static BACKEND: RwLock<Option<ImGuiGlfwBackend>> = RwLock::new(None);

pub fn install(backend: ImGuiGlfwBackend) {
    *BACKEND.write() = Some(backend);
}

pub fn uninstall() {
    *BACKEND.write() = None;
}

fn backend() -> Option<ImGuiGlfwBackend> {
    let backend = *BACKEND.read();
    if backend.is_none() {
        warn!("ImGui GLFW backend is not bound, ignoring the call");
    }
    backend
}

#[no_mangle]
pub extern "C" fn imgui_glfw_install_backend(backend: *const ImGuiGlfwBackend) -> bool {
    match unsafe { backend.as_ref() } {
        Some(backend) => {
            install(*backend);
            true
        }
        None => false,
    }
}

#[no_mangle]
pub extern "C" fn imgui_glfw_has_backend() -> bool {
    BACKEND.read().is_some()
}

#[no_mangle]
pub extern "C" fn imgui_glfw_init_for_opengl(
    window: *mut GLFWwindow,
    install_callbacks: bool,
) -> bool {
    backend()
        .map(|backend| unsafe { (backend.init_for_opengl)(window, install_callbacks) })
        .unwrap_or(false)
}

#[no_mangle]
pub extern "C" fn imgui_glfw_init_for_vulkan(
    window: *mut GLFWwindow,
    install_callbacks: bool,
) -> bool {
    backend()
        .map(|backend| unsafe { (backend.init_for_vulkan)(window, install_callbacks) })
        .unwrap_or(false)
}

#[no_mangle]
pub extern "C" fn imgui_glfw_init_for_other(
    window: *mut GLFWwindow,
    install_callbacks: bool,
) -> bool {
    backend()
        .map(|backend| unsafe { (backend.init_for_other)(window, install_callbacks) })
        .unwrap_or(false)
}

#[no_mangle]
pub extern "C" fn imgui_glfw_shutdown() {
    if let Some(backend) = backend() {
        unsafe { (backend.shutdown)() }
    }
}

#[no_mangle]
pub extern "C" fn imgui_glfw_new_frame() {
    if let Some(backend) = backend() {
        unsafe { (backend.new_frame)() }
    }
}

#[no_mangle]
pub extern "C" fn imgui_set_callbacks_chain_for_all_windows(chain_for_all_windows: bool) {
    if let Some(backend) = backend() {
        unsafe { (backend.set_callbacks_chain_for_all_windows)(chain_for_all_windows) }
    }
}

#[no_mangle]
pub extern "C" fn imgui_window_focus_callback(window: *mut GLFWwindow, focused: c_int) {
    if let Some(backend) = backend() {
        unsafe { (backend.window_focus_callback)(window, focused) }
    }
}

#[no_mangle]
pub extern "C" fn imgui_cursor_enter_callback(window: *mut GLFWwindow, entered: c_int) {
    if let Some(backend) = backend() {
        unsafe { (backend.cursor_enter_callback)(window, entered) }
    }
}

#[no_mangle]
pub extern "C" fn imgui_cursor_pos_callback(window: *mut GLFWwindow, x: f64, y: f64) {
    if let Some(backend) = backend() {
        unsafe { (backend.cursor_pos_callback)(window, x, y) }
    }
}

#[no_mangle]
pub extern "C" fn imgui_mouse_button_callback(
    window: *mut GLFWwindow,
    button: c_int,
    action: c_int,
    mods: c_int,
) {
    if let Some(backend) = backend() {
        unsafe { (backend.mouse_button_callback)(window, button, action, mods) }
    }
}

#[no_mangle]
pub extern "C" fn imgui_scroll_callback(window: *mut GLFWwindow, xoffset: f64, yoffset: f64) {
    if let Some(backend) = backend() {
        unsafe { (backend.scroll_callback)(window, xoffset, yoffset) }
    }
}

#[no_mangle]
pub extern "C" fn imgui_key_callback(
    window: *mut GLFWwindow,
    key: c_int,
    scancode: c_int,
    action: c_int,
    mods: c_int,
) {
    if let Some(backend) = backend() {
        unsafe { (backend.key_callback)(window, key, scancode, action, mods) }
    }
}

#[no_mangle]
pub extern "C" fn imgui_char_callback(window: *mut GLFWwindow, c: c_uint) {
    if let Some(backend) = backend() {
        unsafe { (backend.char_callback)(window, c) }
    }
}

#[no_mangle]
pub extern "C" fn imgui_monitor_callback(monitor: *mut GLFWmonitor, event: c_int) {
    if let Some(backend) = backend() {
        unsafe { (backend.monitor_callback)(monitor, event) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imgui::TEST_GUARD;
    use parking_lot::Mutex;

    static CALLS: Mutex<Vec<String>> = Mutex::new(Vec::new());

    fn record(call: String) {
        CALLS.lock().push(call);
    }

    fn take_calls() -> Vec<String> {
        std::mem::take(&mut *CALLS.lock())
    }

    unsafe extern "C" fn init_for_opengl(window: *mut GLFWwindow, install_callbacks: bool) -> bool {
        record(format!("init_for_opengl {:p} {}", window, install_callbacks));
        true
    }
    unsafe extern "C" fn init_for_vulkan(_window: *mut GLFWwindow, install_callbacks: bool) -> bool {
        record(format!("init_for_vulkan {}", install_callbacks));
        false
    }
    unsafe extern "C" fn init_for_other(_window: *mut GLFWwindow, install_callbacks: bool) -> bool {
        record(format!("init_for_other {}", install_callbacks));
        install_callbacks
    }
    unsafe extern "C" fn shutdown() {
        record("shutdown".to_string());
    }
    unsafe extern "C" fn new_frame() {
        record("new_frame".to_string());
    }
    unsafe extern "C" fn set_callbacks_chain_for_all_windows(chain: bool) {
        record(format!("chain {}", chain));
    }
    unsafe extern "C" fn window_focus_callback(_window: *mut GLFWwindow, focused: c_int) {
        record(format!("focus {}", focused));
    }
    unsafe extern "C" fn cursor_enter_callback(_window: *mut GLFWwindow, entered: c_int) {
        record(format!("enter {}", entered));
    }
    unsafe extern "C" fn cursor_pos_callback(_window: *mut GLFWwindow, x: f64, y: f64) {
        record(format!("pos {} {}", x, y));
    }
    unsafe extern "C" fn mouse_button_callback(
        _window: *mut GLFWwindow,
        button: c_int,
        action: c_int,
        mods: c_int,
    ) {
        record(format!("mouse {} {} {}", button, action, mods));
    }
    unsafe extern "C" fn scroll_callback(_window: *mut GLFWwindow, x: f64, y: f64) {
        record(format!("scroll {} {}", x, y));
    }
    unsafe extern "C" fn key_callback(
        _window: *mut GLFWwindow,
        key: c_int,
        scancode: c_int,
        action: c_int,
        mods: c_int,
    ) {
        record(format!("key {} {} {} {}", key, scancode, action, mods));
    }
    unsafe extern "C" fn char_callback(_window: *mut GLFWwindow, c: c_uint) {
        record(format!("char {}", c));
    }
    unsafe extern "C" fn monitor_callback(_monitor: *mut GLFWmonitor, event: c_int) {
        record(format!("monitor {}", event));
    }

    fn recording_backend() -> ImGuiGlfwBackend {
        ImGuiGlfwBackend {
            init_for_opengl,
            init_for_vulkan,
            init_for_other,
            shutdown,
            new_frame,
            set_callbacks_chain_for_all_windows,
            window_focus_callback,
            cursor_enter_callback,
            cursor_pos_callback,
            mouse_button_callback,
            scroll_callback,
            key_callback,
            char_callback,
            monitor_callback,
        }
    }

    #[test]
    fn unbound_backend_is_a_no_op() {
        let _guard = TEST_GUARD.lock();
        uninstall();
        take_calls();

        assert!(!imgui_glfw_has_backend());
        assert!(!imgui_glfw_init_for_opengl(std::ptr::null_mut(), true));
        imgui_glfw_new_frame();
        imgui_key_callback(std::ptr::null_mut(), 65, 38, 1, 0);
        assert!(take_calls().is_empty());
    }

    #[test]
    fn null_table_is_rejected() {
        let _guard = TEST_GUARD.lock();
        uninstall();
        assert!(!imgui_glfw_install_backend(std::ptr::null()));
        assert!(!imgui_glfw_has_backend());
    }

    #[test]
    fn calls_are_forwarded_unchanged() {
        let _guard = TEST_GUARD.lock();
        let table = recording_backend();
        assert!(imgui_glfw_install_backend(&table));
        take_calls();

        let window = 0x1000 as *mut GLFWwindow;
        assert!(imgui_glfw_init_for_opengl(window, true));
        assert!(!imgui_glfw_init_for_vulkan(window, true));
        assert!(!imgui_glfw_init_for_other(window, false));
        imgui_glfw_new_frame();
        imgui_set_callbacks_chain_for_all_windows(true);
        imgui_window_focus_callback(window, 1);
        imgui_cursor_enter_callback(window, 0);
        imgui_cursor_pos_callback(window, 10.5, -3.0);
        imgui_mouse_button_callback(window, 1, 1, 4);
        imgui_scroll_callback(window, 0.0, 2.5);
        imgui_key_callback(window, 65, 38, 1, 2);
        imgui_char_callback(window, 0x1F600);
        imgui_monitor_callback(std::ptr::null_mut(), 0x00040002);
        imgui_glfw_shutdown();

        assert_eq!(
            take_calls(),
            vec![
                format!("init_for_opengl {:p} true", window),
                "init_for_vulkan true".to_string(),
                "init_for_other false".to_string(),
                "new_frame".to_string(),
                "chain true".to_string(),
                "focus 1".to_string(),
                "enter 0".to_string(),
                "pos 10.5 -3".to_string(),
                "mouse 1 1 4".to_string(),
                "scroll 0 2.5".to_string(),
                "key 65 38 1 2".to_string(),
                format!("char {}", 0x1F600),
                format!("monitor {}", 0x00040002),
                "shutdown".to_string(),
            ]
        );

        uninstall();
    }
}
