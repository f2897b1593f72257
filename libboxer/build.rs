use cfg_aliases::cfg_aliases;

fn main() {
    cfg_aliases! {
        windows_platform: { target_os = "windows" },
        apple: { target_vendor = "apple" },
        free_unix: { all(unix, not(apple), not(target_os = "android")) },
    }
}
