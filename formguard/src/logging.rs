//! Browser console logging for the wasm build

use wasm_bindgen::prelude::*;

// Console bindings
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    pub fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    pub fn error(s: &str);
}

/// Route panics to the console; safe to call repeatedly
pub fn init_logging() {
    console_error_panic_hook::set_once();
}

/// Log an info message to browser console
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::logging::log(&format!("formguard: {}", format_args!($($t)*)))
    }
}

/// Log a warning message to browser console
#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => {
        $crate::logging::warn(&format!("formguard: {}", format_args!($($t)*)))
    }
}

/// Log an error message to browser console
#[macro_export]
macro_rules! console_error {
    ($($t:tt)*) => {
        $crate::logging::error(&format!("formguard: {}", format_args!($($t)*)))
    }
}
