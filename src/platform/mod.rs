//! Host-specific glue: logging, window/canvas creation, sizing, and the
//! unsupported-device message. Everything else is shared.

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        mod web;
        pub use web::*;
    } else {
        mod native;
        pub use native::*;
    }
}
