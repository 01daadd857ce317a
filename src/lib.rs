//! Kiosk Tour
//!
//! Interactive 3D control-cabinet walkthrough built on Bevy. The `tour3d` module
//! holds every scene component, resource and system; the binary in `main.rs`
//! wires them into an `App`.

pub mod tour3d;
