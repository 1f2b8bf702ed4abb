//! ASCII art branding.
//!
//! Resolves a block of text art once per session: a user-supplied file
//! when given and readable, otherwise the platform default.

use std::fs;
use std::path::Path;

use tracing::warn;

const LINUX: &str = r"    .--.
   |o_o |
   |:_/ |
  //   \ \
 (|     | )
/'\_   _/`\
\___)=(___/";

const MACOS: &str = r"       .:'
    __ :'__
 .'`__`-'__``.
:__________.-'
:_________:
 :_________`-;
  `.__.-.__.'";

const WINDOWS: &str = r" _______ _______
|       |       |
|_______|_______|
 _______ _______
|       |       |
|_______|_______|";

const DEFAULT: &str = r" ______________
|  __________  |
| | >_       | |
| |          | |
| |__________| |
|______________|";

/// Art for a platform identifier as reported by `std::env::consts::OS`.
///
/// Unrecognized platforms get the generic terminal logo.
pub fn platform_art(os: &str) -> &'static str {
    match os {
        "linux" => LINUX,
        "macos" => MACOS,
        "windows" => WINDOWS,
        _ => DEFAULT,
    }
}

/// Resolves the session's art block.
///
/// An unreadable override path falls back to the platform default rather
/// than propagating the error.
pub fn art_for(override_path: Option<&Path>) -> String {
    if let Some(path) = override_path {
        match fs::read_to_string(path) {
            Ok(text) => return text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "custom art not readable, using platform default");
            }
        }
    }
    platform_art(std::env::consts::OS).to_string()
}
