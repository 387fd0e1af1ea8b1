use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::palette::Rgb;

/// What gets painted behind every screen
#[derive(Debug, Clone, PartialEq)]
pub enum Backdrop {
    /// Lines of text art, tiled from the top-left corner
    Art(Vec<String>),
    Solid(Rgb),
}

impl Backdrop {
    /// Load text art from `path`, falling back to a solid colour when the
    /// asset is missing, unreadable or empty.
    pub fn load(path: Option<&Path>, fallback: Rgb) -> Self {
        let Some(path) = path else {
            debug!("no background configured, using solid fill");
            return Backdrop::Solid(fallback);
        };

        match fs::read_to_string(path) {
            Ok(contents) if !contents.trim().is_empty() => {
                let lines: Vec<String> = contents.lines().map(str::to_string).collect();
                debug!(path = %path.display(), lines = lines.len(), "loaded background art");
                Backdrop::Art(lines)
            }
            Ok(_) => {
                warn!(path = %path.display(), "background file is empty, using solid fill");
                Backdrop::Solid(fallback)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "background unavailable, using solid fill");
                Backdrop::Solid(fallback)
            }
        }
    }
}
