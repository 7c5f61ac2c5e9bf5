//! Shared helpers used by feature slices and overlays.

pub mod text;

pub use text::{
    char_width, display_width, sanitize_for_display, truncate_start_with_ellipsis,
    truncate_with_ellipsis,
};
