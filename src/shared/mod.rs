//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die `app`, `layers` und die Binary
//! gemeinsam verwenden.

pub mod options;

pub use options::ViewerOptions;
pub use options::{PICK_RADIUS_PX, REQUEST_TIMEOUT_SECS};
