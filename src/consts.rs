//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Default Gemini model when none is specified.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini REST endpoint root (v1beta).
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Instruction sent alongside every image prompt.
pub const DEFAULT_IMAGE_INSTRUCTION: &str = "Describe this image";

/// Placeholder image locator until real input plumbing exists.
pub const DEFAULT_IMAGE_LOCATOR: &str = "CURRENTLY_IMAGE_BASE_URL";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Prefix applied to every fault surfaced to a caller.
pub const FAULT_PREFIX: &str = "Internal server error: ";
