//! Application constants and defaults

pub const APP_NAME: &str = "Inventario";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Unit a new item starts with
pub const DEFAULT_UNIDAD: &str = "UNI";
/// Reorder point a new item starts with
pub const DEFAULT_PUNTO_PEDIDO: f64 = 5.0;

/// `tipo` value that gets the red accent
pub const ERSA_TIPO: &str = "ERSA";

/// Simulated store latency when settings don't say otherwise
pub const DEFAULT_STORE_LATENCY_MS: u64 = 400;

/// Image extensions offered by the photo picker
pub const PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];
/// Longest side of decoded photo previews, in pixels
pub const PHOTO_PREVIEW_SIZE: u32 = 256;

pub const TOAST_VISIBLE_SECS: f32 = 3.0;
pub const TOAST_FADE_SECS: f32 = 0.5;
