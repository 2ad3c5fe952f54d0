//! WASM-compatible wrapper types and boundary helpers.

use std::fmt::Display;

use reframe_core::decode::DecodedImage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A decoded RGB image held in WASM memory.
///
/// `pixels()` copies the buffer into a fresh `Uint8Array`; keep the image on
/// the WASM side when it only feeds other bindings.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from RGB pixel data (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsDecodedImage, JsValue> {
        DecodedImage::new(width, height, pixels)
            .map(Self::from_decoded)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Release WASM memory now instead of waiting for the finalizer.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_decoded(self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels,
        }
    }
}

/// Render any error as a thrown JS string.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {what}: {e}")))
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decoded() {
        let decoded = DecodedImage::filled(200, 100, [0, 0, 0]);
        let js_img = JsDecodedImage::from_decoded(decoded);
        assert_eq!(js_img.width(), 200);
        assert_eq!(js_img.height(), 100);
        assert_eq!(js_img.byte_length(), 60000);
    }

    #[test]
    fn test_pixels_round_trip() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8];
        let img = JsDecodedImage::from_decoded(DecodedImage::new(2, 1, pixels.clone()).unwrap());
        assert_eq!(img.pixels(), pixels);
        assert_eq!(img.into_decoded().pixel(1, 0), [32, 16, 8]);
    }
}
