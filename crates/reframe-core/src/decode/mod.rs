//! Source image decoding.
//!
//! Decodes the source asset into an RGB buffer for the pixel engine:
//! - JPEG, PNG and WebP via the `image` crate
//! - EXIF orientation read with `kamadak-exif` and baked in, so pixel space
//!   matches the orientation the user edited in
//!
//! # Examples
//!
//! ```ignore
//! use reframe_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
