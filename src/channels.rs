//! Per-channel views of an 8-bit RGB image.
//!
//! Images are normalized to `RgbImage` on load, so every input yields exactly
//! three planes. Grayscale sources produce three identical planes and alpha is
//! dropped.

use std::fmt;
use std::path::Path;

use image::RgbImage;
use serde::Serialize;

use crate::error::{KitError, KitResult};

/// One color plane of an RGB image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel inside an RGB8 pixel.
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flattened samples of one channel in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelPlane {
    pub channel: Channel,
    pub samples: Vec<u8>,
}

impl ChannelPlane {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Load any supported image file and normalize it to 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> KitResult<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| KitError::image_load(path, e))?;
    log::debug!(
        "loaded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img.to_rgb8())
}

/// Split `img` into its red, green and blue planes.
pub fn split_channels(img: &RgbImage) -> [ChannelPlane; 3] {
    Channel::ALL.map(|channel| ChannelPlane {
        channel,
        samples: extract(img.as_raw(), channel),
    })
}

/// Pull the samples of one channel out of an interleaved RGB8 buffer.
pub fn extract(rgb: &[u8], channel: Channel) -> Vec<u8> {
    rgb.chunks_exact(3).map(|px| px[channel.offset()]).collect()
}

/// Reassemble planes (in any order) into an image of `width` x `height`.
pub fn merge_channels(width: u32, height: u32, planes: &[ChannelPlane; 3]) -> KitResult<RgbImage> {
    let pixels = (width as usize) * (height as usize);
    for plane in planes {
        if plane.len() != pixels {
            return Err(KitError::Geometry(format!(
                "{} plane has {} samples, expected {}x{} = {}",
                plane.channel,
                plane.len(),
                width,
                height,
                pixels
            )));
        }
    }

    let mut raw = vec![0u8; pixels * 3];
    let mut seen = [false; 3];
    for plane in planes {
        let off = plane.channel.offset();
        if std::mem::replace(&mut seen[off], true) {
            return Err(KitError::Geometry(format!("duplicate {} plane", plane.channel)));
        }
        for (px, &s) in raw.chunks_exact_mut(3).zip(&plane.samples) {
            px[off] = s;
        }
    }

    RgbImage::from_raw(width, height, raw)
        .ok_or_else(|| KitError::Geometry(format!("cannot build {width}x{height} image")))
}
