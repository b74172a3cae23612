//! # RLE Round-Trip Check
//!
//! For every color channel of an image: encode, serialize to the wire frame,
//! parse the frame back, decode with the expected length and compare with the
//! original samples.
//!
//! The check itself is pure ([`check_image`]); [`run`] adds the file load.

use image::RgbImage;
use serde::Serialize;

use crate::channels::{self, Channel, ChannelPlane};
use crate::codec::{rle, wire};
use crate::config::RoundTripConfig;
use crate::error::{KitError, KitResult};

/// Round-trip statistics for one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelReport {
    pub channel: Channel,
    /// Samples in the source plane.
    pub samples: usize,
    /// Runs in the encoding.
    pub runs: usize,
    /// Flat element count of the encoding, two per run.
    pub encoded_elements: usize,
    /// Size of the serialized frame in bytes.
    pub wire_bytes: usize,
    /// Samples produced by the decoder.
    pub decoded: usize,
    /// Whether the decoded samples equal the source.
    pub identical: bool,
    /// First sample index where decode and source disagree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_diff: Option<usize>,
}

impl ChannelReport {
    /// Source bytes divided by wire bytes. Above 1.0 means RLE saved space.
    pub fn compression_ratio(&self) -> f64 {
        if self.wire_bytes == 0 {
            return 0.0;
        }
        self.samples as f64 / self.wire_bytes as f64
    }
}

/// Round-trip statistics for a whole image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTripReport {
    pub width: u32,
    pub height: u32,
    pub channels: Vec<ChannelReport>,
}

impl RoundTripReport {
    pub fn all_identical(&self) -> bool {
        self.channels.iter().all(|c| c.identical)
    }

    /// First channel that failed the comparison, if any.
    pub fn first_mismatch(&self) -> Option<&ChannelReport> {
        self.channels.iter().find(|c| !c.identical)
    }

    /// Human-readable diagnostics, one block per channel.
    ///
    /// Channels appear in red, green, blue order, the order of
    /// [`Channel::ALL`] and of the interleaved RGB8 buffer.
    pub fn render_text(&self) -> String {
        let mut out = format!("Image: {}x{}\n", self.width, self.height);
        for c in &self.channels {
            let name = c.channel;
            out.push_str(&format!("[{name}] Length of channel: {}\n", c.samples));
            out.push_str(&format!("[{name}] Length of encoding: {}\n", c.encoded_elements));
            out.push_str(&format!(
                "[{name}] Wire frame: {} bytes ({:.2}x)\n",
                c.wire_bytes,
                c.compression_ratio()
            ));
            out.push_str(&format!("[{name}] Length of decoded: {}\n", c.decoded));
            out.push_str(&format!(
                "[{name}] decoded identical to original channel: {}\n",
                c.identical
            ));
        }
        out
    }
}

/// Run one channel through encode, frame, parse and decode.
///
/// Malformed data surfaces as [`KitError::Codec`]; a successful decode that
/// differs from the source is reported with `identical == false`.
pub fn check_channel(plane: &ChannelPlane) -> KitResult<ChannelReport> {
    let runs = rle::encode(&plane.samples);
    let frame = wire::to_bytes(&runs)?;
    let parsed = wire::from_bytes(&frame)?;
    let decoded = rle::decode_exact(&parsed, plane.len())?;

    let first_diff = first_difference(&plane.samples, &decoded);
    let identical = first_diff.is_none();
    log::debug!(
        "{}: {} samples -> {} runs -> {} wire bytes, identical={}",
        plane.channel,
        plane.len(),
        runs.len(),
        frame.len(),
        identical
    );

    Ok(ChannelReport {
        channel: plane.channel,
        samples: plane.len(),
        runs: runs.len(),
        encoded_elements: runs.len() * 2,
        wire_bytes: frame.len(),
        decoded: decoded.len(),
        identical,
        first_diff,
    })
}

/// Check every channel of `img`.
pub fn check_image(img: &RgbImage) -> KitResult<RoundTripReport> {
    let channels = channels::split_channels(img)
        .iter()
        .map(check_channel)
        .collect::<KitResult<Vec<_>>>()?;

    let report = RoundTripReport {
        width: img.width(),
        height: img.height(),
        channels,
    };
    if let Some(bad) = report.first_mismatch() {
        log::warn!("{} channel did not survive the round trip", bad.channel);
    }
    Ok(report)
}

/// Load the configured image and check it.
pub fn run(config: &RoundTripConfig) -> KitResult<RoundTripReport> {
    config
        .validate()
        .map_err(|reason| KitError::config("input", config.input.display().to_string(), reason))?;

    log::info!("round trip: {}", config.input.display());
    let img = channels::load_rgb(&config.input)?;
    check_image(&img)
}

/// Decode every channel of `img` from its wire frame and reassemble the image.
pub fn rebuild_image(img: &RgbImage) -> KitResult<RgbImage> {
    let mut planes = channels::split_channels(img);
    for plane in planes.iter_mut() {
        let frame = wire::to_bytes(&rle::encode(&plane.samples))?;
        plane.samples = rle::decode_exact(&wire::from_bytes(&frame)?, plane.len())?;
    }
    channels::merge_channels(img.width(), img.height(), &planes)
}

/// Index of the first differing sample, or the shorter length when one
/// slice is a prefix of the other.
pub fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

/// Turn a report with a failed channel into a [`KitError::Mismatch`].
pub fn ensure_identical(report: &RoundTripReport) -> KitResult<()> {
    match report.first_mismatch() {
        None => Ok(()),
        Some(bad) => Err(KitError::Mismatch {
            channel: bad.channel,
            first_diff: bad.first_diff.unwrap_or(0),
        }),
    }
}
