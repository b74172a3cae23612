//! Binary frame for an encoding of `u8` samples.
//!
//! Layout (all integers little-endian):
//!
//! | Offset | Size      | Field              |
//! |--------|-----------|--------------------|
//! | 0      | 4         | magic `RLE1`       |
//! | 4      | 4         | total sample count |
//! | 8      | 4         | run count          |
//! | 12     | 3 * runs  | `value: u8`, `count: u16` per run |

use crate::codec::RleError;
use crate::codec::rle::{self, Run, RunLength};

pub const MAGIC: [u8; 4] = *b"RLE1";
pub const HEADER_LEN: usize = 12;
pub const RUN_LEN: usize = 1 + std::mem::size_of::<RunLength>();

/// Serialized size of `runs` in bytes.
pub fn frame_len(runs: &[Run<u8>]) -> usize {
    HEADER_LEN + runs.len() * RUN_LEN
}

/// Serialize `runs` into a new frame.
pub fn to_bytes(runs: &[Run<u8>]) -> Result<Vec<u8>, RleError> {
    let total = rle::encoded_len(runs);
    let total = u32::try_from(total).map_err(|_| RleError::TooLarge {
        what: "sample count",
        value: total,
    })?;
    let run_count = u32::try_from(runs.len()).map_err(|_| RleError::TooLarge {
        what: "run count",
        value: runs.len() as u64,
    })?;

    let mut out = Vec::with_capacity(frame_len(runs));
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&total.to_le_bytes());
    out.extend_from_slice(&run_count.to_le_bytes());
    for run in runs {
        out.push(run.value);
        out.extend_from_slice(&run.count.to_le_bytes());
    }
    Ok(out)
}

/// Parse a frame produced by [`to_bytes`].
///
/// The header total must match the sum of the run counts and every count
/// must be non-zero.
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<Run<u8>>, RleError> {
    let header = bytes.get(..HEADER_LEN).ok_or(RleError::Truncated {
        need: HEADER_LEN,
        got: bytes.len(),
    })?;

    let magic = read_array::<4>(header, 0);
    if magic != MAGIC {
        return Err(RleError::BadMagic(magic));
    }
    let total = u32::from_le_bytes(read_array(header, 4)) as u64;
    let run_count = u32::from_le_bytes(read_array(header, 8)) as usize;

    let body = &bytes[HEADER_LEN..];
    let need = run_count.saturating_mul(RUN_LEN);
    if body.len() < need {
        return Err(RleError::Truncated {
            need: need.saturating_add(HEADER_LEN),
            got: bytes.len(),
        });
    }
    if body.len() > need {
        return Err(RleError::TrailingBytes(body.len() - need));
    }

    let mut runs = Vec::with_capacity(run_count);
    for (index, chunk) in body.chunks_exact(RUN_LEN).enumerate() {
        let count = RunLength::from_le_bytes([chunk[1], chunk[2]]);
        if count == 0 {
            return Err(RleError::ZeroRun { index });
        }
        runs.push(Run::new(chunk[0], count));
    }

    let actual = rle::encoded_len(&runs);
    if actual != total {
        return Err(RleError::LengthMismatch {
            expected: total,
            actual,
        });
    }
    Ok(runs)
}

#[inline]
fn read_array<const N: usize>(buf: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[at..at + N]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::rle::{MAX_RUN, encode};

    #[test]
    fn test_frame_layout() {
        let runs = encode(&[0u8, 0, 0, 5, 5, 2]);
        let bytes = to_bytes(&runs).unwrap();

        assert_eq!(bytes.len(), frame_len(&runs));
        assert_eq!(&bytes[..4], b"RLE1");
        assert_eq!(&bytes[4..8], &6u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &3u32.to_le_bytes());
        assert_eq!(&bytes[12..], &[0, 3, 0, 5, 2, 0, 2, 1, 0]);
        assert_eq!(from_bytes(&bytes).unwrap(), runs);
    }

    #[test]
    fn test_empty_frame() {
        let bytes = to_bytes(&[]).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN);
        assert!(from_bytes(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_header() {
        let err = from_bytes(b"RLE1\x01").unwrap_err();
        assert_eq!(err, RleError::Truncated { need: 12, got: 5 });
    }

    #[test]
    fn test_truncated_body() {
        let runs = encode(&[1u8, 2, 3]);
        let mut bytes = to_bytes(&runs).unwrap();
        bytes.pop();
        assert!(matches!(from_bytes(&bytes), Err(RleError::Truncated { .. })));
    }

    #[test]
    fn test_trailing_bytes() {
        let runs = encode(&[1u8, 2]);
        let mut bytes = to_bytes(&runs).unwrap();
        bytes.push(0xff);
        assert_eq!(from_bytes(&bytes), Err(RleError::TrailingBytes(1)));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = to_bytes(&encode(&[1u8])).unwrap();
        bytes[0] = b'X';
        assert_eq!(from_bytes(&bytes), Err(RleError::BadMagic(*b"XLE1")));
    }

    #[test]
    fn test_zero_count_in_frame() {
        let mut bytes = to_bytes(&encode(&[4u8, 4, 7])).unwrap();
        // second run's count -> 0
        bytes[HEADER_LEN + RUN_LEN + 1] = 0;
        bytes[HEADER_LEN + RUN_LEN + 2] = 0;
        assert_eq!(from_bytes(&bytes), Err(RleError::ZeroRun { index: 1 }));
    }

    #[test]
    fn test_header_total_mismatch() {
        let mut bytes = to_bytes(&encode(&[4u8, 4, 7])).unwrap();
        bytes[4..8].copy_from_slice(&10u32.to_le_bytes());
        assert_eq!(
            from_bytes(&bytes),
            Err(RleError::LengthMismatch {
                expected: 10,
                actual: 3
            })
        );
    }

    #[test]
    fn test_saturated_runs_survive_the_frame() {
        let original = vec![3u8; MAX_RUN as usize * 2 + 5];
        let runs = encode(&original);
        assert_eq!(runs.len(), 3);
        assert!(runs[0].is_saturated() && runs[1].is_saturated());

        let bytes = to_bytes(&runs).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 3 * RUN_LEN);
        assert_eq!(&bytes[4..8], &(original.len() as u32).to_le_bytes());

        let parsed = from_bytes(&bytes).unwrap();
        assert_eq!(parsed, runs);
        assert_eq!(rle::decode_exact(&parsed, original.len()).unwrap(), original);
    }
}
