//! Pure, stateless run-length encode/decode kernels.
//!
//! An encoding is a sequence of `(value, count)` runs. Counts are a fixed-width
//! [`RunLength`]; a run of equal values longer than [`MAX_RUN`] is split into
//! several runs, all saturated except the last. Apart from that split, the
//! encoder always emits maximal runs, so adjacent runs never share a value.

use crate::codec::RleError;

/// Width of the run counter.
pub type RunLength = u16;

/// Longest run a single pair can describe.
pub const MAX_RUN: RunLength = RunLength::MAX;

/// One `(value, count)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run<T> {
    pub value: T,
    pub count: RunLength,
}

impl<T> Run<T> {
    pub fn new(value: T, count: RunLength) -> Self {
        Self { value, count }
    }

    pub fn is_saturated(&self) -> bool {
        self.count == MAX_RUN
    }
}

impl<T> From<(T, RunLength)> for Run<T> {
    fn from((value, count): (T, RunLength)) -> Self {
        Self { value, count }
    }
}

//==================================================================================
// 1. Encoding
//==================================================================================

/// Encode `input` into maximal runs, splitting at [`MAX_RUN`].
pub fn encode<T>(input: &[T]) -> Vec<Run<T>>
where
    T: Copy + PartialEq,
{
    let mut runs = Vec::with_capacity(run_count(input));
    encode_into(input, &mut runs);
    runs
}

/// Like [`encode`] but appends into a caller-owned buffer, which is cleared first.
pub fn encode_into<T>(input: &[T], out: &mut Vec<Run<T>>)
where
    T: Copy + PartialEq,
{
    out.clear();

    let Some((&first, rest)) = input.split_first() else {
        return;
    };

    let mut current = first;
    let mut count: RunLength = 1;

    for &val in rest {
        if val == current && count < MAX_RUN {
            count += 1;
        } else {
            out.push(Run::new(current, count));
            current = val;
            count = 1;
        }
    }
    out.push(Run::new(current, count));
}

/// Number of runs [`encode`] would emit for `input`, without allocating.
pub fn run_count<T: PartialEq>(input: &[T]) -> usize {
    let mut runs = 0;
    let mut i = 0;
    while i < input.len() {
        let mut len = 1usize;
        while i + len < input.len() && input[i + len] == input[i] {
            len += 1;
        }
        runs += len.div_ceil(MAX_RUN as usize);
        i += len;
    }
    runs
}

//==================================================================================
// 2. Decoding
//==================================================================================

/// Decode `runs` back into a flat sequence.
///
/// Fails on a zero-count run. Use [`decode_exact`] when the caller knows how
/// many values to expect.
pub fn decode<T: Copy>(runs: &[Run<T>]) -> Result<Vec<T>, RleError> {
    let total = checked_total(runs)?;
    let mut out = Vec::with_capacity(total as usize);
    for run in runs {
        out.extend(std::iter::repeat_n(run.value, run.count as usize));
    }
    Ok(out)
}

/// Decode `runs`, rejecting encodings whose total length is not `expected`.
pub fn decode_exact<T: Copy>(runs: &[Run<T>], expected: usize) -> Result<Vec<T>, RleError> {
    let total = checked_total(runs)?;
    if total != expected as u64 {
        return Err(RleError::LengthMismatch {
            expected: expected as u64,
            actual: total,
        });
    }
    decode(runs)
}

/// Sum of all run counts.
pub fn encoded_len<T>(runs: &[Run<T>]) -> u64 {
    runs.iter().map(|r| r.count as u64).sum()
}

/// True when `runs` is what [`encode`] would produce for its own decoding:
/// no zero counts, and adjacent runs share a value only after a saturated run.
pub fn is_canonical<T: PartialEq>(runs: &[Run<T>]) -> bool {
    if runs.iter().any(|r| r.count == 0) {
        return false;
    }
    runs.windows(2).all(|w| w[0].value != w[1].value || w[0].is_saturated())
}

fn checked_total<T>(runs: &[Run<T>]) -> Result<u64, RleError> {
    if let Some(index) = runs.iter().position(|r| r.count == 0) {
        return Err(RleError::ZeroRun { index });
    }
    Ok(encoded_len(runs))
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
