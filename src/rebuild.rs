//! Output buffer construction from a source buffer and its match offsets.

use crate::matcher::MatchOffsets;
use crate::replace::ReplaceError;

/// Exact length of the rewritten buffer, or `None` if it does not fit in a
/// `usize`.
///
/// Computed as `file_len - count * old_len + count * new_len` so no signed
/// delta is ever formed.
pub fn output_len(
    file_len: usize,
    match_count: usize,
    old_len: usize,
    new_len: usize,
) -> Option<usize> {
    let removed = match_count.checked_mul(old_len)?;
    let added = match_count.checked_mul(new_len)?;
    file_len.checked_sub(removed)?.checked_add(added)
}

/// Build the rewritten buffer.
///
/// Gaps between matches are copied verbatim and each match is replaced by
/// `replacement`. `offsets` must come from scanning `source` for a pattern of
/// length `old_len`.
pub fn rebuild(
    source: &[u8],
    offsets: &MatchOffsets,
    old_len: usize,
    replacement: &[u8],
) -> Result<Vec<u8>, ReplaceError> {
    let len = output_len(source.len(), offsets.len(), old_len, replacement.len()).ok_or(
        ReplaceError::CapacityOverflow {
            file_len: source.len(),
            matches: offsets.len(),
            new_len: replacement.len(),
        },
    )?;

    let mut output = Vec::with_capacity(len);
    let mut cursor = 0;
    for offset in offsets.iter() {
        output.extend_from_slice(&source[cursor..offset]);
        output.extend_from_slice(replacement);
        cursor = offset + old_len;
    }
    output.extend_from_slice(&source[cursor..]);

    debug_assert_eq!(output.len(), len);
    Ok(output)
}
