//! Day block adjustment.
//!
//! Anchor slicing keeps tokens in source order, which leaves the late-night
//! overtime value at the tail of the block. It belongs at slot 10 of the day
//! schema.

use crate::error::{DecodeError, DecodeResult};

/// Schema slot the trailing token is moved to.
pub const RELOCATED_SLOT: usize = 10;

/// Moves the last token of a block to [`RELOCATED_SLOT`].
///
/// Tokens from slot 10 onward shift right by one. Blocks of 11 tokens or
/// fewer are returned unchanged, since their tail already sits at or before
/// slot 10.
///
/// # Errors
///
/// Returns [`DecodeError::EmptyBlock`] for an empty block.
///
/// # Example
///
/// ```
/// use tps_decoder::decoding::adjust_day_block;
///
/// let block: Vec<String> = (0..13).map(|i| i.to_string()).collect();
/// let adjusted = adjust_day_block(block).unwrap();
/// assert_eq!(adjusted[10], "12");
/// assert_eq!(adjusted[11], "10");
/// assert_eq!(adjusted[12], "11");
/// ```
pub fn adjust_day_block<T>(mut block: Vec<T>) -> DecodeResult<Vec<T>> {
    let last = block.pop().ok_or(DecodeError::EmptyBlock)?;
    let slot = RELOCATED_SLOT.min(block.len());
    block.insert(slot, last);
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==========================================================================
    // DA-001: Last token moves to slot 10
    // ==========================================================================
    #[test]
    fn test_da_001_last_token_moves_to_slot_10() {
        let block = vec!["1", "0", "月", "", "540", "1080", "60", "", "480", "60", "X", "0", "late"];
        let adjusted = adjust_day_block(block).unwrap();

        assert_eq!(
            adjusted,
            vec!["1", "0", "月", "", "540", "1080", "60", "", "480", "60", "late", "X", "0"]
        );
    }

    // ==========================================================================
    // DA-002: Empty blocks are rejected
    // ==========================================================================
    #[test]
    fn test_da_002_empty_block() {
        assert_eq!(
            adjust_day_block(Vec::<String>::new()),
            Err(DecodeError::EmptyBlock)
        );
    }

    // ==========================================================================
    // DA-003: Short blocks are unchanged
    // ==========================================================================
    #[test]
    fn test_da_003_short_blocks_unchanged() {
        for len in 1..=11 {
            let block: Vec<usize> = (0..len).collect();
            assert_eq!(adjust_day_block(block.clone()).unwrap(), block, "len {len}");
        }
    }

    proptest! {
        #[test]
        fn prop_adjust_moves_tail(block in proptest::collection::vec(any::<u16>(), 12..40)) {
            let len = block.len();
            let adjusted = adjust_day_block(block.clone()).unwrap();

            prop_assert_eq!(adjusted.len(), len);
            prop_assert_eq!(&adjusted[..10], &block[..10]);
            prop_assert_eq!(adjusted[10], block[len - 1]);
            prop_assert_eq!(&adjusted[11..], &block[10..len - 1]);
        }
    }
}
