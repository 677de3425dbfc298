//! Snapping of resting offsets onto item boundaries

/// Distance to add to an offset whose remainder modulo `item_height` is
/// `remainder` so that it lands on a boundary.
///
/// Remainders beyond half a row continue to the next boundary in the
/// direction of the remainder's sign; smaller ones fall back.
pub fn distance_to_end_point(remainder: i32, item_height: i32) -> i32 {
    if item_height <= 0 {
        return 0;
    }
    if remainder.abs() > item_height / 2 {
        if remainder < 0 {
            -item_height - remainder
        } else {
            item_height - remainder
        }
    } else {
        -remainder
    }
}

/// Nearest item boundary to `offset`
pub fn snap_offset(offset: i32, item_height: i32) -> i32 {
    if item_height <= 0 {
        return offset;
    }
    offset.saturating_add(distance_to_end_point(offset % item_height, item_height))
}
