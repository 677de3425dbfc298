//! L4 Atomic Layer: Scroll offset to row mapping
//!
//! Pure function of its inputs. Slots are positions in the infinite sequence
//! of rows, slot 0 being item 0 centered at offset 0; data indices are slots
//! wrapped (cyclic) or filtered (bounded) onto the data set.

/// Everything the mapper needs to lay out one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperInput {
    /// Offset measured from item 0
    pub scroll_offset: i32,
    pub item_height: i32,
    pub half_visible_count: i32,
    pub data_count: usize,
    pub is_cyclic: bool,
    /// Baseline offset of text inside a row
    pub base_draw_y: i32,
}

impl MapperInput {
    pub fn new(
        scroll_offset: i32,
        item_height: i32,
        half_visible_count: i32,
        data_count: usize,
        is_cyclic: bool,
    ) -> Self {
        Self {
            scroll_offset,
            item_height,
            half_visible_count,
            data_count,
            is_cyclic,
            base_draw_y: 0,
        }
    }

    pub fn with_base_draw_y(mut self, base_draw_y: i32) -> Self {
        self.base_draw_y = base_draw_y;
        self
    }

    /// Slot closest to the center row
    pub fn start_slot(&self) -> i64 {
        if self.item_height <= 0 {
            return 0;
        }
        -(self.scroll_offset as i64) / self.item_height as i64
    }
}

/// One row to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleItem {
    pub data_index: usize,
    pub slot: i64,
    /// Vertical pixel position of the row's baseline
    pub draw_offset: i64,
}

/// Lazily produced rows for one frame, from top to bottom
#[derive(Debug, Clone)]
pub struct VisibleItems {
    input: MapperInput,
    next_slot: i64,
    last_slot: i64,
}

/// Rows covering the visible window plus one overscan row on each edge
pub fn visible_items(input: MapperInput) -> VisibleItems {
    if input.data_count == 0 || input.item_height <= 0 {
        return VisibleItems {
            input,
            next_slot: 1,
            last_slot: 0,
        };
    }
    let start = input.start_slot();
    let reach = input.half_visible_count.max(0) as i64 + 1;
    VisibleItems {
        input,
        next_slot: start - reach,
        last_slot: start + reach,
    }
}

impl VisibleItems {
    fn map_slot(&self, slot: i64) -> Option<VisibleItem> {
        let count = self.input.data_count as i64;
        let data_index = if self.input.is_cyclic {
            slot.rem_euclid(count)
        } else if (0..count).contains(&slot) {
            slot
        } else {
            return None;
        };
        let height = self.input.item_height as i64;
        let draw_offset = self.input.base_draw_y as i64
            + (slot + self.input.half_visible_count as i64) * height
            + self.input.scroll_offset as i64;
        Some(VisibleItem {
            data_index: data_index as usize,
            slot,
            draw_offset,
        })
    }
}

impl Iterator for VisibleItems {
    type Item = VisibleItem;

    fn next(&mut self) -> Option<VisibleItem> {
        while self.next_slot <= self.last_slot {
            let slot = self.next_slot;
            self.next_slot += 1;
            if let Some(item) = self.map_slot(slot) {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last_slot - self.next_slot + 1).max(0) as usize;
        (0, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: MapperInput) -> Vec<VisibleItem> {
        visible_items(input).collect()
    }

    #[test]
    fn test_cyclic_wraps_without_out_of_range_indices() {
        let items = collect(MapperInput::new(-760, 50, 2, 3, true));
        let slots: Vec<i64> = items.iter().map(|i| i.slot).collect();
        assert_eq!(slots, vec![12, 13, 14, 15, 16, 17, 18]);
        let indices: Vec<usize> = items.iter().map(|i| i.data_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_cyclic_never_skips_a_slot() {
        for offset in (-2000..=2000).step_by(7) {
            for count in 1..6 {
                let items = collect(MapperInput::new(offset, 40, 2, count, true));
                assert_eq!(items.len(), 7, "offset {} count {}", offset, count);
                assert!(items.windows(2).all(|w| w[1].slot == w[0].slot + 1));
                assert!(items.iter().all(|i| i.data_index < count));
            }
        }
    }

    #[test]
    fn test_bounded_omits_slots_outside_data() {
        let items = collect(MapperInput::new(0, 40, 2, 5, false));
        let indices: Vec<usize> = items.iter().map(|i| i.data_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);

        let items = collect(MapperInput::new(-160, 40, 2, 5, false));
        let indices: Vec<usize> = items.iter().map(|i| i.data_index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert!(items.iter().all(|i| i.slot >= 0 && i.slot <= 4));
    }

    #[test]
    fn test_draw_offsets_center_the_current_item() {
        let input = MapperInput::new(-80, 40, 2, 5, false).with_base_draw_y(25);
        let centered = visible_items(input).find(|i| i.data_index == 2).unwrap();
        // Row `half_visible_count` is the center row
        assert_eq!(centered.draw_offset, 25 + 2 * 40);

        let items: Vec<VisibleItem> = visible_items(input).collect();
        assert!(items.windows(2).all(|w| w[1].draw_offset - w[0].draw_offset == 40));
    }

    #[test]
    fn test_partial_scroll_moves_rows() {
        let items = collect(MapperInput::new(-10, 40, 1, 10, false));
        let first = items.iter().find(|i| i.slot == 0).unwrap();
        assert_eq!(first.draw_offset, 40 - 10);
    }

    #[test]
    fn test_restartable() {
        let input = MapperInput::new(-123, 30, 3, 4, true);
        let a: Vec<VisibleItem> = visible_items(input).collect();
        let b: Vec<VisibleItem> = visible_items(input).collect();
        assert_eq!(a, b);
        let iter = visible_items(input);
        assert_eq!(iter.clone().count(), iter.count());
    }

    #[test]
    fn test_empty_or_unmeasured_yields_nothing() {
        assert_eq!(visible_items(MapperInput::new(0, 40, 2, 0, true)).count(), 0);
        assert_eq!(visible_items(MapperInput::new(0, 0, 2, 5, false)).count(), 0);
    }
}
