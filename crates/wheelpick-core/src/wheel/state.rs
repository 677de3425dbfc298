//! L4 Atomic Layer: Wheel geometry and scroll state
//!
//! `scroll_offset` is measured relative to `current_item_index`: an offset of
//! zero centers that item, a negative offset moves later items into the
//! center. The offset is the only input to rendering; the selected index is
//! derived from it once the wheel is at rest.

use crate::{Error, Result};

/// Row geometry supplied by the host after measuring its viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Height of one row in pixels (0 = not measured yet)
    pub item_height: i32,
    /// Rows shown above and below the centered row
    pub half_visible_count: i32,
    /// Height of the drawing area in pixels
    pub viewport_height: i32,
    /// Baseline offset of text inside a row
    pub base_draw_y: i32,
}

impl Geometry {
    /// Unmeasured geometry; every engine operation is a no-op until replaced
    pub fn unmeasured(half_visible_count: i32) -> Self {
        Self {
            item_height: 0,
            half_visible_count: half_visible_count.max(1),
            viewport_height: 0,
            base_draw_y: 0,
        }
    }

    pub fn new(item_height: i32, half_visible_count: i32, viewport_height: i32) -> Result<Self> {
        let geometry = Self {
            item_height,
            half_visible_count,
            viewport_height,
            base_draw_y: 0,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Split a viewport into `2 * half_visible_count + 1` equal rows
    pub fn from_viewport(viewport_height: i32, half_visible_count: i32) -> Result<Self> {
        if half_visible_count < 1 {
            return Err(Error::InvalidGeometry(format!(
                "half visible count must be at least 1, got {}",
                half_visible_count
            )));
        }
        let item_height = viewport_height / (2 * half_visible_count + 1);
        Self::new(item_height, half_visible_count, viewport_height)
    }

    pub fn with_base_draw_y(mut self, base_draw_y: i32) -> Self {
        self.base_draw_y = base_draw_y;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.item_height < 0 {
            return Err(Error::InvalidGeometry(format!(
                "item height must not be negative, got {}",
                self.item_height
            )));
        }
        if self.viewport_height <= 0 {
            return Err(Error::InvalidGeometry(format!(
                "viewport height must be positive, got {}",
                self.viewport_height
            )));
        }
        if self.half_visible_count < 1 {
            return Err(Error::InvalidGeometry(format!(
                "half visible count must be at least 1, got {}",
                self.half_visible_count
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn is_measured(&self) -> bool {
        self.item_height > 0
    }

    #[inline]
    pub fn visible_item_count(&self) -> i32 {
        self.half_visible_count * 2 + 1
    }

    /// Top and bottom pixel of the centered selection row
    pub fn selection_band(&self) -> (i32, i32) {
        let top = self.item_height * self.half_visible_count;
        (top, top + self.item_height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelState {
    pub geometry: Geometry,
    pub is_cyclic: bool,
    pub data_count: usize,
    /// Item centered when `scroll_offset` is zero
    pub current_item_index: usize,
    pub scroll_offset: i32,
}

impl WheelState {
    pub fn new(geometry: Geometry, data_count: usize, is_cyclic: bool) -> Self {
        Self {
            geometry,
            is_cyclic,
            data_count,
            current_item_index: 0,
            scroll_offset: 0,
        }
    }

    #[inline]
    pub fn item_height(&self) -> i32 {
        self.geometry.item_height
    }

    #[inline]
    pub fn half_visible_count(&self) -> i32 {
        self.geometry.half_visible_count
    }

    /// Empty data or unmeasured rows: nothing can scroll or draw
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.data_count == 0 || !self.geometry.is_measured()
    }

    /// Offset measured from item 0 instead of `current_item_index`
    pub fn absolute_offset(&self) -> i32 {
        let anchor = self.current_item_index as i64 * self.item_height() as i64;
        (self.scroll_offset as i64 - anchor).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Index centered at `offset`, wrapped (cyclic) or clamped (bounded)
    pub fn index_at_offset(&self, offset: i32) -> Option<usize> {
        if self.is_inert() {
            return None;
        }
        let count = self.data_count as i64;
        let steps = -(offset as i64) / self.item_height() as i64;
        let raw = self.current_item_index as i64 + steps;
        let index = if self.is_cyclic {
            raw.rem_euclid(count)
        } else {
            raw.clamp(0, count - 1)
        };
        Some(index as usize)
    }

    /// Offset that centers `index`, relative to the current anchor
    pub fn offset_for_index(&self, index: usize) -> i32 {
        let delta = self.current_item_index as i64 - index as i64;
        (delta * self.item_height() as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_viewport_splits_rows() {
        let geometry = Geometry::from_viewport(200, 2).unwrap();
        assert_eq!(geometry.item_height, 40);
        assert_eq!(geometry.visible_item_count(), 5);
        assert_eq!(geometry.selection_band(), (80, 120));
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        assert!(matches!(Geometry::new(-1, 2, 200), Err(Error::InvalidGeometry(_))));
        assert!(matches!(Geometry::new(40, 2, 0), Err(Error::InvalidGeometry(_))));
        assert!(matches!(Geometry::new(40, 0, 200), Err(Error::InvalidGeometry(_))));
        assert!(matches!(Geometry::from_viewport(200, 0), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn test_zero_item_height_is_unmeasured_not_invalid() {
        let geometry = Geometry::from_viewport(4, 2).unwrap();
        assert_eq!(geometry.item_height, 0);
        assert!(!geometry.is_measured());
        assert!(WheelState::new(geometry, 10, false).is_inert());
    }

    #[test]
    fn test_index_at_offset_bounded_and_cyclic() {
        let geometry = Geometry::new(40, 2, 200).unwrap();
        let mut state = WheelState::new(geometry, 5, false);
        assert_eq!(state.index_at_offset(-80), Some(2));
        assert_eq!(state.index_at_offset(-400), Some(4));
        assert_eq!(state.index_at_offset(40), Some(0));

        state.is_cyclic = true;
        assert_eq!(state.index_at_offset(40), Some(4));
        assert_eq!(state.index_at_offset(-200), Some(0));
    }

    #[test]
    fn test_absolute_offset_uses_anchor() {
        let geometry = Geometry::new(40, 2, 200).unwrap();
        let mut state = WheelState::new(geometry, 5, false);
        state.current_item_index = 3;
        state.scroll_offset = 40;
        assert_eq!(state.absolute_offset(), -80);
        assert_eq!(state.offset_for_index(1), 80);
    }
}
