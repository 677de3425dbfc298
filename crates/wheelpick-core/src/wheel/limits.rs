use super::state::WheelState;

/// Offset range a fling or settle may end in
///
/// Cyclic wheels are unbounded. Bounded wheels allow exactly one traversal of
/// the data set measured from the anchor item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlingLimits {
    pub min_offset: i32,
    pub max_offset: i32,
}

impl FlingLimits {
    pub const UNBOUNDED: Self = Self {
        min_offset: i32::MIN,
        max_offset: i32::MAX,
    };

    pub fn compute(state: &WheelState) -> Self {
        if state.is_cyclic {
            return Self::UNBOUNDED;
        }
        if state.is_inert() {
            return Self { min_offset: 0, max_offset: 0 };
        }
        let height = state.item_height() as i64;
        let current = state.current_item_index as i64;
        let last = state.data_count as i64 - 1;
        Self {
            min_offset: saturate(-(last - current) * height),
            max_offset: saturate(current * height),
        }
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    #[inline]
    pub fn clamp(&self, offset: i32) -> i32 {
        offset.clamp(self.min_offset, self.max_offset)
    }

    #[inline]
    pub fn contains(&self, offset: i32) -> bool {
        (self.min_offset..=self.max_offset).contains(&offset)
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
