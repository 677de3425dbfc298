//! Three-wheel date picker built from scroll engines
//!
//! Year is a bounded wheel over a configured range, month and day are
//! (optionally) cyclic. The day wheel's item count follows the selected year
//! and month once both are at rest.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::config::{DateConfig, WheelConfig};
use crate::wheel::{FrameScheduler, Geometry, ItemSource, NoopScheduler, Phase, ScrollEngine};
use crate::{Error, Result};

/// One wheel of the date picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Year,
    Month,
    Day,
}

impl DateField {
    pub const ALL: [DateField; 3] = [DateField::Year, DateField::Month, DateField::Day];

    pub fn next(self) -> Self {
        match self {
            DateField::Year => DateField::Month,
            DateField::Month => DateField::Day,
            DateField::Day => DateField::Day,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DateField::Year => DateField::Year,
            DateField::Month => DateField::Year,
            DateField::Day => DateField::Month,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DateField::Year => "Year",
            DateField::Month => "Month",
            DateField::Day => "Day",
        }
    }
}

/// Number of days in `month` (1-12) of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Labels for one wheel, as handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct DateLabels {
    field: DateField,
    start_year: i32,
    count: usize,
}

impl ItemSource for DateLabels {
    fn len(&self) -> usize {
        self.count
    }

    fn label(&self, index: usize) -> String {
        match self.field {
            DateField::Year => (self.start_year + index as i32).to_string(),
            DateField::Month | DateField::Day => format!("{:02}", index + 1),
        }
    }
}

pub struct DatePicker<S = NoopScheduler> {
    year: ScrollEngine<S>,
    month: ScrollEngine<S>,
    day: ScrollEngine<S>,
    start_year: i32,
    end_year: i32,
}

impl DatePicker<NoopScheduler> {
    pub fn new(wheel: &WheelConfig, date: &DateConfig) -> Result<Self> {
        Self::with_scheduler(wheel, date, NoopScheduler)
    }
}

impl<S: FrameScheduler + Clone> DatePicker<S> {
    pub fn with_scheduler(wheel: &WheelConfig, date: &DateConfig, scheduler: S) -> Result<Self> {
        if date.start_year > date.end_year {
            return Err(Error::Config(format!(
                "year range {}..={} is empty",
                date.start_year, date.end_year
            )));
        }
        let years = (date.end_year - date.start_year + 1) as usize;
        let days = days_in_month(date.start_year, 1) as usize;
        Ok(Self {
            year: ScrollEngine::with_scheduler(wheel.clone(), years, false, scheduler.clone()),
            month: ScrollEngine::with_scheduler(wheel.clone(), 12, date.cyclic_month, scheduler.clone()),
            day: ScrollEngine::with_scheduler(wheel.clone(), days, date.cyclic_day, scheduler),
            start_year: date.start_year,
            end_year: date.end_year,
        })
    }

    pub fn engine(&self, field: DateField) -> &ScrollEngine<S> {
        match field {
            DateField::Year => &self.year,
            DateField::Month => &self.month,
            DateField::Day => &self.day,
        }
    }

    pub fn engine_mut(&mut self, field: DateField) -> &mut ScrollEngine<S> {
        match field {
            DateField::Year => &mut self.year,
            DateField::Month => &mut self.month,
            DateField::Day => &mut self.day,
        }
    }

    pub fn labels(&self, field: DateField) -> DateLabels {
        DateLabels {
            field,
            start_year: self.start_year,
            count: self.engine(field).state().data_count,
        }
    }

    pub fn set_geometry(&mut self, geometry: Geometry) -> Result<()> {
        for field in DateField::ALL {
            self.engine_mut(field).set_geometry(geometry)?;
        }
        Ok(())
    }

    /// Split a viewport of `viewport_height` pixels into rows on all three wheels
    pub fn set_viewport(&mut self, viewport_height: i32, base_draw_y: i32) -> Result<()> {
        for field in DateField::ALL {
            self.engine_mut(field).set_viewport(viewport_height, base_draw_y)?;
        }
        Ok(())
    }

    /// Advance all three wheels; returns true once every wheel is at rest
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let mut settled = true;
        for field in DateField::ALL {
            settled &= self.engine_mut(field).tick(elapsed).settled;
        }
        self.sync_day_count();
        settled
    }

    pub fn is_animating(&self) -> bool {
        DateField::ALL.iter().any(|f| self.engine(*f).is_animating())
    }

    /// Resize the day wheel to the selected month, keeping the day if it still exists
    pub fn sync_day_count(&mut self) {
        let (Some(year), Some(month)) = (self.selected_year(), self.selected_month()) else {
            return;
        };
        let days = days_in_month(year, month) as usize;
        if self.day.state().data_count == days {
            return;
        }
        if self.day.phase() == Phase::Dragging {
            return;
        }
        let keep = self
            .day
            .current_selected_index()
            .or_else(|| self.day.centered_index())
            .unwrap_or(0)
            .min(days - 1);
        debug!(year, month, days, "Day wheel resized");
        self.day.set_data_count(days);
        if let Err(e) = self.day.set_current_item_index(keep) {
            warn!(keep, days, "Could not restore day selection: {}", e);
        }
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.year
            .current_selected_index()
            .map(|i| self.start_year + i as i32)
    }

    pub fn selected_month(&self) -> Option<u32> {
        self.month.current_selected_index().map(|i| i as u32 + 1)
    }

    pub fn selected_day(&self) -> Option<u32> {
        self.day.current_selected_index().map(|i| i as u32 + 1)
    }

    /// Date under the selection band, `None` while any wheel is moving
    pub fn selected_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.selected_year()?, self.selected_month()?, self.selected_day()?)
    }

    /// Center `date` on all three wheels without animation
    pub fn set_date(&mut self, date: NaiveDate) -> Result<()> {
        if date.year() < self.start_year || date.year() > self.end_year {
            return Err(Error::OutOfRangeIndex {
                index: (date.year() - self.start_year).max(0) as usize,
                len: self.year.state().data_count,
            });
        }
        self.year
            .set_current_item_index((date.year() - self.start_year) as usize)?;
        self.month.set_current_item_index(date.month0() as usize)?;
        self.day
            .set_data_count(days_in_month(date.year(), date.month()) as usize);
        self.day.set_current_item_index(date.day0() as usize)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn picker() -> DatePicker {
        let date = DateConfig {
            start_year: 2000,
            end_year: 2030,
            ..Default::default()
        };
        let mut picker = DatePicker::new(&WheelConfig::default(), &date).unwrap();
        picker.set_geometry(Geometry::new(40, 2, 200).unwrap()).unwrap();
        picker
    }

    fn settle(picker: &mut DatePicker) {
        for _ in 0..1000 {
            if picker.tick(FRAME) {
                return;
            }
        }
        panic!("picker never settled");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_set_and_read_date() {
        let mut picker = picker();
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        picker.set_date(date).unwrap();
        assert_eq!(picker.selected_date(), Some(date));
        assert_eq!(picker.engine(DateField::Day).state().data_count, 29);
    }

    #[test]
    fn test_out_of_range_year_rejected() {
        let mut picker = picker();
        let date = NaiveDate::from_ymd_opt(2031, 1, 1).unwrap();
        assert!(matches!(picker.set_date(date), Err(Error::OutOfRangeIndex { .. })));
    }

    #[test]
    fn test_day_wheel_follows_month() {
        let mut picker = picker();
        picker
            .set_date(NaiveDate::from_ymd_opt(2023, 1, 31).unwrap())
            .unwrap();

        // January -> February
        picker.engine_mut(DateField::Month).scroll_by_items(1);
        settle(&mut picker);

        assert_eq!(picker.engine(DateField::Day).state().data_count, 28);
        assert_eq!(
            picker.selected_date(),
            Some(NaiveDate::from_ymd_opt(2023, 2, 28).unwrap())
        );
    }

    #[test]
    fn test_month_wraps_backwards() {
        let mut picker = picker();
        picker
            .set_date(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
            .unwrap();
        picker.engine_mut(DateField::Month).scroll_by_items(-1);
        settle(&mut picker);
        assert_eq!(picker.selected_month(), Some(12));
        assert_eq!(picker.selected_year(), Some(2023));
    }

    #[test]
    fn test_set_viewport_applies_to_every_wheel() {
        let mut picker = picker();
        picker
            .set_date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
            .unwrap();
        picker.set_viewport(100, 0).unwrap();
        for field in DateField::ALL {
            assert_eq!(picker.engine(field).state().item_height(), 20);
        }
        assert_eq!(
            picker.selected_date(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert!(matches!(picker.set_viewport(-5, 0), Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn test_labels() {
        let picker = picker();
        let years = picker.labels(DateField::Year);
        assert_eq!(years.len(), 31);
        assert_eq!(years.label(0), "2000");
        assert_eq!(picker.labels(DateField::Month).label(8), "09");
        assert_eq!(picker.labels(DateField::Day).len(), 31);
    }

    #[test]
    fn test_empty_year_range_is_config_error() {
        let date = DateConfig {
            start_year: 2030,
            end_year: 2000,
            ..Default::default()
        };
        assert!(matches!(
            DatePicker::new(&WheelConfig::default(), &date),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_field_navigation() {
        assert_eq!(DateField::Year.next(), DateField::Month);
        assert_eq!(DateField::Day.next(), DateField::Day);
        assert_eq!(DateField::Day.prev(), DateField::Month);
        assert_eq!(DateField::Year.prev(), DateField::Year);
    }
}
