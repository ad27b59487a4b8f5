//! An in-memory calendar of week lines with seven equal day cells each.

use crate::{
    day::CollectionDay,
    stage::{Span, Stage},
};

static DAYS_PER_WEEK: f64 = 7.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    weeks: usize,
    day_width: f64,
    lorry_width: f64,
    stops: Vec<(usize, CollectionDay)>,
    lorry_left: f64,
    lorry_line: usize,
    lorry_visible: bool,
}

impl CalendarGrid {
    /// Build an empty calendar; the lorry starts hidden on the first week.
    pub fn new(weeks: usize, day_width: f64, lorry_width: f64) -> Self {
        Self {
            weeks,
            day_width,
            lorry_width,
            stops: vec![],
            lorry_left: 0.0,
            lorry_line: 0,
            lorry_visible: false,
        }
    }

    /// Build a single week visiting `days` in the given order.
    pub fn week(days: &[CollectionDay], day_width: f64, lorry_width: f64) -> Self {
        Self::weeks(1, days, day_width, lorry_width)
    }

    /// Build `weeks` lines which all have the same collection days.
    pub fn weeks(weeks: usize, days: &[CollectionDay], day_width: f64, lorry_width: f64) -> Self {
        let mut grid = Self::new(weeks, day_width, lorry_width);
        for week in 0..weeks {
            for day in days {
                grid.stops.push((week, *day));
            }
        }
        grid
    }

    /// Add a stop after all existing ones.
    pub fn with_stop(mut self, week: usize, day: CollectionDay) -> Self {
        self.stops.push((week, day));
        self
    }

    pub fn is_lorry_visible(&self) -> bool {
        self.lorry_visible
    }
}

impl Stage for CalendarGrid {
    fn lorry_left(&self) -> f64 {
        self.lorry_left
    }

    fn lorry_width(&self) -> f64 {
        self.lorry_width
    }

    fn lorry_line(&self) -> usize {
        self.lorry_line
    }

    fn stop_count(&self) -> usize {
        self.stops.len()
    }

    fn stop_span(&self, stop: usize) -> Span {
        let (_, day) = self.stops[stop];
        Span::new(day.index() as f64 * self.day_width, self.day_width)
    }

    fn stop_line(&self, stop: usize) -> usize {
        self.stops[stop].0
    }

    fn line_count(&self) -> usize {
        self.weeks
    }

    fn line_width(&self, _line: usize) -> f64 {
        DAYS_PER_WEEK * self.day_width
    }

    fn place_lorry(&mut self, left: f64) {
        self.lorry_left = left;
        self.lorry_visible = true;
    }

    fn set_lorry_left(&mut self, left: f64) {
        self.lorry_left = left;
    }

    fn move_lorry_to_line(&mut self, line: usize) {
        self.lorry_line = line;
    }
}
