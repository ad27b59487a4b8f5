//! The calendar as far as the lorry is concerned.

use crate::error::InitError;

/// Horizontal extent of an element, measured from the left edge of its line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    pub left: f64,
    pub width: f64,
}

impl Span {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Get the left offset which centers something of `width` above this span.
    ///
    /// Half pixels round up.
    pub fn centered(&self, width: f64) -> f64 {
        self.left - ((width - self.width) / 2.0 + 0.5).floor()
    }
}

/// Check the line found for each stop of a page with `line_count` lines.
///
/// A page without stops has nothing to check, whatever its lines.
pub fn assign_lines(line_count: usize, stops: &[Option<usize>]) -> Result<Vec<usize>, InitError> {
    if stops.is_empty() {
        return Err(InitError::EmptyRoute);
    }
    if line_count == 0 {
        return Err(InitError::NoLines);
    }
    stops
        .iter()
        .enumerate()
        .map(|(stop, line)| match line {
            Some(line) if *line < line_count => Ok(*line),
            _ => Err(InitError::StopOutsideLines {
                stop,
                line: line.unwrap_or(line_count),
            }),
        })
        .collect()
}

/// The elements the lorry drives across.
///
/// Stops are numbered in visiting order and lines from top to bottom.
/// All positions are relative to the line the element sits on.
pub trait Stage {
    /// The current left offset of the lorry.
    fn lorry_left(&self) -> f64;
    /// The natural width of the lorry, even while it is hidden.
    fn lorry_width(&self) -> f64;
    /// The line currently holding the lorry.
    fn lorry_line(&self) -> usize;
    fn stop_count(&self) -> usize;
    fn stop_span(&self, stop: usize) -> Span;
    fn stop_line(&self, stop: usize) -> usize;
    fn line_count(&self) -> usize;
    fn line_width(&self, line: usize) -> f64;

    /// Put the lorry at `left` and make it visible.
    fn place_lorry(&mut self, left: f64);
    /// Move the lorry without changing its visibility.
    fn set_lorry_left(&mut self, left: f64);
    fn move_lorry_to_line(&mut self, line: usize);
}

#[cfg(test)]
mod tests {
    use crate::{
        error::InitError,
        stage::{assign_lines, Span},
    };

    #[test]
    fn test_centered() {
        assert_eq!(Span::new(100.0, 100.0).centered(40.0), 130.0);
        assert_eq!(Span::new(100.0, 20.0).centered(40.0), 90.0);
        assert_eq!(Span::new(0.0, 41.0).centered(40.0), 0.0);
        assert_eq!(Span::new(0.0, 39.0).centered(40.0), -1.0);
    }

    #[test]
    fn test_assign_lines() {
        assert_eq!(assign_lines(2, &[Some(0), Some(1), Some(1)]), Ok(vec![0, 1, 1]));
        assert_eq!(assign_lines(0, &[]), Err(InitError::EmptyRoute));
        assert_eq!(assign_lines(3, &[]), Err(InitError::EmptyRoute));
        // stops on a page without any line
        assert_eq!(assign_lines(0, &[None, None]), Err(InitError::NoLines));
        assert_eq!(
            assign_lines(2, &[Some(0), None]),
            Err(InitError::StopOutsideLines { stop: 1, line: 2 })
        );
        assert_eq!(
            assign_lines(2, &[Some(5)]),
            Err(InitError::StopOutsideLines { stop: 0, line: 5 })
        );
    }
}
