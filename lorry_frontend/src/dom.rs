//! The calendar page seen through `web-sys`.
//!
//! Lines must be positioned containers, so the offsets of the lorry and the day cells are
//! relative to the line they sit on.

use log::warn;
use lorry_core::{
    day::CollectionDay,
    error::InitError,
    stage::{assign_lines, Span, Stage},
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub static LORRY_ID: &str = "bin-lorry";
pub static LINE_SELECTOR: &str = ".bin-week";
pub static DAY_SELECTOR: &str = ".bin-day";
pub static STOP_SELECTOR: &str = ".bin-stop";

#[derive(Debug)]
struct DomStop {
    element: HtmlElement,
    line: usize,
}

#[derive(Debug)]
pub struct DomStage {
    lorry: HtmlElement,
    lines: Vec<HtmlElement>,
    stops: Vec<DomStop>,
}

impl DomStage {
    /// Use the day cells of the first week for the given collection days.
    pub fn week(document: &Document, days: &[CollectionDay]) -> Result<Self, InitError> {
        let lorry = lorry(document)?;
        let week = select_all(document, LINE_SELECTOR)?
            .into_iter()
            .next()
            .ok_or(InitError::NoLines)?;
        let cells = select_all(&week, DAY_SELECTOR)?;
        let stops = days
            .iter()
            .map(|day| {
                cells
                    .get(day.index())
                    .map(|cell| DomStop {
                        element: cell.clone(),
                        line: 0,
                    })
                    .ok_or(InitError::MissingElement("bin day"))
            })
            .collect::<Result<Vec<DomStop>, InitError>>()?;
        Ok(Self {
            lorry,
            lines: vec![week],
            stops,
        })
    }

    /// Use every collection marker of the page, in document order.
    pub fn lines(document: &Document) -> Result<Self, InitError> {
        let lines = select_all(document, LINE_SELECTOR)?;
        let elements = select_all(document, STOP_SELECTOR)?;
        let found: Vec<Option<usize>> = elements
            .iter()
            .map(|element| line_of(&lines, element))
            .collect();
        let stops = elements
            .into_iter()
            .zip(assign_lines(lines.len(), &found)?)
            .map(|(element, line)| DomStop { element, line })
            .collect();
        let lorry = lorry(document)?;
        // a lorry placed outside of the calendar starts on the first line
        if line_of(&lines, &lorry).is_none() {
            if let Some(first) = lines.first() {
                log_failure(first.append_child(&lorry).map(|_| ()));
            }
        }
        Ok(Self {
            lorry,
            lines,
            stops,
        })
    }

    pub fn lorry(&self) -> &HtmlElement {
        &self.lorry
    }

    fn set_style(&self, property: &str, value: &str) {
        log_failure(self.lorry.style().set_property(property, value));
    }
}

impl Stage for DomStage {
    fn lorry_left(&self) -> f64 {
        f64::from(self.lorry.offset_left())
    }

    fn lorry_width(&self) -> f64 {
        let width = self.lorry.offset_width();
        if width > 0 {
            return f64::from(width);
        }
        // hidden elements have no layout, so measure it invisibly
        let style = self.lorry.style();
        let display = style.get_property_value("display").unwrap_or_default();
        let visibility = style.get_property_value("visibility").unwrap_or_default();
        self.set_style("visibility", "hidden");
        self.set_style("display", "block");
        let width = self.lorry.offset_width();
        self.set_style("display", &display);
        self.set_style("visibility", &visibility);
        f64::from(width)
    }

    fn lorry_line(&self) -> usize {
        line_of(&self.lines, &self.lorry).unwrap_or(self.lines.len())
    }

    fn stop_count(&self) -> usize {
        self.stops.len()
    }

    fn stop_span(&self, stop: usize) -> Span {
        let element = &self.stops[stop].element;
        Span::new(
            f64::from(element.offset_left()),
            f64::from(element.offset_width()),
        )
    }

    fn stop_line(&self, stop: usize) -> usize {
        self.stops[stop].line
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_width(&self, line: usize) -> f64 {
        f64::from(self.lines[line].client_width())
    }

    fn place_lorry(&mut self, left: f64) {
        self.set_lorry_left(left);
        self.set_style("display", "block");
    }

    fn set_lorry_left(&mut self, left: f64) {
        self.set_style("left", &format!("{left}px"));
    }

    fn move_lorry_to_line(&mut self, line: usize) {
        log_failure(self.lines[line].append_child(&self.lorry).map(|_| ()));
    }
}

fn lorry(document: &Document) -> Result<HtmlElement, InitError> {
    document
        .get_element_by_id(LORRY_ID)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or(InitError::MissingElement("#bin-lorry"))
}

/// Select all matching HTML elements below `parent`.
fn select_all<P>(parent: &P, selector: &'static str) -> Result<Vec<HtmlElement>, InitError>
where
    P: QuerySelectorAll,
{
    let node_list = parent
        .query_selector_all(selector)
        .map_err(|_| InitError::MissingElement(selector))?;
    Ok((0..node_list.length())
        .filter_map(|index| node_list.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Find the line containing `element`.
fn line_of(lines: &[HtmlElement], element: &HtmlElement) -> Option<usize> {
    lines.iter().position(|line| line.contains(Some(element.as_ref())))
}

fn log_failure(result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!("DOM update failed: {:?}", err);
    }
}

/// `querySelectorAll` exists on documents and elements alike.
trait QuerySelectorAll {
    fn query_selector_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue>;
}

impl QuerySelectorAll for Document {
    fn query_selector_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue> {
        Document::query_selector_all(self, selector)
    }
}

impl QuerySelectorAll for HtmlElement {
    fn query_selector_all(&self, selector: &str) -> Result<web_sys::NodeList, JsValue> {
        Element::query_selector_all(self, selector)
    }
}
