//! The bin lorry on the calendar page.
//!
//! A page declaring `window.binCollectionDays` gets a single week; any other page gets a lorry
//! visiting every `.bin-stop` marker line by line.

mod dom;

use std::time::Duration;

use js_sys::{Array, Date, Reflect};
use lorry_core::{
    day::CollectionDay,
    delay::Delays,
    easing::Easing,
    error::InitError,
    sequencer::{Command, Mode, Sequencer},
    stage::Stage,
};
use wasm_bindgen::JsValue;
use web_sys::{window, Document};
use yew::platform::{spawn_local, time::sleep};

use crate::dom::DomStage;

static COLLECTION_DAYS_GLOBAL: &str = "binCollectionDays";
static DELAYS_ATTRIBUTE: &str = "data-delays";
static EASING_ATTRIBUTE: &str = "data-easing";
static FRAME: Duration = Duration::from_millis(13);

/// Read the collection days the page declared, if any.
///
/// Entries which are not numbers count as out of range.
fn declared_days() -> Result<Option<Vec<f64>>, InitError> {
    let window = window().ok_or(InitError::MissingElement("window"))?;
    let value = Reflect::get(&window, &JsValue::from_str(COLLECTION_DAYS_GLOBAL))
        .unwrap_or(JsValue::UNDEFINED);
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let days = Array::from(&value)
        .iter()
        .map(|day| day.as_f64().unwrap_or(f64::NAN))
        .collect();
    Ok(Some(days))
}

/// Read the delay overrides of the lorry element.
fn delays(stage: &DomStage) -> Delays {
    let Some(json) = stage.lorry().get_attribute(DELAYS_ATTRIBUTE) else {
        return Delays::default();
    };
    serde_json::from_str(&json).unwrap_or_else(|err| {
        log::warn!("ignoring {DELAYS_ATTRIBUTE}: {err}");
        Delays::default()
    })
}

/// Read the easing of the lorry element, swinging by default.
fn easing(stage: &DomStage) -> Easing {
    let Some(name) = stage.lorry().get_attribute(EASING_ATTRIBUTE) else {
        return Easing::default();
    };
    name.parse().unwrap_or_else(|err| {
        log::warn!("ignoring {EASING_ATTRIBUTE}: {err}");
        Easing::default()
    })
}

fn document() -> Result<Document, InitError> {
    window()
        .and_then(|window| window.document())
        .ok_or(InitError::MissingElement("document"))
}

fn init() -> Result<Sequencer<DomStage>, InitError> {
    let document = document()?;
    let (stage, mode) = match declared_days()? {
        Some(days) => {
            let days = CollectionDay::parse_all(&days)?;
            if days.is_empty() {
                return Err(InitError::EmptyRoute);
            }
            (DomStage::week(&document, &days)?, Mode::Week)
        }
        None => (DomStage::lines(&document)?, Mode::Lines),
    };
    let delays = delays(&stage);
    Sequencer::new(stage, mode, delays)
}

/// Slide the lorry to `to` frame by frame.
async fn animate(
    sequencer: &mut Sequencer<DomStage>,
    easing: Easing,
    to: f64,
    duration: Duration,
) {
    let from = sequencer.stage().lorry_left();
    let started = Date::now();
    loop {
        let elapsed = Duration::from_secs_f64((Date::now() - started).max(0.0) / 1000.0);
        let left = easing.position(from, to, elapsed, duration);
        sequencer.stage_mut().set_lorry_left(left);
        if elapsed >= duration {
            break;
        }
        sleep(FRAME).await;
    }
}

async fn drive(mut sequencer: Sequencer<DomStage>) {
    let easing = easing(sequencer.stage());
    let mut command = sequencer.start();
    loop {
        match command {
            Command::Wait(duration) => sleep(duration).await,
            Command::Drive { to, duration } => animate(&mut sequencer, easing, to, duration).await,
        }
        command = sequencer.advance();
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    match init() {
        Ok(sequencer) => spawn_local(drive(sequencer)),
        Err(err) if err.is_silent() => log::debug!("the lorry stays in the depot: {err}"),
        Err(err) => log::error!("cannot start the lorry: {err}"),
    }
}
