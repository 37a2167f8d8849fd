#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod font_loader;
mod web_controls;

use rhythm_core::{parse_numbered_param, ClassList, RouteId};

/// Classes applied to the canvas element hosting the app.
pub fn canvas_classes(fullscreen: bool) -> String {
    ClassList::new()
        .add("block fixed bg-[#101010] touch-none")
        .add_if(fullscreen, "inset-0 w-screen h-screen")
        .add_if(!fullscreen, "relative w-full h-full")
        .merge()
}

/// Song id from a `?song=` query value. Unparseable ids fall back to free
/// play.
pub fn song_from_query(value: Option<&str>) -> Option<RouteId> {
    let value = value?;
    match parse_numbered_param(value) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("ignoring song parameter: {}", e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn query_param(window: &web_sys::Window, name: &str) -> Option<String> {
    let search = window.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Ignore the error if a logger is already installed.
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    let web_options = eframe::WebOptions::default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let width = window.inner_width()?.as_f64().unwrap_or_default();
    let height = window.inner_height()?.as_f64().unwrap_or_default();
    log::info!("window {}x{}", width, height);
    let song = song_from_query(query_param(&window, "song").as_deref());

    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id("keys-canvas")
        .ok_or_else(|| JsValue::from_str("no canvas element with id 'keys-canvas'"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;
    // Phones get the whole viewport, wide screens keep the page layout.
    canvas.set_class_name(&canvas_classes(width <= 1000.0));

    wasm_bindgen_futures::spawn_local(async move {
        let result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| Ok(Box::new(app::KeysWebApp::new(cc, song)))),
            )
            .await;
        if let Err(e) = result {
            log::error!("failed to start eframe: {:?}", e);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_canvas_classes() {
        assert_eq!(
            canvas_classes(true),
            "block fixed bg-[#101010] touch-none inset-0 w-screen h-screen"
        );
    }

    #[test]
    fn embedded_canvas_replaces_position() {
        assert_eq!(
            canvas_classes(false),
            "block bg-[#101010] touch-none relative w-full h-full"
        );
    }

    #[test]
    fn song_query_values() {
        assert_eq!(song_from_query(None), None);
        assert_eq!(song_from_query(Some("new")), Some(RouteId::New));
        assert_eq!(song_from_query(Some("17")), Some(RouteId::Id(17)));
        assert_eq!(song_from_query(Some("abc")), None);
    }
}
