use crate::assets;
use crate::constants::{CANVAS_ID, LABEL_FONT_SCALE_DIVISOR};
use crate::core::presets::texture_map_names;
use crate::core::{TransitionConfig, TransitionController, PRESETS};
use crate::dom;
use crate::events;
use crate::frame;
use crate::text::{self, LabelBitmap};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("blob-showcase starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);

    let controller = Rc::new(RefCell::new(TransitionController::new(
        PRESETS.to_vec(),
        TransitionConfig::default(),
    )?));
    let clock = Instant::now();

    // Input is live before assets arrive; transitions only mutate state
    events::wire_wheel(controller.clone(), clock);
    events::wire_keydown(controller.clone(), clock);

    let map_names = texture_map_names(controller.borrow().presets());
    let loaded = assets::load_all(&map_names).await;

    if let Err(e) = assets::wait_for_fonts(&document).await {
        log::warn!("[assets] fonts not confirmed, labels may use a fallback face: {:?}", e);
    }
    let label_bitmaps: Vec<LabelBitmap> = controller
        .borrow()
        .presets()
        .iter()
        .map(|p| {
            text::rasterize_label(&document, p.name).unwrap_or_else(|e| {
                log::warn!("[assets] label '{}' not rasterized: {:?}", p.name, e);
                LabelBitmap::empty()
            })
        })
        .collect();
    let font_size_world = (dom::viewport_width() / LABEL_FONT_SCALE_DIVISOR) as f32;

    let gpu = frame::init_gpu(&canvas, &loaded, &label_bitmaps, font_size_world).await;

    let now = clock.elapsed().as_secs_f64();
    controller.borrow_mut().on_resources_loaded(now);
    log::info!(
        "[assets] ready: {} gradients, {} labels",
        loaded.color_maps.len(),
        label_bitmaps.len()
    );

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        controller,
        canvas,
        gpu,
        clock,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
