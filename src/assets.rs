//! Fetching and decoding of the gradients and the lighting environment.
//!
//! Every request is started before any is awaited so downloads overlap.
//! Failures never abort startup: a broken gradient becomes plain white and a
//! broken environment becomes a neutral studio gradient.

use crate::constants::{ENVIRONMENT_URL, GRADIENT_DIR};
use crate::core::texture::{
    decode_color_map, decode_environment, fallback_color_map, neutral_environment, ColorMap,
    EnvironmentMap,
};
use anyhow::{anyhow, bail};
use js_sys::{Promise, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct LoadedAssets {
    pub color_maps: Vec<ColorMap>,
    pub environment: EnvironmentMap,
}

pub fn gradient_url(name: &str) -> String {
    format!("{}/{}.png", GRADIENT_DIR, name)
}

fn start_fetch(url: &str) -> anyhow::Result<Promise> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    Ok(window.fetch_with_str(url))
}

async fn finish_fetch(url: &str, request: Promise) -> anyhow::Result<Vec<u8>> {
    let resp = JsFuture::from(request)
        .await
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?
        .dyn_into::<web::Response>()
        .map_err(|e| anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !resp.ok() {
        bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let body = resp
        .array_buffer()
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?;
    let buf = JsFuture::from(body)
        .await
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?;
    Ok(Uint8Array::new(&buf).to_vec())
}

async fn fetch_pending(url: &str, request: anyhow::Result<Promise>) -> anyhow::Result<Vec<u8>> {
    finish_fetch(url, request?).await
}

pub async fn load_all(map_names: &[&'static str]) -> LoadedAssets {
    let gradient_requests: Vec<(String, anyhow::Result<Promise>)> = map_names
        .iter()
        .map(|name| {
            let url = gradient_url(name);
            let req = start_fetch(&url);
            (url, req)
        })
        .collect();
    let env_request = start_fetch(ENVIRONMENT_URL);

    let mut color_maps = Vec::with_capacity(map_names.len());
    for (name, (url, req)) in map_names.iter().zip(gradient_requests) {
        let decoded = fetch_pending(&url, req)
            .await
            .and_then(|bytes| Ok(decode_color_map(name, &bytes)?));
        match decoded {
            Ok(map) => {
                log::info!("[assets] {} {}x{}", url, map.width, map.height);
                color_maps.push(map);
            }
            Err(e) => {
                log::warn!("[assets] {} unavailable, using white: {:?}", url, e);
                color_maps.push(fallback_color_map(name));
            }
        }
    }

    let environment = match fetch_pending(ENVIRONMENT_URL, env_request)
        .await
        .and_then(|bytes| Ok(decode_environment(&bytes)?))
    {
        Ok(env) => {
            log::info!(
                "[assets] environment {}x{} ({} mips)",
                env.width(),
                env.height(),
                env.mip_count()
            );
            env
        }
        Err(e) => {
            log::warn!("[assets] environment unavailable, using neutral: {:?}", e);
            neutral_environment()
        }
    };

    LoadedAssets {
        color_maps,
        environment,
    }
}

/// Resolve once the page's pending font loads have settled.
pub async fn wait_for_fonts(document: &web::Document) -> anyhow::Result<()> {
    let ready = document
        .fonts()
        .ready()
        .map_err(|e| anyhow!("document.fonts.ready: {:?}", e))?;
    JsFuture::from(ready)
        .await
        .map_err(|e| anyhow!("document.fonts.ready: {:?}", e))?;
    Ok(())
}
