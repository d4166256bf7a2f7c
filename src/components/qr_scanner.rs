//! Camera-backed QR scanner component.
//!
//! Owns the `MediaStream` and a fixed-rate decode loop over the central
//! region of the video frame. Decoding itself is delegated to `rqrr`; this
//! component only feeds it frames and reports results through the two
//! callbacks. The camera is an exclusive resource and is released on every
//! path back to idle: successful decode, toggle-off, and unmount.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

use crate::scan::{self, ScanError, ScannerState, DECODE_INTERVAL_MS, DETECTION_REGION_PX};

#[component]
pub fn QrScanner(
    /// Invoked once with the decoded text; the scanner stops itself first.
    on_scan_success: Callback<String>,
    /// Invoked with a diagnostic when a decode attempt or the camera fails.
    on_scan_error: Callback<String>,
) -> impl IntoView {
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    let state = StoredValue::new(ScannerState::default());
    let stream = StoredValue::new_local(None::<MediaStream>);
    let interval = StoredValue::new_local(None::<Interval>);
    let started = StoredValue::new(false);

    let stop_scanning = move || {
        if let Some(handle) = interval.try_update_value(|i| i.take()).flatten() {
            handle.cancel();
        }
        if let Some(media) = stream.try_update_value(|s| s.take()).flatten() {
            stop_tracks(&media);
            log::debug!("camera released");
        }
        if let Some(video) = video_ref.get_untracked() {
            video.set_src_object(None);
        }
        let _ = state.try_update_value(|s| s.stop());
    };

    Effect::new(move || {
        let Some(video) = video_ref.get() else {
            return;
        };
        if started.get_value() {
            return;
        }
        started.set_value(true);

        wasm_bindgen_futures::spawn_local(async move {
            match acquire_camera(&video).await {
                Ok(media) => {
                    // The component may have been torn down while the
                    // permission prompt was open.
                    if stream.try_set_value(Some(media.clone())).is_some() {
                        stop_tracks(&media);
                        return;
                    }
                    let _ = state.try_update_value(|s| s.start());
                    log::debug!("camera acquired, decoding every {DECODE_INTERVAL_MS} ms");

                    let tick = Interval::new(DECODE_INTERVAL_MS, move || {
                        if !state.try_with_value(|s| s.is_scanning()).unwrap_or(false) {
                            return;
                        }
                        let (Some(video), Some(canvas)) =
                            (video_ref.get_untracked(), canvas_ref.get_untracked())
                        else {
                            return;
                        };
                        match grab_and_decode(&video, &canvas) {
                            // No code in the frame: the expected majority case.
                            None => {}
                            Some(Ok(text)) => {
                                stop_scanning();
                                on_scan_success.run(text);
                            }
                            Some(Err(err)) => {
                                log::debug!("decode attempt failed: {err}");
                                on_scan_error.run(err.to_string());
                            }
                        }
                    });
                    if interval.try_set_value(Some(tick)).is_some() {
                        stop_scanning();
                    }
                }
                Err(err) => {
                    log::warn!("camera unavailable: {err}");
                    on_scan_error.run(err);
                }
            }
        });
    });

    on_cleanup(stop_scanning);

    view! {
        <div class="mx-auto max-w-sm">
            <div class="relative overflow-hidden rounded-lg bg-black">
                <video
                    node_ref=video_ref
                    autoplay=true
                    muted=true
                    playsinline=true
                    class="w-full"
                ></video>
                <div class="absolute inset-0 flex items-center justify-center pointer-events-none">
                    <div class="w-48 h-48 border-2 border-teal-400 rounded-lg"></div>
                </div>
            </div>
            <canvas node_ref=canvas_ref class="hidden"></canvas>
            <p class="mt-2 text-center text-sm text-gray-500">
                "Point the camera at a QR code"
            </p>
        </div>
    }
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

async fn acquire_camera(video: &HtmlVideoElement) -> Result<MediaStream, String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| describe_js_error(&e))?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| describe_js_error(&e))?;
    let media: MediaStream = JsFuture::from(promise)
        .await
        .map_err(|e| describe_js_error(&e))?
        .dyn_into()
        .map_err(|_| "unexpected getUserMedia result".to_string())?;

    video.set_src_object(Some(&media));
    let _ = video.play();
    Ok(media)
}

/// Draw the central square of the current frame onto the fixed-size
/// detection canvas and hand it to the decoder.
fn grab_and_decode(
    video: &HtmlVideoElement,
    canvas: &HtmlCanvasElement,
) -> Option<Result<String, ScanError>> {
    // HAVE_CURRENT_DATA and above guarantee a drawable frame.
    if video.ready_state() < 2 {
        return None;
    }
    let video_width = video.video_width() as f64;
    let video_height = video.video_height() as f64;
    if video_width == 0.0 || video_height == 0.0 {
        return None;
    }

    let side = video_width.min(video_height);
    let sx = (video_width - side) / 2.0;
    let sy = (video_height - side) / 2.0;
    let region = DETECTION_REGION_PX as f64;

    canvas.set_width(DETECTION_REGION_PX);
    canvas.set_height(DETECTION_REGION_PX);
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;
    ctx.draw_image_with_html_video_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        video, sx, sy, side, side, 0.0, 0.0, region, region,
    )
    .ok()?;

    let image = ctx.get_image_data(0.0, 0.0, region, region).ok()?;
    let luma = scan::luma_from_rgba(&image.data());
    scan::decode_frame(
        DETECTION_REGION_PX as usize,
        DETECTION_REGION_PX as usize,
        &luma,
    )
}

fn describe_js_error(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{err:?}"))
}
