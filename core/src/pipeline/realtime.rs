//! Async frame driver for live sessions.

use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use super::session::VisualizerSession;
use crate::render::Surface;

/// Tick `session` at `fps` until playback stops and no frame is pending, or
/// until `max_frames` frames have been drawn. Returns the number of frames
/// drawn. Late ticks are skipped rather than bunched up.
///
/// Dropping the returned future stops driving; the session is left as is.
pub async fn drive<S: Surface>(
    session: &mut VisualizerSession<S>,
    fps: u32,
    max_frames: Option<usize>,
) -> usize {
    let fps = fps.max(1);
    let dt = 1.0 / fps as f64;
    let mut ticker = interval(Duration::from_secs_f64(dt));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut drawn = 0usize;
    loop {
        if max_frames.is_some_and(|max| drawn >= max) {
            break;
        }
        if !session.is_playing() && !session.render_loop().is_running() {
            break;
        }

        ticker.tick().await;
        if session.advance(dt) {
            drawn += 1;
        }
    }

    log::debug!("Realtime driver stopped after {} frames", drawn);
    drawn
}
