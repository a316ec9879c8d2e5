/// UFO homing: accelerating pursuit of the player, a one-shot warning phase
/// and the terminal abduction.

use tracing::{debug, info};

use crate::assets::SpriteBank;
use crate::config;
use crate::entities::Entity;
use crate::geometry::{Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UfoSignal {
    /// Nothing noteworthy this frame.
    Quiet,
    /// Counter crossed the threshold; alert sprite is now showing.
    Warning,
    /// Caught the player.
    Abducted,
}

/// One frame of UFO behaviour after the shared enemy update.
///
/// The step is `speed / counter` along the line to the player's top-left
/// corner, capped at the distance left. `player` is `None` once the player
/// has been destroyed; the UFO then holds its position while the counter
/// keeps decaying.
pub fn update(ufo: &mut Entity, player: Option<&Rect>, bank: &SpriteBank) -> UfoSignal {
    let speed = ufo.scroll_speed;
    let struck = ufo.is_struck();
    let Some(pursuit) = ufo.pursuit.as_mut() else {
        return UfoSignal::Quiet;
    };
    if pursuit.abducted {
        return UfoSignal::Quiet;
    }

    if let Some(target) = player {
        if ufo.rect.intersects(target) {
            pursuit.abducted = true;
            let visual = bank.ufo_abduction;
            ufo.visual = visual;
            ufo.rect = Rect::new(ufo.rect.x, ufo.rect.y, visual.width, visual.height);
            info!("ufo abducted the player");
            return UfoSignal::Abducted;
        }
    }
    if struck {
        return UfoSignal::Quiet;
    }

    let offset = player.map_or(Vec2::ZERO, |target| target.top_left() - ufo.rect.top_left());
    pursuit.counter = (pursuit.counter - config::UFO_COUNTER_DECAY).max(config::UFO_COUNTER_FLOOR);
    // Never overshoot: the last step lands on the player.
    let reach = (speed / pursuit.counter).min(offset.length());
    let step = offset.normalize_or_zero() * reach;
    ufo.rect = ufo.rect.translated(step.x, step.y);

    if pursuit.counter < config::UFO_WARNING_THRESHOLD && !pursuit.warning_triggered {
        pursuit.warning_triggered = true;
        let visual = bank.ufo_alert;
        ufo.visual = visual;
        ufo.rect = Rect::new(ufo.rect.x, ufo.rect.y, visual.width, visual.height);
        debug!(counter = pursuit.counter, "ufo warning phase");
        return UfoSignal::Warning;
    }
    UfoSignal::Quiet
}

/// True while the outer loop should show the warning banner.
pub fn banner_visible(ufo: &Entity) -> bool {
    let (low, high) = config::UFO_BANNER_WINDOW;
    ufo.pursuit
        .as_ref()
        .map_or(false, |p| !p.abducted && p.counter > low && p.counter < high)
}
