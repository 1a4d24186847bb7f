//! Drop Catch entry point
//!
//! The browser build is driven from JavaScript through `drop_catch::web`.
//! Natively this runs one headless round with a scripted player and prints
//! the summary, which is handy for smoke-testing tuning files.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use drop_catch::Tuning;
    use drop_catch::sim::{GameEvent, ObjectKind, Session};

    env_logger::init();
    log::info!("Drop Catch (native autoplay) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    log::info!("Seed: {}", seed);

    let mut session = Session::new(Tuning::load(), seed);
    session.start();

    // The scripted player taps clean drops once they're a third of the way down
    const REACTION_Y: f32 = 35.0;

    while session.drivers_armed() {
        session.step();

        let targets: Vec<u32> = session
            .state()
            .objects
            .iter()
            .filter(|o| o.kind != ObjectKind::Hazard && !o.is_removing() && o.pos.y >= REACTION_Y)
            .map(|o| o.id)
            .collect();
        for id in targets {
            session.on_tap(id);
        }

        for event in session.drain_events() {
            match event {
                GameEvent::TimeTick { remaining } => log::debug!("{}s left", remaining),
                GameEvent::ObjectMissed { id, kind } => log::debug!("Missed {:?} #{}", kind, id),
                _ => {}
            }
        }
    }

    match session.summary() {
        Some(summary) => match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        },
        None => log::warn!("Round ended without a summary"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is drop_catch::web::wasm_start, this is just to satisfy the compiler
}
