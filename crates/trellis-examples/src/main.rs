//! Feature-flag wiring for a camera bot, driven end to end.
//!
//! Declares the flag hierarchy such a bot registers at startup, then
//! plays through the toggle actions a chat session would trigger and
//! logs what each cascade does. Set `RUST_LOG=debug` to see per-flag
//! registration and cascade events.

use tracing_subscriber::EnvFilter;
use trellis::{FlagError, FlagRegistry};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), FlagError> {
    let mut flags = FlagRegistry::new();
    declare_hierarchy(&mut flags)?;
    log_state(&flags, "startup defaults");

    // An operator pauses the camera: every pipeline riding on it goes
    // dark in one call.
    let downstream = flags.descendants("camera")?;
    let names: Vec<&str> = downstream.iter().map(|id| id.as_str()).collect();
    tracing::info!(flags = ?names, "pausing the camera takes these down too");
    flags.set("camera", false)?;
    log_state(&flags, "camera paused");

    // Resuming the camera revives nothing downstream.
    flags.set("camera", true)?;
    log_state(&flags, "camera resumed");

    // The face pipeline comes back step by step.
    flags.set("face_detect", true)?;
    flags.set("face_recognize", true)?;
    log_state(&flags, "face pipeline restored");

    // A late feature declared enabled under a paused subsystem: the
    // sweep settles the contradiction.
    flags.set("darknet", false)?;
    flags.register("box_overlay", true, &["darknet"])?;
    flags.check_consistency();
    log_state(&flags, "after consistency sweep");

    Ok(())
}

fn declare_hierarchy(flags: &mut FlagRegistry) -> Result<(), FlagError> {
    // Hardware and transport roots.
    flags.register("camera", true, &[])?;
    flags.register("telegram", true, &[])?;

    // The face pipeline rides on the camera; labeling also needs the
    // chat transport to ask a human.
    flags.register("face_detect", true, &["camera"])?;
    flags.register("face_recognize", true, &["face_detect"])?;
    flags.register("face_labeling", true, &["face_recognize", "telegram"])?;

    // Object detection side.
    flags.register("darknet", true, &["camera"])?;

    // Dataset reporting is opt-in.
    flags.register("dataset_report", false, &["face_detect"])?;
    Ok(())
}

fn log_state(flags: &FlagRegistry, stage: &str) {
    let snapshot = flags.snapshot();
    let on: Vec<&str> = snapshot.enabled().map(|id| id.as_str()).collect();
    tracing::info!(stage, enabled = ?on, total = snapshot.flags.len(), "registry state");
}
