use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, Window, WindowOptions};

use gridcast::{
    Config,
    renderer::{RendererExt, software::Software},
    sim::{FrameClock, HeldKeys},
};

/// Top-down map plus ray-cast 3-D view of a tile grid.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// TOML config; built-in map and defaults when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override `screen.ray_count`
    #[arg(long, value_name = "N")]
    rays: Option<usize>,

    /// Override `screen.target_fps`
    #[arg(long, value_name = "N")]
    fps: Option<usize>,

    /// Hide the ray overlay on the map
    #[arg(long)]
    no_debug_rays: bool,
}

fn held_keys(win: &Window) -> HeldKeys {
    let mut keys = HeldKeys::empty();
    let down = |a, b| win.is_key_down(a) || win.is_key_down(b);
    keys.set(HeldKeys::FORWARD, down(Key::W, Key::Up));
    keys.set(HeldKeys::BACKWARD, down(Key::S, Key::Down));
    keys.set(HeldKeys::ROTATE_LEFT, down(Key::A, Key::Left));
    keys.set(HeldKeys::ROTATE_RIGHT, down(Key::D, Key::Right));
    keys
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let mut cfg = match &opts.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(n) = opts.rays {
        cfg.screen.ray_count = n;
    }
    if let Some(n) = opts.fps {
        cfg.screen.target_fps = n;
    }
    if opts.no_debug_rays {
        cfg.screen.debug_rays = false;
    }

    let mut game = cfg.build().context("invalid configuration")?;
    let (w, h) = (cfg.screen.width as usize, cfg.screen.height as usize);

    let mut renderer = Software::default();
    let mut win = Window::new("gridcast", w, h, WindowOptions::default())
        .context("creating window")?;
    win.set_target_fps(cfg.screen.target_fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    let mut clock = FrameClock::default();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        let dt = clock.tick();
        game.tick(dt, held_keys(&win));

        renderer.draw_frame(w, h, game.frame(), |fb, fw, fh| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            win.update_with_buffer(fb, fw, fh)
        })?;

        if last_print.elapsed() >= Duration::from_secs(3) && acc_frames > 0 {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            log::info!("avg frame: {avg_ms:.2} ms  ({:.1} FPS)", 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
