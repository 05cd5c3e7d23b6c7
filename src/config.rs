//! Startup configuration.
//!
//! Everything here is read once; nothing is mutable at runtime.  Missing
//! keys fall back to the compiled-in defaults, so an empty TOML file is a
//! valid config.
//!
//! ```toml
//! [map]
//! tile_size = 64.0
//! rows = ["#####", "#...#", "#####"]
//!
//! [caster]
//! pos = [96.0, 96.0]
//!
//! [tuning]
//! move_speed = 128.0
//!
//! [screen]
//! width = 1280
//! ray_count = 320
//! ```

use std::{fs, io, path::Path};

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::engine::ViewLayout;
use crate::game::Game;
use crate::sim::{Tuning, is_blocked};
use crate::world::{Caster, GridMap, MapError};

/// The built-in 10×10 level.
pub const DEFAULT_MAP: [&str; 10] = [
    "##########",
    "#........#",
    "#...####.#",
    "#......#.#",
    "#....#.#.#",
    "#....###.#",
    "#.#......#",
    "#.####.###",
    "#........#",
    "##########",
];

pub const DEFAULT_TILE_SIZE: f32 = 64.0;

/// Largest accepted `|cos|` of the angle between `dir` and `plane`.
const PLANE_SKEW_TOLERANCE: f32 = 1e-3;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("bad map: {0}")]
    Map(#[from] MapError),

    /// The top-down map already fills the window; no room for the 3-D view.
    #[error("screen width {screen_width} leaves no room beside a {map_width}px map")]
    ViewTooNarrow { screen_width: u32, map_width: u32 },

    #[error("screen height must be > 0")]
    ZeroHeight,

    #[error("ray count must be > 0")]
    ZeroRays,

    #[error("caster spawns inside a wall at ({x}, {y})")]
    SpawnInWall { x: f32, y: f32 },

    #[error("caster direction must be non-zero")]
    DegenerateDirection,

    #[error("caster pos/dir/plane must be finite")]
    NonFiniteCaster,

    /// `plane` is zero or not perpendicular to `dir`.
    #[error("camera plane {plane:?} is not perpendicular to direction {dir:?}")]
    SkewedPlane { dir: [f32; 2], plane: [f32; 2] },
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub map: MapConfig,
    pub caster: CasterConfig,
    pub tuning: Tuning,
    pub screen: ScreenConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub tile_size: f32,
    /// ASCII rows, `#` = wall, `.` = floor.
    pub rows: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CasterConfig {
    pub pos: [f32; 2],
    pub dir: [f32; 2],
    pub plane: [f32; 2],
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
    pub ray_count: usize,
    pub debug_rays: bool,
    pub shade_distance: f32,
    pub target_fps: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            rows: DEFAULT_MAP.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl Default for CasterConfig {
    fn default() -> Self {
        Self {
            pos: [DEFAULT_TILE_SIZE * 4.0, DEFAULT_TILE_SIZE * 4.0],
            dir: [-1.0, 0.0],
            plane: [0.0, 0.66],
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 640,
            ray_count: 160,
            debug_rays: true,
            shade_distance: 10.0,
            target_fps: 60,
        }
    }
}

impl Config {
    /// Read and parse a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let cfg = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Validate and assemble the map, caster and screen layout.
    pub fn build(&self) -> Result<Game, ConfigError> {
        let grid = GridMap::parse(&self.map.rows.join("\n"), self.map.tile_size)?;
        log::info!(
            "map {}x{} cells, tile {} units",
            grid.width(),
            grid.height(),
            grid.tile_size()
        );

        let caster = Caster::new(
            Vec2::from(self.caster.pos),
            Vec2::from(self.caster.dir),
            Vec2::from(self.caster.plane),
        );
        self.check_caster(&caster)?;
        if is_blocked(&grid, caster.pos, self.tuning.collision_radius) {
            return Err(ConfigError::SpawnInWall {
                x: caster.pos.x,
                y: caster.pos.y,
            });
        }

        let layout = self.layout(&grid)?;
        Ok(Game::new(grid, caster, self.tuning, layout))
    }

    fn check_caster(&self, caster: &Caster) -> Result<(), ConfigError> {
        if !(caster.pos.is_finite() && caster.dir.is_finite() && caster.plane.is_finite()) {
            return Err(ConfigError::NonFiniteCaster);
        }
        if caster.dir == Vec2::ZERO {
            return Err(ConfigError::DegenerateDirection);
        }
        let skew = caster.dir.dot(caster.plane).abs();
        if caster.plane == Vec2::ZERO
            || skew > PLANE_SKEW_TOLERANCE * caster.dir.length() * caster.plane.length()
        {
            return Err(ConfigError::SkewedPlane {
                dir: self.caster.dir,
                plane: self.caster.plane,
            });
        }
        Ok(())
    }

    fn layout(&self, grid: &GridMap) -> Result<ViewLayout, ConfigError> {
        let s = &self.screen;
        let map_width = grid.world_size().x.ceil() as u32;
        if s.width <= map_width {
            return Err(ConfigError::ViewTooNarrow {
                screen_width: s.width,
                map_width,
            });
        }
        if s.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if s.ray_count == 0 {
            return Err(ConfigError::ZeroRays);
        }
        let view_width = s.width - map_width;
        if s.ray_count > view_width as usize {
            log::warn!(
                "{} rays across a {view_width}px view: some strips will be empty",
                s.ray_count
            );
        }
        Ok(ViewLayout {
            screen_width: s.width,
            screen_height: s.height,
            view_left: map_width,
            ray_count: s.ray_count,
            debug_rays: s.debug_rays,
            shade_distance: s.shade_distance,
        })
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build() {
        let game = Config::default().build().unwrap();
        assert_eq!(game.grid().width(), 10);
        assert_eq!(game.grid().height(), 10);
        assert_eq!(game.caster().pos, Vec2::new(256.0, 256.0));
        assert_eq!(game.layout().view_left, 640);
        assert_eq!(game.layout().ray_count, 160);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [tuning]
            move_speed = 128.0

            [screen]
            ray_count = 320
            "#,
        )
        .unwrap();
        assert_eq!(cfg.tuning.move_speed, 128.0);
        assert_eq!(cfg.tuning.rotation_speed, Tuning::default().rotation_speed);
        assert_eq!(cfg.screen.ray_count, 320);
        assert_eq!(cfg.screen.width, 1280);
        assert_eq!(cfg.map, MapConfig::default());
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::NamedTempFile::new().expect("tempfile");
        std::fs::write(
            tmp.path(),
            r#"
            [map]
            tile_size = 32.0
            rows = ['#####', '#...#', '#...#', '#####']

            [caster]
            pos = [48.0, 48.0]
            dir = [1.0, 0.0]
            plane = [0.0, -0.66]

            [screen]
            width = 400
            height = 200
            ray_count = 40
            "#,
        )
        .unwrap();

        let game = Config::load(tmp.path()).unwrap().build().unwrap();
        assert_eq!(game.grid().width(), 5);
        assert_eq!(game.grid().tile_size(), 32.0);
        assert_eq!(game.layout().view_left, 160);
        assert_eq!(game.caster().dir, Vec2::X);
    }

    #[test]
    fn camera_plane_must_be_perpendicular_and_finite() {
        let build_with = |dir: [f32; 2], plane: [f32; 2]| {
            let mut cfg = Config::default();
            cfg.caster.dir = dir;
            cfg.caster.plane = plane;
            cfg.build()
        };

        // parallel plane would collapse a column's ray to zero
        assert!(matches!(
            build_with([-1.0, 0.0], [-1.0, 0.0]),
            Err(ConfigError::SkewedPlane { .. })
        ));
        assert!(matches!(
            build_with([-1.0, 0.0], [0.0, 0.0]),
            Err(ConfigError::SkewedPlane { .. })
        ));
        assert!(matches!(
            build_with([-1.0, 0.0], [0.3, 0.66]),
            Err(ConfigError::SkewedPlane { .. })
        ));
        assert!(matches!(
            build_with([f32::NAN, 0.0], [0.0, 0.66]),
            Err(ConfigError::NonFiniteCaster)
        ));
        assert!(matches!(
            build_with([-1.0, 0.0], [0.0, f32::INFINITY]),
            Err(ConfigError::NonFiniteCaster)
        ));

        let mut cfg = Config::default();
        cfg.caster.pos = [f32::NAN, 256.0];
        assert!(matches!(cfg.build(), Err(ConfigError::NonFiniteCaster)));

        // any perpendicular pair is fine, whatever the lengths
        let game = build_with([0.0, 2.0], [-1.32, 0.0]).unwrap();
        for hit in game.frame().iter().filter_map(|c| match c {
            crate::renderer::DrawCall::Line(l) => Some(l.to),
            _ => None,
        }) {
            assert!(hit.is_finite());
        }
    }

    #[test]
    fn invalid_setups_are_rejected() {
        let mut cfg = Config::default();
        cfg.map.rows[0] = "#.########".into();
        assert!(matches!(
            cfg.build(),
            Err(ConfigError::Map(MapError::OpenBorder { x: 1, y: 0 }))
        ));

        let mut cfg = Config::default();
        cfg.caster.pos = [32.0, 32.0];
        assert!(matches!(cfg.build(), Err(ConfigError::SpawnInWall { .. })));

        let mut cfg = Config::default();
        cfg.screen.width = 640;
        assert!(matches!(cfg.build(), Err(ConfigError::ViewTooNarrow { .. })));

        let mut cfg = Config::default();
        cfg.screen.ray_count = 0;
        assert!(matches!(cfg.build(), Err(ConfigError::ZeroRays)));

        let mut cfg = Config::default();
        cfg.screen.height = 0;
        assert!(matches!(cfg.build(), Err(ConfigError::ZeroHeight)));

        let mut cfg = Config::default();
        cfg.caster.dir = [0.0, 0.0];
        assert!(matches!(cfg.build(), Err(ConfigError::DegenerateDirection)));

        assert!(matches!(
            Config::load("/definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[screen]\nwidth = \"wide\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
