//! Paint surfaces and the team stamp
//!
//! A paintable surface owns a square paint target at a configured
//! resolution; each texel holds the channel of the team that last painted
//! it, or stays unpainted. The paint manager stamps a centered circular
//! brush at a UV. Stamping is idempotent per call - repeated stamps
//! accumulate visually but never corrupt state.

use ink_math::Vec2;
use ink_physics::ColliderId;
use ink_core::Team;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unpainted texel value
const CLEAR: f32 = -1.0;

/// A square paint target owned by one paintable surface
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaintSurface {
    resolution: u32,
    texels: Vec<f32>,
}

impl PaintSurface {
    /// Create a cleared surface at the given resolution
    pub fn new(resolution: u32) -> Self {
        let resolution = resolution.max(1);
        Self {
            resolution,
            texels: vec![CLEAR; (resolution * resolution) as usize],
        }
    }

    /// Edge length of the paint target in texels
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Team channel at a texel, None while unpainted
    pub fn channel_at(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.resolution || y >= self.resolution {
            return None;
        }
        let value = self.texels[(y * self.resolution + x) as usize];
        (value != CLEAR).then_some(value)
    }

    /// Team channel at a UV coordinate
    pub fn channel_at_uv(&self, uv: Vec2) -> Option<f32> {
        let x = (uv.x.clamp(0.0, 1.0) * (self.resolution - 1) as f32).round() as u32;
        let y = (uv.y.clamp(0.0, 1.0) * (self.resolution - 1) as f32).round() as u32;
        self.channel_at(x, y)
    }

    /// Number of painted texels
    pub fn painted_count(&self) -> usize {
        self.texels.iter().filter(|t| **t != CLEAR).count()
    }

    fn write(&mut self, x: u32, y: u32, channel: f32) {
        self.texels[(y * self.resolution + x) as usize] = channel;
    }
}

/// Paintable surfaces keyed by the collider they cover
#[derive(Default)]
pub struct PaintRegistry {
    surfaces: HashMap<ColliderId, PaintSurface>,
}

impl PaintRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a collider paintable
    pub fn register(&mut self, collider: ColliderId, surface: PaintSurface) {
        self.surfaces.insert(collider, surface);
    }

    /// Surface covering a collider
    pub fn get(&self, collider: ColliderId) -> Option<&PaintSurface> {
        self.surfaces.get(&collider)
    }

    /// Mutable surface covering a collider
    pub fn get_mut(&mut self, collider: ColliderId) -> Option<&mut PaintSurface> {
        self.surfaces.get_mut(&collider)
    }

    /// Drop the surface of a removed collider
    pub fn remove(&mut self, collider: ColliderId) -> Option<PaintSurface> {
        self.surfaces.remove(&collider)
    }
}

/// Stamps team-colored marks onto paint surfaces
///
/// Injected into the impact path at construction; never discovered through
/// a global registry.
pub struct PaintManager {
    /// Brush diameter in texels used when the caller passes none
    pub default_brush_size: f32,
}

impl PaintManager {
    /// Create a manager with a default brush diameter
    pub fn new(default_brush_size: f32) -> Self {
        Self { default_brush_size }
    }

    /// Stamp a team-colored circular brush centered at a UV
    ///
    /// A non-positive `brush_size` falls back to the default. Returns false
    /// when the team has no paint channel; nothing is written in that case.
    pub fn paint_at(
        &self,
        surface: &mut PaintSurface,
        uv: Vec2,
        team: Team,
        brush_size: f32,
    ) -> bool {
        let Some(channel) = team.paint_channel() else {
            return false;
        };
        let brush = if brush_size > 0.0 {
            brush_size
        } else {
            self.default_brush_size
        };
        if brush <= 0.0 {
            log::warn!("paint stamp requested with no usable brush size");
            return false;
        }

        let res = surface.resolution() as f32;
        let center_x = uv.x.clamp(0.0, 1.0) * res;
        let center_y = uv.y.clamp(0.0, 1.0) * res;
        let radius = brush * 0.5;

        let x0 = (center_x - radius).floor().max(0.0) as u32;
        let y0 = (center_y - radius).floor().max(0.0) as u32;
        let x1 = ((center_x + radius).ceil() as u32).min(surface.resolution());
        let y1 = ((center_y + radius).ceil() as u32).min(surface.resolution());

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - center_x;
                let dy = y as f32 + 0.5 - center_y;
                if dx * dx + dy * dy <= radius * radius {
                    surface.write(x, y, channel);
                }
            }
        }
        true
    }
}
