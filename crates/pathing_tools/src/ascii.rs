//! ASCII rendering of routes.
//!
//! Draws a tier map one character per cell, with the route laid over it:
//! tiers as digits, `*` on the path, `S` and `G` at its ends and, when
//! diagnostics are shown, `.` on cells the search expanded.

use std::collections::HashSet;
use std::fmt::Write as _;

use pathing_core::node::{GridCoord, VisitedNode};
use pathing_core::terrain::TierMap;

/// ASCII rendering configuration.
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Mark expanded cells that are not on the path.
    pub show_visited: bool,
    /// Append a legend below the map.
    pub show_legend: bool,
    /// Use colored output (ANSI).
    pub use_color: bool,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            show_visited: true,
            show_legend: true,
            use_color: false,
        }
    }
}

mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

/// What occupies one cell of the rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Start,
    Goal,
    Path,
    Visited,
    Tier(u32),
}

impl Glyph {
    fn symbol(self) -> char {
        match self {
            Self::Start => 'S',
            Self::Goal => 'G',
            Self::Path => '*',
            Self::Visited => '.',
            Self::Tier(t) => char::from_digit(t.min(9), 10).unwrap_or('#'),
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Start => colors::GREEN,
            Self::Goal => colors::RED,
            Self::Path => colors::YELLOW,
            Self::Visited | Self::Tier(_) => colors::GRAY,
        }
    }
}

/// Render `terrain` with `path` drawn over it.
///
/// The first row printed is `y = 0`. Path cells outside the terrain are
/// not drawn.
#[must_use]
pub fn render_route(
    terrain: &TierMap,
    path: &[GridCoord],
    visited: Option<&[VisitedNode]>,
    config: &AsciiConfig,
) -> String {
    let on_path: HashSet<GridCoord> = path.iter().copied().collect();
    let expanded: HashSet<GridCoord> = match visited {
        Some(nodes) if config.show_visited => nodes.iter().map(|v| v.cell).collect(),
        _ => HashSet::new(),
    };
    let start = path.first().copied();
    let goal = path.last().copied();

    let extent = terrain.extent() as i32;
    let mut out = String::with_capacity((extent as usize + 1) * extent as usize * 2);
    for y in 0..extent {
        for x in 0..extent {
            let cell = GridCoord::new(x, y);
            let glyph = if Some(cell) == start {
                Glyph::Start
            } else if Some(cell) == goal {
                Glyph::Goal
            } else if on_path.contains(&cell) {
                Glyph::Path
            } else if expanded.contains(&cell) {
                Glyph::Visited
            } else {
                Glyph::Tier(terrain.get(cell).unwrap_or(0))
            };

            if config.use_color {
                let _ = write!(out, "{}{}{}", glyph.color(), glyph.symbol(), colors::RESET);
            } else {
                out.push(glyph.symbol());
            }
        }
        out.push('\n');
    }

    if config.show_legend {
        if config.use_color {
            out.push_str(colors::BOLD);
        }
        out.push_str("S start  G goal  * path  . expanded  0-9 tier\n");
        if config.use_color {
            out.push_str(colors::RESET);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> AsciiConfig {
        AsciiConfig {
            show_visited: true,
            show_legend: false,
            use_color: false,
        }
    }

    #[test]
    fn test_render_terrain_only() {
        let terrain = TierMap::uniform(3, 0).with_tier(GridCoord::new(1, 0), 5);
        let out = render_route(&terrain, &[], None, &plain());
        assert_eq!(out, "050\n000\n000\n");
    }

    #[test]
    fn test_render_path_endpoints() {
        let terrain = TierMap::uniform(3, 2);
        let path = [
            GridCoord::new(0, 0),
            GridCoord::new(1, 1),
            GridCoord::new(2, 1),
        ];
        let out = render_route(&terrain, &path, None, &plain());
        assert_eq!(out, "S22\n2*G\n222\n");
    }

    #[test]
    fn test_render_visited_cells() {
        let terrain = TierMap::uniform(2, 1);
        let path = [GridCoord::new(0, 0), GridCoord::new(1, 0)];
        let visited = [VisitedNode {
            cell: GridCoord::new(0, 1),
            cost_from_start: pathing_core::math::Fixed::ONE,
            total_cost: pathing_core::math::Fixed::ONE,
            parent: Some(GridCoord::new(0, 0)),
        }];
        let out = render_route(&terrain, &path, Some(&visited), &plain());
        assert_eq!(out, "SG\n.1\n");

        let hidden = AsciiConfig {
            show_visited: false,
            ..plain()
        };
        assert_eq!(
            render_route(&terrain, &path, Some(&visited), &hidden),
            "SG\n11\n"
        );
    }

    #[test]
    fn test_legend_appended() {
        let out = render_route(&TierMap::uniform(1, 0), &[], None, &AsciiConfig::default());
        assert!(out.ends_with("tier\n"));
    }
}
