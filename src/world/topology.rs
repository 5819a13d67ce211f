//! Topology construction: neighbor wiring for both map geometries
//!
//! Rectangular worlds are brick-parity tori: cells sit at (x, y) with
//! x + y even, x wraps, and the two rows nearest each pole omit their
//! poleward link. Icosahedral worlds wrap a triangular net of five
//! helically offset strips around a sphere; the construction below
//! yields 40*scale^2 + 2 regions of which exactly twelve have five
//! neighbors (the icosahedron vertices) and the rest six.

use ahash::AHashMap;

use crate::catalog::TerrainId;
use crate::core::types::{Direction, LevelId, LevelKind, RegionId};
use crate::world::graph::RegionGraph;
use crate::world::region::Region;

/// Which wiring a level uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryMode {
    Rectangular { width: i32, height: i32 },
    Icosahedral { scale: i32 },
}

impl GeometryMode {
    pub fn dimensions(&self) -> (i32, i32) {
        match *self {
            GeometryMode::Rectangular { width, height } => (width, height),
            GeometryMode::Icosahedral { scale } => (10 * scale, 18 * scale),
        }
    }
}

/// Create and wire one rectangular-toroidal level filled with
/// `fill_terrain`. Returns the new level id.
pub fn build_rectangular_level(
    graph: &mut RegionGraph,
    name: &str,
    kind: LevelKind,
    width: i32,
    height: i32,
    fill_terrain: TerrainId,
) -> LevelId {
    let level = graph.add_level(name.to_string(), kind, width, height);

    for y in 0..height {
        for x in 0..width {
            if (x + y) % 2 != 0 {
                continue;
            }
            graph.add_region(Region::new(RegionId(0), x, y, level, fill_terrain));
        }
    }

    let ids = graph.level_ids(level);
    for id in ids {
        let Some(region) = graph.get(id) else { continue };
        let (x, y) = (region.x, region.y);
        let mut slots = [None; 6];
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let target = match dir {
                // N/S never wrap; the two rows nearest each pole omit them
                Direction::North => {
                    if y > 1 {
                        graph.at(level, x, y - 2)
                    } else {
                        None
                    }
                }
                Direction::South => {
                    if y < height - 2 {
                        graph.at(level, x, y + 2)
                    } else {
                        None
                    }
                }
                // diagonals wrap both axes
                _ => graph
                    .level(level)
                    .and_then(|array| array.at_wrapped(x + dx, y + dy)),
            };
            slots[dir.index()] = target;
        }
        if let Some(region) = graph.get_mut(id) {
            region.neighbors = slots;
        }
    }

    level
}

/// A cell of the icosahedral net, identified by its canonical position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum IcoCell {
    NorthPole,
    SouthPole,
    /// Strip k (0..5), column i within the strip (0..2s), row j (1..=4s)
    Strip { k: i32, i: i32, j: i32 },
}

/// Seam arithmetic for one icosahedral net of a given scale
///
/// Strip coordinates (k, i, j) map to the grid as x = 2s*k + i,
/// y = 2s*(4 - k) + i + 2j. Row j = 0 of each strip is identified with
/// column i = 0 of the next strip (the canonical form), the five
/// (k, 0, 0) positions all denote the north pole, and the five virtual
/// (k, 0, 6s) positions all denote the south pole.
struct IcoNet {
    s: i32,
}

impl IcoNet {
    fn new(s: i32) -> Self {
        Self { s }
    }

    fn canon(&self, k: i32, i: i32, j: i32) -> Option<IcoCell> {
        let (s2, s4) = (2 * self.s, 4 * self.s);
        if j < 0 || j > s4 || i < 0 || i >= s2 {
            return None;
        }
        if j == 0 {
            if i == 0 {
                return Some(IcoCell::NorthPole);
            }
            return Some(IcoCell::Strip {
                k: (k + 1).rem_euclid(5),
                i: 0,
                j: i,
            });
        }
        Some(IcoCell::Strip {
            k: k.rem_euclid(5),
            i,
            j,
        })
    }

    /// One lattice step from a strip position, stitching across the
    /// wedge boundary when the move leaves the strip sideways.
    fn step(&self, k: i32, i: i32, j: i32, dir: Direction) -> (i32, i32, i32) {
        let s2 = 2 * self.s;
        let (i2, j2) = match dir {
            Direction::North => (i, j - 1),
            Direction::Northeast => (i + 1, j - 1),
            Direction::Southeast => (i + 1, j),
            Direction::South => (i, j + 1),
            Direction::Southwest => (i - 1, j + 1),
            Direction::Northwest => (i - 1, j),
        };
        if i2 == s2 {
            ((k + 1).rem_euclid(5), 0, j2 + s2)
        } else if i2 == -1 {
            ((k + 4).rem_euclid(5), s2 - 1, j2 - s2)
        } else {
            (k, i2, j2)
        }
    }

    /// Every strip position (real or virtual) a cell occupies; moves are
    /// computed from all of them so seam cells see both sides.
    fn copies(&self, cell: IcoCell) -> Vec<(i32, i32, i32)> {
        let (s2, s4, s6) = (2 * self.s, 4 * self.s, 6 * self.s);
        match cell {
            IcoCell::NorthPole => (0..5).map(|k| (k, 0, 0)).collect(),
            IcoCell::SouthPole => (0..5).map(|k| (k, 0, s6)).collect(),
            IcoCell::Strip { k, i, j } => {
                let mut out = vec![(k, i, j)];
                if i == 0 && j > 0 && j < s2 {
                    // the same cell seen as row 0 of the previous strip
                    out.push(((k + 4).rem_euclid(5), j, 0));
                }
                if j == s4 && i > 0 && i < s2 {
                    // bottom edge seen as the virtual overhang of row 0
                    out.push((k, 0, s4 + i));
                }
                out
            }
        }
    }

    /// Map a raw move result back to the cell it denotes, or None when
    /// it is a virtual position with no cell of its own.
    fn resolve(&self, k: i32, i: i32, j: i32) -> Option<IcoCell> {
        let (s4, s6) = (4 * self.s, 6 * self.s);
        if i == 0 && j == s6 {
            return Some(IcoCell::SouthPole);
        }
        if (0..=s4).contains(&j) {
            return self.canon(k, i, j);
        }
        if i == 0 && j > s4 && j < s6 {
            // virtual overhang position of a bottom-edge cell
            return Some(IcoCell::Strip {
                k: k.rem_euclid(5),
                i: j - s4,
                j: s4,
            });
        }
        None
    }

    /// Grid coordinates of a cell. The south pole parks in an array slot
    /// no canonical cell reaches.
    fn cell_xy(&self, cell: IcoCell) -> (i32, i32) {
        let s = self.s;
        match cell {
            IcoCell::NorthPole => (0, 8 * s),
            IcoCell::SouthPole => (8 * s, 12 * s),
            IcoCell::Strip { k, i, j } => (2 * s * k + i, 2 * s * (4 - k) + i + 2 * j),
        }
    }
}

/// Create and wire one icosahedral level filled with `fill_terrain`
pub fn build_icosahedral_level(
    graph: &mut RegionGraph,
    name: &str,
    kind: LevelKind,
    scale: i32,
    fill_terrain: TerrainId,
) -> LevelId {
    let (s2, s4) = (2 * scale, 4 * scale);
    let (width, height) = GeometryMode::Icosahedral { scale }.dimensions();
    let level = graph.add_level(name.to_string(), kind, width, height);
    let net = IcoNet::new(scale);

    // Deterministic creation order: poles first, then strip cells.
    let mut cells = vec![IcoCell::NorthPole, IcoCell::SouthPole];
    for k in 0..5 {
        for i in 0..s2 {
            for j in 1..=s4 {
                cells.push(IcoCell::Strip { k, i, j });
            }
        }
    }

    let mut ids: AHashMap<IcoCell, RegionId> = AHashMap::with_capacity(cells.len());
    for &cell in &cells {
        let (x, y) = net.cell_xy(cell);
        let id = graph.add_region(Region::new(RegionId(0), x, y, level, fill_terrain));
        ids.insert(cell, id);
    }

    for &cell in &cells {
        let mut found: Vec<(IcoCell, usize)> = Vec::with_capacity(6);
        for (k, i, j) in net.copies(cell) {
            for dir in Direction::ALL {
                let (k2, i2, j2) = net.step(k, i, j, dir);
                let Some(target) = net.resolve(k2, i2, j2) else {
                    continue;
                };
                if target == cell {
                    // landed on our own alias copy
                    continue;
                }
                if !found.iter().any(|(c, _)| *c == target) {
                    found.push((target, dir.index()));
                }
            }
        }

        // Keep each neighbor in its move's compass slot when free,
        // otherwise the next free slot clockwise.
        let mut slots = [None; 6];
        for (target, dir_index) in found {
            let mut slot = dir_index;
            while slots[slot].is_some() {
                slot = (slot + 1) % 6;
            }
            slots[slot] = ids.get(&target).copied();
        }
        if let Some(id) = ids.get(&cell) {
            if let Some(region) = graph.get_mut(*id) {
                region.neighbors = slots;
            }
        }
    }

    level
}

/// Build a level with either wiring
pub fn build_level(
    graph: &mut RegionGraph,
    name: &str,
    kind: LevelKind,
    mode: GeometryMode,
    fill_terrain: TerrainId,
) -> LevelId {
    match mode {
        GeometryMode::Rectangular { width, height } => {
            build_rectangular_level(graph, name, kind, width, height, fill_terrain)
        }
        GeometryMode::Icosahedral { scale } => {
            build_icosahedral_level(graph, name, kind, scale, fill_terrain)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ocean() -> TerrainId {
        Catalog::standard().terrains.find_abbr("OCEA").unwrap()
    }

    fn assert_symmetric(graph: &RegionGraph) {
        for region in &graph.regions {
            for dir in Direction::ALL {
                if let Some(target) = region.neighbor(dir) {
                    let other = graph.get(target).unwrap();
                    assert!(
                        Direction::ALL
                            .iter()
                            .any(|d| other.neighbor(*d) == Some(region.id)),
                        "({}, {}) -> {:?} has no link back",
                        region.x,
                        region.y,
                        dir
                    );
                }
            }
        }
    }

    #[test]
    fn test_rectangular_parity_cell_count() {
        let mut graph = RegionGraph::new();
        build_rectangular_level(&mut graph, "surface", LevelKind::Surface, 8, 8, ocean());
        // half the cells of an 8x8 grid satisfy the parity constraint
        assert_eq!(graph.regions.len(), 32);
    }

    #[test]
    fn test_rectangular_wrap_scenario() {
        // 4x4 torus: from (0,0), NW wraps to (3,3) on both axes and N is
        // omitted because row 0 touches the pole.
        let mut graph = RegionGraph::new();
        let level =
            build_rectangular_level(&mut graph, "surface", LevelKind::Surface, 4, 4, ocean());
        let origin = graph.at(level, 0, 0).unwrap();
        let region = graph.get(origin).unwrap();
        assert_eq!(region.neighbor(Direction::North), None);
        let nw = region.neighbor(Direction::Northwest).unwrap();
        let nw_region = graph.get(nw).unwrap();
        assert_eq!((nw_region.x, nw_region.y), (3, 3));
        let se = region.neighbor(Direction::Southeast).unwrap();
        assert_eq!(graph.get(se).map(|r| (r.x, r.y)), Some((1, 1)));
    }

    #[test]
    fn test_rectangular_pole_rows_omit_poleward_links() {
        let mut graph = RegionGraph::new();
        let level =
            build_rectangular_level(&mut graph, "surface", LevelKind::Surface, 8, 8, ocean());
        for id in graph.level_ids(level) {
            let region = graph.get(id).unwrap();
            if region.y <= 1 {
                assert_eq!(region.neighbor(Direction::North), None);
            }
            if region.y >= 6 {
                assert_eq!(region.neighbor(Direction::South), None);
            }
        }
    }

    #[test]
    fn test_rectangular_symmetry() {
        let mut graph = RegionGraph::new();
        build_rectangular_level(&mut graph, "surface", LevelKind::Surface, 16, 16, ocean());
        assert_symmetric(&graph);
    }

    #[test]
    fn test_icosahedral_region_count() {
        for scale in 1..=3 {
            let mut graph = RegionGraph::new();
            build_icosahedral_level(&mut graph, "sphere", LevelKind::Surface, scale, ocean());
            assert_eq!(
                graph.regions.len() as i32,
                40 * scale * scale + 2,
                "scale {}",
                scale
            );
        }
    }

    #[test]
    fn test_icosahedral_degrees() {
        for scale in 1..=3 {
            let mut graph = RegionGraph::new();
            build_icosahedral_level(&mut graph, "sphere", LevelKind::Surface, scale, ocean());
            let pentagons = graph
                .regions
                .iter()
                .filter(|r| r.neighbor_count() == 5)
                .count();
            let hexagons = graph
                .regions
                .iter()
                .filter(|r| r.neighbor_count() == 6)
                .count();
            assert_eq!(pentagons, 12, "scale {}", scale);
            assert_eq!(pentagons + hexagons, graph.regions.len(), "scale {}", scale);
        }
    }

    #[test]
    fn test_icosahedral_symmetry() {
        for scale in 1..=3 {
            let mut graph = RegionGraph::new();
            build_icosahedral_level(&mut graph, "sphere", LevelKind::Surface, scale, ocean());
            assert_symmetric(&graph);
        }
    }

    #[test]
    fn test_icosahedral_no_self_links_or_duplicates() {
        let mut graph = RegionGraph::new();
        build_icosahedral_level(&mut graph, "sphere", LevelKind::Surface, 2, ocean());
        for region in &graph.regions {
            let mut seen = Vec::new();
            for dir in Direction::ALL {
                if let Some(target) = region.neighbor(dir) {
                    assert_ne!(target, region.id);
                    assert!(!seen.contains(&target), "duplicate neighbor");
                    seen.push(target);
                }
            }
        }
    }

    #[test]
    fn test_icosahedral_connectivity() {
        use std::collections::VecDeque;
        let mut graph = RegionGraph::new();
        build_icosahedral_level(&mut graph, "sphere", LevelKind::Surface, 2, ocean());
        let mut seen = vec![false; graph.regions.len()];
        let mut queue = VecDeque::from([RegionId(0)]);
        seen[0] = true;
        while let Some(id) = queue.pop_front() {
            for dir in Direction::ALL {
                if let Some(next) = graph.neighbor(id, dir) {
                    if !seen[next.index()] {
                        seen[next.index()] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
