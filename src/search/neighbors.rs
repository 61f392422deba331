//! Neighbor generation: the locomotion model for a grounded bipedal agent.
//!
//! For each cardinal direction the generator examines a column of cells at
//! horizontal offsets 1, 2 and 3 and vertical offsets +2 down to -4,
//! relative to the agent's feet:
//!
//! ```text
//!   --0123-- horizontal offset
//!  |
//! +2  aho
//! +1  .bip
//!  0  +cjq      "." head, "+" feet, "#" current floor
//! -1  #dkr
//! -2   els
//! -3   fmt
//! -4   gn
//!  |
//!  dy
//! ```
//!
//! The rules are evaluated in a fixed order per direction; each produces at
//! most one landing cell, tagged with the [`MoveKind`] that reaches it.
//! Later rules are gated on earlier ones not having claimed a nearer
//! landing, so the emitted set is physically consistent.

use std::collections::HashSet;

use crate::classify::BlockClassifier;
use crate::core::{block_types, BlockPos, BlockProperties, Node, CARDINAL_DIRECTIONS};
use crate::world::WorldQuery;

/// The maneuver that reaches a candidate landing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Walk one cell forward on flat ground.
    Walk,
    /// Jump one cell up onto a block directly ahead.
    StepUp,
    /// Walk forward and fall `1..=3` cells.
    Drop(u8),
    /// Jump a gap, landing one cell up at horizontal distance 2.
    JumpUp,
    /// Jump a one-cell gap, landing level at horizontal distance 2.
    JumpAcross,
    /// Walk off the edge and drop `1..=3` cells at horizontal distance 2.
    WalkDrop(u8),
    /// Long jump to horizontal distance 3, landing at vertical offset
    /// `0 | -1 | -2`.
    LongJump(i8),
}

/// A landing cell produced by one direction's rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub position: BlockPos,
    pub kind: MoveKind,
}

/// Produces the legally reachable successor states of a search node.
pub struct NeighborGenerator<'a, W: WorldQuery> {
    classifier: BlockClassifier<'a, W>,
    max_water_depth: u32,
}

impl<'a, W: WorldQuery> NeighborGenerator<'a, W> {
    pub fn new(world: &'a W, hazards: &'a HashSet<u16>, max_water_depth: u32) -> Self {
        Self {
            classifier: BlockClassifier::new(world, hazards),
            max_water_depth,
        }
    }

    /// Expand a node into its reachable successors.
    ///
    /// A successor's water depth is the parent's plus one when the block
    /// above the landing cell is liquid, unchanged otherwise; it never
    /// decreases along a path. Successors whose depth would exceed the
    /// configured ceiling are discarded.
    pub fn expand(&self, node: &Node) -> Vec<Node> {
        let mut result = Vec::new();

        for direction in CARDINAL_DIRECTIONS {
            for candidate in self.candidates_in_direction(node.position, direction) {
                let face = candidate.position.offset(0, 1, 0);
                let water_depth = match self.classifier.block_type(face) {
                    Some(t) if block_types::is_liquid(t) => node.water_depth + 1,
                    _ => node.water_depth,
                };
                if water_depth > self.max_water_depth {
                    continue;
                }
                result.push(Node::new(candidate.position, water_depth));
            }
        }

        result
    }

    /// Evaluate the ordered rule set for one direction.
    ///
    /// `direction` is a cardinal (dx, dz) unit offset. Returns every
    /// landing cell the agent could legally reach moving that way.
    pub fn candidates_in_direction(
        &self,
        position: BlockPos,
        direction: (i32, i32),
    ) -> Vec<Candidate> {
        let (dx, dz) = direction;
        let at = |h: i32, dy: i32| -> BlockProperties {
            self.classifier.classify(position.offset(dx * h, dy, dz * h))
        };
        let cell = |h: i32, dy: i32| -> BlockPos { position.offset(dx * h, dy, dz * h) };

        let mut out = Vec::new();

        // Headroom above the agent's own head, needed by every jump rule.
        let origin_headroom = at(0, 2).safe;

        // Rule 1: blocked head space one step ahead kills the direction.
        let b = at(1, 1);
        if !b.safe {
            return out;
        }

        let c = at(1, 0);
        if !c.safe {
            // Rule 2: step-up. The forward foot cell must bear weight, and
            // there must be headroom both to rise and to stand after.
            if !c.physical || !origin_headroom || !at(1, 2).safe {
                return out;
            }
            out.push(Candidate {
                position: cell(1, 1),
                kind: MoveKind::StepUp,
            });
            return out;
        }

        // Rule 3: flat walk. The common case; nothing else applies ahead.
        let d = at(1, -1);
        if d.physical {
            out.push(Candidate {
                position: cell(1, 0),
                kind: MoveKind::Walk,
            });
            return out;
        }

        // Rule 4: drop probing below the forward column. Passable cells let
        // the probe continue one level lower; anything else ends it.
        let mut e = None;
        if d.safe {
            let e_props = at(1, -2);
            e = Some(e_props);
            if e_props.physical {
                out.push(Candidate {
                    position: cell(1, -1),
                    kind: MoveKind::Drop(1),
                });
            } else if e_props.safe {
                let f = at(1, -3);
                if f.physical {
                    out.push(Candidate {
                        position: cell(1, -2),
                        kind: MoveKind::Drop(2),
                    });
                } else if f.safe && at(1, -4).physical {
                    out.push(Candidate {
                        position: cell(1, -3),
                        kind: MoveKind::Drop(3),
                    });
                }
            }
        }

        // Rule 5: gap jump to horizontal distance 2. Requires headroom over
        // the whole arc: origin, forward column, and the far column.
        let h = at(1, 2);
        let o = at(2, 2);
        let can_jump_forward = origin_headroom && h.safe && o.safe;

        let i = at(2, 1);
        let j = at(2, 0);
        if can_jump_forward && i.safe && j.physical {
            out.push(Candidate {
                position: cell(2, 1),
                kind: MoveKind::JumpUp,
            });
        }

        let k = at(2, -1);
        let mut can_jump_past = can_jump_forward && j.safe && i.safe;
        if can_jump_past && k.physical {
            out.push(Candidate {
                position: cell(2, 0),
                kind: MoveKind::JumpAcross,
            });
            can_jump_past = false;
        }

        // Walk-and-drop landings at distance 2, gated on the nearer column
        // being fully passable.
        let l = at(2, -2);
        let mut landed_two_down = false;
        if i.safe && j.safe && k.safe && l.physical {
            landed_two_down = true;
            out.push(Candidate {
                position: cell(2, -1),
                kind: MoveKind::WalkDrop(1),
            });
        }

        let e = e.unwrap_or_else(|| at(1, -2));
        let mut landed_three_down = false;
        if e.safe {
            let m = at(2, -3);
            if j.safe && k.safe && l.safe && m.physical {
                landed_three_down = true;
                out.push(Candidate {
                    position: cell(2, -2),
                    kind: MoveKind::WalkDrop(2),
                });
            }
            if k.safe && l.safe && m.safe && at(2, -4).physical {
                out.push(Candidate {
                    position: cell(2, -3),
                    kind: MoveKind::WalkDrop(3),
                });
            }
        }

        // Rule 6: long jump to distance 3, only while the distance-2 arc
        // stayed viable and unclaimed.
        if !can_jump_past {
            return out;
        }

        let p = at(3, 1);
        let q = at(3, 0);
        let r = at(3, -1);
        if p.safe && q.safe && r.physical {
            out.push(Candidate {
                position: cell(3, 0),
                kind: MoveKind::LongJump(0),
            });
            return out;
        }

        let s = at(3, -2);
        if !landed_two_down && q.safe && r.safe && s.physical {
            out.push(Candidate {
                position: cell(3, -1),
                kind: MoveKind::LongJump(-1),
            });
            return out;
        }

        if !landed_three_down && r.safe && s.safe && at(3, -3).physical {
            out.push(Candidate {
                position: cell(3, -2),
                kind: MoveKind::LongJump(-2),
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{BlockInfo, CollisionShape};
    use std::collections::HashMap;

    /// A bounded test world: cells inside the region default to air,
    /// cells outside are unloaded.
    struct TestWorld {
        min: BlockPos,
        max: BlockPos,
        blocks: HashMap<BlockPos, BlockInfo>,
    }

    impl TestWorld {
        fn new(min: BlockPos, max: BlockPos) -> Self {
            Self {
                min,
                max,
                blocks: HashMap::new(),
            }
        }

        fn set_solid(&mut self, pos: BlockPos) {
            self.blocks.insert(pos, BlockInfo::new(CollisionShape::Full, 1));
        }

        fn set_block(&mut self, pos: BlockPos, info: BlockInfo) {
            self.blocks.insert(pos, info);
        }

        /// Solid floor covering an x/z rectangle at one y level.
        fn floor(&mut self, y: i32, x: std::ops::RangeInclusive<i32>, z: std::ops::RangeInclusive<i32>) {
            for x in x {
                for z in z.clone() {
                    self.set_solid(BlockPos::new(x, y, z));
                }
            }
        }
    }

    impl WorldQuery for TestWorld {
        fn block_at(&self, p: BlockPos) -> Option<BlockInfo> {
            if p.x < self.min.x
                || p.y < self.min.y
                || p.z < self.min.z
                || p.x > self.max.x
                || p.y > self.max.y
                || p.z > self.max.z
            {
                return None;
            }
            Some(
                self.blocks
                    .get(&p)
                    .copied()
                    .unwrap_or(BlockInfo::new(CollisionShape::Empty, 0)),
            )
        }
    }

    fn default_hazards() -> HashSet<u16> {
        [
            block_types::FIRE,
            block_types::CROPS,
            block_types::LAVA,
            block_types::LAVA_FLOWING,
        ]
        .into_iter()
        .collect()
    }

    const EAST: (i32, i32) = (1, 0);

    #[test]
    fn test_flat_ground_walks_all_directions() {
        let mut world = TestWorld::new(BlockPos::new(-3, -5, -3), BlockPos::new(3, 5, 3));
        world.floor(0, -3..=3, -3..=3);
        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);

        let nodes = gen.expand(&Node::start(BlockPos::new(0, 1, 0)));
        let positions: Vec<BlockPos> = nodes.iter().map(|n| n.position).collect();

        assert_eq!(nodes.len(), 4);
        for pos in [
            BlockPos::new(-1, 1, 0),
            BlockPos::new(1, 1, 0),
            BlockPos::new(0, 1, -1),
            BlockPos::new(0, 1, 1),
        ] {
            assert!(positions.contains(&pos), "missing walk to {:?}", pos);
        }
        assert!(nodes.iter().all(|n| n.water_depth == 0));
    }

    #[test]
    fn test_step_up_requires_headroom() {
        let mut world = TestWorld::new(BlockPos::new(-2, -5, -2), BlockPos::new(4, 6, 2));
        world.floor(0, -2..=4, -2..=2);
        // One-block rise directly ahead.
        world.set_solid(BlockPos::new(1, 1, 0));

        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);
        let candidates =
            gen.candidates_in_direction(BlockPos::new(0, 1, 0), EAST);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].kind, MoveKind::StepUp);
        assert_eq!(candidates[0].position, BlockPos::new(1, 2, 0));

        // Cap the agent's head: the step-up must disappear.
        world.set_solid(BlockPos::new(0, 3, 0));
        let gen = NeighborGenerator::new(&world, &hazards, 20);
        let candidates =
            gen.candidates_in_direction(BlockPos::new(0, 1, 0), EAST);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_drop_lands_on_first_physical_cell() {
        let mut world = TestWorld::new(BlockPos::new(-2, -6, -2), BlockPos::new(4, 6, 2));
        // Agent stands at y=1 on floor y=0; ahead the ground is two lower.
        world.floor(0, -2..=0, -2..=2);
        world.floor(-2, 1..=4, -2..=2);

        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);
        let candidates =
            gen.candidates_in_direction(BlockPos::new(0, 1, 0), EAST);

        let drop = candidates
            .iter()
            .find(|c| matches!(c.kind, MoveKind::Drop(_)))
            .expect("expected a drop candidate");
        assert_eq!(drop.kind, MoveKind::Drop(2));
        assert_eq!(drop.position, BlockPos::new(1, -1, 0));
    }

    #[test]
    fn test_no_drop_beyond_four_cells() {
        let mut world = TestWorld::new(BlockPos::new(-2, -10, -2), BlockPos::new(4, 6, 2));
        world.floor(0, -2..=0, -2..=2);
        // Ground ahead is five below the agent's feet: too far to fall.
        world.floor(-4, 1..=4, -2..=2);

        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);
        let candidates =
            gen.candidates_in_direction(BlockPos::new(0, 1, 0), EAST);

        assert!(
            candidates
                .iter()
                .all(|c| !matches!(c.kind, MoveKind::Drop(_))),
            "got {:?}",
            candidates
        );
    }

    #[test]
    fn test_gap_jump_over_one_cell_hole() {
        let mut world = TestWorld::new(BlockPos::new(-2, -6, -2), BlockPos::new(4, 6, 2));
        // Floor at x=0 and x=2, nothing at x=1.
        world.floor(0, -2..=0, -2..=2);
        world.floor(0, 2..=4, -2..=2);

        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);
        let candidates =
            gen.candidates_in_direction(BlockPos::new(0, 1, 0), EAST);

        let jump = candidates
            .iter()
            .find(|c| c.kind == MoveKind::JumpAcross)
            .expect("expected a jump-across candidate");
        assert_eq!(jump.position, BlockPos::new(2, 1, 0));
        // No landing directly over the hole.
        assert!(candidates.iter().all(|c| c.position.x != 1));
    }

    #[test]
    fn test_long_jump_over_two_cell_hole() {
        let mut world = TestWorld::new(BlockPos::new(-2, -6, -2), BlockPos::new(6, 6, 2));
        // Floor at x<=0 and x>=3, nothing at x=1,2.
        world.floor(0, -2..=0, -2..=2);
        world.floor(0, 3..=6, -2..=2);

        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);
        let candidates =
            gen.candidates_in_direction(BlockPos::new(0, 1, 0), EAST);

        let jump = candidates
            .iter()
            .find(|c| c.kind == MoveKind::LongJump(0))
            .expect("expected a long-jump candidate");
        assert_eq!(jump.position, BlockPos::new(3, 1, 0));
    }

    #[test]
    fn test_hazard_ahead_kills_direction() {
        let mut world = TestWorld::new(BlockPos::new(-2, -6, -2), BlockPos::new(4, 6, 2));
        world.floor(0, -2..=4, -2..=2);
        // Fire where the agent would walk.
        world.set_block(
            BlockPos::new(1, 1, 0),
            BlockInfo::new(CollisionShape::Empty, block_types::FIRE),
        );

        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);
        let candidates =
            gen.candidates_in_direction(BlockPos::new(0, 1, 0), EAST);

        assert!(candidates.is_empty(), "got {:?}", candidates);
    }

    #[test]
    fn test_every_candidate_cell_is_safe() {
        // Mixed terrain: a rise, a hole, and a lower shelf.
        let mut world = TestWorld::new(BlockPos::new(-4, -8, -4), BlockPos::new(8, 8, 4));
        world.floor(0, -4..=0, -4..=4);
        world.floor(1, -4..=-2, -4..=4);
        world.floor(-1, 2..=5, -4..=4);
        world.floor(0, 6..=8, -4..=4);

        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);
        let classifier = BlockClassifier::new(&world, &hazards);

        for direction in CARDINAL_DIRECTIONS {
            for c in gen.candidates_in_direction(BlockPos::new(0, 1, 0), direction) {
                assert!(
                    classifier.classify(c.position).safe,
                    "unsafe candidate {:?}",
                    c
                );
            }
        }
    }

    #[test]
    fn test_water_accumulates_depth() {
        let mut world = TestWorld::new(BlockPos::new(-2, -6, -2), BlockPos::new(4, 6, 2));
        world.floor(0, -2..=4, -2..=2);
        // The forward cell and the cell above it are water.
        for y in [1, 2] {
            world.set_block(
                BlockPos::new(1, y, 0),
                BlockInfo::new(CollisionShape::Empty, block_types::WATER),
            );
        }

        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);

        let nodes = gen.expand(&Node::new(BlockPos::new(0, 1, 0), 3));
        let wet = nodes
            .iter()
            .find(|n| n.position == BlockPos::new(1, 1, 0))
            .expect("expected a candidate into the water");
        assert_eq!(wet.water_depth, 4);

        // Dry directions keep the parent's depth unchanged.
        let dry = nodes
            .iter()
            .find(|n| n.position == BlockPos::new(-1, 1, 0))
            .expect("expected a dry candidate");
        assert_eq!(dry.water_depth, 3);
    }

    #[test]
    fn test_water_ceiling_discards_candidates() {
        let mut world = TestWorld::new(BlockPos::new(-2, -6, -2), BlockPos::new(4, 6, 2));
        world.floor(0, -2..=4, -2..=2);
        for y in [1, 2] {
            world.set_block(
                BlockPos::new(1, y, 0),
                BlockInfo::new(CollisionShape::Empty, block_types::WATER),
            );
        }

        let hazards = default_hazards();
        let gen = NeighborGenerator::new(&world, &hazards, 20);

        // Parent already at the ceiling: one more wading step is discarded.
        let nodes = gen.expand(&Node::new(BlockPos::new(0, 1, 0), 20));
        assert!(nodes.iter().all(|n| n.position != BlockPos::new(1, 1, 0)));
        assert!(nodes.iter().all(|n| n.water_depth <= 20));
    }
}
