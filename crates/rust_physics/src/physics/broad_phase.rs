//! Broad-phase pair generation
//!
//! The pairwise collider systems hand every matching entity's world bounds
//! to a [`BroadPhase`] and run the narrowphase only on the pairs it returns.

use crate::ecs::Entity;

use super::shape::Aabb;

/// Produces candidate pairs for the narrowphase
pub trait BroadPhase: Send + Sync {
    /// Candidate pairs, lower entity first, sorted and without duplicates
    fn candidate_pairs(&self, bounds: &[(Entity, Aabb)]) -> Vec<(Entity, Entity)>;

    /// Name for logging
    fn name(&self) -> &'static str;
}

fn ordered(a: Entity, b: Entity) -> (Entity, Entity) {
    if a < b { (a, b) } else { (b, a) }
}

fn finish(mut pairs: Vec<(Entity, Entity)>) -> Vec<(Entity, Entity)> {
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

/// Every pair of entities is a candidate
#[derive(Debug, Clone, Copy, Default)]
pub struct AllPairs;

impl BroadPhase for AllPairs {
    fn candidate_pairs(&self, bounds: &[(Entity, Aabb)]) -> Vec<(Entity, Entity)> {
        let mut pairs = Vec::with_capacity(bounds.len() * bounds.len().saturating_sub(1) / 2);
        for (i, &(a, _)) in bounds.iter().enumerate() {
            for &(b, _) in &bounds[i + 1..] {
                if a != b {
                    pairs.push(ordered(a, b));
                }
            }
        }
        finish(pairs)
    }

    fn name(&self) -> &'static str {
        "all-pairs"
    }
}

/// Sweep-and-prune along the X axis
///
/// Bounds are sorted by their minimum X; a pair is a candidate only if the
/// bounds overlap on every axis.
///
/// Candidates come from the bounds handed in, which the collider systems
/// take before resolving anything. A pair pushed into contact by an earlier
/// resolution in the same tick is not a candidate until the next tick;
/// [`AllPairs`] has no such lag.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepAndPrune;

impl BroadPhase for SweepAndPrune {
    fn candidate_pairs(&self, bounds: &[(Entity, Aabb)]) -> Vec<(Entity, Entity)> {
        let mut sorted: Vec<&(Entity, Aabb)> = bounds.iter().collect();
        sorted.sort_by(|(ea, a), (eb, b)| a.min.x.total_cmp(&b.min.x).then(ea.cmp(eb)));

        let mut pairs = Vec::new();
        let mut active: Vec<&(Entity, Aabb)> = Vec::new();
        for current in sorted {
            let (entity, aabb) = current;
            active.retain(|(_, other)| other.max.x >= aabb.min.x);
            for (other_entity, other) in &active {
                if other_entity != entity && aabb.overlaps(other) {
                    pairs.push(ordered(*entity, *other_entity));
                }
            }
            active.push(current);
        }
        finish(pairs)
    }

    fn name(&self) -> &'static str {
        "sweep-and-prune"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use slotmap::SlotMap;

    fn unit_box(x: f32) -> Aabb {
        Aabb::new(Vec3::new(x, 0.0, 0.0), Vec3::new(x + 1.0, 1.0, 1.0))
    }

    fn entities(count: usize) -> Vec<Entity> {
        let mut keys: SlotMap<Entity, ()> = SlotMap::with_key();
        (0..count).map(|_| keys.insert(())).collect()
    }

    #[test]
    fn test_all_pairs() {
        let e = entities(3);
        let bounds = vec![(e[2], unit_box(10.0)), (e[0], unit_box(0.0)), (e[1], unit_box(5.0))];

        let pairs = AllPairs.candidate_pairs(&bounds);
        assert_eq!(pairs, vec![(e[0], e[1]), (e[0], e[2]), (e[1], e[2])]);
    }

    #[test]
    fn test_sweep_and_prune_culls_distant() {
        let e = entities(4);
        let bounds = vec![
            (e[0], unit_box(0.0)),
            (e[1], unit_box(0.5)),
            (e[2], unit_box(5.0)),
            (e[3], Aabb::new(Vec3::new(0.25, 3.0, 0.0), Vec3::new(1.0, 4.0, 1.0))),
        ];

        let pairs = SweepAndPrune.candidate_pairs(&bounds);
        assert_eq!(pairs, vec![(e[0], e[1])]);
    }

    #[test]
    fn test_sweep_and_prune_matches_all_pairs_when_clustered() {
        let e = entities(3);
        let bounds = vec![
            (e[0], unit_box(0.0)),
            (e[1], unit_box(0.25)),
            (e[2], unit_box(0.5)),
        ];

        assert_eq!(SweepAndPrune.candidate_pairs(&bounds), AllPairs.candidate_pairs(&bounds));
    }

    #[test]
    fn test_empty_and_single() {
        let e = entities(1);
        assert!(AllPairs.candidate_pairs(&[]).is_empty());
        assert!(SweepAndPrune.candidate_pairs(&[(e[0], unit_box(0.0))]).is_empty());
    }
}
