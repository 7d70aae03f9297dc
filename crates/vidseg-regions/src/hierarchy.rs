//! Region id resolution across hierarchy levels.
//!
//! Two lenient rules apply to every lookup:
//!
//! - A frame that embeds a non-empty hierarchy always uses it for levels
//!   above 0; an external hierarchy passed alongside is ignored.
//! - Levels beyond the available depth are clamped to the deepest level.

use crate::model::{Frame, HierarchyLevel, Region, RegionId};
use crate::{Error, Result};

/// Resolves region ids of one frame at a fixed, clamped level.
///
/// Source selection and clamping happen once in [`LevelResolver::new`], so a
/// renderer can resolve every region of a frame without repeating them.
#[derive(Debug, Clone, Copy)]
pub struct LevelResolver<'a> {
    levels: &'a [HierarchyLevel],
    level: usize,
}

impl<'a> LevelResolver<'a> {
    /// Select the hierarchy source for `frame` and clamp `level` to its depth.
    ///
    /// Fails with [`Error::MissingHierarchy`] if `level > 0` and neither the
    /// frame nor `external` provides a hierarchy.
    pub fn new(
        frame: &'a Frame,
        level: usize,
        external: Option<&'a [HierarchyLevel]>,
    ) -> Result<Self> {
        if level == 0 {
            return Ok(Self {
                levels: &[],
                level: 0,
            });
        }

        let levels = if frame.has_hierarchy() {
            frame.hierarchy.as_slice()
        } else {
            external.ok_or(Error::MissingHierarchy { level })?
        };

        let effective = level.min(levels.len());
        if effective < level {
            tracing::trace!(
                "Clamped hierarchy level {} to {} available levels",
                level,
                effective
            );
        }

        Ok(Self {
            levels,
            level: effective,
        })
    }

    /// The requested level after clamping.
    pub fn effective_level(&self) -> usize {
        self.level
    }

    /// Id of `region` at the effective level.
    pub fn resolve(&self, region: &Region) -> Result<RegionId> {
        if self.level == 0 {
            return Ok(region.id);
        }

        // parent_id is already the level-1 id; climb the remaining levels.
        let mut id = region.parent_id;
        for (l, hierarchy_level) in self.levels[..self.level - 1].iter().enumerate() {
            id = hierarchy_level
                .parent_of(id)
                .ok_or(Error::CorruptHierarchy {
                    level: l,
                    id,
                    len: hierarchy_level.len(),
                })?;
        }
        Ok(id)
    }
}

/// Id of `region` (a region of `frame`) at hierarchy `level`.
///
/// See [`LevelResolver`] for source selection and clamping.
pub fn resolve_id(
    region: &Region,
    level: usize,
    frame: &Frame,
    external: Option<&[HierarchyLevel]>,
) -> Result<RegionId> {
    LevelResolver::new(frame, level, external)?.resolve(region)
}
