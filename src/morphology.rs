//! Arena-backed section tree.
//!
//! A [`Morphology`] owns one [`Soma`] and a flat arena of [`Section`]s. Sections
//! refer to their parent and children by [`SectionId`] (an arena index), so
//! there are no reference cycles and no shared ownership.
//!
//! ```text
//!            Soma
//!          /      \
//!     root 0      root 3          roots: [0, 3]
//!     /    \         |
//!    1      2        4            parent(1) = parent(2) = 0, parent(4) = 3
//! ```
//!
//! Parents are always allocated before their children, so a parent's index is
//! strictly smaller than any of its children's.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Point3D, PointType};
use crate::core::math::compute_centroid;
use crate::error::{MorphError, Result};

/// Index of a section within its morphology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(usize);

impl SectionId {
    /// Wrap an arena index
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed chain of points with a single parent.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    /// Id within the owning morphology
    pub id: SectionId,
    /// Neurite type, fixed at construction
    pub section_type: PointType,
    /// Ordered points (never empty)
    pub points: Vec<Point3D>,
    /// Parent section, `None` when attached to the soma
    pub parent: Option<SectionId>,
    /// Child sections in insertion order
    pub children: Vec<SectionId>,
}

impl Section {
    /// First point of the section
    #[inline]
    pub fn first_point(&self) -> &Point3D {
        &self.points[0]
    }

    /// Last point of the section
    #[inline]
    pub fn last_point(&self) -> &Point3D {
        &self.points[self.points.len() - 1]
    }

    /// Whether the section attaches directly to the soma
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether the section has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Cell body as a point cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct Soma {
    points: Vec<Point3D>,
}

impl Soma {
    /// Create a soma from its points.
    ///
    /// # Errors
    /// `InsufficientPoints` if `points` is empty.
    pub fn new(points: Vec<Point3D>) -> Result<Self> {
        if points.is_empty() {
            return Err(MorphError::InsufficientPoints {
                needed: 1,
                found: 0,
            });
        }
        Ok(Self { points })
    }

    /// Soma points in input order
    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    /// Center: mean of the soma points.
    pub fn center(&self) -> Point3D {
        let c = compute_centroid(&self.points);
        Point3D::new(c.x, c.y, c.z, self.radius())
    }

    /// Radius: the point radius for a single-point soma, otherwise the mean
    /// distance of the points from the center.
    pub fn radius(&self) -> f64 {
        if let [single] = self.points.as_slice() {
            return single.radius;
        }
        let c = compute_centroid(&self.points);
        self.points.iter().map(|p| (p.xyz() - c).norm()).sum::<f64>() / self.points.len() as f64
    }
}

/// A neuron reconstruction: soma plus a forest of sections.
#[derive(Clone, Debug, PartialEq)]
pub struct Morphology {
    soma: Soma,
    sections: Vec<Section>,
    roots: Vec<SectionId>,
}

impl Morphology {
    /// The soma
    pub fn soma(&self) -> &Soma {
        &self.soma
    }

    /// All sections in arena order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section by id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this morphology.
    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.index()]
    }

    /// Section by id, `None` if out of range
    pub fn get_section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.index())
    }

    /// Root sections (one per neurite), in insertion order
    pub fn roots(&self) -> &[SectionId] {
        &self.roots
    }

    /// Number of sections (soma excluded)
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of section points (soma excluded)
    pub fn point_count(&self) -> usize {
        self.sections.iter().map(|s| s.points.len()).sum()
    }

    /// Sections in pre-order: parent before children, children and roots in
    /// insertion order.
    pub fn iter_sections(&self) -> PreOrder<'_> {
        PreOrder {
            morphology: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Pre-order walk of the neurite rooted at `root`.
    pub fn iter_neurite(&self, root: SectionId) -> PreOrder<'_> {
        PreOrder {
            morphology: self,
            stack: vec![root],
        }
    }

    /// Build a new morphology with the same ids and topology but new points.
    ///
    /// `f` is called once per section in pre-order with the section and the
    /// already-mapped points of its parent (`None` for roots).
    ///
    /// # Errors
    /// Propagates errors from `f`; `InsufficientPoints` if `f` returns no points.
    pub fn try_map_points<F>(&self, mut f: F) -> Result<Morphology>
    where
        F: FnMut(&Section, Option<&[Point3D]>) -> Result<Vec<Point3D>>,
    {
        let mut mapped: Vec<Option<Vec<Point3D>>> = vec![None; self.sections.len()];

        for section in self.iter_sections() {
            let parent_points = section
                .parent
                .and_then(|p| mapped[p.index()].as_deref());
            let points = f(section, parent_points)?;
            if points.is_empty() {
                return Err(MorphError::InsufficientPoints {
                    needed: 1,
                    found: 0,
                });
            }
            mapped[section.id.index()] = Some(points);
        }

        let sections = self
            .sections
            .iter()
            .zip(mapped)
            .map(|(s, points)| Section {
                id: s.id,
                section_type: s.section_type,
                points: points.unwrap_or_else(|| s.points.clone()),
                parent: s.parent,
                children: s.children.clone(),
            })
            .collect();

        Ok(Morphology {
            soma: self.soma.clone(),
            sections,
            roots: self.roots.clone(),
        })
    }
}

/// Explicit-stack pre-order iterator over sections.
pub struct PreOrder<'a> {
    morphology: &'a Morphology,
    stack: Vec<SectionId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let section = self.morphology.section(id);
        self.stack.extend(section.children.iter().rev());
        Some(section)
    }
}

/// Incremental constructor for [`Morphology`].
///
/// Sections must be added parent first; this is what guarantees the
/// parent-index-below-child-index invariant.
#[derive(Clone, Debug, Default)]
pub struct MorphologyBuilder {
    soma: Vec<Point3D>,
    sections: Vec<Section>,
    roots: Vec<SectionId>,
}

impl MorphologyBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append soma points
    pub fn add_soma_points(&mut self, points: impl IntoIterator<Item = Point3D>) -> &mut Self {
        self.soma.extend(points);
        self
    }

    /// Append a section and return its id.
    ///
    /// # Errors
    /// - `InsufficientPoints` if `points` is empty
    /// - `UnresolvedParent` if `parent` has not been added yet
    pub fn add_section(
        &mut self,
        parent: Option<SectionId>,
        section_type: PointType,
        points: Vec<Point3D>,
    ) -> Result<SectionId> {
        let id = SectionId::new(self.sections.len());

        if points.is_empty() {
            return Err(MorphError::InsufficientPoints {
                needed: 1,
                found: 0,
            });
        }

        match parent {
            Some(p) => self
                .sections
                .get_mut(p.index())
                .ok_or(MorphError::UnresolvedParent(p))?
                .children
                .push(id),
            None => self.roots.push(id),
        }

        self.sections.push(Section {
            id,
            section_type,
            points,
            parent,
            children: Vec::new(),
        });

        Ok(id)
    }

    /// Number of sections added so far
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Finish the morphology.
    ///
    /// # Errors
    /// `InsufficientPoints` if no soma points were added.
    pub fn build(self) -> Result<Morphology> {
        Ok(Morphology {
            soma: Soma::new(self.soma)?,
            sections: self.sections,
            roots: self.roots,
        })
    }
}
