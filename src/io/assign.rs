//! Output id assignment while flattening a section tree.
//!
//! Each output format numbers its records on its own scheme: SWC rows start at
//! 2 after a soma row 1, the H5 structure table starts at 1 after a soma row 0.
//! The assigner hands out consecutive ids in walk order and remembers, for
//! every emitted section, the id of its last record so that children can
//! point back at it.
//!
//! ```text
//! section  parent   count   records (id <- parent)
//! 0        soma     3       2<-1  3<-2  4<-3
//! 1        0        2       5<-4  6<-5
//! 2        0        1       7<-4
//! ```
//!
//! Sections must be emitted parent first (pre-order); a child seen before its
//! parent yields `UnresolvedParent`.

use std::collections::HashMap;

use crate::error::{MorphError, Result};
use crate::morphology::SectionId;

/// One output record: its id and the id it connects to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssignedRecord {
    /// Id of this record
    pub id: i64,
    /// Id of the record it attaches to
    pub parent_id: i64,
}

/// Sequential id allocator with parent resolution.
#[derive(Clone, Debug)]
pub struct SectionIndexAssigner {
    soma_id: i64,
    next_id: i64,
    last_emitted: HashMap<SectionId, i64>,
}

impl SectionIndexAssigner {
    /// Create an assigner.
    ///
    /// Sections without a parent resolve to `soma_id`; the first record gets
    /// `first_id`.
    pub fn new(soma_id: i64, first_id: i64) -> Self {
        Self {
            soma_id,
            next_id: first_id,
            last_emitted: HashMap::new(),
        }
    }

    /// Id the next record will get
    pub fn next_id(&self) -> i64 {
        self.next_id
    }

    /// Output id a child of `parent` should attach to.
    ///
    /// # Errors
    /// `UnresolvedParent` if `parent` has not been emitted.
    pub fn resolve_parent(&self, parent: Option<SectionId>) -> Result<i64> {
        match parent {
            None => Ok(self.soma_id),
            Some(p) => self
                .last_emitted
                .get(&p)
                .copied()
                .ok_or(MorphError::UnresolvedParent(p)),
        }
    }

    /// Allocate `count` chained records for `section`.
    ///
    /// The first record attaches to the resolved parent, each following one to
    /// the record before it. The last id is remembered for `section`.
    ///
    /// # Errors
    /// - `UnresolvedParent` if `parent` has not been emitted
    /// - `InsufficientPoints` if `count` is zero
    pub fn emit(
        &mut self,
        section: SectionId,
        parent: Option<SectionId>,
        count: usize,
    ) -> Result<Vec<AssignedRecord>> {
        if count == 0 {
            return Err(MorphError::InsufficientPoints {
                needed: 1,
                found: 0,
            });
        }

        let mut parent_id = self.resolve_parent(parent)?;
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            let id = self.next_id;
            records.push(AssignedRecord { id, parent_id });
            parent_id = id;
            self.next_id += 1;
        }

        self.last_emitted.insert(section, parent_id);
        Ok(records)
    }

    /// Allocate a single record for `section`, for section-granular tables.
    ///
    /// # Errors
    /// `UnresolvedParent` if `parent` has not been emitted.
    pub fn emit_one(
        &mut self,
        section: SectionId,
        parent: Option<SectionId>,
    ) -> Result<AssignedRecord> {
        let parent_id = self.resolve_parent(parent)?;
        let id = self.next_id;
        self.next_id += 1;
        self.last_emitted.insert(section, id);
        Ok(AssignedRecord { id, parent_id })
    }
}
