//! Curia Legislation - The normative registry of one institution.
//!
//! A [`Legislation`] owns every norm, sanction, and norm-to-sanction link an
//! institution has enacted, and is the only place their lifecycle state
//! changes. It is shared mutable state: concurrent institutional-event
//! handlers add rules, flip them on and off, and query which rules an
//! observed fact activates.
//!
//! ## Protocol
//!
//! Every operation is a total function: duplicates, missing ids, and
//! unresolvable links are expected outcomes reported through `bool`/`Option`
//! returns, never errors. The aggregate holds three maps - norms, sanctions,
//! links - behind one lock, so each operation is atomic across all three:
//! a reader can never observe a norm without its link entry, or a link set
//! naming a sanction whose cascading removal is mid-flight.
//!
//! ## Invariants
//!
//! 1. The link table has an entry exactly for every stored norm id - created
//!    empty at add time, dropped wholesale at remove time.
//! 2. A link is only created when both endpoints exist, and sanction removal
//!    cascades through every link set. Dangling sanction references cannot
//!    be stored.
//! 3. Norm and sanction ids are unique; re-adding an id is a silent no-op.

#![deny(unsafe_code)]

use curia_terms::{ConsequenceEngine, Literal};
use curia_types::{Identifier, Norm, RuleState, Sanction};
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// The aggregate of norms, sanctions, and links for one institution
/// instance. Created once, shared for the instance's lifetime, dropped as a
/// unit.
#[derive(Debug, Default)]
pub struct Legislation {
    state: RwLock<Registry>,
}

#[derive(Debug, Default)]
struct Registry {
    norms: HashMap<Identifier, Norm>,
    sanctions: HashMap<Identifier, Sanction>,
    links: HashMap<Identifier, HashSet<Identifier>>,
}

impl Legislation {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only witnesses a panic in some other holder; no
    // mutation below unwinds between coupled map updates, so the registry
    // behind a poisoned guard is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a norm, creating its empty link entry.
    ///
    /// Returns false when the id is already taken - an expected case
    /// (idempotent re-registration), silently ignored.
    pub fn add_norm(&self, norm: Norm) -> bool {
        let mut registry = self.write();
        if registry.norms.contains_key(&norm.id) {
            return false;
        }
        debug!(norm = %norm.id, "norm added");
        registry.links.insert(norm.id.clone(), HashSet::new());
        registry.norms.insert(norm.id.clone(), norm);
        true
    }

    /// Insert a sanction. Returns false on a duplicate id.
    pub fn add_sanction(&self, sanction: Sanction) -> bool {
        let mut registry = self.write();
        if registry.sanctions.contains_key(&sanction.id) {
            return false;
        }
        debug!(sanction = %sanction.id, "sanction added");
        registry.sanctions.insert(sanction.id.clone(), sanction);
        true
    }

    /// A copy of the stored norm, if present.
    pub fn norm(&self, id: &Identifier) -> Option<Norm> {
        self.read().norms.get(id).cloned()
    }

    /// A copy of the stored sanction, if present.
    pub fn sanction(&self, id: &Identifier) -> Option<Sanction> {
        self.read().sanctions.get(id).cloned()
    }

    /// Snapshot of every norm.
    pub fn norms(&self) -> Vec<Norm> {
        self.read().norms.values().cloned().collect()
    }

    /// Snapshot of every sanction.
    pub fn sanctions(&self) -> Vec<Sanction> {
        self.read().sanctions.values().cloned().collect()
    }

    pub fn norm_count(&self) -> usize {
        self.read().norms.len()
    }

    pub fn sanction_count(&self) -> usize {
        self.read().sanctions.len()
    }

    /// Record that `sanction` may answer a breach of `norm`.
    ///
    /// False when either endpoint is missing or the link already exists; a
    /// link can never name a sanction the store does not hold.
    pub fn add_link(&self, norm: &Identifier, sanction: &Identifier) -> bool {
        let mut registry = self.write();
        if !registry.sanctions.contains_key(sanction) {
            return false;
        }
        match registry.links.get_mut(norm) {
            Some(linked) => {
                let inserted = linked.insert(sanction.clone());
                if inserted {
                    debug!(norm = %norm, sanction = %sanction, "link added");
                }
                inserted
            }
            None => false,
        }
    }

    /// Remove one link. False when no such link exists.
    pub fn unlink(&self, norm: &Identifier, sanction: &Identifier) -> bool {
        let mut registry = self.write();
        match registry.links.get_mut(norm) {
            Some(linked) => {
                let removed = linked.remove(sanction);
                if removed {
                    debug!(norm = %norm, sanction = %sanction, "link removed");
                }
                removed
            }
            None => false,
        }
    }

    /// Snapshot of one norm's link set; `None` when the norm is absent.
    pub fn linked_sanctions(&self, norm: &Identifier) -> Option<HashSet<Identifier>> {
        self.read().links.get(norm).cloned()
    }

    /// Snapshot of the whole link table.
    pub fn links(&self) -> HashMap<Identifier, HashSet<Identifier>> {
        self.read().links.clone()
    }

    /// Remove and return a norm, dropping its link entry wholesale.
    pub fn remove_norm(&self, id: &Identifier) -> Option<Norm> {
        let mut registry = self.write();
        let removed = registry.norms.remove(id);
        if removed.is_some() {
            registry.links.remove(id);
            debug!(norm = %id, "norm removed");
        }
        removed
    }

    /// Remove and return a sanction, cascading through every link set.
    ///
    /// The cascade is what keeps invariant 2: a removed sanction id is
    /// scrubbed from all norms' links in the same atomic step, so no reader
    /// ever sees a dangling reference.
    pub fn remove_sanction(&self, id: &Identifier) -> Option<Sanction> {
        let mut registry = self.write();
        let removed = registry.sanctions.remove(id);
        if removed.is_some() {
            for linked in registry.links.values_mut() {
                linked.remove(id);
            }
            debug!(sanction = %id, "sanction removed, links scrubbed");
        }
        removed
    }

    /// Enable a norm. True whenever the norm exists, already-enabled
    /// included; false only when the id is unknown.
    pub fn enable_norm(&self, id: &Identifier) -> bool {
        self.set_norm_state(id, RuleState::Enabled)
    }

    /// Disable a norm; same contract as [`enable_norm`](Self::enable_norm).
    pub fn disable_norm(&self, id: &Identifier) -> bool {
        self.set_norm_state(id, RuleState::Disabled)
    }

    pub fn enable_sanction(&self, id: &Identifier) -> bool {
        self.set_sanction_state(id, RuleState::Enabled)
    }

    pub fn disable_sanction(&self, id: &Identifier) -> bool {
        self.set_sanction_state(id, RuleState::Disabled)
    }

    fn set_norm_state(&self, id: &Identifier, state: RuleState) -> bool {
        let mut registry = self.write();
        match registry.norms.get_mut(id) {
            Some(norm) => {
                if norm.state != state {
                    debug!(norm = %id, state = %state, "norm state changed");
                    norm.state = state;
                }
                true
            }
            None => false,
        }
    }

    fn set_sanction_state(&self, id: &Identifier, state: RuleState) -> bool {
        let mut registry = self.write();
        match registry.sanctions.get_mut(id) {
            Some(sanction) => {
                if sanction.state != state {
                    debug!(sanction = %id, state = %state, "sanction state changed");
                    sanction.state = state;
                }
                true
            }
            None => false,
        }
    }

    /// Enabled norms whose activation condition `fact` satisfies.
    ///
    /// Disabled norms never match institutionally, whatever their condition
    /// says. Matching runs on a snapshot: the store lock is released before
    /// any condition is evaluated.
    pub fn matching_norms(&self, fact: &Literal, engine: &impl ConsequenceEngine) -> Vec<Norm> {
        let snapshot = self.norms();
        snapshot
            .into_iter()
            .filter(|norm| norm.state.is_enabled() && norm.matches(fact, engine))
            .collect()
    }

    /// Enabled sanctions whose activation condition `fact` satisfies.
    pub fn matching_sanctions(
        &self,
        fact: &Literal,
        engine: &impl ConsequenceEngine,
    ) -> Vec<Sanction> {
        let snapshot = self.sanctions();
        snapshot
            .into_iter()
            .filter(|sanction| sanction.state.is_enabled() && sanction.matches(fact, engine))
            .collect()
    }
}
