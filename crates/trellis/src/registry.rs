//! Flag storage, registration, and downward value propagation.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::{FlagError, FlagId, FlagSnapshot, RegistrySnapshot};

/// One registered flag. Its id lives in the registry map key.
#[derive(Debug, Clone)]
struct FlagNode {
    value: bool,
    /// Declared at registration, deduplicated, in declaration order.
    parents: Vec<FlagId>,
    /// Flags that declared this one as a parent, in registration order.
    children: Vec<FlagId>,
}

/// Named boolean flags arranged in a dependency graph.
///
/// Parents must be registered before their children, so registration
/// order is a topological order and a cycle cannot be expressed. Setting
/// a flag `false` forces everything beneath it `false`; setting one
/// `true` touches nothing else.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    nodes: HashMap<FlagId, FlagNode>,
    /// Ids in registration order.
    order: Vec<FlagId>,
    /// Ids with no parents, in registration order.
    roots: Vec<FlagId>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation ────────────────────────────────────

    /// Registers `id` with a starting value and its parent flags.
    ///
    /// Parents must already be registered; duplicates among them collapse
    /// to the first occurrence. A failed call leaves the registry
    /// untouched. The starting value is taken as declared even under a
    /// disabled parent; [`check_consistency`](Self::check_consistency)
    /// settles such trees.
    pub fn register(
        &mut self,
        id: &str,
        default: bool,
        parents: &[&str],
    ) -> Result<(), FlagError> {
        let id = FlagId::new(id)?;
        if self.nodes.contains_key(id.as_str()) {
            return Err(FlagError::Duplicate {
                id: id.as_str().to_owned(),
            });
        }

        // Resolve every parent to its canonical id before touching
        // anything, so a failed call leaves no partial edges behind.
        let mut parent_ids: Vec<FlagId> = Vec::with_capacity(parents.len());
        for &parent in parents {
            if parent_ids.iter().any(|p| p.as_str() == parent) {
                continue;
            }
            match self.nodes.get_key_value(parent) {
                Some((key, _)) => parent_ids.push(key.clone()),
                None => {
                    return Err(FlagError::UnknownParent {
                        id: id.as_str().to_owned(),
                        parent: parent.to_owned(),
                    });
                }
            }
        }

        for parent in &parent_ids {
            if let Some(node) = self.nodes.get_mut(parent.as_str()) {
                node.children.push(id.clone());
            }
        }
        if parent_ids.is_empty() {
            self.roots.push(id.clone());
        }
        self.order.push(id.clone());
        tracing::debug!(
            flag = id.as_str(),
            value = default,
            parents = parent_ids.len(),
            "flag registered"
        );
        self.nodes.insert(
            id,
            FlagNode {
                value: default,
                parents: parent_ids,
                children: Vec::new(),
            },
        );
        Ok(())
    }

    /// Sets a flag's value.
    ///
    /// Setting `false` also forces every flag beneath `id` to `false`.
    /// Setting `true` revives only `id` itself; descendants stay off
    /// until re-enabled one by one.
    pub fn set(&mut self, id: &str, value: bool) -> Result<(), FlagError> {
        let node = self.nodes.get_mut(id).ok_or_else(|| FlagError::Unknown {
            id: id.to_owned(),
        })?;
        node.value = value;
        if !value {
            let forced = self.cascade_false(id);
            if forced > 0 {
                tracing::debug!(flag = id, forced, "cascade disabled descendants");
            }
        }
        Ok(())
    }

    /// Toggles a flag and returns its new value.
    ///
    /// Toggling to `false` cascades exactly like [`set`](Self::set), so
    /// two flips in a row restore the flag itself but not descendants the
    /// first flip turned off.
    pub fn flip(&mut self, id: &str) -> Result<bool, FlagError> {
        let value = !self.get(id)?;
        self.set(id, value)?;
        Ok(value)
    }

    /// Re-asserts downward propagation over the whole registry.
    ///
    /// Every disabled flag gets its subtree forced off, roots first, then
    /// the remaining flags in registration order. This settles trees
    /// whose declared starting values contradict an ancestor, the one
    /// state [`register`](Self::register) leaves unresolved, and repairs
    /// values changed behind the registry's back. A no-op on a registry
    /// that is already consistent.
    pub fn check_consistency(&mut self) {
        let mut repaired = 0;

        let roots = self.roots.clone();
        for id in &roots {
            let off = self.nodes.get(id.as_str()).is_some_and(|node| !node.value);
            if off {
                repaired += self.cascade_false(id.as_str());
            }
        }

        let order = self.order.clone();
        for id in &order {
            let Some(node) = self.nodes.get(id.as_str()) else {
                continue;
            };
            if node.parents.is_empty() || node.value {
                continue;
            }
            repaired += self.cascade_false(id.as_str());
        }

        if repaired > 0 {
            tracing::warn!(repaired, "consistency sweep repaired declared values");
        }
    }

    /// Forces everything reachable from `id` over child edges to `false`
    /// and returns how many flags actually flipped. Tracks visited ids so
    /// diamond shapes are walked once per node, and walks through already
    /// disabled flags since their subtrees may still hold enabled ones.
    fn cascade_false(&mut self, id: &str) -> usize {
        let mut stack: Vec<FlagId> = match self.nodes.get(id) {
            Some(node) => node.children.clone(),
            None => return 0,
        };
        let mut visited: HashSet<FlagId> = HashSet::new();
        let mut forced = 0;
        while let Some(next) = stack.pop() {
            if visited.contains(next.as_str()) {
                continue;
            }
            if let Some(node) = self.nodes.get_mut(next.as_str()) {
                if node.value {
                    node.value = false;
                    forced += 1;
                }
                stack.extend(node.children.iter().cloned());
            }
            visited.insert(next);
        }
        forced
    }

    // ── Read access ─────────────────────────────────

    /// Current value of a flag.
    pub fn get(&self, id: &str) -> Result<bool, FlagError> {
        Ok(self.node(id)?.value)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &FlagId> {
        self.order.iter()
    }

    /// Parentless flags, in registration order.
    pub fn roots(&self) -> impl Iterator<Item = &FlagId> {
        self.roots.iter()
    }

    /// Direct parents of `id`, in declaration order.
    pub fn parents(&self, id: &str) -> Result<&[FlagId], FlagError> {
        Ok(&self.node(id)?.parents)
    }

    /// Direct children of `id`, in registration order.
    pub fn children(&self, id: &str) -> Result<&[FlagId], FlagError> {
        Ok(&self.node(id)?.children)
    }

    /// Every flag that disabling `id` would force off, breadth-first from
    /// its direct children, each listed once.
    pub fn descendants(&self, id: &str) -> Result<Vec<FlagId>, FlagError> {
        let node = self.node(id)?;
        let mut queue: VecDeque<&FlagId> = node.children.iter().collect();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        while let Some(next) = queue.pop_front() {
            if !visited.insert(next.as_str()) {
                continue;
            }
            out.push(next.clone());
            if let Some(node) = self.nodes.get(next.as_str()) {
                queue.extend(node.children.iter());
            }
        }
        Ok(out)
    }

    /// Owned point-in-time view of every flag, in registration order.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let flags = self
            .order
            .iter()
            .filter_map(|id| {
                let node = self.nodes.get(id.as_str())?;
                Some(FlagSnapshot {
                    id: id.clone(),
                    value: node.value,
                    parents: node.parents.clone(),
                    children: node.children.clone(),
                })
            })
            .collect();
        RegistrySnapshot { flags }
    }

    fn node(&self, id: &str) -> Result<&FlagNode, FlagError> {
        self.nodes.get(id).ok_or_else(|| FlagError::Unknown {
            id: id.to_owned(),
        })
    }
}
