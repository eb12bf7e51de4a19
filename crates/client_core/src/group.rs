//! Keyed set of transition primitives.
//!
//! Children appear in `entering` when their key becomes present, go through
//! `exiting` when it disappears, and are dropped from the set only after
//! reaching `exited`. Each child carries a payload created when it first
//! mounts; an exiting child keeps rendering the payload it had.

use std::{fmt::Display, time::Instant};

use crate::{
    direction::Direction,
    transition::{Phase, PhaseChange, Reflow, Transition, TransitionConfig, TransitionContext},
};

#[derive(Debug, Clone)]
pub struct GroupChild<K, T> {
    pub key: K,
    pub transition: Transition,
    pub payload: T,
}

impl<K, T> GroupChild<K, T> {
    pub fn is_entering_side(&self) -> bool {
        self.transition.target()
    }
}

#[derive(Debug, Clone)]
pub struct TransitionGroup<K, T = ()> {
    name: &'static str,
    config: TransitionConfig,
    children: Vec<GroupChild<K, T>>,
}

impl<K, T> TransitionGroup<K, T>
where
    K: Clone + PartialEq + Display,
{
    pub fn new(name: &'static str, config: TransitionConfig) -> Self {
        Self {
            name,
            config,
            children: Vec::new(),
        }
    }

    pub fn sync(
        &mut self,
        present: &[K],
        now: Instant,
        reflow: &mut dyn Reflow,
        mut mount: impl FnMut(&K) -> T,
    ) -> Vec<PhaseChange> {
        let mut changes = Vec::new();
        for child in &mut self.children {
            let wanted = present.contains(&child.key);
            changes.extend(child.transition.set_in(wanted, now, reflow));
        }
        for key in present {
            if self.children.iter().any(|child| &child.key == key) {
                continue;
            }
            let mut transition = Transition::new(format!("{}:{key}", self.name), self.config);
            changes.extend(transition.set_in(true, now, reflow));
            self.children.push(GroupChild {
                key: key.clone(),
                transition,
                payload: mount(key),
            });
        }
        changes
    }

    pub fn poll(&mut self, now: Instant) -> Vec<PhaseChange> {
        let changes = self
            .children
            .iter_mut()
            .filter_map(|child| child.transition.poll(now))
            .collect();
        self.children
            .retain(|child| child.transition.target() || child.transition.phase() != Phase::Exited);
        changes
    }

    pub fn children(&self) -> &[GroupChild<K, T>] {
        &self.children
    }

    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut GroupChild<K, T>> {
        self.children.iter_mut()
    }

    pub fn get(&self, key: &K) -> Option<&GroupChild<K, T>> {
        self.children.iter().find(|child| &child.key == key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut GroupChild<K, T>> {
        self.children.iter_mut().find(|child| &child.key == key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_settled(&self) -> bool {
        self.children.iter().all(|child| child.transition.is_settled())
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Wraps every child with its transition context. `direction` decides
    /// each child's slide direction from whether it is entering or leaving.
    pub fn contexts(
        &self,
        now: Instant,
        direction: impl Fn(&GroupChild<K, T>) -> Direction,
    ) -> Vec<(&GroupChild<K, T>, TransitionContext)> {
        self.children
            .iter()
            .map(|child| (child, child.transition.context(direction(child), now)))
            .collect()
    }
}

impl<K> TransitionGroup<K, ()>
where
    K: Clone + PartialEq + Display,
{
    pub fn sync_keys(
        &mut self,
        present: &[K],
        now: Instant,
        reflow: &mut dyn Reflow,
    ) -> Vec<PhaseChange> {
        self.sync(present, now, reflow, |_| ())
    }
}

#[cfg(test)]
#[path = "tests/group_tests.rs"]
mod tests;
