//! Arena of registered states and the links between them.
//!
//! States are addressed by [`StateId`], so cyclic graphs (a delay reused in
//! a loop, a terminal state that points at itself) need no shared ownership.

use super::error::{ConfigError, LinkSlot, StepError};
use super::io::{RangeInput, Telemetry};
use super::state::{GraphId, NextState, State, StateId, StepContext, Transition};

struct Node {
    name: String,
    kind: &'static str,
    state: Box<dyn State>,
    next: Option<StateId>,
    fallback: Option<StateId>,
}

/// Owns every state of one machine.
///
/// Each graph has its own [`GraphId`]; handles issued by another graph are
/// rejected as unknown states even when their index is in range.
pub struct StateGraph {
    id: GraphId,
    nodes: Vec<Node>,
}

impl Default for StateGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl StateGraph {
    pub fn new() -> Self {
        Self {
            id: GraphId::next(),
            nodes: Vec::new(),
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Register a state, returning its handle.
    pub fn add<S: State + 'static>(&mut self, state: S) -> Result<StateId, ConfigError> {
        self.add_boxed(Box::new(state))
    }

    pub fn add_boxed(&mut self, state: Box<dyn State>) -> Result<StateId, ConfigError> {
        let name = state.name().to_owned();
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }

        let id = StateId::new(self.id, self.nodes.len());
        self.nodes.push(Node {
            name,
            kind: state.kind(),
            state,
            next: None,
            fallback: None,
        });
        Ok(id)
    }

    /// Set `from`'s `next` link. Each link can only be set once.
    pub fn link(&mut self, from: StateId, to: StateId) -> Result<(), ConfigError> {
        self.set_link(from, to, LinkSlot::Next)
    }

    /// Set `from`'s `fallback` link. Each link can only be set once.
    pub fn link_fallback(&mut self, from: StateId, to: StateId) -> Result<(), ConfigError> {
        self.set_link(from, to, LinkSlot::Fallback)
    }

    fn set_link(&mut self, from: StateId, to: StateId, slot: LinkSlot) -> Result<(), ConfigError> {
        self.check(to)?;
        let node = self.node_mut(from)?;
        let link = match slot {
            LinkSlot::Next => &mut node.next,
            LinkSlot::Fallback => &mut node.fallback,
        };

        if link.is_some() {
            return Err(ConfigError::LinkAlreadySet {
                state: node.name.clone(),
                slot,
            });
        }

        *link = Some(to);
        Ok(())
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles of every registered state, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        let graph = self.id;
        (0..self.nodes.len()).map(move |index| StateId::new(graph, index))
    }

    pub fn name(&self, id: StateId) -> Option<&str> {
        self.get(id).map(|node| node.name.as_str())
    }

    pub fn kind(&self, id: StateId) -> Option<&'static str> {
        self.get(id).map(|node| node.kind)
    }

    pub fn next(&self, id: StateId) -> Option<StateId> {
        self.get(id).and_then(|node| node.next)
    }

    pub fn fallback(&self, id: StateId) -> Option<StateId> {
        self.get(id).and_then(|node| node.fallback)
    }

    /// `"Kind - 'name'"`, the form used in log lines.
    pub fn describe(&self, id: StateId) -> String {
        match self.get(id) {
            Some(node) => format!("{} - '{}'", node.kind, node.name),
            None => format!("unknown state {id}"),
        }
    }

    /// Turn what a state asked for into where the machine goes.
    pub fn resolve(&self, from: StateId, transition: Transition) -> Result<NextState, ConfigError> {
        let node = self.node(from)?;
        let target = match transition {
            Transition::Stay => return Ok(NextState::Same),
            Transition::Halt => return Ok(NextState::Halt),
            Transition::Next => match node.next {
                Some(next) => next,
                None if node.state.loops_by_default() => return Ok(NextState::Same),
                None => return Ok(NextState::Halt),
            },
            Transition::Fallback => match node.fallback {
                Some(fallback) => fallback,
                None => return Ok(NextState::Same),
            },
            Transition::Goto(target) => {
                self.check(target)?;
                target
            }
        };

        if target == from {
            Ok(NextState::Same)
        } else {
            Ok(NextState::Other(target))
        }
    }

    /// Step one state and resolve its answer.
    pub fn step(
        &mut self,
        id: StateId,
        tick: u64,
        telemetry: Option<&dyn Telemetry>,
    ) -> Result<NextState, StepError> {
        let node = self.node_mut(id)?;
        let mut ctx = StepContext::new(id, &node.name, tick, telemetry);
        let transition = node.state.step(&mut ctx)?;
        Ok(self.resolve(id, transition)?)
    }

    pub fn configure(&mut self, id: StateId, input: Option<&dyn RangeInput>) -> Result<(), ConfigError> {
        self.node_mut(id)?.state.configure(input);
        Ok(())
    }

    pub fn reset(&mut self, id: StateId) -> Result<(), ConfigError> {
        self.node_mut(id)?.state.reset();
        Ok(())
    }

    pub fn reset_all(&mut self) {
        for node in &mut self.nodes {
            node.state.reset();
        }
    }

    fn check(&self, id: StateId) -> Result<(), ConfigError> {
        self.node(id).map(|_| ())
    }

    fn get(&self, id: StateId) -> Option<&Node> {
        if id.graph() == self.id {
            self.nodes.get(id.index())
        } else {
            None
        }
    }

    fn node(&self, id: StateId) -> Result<&Node, ConfigError> {
        self.get(id).ok_or(ConfigError::UnknownState(id))
    }

    fn node_mut(&mut self, id: StateId) -> Result<&mut Node, ConfigError> {
        let node = if id.graph() == self.id {
            self.nodes.get_mut(id.index())
        } else {
            None
        };
        node.ok_or(ConfigError::UnknownState(id))
    }
}
