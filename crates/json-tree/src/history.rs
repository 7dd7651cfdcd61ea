//! Linear undo/redo history over [`Command`]s.
//!
//! Two stacks. Recording a new command clears the redo stack; undo and redo
//! only move commands between the stacks and never record anything.

use log::debug;

use crate::command::Command;
use crate::edit::EditError;
use crate::node::Node;

#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth; the oldest commands are dropped past it.
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` undo steps. A limit of 0 keeps none, so every
    /// pushed command is dropped at once.
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit), ..Self::default() }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record an already-applied command.
    pub fn push(&mut self, command: Command) {
        debug!("history push {} at {:?}", command.forward.op_name(), command.path);
        self.undo_stack.push(command);
        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn peek_undo(&self) -> Option<&Command> {
        self.undo_stack.last()
    }

    pub fn peek_redo(&self) -> Option<&Command> {
        self.redo_stack.last()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Reverse the most recent command and move it to the redo stack.
    ///
    /// Returns `Ok(None)` when there is nothing to undo. If the inverse no
    /// longer applies, both stacks are left as they were.
    pub fn undo(&mut self, root: &mut Node) -> Result<Option<&Command>, EditError> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = command.undo_on(root) {
            self.undo_stack.push(command);
            return Err(e);
        }
        debug!("undo {} at {:?}", command.forward.op_name(), command.path);
        self.redo_stack.push(command);
        Ok(self.redo_stack.last())
    }

    /// Re-apply the most recently undone command and move it back.
    pub fn redo(&mut self, root: &mut Node) -> Result<Option<&Command>, EditError> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = command.redo_on(root) {
            self.redo_stack.push(command);
            return Err(e);
        }
        debug!("redo {} at {:?}", command.forward.op_name(), command.path);
        self.undo_stack.push(command);
        Ok(self.undo_stack.last())
    }
}
