// Program state captured at a breakpoint pause

use crate::errors::{Result, VisualizerError};
use crate::memory::types::TypeChain;
use crate::memory::value::Address;
use crate::memory::MemorySnapshot;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Symbol bound by a scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subtype", rename_all = "snake_case")]
pub enum Record {
    Variable {
        #[serde(rename = "variableType")]
        var_type: TypeChain,
        address: Address,
    },
    #[serde(rename = "func")]
    FunctionBinding {
        #[serde(rename = "funcIndex")]
        func_index: u64,
    },
}

/// A named record in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeEntry {
    pub name: String,
    #[serde(flatten)]
    pub record: Record,
}

/// One lexical scope, linked to its enclosing scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableScope {
    #[serde(default)]
    pub records: Vec<ScopeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<VariableScope>>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a nested scope whose parent is `self`
    pub fn nested(self) -> Self {
        VariableScope {
            records: Vec::new(),
            parent: Some(Box::new(self)),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, var_type: TypeChain, address: Address) -> Self {
        self.records.push(ScopeEntry {
            name: name.into(),
            record: Record::Variable { var_type, address },
        });
        self
    }

    pub fn with_function(mut self, name: impl Into<String>, func_index: u64) -> Self {
        self.records.push(ScopeEntry {
            name: name.into(),
            record: Record::FunctionBinding { func_index },
        });
        self
    }

    /// This scope followed by every enclosing scope, innermost first
    pub fn chain(&self) -> impl Iterator<Item = &VariableScope> {
        std::iter::successors(Some(self), |scope| scope.parent.as_deref())
    }
}

/// Symbol-table view of one active function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeFrame {
    pub name: String,
    #[serde(rename = "varScope")]
    pub variables: VariableScope,
}

impl ScopeFrame {
    pub fn new(name: impl Into<String>, variables: VariableScope) -> Self {
        ScopeFrame {
            name: name.into(),
            variables,
        }
    }
}

/// Everything the visualizer reads from a paused execution engine.
///
/// All four views must describe the same pause.
pub trait ExecutionState {
    fn stack_snapshot(&self) -> &MemorySnapshot;
    fn heap_snapshot(&self) -> &MemorySnapshot;
    fn scope_frames(&self) -> &[ScopeFrame];
    /// Address of the innermost saved frame link, or -1 with no frames
    fn stack_top(&self) -> i64;
}

/// Owned program state, as handed over at a pause or loaded from disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramState {
    pub stack: MemorySnapshot,
    pub heap: MemorySnapshot,
    pub frames: Vec<ScopeFrame>,
    #[serde(rename = "stackTop")]
    pub stack_top: i64,
}

impl ProgramState {
    /// Copy every view out of a live execution engine
    pub fn capture<S: ExecutionState + ?Sized>(state: &S) -> Self {
        ProgramState {
            stack: state.stack_snapshot().clone(),
            heap: state.heap_snapshot().clone(),
            frames: state.scope_frames().to_vec(),
            stack_top: state.stack_top(),
        }
    }

    /// Load a snapshot file in JSON form
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VisualizerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl ExecutionState for ProgramState {
    fn stack_snapshot(&self) -> &MemorySnapshot {
        &self.stack
    }

    fn heap_snapshot(&self) -> &MemorySnapshot {
        &self.heap
    }

    fn scope_frames(&self) -> &[ScopeFrame] {
        &self.frames
    }

    fn stack_top(&self) -> i64 {
        self.stack_top
    }
}
