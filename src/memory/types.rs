//! Type descriptor chains
//!
//! The interpreter describes the static type of a memory cell as a chain of
//! [`TypeNode`]s, outermost first:
//!
//! ```text
//! int *p[5]     →  [Array{5}, Pointer, BaseType(int)]
//! int (*p)[5]   →  [Pointer, Array{5}, BaseType(int)]
//! int (*f)()    →  [Pointer, Parameters, BaseType(int)]
//! ```
//!
//! Everything here is a pure function of the chain: English explanations for
//! tooltips, structural predicates, and the number of address units a value
//! of the type occupies.

use serde::{Deserialize, Serialize};

/// Primitive types understood by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Char,
    Int,
    Float,
    Void,
}

impl BaseType {
    /// Human-readable name used in type explanations
    pub fn display_name(self) -> &'static str {
        match self {
            BaseType::Char => "Character",
            BaseType::Int => "Integer",
            BaseType::Float => "Float",
            BaseType::Void => "Void",
        }
    }
}

/// One node of a type descriptor chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "subtype")]
pub enum TypeNode {
    BaseType {
        #[serde(rename = "baseType")]
        base_type: BaseType,
    },
    Pointer,
    Array {
        size: usize,
    },
    /// Function signature marker
    Parameters,
}

impl TypeNode {
    pub fn base(base_type: BaseType) -> Self {
        TypeNode::BaseType { base_type }
    }

    pub fn array(size: usize) -> Self {
        TypeNode::Array { size }
    }

    fn phrase(&self) -> String {
        match self {
            TypeNode::BaseType { base_type } => base_type.display_name().to_string(),
            TypeNode::Pointer => "Pointer to".to_string(),
            TypeNode::Array { size } => format!("Array of {}", size),
            TypeNode::Parameters => "Function returning".to_string(),
        }
    }
}

/// A type descriptor chain, outermost node first
pub type TypeChain = Vec<TypeNode>;

/// Render a chain as left-to-right English, e.g. "Pointer to Array of 5 Integer"
pub fn explain(chain: &[TypeNode]) -> String {
    chain
        .iter()
        .map(TypeNode::phrase)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_array(chain: &[TypeNode]) -> bool {
    matches!(chain.first(), Some(TypeNode::Array { .. }))
}

pub fn is_pointer(chain: &[TypeNode]) -> bool {
    matches!(chain.first(), Some(TypeNode::Pointer))
}

pub fn is_function(chain: &[TypeNode]) -> bool {
    matches!(chain.first(), Some(TypeNode::Parameters))
}

/// Number of leading pointer nodes
pub fn pointer_depth(chain: &[TypeNode]) -> usize {
    chain
        .iter()
        .take_while(|node| matches!(node, TypeNode::Pointer))
        .count()
}

/// Type of the value a pointer chain points at.
///
/// Drops the first node when it is a pointer; any other chain is returned
/// unchanged.
pub fn pointee(chain: &[TypeNode]) -> &[TypeNode] {
    if is_pointer(chain) {
        &chain[1..]
    } else {
        chain
    }
}

/// Element type and length of an array chain, `None` for non-arrays
pub fn array_parts(chain: &[TypeNode]) -> Option<(usize, &[TypeNode])> {
    match chain.first() {
        Some(TypeNode::Array { size }) => Some((*size, &chain[1..])),
        _ => None,
    }
}

/// Number of address units occupied by a value of this type.
///
/// Every scalar (base type, pointer, function handle) fills exactly one
/// address; arrays are laid out contiguously. A span too large for the
/// address space saturates at `u64::MAX`.
pub fn cell_span(chain: &[TypeNode]) -> u64 {
    match array_parts(chain) {
        Some((size, element)) => (size as u64).saturating_mul(cell_span(element)),
        None => 1,
    }
}
