//! Tooltip text for memory cells and the records that own them
//!
//! Two questions get answered for every drawn row:
//!
//! - [`describe_value`]: what do these bits mean, given their static type?
//! - [`describe_reference`]: which variable or frame link lives here, and
//!   what does it currently hold?
//!
//! # Bounded dereferencing
//!
//! Pointers are followed exactly one hop and arrays are expanded exactly one
//! level. A self-referencing structure (`p = &p`, a cyclic list) therefore
//! renders in bounded time without cycle detection.

use crate::memory::types::{array_parts, cell_span, explain, is_array, is_function, is_pointer, pointee, TypeNode};
use crate::memory::value::{format_cell, Address, MemoryCell};
use crate::memory::MemoryView;
use crate::records::{RecordDetail, RecordDetailsMap, VariableDetail};

/// Placeholder for an element or target with no recorded cell
pub const GARBAGE_VALUE: &str = "Garbage Value";

/// Content shown in a row whose literal renders empty
pub const EMPTY_CONTENT: &str = "empty";

/// Explain the value held in a cell
pub fn describe_value(cell: &MemoryCell, view: &MemoryView, map: &RecordDetailsMap) -> String {
    let int_value = cell.int_value();
    let Some(chain) = cell.type_chain() else {
        return format!("unknown {}", int_value);
    };

    match &chain[0] {
        TypeNode::BaseType { .. } => format_cell(cell),
        TypeNode::Pointer => describe_pointer(int_value, pointee(chain), view, map),
        TypeNode::Array { .. } | TypeNode::Parameters => String::new(),
    }
}

fn describe_pointer(
    target: i64,
    pointee_type: &[TypeNode],
    view: &MemoryView,
    map: &RecordDetailsMap,
) -> String {
    let Some(first) = pointee_type.first() else {
        return format!("pointer {}", target);
    };

    match first {
        TypeNode::Parameters => match map.function(target) {
            Some(function) => format!("pointer to function {}", function.func_name),
            None => "pointer to unknown function".to_string(),
        },
        TypeNode::Array { .. } => {
            let items = match Address::try_from(target) {
                Ok(base) => format_array_items(base, pointee_type, view),
                Err(_) => array_parts(pointee_type)
                    .map(|(size, _)| vec![GARBAGE_VALUE.to_string(); size])
                    .unwrap_or_default(),
            };
            format!("pointer to array of [{}]", items.join(", "))
        }
        TypeNode::BaseType { .. } | TypeNode::Pointer => match view.resolve_pointer(target) {
            Some(value) => format!("pointer to {}", format_target(value)),
            None => "pointer to garbage value".to_string(),
        },
    }
}

/// Literal for a cell reached through a pointer or an array.
///
/// Untyped targets show their raw integer value.
fn format_target(cell: &MemoryCell) -> String {
    match cell.type_chain() {
        Some(_) => format_cell(cell),
        None => cell.int_value().to_string(),
    }
}

/// Format every element of an array laid out at `base`.
///
/// Elements are one [`cell_span`] apart; each is formatted from its own cell
/// or reported as garbage. An element whose address overflows is garbage too.
pub fn format_array_items(base: Address, array_type: &[TypeNode], view: &MemoryView) -> Vec<String> {
    let Some((size, element)) = array_parts(array_type) else {
        return Vec::new();
    };
    let stride = cell_span(element);

    (0..size as u64)
        .map(|index| {
            index
                .checked_mul(stride)
                .and_then(|offset| base.checked_add(offset))
                .and_then(|address| view.resolve(address))
                .map(format_target)
                .unwrap_or_else(|| GARBAGE_VALUE.to_string())
        })
        .collect()
}

/// Explain one symbolic record
pub fn describe_reference(detail: &RecordDetail, view: &MemoryView, map: &RecordDetailsMap) -> String {
    match detail {
        RecordDetail::StackPointer(sp) => format!("Stack pointer for function {}", sp.func_name),
        RecordDetail::Variable(var) => describe_variable(var, view, map),
        RecordDetail::Function(_) => String::new(),
    }
}

fn describe_variable(var: &VariableDetail, view: &MemoryView, map: &RecordDetailsMap) -> String {
    let mut text = format!("Variable {} for function {}", var.var_name, var.func_name);
    text.push_str(&format!("\nType: {}", explain(&var.var_type)));

    if is_pointer(&var.var_type) {
        if let Some(pointer) = view.resolve(var.address) {
            let target = pointer.int_value();
            let target_type = pointee(&var.var_type);
            if is_function(target_type) {
                if let Some(function) = map.function(target) {
                    text.push_str(&format!("\nValue: Pointer to function {}", function.func_name));
                }
            } else {
                let dereferenced = view
                    .resolve_pointer(target)
                    .map(format_target)
                    .unwrap_or_else(|| GARBAGE_VALUE.to_string());
                text.push_str(&format!("\nDereferenced Value: {}", dereferenced));
            }
        }
    }

    if is_array(&var.var_type) {
        let items = format_array_items(var.address, &var.var_type, view);
        text.push_str(&format!("\nArray Value: [{}]", items.join(", ")));
    }

    text
}

/// Resolved annotation carried by a drawn row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAnnotation {
    /// Literal shown inside the box
    pub content: String,
    /// Owner summary shown beside the box
    pub label: String,
    /// Full hover text
    pub tooltip: String,
}

/// Annotate one recorded cell with everything that lives at its address
pub fn annotate_row(
    cell: &MemoryCell,
    details: &[RecordDetail],
    view: &MemoryView,
    map: &RecordDetailsMap,
) -> RowAnnotation {
    let content = match format_cell(cell) {
        s if s.is_empty() => EMPTY_CONTENT.to_string(),
        s => s,
    };

    let value_text = format!("Actual memory value:\n{}", describe_value(cell, view, map));
    let tooltip = if details.is_empty() {
        value_text
    } else {
        let references = details
            .iter()
            .map(|detail| describe_reference(detail, view, map))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{}\n\n{}", references, value_text)
    };

    RowAnnotation {
        content,
        label: owner_label(details),
        tooltip,
    }
}

/// Short owner summary: the first record, with ", ..." when others share the slot
pub fn owner_label(details: &[RecordDetail]) -> String {
    let more = if details.len() > 1 { ", ..." } else { "" };
    match details.first() {
        Some(RecordDetail::StackPointer(sp)) => format!("{} stack pointer", sp.func_name),
        Some(RecordDetail::Variable(var)) => format!("{}.{}{}", var.func_name, var.var_name, more),
        Some(RecordDetail::Function(_)) | None => String::new(),
    }
}
