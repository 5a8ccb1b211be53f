pub mod ast;
pub mod error;
pub mod index;
pub mod json;
pub mod neighbors;
pub mod parser;
pub mod shape;
pub mod tags;

use std::collections::BTreeMap;

use index::{InIndex, OutIndex};
use shape::Shape;
use tags::TagPresenceMap;

pub use error::{Error, LitError, ShapeError};
pub use index::Direction;

// ── Core API ───────────────────────────────────────────────────────

/// Structural facts about an input-direction literal: its rectangular shape
/// and where each named position lives.
#[derive(Debug, Clone, PartialEq)]
pub struct InputPattern {
    pub shape: Shape,
    pub index: InIndex,
}

/// Structural facts about an output-direction literal: its rectangular shape,
/// the name at every coordinate, and per-tag membership over all coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPattern {
    pub shape: Shape,
    pub index: OutIndex,
    pub tags: BTreeMap<String, TagPresenceMap>,
}

/// The analysis for either direction, as selected at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Input(InputPattern),
    Output(OutputPattern),
}

/// Parse an input-direction literal and map each identifier to its coordinate.
///
/// All-or-nothing: malformed text or a non-rectangular structure aborts with
/// no partial result.
pub fn parse_input(input: &str) -> Result<InputPattern, Error> {
    let tree = parser::parse(input)?;
    let shape = shape::infer_shape(&tree)?;
    let index = index::extract_in_index(&tree);
    Ok(InputPattern { shape, index })
}

/// Parse an output-direction literal: shape, coordinate-to-name map, and the
/// presence map of every tag over every coordinate.
pub fn parse_output(input: &str) -> Result<OutputPattern, Error> {
    let tree = parser::parse(input)?;
    let shape = shape::infer_shape(&tree)?;
    let index = index::extract_out_index(&tree);
    let tags = tags::aggregate_tags(&tree, &index);
    Ok(OutputPattern { shape, index, tags })
}

/// Direction-dispatched entry point for callers that pick the direction at
/// runtime (the CLI does).
pub fn parse_pattern(input: &str, direction: Direction) -> Result<Pattern, Error> {
    match direction {
        Direction::Input => parse_input(input).map(Pattern::Input),
        Direction::Output => parse_output(input).map(Pattern::Output),
    }
}

impl InputPattern {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        json::input_to_json(self, json::JsonStyle::Compact)
    }

    /// Serialize to pretty-printed JSON (2-space indent).
    pub fn to_json_pretty(&self) -> String {
        json::input_to_json(self, json::JsonStyle::Pretty)
    }
}

impl OutputPattern {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> String {
        json::output_to_json(self, json::JsonStyle::Compact)
    }

    /// Serialize to pretty-printed JSON (2-space indent).
    pub fn to_json_pretty(&self) -> String {
        json::output_to_json(self, json::JsonStyle::Pretty)
    }
}

impl Pattern {
    pub fn to_json_pretty(&self) -> String {
        match self {
            Pattern::Input(p) => p.to_json_pretty(),
            Pattern::Output(p) => p.to_json_pretty(),
        }
    }
}

#[cfg(test)]
mod tests;
