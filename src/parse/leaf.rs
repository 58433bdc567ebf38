//! Leaf flag-block decoding: `<nodeId>{<course><enforced><prereq><coreq><grade>}`.

use super::ParseError;
use crate::graph::types::{CourseRef, LeafFlags};

const FLAG_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<'a> {
    pub node_id: &'a str,
    pub flags: LeafFlags,
}

impl Leaf<'_> {
    /// Course reference for leaves flagged as courses whose id splits into
    /// `CODE#CATALOG`.
    pub fn course(&self) -> Option<CourseRef> {
        if self.flags.is_course_reference {
            CourseRef::from_node_id(self.node_id)
        } else {
            None
        }
    }
}

pub fn decode_leaf(span: &str) -> Result<Leaf<'_>, ParseError> {
    let malformed = |reason: &str| ParseError::MalformedLeaf {
        leaf: span.to_string(),
        reason: reason.to_string(),
    };

    let (node_id, block) = span
        .split_once('{')
        .ok_or_else(|| malformed("missing '{'"))?;
    if node_id.is_empty() {
        return Err(malformed("empty node id"));
    }
    let block = block
        .strip_suffix('}')
        .ok_or_else(|| malformed("missing closing '}'"))?;

    let mut chars = block.chars();
    let mut flags = [false; FLAG_COUNT];
    for flag in flags.iter_mut() {
        *flag = match chars.next() {
            Some('t') => true,
            Some('f') => false,
            Some(other) => {
                return Err(malformed(&format!("flag character '{}' is not 't' or 'f'", other)));
            }
            None => return Err(malformed("fewer than four flag characters")),
        };
    }

    let [is_course_reference, is_enforced, is_prerequisite, is_corequisite] = flags;
    Ok(Leaf {
        node_id,
        flags: LeafFlags {
            is_course_reference,
            is_enforced,
            is_prerequisite,
            is_corequisite,
            minimum_grade: chars.as_str().to_string(),
        },
    })
}
