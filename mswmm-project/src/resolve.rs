//! Cross-reference resolution over the flat record container.
//!
//! The schema has no nesting: every record sits directly under one flat
//! container element, and relations exist only through identifier-valued
//! attributes. Reconstruction is graph dereferencing over siblings, not
//! tree descent.

use roxmltree::Node;
use std::collections::HashMap;

/// Identifier attribute linking records.
pub(crate) const ATTR_UID: &str = "UID";
const ATTR_FILE_ID: &str = "FileID";
const TAG_FILE_INFO: &str = "FileInfo";

/// First direct child of `scope` carrying `attr == value`, optionally
/// restricted to `tag`.
///
/// Only direct children are searched; several record kinds are untyped in
/// the schema, so `tag = None` matches any element. Returns `None` when
/// nothing matches; whether absence is fatal is for the caller to judge.
pub(crate) fn child_with_attr<'a, 'i>(
    scope: Node<'a, 'i>,
    tag: Option<&str>,
    attr: &str,
    value: &str,
) -> Option<Node<'a, 'i>> {
    scope
        .children()
        .filter(|n| n.is_element())
        .filter(|n| tag.map_or(true, |t| n.tag_name().name() == t))
        .find(|n| n.attribute(attr) == Some(value))
}

/// First direct child of `scope` with the given tag.
pub(crate) fn first_child<'a, 'i>(scope: Node<'a, 'i>, tag: &str) -> Option<Node<'a, 'i>> {
    scope
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
}

/// One-time identifier index over the record container.
///
/// Identifiers are expected to be unique per document; on duplicates the
/// first occurrence in document order wins. Tag-filtered lookups verify
/// the tag on the indexed record and fall back to a linear scan, so the
/// first matching record is returned even when a duplicate identifier
/// shadows it.
pub(crate) struct RecordIndex<'a, 'i> {
    scope: Node<'a, 'i>,
    by_uid: HashMap<&'a str, Node<'a, 'i>>,
    file_by_id: HashMap<&'a str, Node<'a, 'i>>,
}

impl<'a, 'i> RecordIndex<'a, 'i> {
    pub fn new(scope: Node<'a, 'i>) -> Self {
        let mut by_uid = HashMap::new();
        let mut file_by_id = HashMap::new();
        for node in scope.children().filter(|n| n.is_element()) {
            if let Some(uid) = node.attribute(ATTR_UID) {
                by_uid.entry(uid).or_insert(node);
            }
            if node.tag_name().name() == TAG_FILE_INFO {
                if let Some(id) = node.attribute(ATTR_FILE_ID) {
                    file_by_id.entry(id).or_insert(node);
                }
            }
        }
        Self {
            scope,
            by_uid,
            file_by_id,
        }
    }

    /// Record with the given `UID`, any tag.
    pub fn by_uid(&self, uid: &str) -> Option<Node<'a, 'i>> {
        self.by_uid.get(uid).copied()
    }

    /// Record with the given `UID` and tag.
    pub fn by_uid_tagged(&self, tag: &str, uid: &str) -> Option<Node<'a, 'i>> {
        match self.by_uid(uid) {
            Some(node) if node.tag_name().name() == tag => Some(node),
            _ => child_with_attr(self.scope, Some(tag), ATTR_UID, uid),
        }
    }

    /// `FileInfo` record with the given `FileID`.
    pub fn file_info(&self, file_id: &str) -> Option<Node<'a, 'i>> {
        self.file_by_id.get(file_id).copied()
    }
}

/// Attribute parsed as `f64`, defaulting on absence or malformation.
pub(crate) fn attr_f64_or(node: Node<'_, '_>, name: &str, default: f64) -> f64 {
    node.attribute(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn attr_f64(node: Node<'_, '_>, name: &str) -> f64 {
    attr_f64_or(node, name, 0.0)
}

pub(crate) fn attr_u64(node: Node<'_, '_>, name: &str) -> u64 {
    node.attribute(name).and_then(|v| v.parse().ok()).unwrap_or(0)
}

pub(crate) fn attr_u32(node: Node<'_, '_>, name: &str) -> u32 {
    node.attribute(name).and_then(|v| v.parse().ok()).unwrap_or(0)
}

/// Integer attribute read as a flag; nonzero means set.
pub(crate) fn attr_flag(node: Node<'_, '_>, name: &str) -> bool {
    attr_u64(node, name) != 0
}
