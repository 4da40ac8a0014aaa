use super::{Field, Operation, Specable, field, spec_node};
use crate::Verb;

/// The operations available at one path, one slot per HTTP verb.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    get: Option<Operation>,
    put: Option<Operation>,
    post: Option<Operation>,
    delete: Option<Operation>,
    patch: Option<Operation>,
}

impl PathItem {
    /// Creates an empty path item.
    pub fn new() -> Self {
        Self::default()
    }

    /// The operation slot for a verb.
    pub fn slot(&self, verb: Verb) -> Option<&Operation> {
        match verb {
            Verb::Get => self.get.as_ref(),
            Verb::Put => self.put.as_ref(),
            Verb::Post => self.post.as_ref(),
            Verb::Delete => self.delete.as_ref(),
            Verb::Patch => self.patch.as_ref(),
        }
    }

    /// Mutable access to the operation slot for a verb.
    pub fn slot_mut(&mut self, verb: Verb) -> &mut Option<Operation> {
        match verb {
            Verb::Get => &mut self.get,
            Verb::Put => &mut self.put,
            Verb::Post => &mut self.post,
            Verb::Delete => &mut self.delete,
            Verb::Patch => &mut self.patch,
        }
    }

    /// Iterates over the filled slots.
    pub fn operations(&self) -> impl Iterator<Item = (Verb, &Operation)> {
        Verb::ALL
            .into_iter()
            .filter_map(|verb| self.slot(verb).map(|operation| (verb, operation)))
    }
}

impl Specable for PathItem {
    fn oas_fields(&self) -> Vec<Field<'_>> {
        vec![
            field("get", &self.get),
            field("put", &self.put),
            field("post", &self.post),
            field("delete", &self.delete),
            field("patch", &self.patch),
        ]
    }
}

spec_node!(PathItem);
