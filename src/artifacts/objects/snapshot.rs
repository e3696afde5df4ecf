//! Commit snapshots
//!
//! A snapshot maps every tracked file name to the blob holding its content at a
//! given commit. Names are kept sorted so serialization (and therefore the commit
//! digest) is deterministic.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::collections::btree_map;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    files: BTreeMap<String, ObjectId>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ObjectId> {
        self.files.get(name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn insert(&mut self, name: String, oid: ObjectId) -> Option<ObjectId> {
        self.files.insert(name, oid)
    }

    pub fn remove(&mut self, name: &str) -> Option<ObjectId> {
        self.files.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.files.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ObjectId> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, ObjectId)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (String, ObjectId)>>(iter: T) -> Self {
        Snapshot {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'s> IntoIterator for &'s Snapshot {
    type Item = (&'s String, &'s ObjectId);
    type IntoIter = btree_map::Iter<'s, String, ObjectId>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
