//! Read-only view of one record's attributes

use indexmap::IndexMap;
use regex::Regex;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// The capability an expression needs from a record
///
/// Implementations never need to support mutation. Maps from attribute name to
/// value implement this out of the box.
pub trait AttributeLookup {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>>;

    fn attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Names matched by `pattern`, sorted and without duplicates.
    ///
    /// Patterns arrive already anchored as `^(?:...)$`, so a match is a match
    /// of the whole name.
    fn names_matching(&self, pattern: &Regex) -> Vec<String> {
        let mut names: Vec<String> = self
            .attribute_names()
            .filter(|name| pattern.is_match(name))
            .map(str::to_owned)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl<S: BuildHasher> AttributeLookup for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }

    fn attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys().map(String::as_str))
    }
}

impl AttributeLookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }

    fn attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys().map(String::as_str))
    }
}

impl<S: BuildHasher> AttributeLookup for IndexMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }

    fn attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys().map(String::as_str))
    }
}

impl<T: AttributeLookup + ?Sized> AttributeLookup for &T {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(name)
    }

    fn attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        (**self).attribute_names()
    }

    fn names_matching(&self, pattern: &Regex) -> Vec<String> {
        (**self).names_matching(pattern)
    }
}
