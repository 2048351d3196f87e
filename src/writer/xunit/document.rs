// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Minimal mutable XML document.

use std::io;

use linked_hash_map::LinkedHashMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::WriterResult;

/// XML element with ordered attributes and child elements.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element {
    tag: String,
    attributes: LinkedHashMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates a new [`Element`] without attributes and children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: LinkedHashMap::new(),
            children: vec![],
        }
    }

    /// Sets the given attribute, returning this [`Element`].
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the tag name of this [`Element`].
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Sets the given attribute.
    ///
    /// Overwriting an existing attribute keeps its position.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self.attributes.get_mut(name) {
            *existing = value;
        } else {
            _ = self.attributes.insert(name.to_owned(), value);
        }
    }

    /// Returns the value of the given attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Iterates over attributes of this [`Element`] in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Appends the given `child`, returning its index.
    pub fn push(&mut self, child: Self) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Returns child elements of this [`Element`].
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the child at the given `index`.
    #[must_use]
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Self> {
        self.children.get_mut(index)
    }

    /// Returns the first child with the given `tag`.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Iterates over all the children with the given `tag`.
    pub fn find_all<'s>(
        &'s self,
        tag: &'s str,
    ) -> impl Iterator<Item = &'s Self> + 's {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Writes this [`Element`] as an XML document, with a declaration, into
    /// the given `output`.
    ///
    /// # Errors
    ///
    /// If the `output` fails to be written into.
    pub fn write_document<Out: io::Write>(&self, output: Out) -> WriterResult<()> {
        let mut writer = quick_xml::Writer::new_with_indent(output, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.write_to(&mut writer)?;
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    fn write_to<Out: io::Write>(
        &self,
        writer: &mut quick_xml::Writer<Out>,
    ) -> WriterResult<()> {
        let start = BytesStart::new(self.tag.as_str()).with_attributes(
            self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
        } else {
            writer.write_event(Event::Start(start))?;
            for child in &self.children {
                child.write_to(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        }
        Ok(())
    }
}
