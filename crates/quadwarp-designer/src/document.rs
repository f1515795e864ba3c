//! SVG document model
//!
//! A lightweight view of an SVG file: the source text is kept verbatim, every
//! element carrying an `id` is indexed, and individual `d` attributes can be
//! replaced. Rendering re-streams the source through `quick-xml` so that
//! comments, namespaces, whitespace and unrelated attributes survive
//! untouched.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::DocumentError;

/// An element found in the document by its `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    pub id: String,
    /// Local tag name without namespace prefix (`path`, `rect`, ...)
    pub tag: String,
    /// Current value of the `d` attribute, if any
    pub path_data: Option<String>,
    /// Position of the element among all start tags, in document order
    ordinal: usize,
}

impl SvgElement {
    pub fn is_path(&self) -> bool {
        self.tag == "path"
    }
}

#[derive(Debug, Clone)]
pub struct SvgDocument {
    source: String,
    elements: Vec<SvgElement>,
    by_id: HashMap<String, usize>,
    width: Option<String>,
    height: Option<String>,
    rewrites: HashMap<usize, String>,
}

impl SvgDocument {
    /// Scan `source` and index its elements.
    ///
    /// The first element must be `<svg>`. When several elements share an id
    /// the first one in document order wins.
    pub fn parse(source: String) -> Result<Self, DocumentError> {
        let mut elements = Vec::new();
        let mut by_id = HashMap::new();
        let mut root: Option<(Option<String>, Option<String>)> = None;

        {
            let mut reader = Reader::from_str(&source);
            let mut ordinal = 0usize;

            loop {
                match reader.read_event()? {
                    Event::Eof => break,
                    Event::Start(ref e) | Event::Empty(ref e) => {
                        let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                        let attrs = read_attributes(e, &["id", "d", "width", "height"])?;

                        if root.is_none() {
                            if tag != "svg" {
                                return Err(DocumentError::MissingRoot);
                            }
                            root = Some((attrs[2].clone(), attrs[3].clone()));
                        }

                        if let Some(id) = attrs[0].clone() {
                            if !by_id.contains_key(&id) {
                                by_id.insert(id.clone(), elements.len());
                                elements.push(SvgElement {
                                    id,
                                    tag,
                                    path_data: attrs[1].clone(),
                                    ordinal,
                                });
                            }
                        }
                        ordinal += 1;
                    }
                    _ => {}
                }
            }
        }

        let (width, height) = root.ok_or(DocumentError::MissingRoot)?;
        tracing::debug!(elements = elements.len(), "indexed SVG document");

        Ok(Self {
            source,
            elements,
            by_id,
            width,
            height,
            rewrites: HashMap::new(),
        })
    }

    /// Read and parse a document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(source)
    }

    /// Render and write the document to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        std::fs::write(path, self.render()?)?;
        Ok(())
    }

    pub fn element(&self, id: &str) -> Option<&SvgElement> {
        self.by_id.get(id).map(|&i| &self.elements[i])
    }

    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Raw `height` attribute of the root element
    pub fn height(&self) -> Option<&str> {
        self.height.as_deref()
    }

    /// Raw `width` attribute of the root element
    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    /// True once any element has been rewritten.
    pub fn is_modified(&self) -> bool {
        !self.rewrites.is_empty()
    }

    /// Replace the `d` attribute of the element with `id`.
    pub fn set_path_data(&mut self, id: &str, data: impl Into<String>) -> Result<(), DocumentError> {
        let index = *self
            .by_id
            .get(id)
            .ok_or_else(|| DocumentError::UnknownElement { id: id.to_string() })?;
        let data = data.into();
        let element = &mut self.elements[index];
        element.path_data = Some(data.clone());
        self.rewrites.insert(element.ordinal, data);
        Ok(())
    }

    /// Produce the document text with every rewrite applied.
    pub fn render(&self) -> Result<String, DocumentError> {
        if self.rewrites.is_empty() {
            return Ok(self.source.clone());
        }

        let mut reader = Reader::from_str(&self.source);
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        let mut ordinal = 0usize;

        loop {
            match reader.read_event()? {
                Event::Eof => break,
                Event::Start(e) => {
                    let e = self.rewrite_tag(e, ordinal)?;
                    ordinal += 1;
                    writer.write_event(Event::Start(e))?;
                }
                Event::Empty(e) => {
                    let e = self.rewrite_tag(e, ordinal)?;
                    ordinal += 1;
                    writer.write_event(Event::Empty(e))?;
                }
                other => writer.write_event(other)?,
            }
        }

        Ok(String::from_utf8(writer.into_inner().into_inner())?)
    }

    fn rewrite_tag<'a>(
        &self,
        e: BytesStart<'a>,
        ordinal: usize,
    ) -> Result<BytesStart<'a>, DocumentError> {
        let Some(data) = self.rewrites.get(&ordinal) else {
            return Ok(e);
        };

        let mut elem = e.to_owned();
        elem.clear_attributes();
        let mut replaced = false;
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == b"d" {
                elem.push_attribute(("d", data.as_str()));
                replaced = true;
            } else {
                elem.push_attribute(requote(attr));
            }
        }
        if !replaced {
            elem.push_attribute(("d", data.as_str()));
        }
        Ok(elem)
    }
}

/// Attributes are written back between double quotes. A raw value taken
/// from a single-quoted attribute may hold `"`, which must become `&quot;`.
/// Everything else, entity references included, is kept byte for byte.
fn requote(attr: Attribute<'_>) -> Attribute<'_> {
    if !attr.value.contains(&b'"') {
        return attr;
    }
    let value = String::from_utf8_lossy(&attr.value).replace('"', "&quot;");
    Attribute {
        key: attr.key,
        value: Cow::Owned(value.into_bytes()),
    }
}

/// Unescaped values of the requested attributes, in the order asked for.
fn read_attributes(e: &BytesStart, names: &[&str]) -> Result<Vec<Option<String>>, DocumentError> {
    let mut values = vec![None; names.len()];
    for attr in e.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if let Some(slot) = names.iter().position(|n| n.as_bytes() == key) {
            values[slot] = Some(attr.unescape_value()?.into_owned());
        }
    }
    Ok(values)
}
