//! Incremental PDF serialization.
//!
//! Objects are written to the output as soon as they are complete;
//! only the document skeleton (resources, pages tree, catalog) is
//! buffered until `finish`, when the cross-reference table and trailer
//! are appended.

use lopdf::xref::{Xref, XrefEntry, XrefType};
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    xref: Xref,
    max_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    font_dict: Dictionary,
    xobjects: Dictionary,
    page_ids: Vec<ObjectId>,
    buffered_objects: BTreeMap<ObjectId, Object>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut writer: W, version: &str, font_dict: Dictionary) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{version}\n%âãÏÓ\n").as_bytes())?;

        let resources_id = (1, 0);
        let pages_id = (2, 0);
        let catalog_id = (3, 0);

        Ok(Self {
            writer,
            xref: Xref::new(0, XrefType::CrossReferenceTable),
            max_id: 3,
            catalog_id,
            pages_id,
            resources_id,
            font_dict,
            xobjects: Dictionary::new(),
            page_ids: Vec::new(),
            buffered_objects: BTreeMap::new(),
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    /// Writes an object to the output immediately and registers it in
    /// the cross-reference table.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        let offset = self.writer.stream_position()?;
        self.xref.insert(
            id.0,
            XrefEntry::Normal { offset: offset as u32, generation: id.1 as u16 },
        );
        write!(self.writer, "{} {} obj\n", id.0, id.1)?;
        serialize::write_object(&mut self.writer, &object)?;
        writeln!(self.writer, "\nendobj")?;
        Ok(id)
    }

    pub fn write_stream(&mut self, stream: Stream) -> io::Result<ObjectId> {
        self.write_object(Object::Stream(stream))
    }

    /// Registers an image XObject under the given resource name.
    pub fn register_xobject(&mut self, name: &str, id: ObjectId) {
        self.xobjects.set(name.as_bytes().to_vec(), Object::Reference(id));
    }

    pub fn push_page_id(&mut self, id: ObjectId) {
        self.page_ids.push(id);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Writes the buffered skeleton, the cross-reference table and the
    /// trailer, then hands the underlying writer back.
    pub fn finish(mut self) -> io::Result<W> {
        let mut resources = dictionary! { "Font" => self.font_dict.clone() };
        if !self.xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(self.xobjects.clone()));
        }
        self.buffered_objects.insert(self.resources_id, resources.into());

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.buffered_objects.insert(self.pages_id, pages_dict.into());

        let catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.buffered_objects.insert(self.catalog_id, catalog_dict.into());

        let buffered = std::mem::take(&mut self.buffered_objects);
        for (id, object) in &buffered {
            let offset = self.writer.stream_position()?;
            self.xref.insert(
                id.0,
                XrefEntry::Normal { offset: offset as u32, generation: id.1 as u16 },
            );
            write!(self.writer, "{} {} obj\n", id.0, id.1)?;
            serialize::write_object(&mut self.writer, object)?;
            writeln!(self.writer, "\nendobj")?;
        }

        let xref_start = self.writer.stream_position()?;
        self.xref.size = self.max_id + 1;
        serialize::write_xref(&mut self.writer, &self.xref, self.max_id)?;

        let trailer = dictionary! { "Size" => self.xref.size as i64, "Root" => self.catalog_id };
        writeln!(self.writer, "trailer")?;
        serialize::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref")?;
        writeln!(self.writer, "{xref_start}")?;
        write!(self.writer, "%%EOF")?;

        self.writer.flush()?;
        Ok(self.writer)
    }
}

mod serialize {
    use super::*;

    pub fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
        match object {
            Object::Null => writer.write_all(b"null"),
            Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => write!(writer, "{i}"),
            Object::Real(r) => write!(writer, "{r:.3}"),
            Object::Name(n) => {
                writer.write_all(b"/")?;
                writer.write_all(n)
            }
            Object::String(s, format) => match format {
                StringFormat::Literal => {
                    writer.write_all(b"(")?;
                    for &byte in s {
                        if byte == b'(' || byte == b')' || byte == b'\\' {
                            writer.write_all(b"\\")?;
                        }
                        writer.write_all(&[byte])?;
                    }
                    writer.write_all(b")")
                }
                StringFormat::Hexadecimal => {
                    write!(
                        writer,
                        "<{}>",
                        s.iter().map(|b| format!("{b:02X}")).collect::<String>()
                    )
                }
            },
            Object::Array(arr) => {
                writer.write_all(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        writer.write_all(b" ")?;
                    }
                    write_object(writer, obj)?;
                }
                writer.write_all(b"]")
            }
            Object::Dictionary(dict) => write_dictionary(writer, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                write_dictionary(writer, &dict)?;
                writer.write_all(b"\nstream\n")?;
                writer.write_all(&stream.content)?;
                writer.write_all(b"\nendstream")
            }
            Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
        }
    }

    pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        writer.write_all(b"<<")?;
        let sorted_keys: BTreeMap<_, _> = dict.iter().collect();
        for (key, value) in sorted_keys {
            writer.write_all(b"/")?;
            writer.write_all(key)?;
            writer.write_all(b" ")?;
            write_object(writer, value)?;
            writer.write_all(b" ")?;
        }
        writer.write_all(b">>")
    }

    /// Writes one contiguous xref section covering object ids 0..=max.
    /// Every id the writer hands out is used, so gaps only appear if an
    /// object was never written; those are emitted as free entries.
    pub fn write_xref<W: Write>(writer: &mut W, xref: &Xref, max_id: u32) -> io::Result<()> {
        writeln!(writer, "xref")?;
        writeln!(writer, "0 {}", max_id + 1)?;
        writeln!(writer, "0000000000 65535 f ")?;
        for id in 1..=max_id {
            match xref.entries.get(&id) {
                Some(XrefEntry::Normal { offset, generation }) => {
                    writeln!(writer, "{offset:010} {generation:05} n ")?;
                }
                _ => writeln!(writer, "0000000000 65535 f ")?,
            }
        }
        Ok(())
    }
}
