//! Structured markup format, flattened to dotted keys.
//!
//! Responsibilities:
//! - Parse XML into flat entries: nested element names join with `.`,
//!   attributes append their name to the element path, non-blank text
//!   content lands on the element path itself.
//!
//! Does NOT handle:
//! - Schema validation; any well-formed document is accepted.
//! - Preserving repeated siblings; the last occurrence wins, like any other
//!   duplicate key.

use std::io::{BufReader, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

use super::{Loader, ParseError};
use crate::locator::Locator;
use crate::map::PropertyMap;

/// Loader for XML resources, matched on the `xml` extension.
#[derive(Debug, Default)]
pub struct XmlLoader;

impl XmlLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Loader for XmlLoader {
    fn name(&self) -> &str {
        "xml"
    }

    fn accept(&self, locator: &Locator) -> bool {
        locator
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
    }

    fn load(&self, map: &mut PropertyMap, stream: &mut dyn Read) -> Result<(), ParseError> {
        let mut reader = Reader::from_reader(BufReader::new(stream));
        let config = reader.config_mut();
        config.trim_text_start = true;
        config.trim_text_end = true;

        let decoder = reader.decoder();
        let mut path: Vec<String> = Vec::new();
        // Text accumulator per open element, aligned with `path`.
        let mut text: Vec<String> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|err| markup(reader.buffer_position(), err))?;
            match event {
                Event::Start(start) => {
                    let offset = reader.buffer_position();
                    let name = decoder
                        .decode(start.name().as_ref())
                        .map_err(|err| markup(offset, err))?
                        .into_owned();
                    let prefix = child_key(&path, &name);
                    for attr in start.attributes() {
                        let attr = attr.map_err(|err| markup(offset, err))?;
                        let key = decoder
                            .decode(attr.key.as_ref())
                            .map_err(|err| markup(offset, err))?;
                        let value = attr
                            .decode_and_unescape_value(decoder)
                            .map_err(|err| markup(offset, err))?;
                        map.insert(format!("{prefix}.{key}"), value.into_owned());
                    }
                    path.push(name);
                    text.push(String::new());
                }
                Event::Empty(empty) => {
                    let offset = reader.buffer_position();
                    let name = decoder
                        .decode(empty.name().as_ref())
                        .map_err(|err| markup(offset, err))?
                        .into_owned();
                    let prefix = child_key(&path, &name);
                    for attr in empty.attributes() {
                        let attr = attr.map_err(|err| markup(offset, err))?;
                        let key = decoder
                            .decode(attr.key.as_ref())
                            .map_err(|err| markup(offset, err))?;
                        let value = attr
                            .decode_and_unescape_value(decoder)
                            .map_err(|err| markup(offset, err))?;
                        map.insert(format!("{prefix}.{key}"), value.into_owned());
                    }
                }
                Event::Text(t) => {
                    let content = t
                        .unescape()
                        .map_err(|err| markup(reader.buffer_position(), err))?;
                    if let Some(top) = text.last_mut() {
                        top.push_str(&content);
                    }
                }
                Event::CData(cdata) => {
                    if let Some(top) = text.last_mut() {
                        top.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                    }
                }
                Event::End(_) => {
                    let content = text.pop().unwrap_or_default();
                    let trimmed = content.trim();
                    if !trimmed.is_empty() {
                        map.insert(path.join("."), trimmed.to_string());
                    }
                    path.pop();
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions.
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }
}

fn child_key(path: &[String], name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{name}", path.join("."))
    }
}

fn markup(offset: u64, err: impl std::fmt::Display) -> ParseError {
    ParseError::Markup {
        offset,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    fn parse(input: &str) -> Result<PropertyMap, ParseError> {
        let mut map = PropertyMap::new();
        XmlLoader::new().load(&mut map, &mut input.as_bytes())?;
        Ok(map)
    }

    #[test]
    fn test_accepts_only_xml_extension() {
        let loader = XmlLoader::new();
        assert!(loader.accept(&Locator::parse("file:///conf/app.xml").unwrap()));
        assert!(loader.accept(&Locator::parse("file:///conf/APP.XML").unwrap()));
        assert!(!loader.accept(&Locator::parse("file:///conf/app.properties").unwrap()));
        assert!(!loader.accept(&Locator::parse("file:///conf/app").unwrap()));
    }

    #[test]
    fn test_nested_elements_become_dotted_keys() {
        let map = parse(
            "<server>\n  <host>localhost</host>\n  <port>8089</port>\n</server>",
        )
        .unwrap();
        assert_eq!(map.get("server.host"), Some("localhost"));
        assert_eq!(map.get("server.port"), Some("8089"));
        assert!(!map.contains_key("server"));
    }

    #[test]
    fn test_attributes_append_to_element_path() {
        let map = parse(r#"<server host="localhost"><port max="10">8089</port></server>"#).unwrap();
        assert_eq!(map.get("server.host"), Some("localhost"));
        assert_eq!(map.get("server.port.max"), Some("10"));
        assert_eq!(map.get("server.port"), Some("8089"));
    }

    #[test]
    fn test_empty_element_attributes() {
        let map = parse(r#"<conf><db url="postgres://db/app"/></conf>"#).unwrap();
        assert_eq!(map.get("conf.db.url"), Some("postgres://db/app"));
    }

    #[test]
    fn test_root_text_content() {
        let map = parse("<greeting>  hello  </greeting>").unwrap();
        assert_eq!(map.get("greeting"), Some("hello"));
    }

    #[test]
    fn test_repeated_siblings_last_wins() {
        let map = parse("<list><item>one</item><item>two</item></list>").unwrap();
        assert_eq!(map.get("list.item"), Some("two"));
    }

    #[test]
    fn test_entity_escapes_decoded() {
        let map = parse("<m><v>a &amp; b &lt;ok&gt;</v></m>").unwrap();
        assert_eq!(map.get("m.v"), Some("a & b <ok>"));
    }

    #[test]
    fn test_cdata_treated_as_text() {
        let map = parse("<m><v><![CDATA[1 < 2]]></v></m>").unwrap();
        assert_eq!(map.get("m.v"), Some("1 < 2"));
    }

    #[test]
    fn test_mismatched_end_tag_is_a_markup_error() {
        let err = parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, ParseError::Markup { .. }));
    }

    #[test]
    fn test_merges_without_clearing_existing_entries() {
        let mut map = PropertyMap::new();
        map.insert("existing", "kept");
        XmlLoader::new()
            .load(&mut map, &mut "<a><b>1</b></a>".as_bytes())
            .unwrap();
        assert_eq!(map.get("existing"), Some("kept"));
        assert_eq!(map.get("a.b"), Some("1"));
    }
}
