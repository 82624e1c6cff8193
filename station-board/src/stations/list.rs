//! Station list document parsing.
//!
//! The document format is a flat list of stations under a single root:
//!
//! ```xml
//! <stations>
//!   <station>
//!     <name>Roma Termini</name>
//!     <pos>41.901,12.501</pos>
//!   </station>
//! </stations>
//! ```
//!
//! Unknown elements anywhere in the document are skipped together with
//! their entire subtree, as forward compatibility with extensions. The
//! skip is literal: a `station` nested inside an unknown element is not
//! recognized.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::domain::{GeoPoint, Station};

use super::error::LoadError;

/// An ordered station list, loaded wholesale from a document.
///
/// The list is immutable once loaded; reloading means loading a fresh
/// list and replacing this one. A failed load never yields a partial
/// list, so callers can keep the previous list on error.
#[derive(Debug, Clone, Default)]
pub struct StationList {
    stations: Vec<Station>,
}

impl StationList {
    /// Load a station list from the document at `path`.
    ///
    /// Runs to completion on the calling thread with blocking reads.
    /// The file handle is held only for the duration of the call.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading station list");

        let file = File::open(path).map_err(LoadError::CannotOpen)?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        reader.trim_text(true);

        let stations = DocumentReader::new(reader).read_document()?;
        debug!(count = stations.len(), "station list loaded");

        Ok(Self { stations })
    }

    /// Number of stations in the list.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True if the list holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// The station at `index`, in document order.
    pub fn get(&self, index: usize) -> Option<&Station> {
        self.stations.get(index)
    }

    /// Iterate the stations in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.stations.iter()
    }

    /// The stations as a slice, in document order.
    pub fn as_slice(&self) -> &[Station] {
        &self.stations
    }
}

impl<'a> IntoIterator for &'a StationList {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

/// Recursive-descent reader over the pull tokenizer, one method per
/// element context.
struct DocumentReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> DocumentReader<R> {
    fn new(reader: Reader<R>) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    fn next_event(&mut self) -> Result<Event<'static>, LoadError> {
        self.buf.clear();
        Ok(self.reader.read_event_into(&mut self.buf)?.into_owned())
    }

    /// Read the whole document: one `stations` root, then end of input.
    fn read_document(&mut self) -> Result<Vec<Station>, LoadError> {
        let stations = loop {
            match self.next_event()? {
                Event::Start(e) => {
                    if e.name().as_ref() == b"stations" {
                        break self.read_stations()?;
                    }
                    return Err(LoadError::InvalidFormat(format!(
                        "unexpected root element `{}`",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                Event::Empty(e) => {
                    if e.name().as_ref() == b"stations" {
                        break Vec::new();
                    }
                    return Err(LoadError::InvalidFormat(format!(
                        "unexpected root element `{}`",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                Event::Eof => {
                    return Err(LoadError::Parse("missing `stations` root element".into()));
                }
                _ => {}
            }
        };

        // Drain trailing content so mismatched tags after the root
        // still surface as parse errors.
        loop {
            match self.next_event()? {
                Event::Eof => return Ok(stations),
                _ => {}
            }
        }
    }

    /// Read the children of `stations` until its end tag.
    fn read_stations(&mut self) -> Result<Vec<Station>, LoadError> {
        let mut stations = Vec::new();
        loop {
            match self.next_event()? {
                Event::Start(e) => {
                    if e.name().as_ref() == b"station" {
                        stations.push(self.read_station()?);
                    } else {
                        self.skip_unknown()?;
                    }
                }
                Event::Empty(e) => {
                    // An empty station element is a record with no
                    // name and no position; empty unknowns have no
                    // subtree to skip.
                    if e.name().as_ref() == b"station" {
                        stations.push(Station::default());
                    }
                }
                Event::End(_) => return Ok(stations),
                Event::Eof => return Err(LoadError::Parse("unexpected end of document".into())),
                _ => {}
            }
        }
    }

    /// Read one `station` element into a record.
    ///
    /// The record is only surfaced once the closing tag is reached; a
    /// repeated `name` or `pos` overwrites the earlier value.
    fn read_station(&mut self) -> Result<Station, LoadError> {
        let mut station = Station::default();
        loop {
            match self.next_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"name" => station.name = self.read_text()?,
                    b"pos" => station.position = parse_pos(&self.read_text()?)?,
                    _ => self.skip_unknown()?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"name" => station.name = String::new(),
                    b"pos" => station.position = parse_pos("")?,
                    _ => {}
                },
                Event::End(_) => {
                    debug!(name = %station.name, "station read");
                    return Ok(station);
                }
                Event::Eof => return Err(LoadError::Parse("unexpected end of document".into())),
                _ => {}
            }
        }
    }

    /// Read the character data of the current element up to its end tag.
    fn read_text(&mut self) -> Result<String, LoadError> {
        let mut text = String::new();
        loop {
            match self.next_event()? {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(t) => text.push_str(&String::from_utf8_lossy(&t.into_inner())),
                Event::End(_) => return Ok(text),
                Event::Start(e) => {
                    return Err(LoadError::Parse(format!(
                        "unexpected element `{}` in character data",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                Event::Eof => return Err(LoadError::Parse("unexpected end of document".into())),
                _ => {}
            }
        }
    }

    /// Consume an unrecognized element and its whole subtree.
    ///
    /// Tracks start/end nesting so arbitrarily nested unknown content
    /// is consumed, then resumes iteration at the parent level.
    fn skip_unknown(&mut self) -> Result<(), LoadError> {
        debug!("skipping unknown element");
        let mut depth = 1usize;
        while depth > 0 {
            match self.next_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(LoadError::Parse("unexpected end of document".into())),
                _ => {}
            }
        }
        Ok(())
    }
}

/// Parse `latitude,longitude` coordinate text.
///
/// Fields beyond the first two are ignored; fewer than two fields or a
/// non-numeric field is a format error.
fn parse_pos(text: &str) -> Result<GeoPoint, LoadError> {
    let mut fields = text.split(',');
    let (Some(lat), Some(lon)) = (fields.next(), fields.next()) else {
        return Err(LoadError::InvalidFormat(format!(
            "coordinate `{text}` must be `latitude,longitude`"
        )));
    };

    let latitude = lat.trim().parse::<f64>().map_err(|_| {
        LoadError::InvalidFormat(format!("invalid latitude `{}`", lat.trim()))
    })?;
    let longitude = lon.trim().parse::<f64>().map_err(|_| {
        LoadError::InvalidFormat(format!("invalid longitude `{}`", lon.trim()))
    })?;

    Ok(GeoPoint::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_doc(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn single_station_roundtrip() {
        let doc = write_doc(
            "<stations>\
               <station><name>Termini</name><pos>41.9,12.5</pos></station>\
             </stations>",
        );

        let list = StationList::load(doc.path()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().name, "Termini");
        assert_eq!(list.get(0).unwrap().position, GeoPoint::new(41.9, 12.5));
    }

    #[test]
    fn stations_keep_document_order() {
        let doc = write_doc(
            "<stations>\
               <station><name>Milano Centrale</name><pos>45.48,9.20</pos></station>\
               <station><name>Bologna Centrale</name><pos>44.50,11.34</pos></station>\
               <station><name>Roma Termini</name><pos>41.90,12.50</pos></station>\
             </stations>",
        );

        let list = StationList::load(doc.path()).unwrap();
        let names: Vec<&str> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            ["Milano Centrale", "Bologna Centrale", "Roma Termini"]
        );
    }

    #[test]
    fn missing_pos_yields_zero_position() {
        let doc = write_doc("<stations><station><name>Termini</name></station></stations>");

        let list = StationList::load(doc.path()).unwrap();
        assert_eq!(list.get(0).unwrap().position, GeoPoint::new(0.0, 0.0));
    }

    #[test]
    fn missing_name_yields_empty_name() {
        let doc = write_doc("<stations><station><pos>41.9,12.5</pos></station></stations>");

        let list = StationList::load(doc.path()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().name, "");
    }

    #[test]
    fn repeated_name_last_wins() {
        let doc = write_doc(
            "<stations>\
               <station><name>Ostiense</name><name>Tiburtina</name></station>\
             </stations>",
        );

        let list = StationList::load(doc.path()).unwrap();
        assert_eq!(list.get(0).unwrap().name, "Tiburtina");
    }

    #[test]
    fn unknown_elements_are_skipped_with_subtree() {
        let doc = write_doc(
            "<stations>\
               <station><name>A</name></station>\
               <extra><deeply><nested>junk</nested></deeply></extra>\
               <station><name>B</name><colour>red</colour></station>\
             </stations>",
        );

        let list = StationList::load(doc.path()).unwrap();
        let names: Vec<&str> = list.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn station_nested_in_unknown_is_not_recognized() {
        let doc = write_doc(
            "<stations>\
               <bogus><station><name>X</name></station></bogus>\
               <station><name>Y</name></station>\
             </stations>",
        );

        let list = StationList::load(doc.path()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().name, "Y");
    }

    #[test]
    fn empty_root_yields_empty_list() {
        let doc = write_doc("<stations></stations>");
        let list = StationList::load(doc.path()).unwrap();
        assert!(list.is_empty());

        let doc = write_doc("<stations/>");
        let list = StationList::load(doc.path()).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn self_closing_station_is_a_blank_record() {
        let doc = write_doc("<stations><station/></stations>");

        let list = StationList::load(doc.path()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap(), &Station::default());
    }

    #[test]
    fn wrong_root_is_invalid_format() {
        let doc = write_doc("<timetable><station/></timetable>");

        let err = StationList::load(doc.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)), "got {err:?}");
    }

    #[test]
    fn nonexistent_path_is_cannot_open() {
        let err = StationList::load("/no/such/stations.xml").unwrap_err();
        assert!(matches!(err, LoadError::CannotOpen(_)), "got {err:?}");
    }

    #[test]
    fn mismatched_tags_are_a_parse_error() {
        let doc = write_doc("<stations><station></stations>");

        let err = StationList::load(doc.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn truncated_document_is_a_parse_error() {
        let doc = write_doc("<stations><station><name>Termini</name>");

        let err = StationList::load(doc.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn pos_with_one_field_is_invalid_format() {
        let doc = write_doc("<stations><station><pos>41.9</pos></station></stations>");

        let err = StationList::load(doc.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)), "got {err:?}");
    }

    #[test]
    fn pos_with_non_numeric_field_is_invalid_format() {
        let doc = write_doc("<stations><station><pos>41.9,east</pos></station></stations>");

        let err = StationList::load(doc.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidFormat(_)), "got {err:?}");
    }

    #[test]
    fn pos_extra_fields_are_ignored() {
        let doc = write_doc("<stations><station><pos>41.9,12.5,180</pos></station></stations>");

        let list = StationList::load(doc.path()).unwrap();
        assert_eq!(list.get(0).unwrap().position, GeoPoint::new(41.9, 12.5));
    }

    #[test]
    fn pos_fields_may_carry_whitespace() {
        let doc = write_doc("<stations><station><pos> 41.9 , 12.5 </pos></station></stations>");

        let list = StationList::load(doc.path()).unwrap();
        assert_eq!(list.get(0).unwrap().position, GeoPoint::new(41.9, 12.5));
    }

    #[test]
    fn entities_in_names_are_unescaped() {
        let doc = write_doc(
            "<stations><station><name>Porta &amp; Nolana</name></station></stations>",
        );

        let list = StationList::load(doc.path()).unwrap();
        assert_eq!(list.get(0).unwrap().name, "Porta & Nolana");
    }
}
