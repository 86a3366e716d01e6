//! VTK XML PolyData (`.vtp`) point-cloud reading
//!
//! Reads the subset of the format that point-cloud datasets use: `<Points>`
//! coordinates plus named `<PointData>` scalar arrays, in ascii encoding.
//! Binary and appended encodings are rejected. Topology sections (`<Verts>`,
//! `<Lines>`, `<Polys>`, `<Strips>`) and `<CellData>` are skipped; the vertex
//! glyph stage regenerates per-point primitives downstream anyway.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use vtpview_core::{Error, Point3f, PointCloud, Result, ScalarField};

/// Reader for VTK XML PolyData files
pub struct VtpReader;

/// One `<Piece>` worth of parsed data
#[derive(Default)]
struct Piece {
    num_points: usize,
    positions: Vec<Point3f>,
    fields: Vec<ScalarField>,
}

/// A `<DataArray>` being captured
struct ArrayCapture {
    name: Option<String>,
    components: usize,
    in_points: bool,
    text: String,
}

impl VtpReader {
    /// Read a point cloud from a `.vtp` file on disk.
    ///
    /// Either the whole file parses or the call fails; there is no partial
    /// success. All named scalar point-data arrays are carried into the
    /// returned cloud.
    pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud> {
        let file = File::open(path.as_ref())?;
        Self::read_from(BufReader::new(file))
    }

    /// Read a point cloud from any buffered reader of VTP XML
    pub fn read_from<R: BufRead>(reader: R) -> Result<PointCloud> {
        let mut xml = XmlReader::from_reader(reader);
        let mut buf = Vec::new();

        let mut stack: Vec<String> = Vec::new();
        let mut saw_root = false;
        let mut pieces: Vec<Piece> = Vec::new();
        let mut piece: Option<Piece> = None;
        let mut capture: Option<ArrayCapture> = None;

        loop {
            let event = xml
                .read_event_into(&mut buf)
                .map_err(|e| Error::Load(format!("XML parse error: {}", e)))?;
            match event {
                Event::Start(ref e) => {
                    let name = local_name(e);
                    Self::handle_element(
                        e,
                        &name,
                        &stack,
                        &mut saw_root,
                        &mut piece,
                        &mut capture,
                    )?;
                    stack.push(name);
                }
                Event::Empty(ref e) => {
                    // Self-closing elements carry no text; finalize immediately
                    let name = local_name(e);
                    Self::handle_element(
                        e,
                        &name,
                        &stack,
                        &mut saw_root,
                        &mut piece,
                        &mut capture,
                    )?;
                    if name == "DataArray" {
                        Self::finish_array(&mut capture, &mut piece)?;
                    } else if name == "Piece" {
                        if let Some(done) = piece.take() {
                            if done.num_points > 0 {
                                return Err(Error::Load(
                                    "piece has no <Points> coordinate array".to_string(),
                                ));
                            }
                            pieces.push(done);
                        }
                    }
                }
                Event::Text(ref t) => {
                    if let Some(cap) = capture.as_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| Error::Load(format!("XML parse error: {}", e)))?;
                        cap.text.push_str(&text);
                        cap.text.push(' ');
                    }
                }
                Event::End(_) => {
                    let name = stack
                        .pop()
                        .ok_or_else(|| Error::Load("mismatched closing tag".to_string()))?;
                    match name.as_str() {
                        "DataArray" => Self::finish_array(&mut capture, &mut piece)?,
                        "Piece" => {
                            let done = piece
                                .take()
                                .ok_or_else(|| Error::Load("stray </Piece>".to_string()))?;
                            if done.num_points > 0 && done.positions.is_empty() {
                                return Err(Error::Load(
                                    "piece has no <Points> coordinate array".to_string(),
                                ));
                            }
                            pieces.push(done);
                        }
                        _ => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(Error::Load("not a VTK XML file".to_string()));
        }
        if !stack.is_empty() {
            return Err(Error::Load("unexpected end of file".to_string()));
        }
        Self::merge_pieces(pieces)
    }

    /// Dispatch on an opening element, updating parser state
    fn handle_element(
        e: &BytesStart,
        name: &str,
        stack: &[String],
        saw_root: &mut bool,
        piece: &mut Option<Piece>,
        capture: &mut Option<ArrayCapture>,
    ) -> Result<()> {
        match name {
            "VTKFile" => {
                if !stack.is_empty() {
                    return Err(Error::Load("nested <VTKFile> element".to_string()));
                }
                let dataset = attr(e, "type")?.unwrap_or_default();
                if dataset != "PolyData" {
                    return Err(Error::Load(format!(
                        "expected a PolyData dataset, found '{}'",
                        dataset
                    )));
                }
                *saw_root = true;
            }
            "Piece" => {
                if piece.is_some() {
                    return Err(Error::Load("nested <Piece> element".to_string()));
                }
                let num_points = attr(e, "NumberOfPoints")?
                    .ok_or_else(|| Error::Load("<Piece> missing NumberOfPoints".to_string()))?
                    .parse::<usize>()
                    .map_err(|_| Error::Load("invalid NumberOfPoints value".to_string()))?;
                *piece = Some(Piece {
                    num_points,
                    ..Piece::default()
                });
            }
            "DataArray" => {
                let parent = stack.last().map(String::as_str);
                let in_points = parent == Some("Points");
                if !in_points && parent != Some("PointData") {
                    return Ok(()); // topology or cell data, skipped
                }
                if piece.is_none() {
                    return Err(Error::Load("<DataArray> outside a <Piece>".to_string()));
                }
                let format = attr(e, "format")?.unwrap_or_else(|| "ascii".to_string());
                if format != "ascii" {
                    return Err(Error::Load(format!(
                        "unsupported DataArray format '{}' (only ascii is supported)",
                        format
                    )));
                }
                let components = attr(e, "NumberOfComponents")?
                    .map(|c| {
                        c.parse::<usize>()
                            .map_err(|_| Error::Load("invalid NumberOfComponents".to_string()))
                    })
                    .transpose()?
                    .unwrap_or(1);
                if in_points && components != 3 {
                    return Err(Error::Load(format!(
                        "point coordinates must have 3 components, found {}",
                        components
                    )));
                }
                *capture = Some(ArrayCapture {
                    name: attr(e, "Name")?,
                    components,
                    in_points,
                    text: String::new(),
                });
            }
            _ => {}
        }
        Ok(())
    }

    /// Finalize a captured `<DataArray>` into the current piece
    fn finish_array(capture: &mut Option<ArrayCapture>, piece: &mut Option<Piece>) -> Result<()> {
        let Some(cap) = capture.take() else {
            return Ok(());
        };
        let piece = piece
            .as_mut()
            .ok_or_else(|| Error::Load("<DataArray> outside a <Piece>".to_string()))?;
        let values = parse_values(&cap.text)?;

        if cap.in_points {
            if !piece.positions.is_empty() {
                return Err(Error::Load(
                    "multiple coordinate arrays in <Points>".to_string(),
                ));
            }
            if values.len() != piece.num_points * 3 {
                return Err(Error::Load(format!(
                    "expected {} coordinate values, found {}",
                    piece.num_points * 3,
                    values.len()
                )));
            }
            piece.positions = values
                .chunks_exact(3)
                .map(|c| Point3f::new(c[0], c[1], c[2]))
                .collect();
        } else {
            let Some(name) = cap.name else {
                log::warn!("ignoring unnamed point-data array");
                return Ok(());
            };
            if cap.components != 1 {
                log::warn!(
                    "ignoring non-scalar point-data array '{}' ({} components)",
                    name,
                    cap.components
                );
                return Ok(());
            }
            if values.len() != piece.num_points {
                return Err(Error::Load(format!(
                    "field '{}' has {} values for {} points",
                    name,
                    values.len(),
                    piece.num_points
                )));
            }
            piece.fields.push(ScalarField::new(name, values));
        }
        Ok(())
    }

    /// Concatenate pieces in document order into one cloud.
    ///
    /// Every piece must carry the same field names, or the file is rejected.
    fn merge_pieces(pieces: Vec<Piece>) -> Result<PointCloud> {
        let mut iter = pieces.into_iter();
        let Some(first) = iter.next() else {
            return Err(Error::Load("no <Piece> element found".to_string()));
        };
        let mut positions = first.positions;
        let mut fields = first.fields;

        for piece in iter {
            let mut names: Vec<&str> = piece.fields.iter().map(|f| f.name.as_str()).collect();
            let mut expected: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
            names.sort_unstable();
            expected.sort_unstable();
            if names != expected {
                return Err(Error::Load(
                    "pieces carry different point-data fields".to_string(),
                ));
            }
            positions.extend(piece.positions);
            for incoming in piece.fields {
                let field = fields
                    .iter_mut()
                    .find(|f| f.name == incoming.name)
                    .ok_or_else(|| {
                        Error::Load("pieces carry different point-data fields".to_string())
                    })?;
                field.values.extend(incoming.values);
            }
        }

        let mut cloud = PointCloud::from_points(positions);
        for field in fields {
            cloud.add_field(field)?;
        }
        log::info!(
            "loaded {} points with {} scalar field(s)",
            cloud.len(),
            cloud.fields().len()
        );
        Ok(cloud)
    }
}

/// Look up a (local-name) attribute on an element
fn attr(e: &BytesStart, key: &str) -> Result<Option<String>> {
    for a in e.attributes() {
        let a = a.map_err(|e| Error::Load(format!("XML attribute error: {}", e)))?;
        if a.key.local_name().as_ref() == key.as_bytes() {
            let value = a
                .unescape_value()
                .map_err(|e| Error::Load(format!("XML attribute error: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn parse_values(text: &str) -> Result<Vec<f32>> {
    text.split_whitespace()
        .map(|tok| {
            tok.parse::<f32>()
                .map_err(|_| Error::Load(format!("invalid numeric value '{}'", tok)))
        })
        .collect()
}
