/// Loader for the line-oriented `v`/`vn`/`vt`/`f` geometry format
use std::fs;
use std::path::Path;

use log::debug;
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt},
    number::complete::float,
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{LoadError, ParseErrorKind};
use crate::geometry::{Corner, Face, Mesh};
use crate::math::{Vec2, Vec3};

/// Read and parse a geometry file.
///
/// Any malformed line fails the whole load; no partial mesh is returned.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = parse(&source)?;
    debug!(
        "loaded {}: {} vertices, {} normals, {} texcoords, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.normals().len(),
        mesh.texcoords().len(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Parse geometry text already in memory
pub fn parse(source: &str) -> Result<Mesh, LoadError> {
    let mut mesh = Mesh::new();

    for (number, line) in source.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        parse_line(&mut mesh, &tokens).map_err(|reason| LoadError::Parse {
            line: number + 1,
            reason,
        })?;
    }

    Ok(mesh)
}

fn parse_line(mesh: &mut Mesh, tokens: &[&str]) -> Result<(), ParseErrorKind> {
    let Some((&tag, fields)) = tokens.split_first() else {
        return Ok(());
    };

    match tag {
        "v" => {
            let [x, y, z] = numbers::<3>("v", fields)?;
            mesh.push_vertex(Vec3::new(x, y, z));
        }
        "vn" => {
            let [x, y, z] = numbers::<3>("vn", fields)?;
            mesh.push_normal(Vec3::new(x, y, z));
        }
        "vt" => {
            let [u, v] = numbers::<2>("vt", fields)?;
            mesh.push_texcoord(Vec2::new(u, v));
        }
        "f" => {
            if fields.len() < 3 {
                return Err(ParseErrorKind::TooFewCorners(fields.len()));
            }
            let corners = fields
                .iter()
                .map(|field| corner(field))
                .collect::<Result<Vec<_>, _>>()?;

            // Fan around the first corner
            for pair in corners[1..].windows(2) {
                mesh.push_face(Face::new(corners[0], pair[0], pair[1]))?;
            }
        }
        _ => {}
    }

    Ok(())
}

fn numbers<const N: usize>(tag: &'static str, fields: &[&str]) -> Result<[f32; N], ParseErrorKind> {
    if fields.len() != N {
        return Err(ParseErrorKind::Arity {
            tag,
            expected: N,
            found: fields.len(),
        });
    }

    let mut values = [0.0; N];
    for (value, &field) in values.iter_mut().zip(fields) {
        *value = all_consuming(float::<&str, nom::error::Error<&str>>)(field)
            .map(|(_, parsed)| parsed)
            .map_err(|_| ParseErrorKind::InvalidNumber(field.to_string()))?;
    }
    Ok(values)
}

fn corner(field: &str) -> Result<Corner, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidCorner(field.to_string());

    let (_, (vertex, attributes)) = all_consuming(parse_corner)(field).map_err(|_| invalid())?;
    let vertex = zero_based(vertex).ok_or_else(invalid)?;

    match attributes {
        None => Ok(Corner::new(vertex)),
        Some((texcoord, normal)) => Ok(Corner::with_attributes(
            vertex,
            zero_based(texcoord).ok_or_else(invalid)?,
            zero_based(normal).ok_or_else(invalid)?,
        )),
    }
}

/// `v` or `v/t/n`; nothing in between
fn parse_corner(input: &str) -> IResult<&str, (usize, Option<(usize, usize)>)> {
    tuple((
        parse_index,
        opt(tuple((
            preceded(char('/'), parse_index),
            preceded(char('/'), parse_index),
        ))),
    ))(input)
}

fn parse_index(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

fn zero_based(index: usize) -> Option<usize> {
    index.checked_sub(1)
}
