//! Native GeoTIFF reading
//!
//! Uses the `tiff` crate for pixel decoding and reads the GeoTIFF tags
//! (ModelPixelScale 33550, ModelTiepoint 33922, ModelTransformation 34264,
//! GeoKeyDirectory 34735) directly for georeferencing.

use crate::crs::CRS;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, RasterPixels, RasterSurface, SampleKind};
use ndarray::{Array2, Array3, Axis};
use num_traits::ToPrimitive;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray32Float, RGB32Float};
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;
use tiff::ColorType;

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const MODEL_TRANSFORMATION: u16 = 34264;
const GEO_KEY_DIRECTORY: u16 = 34735;

const GT_MODEL_TYPE_KEY: u16 = 1024;
const GT_RASTER_TYPE_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_KEY: u16 = 3072;
const USER_DEFINED: u16 = 32767;

/// Tag for a GeoTIFF code. The decoder keys known codes by their named
/// variant, so `Tag::Unknown` lookups would miss them.
fn geo_tag(code: u16) -> Tag {
    Tag::from_u16_exhaustive(code)
}

/// Read a GeoTIFF file into a RasterSurface
///
/// Three-sample images become an RGB surface; every other layout keeps
/// only the first sample of each pixel.
pub fn read_geotiff<P: AsRef<Path>>(path: P) -> Result<RasterSurface> {
    let file = File::open(path.as_ref())?;
    decode_geotiff(BufReader::new(file))
}

/// Read a GeoTIFF from an in-memory buffer
pub fn read_geotiff_from_buffer(data: &[u8]) -> Result<RasterSurface> {
    decode_geotiff(Cursor::new(data))
}

fn decode_geotiff<R>(reader: R) -> Result<RasterSurface>
where
    R: std::io::Read + std::io::Seek,
{
    let mut decoder = Decoder::new(reader)?;

    let (width, height) = decoder.dimensions()?;
    let rows = height as usize;
    let cols = width as usize;

    let samples = samples_per_pixel(decoder.colortype()?)?;
    let (values, kind) = decoding_result_to_f64(decoder.read_image()?)?;

    if values.len() != rows * cols * samples {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let pixels = if samples == 3 {
        let array = Array3::from_shape_vec((rows, cols, 3), values)
            .map_err(|e| Error::Other(e.to_string()))?;
        RasterPixels::Rgb(array)
    } else {
        let array = Array3::from_shape_vec((rows, cols, samples), values)
            .map_err(|e| Error::Other(e.to_string()))?;
        let first: Array2<f64> = array.index_axis(Axis(2), 0).to_owned();
        RasterPixels::Gray(first)
    };

    let transform = read_geotransform(&mut decoder).unwrap_or_default();
    let crs = read_crs(&mut decoder);

    Ok(RasterSurface::new(pixels, transform, crs)?.with_sample_kind(kind))
}

fn samples_per_pixel(color: ColorType) -> Result<usize> {
    match color {
        ColorType::Gray(_) | ColorType::Palette(_) => Ok(1),
        ColorType::GrayA(_) => Ok(2),
        ColorType::RGB(_) => Ok(3),
        ColorType::RGBA(_) | ColorType::CMYK(_) => Ok(4),
        #[allow(unreachable_patterns)]
        other => Err(Error::UnsupportedDataType(format!("{:?}", other))),
    }
}

fn decoding_result_to_f64(result: DecodingResult) -> Result<(Vec<f64>, SampleKind)> {
    fn cast<T: ToPrimitive>(buf: Vec<T>) -> Vec<f64> {
        buf.into_iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect()
    }

    use SampleKind::{Float, Integer};
    Ok(match result {
        DecodingResult::U8(buf) => (cast(buf), Integer),
        DecodingResult::U16(buf) => (cast(buf), Integer),
        DecodingResult::U32(buf) => (cast(buf), Integer),
        DecodingResult::U64(buf) => (cast(buf), Integer),
        DecodingResult::I8(buf) => (cast(buf), Integer),
        DecodingResult::I16(buf) => (cast(buf), Integer),
        DecodingResult::I32(buf) => (cast(buf), Integer),
        DecodingResult::I64(buf) => (cast(buf), Integer),
        DecodingResult::F32(buf) => (cast(buf), Float),
        DecodingResult::F64(buf) => (buf, Float),
        #[allow(unreachable_patterns)]
        _ => {
            return Err(Error::UnsupportedDataType(
                "Unsupported TIFF pixel format".to_string(),
            ))
        }
    })
}

/// Attempt to read GeoTransform from TIFF tags
fn read_geotransform<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
) -> Option<GeoTransform> {
    let scale = decoder.get_tag_f64_vec(geo_tag(MODEL_PIXEL_SCALE)).ok();
    let tiepoint = decoder.get_tag_f64_vec(geo_tag(MODEL_TIEPOINT)).ok();

    if let (Some(scale), Some(tiepoint)) = (&scale, &tiepoint) {
        if let Some(gt) = GeoTransform::from_tiepoint(scale, tiepoint) {
            return Some(gt);
        }
    }

    let matrix = decoder
        .get_tag_f64_vec(geo_tag(MODEL_TRANSFORMATION))
        .ok()?;
    GeoTransform::from_model_transformation(&matrix)
}

/// Read the CRS from the GeoKeyDirectory.
///
/// A projected CRS wins over the geographic CRS it is based on.
fn read_crs<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<CRS> {
    let keys = decoder
        .get_tag_u16_vec(geo_tag(GEO_KEY_DIRECTORY))
        .ok()?;
    crs_from_geokeys(&keys)
}

fn crs_from_geokeys(keys: &[u16]) -> Option<CRS> {
    // Header: [version, revision, minor, count], then (id, location, count, value) entries
    if keys.len() < 4 {
        return None;
    }
    let count = keys[3] as usize;

    let mut geographic = None;
    let mut projected = None;
    for entry in keys[4..].chunks_exact(4).take(count) {
        let (key_id, location, value) = (entry[0], entry[1], entry[3]);
        // Values stored in other tags (location != 0) are citations, not codes
        if location != 0 || value == 0 || value == USER_DEFINED {
            continue;
        }
        match key_id {
            GEOGRAPHIC_TYPE_KEY => geographic = Some(value),
            PROJECTED_CS_TYPE_KEY => projected = Some(value),
            _ => {}
        }
    }

    projected
        .or(geographic)
        .map(|code| CRS::from_epsg(code as u32))
}

/// Encode a surface as a GeoTIFF in memory.
///
/// Gray surfaces are written as 32-bit float, RGB surfaces as three 32-bit
/// float samples. The EPSG code, when known, goes into the GeoKeyDirectory.
pub fn write_geotiff_to_buffer(surface: &RasterSurface) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buf))?;
        let (rows, cols) = (surface.rows() as u32, surface.cols() as u32);

        let gt = surface.transform();
        let scale = [gt.pixel_width, gt.pixel_height.abs(), 0.0];
        let tiepoint = [0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
        let geokeys = geokeys_for(surface.crs());

        match surface.pixels() {
            RasterPixels::Gray(array) => {
                let data: Vec<f32> = array.iter().map(|&v| v as f32).collect();
                let mut image = encoder.new_image::<Gray32Float>(cols, rows)?;
                image.encoder().write_tag(geo_tag(MODEL_PIXEL_SCALE), &scale[..])?;
                image.encoder().write_tag(geo_tag(MODEL_TIEPOINT), &tiepoint[..])?;
                image.encoder().write_tag(geo_tag(GEO_KEY_DIRECTORY), geokeys.as_slice())?;
                image.write_data(&data)?;
            }
            RasterPixels::Rgb(array) => {
                let data: Vec<f32> = array.iter().map(|&v| v as f32).collect();
                let mut image = encoder.new_image::<RGB32Float>(cols, rows)?;
                image.encoder().write_tag(geo_tag(MODEL_PIXEL_SCALE), &scale[..])?;
                image.encoder().write_tag(geo_tag(MODEL_TIEPOINT), &tiepoint[..])?;
                image.encoder().write_tag(geo_tag(GEO_KEY_DIRECTORY), geokeys.as_slice())?;
                image.write_data(&data)?;
            }
        }
    }
    Ok(buf)
}

fn geokeys_for(crs: Option<&CRS>) -> Vec<u16> {
    let code = crs.and_then(|c| c.epsg()).and_then(|c| u16::try_from(c).ok());
    let mut keys: Vec<u16> = vec![1, 1, 0, 2];
    match code {
        Some(code) if (4000..5000).contains(&code) => {
            keys[3] = 3;
            keys.extend_from_slice(&[GT_MODEL_TYPE_KEY, 0, 1, 2]);
            keys.extend_from_slice(&[GT_RASTER_TYPE_KEY, 0, 1, 1]);
            keys.extend_from_slice(&[GEOGRAPHIC_TYPE_KEY, 0, 1, code]);
        }
        Some(code) => {
            keys[3] = 3;
            keys.extend_from_slice(&[GT_MODEL_TYPE_KEY, 0, 1, 1]);
            keys.extend_from_slice(&[GT_RASTER_TYPE_KEY, 0, 1, 1]);
            keys.extend_from_slice(&[PROJECTED_CS_TYPE_KEY, 0, 1, code]);
        }
        None => {
            keys.extend_from_slice(&[GT_MODEL_TYPE_KEY, 0, 1, 1]);
            keys.extend_from_slice(&[GT_RASTER_TYPE_KEY, 0, 1, 1]);
        }
    }
    keys
}
