//! Flat CSV files passed between pipeline stages.
//!
//! The cleaned file has the columns `title,location,price,sqft,price_per_sqft`;
//! the final file adds `lat,lon`.

use crate::models::{Coordinates, Listing, MappedListing};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

const CLEANED_HEADER: [&str; 5] = ["title", "location", "price", "sqft", "price_per_sqft"];
const FINAL_HEADER: [&str; 7] = [
    "title",
    "location",
    "price",
    "sqft",
    "price_per_sqft",
    "lat",
    "lon",
];

/// Row layout of the final (mappable) CSV
#[derive(Debug, Serialize, Deserialize)]
struct MappedRow {
    title: String,
    location: String,
    price: i64,
    sqft: i64,
    price_per_sqft: i64,
    lat: f64,
    lon: f64,
}

impl From<&MappedListing> for MappedRow {
    fn from(mapped: &MappedListing) -> Self {
        let l = &mapped.listing;
        Self {
            title: l.title.clone(),
            location: l.location.clone(),
            price: l.price,
            sqft: l.sqft,
            price_per_sqft: l.price_per_sqft,
            lat: mapped.coordinates.lat,
            lon: mapped.coordinates.lon,
        }
    }
}

impl From<MappedRow> for MappedListing {
    fn from(row: MappedRow) -> Self {
        MappedListing::new(
            Listing {
                title: row.title,
                location: row.location,
                price: row.price,
                sqft: row.sqft,
                price_per_sqft: row.price_per_sqft,
            },
            Coordinates {
                lat: row.lat,
                lon: row.lon,
            },
        )
    }
}

/// CSV writer that always emits `header`, even when no rows follow
fn writer_with_header<W: io::Write>(writer: W, header: &[&str]) -> csv::Result<csv::Writer<W>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(header)?;
    Ok(writer)
}

pub fn write_listings_to<W: io::Write>(writer: W, listings: &[Listing]) -> csv::Result<()> {
    let mut writer = writer_with_header(writer, &CLEANED_HEADER)?;
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_listings_from<R: io::Read>(reader: R) -> csv::Result<Vec<Listing>> {
    csv::Reader::from_reader(reader).deserialize().collect()
}

pub fn write_mapped_to<W: io::Write>(writer: W, listings: &[MappedListing]) -> csv::Result<()> {
    let mut writer = writer_with_header(writer, &FINAL_HEADER)?;
    for listing in listings {
        writer.serialize(MappedRow::from(listing))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_mapped_from<R: io::Read>(reader: R) -> csv::Result<Vec<MappedListing>> {
    csv::Reader::from_reader(reader)
        .deserialize::<MappedRow>()
        .map(|row| row.map(MappedListing::from))
        .collect()
}

/// Write the cleaned listings file, replacing any previous one
pub fn write_listings(path: &Path, listings: &[Listing]) -> csv::Result<()> {
    write_listings_to(std::fs::File::create(path)?, listings)
}

pub fn read_listings(path: &Path) -> csv::Result<Vec<Listing>> {
    read_listings_from(std::fs::File::open(path)?)
}

/// Write the final mappable listings file, replacing any previous one
pub fn write_mapped(path: &Path, listings: &[MappedListing]) -> csv::Result<()> {
    write_mapped_to(std::fs::File::create(path)?, listings)
}

pub fn read_mapped(path: &Path) -> csv::Result<Vec<MappedListing>> {
    read_mapped_from(std::fs::File::open(path)?)
}

/// Whether a CSV error means the file itself does not exist
pub fn is_not_found(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(e) if e.kind() == io::ErrorKind::NotFound)
}
