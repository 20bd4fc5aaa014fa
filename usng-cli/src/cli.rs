//! Définition et implémentation des commandes CLI
//!
//! - `to-usng`: lat/lon → désignation USNG ou MGRS
//! - `to-ll`: chaîne USNG/MGRS → point ou emprise lat/lon
//! - `to-utm`: lat/lon → coordonnée UTM
//! - `batch`: fichier de points "lat,lon" converti en parallèle

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use clap::Subcommand;
use rayon::prelude::*;
use tracing::{info, warn};
use usng::{Converter, Datum, LatLonOrBounds};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a lat/lon point to a USNG (or MGRS) designation
    ToUsng {
        /// Latitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,

        /// Precision level 0-6 (0 = zone/band, 6 = 1 m)
        #[arg(short, long, default_value_t = 6)]
        precision: u8,

        /// Reference datum (nad83 or nad27)
        #[arg(long, default_value = "nad83")]
        datum: Datum,

        /// Emit MGRS (no delimiters) instead of USNG
        #[arg(long)]
        mgrs: bool,
    },

    /// Convert a USNG/MGRS string back to lat/lon
    ToLl {
        /// USNG or MGRS string, e.g. "18S UJ 23487 06483"
        usng: String,

        /// Return only the point instead of the bounding box
        #[arg(short, long)]
        center: bool,

        /// Reference datum (nad83 or nad27)
        #[arg(long, default_value = "nad83")]
        datum: Datum,

        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Project a lat/lon point to UTM
    ToUtm {
        /// Latitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,

        /// Force a specific UTM zone instead of the computed one
        #[arg(short, long)]
        zone: Option<u8>,

        /// Reference datum (nad83 or nad27)
        #[arg(long, default_value = "nad83")]
        datum: Datum,

        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Convert a file of "lat,lon" lines to USNG, in parallel
    Batch {
        /// Input file, one "lat,lon" pair per line ('#' starts a comment)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Precision level 0-6
        #[arg(short, long, default_value_t = 6)]
        precision: u8,

        /// Reference datum (nad83 or nad27)
        #[arg(long, default_value = "nad83")]
        datum: Datum,

        /// Number of worker threads (default: all cores)
        #[arg(long, alias = "threads")]
        jobs: Option<usize>,
    },
}

/// Exécute la commande to-usng
pub fn cmd_to_usng(lat: f64, lon: f64, precision: u8, datum: Datum, mgrs: bool) -> Result<()> {
    let converter = Converter::new(datum);
    let out = if mgrs {
        converter.ll_to_mgrs(lat, lon, precision)?
    } else {
        converter.ll_to_usng(lat, lon, precision)?
    };
    println!("{}", out);
    Ok(())
}

/// Exécute la commande to-ll
pub fn cmd_to_ll(input: &str, center: bool, datum: Datum, json: bool) -> Result<()> {
    let converter = Converter::new(datum);
    let result = converter
        .usng_to_ll(input, center)
        .with_context(|| format!("Cannot convert '{}'", input))?;

    match (json, result) {
        (true, LatLonOrBounds::Point(p)) => {
            println!("{}", serde_json::json!({ "lat": p.lat, "lon": p.lon }));
        }
        (true, LatLonOrBounds::Bounds(b)) => {
            println!(
                "{}",
                serde_json::json!({
                    "north": b.north,
                    "south": b.south,
                    "east": b.east,
                    "west": b.west,
                })
            );
        }
        (false, LatLonOrBounds::Point(p)) => {
            println!("{:.6},{:.6}", p.lat, p.lon);
        }
        (false, LatLonOrBounds::Bounds(b)) => {
            println!("north: {:.6}", b.north);
            println!("south: {:.6}", b.south);
            println!("east: {:.6}", b.east);
            println!("west: {:.6}", b.west);
        }
    }

    Ok(())
}

/// Exécute la commande to-utm
pub fn cmd_to_utm(lat: f64, lon: f64, zone: Option<u8>, datum: Datum, json: bool) -> Result<()> {
    let converter = Converter::new(datum);
    let utm = converter.ll_to_utm(lat, lon, zone)?;

    if json {
        println!("{}", serde_json::to_string(&utm)?);
    } else {
        println!("zone: {}", utm.zone);
        println!("easting: {:.1}", utm.easting);
        println!("northing: {:.1}", utm.northing);
        println!("hemisphere: {:?}", utm.hemisphere);
    }

    Ok(())
}

/// Exécute la commande batch
pub fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    precision: u8,
    datum: Datum,
    jobs: Option<usize>,
) -> Result<()> {
    let jobs = jobs.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    });

    let content = fs::read_to_string(input)
        .with_context(|| format!("Cannot read {}", input.display()))?;

    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .collect();

    info!(
        input = %input.display(),
        points = lines.len(),
        jobs,
        "Starting batch conversion"
    );

    let converter = Converter::new(datum);
    let errors = AtomicUsize::new(0);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Cannot build worker pool")?;

    // L'ordre des entrées est préservé dans la sortie
    let results: Vec<String> = pool.install(|| {
        lines
            .par_iter()
            .map(|(line_no, line)| {
                match convert_line(&converter, line, precision) {
                    Ok(usng) => usng,
                    Err(e) => {
                        warn!("Line {}: {}", line_no + 1, e);
                        errors.fetch_add(1, Ordering::Relaxed);
                        format!("ERROR: {}", e)
                    }
                }
            })
            .collect()
    });

    let mut writer: BufWriter<Box<dyn Write>> = match output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Cannot create {}", path.display()))?;
            BufWriter::new(Box::new(file))
        }
        None => BufWriter::new(Box::new(std::io::stdout())),
    };
    for line in &results {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    let total_errors = errors.load(Ordering::Relaxed);
    let converted = results.len() - total_errors;

    eprintln!(
        "Batch complete: {}/{} points converted",
        converted,
        results.len()
    );
    if total_errors > 0 {
        warn!("{} lines failed", total_errors);
    }

    Ok(())
}

/// Convertit une ligne "lat,lon" en chaîne USNG
fn convert_line(converter: &Converter, line: &str, precision: u8) -> Result<String> {
    let (lat_str, lon_str) = line
        .split_once(',')
        .with_context(|| format!("expected 'lat,lon', got '{}'", line.trim()))?;

    let lat: f64 = lat_str
        .trim()
        .parse()
        .with_context(|| format!("invalid latitude '{}'", lat_str.trim()))?;
    let lon: f64 = lon_str
        .trim()
        .parse()
        .with_context(|| format!("invalid longitude '{}'", lon_str.trim()))?;

    Ok(converter.ll_to_usng(lat, lon, precision)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nad83() -> Converter {
        Converter::new(Datum::Nad83)
    }

    #[test]
    fn test_convert_line_valid() {
        let usng = convert_line(&nad83(), "38.8895, -77.0352", 6).unwrap();
        assert_eq!(usng, "18S UJ 23487 06483");
    }

    #[test]
    fn test_convert_line_malformed() {
        assert!(convert_line(&nad83(), "38.8895", 6).is_err());
        assert!(convert_line(&nad83(), "abc,def", 6).is_err());
        assert!(convert_line(&nad83(), "91.0,0.0", 6).is_err());
    }

    #[test]
    fn test_convert_line_whitespace_tolerant() {
        let a = convert_line(&nad83(), "38.8895,-77.0352", 4).unwrap();
        let b = convert_line(&nad83(), "  38.8895 , -77.0352  ", 4).unwrap();
        assert_eq!(a, b);
    }
}
