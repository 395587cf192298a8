//! Plain-text rendering of point reports.
//!
//! # Responsibility
//! - Turn a summary and its remarks into the human-readable report block.
//!
//! # Invariants
//! - Section order is fixed: header, then either the no-data sentinel or
//!   averages, detail and remarks.
//! - Averages are printed with two decimals and fixed display units; detail
//!   rows print the raw integer values.

use crate::model::geo_point::GeographicPoint;
use crate::repo::point_repo::PointOfInterestDetails;
use crate::report::summary::{ObservationDetail, Remark, Summary};
use std::fmt::Write;

/// Sentinel emitted when a reference-point lookup finds nothing.
pub const AREA_NOT_FOUND: &str = "Geographic area not found.";
/// Sentinel emitted when a point-of-interest lookup finds nothing.
pub const POINT_OF_INTEREST_NOT_FOUND: &str = "Point of interest not found.";

const NO_DATA_LINE: &str = "No climate data available for this area.";
const NO_REMARKS_LINE: &str = "No remarks available.";
const DETAIL_SEPARATOR: &str = "----------------------------------------";
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Renders the report for a pre-seeded reference point.
pub fn render_reference_point_report(
    point: &GeographicPoint,
    summary: &Summary,
    remarks: &[Remark],
) -> String {
    let mut out = String::new();
    out.push_str("Geographic area information:\n");
    let _ = writeln!(out, "  Id: {}", point.id);
    let _ = writeln!(out, "  City: {}", point.city_name);
    let _ = writeln!(out, "  State: {}", point.state);
    if let Some(country) = &point.country {
        let _ = writeln!(out, "  Country: {country}");
    }
    let _ = writeln!(out, "  Latitude: {}", point.latitude);
    let _ = writeln!(out, "  Longitude: {}", point.longitude);

    push_data_sections(&mut out, summary, remarks);
    out
}

/// Renders the report for an operator-defined point of interest.
pub fn render_point_of_interest_report(
    details: &PointOfInterestDetails,
    summary: &Summary,
    remarks: &[Remark],
) -> String {
    let point = &details.point;
    let mut out = String::new();
    out.push_str("Point of interest information:\n");
    let _ = writeln!(out, "  Id: {}", point.id);
    let _ = writeln!(out, "  Name: {}", point.city_name);
    let _ = writeln!(out, "  State: {}", point.state);
    let _ = writeln!(out, "  Monitoring center: {}", details.center_name);
    if let Some(center_id) = point.center_id {
        let _ = writeln!(out, "  Monitoring center id: {center_id}");
    }
    let _ = writeln!(out, "  Latitude: {}", point.latitude);
    let _ = writeln!(out, "  Longitude: {}", point.longitude);
    if let Some(category) = &point.category {
        let _ = writeln!(out, "  Category: {category}");
    }

    push_data_sections(&mut out, summary, remarks);
    out
}

fn push_data_sections(out: &mut String, summary: &Summary, remarks: &[Remark]) {
    if !summary.has_observations() {
        out.push('\n');
        out.push_str(NO_DATA_LINE);
        out.push('\n');
        return;
    }

    out.push_str("\n=== Climate data summary ===\n\n");
    let _ = writeln!(out, "Total observations: {}", summary.observation_count);

    if let Some(averages) = &summary.averages {
        out.push_str("\nAverage parameter values:\n");
        let _ = writeln!(out, "  Wind: {:.2} m/s", averages.wind);
        let _ = writeln!(out, "  Humidity: {:.2} %", averages.humidity);
        let _ = writeln!(out, "  Pressure: {:.2} hPa", averages.pressure);
        let _ = writeln!(out, "  Temperature: {:.2} °C", averages.temperature);
        let _ = writeln!(out, "  Precipitation: {:.2} mm", averages.precipitation);
        let _ = writeln!(out, "  Altitude: {:.2} m", averages.altitude);
        let _ = writeln!(out, "  Glacier mass: {:.2} kg/m³", averages.glacier_mass);
    }

    out.push_str("\n=== Observation detail ===\n\n");
    for detail in &summary.details {
        push_detail_block(out, detail);
    }

    out.push_str("\n=== Recent operator remarks ===\n");
    if remarks.is_empty() {
        out.push_str(NO_REMARKS_LINE);
        out.push('\n');
    } else {
        for remark in remarks {
            let _ = writeln!(
                out,
                "- [{}] {}",
                remark.observed_on.format(DATE_FORMAT),
                remark.note
            );
        }
    }
}

fn push_detail_block(out: &mut String, detail: &ObservationDetail) {
    if let Some(operator) = &detail.operator {
        let _ = writeln!(
            out,
            "Operator: {} {}",
            operator.first_name, operator.last_name
        );
    }
    let _ = writeln!(out, "Date: {}", detail.observed_on.format(DATE_FORMAT));
    out.push_str("Recorded values:\n");
    let values = &detail.measurements;
    let _ = writeln!(out, "  Wind: {} m/s", values.wind);
    let _ = writeln!(out, "  Humidity: {} %", values.humidity);
    let _ = writeln!(out, "  Pressure: {} hPa", values.pressure);
    let _ = writeln!(out, "  Temperature: {} °C", values.temperature);
    let _ = writeln!(out, "  Precipitation: {} mm", values.precipitation);
    let _ = writeln!(out, "  Altitude: {} m", values.altitude);
    let _ = writeln!(out, "  Glacier mass: {} kg/m³", values.glacier_mass);
    if let Some(note) = detail.note.as_deref() {
        if !note.trim().is_empty() {
            let _ = writeln!(out, "Note: {note}");
        }
    }
    out.push_str(DETAIL_SEPARATOR);
    out.push('\n');
}
