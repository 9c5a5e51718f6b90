// Copyright (c) 2025 - Cowboy AI, Inc.
//! CSV device report
//!
//! One header row followed by one row per device:
//!
//! ```text
//! name,make,model
//! pe1a1.foo12,Arista,DCS-7050X3
//! csvr1a1.foo12,Dell,PowerEdge R750
//! ```
//!
//! Fields are joined with `,` as-is. A manufacturer or model containing a
//! comma produces a row with extra columns; consumers rely on the unquoted
//! format, so no quoting is applied.

use crate::domain::Device;

pub const REPORT_HEADER: &str = "name,make,model";

/// Report row for one device
pub fn device_row(device: &Device) -> String {
    [
        device.name.as_str(),
        device.device_type.manufacturer.name.as_str(),
        device.device_type.model.as_str(),
    ]
    .join(",")
}

/// Render the report, rows separated by `\n` with no trailing newline
pub fn render_csv(devices: &[Device]) -> String {
    let mut rows = Vec::with_capacity(devices.len() + 1);
    rows.push(REPORT_HEADER.to_string());
    rows.extend(devices.iter().map(device_row));
    rows.join("\n")
}
