use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::license::LicenseGroups;

pub const HEADER: [&str; 6] = ["Name", "Version", "License", "URL", "VendorUrl", "VendorName"];

/// Placeholder for absent `url`/`vendorUrl`/`vendorName` cells.
pub const UNKNOWN_CELL: &str = "Unknown";

/// Header plus one six-column row per aggregated package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseTable {
    pub head: Vec<String>,
    pub body: Vec<[String; 6]>,
}

/// Flatten the groups into rows, bucket order first, then in-bucket order.
pub fn build(groups: &LicenseGroups) -> LicenseTable {
    let body = groups
        .iter()
        .flat_map(|group| {
            group.packages().iter().map(move |info| {
                [
                    info.name.clone(),
                    info.version.clone(),
                    group.license().to_string(),
                    or_unknown(info.url.as_deref()),
                    or_unknown(info.vendor_url.as_deref()),
                    or_unknown(info.vendor_name.as_deref()),
                ]
            })
        })
        .collect();

    LicenseTable {
        head: HEADER.iter().map(|h| h.to_string()).collect(),
        body,
    }
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN_CELL).to_string()
}

#[derive(Serialize)]
struct JsonTable<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    data: &'a LicenseTable,
}

/// Machine presenter: `{"type":"table","data":{"head":[..],"body":[[..],..]}}`.
pub fn render_json(groups: &LicenseGroups) -> Result<String> {
    let table = build(groups);
    Ok(serde_json::to_string(&JsonTable {
        kind: "table",
        data: &table,
    })?)
}

/// Human presenter, drawn with box characters.
pub fn render_text(groups: &LicenseGroups) -> String {
    let license_table = build(groups);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            license_table
                .head
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );

    for row in &license_table.body {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }

    table.to_string()
}
