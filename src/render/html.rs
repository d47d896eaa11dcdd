//! Static HTML page rendering — option tables, delta pages, flavour
//! comparisons, intrinsic listings. Self-contained pages with embedded CSS.
//!
//! Column sets vary per VM family: HotSpot pages carry the full
//! platform/lifecycle columns, OpenJ9 pages are name + description only,
//! dump-based families show type and default.

use crate::delta::{DeltaTable, FlavourComparison};
use crate::intrinsics::Intrinsic;
use crate::model::{SwitchInfo, SwitchMap};
use crate::parser::deprecation::DeprecationTable;
use crate::vm::VmFamily;

/// Escape for table cells while preserving the `<br>`/`<pre>` markers the
/// parsers deliberately produce.
fn escape_preserving_markup(raw: &str) -> String {
    raw.replace("<br>", "SAFE_BR")
        .replace("<pre>", "SAFE_PRE_OPEN")
        .replace("</pre>", "SAFE_PRE_CLOSE")
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace("SAFE_BR", "<br>")
        .replace("SAFE_PRE_OPEN", "<pre>")
        .replace("SAFE_PRE_CLOSE", "</pre>")
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page(title: &str, body: &str) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str("body { font-family: system-ui, sans-serif; margin: 2em; }\n");
    out.push_str("table { border-collapse: collapse; width: 100%; }\n");
    out.push_str("th, td { border: 1px solid #ccc; padding: 0.3em 0.5em; text-align: left; vertical-align: top; }\n");
    out.push_str("th { background: #f0f0f0; }\n");
    out.push_str("pre { margin: 0; white-space: pre-wrap; }\n");
    out.push_str(".removed { background: #fff0f0; }\n");
    out.push_str(".added { background: #f0fff0; }\n");
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    out.push_str(body);
    out.push_str("</body>\n</html>\n");

    out
}

fn cell(value: &str) -> String {
    format!("<td>{}</td>", escape_preserving_markup(value))
}

fn header_cells(names: &[&str]) -> String {
    let mut out = String::from("<tr>");
    for name in names {
        out.push_str(&format!("<th>{}</th>", name));
    }
    out.push_str("</tr>");
    out
}

fn option_columns(family: VmFamily) -> Vec<&'static str> {
    let mut columns = vec!["Name"];

    if family == VmFamily::Hotspot {
        columns.extend(["Since", "Deprecated"]);
    }
    if family != VmFamily::Openj9 {
        columns.push("Type");
    }
    if family == VmFamily::Hotspot {
        columns.extend(["OS", "CPU", "Component"]);
    }
    if family != VmFamily::Openj9 {
        columns.push("Default");
    }
    if matches!(family, VmFamily::Hotspot | VmFamily::GraalNative) {
        columns.push("Availability");
    }
    columns.push("Description");
    if family == VmFamily::Hotspot {
        columns.push("Defined in");
    }

    columns
}

/// Deprecated/obsoleted/expired lifecycle, stacked vertically in one cell.
fn deprecation_cell_markup(info: &SwitchInfo) -> String {
    let mut out = String::new();

    for (label, version) in [
        ("Deprecated", &info.deprecated),
        ("Obsoleted", &info.obsoleted),
        ("Expired", &info.expired),
    ] {
        if version.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str("<br>");
        }
        out.push_str(&format!(
            "<span style=\"white-space:nowrap\">{} in JDK{}</span>",
            label, version
        ));
    }

    out
}

/// Lifecycle on one line, for delta-page annotations.
fn deprecation_inline(info: &crate::parser::deprecation::DeprecatedInfo) -> String {
    let mut out = String::new();

    for (label, version) in [
        ("Deprecated", &info.deprecated_in),
        ("Obsoleted", &info.obsoleted_in),
        ("Expired", &info.expired_in),
    ] {
        if version.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str(", ");
        }
        out.push_str(&format!("{} in JDK{}", label, version));
    }

    out
}

fn option_row(info: &SwitchInfo, family: VmFamily) -> String {
    let mut out = String::from("<tr>");

    out.push_str(&cell(&info.name));

    if family == VmFamily::Hotspot {
        out.push_str(&cell(&info.since));
        out.push_str(&format!("<td>{}</td>", deprecation_cell_markup(info)));
    }
    if family != VmFamily::Openj9 {
        out.push_str(&cell(&info.type_));
    }
    if family == VmFamily::Hotspot {
        out.push_str(&cell(&info.os));
        out.push_str(&cell(&info.cpu));
        out.push_str(&cell(&info.component));
    }
    if family != VmFamily::Openj9 {
        let default = if info.range.is_empty() {
            info.default_value.clone()
        } else {
            format!("{}<br>{}", info.default_value, info.range)
        };
        out.push_str(&cell(&default));
    }
    if matches!(family, VmFamily::Hotspot | VmFamily::GraalNative) {
        out.push_str(&cell(&info.availability));
    }

    let description = if !info.description.is_empty() && !info.comment.is_empty() {
        format!("{}<br>{}", info.description, info.comment)
    } else if !info.description.is_empty() {
        info.description.clone()
    } else {
        info.comment.clone()
    };
    out.push_str(&cell(&description));

    if family == VmFamily::Hotspot {
        out.push_str(&cell(&info.defined_in));
    }

    out.push_str("</tr>");
    out
}

/// Per-VM option table page.
pub fn options_page(vm_name: &str, family: VmFamily, map: &SwitchMap) -> String {
    let title = format!("{} {} options", vm_name, family.display_name());

    let mut body = String::new();
    body.push_str(&format!("<p>{} options</p>\n", map.len()));
    body.push_str("<table>\n");
    body.push_str(&header_cells(&option_columns(family)));
    body.push('\n');

    for info in map.values() {
        body.push_str(&option_row(info, family));
        body.push('\n');
    }

    body.push_str("</table>\n");

    page(&title, &body)
}

/// Version-to-version delta page over one family's consecutive VM pairs.
/// Removed switches are annotated with any known deprecation lifecycle.
pub fn delta_page(title: &str, deltas: &[DeltaTable], deprecation: &DeprecationTable) -> String {
    let mut body = String::new();

    for delta in deltas {
        body.push_str(&format!(
            "<h2>{} to {}</h2>\n",
            html_escape(&delta.earlier),
            html_escape(&delta.later)
        ));
        body.push_str("<table class=\"delta\">\n");
        let removed_header = format!("Removed in {} ({})", delta.later, delta.removal_count());
        let added_header = format!("Added in {} ({})", delta.later, delta.addition_count());
        body.push_str(&header_cells(&[
            removed_header.as_str(),
            added_header.as_str(),
        ]));
        body.push_str("\n<tr>\n<td class=\"removed\">\n");

        for name in &delta.removed {
            body.push_str(&format!("<div>{}", html_escape(name)));
            if let Some(info) = deprecation.lookup(name) {
                let annotation = deprecation_inline(info);
                if !annotation.is_empty() {
                    body.push_str(&format!(" ({})", annotation));
                }
            }
            body.push_str("</div>\n");
        }

        body.push_str("</td>\n<td class=\"added\">\n");

        for name in &delta.added {
            body.push_str(&format!("<div>{}</div>\n", html_escape(name)));
        }

        body.push_str("</td>\n</tr>\n</table>\n");
    }

    page(title, &body)
}

/// Vanilla-vs-flavour comparison page.
pub fn flavour_page(comparison: &FlavourComparison) -> String {
    let title = format!("{} vs {}", comparison.vanilla, comparison.flavour);

    let mut body = String::new();

    body.push_str(&format!(
        "<h2>Only in {}</h2>\n",
        html_escape(&comparison.flavour)
    ));
    for name in &comparison.added {
        body.push_str(&format!("<div>{}</div>\n", html_escape(name)));
    }

    body.push_str(&format!(
        "<h2>Only in {}</h2>\n",
        html_escape(&comparison.vanilla)
    ));
    for name in &comparison.removed {
        body.push_str(&format!("<div>{}</div>\n", html_escape(name)));
    }

    if !comparison.changed_defaults.is_empty() {
        body.push_str("<h2>Changed defaults</h2>\n<table>\n");
        let vanilla_header = format!("{} value", comparison.vanilla);
        let flavour_header = format!("{} value", comparison.flavour);
        body.push_str(&header_cells(&[
            "Name",
            vanilla_header.as_str(),
            flavour_header.as_str(),
        ]));
        body.push('\n');

        for change in &comparison.changed_defaults {
            body.push_str(&format!(
                "<tr>{}{}{}</tr>\n",
                cell(&change.name),
                cell(&change.vanilla_value),
                cell(&change.flavour_value)
            ));
        }

        body.push_str("</table>\n");
    }

    page(&title, &body)
}

/// Per-VM intrinsics listing page.
pub fn intrinsics_page(vm_name: &str, intrinsics: &[Intrinsic]) -> String {
    let title = format!("{} intrinsics", vm_name);

    let mut body = String::new();
    body.push_str(&format!("<p>{} intrinsics</p>\n", intrinsics.len()));
    body.push_str("<table>\n");
    body.push_str(&header_cells(&[
        "Id",
        "Since",
        "Class",
        "Name",
        "Signature",
        "Flags",
    ]));
    body.push('\n');

    for intrinsic in intrinsics {
        body.push_str(&format!(
            "<tr>{}{}{}{}{}{}</tr>\n",
            cell(&intrinsic.id),
            cell(&intrinsic.since),
            cell(&intrinsic.class_name),
            cell(&intrinsic.name),
            cell(&intrinsic.signature),
            cell(&intrinsic.flags)
        ));
    }

    body.push_str("</table>\n");

    page(&title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SwitchInfo, PREFIX_XX};

    #[test]
    fn escape_keeps_parser_markup() {
        assert_eq!(
            escape_preserving_markup("a<br>b <pre>c</pre> & <x>"),
            "a<br>b <pre>c</pre> &amp; &lt;x&gt;"
        );
    }

    #[test]
    fn hotspot_page_has_platform_columns() {
        let mut map = SwitchMap::new();
        let mut info = SwitchInfo::new(PREFIX_XX, "UseTLAB");
        info.type_ = "bool".to_string();
        info.os = "linux".to_string();
        info.since = "JDK8".to_string();
        map.insert(info.key(), info);

        let html = options_page("JDK8", VmFamily::Hotspot, &map);

        assert!(html.contains("<th>OS</th>"));
        assert!(html.contains("<th>Component</th>"));
        assert!(html.contains("<td>UseTLAB</td>"));
        assert!(html.contains("<td>linux</td>"));
    }

    #[test]
    fn openj9_page_is_name_and_description_only() {
        let mut map = SwitchMap::new();
        let mut info = SwitchInfo::new(PREFIX_XX, "nojit");
        info.description = "<pre>disable the JIT</pre>".to_string();
        map.insert(info.key(), info);

        let html = options_page("OpenJ9", VmFamily::Openj9, &map);

        assert!(!html.contains("<th>Type</th>"));
        assert!(!html.contains("<th>Default</th>"));
        assert!(html.contains("<pre>disable the JIT</pre>"));
    }

    #[test]
    fn range_renders_below_default() {
        let mut map = SwitchMap::new();
        let mut info = SwitchInfo::new(PREFIX_XX, "Distance");
        info.default_value = "-1".to_string();
        info.range = "range(-1, 512)".to_string();
        map.insert(info.key(), info);

        let html = options_page("JDK9", VmFamily::Hotspot, &map);

        assert!(html.contains("-1<br>range(-1, 512)"));
    }

    #[test]
    fn delta_page_annotates_removed_with_deprecation() {
        let mut table = DeprecationTable::default();
        table
            .ingest(r#"{ "Gone", JDK_Version::jdk(9), JDK_Version::jdk(10), JDK_Version::undefined() },"#)
            .unwrap();

        let deltas = vec![DeltaTable {
            earlier: "JDK9".to_string(),
            later: "JDK10".to_string(),
            added: vec!["Fresh".to_string()],
            removed: vec!["Gone".to_string()],
        }];

        let html = delta_page("HotSpot deltas", &deltas, &table);

        assert!(html.contains("Gone (Deprecated in JDK9, Obsoleted in JDK10)"));
        assert!(html.contains("<div>Fresh</div>"));
    }

    #[test]
    fn deprecation_cell_stacks_lifecycle() {
        let mut info = SwitchInfo::new(PREFIX_XX, "Old");
        info.deprecated = "8".to_string();
        info.obsoleted = "9".to_string();

        let markup = deprecation_cell_markup(&info);

        assert!(markup.contains("Deprecated in JDK8"));
        assert!(markup.contains("<br>"));
        assert!(markup.contains("Obsoleted in JDK9"));
        assert!(!markup.contains("Expired"));
    }
}
