//! Terminal output for command results.
//!
//! Every `render_*` function returns the text it would print, so output can be
//! checked in tests without capturing stdout. Colour is applied through
//! `colored`, which honours `NO_COLOR` and non-terminal output on its own.

use colored::*;
use parent_hub::api::{CmdMessage, MessageLevel};
use parent_hub::config::{HubConfig, CONFIG_KEYS};
use parent_hub::facets::{group_by_letter, CityEntry, FacetCount, FacetOptions};
use parent_hub::host::ResultSummary;
use parent_hub::links::{detail_url, pretty_name, rating_label};
use parent_hub::model::{Coordinates, Marker, Record};
use unicode_width::UnicodeWidthStr;

const LINE_WIDTH: usize = 100;
const CITY_WIDTH: usize = 18;
const BADGE_WIDTH: usize = 13;
const PFCC_MARKER: &str = "$";

pub fn render_summary(summary: &ResultSummary) -> String {
    let text = summary.to_string();
    let styled = match summary {
        ResultSummary::Unavailable { .. } => text.red(),
        ResultSummary::NoMatches { .. } => text.yellow(),
        ResultSummary::Showing { .. } => text.bold(),
    };
    format!("{}\n", styled)
}

pub fn render_record_list(records: &[Record]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let idx_width = records.len().to_string().len() + 1;
    let mut out = String::new();

    for (i, record) in records.iter().enumerate() {
        let idx_str = format!("{:>width$}", format!("{}.", i + 1), width = idx_width);
        let city = truncate_to_width(&pretty_name(record.city()), CITY_WIDTH);
        let city = pad_to_width(&city, CITY_WIDTH);
        let badge = pad_to_width(rating_label(record.rating()), BADGE_WIDTH);
        let pfcc = if record.is_pfcc_funded() { PFCC_MARKER } else { " " };

        // index, name, city, badge and marker, single-space separated
        let fixed_width = idx_width + CITY_WIDTH + BADGE_WIDTH + PFCC_MARKER.width() + 4;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let name = pad_to_width(&truncate_to_width(record.name(), available), available);

        out.push_str(&format!(
            "{} {} {} {} {}\n",
            idx_str.dimmed(),
            name,
            city,
            color_badge(record.rating(), &badge),
            pfcc.green()
        ));
    }

    out
}

fn color_badge(rating: &str, badge: &str) -> ColoredString {
    match rating {
        "3" => badge.yellow(),
        "2" => badge.white(),
        "1" => badge.red(),
        _ => badge.dimmed(),
    }
}

pub fn render_markers(markers: &[Marker], center: Option<Coordinates>) -> String {
    let mut out = String::new();
    if let Some(center) = center {
        out.push_str(&format!(
            "{} {:.4}, {:.4}\n",
            "Map centre:".bold(),
            center.latitude,
            center.longitude
        ));
    }
    if markers.is_empty() {
        out.push_str(&format!("{}\n", "No mappable programs.".dimmed()));
        return out;
    }
    for marker in markers {
        out.push_str(&format!(
            "  {:>9.4} {:>9.4}  {}  {}\n",
            marker.latitude,
            marker.longitude,
            marker.title,
            marker.detail_url.dimmed()
        ));
    }
    out
}

pub fn render_cities(cities: &[CityEntry]) -> String {
    if cities.is_empty() {
        return "No cities found.\n".to_string();
    }

    let name_width = cities
        .iter()
        .map(|c| pretty_name(&c.name).width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (letter, group) in group_by_letter(cities.to_vec()) {
        out.push_str(&format!("{}\n", letter.to_string().bold()));
        for city in group {
            let name = pretty_name(&city.name);
            out.push_str(&format!(
                "  {} {}\n",
                pad_to_width(&name, name_width),
                city.count.to_string().dimmed()
            ));
        }
    }
    out
}

pub fn render_facets(facets: &FacetOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} ({})\n", "Cities".bold(), facets.cities.len()));
    out.push_str(&format!("  {}\n", join_pretty(&facets.cities)));
    out.push_str(&format!("{} ({})\n", "Counties".bold(), facets.counties.len()));
    out.push_str(&format!("  {}\n", join_pretty(&facets.counties)));

    out.push_str(&format!("{}\n", "SUTQ ratings".bold()));
    for count in &facets.ratings {
        let label = format!("{} ({})", rating_label(&count.value), count.value);
        out.push_str(&render_count_line(&label, count));
    }

    out.push_str(&format!("{}\n", "Program types".bold()));
    for count in &facets.program_types {
        out.push_str(&render_count_line(&count.value, count));
    }

    out
}

fn render_count_line(label: &str, count: &FacetCount) -> String {
    format!("  {} {}\n", pad_to_width(label, 44), count.count.to_string().dimmed())
}

fn join_pretty(values: &[String]) -> String {
    values
        .iter()
        .map(|v| pretty_name(v))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_record_detail(record: &Record) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        record.name().bold(),
        format!("#{}", record.id()).dimmed()
    ));
    out.push_str(&format!(
        "{}, {} {}\n",
        record.street_address(),
        pretty_name(record.city()),
        record.zip()
    ));
    if !record.county().is_empty() {
        out.push_str(&format!("{} County\n", pretty_name(record.county())));
    }
    out.push('\n');

    let mut field = |label: &str, value: String| {
        out.push_str(&format!("  {} {}\n", pad_to_width(label, 14).dimmed(), value));
    };
    field("Program type", record.program_type().to_string());
    field("SUTQ", rating_label(record.rating()).to_string());
    field(
        "PFCC",
        if record.is_pfcc_funded() { "Yes" } else { "No" }.to_string(),
    );
    if let Some(at) = record.coordinates() {
        field("Location", format!("{:.5}, {:.5}", at.latitude, at.longitude));
    }
    field("Page", detail_url(record));

    out
}

pub fn render_config(config: &HubConfig) -> String {
    CONFIG_KEYS
        .iter()
        .map(|key| format!("{} = {}\n", key, config.get(key).unwrap_or_default()))
        .collect()
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let styled = match message.level {
                MessageLevel::Info => message.content.dimmed(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
                MessageLevel::Error => message.content.red(),
            };
            format!("{}\n", styled)
        })
        .collect()
}

/// Errors go to stderr, everything else to stdout.
pub fn print_messages(messages: &[CmdMessage]) {
    let (errors, rest): (Vec<CmdMessage>, Vec<CmdMessage>) = messages
        .iter()
        .cloned()
        .partition(|m| m.level == MessageLevel::Error);
    print!("{}", render_messages(&rest));
    eprint!("{}", render_messages(&errors));
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parent_hub::facets::city_index;
    use parent_hub::model::fields;

    fn plain() {
        colored::control::set_override(false);
    }

    fn record(id: &str, name: &str, city: &str, rating: &str, pfcc: &str) -> Record {
        Record::from_pairs([
            (fields::ID, id),
            (fields::NAME, name),
            (fields::CITY, city),
            (fields::COUNTY, "FRANKLIN"),
            (fields::STREET_ADDRESS, "12 High St"),
            (fields::ZIP, "43215"),
            (fields::RATING, rating),
            (fields::PFCC, pfcc),
            (fields::PROGRAM_TYPE, "Registered Day Camp or Approved Day Camp"),
        ])
    }

    fn sample_records() -> Vec<Record> {
        vec![
            record("100", "Little Stars Academy", "COLUMBUS", "3", "Y"),
            record("200", "Sunrise Learning", "COLUMBUS", "", "N"),
            record("300", "Maple Tree Preschool", "COLUMBUS", "2", "N"),
            record("400", "Toledo Kids Club", "TOLEDO", "1", "N"),
        ]
    }

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert_eq!(truncate_to_width("Sunrise Learning", 8), "Sunrise…");
        assert_eq!(truncate_to_width("日本語の保育園", 7), "日本語…");
        assert_eq!(pad_to_width("日本", 6).width(), 6);
    }

    #[test]
    fn test_record_list_lines() {
        plain();
        let output = render_record_list(&sample_records()[..2]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1. Little Stars Academy"));
        assert!(lines[0].contains("Columbus"));
        assert!(lines[0].contains("Gold Rated"));
        assert!(lines[0].trim_end().ends_with(PFCC_MARKER));
        assert!(lines[1].contains("Not Rated"));
    }

    #[test]
    fn test_long_names_are_truncated() {
        plain();
        let long = record("1", &"Very Long Name ".repeat(10), "AKRON", "", "Y");
        let output = render_record_list(&[long]);
        assert!(output.contains('…'));
        assert!(output.lines().next().unwrap().width() <= LINE_WIDTH);
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        assert_eq!(render_record_list(&[]), "");
    }

    #[test]
    fn test_cities_grouped_by_letter() {
        plain();
        let output = render_cities(&city_index(&sample_records()));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "C");
        assert!(lines[1].contains("Columbus") && lines[1].ends_with('3'));
        assert_eq!(lines[2], "T");
        assert_eq!(render_cities(&[]), "No cities found.\n");
    }

    #[test]
    fn test_facets_list_every_rating() {
        plain();
        let output = render_facets(&FacetOptions::from_records(&sample_records()));
        assert!(output.contains("Cities (2)"));
        assert!(output.contains("Columbus, Toledo"));
        assert!(output.contains("Not Rated (0)"));
        assert!(output.contains("Registered Day Camp or Approved Day Camp"));
    }

    #[test]
    fn test_record_detail() {
        plain();
        let output = render_record_detail(&sample_records()[0]);
        assert!(output.starts_with("Little Stars Academy #100"));
        assert!(output.contains("12 High St, Columbus 43215"));
        assert!(output.contains("Franklin County"));
        assert!(output.contains("/daycare/100-little-stars-academy-columbus"));
    }

    #[test]
    fn test_markers_and_center() {
        plain();
        let marker = Marker {
            latitude: 41.65,
            longitude: -83.54,
            title: "Toledo Kids Club".into(),
            detail_url: "/daycare/400-toledo-kids-club-toledo".into(),
        };
        let output = render_markers(&[marker.clone()], Some(marker.coordinates()));
        assert!(output.starts_with("Map centre: 41.6500, -83.5400"));
        assert!(output.contains("Toledo Kids Club"));
        assert!(render_markers(&[], None).contains("No mappable programs."));
    }

    #[test]
    fn test_summary_and_config() {
        plain();
        let summary = ResultSummary::NoMatches { total: 12 };
        assert_eq!(
            render_summary(&summary),
            "No programs match your filters (12 in directory)\n"
        );
        let config = render_config(&HubConfig::default());
        assert!(config.contains("page-size = 50\n"));
        assert!(config.contains("data-file = \n"));
    }
}
