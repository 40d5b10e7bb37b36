use crate::presentation::size::{ScaledSize, SizeUnit};
use crate::types::AggregatedListing;

pub mod size;

const NAME_SEPARATOR: &str = "   ";

/// Lines printed by the `list` and `search` commands.
///
/// Common prefixes come first, then objects with their size, then the total.
/// Names are shown relative to the requested path; an object whose relative
/// name is empty (the path itself) is counted in the total but not listed.
pub fn render_listing(
    listing: &AggregatedListing,
    path: &str,
    size_unit: Option<SizeUnit>,
) -> Vec<String> {
    let mut lines: Vec<String> = listing
        .common_prefixes
        .iter()
        .map(|prefix| relative_name(prefix, path).to_string())
        .collect();

    for object in &listing.contents {
        let name = relative_name(&object.key, path);
        if name.is_empty() {
            continue;
        }

        lines.push(format!(
            "{}{NAME_SEPARATOR}{name}",
            ScaledSize::new(object.size, size_unit).padded()
        ));
    }

    lines.push(render_total_size(listing, size_unit));
    lines
}

pub fn render_total_size(listing: &AggregatedListing, size_unit: Option<SizeUnit>) -> String {
    format!(
        "Total Size: {}",
        ScaledSize::new(listing.total_size(), size_unit).padded()
    )
}

fn relative_name<'a>(key: &'a str, path: &str) -> &'a str {
    key.strip_prefix(path).unwrap_or(key)
}
