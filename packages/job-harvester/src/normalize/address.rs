/// Split a raw address into `(city, district)` on the `:` separator the
/// extractor inserts. Segments beyond the second are dropped.
pub fn split_address(raw: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(raw) = raw else {
        return (None, None);
    };

    let mut parts = raw.split(':').map(str::trim);
    let city = parts.next().map(str::to_string);
    let district = parts.next().map(str::to_string);
    (city, district)
}
