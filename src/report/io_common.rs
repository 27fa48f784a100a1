use vote_aggregation::Point;

/// Capitalizes every word, keeping the parts of hyphenated names apart.
///
/// `CARAS-SEVERIN` becomes `Caras-Severin`.
pub fn to_title_case(s: &str) -> String {
    s.split('-').map(capitalize).collect::<Vec<String>>().join("-")
}

// A word starts at an ASCII word character and runs until the next whitespace.
fn capitalize(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_whitespace() {
            in_word = false;
            res.push(c);
        } else if in_word {
            res.extend(c.to_lowercase());
        } else if c.is_ascii_alphanumeric() || c == '_' {
            in_word = true;
            res.extend(c.to_uppercase());
        } else {
            res.push(c);
        }
    }
    res
}

pub fn coord(point: &Point) -> String {
    format!("{},{}", point.lat, point.lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case() {
        assert_eq!(to_title_case("CARAS-SEVERIN"), "Caras-Severin");
        assert_eq!(to_title_case("satu mare"), "Satu Mare");
        assert_eq!(to_title_case("bistrita-nasaud"), "Bistrita-Nasaud");
        assert_eq!(to_title_case("(cluj) napoca"), "(Cluj) Napoca");
        assert_eq!(to_title_case(""), "");
        // Words only start at ASCII letters, digits or '_'.
        assert_eq!(to_title_case("ăBC"), "ăBc");
        assert_eq!(to_title_case("iaşi"), "Iaşi");
    }

    #[test]
    fn coordinates() {
        let p = Point {
            lat: 46.77,
            lng: 23.6,
            ..Point::default()
        };
        assert_eq!(coord(&p), "46.77,23.6");
    }
}
