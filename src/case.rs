//! Case conversion for field names: callers may spell a field `UniqueName`, `uniqueName` or `unique_name`.

/// Convert an identifier from camelCase or PascalCase to snake_case.
/// e.g. "uniqueName" -> "unique_name", "UniqueName" -> "unique_name", "UserID" -> "user_id"
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p));
            let next = chars.get(i + 1);
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(_) => next.map(|n| n.is_lowercase()).unwrap_or(false),
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::to_snake_case;

    #[test]
    fn converts_common_spellings() {
        assert_eq!(to_snake_case("uniqueName"), "unique_name");
        assert_eq!(to_snake_case("UniqueName"), "unique_name");
        assert_eq!(to_snake_case("unique_name"), "unique_name");
        assert_eq!(to_snake_case("Id"), "id");
    }

    #[test]
    fn keeps_acronyms_together() {
        assert_eq!(to_snake_case("UserID"), "user_id");
        assert_eq!(to_snake_case("HTTPStatus"), "http_status");
        assert_eq!(to_snake_case("address2Line"), "address2_line");
    }
}
