//! Roman numerals, used for French Republican years ("an XI").

const NUMERALS: &[(u32, &str)] = &[
  (1000, "M"),
  (900, "CM"),
  (500, "D"),
  (400, "CD"),
  (100, "C"),
  (90, "XC"),
  (50, "L"),
  (40, "XL"),
  (10, "X"),
  (9, "IX"),
  (5, "V"),
  (4, "IV"),
  (1, "I"),
];

/// Render `value` as an upper-case Roman numeral. Zero renders as "".
pub fn to_roman(mut value: u32) -> String {
  let mut out = String::new();
  for &(n, literal) in NUMERALS {
    while value >= n {
      out.push_str(literal);
      value -= n;
    }
  }
  out
}

fn digit(c: char) -> Option<u32> {
  match c.to_ascii_uppercase() {
    'I' => Some(1),
    'V' => Some(5),
    'X' => Some(10),
    'L' => Some(50),
    'C' => Some(100),
    'D' => Some(500),
    'M' => Some(1000),
    _ => None,
  }
}

/// Parse a Roman numeral, accepting subtractive notation ("IV", "XIX").
/// Returns `None` for an empty string or any non-numeral character.
pub fn from_roman(s: &str) -> Option<u32> {
  let values: Vec<u32> = s.trim().chars().map(digit).collect::<Option<_>>()?;
  if values.is_empty() {
    return None;
  }
  let mut total: i64 = 0;
  for (i, v) in values.iter().enumerate() {
    match values.get(i + 1) {
      Some(next) if next > v => total -= i64::from(*v),
      _ => total += i64::from(*v),
    }
  }
  u32::try_from(total).ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_subtractive_forms() {
    assert_eq!(to_roman(4), "IV");
    assert_eq!(to_roman(11), "XI");
    assert_eq!(to_roman(1999), "MCMXCIX");
    assert_eq!(to_roman(0), "");
  }

  #[test]
  fn parses_mixed_case() {
    assert_eq!(from_roman("XIV"), Some(14));
    assert_eq!(from_roman("xi"), Some(11));
    assert_eq!(from_roman("MCMXCIX"), Some(1999));
    assert_eq!(from_roman(""), None);
    assert_eq!(from_roman("XQ"), None);
  }

  #[test]
  fn every_year_of_the_republic_survives() {
    for year in 1..=40 {
      assert_eq!(from_roman(&to_roman(year)), Some(year));
    }
  }
}
