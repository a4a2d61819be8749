/*! Text helpers shared by the heuristics and checks. */

/// The string, unless it is absent or whitespace-only.
pub fn non_blank(s: Option<&str>) -> Option<&str> {
  s.filter(|s| !s.trim().is_empty())
}

/// Lowercase and drop everything that is not alphanumeric.
///
/// `"Sign-in, now!"` becomes `"signinnow"`.
pub fn normalize(s: &str) -> String {
  s.chars()
    .filter(|c| c.is_alphanumeric())
    .flat_map(char::to_lowercase)
    .collect()
}

/// Levenshtein distance over Unicode scalar values.
pub fn edit_distance(a: &str, b: &str) -> usize {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();
  if a.is_empty() {
    return b.len();
  }
  if b.is_empty() {
    return a.len();
  }

  // Two-row dynamic programming table
  let mut previous: Vec<usize> = (0..=b.len()).collect();
  let mut current = vec![0; b.len() + 1];
  for (i, ca) in a.iter().enumerate() {
    if let Some(first) = current.first_mut() {
      *first = i + 1;
    }
    for (j, cb) in b.iter().enumerate() {
      let substitution = previous.get(j).map_or(usize::MAX, |&d| d + usize::from(ca != cb));
      let deletion = previous.get(j + 1).map_or(usize::MAX, |&d| d + 1);
      let insertion = current.get(j).map_or(usize::MAX, |&d| d + 1);
      if let Some(cell) = current.get_mut(j + 1) {
        *cell = substitution.min(deletion).min(insertion);
      }
    }
    std::mem::swap(&mut previous, &mut current);
  }
  previous.last().copied().unwrap_or_default()
}

/// Length in chars.
pub fn char_len(s: &str) -> usize {
  s.chars().count()
}
