/// How a batch name is matched against file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRules {
    pub suffix: String,
    pub boundary_chars: Vec<char>,
    pub case_sensitive: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            suffix: ".csv".to_string(),
            boundary_chars: vec!['-', '_', ' '],
            case_sensitive: true,
        }
    }
}

impl MatchRules {
    fn normalize(&self, s: &str) -> String {
        if self.case_sensitive {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    }

    /// True when `filename` carries the suffix and its stem is `batch`
    /// alone or `batch` followed by a boundary character.
    pub fn matches(&self, batch: &str, filename: &str) -> bool {
        if batch.is_empty() {
            return false;
        }

        let name = self.normalize(filename);
        let batch = self.normalize(batch);
        let suffix = self.normalize(&self.suffix);

        let Some(stem) = name.strip_suffix(suffix.as_str()) else {
            return false;
        };
        let Some(rest) = stem.strip_prefix(batch.as_str()) else {
            return false;
        };

        match rest.chars().next() {
            None => true,
            Some(c) => self.boundary_chars.contains(&c),
        }
    }
}

/// First matching file name in lexicographic order, or `None` when no
/// timetable has been published for the batch.
pub fn find_timetable_file<S: AsRef<str>>(
    batch: &str,
    available: &[S],
    rules: &MatchRules,
) -> Option<String> {
    let mut candidates: Vec<&str> = available
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| rules.matches(batch, name))
        .collect();
    candidates.sort_unstable();

    if candidates.len() > 1 {
        tracing::debug!(
            "{} timetable files match batch '{}', using '{}'",
            candidates.len(),
            batch,
            candidates[0]
        );
    }

    candidates.first().map(|name| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_of_other_batch_is_not_a_match() {
        let files = ["B1-Mon.csv", "B10-Mon.csv"];
        assert_eq!(
            find_timetable_file("B1", &files, &MatchRules::default()),
            Some("B1-Mon.csv".to_string())
        );

        let files = ["B10-Mon.csv"];
        assert_eq!(find_timetable_file("B1", &files, &MatchRules::default()), None);
    }

    #[test]
    fn test_boundaries_and_bare_stem() {
        let rules = MatchRules::default();
        assert!(rules.matches("K1", "K1.csv"));
        assert!(rules.matches("K1", "K1_timetable.csv"));
        assert!(rules.matches("K1", "K1 Practicals.csv"));
        assert!(!rules.matches("K1", "K1-timetable.xlsx"));
        assert!(!rules.matches("K1", "xK1-timetable.csv"));
        assert!(!rules.matches("", "K1.csv"));
    }

    #[test]
    fn test_lexicographic_choice_is_independent_of_listing_order() {
        let files = vec!["K1-week2.csv".to_string(), "K1-week1.csv".to_string()];
        assert_eq!(
            find_timetable_file("K1", &files, &MatchRules::default()),
            Some("K1-week1.csv".to_string())
        );
    }

    #[test]
    fn test_case_sensitivity() {
        let files = ["k1-timetable.CSV"];
        assert_eq!(find_timetable_file("K1", &files, &MatchRules::default()), None);

        let rules = MatchRules {
            case_sensitive: false,
            ..MatchRules::default()
        };
        assert_eq!(
            find_timetable_file("K1", &files, &rules),
            Some("k1-timetable.CSV".to_string())
        );
    }
}
