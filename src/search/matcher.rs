/// Parameters of the approximate matcher
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    pub threshold: f64,
    pub distance: usize,
    pub location: usize,
}

/// A lowercased query ready to be matched against many texts
#[derive(Debug, Clone)]
pub struct Pattern {
    lower: String,
    chars: Vec<char>,
}

impl Pattern {
    pub fn new(query: &str) -> Self {
        let lower = query.to_lowercase();
        let chars = lower.chars().collect();
        Self { lower, chars }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Score `text` against the pattern; lower is better, `None` means no match.
    ///
    /// The score of a candidate substring is its edit distance divided by
    /// the pattern length, plus how far it starts from `location` divided by
    /// `distance`. Only scores at or below the threshold count as matches.
    pub fn score(&self, text: &str, options: &MatchOptions) -> Option<f64> {
        if self.chars.is_empty() {
            return None;
        }

        let text = text.to_lowercase();
        if text == self.lower {
            return Some(0.0);
        }

        let text: Vec<char> = text.chars().collect();
        let m = self.chars.len();

        // cells[i] = (errors, start) of the best alignment of the first i
        // pattern chars against a substring ending at the current column
        let mut cells: Vec<(usize, usize)> = (0..=m).map(|i| (i, 0)).collect();
        let mut next = vec![(0usize, 0usize); m + 1];
        let mut best: Option<f64> = None;

        for (j, &tc) in text.iter().enumerate() {
            next[0] = (0, j + 1);
            for i in 1..=m {
                let cost = usize::from(self.chars[i - 1] != tc);
                let diagonal = (cells[i - 1].0 + cost, cells[i - 1].1);
                let skip_pattern = (next[i - 1].0 + 1, next[i - 1].1);
                let skip_text = (cells[i].0 + 1, cells[i].1);
                next[i] = [diagonal, skip_pattern, skip_text]
                    .into_iter()
                    .min_by_key(|&(errors, start)| (errors, start.abs_diff(options.location)))
                    .unwrap_or(diagonal);
            }
            std::mem::swap(&mut cells, &mut next);

            let (errors, start) = cells[m];
            let score = compute_score(errors, m, start, options);
            if score <= options.threshold && best.map_or(true, |b| score < b) {
                best = Some(score);
            }
        }

        best
    }
}

fn compute_score(errors: usize, pattern_len: usize, start: usize, options: &MatchOptions) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    let proximity = start.abs_diff(options.location);

    if options.distance == 0 {
        return if proximity > 0 { 1.0 } else { accuracy };
    }

    accuracy + proximity as f64 / options.distance as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> MatchOptions {
        MatchOptions {
            threshold: 0.4,
            distance: 100,
            location: 0,
        }
    }

    #[test]
    fn test_exact_match_scores_zero() {
        let pattern = Pattern::new("Pancakes");
        assert_eq!(pattern.score("pancakes", &options()), Some(0.0));
    }

    #[test]
    fn test_prefix_match_is_perfect() {
        let pattern = Pattern::new("pan");
        assert_eq!(pattern.score("Pancakes with syrup", &options()), Some(0.0));
    }

    #[test]
    fn test_typo_costs_one_error() {
        let pattern = Pattern::new("lasagne");
        let score = pattern.score("lasagna", &options()).unwrap();
        assert!((score - 1.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_penalty() {
        let pattern = Pattern::new("soup");
        let score = pattern.score("hearty tomato soup", &options()).unwrap();
        assert!((score - 0.14).abs() < 1e-9);

        let far = format!("{}soup", "x".repeat(60));
        assert_eq!(pattern.score(&far, &options()), None);
    }

    #[test]
    fn test_unrelated_text_does_not_match() {
        let pattern = Pattern::new("chocolate");
        assert_eq!(pattern.score("green salad", &options()), None);
    }

    #[test]
    fn test_zero_distance_requires_expected_location() {
        let strict = MatchOptions {
            distance: 0,
            ..options()
        };
        let pattern = Pattern::new("soup");
        assert_eq!(pattern.score("soup of the day", &strict), Some(0.0));
        assert_eq!(pattern.score("a soup", &strict), None);
    }
}
