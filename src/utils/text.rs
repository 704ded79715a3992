use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Lower-cases and strips diacritics so that "Lớp Mười" and "lop muoi"
/// compare equal. `đ` has no decomposition and is mapped to `d` explicitly.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            other => other,
        })
        .collect()
}

/// Candidates whose normalized form contains the normalized query anywhere.
/// Order is preserved; a blank query keeps every candidate.
pub fn filter<S: AsRef<str>>(candidates: &[S], query: &str) -> Vec<String> {
    let needle = normalize(query.trim());
    candidates
        .iter()
        .map(|c| c.as_ref())
        .filter(|candidate| normalize(candidate).contains(&needle))
        .map(str::to_string)
        .collect()
}

/// Editable combo box with incremental suggestions.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    candidates: Vec<String>,
    text: String,
    suggestions: Vec<String>,
    selected: Option<String>,
}

impl SearchInput {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
        candidates.sort();
        candidates.dedup();
        let suggestions = candidates.clone();
        Self {
            candidates,
            text: String::new(),
            suggestions,
            selected: None,
        }
    }

    /// Replaces the candidate list, keeping the typed text.
    pub fn set_candidates<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = std::mem::take(&mut self.text);
        *self = Self::new(candidates);
        self.set_text(text);
    }

    /// Appends typed characters. Typing discards an earlier selection unless
    /// the text still names a candidate exactly.
    pub fn input(&mut self, chunk: &str) {
        self.text.push_str(chunk);
        self.selected = None;
        self.refresh();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selected = None;
        self.refresh();
    }

    /// Accepts the first suggestion: the text becomes exactly that candidate.
    pub fn confirm(&mut self) -> Option<&str> {
        let first = self.suggestions.first()?.clone();
        self.text = first.clone();
        self.selected = Some(first);
        self.refresh();
        self.selected.as_deref()
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    fn refresh(&mut self) {
        self.suggestions = filter(&self.candidates, &self.text);
        if let Some(exact) = self.candidates.iter().find(|c| **c == self.text) {
            self.selected = Some(exact.clone());
        }
    }
}
