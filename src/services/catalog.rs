use std::collections::{BTreeSet, HashMap};

use crate::models::{Question, QuestionSet};

/// Groups questions by (class, subject). Sets appear in the order their
/// first question appears; question order inside a set is preserved.
pub fn group_into_sets(questions: &[Question]) -> Vec<QuestionSet> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut sets: Vec<QuestionSet> = Vec::new();

    for q in questions {
        let key = (q.class.as_str(), q.subject.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            sets.push(QuestionSet {
                class: q.class.clone(),
                subject: q.subject.clone(),
                questions: Vec::new(),
            });
            sets.len() - 1
        });
        sets[slot].questions.push(q.clone());
    }

    sets
}

/// Distinct class labels, sorted.
pub fn class_options(questions: &[Question]) -> Vec<String> {
    distinct(questions.iter().map(|q| q.class.as_str()))
}

/// Distinct subject labels, sorted.
pub fn subject_options(questions: &[Question]) -> Vec<String> {
    distinct(questions.iter().map(|q| q.subject.as_str()))
}

/// Distinct class labels across question sets, sorted.
pub fn set_class_options(sets: &[QuestionSet]) -> Vec<String> {
    distinct(sets.iter().map(|s| s.class.as_str()))
}

/// Distinct subject labels across question sets, sorted.
pub fn set_subject_options(sets: &[QuestionSet]) -> Vec<String> {
    distinct(sets.iter().map(|s| s.subject.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn matches(value: &str, wanted: Option<&str>) -> bool {
    match wanted {
        Some(w) if !w.is_empty() => value == w,
        _ => true,
    }
}

/// Offline search: exact match on class and subject, blank means "any".
pub fn filter_questions(
    questions: &[Question],
    class: Option<&str>,
    subject: Option<&str>,
) -> Vec<Question> {
    questions
        .iter()
        .filter(|q| matches(&q.class, class) && matches(&q.subject, subject))
        .cloned()
        .collect()
}

/// Indices of the sets matching the class/subject selection.
pub fn filter_sets(sets: &[QuestionSet], class: Option<&str>, subject: Option<&str>) -> Vec<usize> {
    sets.iter()
        .enumerate()
        .filter(|(_, s)| matches(&s.class, class) && matches(&s.subject, subject))
        .map(|(i, _)| i)
        .collect()
}
