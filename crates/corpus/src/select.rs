//! Selection strategies over the corpus.

use {
    chrono::{Datelike, NaiveDate, Utc},
    chrono_tz::Tz,
    rand::Rng,
};

use crate::{
    entry::RantEntry,
    error::{Error, Result},
};

/// How to choose an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform over the whole corpus.
    Random,
    /// Deterministic for a given local calendar day.
    DateIndexed,
}

/// Pick one entry using `strategy`, with "today" resolved in `tz`.
pub fn pick<'a>(entries: &'a [RantEntry], strategy: Strategy, tz: Tz) -> Result<&'a RantEntry> {
    match strategy {
        Strategy::Random => pick_random(entries),
        Strategy::DateIndexed => {
            pick_for_date(entries, Utc::now().with_timezone(&tz).date_naive())
        },
    }
}

/// Deterministic pick for a local calendar date.
///
/// Day 1 of the year maps to index 0, so consecutive days walk the corpus
/// in order and every invocation within the same local day agrees. The
/// cycle restarts at new year, which drifts when the corpus length does not
/// divide the year evenly.
pub fn pick_for_date(entries: &[RantEntry], date: NaiveDate) -> Result<&RantEntry> {
    if entries.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    let index = (date.ordinal() as usize - 1) % entries.len();
    Ok(&entries[index])
}

fn pick_random(entries: &[RantEntry]) -> Result<&RantEntry> {
    if entries.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    let index = rand::rng().random_range(0..entries.len());
    Ok(&entries[index])
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Category;

    fn corpus(texts: &[&str]) -> Vec<RantEntry> {
        texts
            .iter()
            .map(|text| RantEntry {
                date: "2024-01-01".into(),
                source: "test".into(),
                category: Category::Unsure,
                text: (*text).to_string(),
            })
            .collect()
    }

    #[test]
    fn random_pick_is_a_member() {
        let entries = corpus(&["a", "b", "c"]);
        for _ in 0..200 {
            let picked = pick(&entries, Strategy::Random, chrono_tz::UTC).unwrap();
            assert!(entries.contains(picked));
        }
    }

    #[test]
    fn random_pick_on_empty_fails() {
        assert!(matches!(
            pick(&[], Strategy::Random, chrono_tz::UTC),
            Err(Error::EmptyCorpus)
        ));
    }

    #[test]
    fn date_indexed_on_empty_fails() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(matches!(pick_for_date(&[], date), Err(Error::EmptyCorpus)));
    }

    #[test]
    fn same_day_same_entry() {
        let entries = corpus(&["a", "b", "c"]);
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let first = pick_for_date(&entries, date).unwrap();
        let second = pick_for_date(&entries, date).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn consecutive_days_advance_by_one() {
        let entries = corpus(&["a", "b", "c"]);
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for _ in 0..10 {
            let today = entries
                .iter()
                .position(|e| e == pick_for_date(&entries, date).unwrap())
                .unwrap();
            let next = date.succ_opt().unwrap();
            let tomorrow = entries
                .iter()
                .position(|e| e == pick_for_date(&entries, next).unwrap())
                .unwrap();
            assert_eq!(tomorrow, (today + 1) % entries.len());
            date = next;
        }
    }

    #[test]
    fn second_day_of_year_is_second_entry() {
        // Two-entry corpus, 2024-01-02: ordinal day 2 maps to index 1.
        let entries = corpus(&["A", "B"]);
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(pick_for_date(&entries, date).unwrap().text, "B");
    }

    #[test]
    fn cycle_wraps_past_corpus_length() {
        let entries = corpus(&["a", "b", "c"]);
        // Day 4 wraps back to index 0.
        let date = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        assert_eq!(pick_for_date(&entries, date).unwrap().text, "a");
    }
}
