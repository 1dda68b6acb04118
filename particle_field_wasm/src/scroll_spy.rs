//! Navigation highlighting: picks the section currently scrolled into view.

pub const DEFAULT_OFFSET: f64 = 100.0;

/// Index of the last section whose top is at or above `position`.
///
/// `tops` holds one entry per section in document order; `None` marks a
/// section that is not present in the page and is skipped. Falls back to the
/// first section when none qualifies and returns `None` only for an empty list.
pub fn active_section(tops: &[Option<f64>], position: f64) -> Option<usize> {
    if tops.is_empty() {
        return None;
    }

    let active = tops
        .iter()
        .enumerate()
        .filter(|(_, top)| matches!(top, Some(top) if *top <= position))
        .map(|(index, _)| index)
        .last()
        .unwrap_or(0);

    Some(active)
}

#[derive(Debug, Clone)]
pub struct ScrollSpy {
    ids: Vec<String>,
    offset: f64,
    active: Option<usize>,
}

impl ScrollSpy {
    pub fn new(ids: Vec<String>, offset: f64) -> Self {
        let active = if ids.is_empty() { None } else { Some(0) };

        ScrollSpy { ids, offset, active }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|index| self.ids[index].as_str())
    }

    /// Re-evaluates the active section for `scroll_y`, looking section tops up
    /// through `top_of`. Returns `true` when the active section changed.
    pub fn update<F>(&mut self, scroll_y: f64, mut top_of: F) -> bool
    where
        F: FnMut(&str) -> Option<f64>,
    {
        let tops: Vec<Option<f64>> = self.ids.iter().map(|id| top_of(id.as_str())).collect();
        let active = active_section(&tops, scroll_y + self.offset);
        let changed = active != self.active;

        self.active = active;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_active_section() {
        assert_eq!(active_section(&[], 10.0), None);

        let mut spy = ScrollSpy::new(Vec::new(), DEFAULT_OFFSET);
        assert!(!spy.update(0.0, |_| Some(0.0)));
        assert_eq!(spy.active_id(), None);
    }

    #[test]
    fn defaults_to_first_section_when_none_qualify() {
        assert_eq!(active_section(&[Some(200.0), Some(400.0)], 100.0), Some(0));
        assert_eq!(active_section(&[None, None], 100.0), Some(0));
    }

    #[test]
    fn missing_sections_are_skipped() {
        assert_eq!(active_section(&[Some(0.0), Some(300.0), None], 1000.0), Some(1));
    }
}
