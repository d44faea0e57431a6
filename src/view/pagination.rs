use serde::Serialize;

/// Previous/next controls for a paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub limit: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(current_page: u32, limit: u32, total: u64) -> Self {
        Self {
            current_page: current_page.max(1),
            limit: limit.max(1),
            total,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.limit))
    }

    /// Controls only render when there is more than one page of results.
    pub fn is_visible(&self) -> bool {
        self.total > u64::from(self.limit)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.current_page) * u64::from(self.limit) < self.total
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.current_page + 1)
    }

    /// e.g. `[Previous]  Page 1 of 3  [Next]`, with disabled controls in parentheses.
    pub fn render(&self) -> String {
        let previous = if self.has_previous() { "[Previous]" } else { "(Previous)" };
        let next = if self.has_next() { "[Next]" } else { "(Next)" };
        format!(
            "{previous}  Page {} of {}  {next}",
            self.current_page,
            self.total_pages()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_results_over_three_pages() {
        let first = Pagination::new(1, 10, 25);
        assert!(first.is_visible());
        assert_eq!(first.total_pages(), 3);
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.next_page(), Some(2));

        let last = Pagination::new(3, 10, 25);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.next_page(), None);
        assert_eq!(last.render(), "[Previous]  Page 3 of 3  (Next)");
    }

    #[test]
    fn exact_multiple_disables_next_on_last_page() {
        let page = Pagination::new(2, 10, 20);
        assert!(!page.has_next());
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn single_page_hides_controls() {
        let page = Pagination::new(1, 10, 10);
        assert!(!page.is_visible());
        assert_eq!(page.previous_page(), None);
    }
}
