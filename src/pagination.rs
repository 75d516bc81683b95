use std::fmt;

/// Number of questions returned per page.
pub const PAGE_SIZE: usize = 10;

/// 1-based page number. Zero and negative numbers are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPage(pub i64);

impl fmt::Display for InvalidPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page must be a positive integer, got {}", self.0)
    }
}

impl std::error::Error for InvalidPage {}

impl Page {
    pub const FIRST: Page = Page(1);

    pub fn new(number: i64) -> Result<Self, InvalidPage> {
        match usize::try_from(number) {
            Ok(n) if n > 0 => Ok(Page(n)),
            _ => Err(InvalidPage(number)),
        }
    }

    fn offset(self) -> usize {
        (self.0 - 1).saturating_mul(PAGE_SIZE)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::FIRST
    }
}

/// Returns the items that fall on `page`, or an empty slice past the last page.
pub fn paginate<T>(items: &[T], page: Page) -> &[T] {
    let start = page.offset();
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn rejects_non_positive_pages() {
        assert_eq!(Page::new(0), Err(InvalidPage(0)));
        assert_eq!(Page::new(-3), Err(InvalidPage(-3)));
        assert_eq!(Page::new(1), Ok(Page::FIRST));
    }

    #[test]
    fn first_page_holds_page_size_items() {
        let all = items(25);
        assert_eq!(paginate(&all, Page::FIRST), &all[0..10]);
    }

    #[test]
    fn last_page_is_partial() {
        let all = items(25);
        let page = Page::new(3).unwrap();
        assert_eq!(paginate(&all, page), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let all = items(10);
        assert!(paginate(&all, Page::new(2).unwrap()).is_empty());
        assert!(paginate(&all, Page::new(i64::MAX).unwrap()).is_empty());
        assert!(paginate::<usize>(&[], Page::FIRST).is_empty());
    }

    #[test]
    fn page_length_matches_formula() {
        for len in [1usize, 9, 10, 11, 30, 47] {
            let all = items(len);
            for number in 1..=6i64 {
                let page = Page::new(number).unwrap();
                let skipped = (number as usize - 1) * PAGE_SIZE;
                let expected = PAGE_SIZE.min(len.saturating_sub(skipped));
                assert_eq!(paginate(&all, page).len(), expected, "len={len} page={number}");
            }
        }
    }

    #[test]
    fn paginating_twice_gives_the_same_slice() {
        let all = items(33);
        let page = Page::new(2).unwrap();
        assert_eq!(paginate(&all, page), paginate(&all, page));
    }
}
