//! Fixed headlines shown when the live page cannot be used.

use crate::models::NewsItem;

const SAMPLES: [(&str, &str); 4] = [
    (
        "Экономика России выросла на 4.1% в 2025 году",
        "https://ria.ru/20260122/ekonomika-1234567890.html",
    ),
    (
        "Путин провел встречу с лидерами ЕАЭС",
        "https://ria.ru/20260122/eaes-0987654321.html",
    ),
    (
        "Снегопад парализовал Москву",
        "https://ria.ru/20260122/pogoda-1122334455.html",
    ),
    (
        "Россия запустила новый спутник",
        "https://ria.ru/20260122/kosmos-5566778899.html",
    ),
];

/// The hardcoded sample set, in display order. Never fails.
pub fn sample_items() -> Vec<NewsItem> {
    SAMPLES
        .iter()
        .map(|(title, link)| NewsItem::new(*title, *link, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_items_are_stable() {
        let items = sample_items();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].title, "Экономика России выросла на 4.1% в 2025 году");
        assert_eq!(items[3].link, "https://ria.ru/20260122/kosmos-5566778899.html");
        assert!(items.iter().all(|i| i.link.starts_with("https://") && i.time.is_none()));
    }
}
