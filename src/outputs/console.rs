//! Terminal rendering.
//!
//! Rendering produces plain `String`s; the caller decides where to print
//! them. Colors are applied only when the renderer is built with color on,
//! which keeps the text easy to assert in tests.

use crate::models::{FallbackReason, NewsItem, Provenance, Report};
use crossterm::style::{Color, Stylize};
use std::fmt::Write;
use std::io::IsTerminal;

/// Width of the separator rules.
pub const RULE_WIDTH: usize = 90;

/// Renders banners and reports, optionally with ANSI colors.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleRenderer {
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Color on when stdout is a terminal and `NO_COLOR` is unset.
    pub fn for_stdout() -> Self {
        Self::new(std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none())
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Program header.
    pub fn banner(&self) -> String {
        let rule = "═".repeat(RULE_WIDTH);
        let text = format!(
            "\n{rule}\n{:^width$}\n{:^width$}\n{rule}\n",
            "ПАРСЕР НОВОСТЕЙ RIA.RU",
            "Заголовки + Ссылки",
            width = RULE_WIDTH
        );
        format!("{}\n", self.paint(&text, Color::Magenta))
    }

    /// Notice line(s) followed by one block per item.
    pub fn report(&self, report: &Report) -> String {
        let mut out = String::new();
        match &report.provenance {
            Provenance::Live => {
                let _ = writeln!(out, "\nНайдено новостей: {}", report.found);
                if report.found > report.items.len() {
                    let _ = writeln!(out, "Показаны первые {}", report.items.len());
                }
                out.push('\n');
            }
            Provenance::Sample(reason) => {
                out.push_str(&self.paint(&fallback_notice(reason), Color::Yellow));
                out.push_str(&self.paint("\nИспользуется пример данных:\n\n", Color::Yellow));
            }
        }

        for (index, item) in report.items.iter().enumerate() {
            out.push_str(&self.item_block(index + 1, item));
        }
        out
    }

    fn item_block(&self, index: usize, item: &NewsItem) -> String {
        let source = item.source_tag().unwrap_or_else(|| "ria.ru".to_string());
        let time = item.time.as_deref().unwrap_or("—");
        let header = format!(
            "{}\n{index}. {}\n{}\n",
            "═".repeat(RULE_WIDTH),
            item.title,
            "─".repeat(RULE_WIDTH)
        );
        let details = format!("Источник: {source} | Время: {time}\nСсылка: {}\n", item.link);
        format!(
            "{}{}\n",
            self.paint(&header, Color::Cyan),
            self.paint(&details, Color::Green)
        )
    }
}

fn fallback_notice(reason: &FallbackReason) -> String {
    match reason {
        FallbackReason::FetchFailed(msg) => {
            format!("Не удалось получить данные с сайта: {msg}\n")
        }
        FallbackReason::NothingExtracted => {
            "Новости не найдены - структура изменилась\nПроверьте журнал диагностики\n".to_string()
        }
        FallbackReason::Unexpected(msg) => format!("Критическая ошибка: {msg}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ConsoleRenderer {
        ConsoleRenderer::new(false)
    }

    #[test]
    fn test_item_block_layout() {
        let report = Report::live(
            vec![NewsItem::new(
                "Путин провел встречу с лидерами ЕАЭС",
                "https://ria.ru/20260122/eaes.html",
                Some("12:30".into()),
            )],
            1,
        );
        let text = plain().report(&report);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines.contains(&"Найдено новостей: 1"));

        let title_at = lines.iter().position(|l| *l == "1. Путин провел встречу с лидерами ЕАЭС").unwrap();
        assert_eq!(lines[title_at - 1], "═".repeat(RULE_WIDTH));
        assert_eq!(lines[title_at + 1], "─".repeat(RULE_WIDTH));
        assert_eq!(lines[title_at + 2], "Источник: ria.ru | Время: 12:30");
        assert_eq!(lines[title_at + 3], "Ссылка: https://ria.ru/20260122/eaes.html");
    }

    #[test]
    fn test_truncated_report_mentions_shown_count() {
        let items = crate::sample::sample_items();
        let text = plain().report(&Report::live(items, 20));
        assert!(text.contains("Найдено новостей: 20"));
        assert!(text.contains("Показаны первые 4"));
    }

    #[test]
    fn test_sample_report_notices() {
        let text = plain().report(&Report::fallback(FallbackReason::NothingExtracted));
        assert!(text.starts_with("Новости не найдены - структура изменилась"));
        assert!(text.contains("Используется пример данных:"));
        assert!(text.contains("4. Россия запустила новый спутник"));
        assert!(text.contains("Время: —"));

        let text = plain().report(&Report::fallback(FallbackReason::FetchFailed("timeout".into())));
        assert!(text.contains("Не удалось получить данные с сайта: timeout"));

        let text = plain().report(&Report::fallback(FallbackReason::Unexpected("boom".into())));
        assert!(text.contains("Критическая ошибка: boom"));
    }

    #[test]
    fn test_color_adds_escape_codes_only_when_enabled() {
        let report = Report::fallback(FallbackReason::NothingExtracted);
        assert!(!plain().report(&report).contains('\u{1b}'));
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(ConsoleRenderer::new(true).report(&report).contains('\u{1b}'));
        }
    }

    #[test]
    fn test_banner() {
        let banner = plain().banner();
        assert!(banner.contains("ПАРСЕР НОВОСТЕЙ RIA.RU"));
        assert!(banner.contains(&"═".repeat(RULE_WIDTH)));
    }
}
