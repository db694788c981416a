//! Content sections below the hero.

use std::time::Duration;

use folio_core::presentation::Section;
use folio_core::profile::{Card, Profile};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::PageBuilder;
use crate::common::truncate_with_ellipsis;

/// Delay between consecutive cloud badges.
pub const BADGE_STAGGER: Duration = Duration::from_millis(100);

/// Number of cloud badges shown at `now`.
///
/// Nothing before the headline settles; then one badge immediately and one
/// more every [`BADGE_STAGGER`].
pub fn visible_badges(settled_at: Option<Duration>, now: Duration, total: usize) -> usize {
    let Some(settled_at) = settled_at else {
        return 0;
    };
    let Some(elapsed) = now.checked_sub(settled_at) else {
        return 0;
    };
    let steps = elapsed.as_millis() / BADGE_STAGGER.as_millis();
    usize::try_from(steps)
        .unwrap_or(usize::MAX)
        .saturating_add(1)
        .min(total)
}

pub(super) fn push_about(page: &mut PageBuilder, profile: &Profile) {
    let about = &profile.about;
    let styles = page.styles;
    page.blank();
    page.heading(&about.title);
    for paragraph in &about.paragraphs {
        page.paragraph(paragraph, styles.text, 0);
        page.blank();
    }
    push_cards(page, &about.expertise, "◆");
    page.blank();
}

pub(super) fn push_experience(page: &mut PageBuilder, profile: &Profile) {
    let styles = page.styles;
    page.blank();
    page.heading(&profile.timeline.title);
    page.paragraph(&profile.timeline.intro, styles.muted, 0);
    page.blank();

    for entry in &profile.experience {
        let year = if entry.year.is_empty() {
            entry.period.as_str()
        } else {
            entry.year.as_str()
        };
        page.push(Line::from(vec![
            Span::styled("● ", styles.accent),
            Span::styled(
                truncate_with_ellipsis(year, page.width.saturating_sub(2)),
                styles.accent_strong,
            ),
        ]));
        page.paragraph(&entry.title, styles.strong, 2);
        page.paragraph(&entry.company, styles.accent, 2);
        let meta: Vec<&str> = [&entry.period, &entry.duration, &entry.location]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        page.paragraph(&meta.join(" · "), styles.muted, 2);
        page.blank();
        page.paragraph(&entry.description, styles.text, 2);
        if !entry.highlights.is_empty() {
            page.blank();
            page.paragraph("Key highlights", styles.strong, 2);
            for highlight in &entry.highlights {
                page.bullet("→", styles.accent, highlight, styles.text, 2);
            }
        }
        page.blank();
    }
}

pub(super) fn push_stack(page: &mut PageBuilder, profile: &Profile, badges: usize) {
    let stack = &profile.stack;
    let styles = page.styles;
    page.blank();
    page.heading(&stack.title);
    page.paragraph(&stack.intro, styles.muted, 0);
    page.blank();
    push_cards(page, &stack.groups, "▸");

    if stack.cloud_services.is_empty() {
        return;
    }
    page.blank();
    page.paragraph(&stack.cloud_title, styles.strong, 0);
    page.paragraph(&stack.cloud_summary, styles.muted, 0);
    page.blank();

    // Rows are reserved up front so the page height does not change while
    // badges appear.
    let labels: Vec<String> = stack
        .cloud_services
        .iter()
        .map(|service| truncate_with_ellipsis(&format!("[ {service} ]"), page.width))
        .collect();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut row_width = 0;
    for (index, label) in labels.into_iter().enumerate() {
        let label_width = label.width();
        if row_width > 0 && row_width + 1 + label_width > page.width {
            page.push(Line::from(std::mem::take(&mut row)));
            row_width = 0;
        }
        if row_width > 0 {
            row.push(Span::raw(" "));
            row_width += 1;
        }
        let span = if index < badges {
            Span::styled(label, styles.accent)
        } else {
            Span::raw(" ".repeat(label_width))
        };
        row.push(span);
        row_width += label_width;
    }
    if !row.is_empty() {
        page.push(Line::from(row));
    }
    page.blank();
}

pub(super) fn push_contact(page: &mut PageBuilder, profile: &Profile) {
    let contact = &profile.contact;
    let styles = page.styles;
    page.blank();
    page.heading(&contact.title);
    page.paragraph(&contact.intro, styles.muted, 0);
    page.blank();

    if let Some(email) = &contact.email {
        push_link(page, "✉", "Email", email, Some('e'));
    }
    if let Some(phone) = &contact.phone {
        push_link(page, "☎", "Phone", phone, Some('p'));
    }
    if let Some(linkedin) = &contact.linkedin {
        push_link(page, "in", "LinkedIn", linkedin, Some('l'));
    }
    page.blank();
}

pub(super) fn push_footer(page: &mut PageBuilder, profile: &Profile) {
    let styles = page.styles;
    let footer = &profile.footer;
    page.blank();
    page.push(Line::styled("─".repeat(page.width), styles.border));
    page.blank();
    page.paragraph(&profile.name, styles.strong, 0);
    page.paragraph(&profile.subtitle, styles.muted, 0);
    if !footer.availability.is_empty() {
        page.blank();
        page.bullet("●", styles.accent, &footer.availability, styles.text, 0);
    }
    page.blank();
    let links: Vec<String> = Section::ALL
        .iter()
        .enumerate()
        .map(|(index, section)| format!("{} {}", index + 1, section.label()))
        .collect();
    page.paragraph(&links.join("  ·  "), styles.muted, 0);
    page.blank();
    page.paragraph(&footer.copyright, styles.muted, 0);
    page.paragraph(&footer.crafted, styles.muted, 0);
    page.blank();
}

fn push_cards(page: &mut PageBuilder, cards: &[Card], marker: &str) {
    let styles = page.styles;
    for card in cards {
        page.bullet(marker, styles.accent, &card.title, styles.strong, 0);
        page.paragraph(&card.description, styles.muted, 2);
    }
}

const LINK_LABEL_WIDTH: usize = 10;

fn push_link(page: &mut PageBuilder, icon: &str, label: &str, value: &str, key: Option<char>) {
    let styles = page.styles;
    let icon = format!("{icon:<3}");
    let label = format!("{label:<LINK_LABEL_WIDTH$}");
    let key = key.map(|key| format!("  [{key}]")).unwrap_or_default();
    let used = icon.width() + label.width() + key.width();
    let value = truncate_with_ellipsis(value, page.width.saturating_sub(used));

    let mut spans = vec![
        Span::styled(icon, styles.accent),
        Span::styled(label, styles.strong),
        Span::styled(value, styles.text),
    ];
    if !key.is_empty() {
        spans.push(Span::styled(key, styles.muted));
    }
    let line = Line::from(spans);
    if line.width() <= page.width {
        page.push(line);
    } else {
        page.paragraph(&line.to_string(), styles.text, 0);
    }
}
