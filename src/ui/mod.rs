// UI module for rendering the TUI.
// Contains the header, search bar, breadcrumbs, list and detail views, and help overlay.

mod breadcrumb;
mod list;

use ratatui::{prelude::*, widgets::*};

use crate::app::BrowserState;
use crate::state::LoadingState;

pub use list::format_price;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, state: &mut BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(2), // Breadcrumb
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, state, chunks[0]);

    let breadcrumbs = state.nav.breadcrumbs();
    let backend_url = Some(state.backend_url.as_str());
    breadcrumb::draw_breadcrumb(frame, &breadcrumbs, chunks[1], backend_url);

    draw_search_bar(frame, state, chunks[2]);

    if state.in_detail() {
        list::render_item_detail(frame, &state.detail, chunks[3]);
    } else {
        list::render_items_list(frame, &mut state.items, chunks[3]);
    }

    draw_status_bar(frame, state, chunks[4]);

    // Help overlay (rendered last, on top of everything)
    if state.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the title line with the latest catalog stats.
fn draw_header(frame: &mut Frame, state: &BrowserState, area: Rect) {
    let stats = match &state.stats {
        LoadingState::Loaded(stats) => Span::styled(
            format!(
                "{} items · avg {}",
                stats.total,
                format_price(stats.average_price)
            ),
            Style::default().fg(Color::Green),
        ),
        LoadingState::Loading => {
            Span::styled("loading stats...", Style::default().fg(Color::Yellow))
        }
        LoadingState::Error(_) => {
            Span::styled("stats unavailable", Style::default().fg(Color::Red))
        }
        LoadingState::Idle => Span::raw(""),
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Catalog",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        stats,
    ]));
    frame.render_widget(title, area);
}

fn draw_search_bar(frame: &mut Frame, state: &BrowserState, area: Rect) {
    let search = &state.search;
    let border = if search.editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled("/ ", Style::default().fg(Color::Yellow))];
    if search.draft.is_empty() && !search.editing {
        spans.push(Span::styled(
            "Search by name",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(search.draft.as_str()));
    }
    if search.editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search "),
    );
    frame.render_widget(bar, area);
}

/// Draw the status bar with keybinding hints or the pending notice.
fn draw_status_bar(frame: &mut Frame, state: &BrowserState, area: Rect) {
    if let Some(notice) = &state.notice {
        let status = Paragraph::new(Line::from(Span::styled(
            format!(" ⚠️ {}", notice),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(status, area);
        return;
    }

    let hints = if state.search.editing {
        vec![
            Span::raw(" Type "),
            Span::styled("Filter", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Apply", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Done", Style::default().fg(Color::DarkGray)),
        ]
    } else if state.in_detail() {
        vec![
            Span::raw(" Esc "),
            Span::styled("Back", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Reload", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ←→ "),
            Span::styled("Page", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Details", Style::default().fg(Color::DarkGray)),
            Span::raw("  / "),
            Span::styled("Search", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    };

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50.min(area.width);
    let popup_height = 16.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = Style::default().fg(Color::Cyan);
    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ↑/↓ or j/k    ", key),
            Span::raw("Select item"),
        ]),
        Line::from(vec![
            Span::styled("  ←/→ or h/l    ", key),
            Span::raw("Previous / next page"),
        ]),
        Line::from(vec![
            Span::styled("  Enter         ", key),
            Span::raw("Open item details"),
        ]),
        Line::from(vec![
            Span::styled("  Esc/Backspace ", key),
            Span::raw("Back to list / close help"),
        ]),
        Line::from(vec![
            Span::styled("  /             ", key),
            Span::raw("Search by name"),
        ]),
        Line::from(vec![
            Span::styled("  r             ", key),
            Span::raw("Retry / refresh"),
        ]),
        Line::from(vec![
            Span::styled("  ?             ", key),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![Span::styled("  q             ", key), Span::raw("Quit")]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::model::{Item, Stats};
    use crate::state::{FetchOutcome, PageResult, ViewLevel};
    use ratatui::backend::TestBackend;

    fn render(state: &mut BrowserState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| draw(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded_state() -> BrowserState {
        let mut state = BrowserState::new(&ClientConfig {
            page_size: 2,
            ..ClientConfig::default()
        });
        let (_, flag) = state.items.begin_fetch();
        let items = vec![
            Item {
                id: 1,
                name: "Laptop Pro".to_string(),
                category: "Electronics".to_string(),
                price: 2499.0,
            },
            Item {
                id: 2,
                name: "Headphones".to_string(),
                category: "Electronics".to_string(),
                price: 399.0,
            },
        ];
        state.items.apply(
            &flag,
            FetchOutcome::Loaded(PageResult { items, total: 5 }),
        );
        state.stats = LoadingState::Loaded(Stats {
            total: 5,
            average_price: 1449.0,
        });
        state
    }

    #[test]
    fn test_list_view_renders_page_and_stats() {
        let mut state = loaded_state();
        let screen = render(&mut state);

        assert!(screen.contains("Laptop Pro"));
        assert!(screen.contains("$399.00"));
        assert!(screen.contains("Page 1 of 3"));
        assert!(screen.contains("avg $1449.00"));
    }

    #[test]
    fn test_error_and_empty_states() {
        let mut state = BrowserState::new(&ClientConfig::default());
        let (_, flag) = state.items.begin_fetch();
        state.items.apply(
            &flag,
            FetchOutcome::Failed("Failed to fetch items: refused".to_string()),
        );
        let screen = render(&mut state);
        assert!(screen.contains("Failed to fetch items"));
        assert!(screen.contains("Press r to retry"));

        let (_, flag) = state.items.begin_fetch();
        state.items.apply(
            &flag,
            FetchOutcome::Loaded(PageResult {
                items: Vec::new(),
                total: 0,
            }),
        );
        assert!(render(&mut state).contains("No items found"));
    }

    #[test]
    fn test_detail_view_and_breadcrumb() {
        let mut state = loaded_state();
        state.nav.push(ViewLevel::Detail {
            id: 1,
            name: "Laptop Pro".to_string(),
        });
        let flag = state.detail.begin(1);
        let item = state.items.items[0].clone();
        state.detail.apply(&flag, Ok(item));

        let screen = render(&mut state);
        assert!(screen.contains("Items > Laptop Pro"));
        assert!(screen.contains("Electronics"));
        assert!(screen.contains("$2499.00"));
    }

    #[test]
    fn test_help_overlay() {
        let mut state = loaded_state();
        state.show_help = true;
        assert!(render(&mut state).contains("Keyboard Shortcuts"));
    }
}
