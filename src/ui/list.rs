// List and detail rendering for catalog items.
// Provides styled views with loading, error, and empty states.

use ratatui::{prelude::*, widgets::*};

use crate::model::Item;
use crate::state::{DetailController, ItemsController, LoadingState};

/// Format a price for display.
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str, block: Block) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(block);
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str, block: Block) {
    let text = Paragraph::new(vec![
        Line::from(format!("❌ {}", error)),
        Line::from(""),
        Line::styled("Press r to retry", Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Red))
    .block(block);
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str, block: Block) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(text, area);
}

fn item_row(item: &Item) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::raw(format!("{:<32}", item.name)),
        Span::styled(
            format!("{:<16}", item.category),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format_price(item.price), Style::default().fg(Color::Green)),
    ]))
}

/// Render the current page of items.
pub fn render_items_list(frame: &mut Frame, items: &mut ItemsController, area: Rect) {
    let footer = format!(
        " Page {} of {} · {} items ",
        items.current_page(),
        items.total_pages,
        items.total
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Items ")
        .title_bottom(Line::from(footer).right_aligned());

    if items.loading {
        render_loading(frame, area, "Loading items", block);
    } else if let Some(error) = &items.error {
        render_error(frame, area, error, block);
    } else if items.items.is_empty() {
        render_empty(frame, area, "No items found", block);
    } else {
        let rows: Vec<ListItem> = items.items.iter().map(item_row).collect();

        let list_widget = List::new(rows)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(list_widget, area, &mut items.list_state);
    }
}

/// Render the detail view for one item.
pub fn render_item_detail(frame: &mut Frame, detail: &DetailController, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    match &detail.item {
        LoadingState::Idle => render_empty(frame, area, "No item selected", block),
        LoadingState::Loading => render_loading(frame, area, "Loading item", block),
        LoadingState::Error(e) => render_error(frame, area, e, block),
        LoadingState::Loaded(item) => {
            let label = Style::default().fg(Color::DarkGray);
            let lines = vec![
                Line::from(Span::styled(
                    item.name.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Category  ", label),
                    Span::raw(item.category.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Price     ", label),
                    Span::styled(format_price(item.price), Style::default().fg(Color::Green)),
                ]),
                Line::from(vec![
                    Span::styled("ID        ", label),
                    Span::raw(item.id.to_string()),
                ]),
            ];
            let text = Paragraph::new(lines).block(block.padding(Padding::horizontal(1)));
            frame.render_widget(text, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(2499.0), "$2499.00");
        assert_eq!(format_price(1449.5), "$1449.50");
        assert_eq!(format_price(0.0), "$0.00");
    }
}
