use crate::graph::ModelSource;
use crate::ui::app::{App, EntryRow, FocusPanel, IndexPanel};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};

// Brandbook colors
const BRAND_DARK: Color = Color::Rgb(0x1F, 0x2F, 0x3C); // #1f2f3c
const BRAND_ACCENT: Color = Color::Rgb(0x58, 0x6B, 0x71); // #586b71 - references
const BRAND_SELECT_BG: Color = Color::Rgb(0xC3, 0xD3, 0xE0); // #c3d3e0
const BRAND_GREEN: Color = Color::Rgb(0x82, 0x9A, 0x68); // #829a68 - counts
const BRAND_ORANGE: Color = Color::Rgb(0x9E, 0x68, 0x3C); // #9e683c - focus
const BRAND_MUTED: Color = Color::Rgb(0x71, 0x65, 0x65); // #716565 - footer, blanks

// Styles
const HEADER_STYLE: Style = Style::new().fg(BRAND_DARK).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new()
    .bg(BRAND_SELECT_BG)
    .fg(BRAND_DARK)
    .add_modifier(Modifier::BOLD);
const COUNT_COLOR: Color = BRAND_GREEN;

pub fn draw_node<S: ModelSource>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Attribute columns
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    draw_column(frame, columns[0], app, FocusPanel::Inverse);
    draw_column(frame, columns[1], app, FocusPanel::Forward);

    let help = app.status.as_deref().map_or_else(
        || " ←→ Column | ↑↓ Attribute | Enter Follow | Esc Back | r Root | t Types | q Quit ".to_string(),
        |status| format!(" {status} "),
    );
    draw_footer(frame, chunks[2], &help);
}

fn draw_header<S: ModelSource>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let index = app.session.type_index();
    let title = format!(
        " IFC Graph | #{} {} | {} types | {} lines | depth {} ",
        app.node.id,
        app.node.entity_type,
        index.len(),
        index.total_lines(),
        app.history.len()
    );

    let header = Paragraph::new(title)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_column<S: ModelSource>(frame: &mut Frame, area: Rect, app: &App<S>, panel: FocusPanel) {
    let is_focused = app.focus_panel == panel;
    let rows = app.rows(panel == FocusPanel::Inverse);

    let visible_rows = (area.height as usize).saturating_sub(3);
    let selected = if is_focused { app.selected_row } else { usize::MAX };
    let scroll_offset = if is_focused && selected >= visible_rows {
        selected - visible_rows + 1
    } else {
        0
    };

    let header = Row::new(vec!["Attribute", "Content", "Anchor"])
        .style(HEADER_STYLE)
        .height(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, row)| entry_row(row, i == selected))
        .collect();

    let widths = [
        Constraint::Percentage(38),
        Constraint::Percentage(44),
        Constraint::Percentage(18),
    ];

    let title = match panel {
        FocusPanel::Inverse => format!(" Inverse ({}) ", app.node.inverse_attributes().count()),
        FocusPanel::Forward => format!(" Attributes ({}) ", app.node.forward_attributes().count()),
    };
    let table = Table::new(table_rows, widths)
        .header(header)
        .block(panel_block(title, is_focused));

    frame.render_widget(table, area);

    if rows.len() > visible_rows {
        draw_scrollbar(frame, area, rows.len(), app.selected_row);
    }
}

fn entry_row(row: &EntryRow, is_selected: bool) -> Row<'static> {
    let content_style = match row.target {
        Some(_) => Style::default().fg(BRAND_ACCENT),
        None if row.text == "$" => Style::default().fg(BRAND_MUTED),
        None => Style::default(),
    };
    let anchor = if row.name.is_empty() {
        String::new()
    } else {
        format!("{},{}", row.anchor.x, row.anchor.y)
    };

    let cells = vec![
        Line::from(row.name.clone()),
        Line::from(Span::styled(row.text.clone(), content_style)),
        Line::from(Span::styled(anchor, Style::default().fg(BRAND_MUTED))),
    ];

    if is_selected {
        Row::new(cells).style(SELECTED_STYLE)
    } else {
        Row::new(cells)
    }
}

pub fn draw_type_index<S: ModelSource>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Types | Lines
        Constraint::Length(3), // Footer
    ])
    .split(frame.area());

    draw_header(frame, chunks[0], app);

    let panels = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    draw_types(frame, panels[0], app);
    draw_lines(frame, panels[1], app);

    draw_footer(
        frame,
        chunks[2],
        " ←→ Panel | ↑↓ Navigate | Enter Open | Esc Back | q Quit ",
    );
}

fn draw_types<S: ModelSource>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let is_focused = app.index_panel == IndexPanel::Types;
    let index = app.session.type_index();

    let visible_rows = (area.height as usize).saturating_sub(2);
    let scroll_offset = if app.selected_type >= visible_rows {
        app.selected_type - visible_rows + 1
    } else {
        0
    };

    let items: Vec<ListItem> = index
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, (name, ids))| {
            let is_selected = i == app.selected_type;
            let style = if is_selected && is_focused {
                SELECTED_STYLE
            } else if is_selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if is_selected && is_focused {
                " ◄"
            } else {
                ""
            };

            ListItem::new(Line::from(vec![
                Span::styled(name.to_string(), style),
                Span::raw(" "),
                Span::styled(format!("({})", ids.len()), Style::default().fg(COUNT_COLOR)),
                Span::styled(marker, Style::default().fg(BRAND_ORANGE)),
            ]))
        })
        .collect();

    let list = List::new(items).block(panel_block(format!(" Types ({}) ", index.len()), is_focused));

    frame.render_widget(list, area);
}

fn draw_lines<S: ModelSource>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let is_focused = app.index_panel == IndexPanel::Lines;
    let ids = app.selected_type_ids();

    let visible_rows = (area.height as usize).saturating_sub(2);
    let scroll_offset = if app.selected_line >= visible_rows {
        app.selected_line - visible_rows + 1
    } else {
        0
    };

    let items: Vec<ListItem> = ids
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows)
        .map(|(i, id)| {
            let style = if i == app.selected_line && is_focused {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!("#{id}"), style))
        })
        .collect();

    let title = format!(" {} ", app.selected_type_name().unwrap_or("-"));
    let list = List::new(items).block(panel_block(title, is_focused));

    frame.render_widget(list, area);

    if ids.len() > visible_rows {
        draw_scrollbar(frame, area, ids.len(), app.selected_line);
    }
}

/// Bordered panel, outlined in the accent color while it holds focus.
fn panel_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default().fg(BRAND_ORANGE)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn draw_scrollbar(frame: &mut Frame, area: Rect, len: usize, position: usize) {
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"));
    let mut scrollbar_state = ScrollbarState::new(len).position(position);

    let scrollbar_area = Rect {
        x: area.x + area.width - 1,
        y: area.y + 1,
        width: 1,
        height: area.height.saturating_sub(2),
    };
    frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}

fn draw_footer(frame: &mut Frame, area: Rect, help: &str) {
    let footer = Paragraph::new(help.to_string())
        .style(Style::default().fg(BRAND_MUTED))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
