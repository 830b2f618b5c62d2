use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod report;

use crate::app::{App, Control, InputMode, StatusLevel};

const SUBTITLE: &str =
    "Wallet connect + Base chain validation + read-only network pulse (block, balance, fee snapshot).";

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    draw_controls(f, areas.controls, app);
    draw_output(f, areas.output, app);
    draw_status_line(f, areas.status_line, app);
    draw_hint_line(f, areas.hint_line, app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(
            app.meta.name.clone(),
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_controls(f: &mut Frame, area: Rect, app: &mut App) {
    let cells = layout::control_cells(area);
    for (control, cell) in &cells {
        let enabled = app.is_enabled(*control);
        let widget = match control {
            Control::AddressInput => address_input(app),
            _ => button(*control, enabled),
        };
        f.render_widget(widget, *cell);
    }
    app.control_areas = cells;
}

fn button(control: Control, enabled: bool) -> Paragraph<'static> {
    let (border, text) = if enabled {
        (
            Style::default().fg(Color::Gray),
            Style::default().fg(Color::White),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        )
    };
    let label = Line::from(vec![
        Span::styled(
            format!("[{}] ", control.shortcut()),
            Style::default().fg(if enabled {
                Color::Yellow
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(control.title(), text),
    ]);
    Paragraph::new(label)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border))
}

fn address_input(app: &App) -> Paragraph<'static> {
    let editing = app.input_mode == InputMode::Address;
    let border = if editing {
        Style::default().fg(Color::LightCyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let content = if app.address_input.is_empty() && !editing {
        Line::from(Span::styled(
            "Check balance for address (0x...)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(app.address_input.clone())];
        if editing {
            spans.push(Span::styled("▏", Style::default().fg(Color::LightCyan)));
        }
        Line::from(spans)
    };
    Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled("[a]", Style::default().fg(Color::Yellow))),
    )
}

fn draw_output(f: &mut Frame, area: Rect, app: &mut App) {
    app.output_area = area;
    let color = if app
        .output
        .first()
        .is_some_and(|line| line.starts_with("Error ("))
    {
        Color::LightRed
    } else {
        Color::Rgb(0xdb, 0xe7, 0xff)
    };
    let text = Text::from(
        app.output
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect::<Vec<_>>(),
    );
    let title = match app.in_flight {
        Some(op) => format!(" Output - {}… ", op.label()),
        None => " Output ".to_string(),
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color).bg(Color::Rgb(0x0b, 0x0f, 0x1a)))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        );
    f.render_widget(paragraph, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let network = app.active();
    let mut spans = vec![
        Span::styled("Network ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{} ({})  ", network.label, network.chain_id)),
        Span::styled("RPC ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", network.rpc_url)),
    ];
    match app.session.as_ref() {
        Some(session) if app.unlocked => {
            spans.push(Span::styled("Wallet ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                short_addr(&session.address),
                Style::default().fg(Color::LightGreen),
            ));
        }
        _ => {
            spans.push(Span::styled(
                "Wallet not connected",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::White)),
        area,
    );
}

fn draw_hint_line(f: &mut Frame, area: Rect, app: &App) {
    let content = if let Some((text, level)) = app.status_text() {
        let color = match level {
            StatusLevel::Info => Color::LightGreen,
            StatusLevel::Warn => Color::LightYellow,
            StatusLevel::Error => Color::LightRed,
        };
        Line::from(vec![
            Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
            Span::styled(text.to_string(), Style::default().fg(color)),
        ])
    } else {
        action_hints(app)
    };
    f.render_widget(Paragraph::new(content), area);
}

fn action_hints(app: &App) -> Line<'static> {
    let hints: &[(&str, &str)] = match app.input_mode {
        InputMode::Address => &[("Enter", "check"), ("Esc", "done"), ("Ctrl-u", "clear")],
        InputMode::Normal => &[
            ("c", "connect"),
            ("t", "toggle"),
            ("p", "pulse"),
            ("a/Tab", "address"),
            ("b", "balance"),
            ("↑↓", "scroll"),
            ("q", "quit"),
        ],
    };
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn short_addr(value: &str) -> String {
    let value = value.trim();
    if value.len() <= 12 {
        return value.to_string();
    }
    format!("{}..{}", &value[..6], &value[value.len() - 4..])
}
