//! Drawing for the wizard. Reads `App` state, never mutates it.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::assessment::{AssessmentView, RiskColor};
use crate::domain::{PredictionResult, ValueType, WizardStep};

use super::App;

const BAR_WIDTH: usize = 24;

pub(super) fn draw(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    draw_stepper(frame, app, chunks[0]);
    match app.session.step() {
        WizardStep::Review => draw_review(frame, app, chunks[1]),
        _ => draw_fields(frame, app, chunks[1]),
    }
    draw_footer(frame, app, chunks[2]);
}

fn draw_stepper(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let titles: Vec<Line> = WizardStep::ALL
        .iter()
        .map(|s| Line::from(format!("{}. {}", s.number(), s.title())))
        .collect();
    let selected = WizardStep::ALL
        .iter()
        .position(|s| *s == app.session.step())
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().title("Credit Risk Assessment").borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn draw_fields(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let fields = app.step_fields();
    let label_width = fields.iter().map(|f| f.label.chars().count()).max().unwrap_or(0);
    let items: Vec<ListItem> = fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let editing_this = app.editing && idx == app.selected_field;
            let value = if editing_this {
                format!("{}▏", app.edit_buffer)
            } else {
                display_value(app.session.form().value(field.key), field.value_type)
            };
            let value_style = if editing_this {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<label_width$}  ", field.label)),
                Span::styled(value, value_style),
            ]))
        })
        .collect();

    let step = app.session.step();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Step {}: {}", step.number(), step.title()))
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("» ");
    let mut state = ListState::default();
    state.select(Some(app.selected_field));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let help = app
        .selected()
        .map(|f| {
            let hint = match f.value_type {
                ValueType::Boolean => "Enter cycles Yes / No / unset.",
                ValueType::Number => "Enter to edit.",
            };
            format!("{} {hint}", f.help)
        })
        .unwrap_or_default();
    let p = Paragraph::new(help)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(p, chunks[1]);
}

fn draw_review(frame: &mut Frame<'_>, app: &App, area: Rect) {
    match (app.session.result(), app.session.assessment()) {
        (Some(result), Some(view)) => draw_assessment(frame, app, result, view, area),
        _ => draw_summary(frame, app, area),
    }
}

/// Entered answers plus submit hint (and the last error, if any).
fn draw_summary(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(err) = app.session.error() {
        lines.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    let label_width = app
        .session
        .form()
        .iter()
        .map(|(f, _)| f.label.chars().count())
        .max()
        .unwrap_or(0);
    for (field, raw) in app.session.form().iter() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<label_width$}  ", field.label), Style::default().fg(Color::Gray)),
            Span::raw(display_value(raw, field.value_type)),
        ]));
    }

    lines.push(Line::from(""));
    let action = if app.session.is_in_flight() {
        Span::styled("Submitting…", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!("Enter to submit to {}", app.base_url),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(action));

    let p = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Step 4: Review & Submit").borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_assessment(
    frame: &mut Frame<'_>,
    app: &App,
    result: &PredictionResult,
    view: &AssessmentView,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(8), Constraint::Length(5)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    draw_result_fields(frame, result, top[0]);
    draw_score(frame, view, top[1]);
    draw_key_factors(frame, view, middle[0]);
    draw_factor_analysis(frame, view, middle[1]);
    draw_distribution(frame, app, view, rows[2]);
}

fn draw_result_fields(frame: &mut Frame<'_>, result: &PredictionResult, area: Rect) {
    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<24}"), Style::default().fg(Color::Green)),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ])
    };
    let lines = vec![
        row("Status:", result.status.clone().unwrap_or_default()),
        row(
            "Prediction:",
            result.prediction.as_ref().map(|p| p.to_string()).unwrap_or_default(),
        ),
        row("Bad Risk Probability:", pct(result.probability_bad)),
        row("Good Risk Probability:", pct(result.probability_good)),
        row(
            "Threshold:",
            result.threshold_used.map(|t| t.to_string()).unwrap_or_default(),
        ),
        row("Model Version:", result.model_version.clone().unwrap_or_default()),
    ];
    let p = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Prediction Result").borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_score(frame: &mut Frame<'_>, view: &AssessmentView, area: Rect) {
    let color = risk_color(view.risk_color);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!("Credit Score: {} ({})", view.credit_score, view.risk_level.display_name()))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(color))
        .percent(view.score_percentage.clamp(0, 100) as u16)
        .label(format!("{} / 900", view.credit_score));
    frame.render_widget(gauge, area);
}

fn draw_key_factors(frame: &mut Frame<'_>, view: &AssessmentView, area: Rect) {
    let width = view.key_factors.iter().map(|f| f.label.len()).max().unwrap_or(0);
    let lines: Vec<Line> = if view.key_factors.is_empty() {
        vec![Line::from(Span::styled(
            "No factor inputs were provided.",
            Style::default().fg(Color::Gray),
        ))]
    } else {
        view.key_factors
            .iter()
            .map(|f| {
                let color = if f.negative { Color::Red } else { Color::Green };
                Line::from(vec![
                    Span::raw(format!("{:<width$} {:>3}% ", f.label, f.value)),
                    Span::styled(bar(f.value as f64), Style::default().fg(color)),
                ])
            })
            .collect()
    };
    let p = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Key Factors").borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_factor_analysis(frame: &mut Frame<'_>, view: &AssessmentView, area: Rect) {
    let max = view.factor_max();
    let width = view.factor_analysis.iter().map(|f| f.name.len()).max().unwrap_or(0);
    let lines: Vec<Line> = view
        .factor_analysis
        .iter()
        .map(|f| {
            Line::from(vec![
                Span::raw(format!("{:<width$} {:>3} ", f.name, f.value.round())),
                Span::styled(bar(f.relative_width(max)), Style::default().fg(Color::Blue)),
            ])
        })
        .collect();
    let p = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Factor Analysis").borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_distribution(frame: &mut Frame<'_>, app: &App, view: &AssessmentView, area: Rect) {
    let d = view.risk_distribution;
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("Low Risk: {}%", d.low), Style::default().fg(Color::Green)),
            Span::raw("  "),
            Span::styled(format!("Medium Risk: {}%", d.medium), Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(format!("High Risk: {}%", d.high), Style::default().fg(Color::Red)),
        ]),
        Line::from(format!(
            "Based on {} data points, the model shows a {}% probability of default risk. {}",
            app.session.form().filled_count(),
            view.bad_probability,
            view.summary()
        )),
    ];
    let p = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Assessment Summary").borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let help = if app.editing {
        "type value  Enter apply  Esc cancel"
    } else {
        "↑/↓ field  ←/→ step  Enter edit/submit  x clear  s submit  e export  r reset  q quit"
    };
    let line = Line::from(vec![
        Span::styled(help, Style::default().fg(Color::Gray)),
        Span::raw(" | "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
    ]);
    let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn display_value(raw: &str, value_type: ValueType) -> String {
    match (raw, value_type) {
        ("", _) => "–".to_string(),
        ("yes", ValueType::Boolean) => "Yes".to_string(),
        ("no", ValueType::Boolean) => "No".to_string(),
        (other, _) => other.to_string(),
    }
}

fn risk_color(color: RiskColor) -> Color {
    match color {
        RiskColor::Emerald => Color::Green,
        RiskColor::Amber => Color::Yellow,
        RiskColor::Rose => Color::Red,
    }
}

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn pct(p: Option<f64>) -> String {
    match p {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::data::PredictionClient;
    use crate::tui::App;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(
            PredictionClient::new("http://127.0.0.1:9").unwrap(),
            "http://127.0.0.1:9".to_string(),
        )
    }

    #[test]
    fn first_step_lists_age() {
        let screen = render(&app());
        assert!(screen.contains("Step 1: Basic Info"));
        assert!(screen.contains("Age (years)"));
    }

    #[test]
    fn review_shows_submit_hint_then_assessment() {
        let mut app = app();
        for _ in 0..3 {
            app.session.next();
        }
        let screen = render(&app);
        assert!(screen.contains("Enter to submit"));

        let ticket = app.session.begin_submit().unwrap();
        app.session.complete_submit(
            &ticket,
            Ok(PredictionResult {
                probability_bad: Some(0.6),
                probability_good: Some(0.4),
                model_version: Some("lr-7".to_string()),
                ..PredictionResult::default()
            }),
        );
        let screen = render(&app);
        assert!(screen.contains("Credit Score: 660 (High Risk)"));
        assert!(screen.contains("lr-7"));
        assert!(screen.contains("High Risk: 60%"));
    }

    #[test]
    fn values_are_shown_friendly() {
        assert_eq!(display_value("", ValueType::Number), "–");
        assert_eq!(display_value("yes", ValueType::Boolean), "Yes");
        assert_eq!(display_value("yes", ValueType::Number), "yes");
        assert_eq!(bar(50.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
    }
}
