use std::io;

use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Constraint,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Chart, Dataset, GraphType},
    Terminal, TerminalOptions, Viewport,
};

use super::charting::{
    average_label, chart_title, compute_x_bounds, format_label, SERIES_LABEL, X_AXIS_TITLE,
    Y_AXIS_TITLE, Y_BOUNDS,
};
use crate::trend::UserTrend;

/// Rows used by the inline preview below the shell prompt
pub const PREVIEW_HEIGHT: u16 = 18;

/// Chart widget for a trend; the average dataset is omitted when the trend has no average
pub fn trend_chart<'a>(
    title: String,
    coords: &'a [(f64, f64)],
    average_line: Option<(f64, &'a [(f64, f64)])>,
    x_bounds: (f64, f64),
) -> Chart<'a> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let mut datasets = vec![Dataset::default()
        .name(SERIES_LABEL)
        .marker(Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(coords)];

    if let Some((average, line)) = average_line {
        datasets.push(
            Dataset::default()
                .name(average_label(average))
                .marker(Marker::Dot)
                .style(Style::default().fg(Color::Green))
                .graph_type(GraphType::Line)
                .data(line),
        );
    }

    Chart::new(datasets)
        .block(Block::bordered().title(title))
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)))
        .x_axis(
            Axis::default()
                .title(X_AXIS_TITLE)
                .bounds([x_bounds.0, x_bounds.1])
                .labels(vec![
                    Span::styled(format_label(x_bounds.0), bold_style),
                    Span::styled(format_label(x_bounds.1), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Y_AXIS_TITLE)
                .bounds(Y_BOUNDS)
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled("3", bold_style),
                    Span::styled("5", bold_style),
                ]),
        )
}

/// Draw one frame showing `trend`
pub fn draw_trend<B: Backend>(terminal: &mut Terminal<B>, trend: &UserTrend) -> io::Result<()> {
    let coords = trend.plottable();
    let x_bounds = compute_x_bounds(&coords);
    let line: Vec<(f64, f64)> = trend
        .overall_average
        .map(|avg| vec![(x_bounds.0, avg), (x_bounds.1, avg)])
        .unwrap_or_default();
    let average_line = trend.overall_average.map(|avg| (avg, line.as_slice()));
    let title = chart_title(&trend.user_id);

    terminal.draw(|f| {
        f.render_widget(trend_chart(title, &coords, average_line, x_bounds), f.area());
    })?;
    Ok(())
}

/// Print the chart inline on stdout, leaving the scrollback intact
pub fn preview_inline(trend: &UserTrend) -> io::Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(PREVIEW_HEIGHT),
        },
    )?;
    draw_trend(&mut terminal, trend)?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_series::TrendPoint;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_trend_shows_title_and_average() {
        let trend = UserTrend {
            user_id: "alice".to_string(),
            total_entries: 2,
            points: vec![TrendPoint::from((1.0, 1.0)), TrendPoint::from((2.0, 1.5))],
            overall_average: Some(1.25),
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        draw_trend(&mut terminal, &trend).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("JLPT difficulty trend: alice"));
        assert!(text.contains("overall average (1.25)"));
    }

    #[test]
    fn test_draw_empty_trend_omits_average() {
        let trend = UserTrend {
            user_id: "bob".to_string(),
            total_entries: 3,
            points: Vec::new(),
            overall_average: None,
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        draw_trend(&mut terminal, &trend).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("JLPT difficulty trend: bob"));
        assert!(!text.contains("overall average"));
    }
}
