use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget},
};

use crate::chart::ComparisonChart;

pub const PERSONA_COLOR: Color = Color::Rgb(255, 200, 87);
pub const YOU_COLOR: Color = Color::Rgb(56, 78, 119);

/// Draw the live vs ghost latency chart, or a placeholder when there is no data
pub fn render_comparison(chart: &ComparisonChart, area: Rect, buf: &mut Buffer) {
    if chart.is_empty() {
        Paragraph::new(Span::styled(
            "no latency samples yet",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(area, buf);
        return;
    }

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let labels = |ticks: Vec<f64>| {
        ticks
            .into_iter()
            .map(|t| Span::styled(format_label(t), bold_style))
            .collect::<Vec<_>>()
    };

    // a single sample gives a zero-width x domain; widen it so the point lands on screen
    let [x_lo, x_hi] = chart.x_bounds;
    let x_bounds = [x_lo, x_hi.max(x_lo + 1.0)];
    let mut x_ticks = chart.x_ticks();
    if x_ticks.len() < 2 {
        x_ticks = x_bounds.to_vec();
    }

    let datasets = vec![
        Dataset::default()
            .name("persona")
            .marker(Marker::Braille)
            .style(Style::default().fg(PERSONA_COLOR))
            .graph_type(GraphType::Line)
            .data(&chart.ghost),
        Dataset::default()
            .name("you")
            .marker(Marker::Braille)
            .style(Style::default().fg(YOU_COLOR))
            .graph_type(GraphType::Line)
            .data(&chart.live),
    ];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("character index")
                .bounds(x_bounds)
                .labels(labels(x_ticks)),
        )
        .y_axis(
            Axis::default()
                .title("latency (ms)")
                .bounds(chart.y_bounds)
                .labels(labels(chart.y_ticks())),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
        .render(area, buf);
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
