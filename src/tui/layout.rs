//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Min(10),    // bill chart
            Constraint::Min(8),     // unit cost chart
            Constraint::Length(5),  // breakdown panel
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    let bills: Vec<(f64, f64)> = app
        .curve
        .points
        .iter()
        .map(|p| (p.consumption_kwh, p.bill()))
        .collect();
    let unit_costs = app.curve.unit_costs();

    render_header(frame, app, chunks[0]);
    render_series(
        frame,
        app,
        chunks[1],
        &Series {
            title: " Bill vs Consumption ",
            name: "Bill",
            y_title: "bill",
            color: style::BILL_COLOR,
            data: &bills,
            cursor_y: app.selected().map(|p| p.bill()),
        },
    );
    render_series(
        frame,
        app,
        chunks[2],
        &Series {
            title: " Effective Cost vs Consumption ",
            name: "Cost/kWh",
            y_title: "/kWh",
            color: style::UNIT_COST_COLOR,
            data: &unit_costs,
            cursor_y: app.selected().and_then(|p| p.unit_cost),
        },
    );
    render_breakdown(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// One curve plus its chart decorations.
struct Series<'a> {
    title: &'a str,
    name: &'a str,
    y_title: &'a str,
    color: Color,
    data: &'a [(f64, f64)],
    cursor_y: Option<f64>,
}

/// Header bar: sample count and cursor position.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let position = app.selected().map_or_else(
        || "no samples".to_string(),
        |p| {
            format!(
                "sample {}/{} │ {:.0} kWh",
                app.cursor + 1,
                app.curve.len(),
                p.consumption_kwh
            )
        },
    );
    let header = Line::from(vec![
        Span::styled(
            " TARIFF ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" │ {position} ")),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Line chart of one series with threshold reference lines and cursor.
fn render_series(frame: &mut Frame, app: &App, area: Rect, series: &Series<'_>) {
    let x_bounds = style::bounds_x(series.data);
    let y_bounds = style::auto_bounds_y(series.data);

    let vertical = |x: f64| [(x, y_bounds[0]), (x, y_bounds[1])];
    let service_tax_line = vertical(app.curve.service_tax_threshold_kwh);
    let high_usage_line = vertical(app.curve.high_usage_threshold_kwh);
    let cursor: Vec<(f64, f64)> = app
        .selected()
        .zip(series.cursor_y)
        .map(|(p, y)| (p.consumption_kwh, y))
        .into_iter()
        .collect();

    let datasets = vec![
        Dataset::default()
            .name(series.name)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(series.color))
            .data(series.data),
        Dataset::default()
            .name(format!("ST {:.0}", app.curve.service_tax_threshold_kwh))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::SERVICE_TAX_LINE))
            .data(&service_tax_line),
        Dataset::default()
            .name(format!("High {:.0}", app.curve.high_usage_threshold_kwh))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::HIGH_USAGE_LINE))
            .data(&high_usage_line),
        Dataset::default()
            .marker(symbols::Marker::Block)
            .style(Style::default().fg(style::CURSOR_COLOR))
            .data(&cursor),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(series.title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("kWh")
                .bounds(x_bounds)
                .labels(vec![
                    format!("{:.0}", x_bounds[0]),
                    format!("{:.0}", x_bounds[1]),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(series.y_title)
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.2}", y_bounds[0]),
                    format!("{:.2}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Breakdown of the bill under the cursor.
fn render_breakdown(frame: &mut Frame, app: &App, area: Rect) {
    let lines = if let Some(p) = app.selected() {
        let b = &p.breakdown;
        vec![
            Line::from(format!(
                "  kwh={:>7.1}  tier={}  bill={:>9.2}  unit={}",
                p.consumption_kwh,
                b.tier,
                b.total,
                p.unit_cost.map_or_else(|| "n/a".to_string(), |u| format!("{u:.4}")),
            )),
            Line::from(format!(
                "  energy={:>8.2}  capacity={:>7.2}  network={:>7.2}  incentive={:>8.2}",
                b.energy, b.capacity, b.network, b.incentive,
            )),
            Line::from(format!(
                "  fuel={:>7.2}  retail={:>6.2}  service_tax={:>7.2}  consumption_tax={:>6.2}",
                b.fuel_adjustment, b.retail_charge, b.service_tax, b.consumption_tax,
            )),
        ]
    } else {
        vec![Line::from("  No samples in range")]
    };

    let block = Block::default().title(" Breakdown ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  ←/→:Sample  PgUp/PgDn:±10  Home/End:Ends",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
