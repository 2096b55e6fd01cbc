//! Static normal-range table.

use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::domain::reference_table;
use crate::tui::styles::MedicalTheme;

pub fn render_reference_table(f: &mut Frame, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Parameter"),
        Cell::from("Normal Range"),
    ])
    .style(MedicalTheme::header());

    let rows = reference_table().iter().map(|row| {
        Row::new(vec![
            Cell::from(Span::styled(row.parameter, MedicalTheme::text())),
            Cell::from(Span::styled(row.normal_range, MedicalTheme::success())),
        ])
    });

    let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .title(Span::styled(" Reference Ranges ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        );

    f.render_widget(table, area);
}
