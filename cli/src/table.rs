use fairdice::ProbabilityTable;
use prettytable::format::consts::FORMAT_BOX_CHARS;
use prettytable::{Cell, Row, Table};

/// Lay out the win probability of each row die against each column die.
///
/// Self-comparison cells carry no information and are shown as `-`.
pub fn render_probability_table(table: &ProbabilityTable, precision: usize, color: bool) -> String {
    let mut out = Table::new();
    out.set_format(*FORMAT_BOX_CHARS);

    let mut titles = vec![Cell::new("User dice v")];
    titles.extend(table.dice().iter().map(|die| Cell::new(&die.to_string())));
    out.set_titles(Row::new(titles));

    for row in 0..table.size() {
        let mut cells = vec![Cell::new(&table.dice()[row].to_string())];
        for col in 0..table.size() {
            let cell = match table.get(row, col) {
                Some(_) if table.is_self_comparison(row, col) => Cell::new("-"),
                Some(p) => {
                    let cell = Cell::new(&p.format(precision));
                    match (color, table.beats(row, col)) {
                        (true, true) => cell.style_spec("Fg"),
                        (true, false) => cell.style_spec("Fr"),
                        (false, _) => cell,
                    }
                }
                None => Cell::new("?"),
            };
            cells.push(cell);
        }
        out.add_row(Row::new(cells));
    }

    format!(
        "Probability of the win for the user (row) against the computer (column):\n{}",
        out
    )
}
